//! Hosted backend contracts: document storage and authentication.
//!
//! The tracker never talks to a database or identity service directly. It
//! goes through the ports defined here, which model a hosted
//! backend-as-a-service: documents with generated identifiers, server-side
//! timestamps, live query subscriptions, and email/password accounts.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The connection handle in [`connection`]

pub mod adapters;
pub mod connection;
pub mod domain;
pub mod ports;

pub use connection::{Backend, BackendServices};
