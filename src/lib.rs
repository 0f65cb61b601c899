//! Sprintboard: a sprint and kanban task tracker.
//!
//! Sprints group tasks; each task sits in one of five status columns and can
//! be assigned to a user. Tasks can be bulk-imported from comma-separated
//! text. Persistence, live query sync and authentication are delegated to an
//! external document database and auth provider behind ports.
//!
//! # Architecture
//!
//! Sprintboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the document store and auth
//! - **Adapters**: In-memory implementations of the ports and document mapping
//!
//! # Modules
//!
//! - [`backend`]: Document-store and auth ports, adapters and connection
//! - [`tracker`]: Tasks, sprints and users with their services
//! - [`import`]: CSV import parsing and orchestration
//! - [`board`]: Kanban grouping, drag/drop and text rendering
//! - [`views`]: Live view state and forms
//! - [`config`]: Backend settings from the environment
//! - [`logging`]: Log subscriber setup

pub mod backend;
pub mod board;
pub mod config;
pub mod import;
pub mod logging;
pub mod tracker;
pub mod views;
