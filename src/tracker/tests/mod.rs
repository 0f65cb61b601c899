//! Unit tests for the tracker module.
//!
//! Covers status normalisation, document mapping and the data-access and
//! auth services against the in-memory backend.

mod auth_service_tests;
