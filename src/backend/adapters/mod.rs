//! Adapter implementations for the backend ports.

pub mod memory;
