//! Unit tests for the import module.
