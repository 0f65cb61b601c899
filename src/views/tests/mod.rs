//! Unit tests for view state.

mod collection_view_tests;
mod form_tests;
