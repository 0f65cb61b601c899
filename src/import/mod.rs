//! Bulk task import from comma-separated text.
//!
//! [`parse_import_csv`] is pure and never fails; [`run_import`] reconciles
//! the parsed sprint names with existing sprints and creates the tasks
//! through an [`ImportSink`].

mod orchestration;
mod parser;

pub use orchestration::{ImportError, ImportSink, ImportSummary, run_import};
pub use parser::{
    COLUMN_COUNT, EXPECTED_HEADER, ImportRow, ParseResult, ParseWarning, parse_import_csv,
};

#[cfg(test)]
mod tests;
