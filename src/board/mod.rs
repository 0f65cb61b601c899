//! Kanban board presentation.
//!
//! Groups tasks into status columns, turns drag/drop into status writes, and
//! renders boards and import results as text.

mod format;
mod kanban;
mod render;

pub use format::{avatar_initial, format_date, format_date_range, format_date_short};
pub use kanban::{Board, Column, StatusChange, plan_move};
pub use render::{RenderError, render_board, render_import_preview, render_import_summary};

#[cfg(test)]
mod tests;
