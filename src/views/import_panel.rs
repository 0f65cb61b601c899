//! Import panel: preview pasted text, then run the import.

use super::InFlight;
use crate::import::{
    ImportError, ImportSink, ImportSummary, ParseResult, parse_import_csv, run_import,
};
use crate::tracker::domain::Sprint;

/// Example input offered by the panel.
pub const SAMPLE_CSV: &str = "Sprint,Module,Task,Role,Priority,Notes
Sprint 1,Project Setup,Initialize monorepo structure,SYSTEM,HIGH,Next.js + Hono API
Sprint 1,Project Setup,Setup Supabase project,SYSTEM,HIGH,Enable RLS default deny
Sprint 2,Authentication,Email/password auth,SYSTEM,HIGH,Supabase auth";

/// Outcome of [`ImportPanel::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The import ran.
    Completed(ImportSummary),
    /// There was nothing to import.
    Rejected(ImportError),
    /// The text was blank or an import is already running.
    Skipped,
}

/// Import panel state.
#[derive(Debug, Clone, Default)]
pub struct ImportPanel {
    text: String,
    result: Option<ImportSummary>,
    error: Option<String>,
    in_flight: InFlight,
}

impl ImportPanel {
    /// Creates an empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the input text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Loads [`SAMPLE_CSV`].
    pub fn use_sample(&mut self) {
        self.set_text(SAMPLE_CSV);
    }

    /// Returns the input text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parses the current text; `None` while it is blank.
    #[must_use]
    pub fn preview(&self) -> Option<ParseResult> {
        (!self.text.trim().is_empty()).then(|| parse_import_csv(&self.text))
    }

    /// Returns the last import summary.
    #[must_use]
    pub const fn result(&self) -> Option<&ImportSummary> {
        self.result.as_ref()
    }

    /// Returns the last error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the panel's busy flag.
    #[must_use]
    pub const fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// Runs the import against `existing_sprints`.
    pub async fn run<S>(&mut self, sink: &S, existing_sprints: &[Sprint]) -> ImportOutcome
    where
        S: ImportSink + ?Sized,
    {
        if self.text.trim().is_empty() {
            return ImportOutcome::Skipped;
        }
        let Some(_guard) = self.in_flight.try_begin() else {
            return ImportOutcome::Skipped;
        };
        self.result = None;
        self.error = None;
        match run_import(sink, &self.text, existing_sprints).await {
            Ok(summary) => {
                self.result = Some(summary.clone());
                ImportOutcome::Completed(summary)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                ImportOutcome::Rejected(err)
            }
        }
    }
}
