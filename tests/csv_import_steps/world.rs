//! Shared world state for CSV import BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use sprintboard::{
    backend::adapters::memory::InMemoryDocumentStore,
    import::{ImportError, ImportSummary},
    tracker::{domain::Sprint, services::TrackerService},
};

/// Scenario world for import behaviour tests.
pub struct ImportWorld {
    pub tracker: TrackerService,
    pub existing_sprints: Vec<Sprint>,
    pub lines: Vec<String>,
    pub result: Option<Result<ImportSummary, ImportError>>,
}

impl ImportWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: TrackerService::with_store(Arc::new(InMemoryDocumentStore::new())),
            existing_sprints: Vec::new(),
            lines: Vec::new(),
            result: None,
        }
    }

    /// Returns the accumulated import text.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns the successful import summary.
    pub fn summary(&self) -> Result<&ImportSummary, eyre::Report> {
        let result = self
            .result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("import has not run"))?;
        result
            .as_ref()
            .map_err(|err| eyre::eyre!("import was rejected: {err}"))
    }
}

impl Default for ImportWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ImportWorld {
    ImportWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
