//! Shared fixtures for in-memory integration tests.

use rstest::fixture;
use sprintboard::{
    backend::{Backend, BackendServices},
    tracker::services::{AuthService, TrackerService},
};

/// A connected in-memory backend with both services built over it.
pub struct Workspace {
    pub backend: Backend,
    pub tracker: TrackerService,
    pub auth: AuthService,
}

/// Provides a fresh connected workspace for each test.
#[fixture]
pub fn workspace() -> Workspace {
    let backend = Backend::connected(BackendServices::in_memory());
    Workspace {
        tracker: TrackerService::new(&backend),
        auth: AuthService::new(&backend),
        backend,
    }
}

/// Provides services over a backend that was never configured.
#[fixture]
pub fn inert_workspace() -> Workspace {
    let backend = Backend::unconfigured();
    Workspace {
        tracker: TrackerService::new(&backend),
        auth: AuthService::new(&backend),
        backend,
    }
}
