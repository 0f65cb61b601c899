//! Connection handle over the configured backend services.

use std::sync::Arc;

use super::{
    adapters::memory::{InMemoryAuthProvider, InMemoryDocumentStore},
    ports::{AuthProvider, DocumentStore},
};
use crate::config::{BackendConfig, ConfigError};

/// The pair of services a connected backend exposes.
#[derive(Clone)]
pub struct BackendServices {
    /// Document database.
    pub store: Arc<dyn DocumentStore>,
    /// Email/password auth provider.
    pub auth: Arc<dyn AuthProvider>,
}

impl BackendServices {
    /// Bundles a store and an auth provider.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { store, auth }
    }

    /// Fresh in-memory services.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(InMemoryAuthProvider::new()),
        )
    }
}

impl std::fmt::Debug for BackendServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendServices").finish_non_exhaustive()
    }
}

/// Backend connection: either connected, or inert when not configured.
///
/// An inert backend is not an error. Reads yield empty results and writes
/// return without effect, so the rest of the application keeps working in a
/// read-only-empty state.
#[derive(Debug, Clone, Default)]
pub struct Backend {
    services: Option<BackendServices>,
    project_id: Option<String>,
}

impl Backend {
    /// A backend with no configuration.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Connects the given services when the configuration loaded.
    ///
    /// A configuration error leaves the backend inert and is logged rather
    /// than returned.
    #[must_use]
    pub fn initialize(
        config: Result<BackendConfig, ConfigError>,
        services: BackendServices,
    ) -> Self {
        match config {
            Ok(config) => {
                tracing::info!(project_id = %config.project_id, "backend connected");
                Self {
                    services: Some(services),
                    project_id: Some(config.project_id),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "backend not configured; running inert");
                Self::unconfigured()
            }
        }
    }

    /// Connects services without configuration, for local and test use.
    #[must_use]
    pub fn connected(services: BackendServices) -> Self {
        Self {
            services: Some(services),
            project_id: None,
        }
    }

    /// Returns `true` when the backend is connected.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.services.is_some()
    }

    /// Returns the configured project identifier, if any.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Returns the document store when connected.
    #[must_use]
    pub fn store(&self) -> Option<Arc<dyn DocumentStore>> {
        self.services
            .as_ref()
            .map(|services| Arc::clone(&services.store))
    }

    /// Returns the auth provider when connected.
    #[must_use]
    pub fn auth(&self) -> Option<Arc<dyn AuthProvider>> {
        self.services
            .as_ref()
            .map(|services| Arc::clone(&services.auth))
    }
}
