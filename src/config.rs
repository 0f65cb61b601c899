//! Backend connection settings.
//!
//! The hosted backend needs six named values before a connection can be
//! established. They are read from the environment:
//!
//! - `SPRINTBOARD_API_KEY`
//! - `SPRINTBOARD_AUTH_DOMAIN`
//! - `SPRINTBOARD_PROJECT_ID`
//! - `SPRINTBOARD_STORAGE_BUCKET`
//! - `SPRINTBOARD_MESSAGING_SENDER_ID`
//! - `SPRINTBOARD_APP_ID`
//!
//! Missing values are reported together so the caller can decide to run in
//! the inert "not configured" mode instead of failing.

use thiserror::Error;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "SPRINTBOARD_API_KEY";
/// Environment variable holding the auth domain.
pub const AUTH_DOMAIN_VAR: &str = "SPRINTBOARD_AUTH_DOMAIN";
/// Environment variable holding the project identifier.
pub const PROJECT_ID_VAR: &str = "SPRINTBOARD_PROJECT_ID";
/// Environment variable holding the storage bucket.
pub const STORAGE_BUCKET_VAR: &str = "SPRINTBOARD_STORAGE_BUCKET";
/// Environment variable holding the messaging sender identifier.
pub const MESSAGING_SENDER_ID_VAR: &str = "SPRINTBOARD_MESSAGING_SENDER_ID";
/// Environment variable holding the application identifier.
pub const APP_ID_VAR: &str = "SPRINTBOARD_APP_ID";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required values are missing or blank.
    #[error("missing backend configuration: {}", .0.join(", "))]
    MissingValues(Vec<&'static str>),
}

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Public API key.
    pub api_key: String,
    /// Auth provider domain.
    pub auth_domain: String,
    /// Backend project identifier.
    pub project_id: String,
    /// File storage bucket.
    pub storage_bucket: String,
    /// Push messaging sender identifier.
    pub messaging_sender_id: String,
    /// Application identifier.
    pub app_id: String,
}

impl BackendConfig {
    /// Loads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValues`] naming every unset or blank
    /// variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValues`] naming every unset or blank
    /// variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| {
            let value = lookup(name)
                .map(|raw| raw.trim().to_owned())
                .filter(|value| !value.is_empty());
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let config = Self {
            api_key: read(API_KEY_VAR),
            auth_domain: read(AUTH_DOMAIN_VAR),
            project_id: read(PROJECT_ID_VAR),
            storage_bucket: read(STORAGE_BUCKET_VAR),
            messaging_sender_id: read(MESSAGING_SENDER_ID_VAR),
            app_id: read(APP_ID_VAR),
        };

        if missing.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::MissingValues(missing))
        }
    }
}
