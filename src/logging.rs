//! Logging setup.
//!
//! Console logging through `tracing-subscriber`. The filter is read from
//! `SPRINTBOARD_LOG` using `EnvFilter` directive syntax and defaults to
//! `info` for this crate and `warn` for everything else.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter directives.
pub const LOG_FILTER_VAR: &str = "SPRINTBOARD_LOG";

/// Builds the filter from `SPRINTBOARD_LOG`, falling back to `default_level`
/// for this crate when the variable is unset or invalid.
#[must_use]
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_VAR)
        .or_else(|_| EnvFilter::try_new(format!("warn,sprintboard={default_level}")))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber.
///
/// Logs go to stderr so command output on stdout stays clean. Calling this
/// more than once keeps the first subscriber.
pub fn init_logging(default_level: &str) {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    let installed = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(console_layer)
        .try_init();
    if installed.is_ok() {
        tracing::debug!(filter_var = LOG_FILTER_VAR, "logging initialised");
    }
}
