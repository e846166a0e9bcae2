//! Logging setup: tracing with an env-filter layered over the configured
//! base level.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Uses `try_init`
/// so repeated calls (e.g. from tests) are harmless.
pub fn init(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(true))
        .with(filter)
        .try_init();
}
