//! Log Initialization
//!
//! Structured logging via tracing-subscriber. Filtering comes from
//! `RUST_LOG` when set, otherwise from the caller-supplied directives.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Logging setup errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid filter directives: {0}")]
    InvalidFilter(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

/// Initialize logging at the default `info` level
pub fn init() -> Result<(), LoggingError> {
    init_with_filter("info")
}

/// Initialize logging with the given fallback filter directives.
///
/// `RUST_LOG` takes precedence when present. Fails if a global subscriber
/// is already installed.
pub fn init_with_filter(directives: &str) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives))
        .map_err(|e| LoggingError::InvalidFilter(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| LoggingError::InitError(e.to_string()))
}
