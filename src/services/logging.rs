//! Console diagnostics for the build tool.
//!
//! User-facing progress goes to stdout directly; this subscriber carries the
//! debug/warn diagnostics underneath it. `RUST_LOG` overrides the default
//! directive as usual.

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Errors that can occur during logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Occurs if a global tracing subscriber has already been initialized in
    /// the current process.
    #[error("tracing subscriber error: {0}")]
    Subscriber(#[from] TryInitError),
}

/// Initializes the global tracing subscriber.
///
/// # Result
/// Returns `Ok(())` once the subscriber is installed.
///
/// # Errors
/// Returns [`LoggingError::Subscriber`] if a global subscriber was already set.
pub fn init(verbose: bool) -> Result<(), LoggingError> {
    let default_level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };

    let env_filter =
        EnvFilter::builder().with_default_directive(default_level.into()).from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer().compact().with_ansi(true).with_target(false))
        .try_init()?;

    Ok(())
}
