//! Tracing subscriber initialization with structured logging.
//!
//! # Usage
//!
//! ```no_run
//! // Human-readable output
//! klaxon_observe::tracing_setup::init_tracing(klaxon_observe::tracing_setup::LogFormat::Pretty)
//!     .unwrap();
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output.
    Pretty,
    /// Newline-delimited JSON, one object per event.
    Json,
}

/// Initialize the global tracing subscriber.
///
/// Installs an `EnvFilter` honoring `RUST_LOG` (defaulting to `info` when
/// unset) and a fmt layer in the requested format.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(format: LogFormat) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Pretty => {
            registry
                .with(tracing_subscriber::fmt::layer().with_target(true))
                .try_init()?;
        }
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_target(true))
                .try_init()?;
        }
    }

    Ok(())
}
