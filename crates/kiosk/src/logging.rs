#![forbid(unsafe_code)]

//! Global log subscriber for the kiosk process.
//!
//! Filtering follows `RUST_LOG` (default `info`). Output is human-readable
//! unless [`LogFormat::Json`] is requested and the `tracing-json` feature is
//! enabled; without the feature, JSON falls back to the pretty format with a
//! warning. Log lines go to stderr so they never mix with a terminal UI
//! drawn on stdout.

use kiosk_core::config::LogFormat;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::Error;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init(format: LogFormat) -> Result<(), Error> {
    let registry = tracing_subscriber::registry().with(env_filter());
    let pretty = || {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
    };
    let result = match format {
        LogFormat::Pretty => registry.with(pretty()).try_init(),
        #[cfg(feature = "tracing-json")]
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        #[cfg(not(feature = "tracing-json"))]
        LogFormat::Json => {
            let result = registry.with(pretty()).try_init();
            tracing::warn!("JSON logs need the `tracing-json` feature; using pretty output");
            result
        }
    };
    result.map_err(|err| Error::Logging(err.to_string()))?;
    tracing::debug!(format = %format, "logging initialised");
    Ok(())
}
