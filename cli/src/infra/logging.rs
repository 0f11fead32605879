//! Error/debug sink setup.
//!
//! Events go to a log file (appended, timestamped) when one is configured,
//! otherwise to stderr without timestamps. Stdout is left alone: it carries
//! the result line.

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `debug`.
pub const LOG_ENV: &str = "RUNOVER_LOG";

/// Build the event filter: `$RUNOVER_LOG` if set, else `debug` when verbose,
/// else `warn`.
#[must_use]
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

/// Install the global subscriber. Later calls are no-ops.
///
/// # Errors
///
/// Returns an error if `log_file` cannot be opened for appending.
pub fn init(log_file: Option<&Path>, verbose: bool) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter(verbose))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter(verbose))
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .without_time()
                .try_init();
        }
    }
    Ok(())
}
