//! Diagnostic logging setup.

use color_eyre::eyre::{eyre, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Installs the global `tracing` subscriber.
///
/// Events go to standard error so that they never mix with the game output on standard output. The
/// verbosity is read from `RUST_LOG`, falling back to warnings only.
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed.
pub fn install() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| eyre!("failed to install the tracing subscriber: {err}"))
}
