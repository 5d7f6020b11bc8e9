//! File logging. The terminal belongs to the UI, so events go to a log file
//! next to the persisted dashboard state.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Open `path` for appending and wrap it in a background writer. Events are
/// flushed while the returned guard is alive and once more when it drops.
pub fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok(tracing_appender::non_blocking(file))
}

/// Install a global subscriber appending to `path`. `RUST_LOG` overrides the
/// default level; `verbose` raises the default to debug.
///
/// Hold the guard until the terminal is restored.
pub fn init_file_logging(path: &Path, verbose: bool) -> Result<WorkerGuard> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (writer, guard) = file_writer(path)?;
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize tracing: {err}"))?;
    Ok(guard)
}
