//! Tracing subscriber setup shared by the binaries.
//!
//! The REPL owns the terminal, so it logs to a file; the dashboard CLI logs
//! to stderr. `RUST_LOG` overrides the default filter.

use std::path::PathBuf;
use std::sync::{Once, OnceLock};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,devcon_application=debug";

/// File name used under the logs directory.
pub const LOG_FILE_NAME: &str = "devcon-chat.log";

static INIT: Once = Once::new();
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Appends to the given file, creating parent directories as needed.
    File(PathBuf),
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(target: LogTarget) {
    INIT.call_once(|| match target {
        LogTarget::Stderr => init_stderr_logging(),
        LogTarget::File(path) => {
            if let Err(e) = init_file_logging(&path) {
                eprintln!("[devcon] Failed to open log file {:?}: {}", path, e);
                init_stderr_logging();
            }
        }
    });
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_file_logging(path: &std::path::Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let _ = LOG_GUARD.set(guard);

    let subscriber = tracing_subscriber::registry().with(filter()).with(
        fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[devcon] Failed to set tracing subscriber: {}", e);
    } else {
        tracing::info!("Logging initialized, writing to {:?}", path);
    }
    Ok(())
}

fn init_stderr_logging() {
    let subscriber = tracing_subscriber::registry().with(filter()).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[devcon] Failed to set tracing subscriber: {}", e);
    }
}
