//! Tracing subscriber initialization.
//!
//! Render passes are traced to a file so a driver run can stay quiet on
//! stdout. Follow the file with `tail -f` while replaying scroll passes.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log path has no parent directory
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Filter used when neither `ROWVIEW_LOG` nor `RUST_LOG` holds valid
/// directives: render passes at `info`, dependencies at `warn`.
pub const DEFAULT_FILTER: &str = "warn,rowview=info";

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "ROWVIEW_LOG";

/// Builds the event filter from `directives`, falling back to
/// [`DEFAULT_FILTER`] when they are absent or do not parse.
pub fn env_filter(directives: Option<&str>) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::EnvFilter;

    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber, writing render-pass events to `log_path`.
///
/// The parent directory is created if needed. Filter directives come from
/// `ROWVIEW_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`]; set
/// `ROWVIEW_LOG=rowview=trace` to log every pass.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| LoggingError::DirectoryCreation {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let directives = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
