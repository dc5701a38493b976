//! Error types for rowview.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the command-line driver
//!   - [`ConfigError`](crate::config::ConfigError) - config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - tracing setup failures
//!   - [`ViewError`] - list view operation failures
//! - [`ViewError`] - Invalid row indices and surface failures surfaced by `ListView`
//!   - [`SurfaceError`] - Element tree failures reported by a [`Surface`](crate::surface::Surface)
//!
//! # Recovery Strategy
//!
//! Two surface failures are recovered locally and never reach the caller:
//! an insertion whose reference sibling is no longer in the container falls back
//! to appending (logged at `warn`), and detaching an element that is not attached
//! is swallowed (logged at `debug`).

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::surface::SurfaceError;
use thiserror::Error;

/// Top-level error for the command-line driver.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// A list view operation failed.
    #[error("View error: {0}")]
    View(#[from] ViewError),

    /// Writing the report failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// A report line could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by [`ListView`](crate::view_state::list_view::ListView) operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    /// A row index was at or beyond the row count.
    #[error("Row index {index} out of bounds (len: {len})")]
    RowOutOfBounds {
        /// Requested row index.
        index: usize,
        /// Row count at the time of the request.
        len: usize,
    },

    /// A splice start was beyond the row count.
    #[error("Splice at {start} out of bounds (len: {len})")]
    SpliceOutOfBounds {
        /// Requested splice start.
        start: usize,
        /// Row count at the time of the request.
        len: usize,
    },

    /// The surface rejected an element operation that has no local recovery.
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ElementId;

    #[test]
    fn row_out_of_bounds_display() {
        let err = ViewError::RowOutOfBounds { index: 12, len: 10 };
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("len: 10"));
    }

    #[test]
    fn splice_out_of_bounds_display() {
        let err = ViewError::SpliceOutOfBounds { start: 5, len: 3 };
        assert_eq!(err.to_string(), "Splice at 5 out of bounds (len: 3)");
    }

    #[test]
    fn view_error_from_surface_error() {
        let err: ViewError = SurfaceError::UnknownElement(ElementId::new(9)).into();
        assert!(err.to_string().contains("Surface error"));
        assert!(matches!(err, ViewError::Surface(_)));
    }

    #[test]
    fn app_error_from_view_error() {
        let err: AppError = ViewError::RowOutOfBounds { index: 1, len: 0 }.into();
        assert!(err.to_string().starts_with("View error"));
    }

    #[test]
    fn app_error_from_config_error() {
        let err: AppError = ConfigError::InvalidPath("bad".into()).into();
        assert!(err.to_string().contains("Configuration error"));
    }
}
