//! Error types for skywatch.
//!
//! This module defines all error types used throughout the skywatch crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::Path;

use thiserror::Error;

/// The main error type for skywatch operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Data Errors ===
    /// The sightings database could not be read, or its schema does not
    /// provide the expected tables and columns.
    #[error("data unavailable: {reason}")]
    DataUnavailable {
        /// Description of what went wrong.
        reason: String,
    },

    /// No shapes are selected, so there is nothing to put on the map.
    #[error("no shapes selected")]
    EmptySelection,

    // === Filter Errors ===
    /// A year range whose lower bound is above its upper bound.
    #[error("invalid year range: {min} is after {max}")]
    InvalidYearRange {
        /// Requested first year.
        min: i32,
        /// Requested last year.
        max: i32,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for skywatch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new data unavailable error.
    #[must_use]
    pub fn data_unavailable(reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            reason: reason.into(),
        }
    }

    /// Wrap a `SQLite` failure against the database at `path`.
    #[must_use]
    pub fn from_sqlite(path: &Path, err: &rusqlite::Error) -> Self {
        Self::data_unavailable(format!("{}: {err}", path.display()))
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error means the data store could not be used.
    #[must_use]
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }

    /// Check if this error is an empty shape selection.
    #[must_use]
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Self::EmptySelection)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptySelection;
        assert_eq!(err.to_string(), "no shapes selected");

        let err = Error::data_unavailable("no such table: sightings");
        assert_eq!(err.to_string(), "data unavailable: no such table: sightings");
    }

    #[test]
    fn test_error_predicates() {
        assert!(Error::data_unavailable("x").is_data_unavailable());
        assert!(!Error::EmptySelection.is_data_unavailable());
        assert!(Error::EmptySelection.is_empty_selection());
        assert!(!Error::data_unavailable("x").is_empty_selection());
    }

    #[test]
    fn test_invalid_year_range_display() {
        let err = Error::InvalidYearRange {
            min: 2010,
            max: 1990,
        };
        assert_eq!(err.to_string(), "invalid year range: 2010 is after 1990");
    }

    #[test]
    fn test_from_sqlite_includes_path() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/ufo.db",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err = Error::from_sqlite(&PathBuf::from("/nonexistent/path/ufo.db"), &sqlite_err);
            assert!(err.is_data_unavailable());
            assert!(err.to_string().contains("/nonexistent/path/ufo.db"));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("min_year after max_year");
        assert!(err.to_string().contains("min_year after max_year"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }
}
