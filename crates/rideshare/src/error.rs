//! Error types for rideshare.
//!
//! This module defines all error types used throughout the rideshare crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rideshare operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// The data file could not be created or read.
    ///
    /// Non-fatal: the directory behaves as empty until the problem is fixed.
    #[error("storage unavailable at {path}: {source}")]
    StorageUnavailable {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A snapshot write could not be completed.
    ///
    /// The previously saved data file is left untouched.
    #[error("failed to write {path}: {source}")]
    IoFailure {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A new record was rejected because the directory is full.
    #[error("directory is full ({capacity} students max)")]
    CapacityExceeded {
        /// The configured record ceiling.
        capacity: usize,
    },

    /// A record field cannot be stored in the line format.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
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
}

/// A specialized Result type for rideshare operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid field error.
    #[must_use]
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Check if this error is a capacity rejection.
    #[must_use]
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }

    /// Check if this error means the data file could not be reached.
    #[must_use]
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable { .. })
    }
}
