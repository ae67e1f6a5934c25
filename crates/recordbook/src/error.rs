//! Error types for recordbook.
//!
//! This module defines all error types used throughout the recordbook crate.
//! Validation and lookup errors are returned to the caller; I/O and
//! serialization errors are only ever produced while loading or saving and
//! are handed to the store's observer instead of being propagated.

use std::path::PathBuf;
use thiserror::Error;

use crate::record::RecordType;

/// The main error type for recordbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Errors ===
    /// The record type name is not one of `client`, `flight` or `airline`.
    #[error("record type '{name}' is not supported")]
    InvalidRecordType {
        /// The name that was rejected.
        name: String,
    },

    /// No record with the given id exists in the collection.
    #[error("record with id '{id}' not found in '{record_type}' records")]
    RecordNotFound {
        /// Collection that was searched.
        record_type: RecordType,
        /// The id that was looked up.
        id: String,
    },

    /// The last record of a collection has an id that cannot seed the next one.
    #[error("malformed record id '{id}': expected a prefix letter followed by digits")]
    MalformedRecordId {
        /// The offending id.
        id: String,
    },

    /// The last record of a collection has no `id` field to continue from.
    #[error("last '{record_type}' record has no id to continue the sequence from")]
    MissingRecordId {
        /// Collection whose last record lacks an id.
        record_type: RecordType,
    },

    // === Storage Errors ===
    /// The requested file format is not supported.
    #[error("file format '{name}' is not supported")]
    UnsupportedFormat {
        /// The format name that was rejected.
        name: String,
    },

    /// Failed to create the data directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
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

    /// MessagePack serialization failed.
    #[error("MessagePack encode error: {0}")]
    MessagePackEncode(#[from] rmp_serde::encode::Error),

    /// MessagePack deserialization failed.
    #[error("MessagePack decode error: {0}")]
    MessagePackDecode(#[from] rmp_serde::decode::Error),
}

/// A specialized Result type for recordbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid record type error.
    #[must_use]
    pub fn invalid_record_type(name: impl Into<String>) -> Self {
        Self::InvalidRecordType { name: name.into() }
    }

    /// Create a record not found error.
    #[must_use]
    pub fn record_not_found(record_type: RecordType, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            record_type,
            id: id.into(),
        }
    }

    /// Check if this error means a record id did not match anything.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }

    /// Check if this error is a rejected record type name.
    #[must_use]
    pub fn is_invalid_record_type(&self) -> bool {
        matches!(self, Self::InvalidRecordType { .. })
    }
}
