//! Error types for WebEQ
//!
//! Bank operations on unknown ids are no-ops, not errors. What remains is
//! rejected field input and failures of the identity/export store.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected value from a detail-view field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// Text that does not parse as a number
    #[error("Not a number: '{0}'")]
    NotANumber(String),

    /// Selector value that names no filter type
    #[error("Unknown filter type: '{0}'")]
    UnknownFilterType(String),

    /// Field shown for a type that does not use it
    #[error("Field '{field}' does not apply to {filter_type} filters")]
    NotApplicable { field: &'static str, filter_type: String },
}

/// Errors from the identity/export store and its service thread
#[derive(Debug, Error)]
pub enum StoreError {
    /// No user id available to attach an export to
    #[error("No user id - allocate one before exporting")]
    MissingUserId,

    /// User id unknown to the store
    #[error("Unknown user id: {0}")]
    UnknownUser(String),

    /// Store directory could not be prepared or written
    #[error("Store I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Service thread is gone or dropped the reply
    #[error("Store service is not running")]
    ServiceStopped,

    /// Service thread could not be started
    #[error("Failed to spawn store service: {0}")]
    SpawnFailed(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
