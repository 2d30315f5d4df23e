//! Core error types for Calc AE.
//!
//! The calculator itself is a total function and never fails; these errors
//! only come from parsing user-supplied values and from the persistence
//! layer behind the settings store.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the calculator application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage-agnostic errors raised by repository implementations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The persisted configuration could not be read from its backend.
    #[error("Failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    /// The configuration could not be written to its backend.
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    /// The persisted data exists but is not a valid configuration document.
    #[error("Malformed configuration data: {0}")]
    Malformed(String),

    /// A background persistence task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
