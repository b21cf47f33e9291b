//! # Error Types
//!
//! Structured error types for proof_core. The formula functions themselves are
//! total over finite inputs and never fail; errors arise only from session
//! persistence (file I/O, locking, schema versioning).
//!
//! ## Example
//!
//! ```rust
//! use proof_core::errors::{CalcError, CalcResult};
//!
//! fn reject_missing(path: &str) -> CalcResult<()> {
//!     Err(CalcError::file_error("open", path, "No such file"))
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for proof_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for engine and persistence operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic handling by front ends.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Session file is locked by another process
    #[error("Session locked: '{path}' is held by {holder} since {locked_at}")]
    SessionLocked {
        path: String,
        holder: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SessionLocked error
    pub fn session_locked(
        path: impl Into<String>,
        holder: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        CalcError::SessionLocked {
            path: path.into(),
            holder: holder.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::SessionLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SessionLocked { .. } => "SESSION_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
