//! # Error Types
//!
//! Structured error types for worksheet_core. These errors carry enough
//! context to be handled programmatically by the UI/controller layer,
//! which owns the translation into user-facing messages.
//!
//! Duplicate-retry exhaustion in the generator is deliberately *not* an
//! error: generation accepts the duplicate and reports it as a counter on
//! the generation outcome (availability over strict uniqueness).
//!
//! ## Example
//!
//! ```rust
//! use worksheet_core::errors::{WorksheetError, WorksheetResult};
//!
//! fn validate_count(count: u32) -> WorksheetResult<()> {
//!     if count == 0 {
//!         return Err(WorksheetError::invalid_input(
//!             "problem_count",
//!             count.to_string(),
//!             "Problem count must be at least 1",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for worksheet_core operations
pub type WorksheetResult<T> = Result<T, WorksheetError>;

/// Structured error type for generator and layout operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum WorksheetError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A constructed problem violates its arithmetic invariant
    #[error("Invalid problem '{expression}': {reason}")]
    InvalidProblem { expression: String, reason: String },

    /// Operation is not present in the arithmetic operation registry
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    /// An operation that requires input received none
    #[error("Empty input: {what}")]
    EmptyInput { what: String },

    /// Layout validation failed - the caller must not render this layout
    #[error("Invalid layout: {reason}")]
    InvalidLayout { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
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

impl WorksheetError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        WorksheetError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        WorksheetError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidProblem error
    pub fn invalid_problem(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        WorksheetError::InvalidProblem {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedOperation error
    pub fn unsupported_operation(operation: impl Into<String>) -> Self {
        WorksheetError::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Create an EmptyInput error
    pub fn empty_input(what: impl Into<String>) -> Self {
        WorksheetError::EmptyInput { what: what.into() }
    }

    /// Create an InvalidLayout error
    pub fn invalid_layout(reason: impl Into<String>) -> Self {
        WorksheetError::InvalidLayout {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        WorksheetError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            WorksheetError::InvalidInput { .. } => "INVALID_INPUT",
            WorksheetError::MissingField { .. } => "MISSING_FIELD",
            WorksheetError::InvalidProblem { .. } => "INVALID_PROBLEM",
            WorksheetError::UnsupportedOperation { .. } => "UNSUPPORTED_OPERATION",
            WorksheetError::EmptyInput { .. } => "EMPTY_INPUT",
            WorksheetError::InvalidLayout { .. } => "INVALID_LAYOUT",
            WorksheetError::FileError { .. } => "FILE_ERROR",
            WorksheetError::SerializationError { .. } => "SERIALIZATION_ERROR",
            WorksheetError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
