//! # Error Types
//!
//! Structured error types for rc_core. Input problems are reported with
//! enough context (field, offending value, reason) that a caller can fix
//! them programmatically.
//!
//! Numerical trouble inside the neutral-axis solver is *not* an error: it is
//! absorbed and reflected in the returned values (see
//! [`analysis::neutral_axis`](crate::analysis::neutral_axis)).
//!
//! ## Example
//!
//! ```rust
//! use rc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_height(height_mm: f64) -> CalcResult<()> {
//!     if height_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "height_mm",
//!             height_mm.to_string(),
//!             "Height must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_height(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for section analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, unsupported)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material grade could not be resolved
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A material of the wrong kind was supplied (e.g. steel law on concrete)
    #[error("Material mismatch for '{field}': expected {expected}, found {found}")]
    MaterialMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// A per-rebar query was made on a section without reinforcement
    #[error("Section has no rebars: cannot {operation}")]
    NoRebars { operation: String },

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

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a MaterialMismatch error
    pub fn material_mismatch(field: impl Into<String>, expected: impl Into<String>, found: impl Into<String>) -> Self {
        CalcError::MaterialMismatch {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a NoRebars error
    pub fn no_rebars(operation: impl Into<String>) -> Self {
        CalcError::NoRebars {
            operation: operation.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::MaterialNotFound { .. }
                | CalcError::MaterialMismatch { .. }
                | CalcError::NoRebars { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::MaterialMismatch { .. } => "MATERIAL_MISMATCH",
            CalcError::NoRebars { .. } => "NO_REBARS",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
