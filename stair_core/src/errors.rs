//! # Error Types
//!
//! Structured error types for stair_core. Structural problems with the
//! input abort assembly with one of these errors; ergonomic issues are not
//! errors at all and travel in the model's warning list instead
//! (see [`crate::calculations::compliance`]).
//!
//! ## Example
//!
//! ```rust
//! use stair_core::errors::{StairError, StairResult};
//!
//! fn validate_width(width_cm: f64) -> StairResult<()> {
//!     if width_cm <= 0.0 {
//!         return Err(StairError::invalid_configuration(
//!             "stair_width_cm",
//!             width_cm.to_string(),
//!             "Width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_width(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for stair_core operations
pub type StairResult<T> = Result<T, StairError>;

/// Structured error type for stair assembly.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by callers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum StairError {
    /// Structurally impossible input (non-positive height, unsupported turn angle, ...)
    #[error("Invalid configuration for '{field}': {value} - {reason}")]
    InvalidConfiguration {
        field: String,
        value: String,
        reason: String,
    },

    /// A field required by the selected sizing mode is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Input is valid but a segment comes out zero-area or self-intersecting
    #[error("Degenerate geometry in {segment}: {reason}")]
    GeometryDegenerate { segment: String, reason: String },

    /// Configuration file could not be read
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl StairError {
    /// Create an InvalidConfiguration error
    pub fn invalid_configuration(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        StairError::InvalidConfiguration {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        StairError::MissingField {
            field: field.into(),
        }
    }

    /// Create a GeometryDegenerate error
    pub fn degenerate(segment: impl Into<String>, reason: impl Into<String>) -> Self {
        StairError::GeometryDegenerate {
            segment: segment.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        StairError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        StairError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True when the error comes from the stair description itself rather
    /// than from reading it.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            StairError::InvalidConfiguration { .. }
                | StairError::MissingField { .. }
                | StairError::GeometryDegenerate { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            StairError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            StairError::MissingField { .. } => "MISSING_FIELD",
            StairError::GeometryDegenerate { .. } => "GEOMETRY_DEGENERATE",
            StairError::FileError { .. } => "FILE_ERROR",
            StairError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = StairError::invalid_configuration("ramps[0].height_cm", "-5", "Height must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidConfiguration\""));
        let roundtrip: StairError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(StairError::missing_field("num_steps").error_code(), "MISSING_FIELD");
        assert_eq!(
            StairError::degenerate("ramp 1", "tread is zero").error_code(),
            "GEOMETRY_DEGENERATE"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(StairError::degenerate("ramp 1", "x").is_configuration_error());
        assert!(!StairError::serialization("bad json").is_configuration_error());
        assert!(!StairError::file_error("read", "a.json", "missing").is_configuration_error());
    }

    #[test]
    fn test_display() {
        let error = StairError::degenerate("ramp 2", "tread depth is zero");
        assert_eq!(error.to_string(), "Degenerate geometry in ramp 2: tread depth is zero");
    }
}
