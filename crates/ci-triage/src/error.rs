//! Triage error types
//!
//! The engine is total over well-typed input. Everything here is either a
//! caller contract violation or a boundary failure (config, persisted JSON).

use thiserror::Error;

/// Result type alias for triage operations
pub type TriageResult<T> = Result<T, TriageError>;

/// Errors that can occur while planning or decoding triage output
#[derive(Error, Debug)]
pub enum TriageError {
    /// Caller supplied a value outside the documented contract
    #[error("Validation error on `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Signature algorithm version this build does not implement
    #[error("Unsupported signature version: {version} (supported: 2, 3)")]
    UnsupportedSignatureVersion { version: u8 },

    /// Persisted record written by a newer build
    #[error("Unsupported record version {found}; this build reads up to {supported}")]
    UnsupportedRecordVersion { found: u32, supported: u32 },

    /// Malformed configuration value
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TriageError {
    /// Create a validation error for a named field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Field name for validation errors, `None` otherwise
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let err = TriageError::validation("attempt", "must be >= 1");
        assert_eq!(err.field(), Some("attempt"));
        assert_eq!(
            err.to_string(),
            "Validation error on `attempt`: must be >= 1"
        );
    }

    #[test]
    fn test_non_validation_errors_have_no_field() {
        let err = TriageError::UnsupportedSignatureVersion { version: 7 };
        assert_eq!(err.field(), None);
        assert!(err.to_string().contains("7"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: TriageError = parse.unwrap_err().into();
        assert!(matches!(err, TriageError::Json(_)));
    }
}
