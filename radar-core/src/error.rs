//! Error types for the radar workspace

use thiserror::Error;

/// Workspace-wide error type
///
/// Every failure that can cross a crate boundary is one of these variants.
/// The facade maps each variant onto a stable machine code in the response
/// envelope via [`RadarError::code`].
#[derive(Error, Debug)]
pub enum RadarError {
    /// A caller-supplied parameter is missing or malformed
    #[error("{message}")]
    Validation {
        message: String,
        suggestion: Option<String>,
    },

    /// No records exist for the resolved date or scope
    #[error("{message}")]
    DataNotFound {
        message: String,
        suggestion: Option<String>,
    },

    /// The backing store failed to read or decode data
    #[error("Store error: {0}")]
    Store(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RadarError {
    pub fn validation(message: impl Into<String>) -> Self {
        RadarError::Validation {
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn validation_with(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        RadarError::Validation {
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        RadarError::DataNotFound {
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn not_found_with(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        RadarError::DataNotFound {
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        RadarError::Store(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        RadarError::Internal(message.into())
    }

    /// Stable machine code reported in the response envelope
    pub fn code(&self) -> &'static str {
        match self {
            RadarError::Validation { .. } => "INVALID_PARAMETER",
            RadarError::DataNotFound { .. } => "DATA_NOT_FOUND",
            RadarError::Store(_) | RadarError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Corrective suggestion for the caller, if one exists
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            RadarError::Validation { suggestion, .. }
            | RadarError::DataNotFound { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias for radar operations
pub type RadarResult<T> = Result<T, RadarError>;
