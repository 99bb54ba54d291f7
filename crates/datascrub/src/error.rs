//! Custom error types for the cleaning pipeline.
//!
//! Two conditions are part of the public contract: a missing input file
//! ([`CleaningError::FileNotFound`]) and an unrecognized missing-value
//! strategy ([`CleaningError::InvalidStrategy`]). Everything else wraps the
//! underlying I/O, parsing or serialization failure.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// Input path does not resolve to an existing file.
    #[error("File not found at {}. Please check the path.", .0.display())]
    FileNotFound(PathBuf),

    /// Unrecognized missing-value handling strategy.
    #[error("Invalid method for handling missing values: '{0}' (expected mean, median, mode or drop)")]
    InvalidStrategy(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::InvalidStrategy(_) => "INVALID_STRATEGY",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is the "file not found" condition.
    pub fn is_file_not_found(&self) -> bool {
        match self {
            Self::FileNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_file_not_found(),
            _ => false,
        }
    }

    /// Check if this error is the "invalid strategy" condition.
    pub fn is_invalid_strategy(&self) -> bool {
        match self {
            Self::InvalidStrategy(_) => true,
            Self::WithContext { source, .. } => source.is_invalid_strategy(),
            _ => false,
        }
    }
}

impl From<ConfigValidationError> for CleaningError {
    fn from(err: ConfigValidationError) -> Self {
        CleaningError::InvalidConfig(err.to_string())
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            CleaningError::FileNotFound(PathBuf::from("x.csv")).error_code(),
            "FILE_NOT_FOUND"
        );
        assert_eq!(
            CleaningError::InvalidStrategy("bogus".to_string()).error_code(),
            "INVALID_STRATEGY"
        );
    }

    #[test]
    fn test_file_not_found_message_names_path() {
        let error = CleaningError::FileNotFound(PathBuf::from("data/missing.csv"));
        let message = error.to_string();
        assert!(message.contains("data/missing.csv"));
        assert!(message.contains("File not found"));
    }

    #[test]
    fn test_with_context_preserves_kind() {
        let error =
            CleaningError::InvalidStrategy("bogus".to_string()).with_context("During imputation");
        assert!(error.to_string().contains("During imputation"));
        assert_eq!(error.error_code(), "INVALID_STRATEGY");
        assert!(error.is_invalid_strategy());
        assert!(!error.is_file_not_found());
    }

    #[test]
    fn test_config_validation_error_converts() {
        let error: CleaningError = ConfigValidationError::InvalidThreshold(-1.0).into();
        assert_eq!(error.error_code(), "INVALID_CONFIG");
    }
}
