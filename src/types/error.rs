//! Error types for rocopy

use std::path::PathBuf;
use thiserror::Error;

/// Error types for rocopy operations
#[derive(Debug, Error)]
pub enum RocopyError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source and destination resolve to the same filesystem entity
    #[error("Source and destination are the same location: {path}")]
    SamePath { path: PathBuf },

    /// Source path does not exist or is neither a file nor a directory
    #[error("Source path is not a valid file or directory: {path}")]
    InvalidSource { path: PathBuf },

    /// A pattern could not be parsed (e.g. an invalid `re:` regex)
    #[error("Invalid pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RocopyError {
    /// Check if this error aborts a whole operation (as opposed to a
    /// recorded per-entry failure, which never surfaces as an error)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RocopyError::SamePath { .. } | RocopyError::InvalidSource { .. }
        )
    }

    /// Check if this error stems from user-supplied input
    pub fn is_usage_error(&self) -> bool {
        matches!(self, RocopyError::Pattern { .. } | RocopyError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_io_error_automatic_conversion() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let error: RocopyError = io_error.into();

        assert!(matches!(error, RocopyError::Io(_)));
        assert!(error.to_string().contains("IO error"));
    }

    #[test]
    fn test_io_error_from_function() {
        fn returns_io_error() -> Result<(), RocopyError> {
            let _file = std::fs::File::open("/nonexistent/path/file.txt")?;
            Ok(())
        }

        let result = returns_io_error();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), RocopyError::Io(_)));
    }

    #[test]
    fn test_same_path_error() {
        let error = RocopyError::SamePath {
            path: PathBuf::from("/data/tree"),
        };
        assert!(error.to_string().contains("same location"));
        assert!(error.to_string().contains("/data/tree"));
        assert!(error.is_fatal());
    }

    #[test]
    fn test_invalid_source_error() {
        let error = RocopyError::InvalidSource {
            path: PathBuf::from("/missing"),
        };
        assert!(error.to_string().contains("not a valid file or directory"));
        assert!(error.is_fatal());
        assert!(!error.is_usage_error());
    }

    #[test]
    fn test_pattern_error() {
        let error = RocopyError::Pattern {
            pattern: "re:[unclosed".to_string(),
            reason: "unclosed character class".to_string(),
        };
        assert!(error.to_string().contains("re:[unclosed"));
        assert!(error.is_usage_error());
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_config_error() {
        let error = RocopyError::Config("Source path does not exist".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.is_usage_error());
    }

    #[test]
    fn test_result_propagation() {
        fn inner_function() -> Result<(), RocopyError> {
            Err(RocopyError::Config("test error".to_string()))
        }

        fn outer_function() -> Result<(), RocopyError> {
            inner_function()?;
            Ok(())
        }

        let result = outer_function();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), RocopyError::Config(_)));
    }
}
