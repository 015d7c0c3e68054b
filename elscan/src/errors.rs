//! Error types for the scanning engine.
//!
//! Configuration problems are reported before any scanning starts, and an
//! interrupted cross-search surfaces as [`ElsError::DeadlineExceeded`] or
//! [`ElsError::Cancelled`]. Empty or too-short input is not an error: the
//! fixed-mode extractor reports it as a regular result instead.
//!
//! Callers match on the variant they care about:
//! ```rust,ignore
//! match analyzer.analyze_section(text) {
//!     Ok(result) => // Render result,
//!     Err(ElsError::DeadlineExceeded { elapsed }) => // Retry with a narrower band,
//!     Err(e) => // Report other errors
//! }
//! ```
use std::time::Duration;
use thiserror::Error;

/// Result type for engine operations
pub type ElsResult<T> = Result<T, ElsError>;

/// Errors that can occur while configuring or running a scan
#[derive(Error, Debug)]
pub enum ElsError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),
    #[error("Scan deadline exceeded after {elapsed:?}")]
    DeadlineExceeded { elapsed: Duration },
    #[error("Scan cancelled")]
    Cancelled,
    #[error("Worker pool error: {0}")]
    ThreadPool(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ElsError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn deadline_exceeded(elapsed: Duration) -> Self {
        Self::DeadlineExceeded { elapsed }
    }

    pub fn thread_pool(msg: impl Into<String>) -> Self {
        Self::ThreadPool(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ElsError::config_error("skip must be positive");
        assert!(matches!(err, ElsError::ConfigError(_)));

        let err = ElsError::deadline_exceeded(Duration::from_secs(2));
        assert!(matches!(err, ElsError::DeadlineExceeded { .. }));

        let err = ElsError::thread_pool("no threads");
        assert!(matches!(err, ElsError::ThreadPool(_)));

        let err: ElsError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ElsError::IoError(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = ElsError::config_error("skip must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Configuration error: skip must be greater than 0"
        );

        let err = ElsError::deadline_exceeded(Duration::from_secs(3));
        assert_eq!(err.to_string(), "Scan deadline exceeded after 3s");

        assert_eq!(ElsError::Cancelled.to_string(), "Scan cancelled");
    }
}
