/// Error types for clihist
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.
use rmcp::model::{ErrorCode, ErrorData};
use thiserror::Error;

/// Main error type for clihist operations
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Git-related errors
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid request argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for clihist operations
pub type Result<T> = std::result::Result<T, HistoryError>;

// Protocol boundary: everything that escapes to the MCP caller becomes
// ErrorData. Argument problems map to invalid_params, the rest is internal.
impl From<HistoryError> for ErrorData {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::InvalidArgument(msg) => ErrorData::invalid_params(msg, None),
            other => ErrorData::new(ErrorCode::INTERNAL_ERROR, other.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HistoryError::InvalidArgument("'command' must not be empty".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Invalid argument"));
        assert!(display.contains("command"));
    }

    #[test]
    fn test_invalid_argument_maps_to_invalid_params() {
        let err: ErrorData = HistoryError::InvalidArgument("missing query".to_string()).into();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("missing query"));
    }

    #[test]
    fn test_internal_errors_keep_their_message() {
        let err: ErrorData = HistoryError::Git(git2::Error::from_str("odb failure")).into();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("odb failure"));
    }
}
