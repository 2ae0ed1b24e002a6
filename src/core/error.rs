//! Error types for the sink system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Required input was empty or otherwise unusable
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Sink already disposed
    #[error("Logger already stopped")]
    LoggerStopped,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// One or more owned sinks failed to dispose
    #[error("Failed to dispose {} sink(s): {}", failures.len(), failures.join("; "))]
    DisposeFailed { failures: Vec<String> },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Aggregate disposal failures
    pub fn dispose_failed(failures: Vec<String>) -> Self {
        LoggerError::DisposeFailed { failures }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_argument("label", "cannot be empty");
        assert!(matches!(err, LoggerError::InvalidArgument { .. }));

        let err = LoggerError::config("FileSink", "flush interval must be positive");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::dispose_failed(vec!["file: boom".to_string()]);
        assert!(matches!(err, LoggerError::DisposeFailed { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_argument("label", "cannot be empty");
        assert_eq!(err.to_string(), "Invalid argument 'label': cannot be empty");

        let err = LoggerError::config("RetentionCleaner", "bad pattern");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for RetentionCleaner: bad pattern"
        );

        let err = LoggerError::dispose_failed(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Failed to dispose 2 sink(s): a; b");

        assert_eq!(LoggerError::LoggerStopped.to_string(), "Logger already stopped");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("appending to log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("appending to log file"));
        assert!(err.to_string().contains("cannot write to file"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
