//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Numeric level outside the enumerated range
    #[error("Invalid logging level: {value}")]
    InvalidLevel { value: String },

    /// Encode name that matches none of the canonical names
    #[error("Invalid logging encode: '{name}'")]
    InvalidEncode { name: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Required environment key missing or empty
    #[error("Missing required environment variable '{key}'")]
    MissingEnvironment { key: String },

    /// Alerting backend refused or failed an incident report
    #[error("Alert dispatch failed: {0}")]
    AlertDispatch(String),

    /// Logger already closed
    #[error("Logger already closed")]
    AlreadyClosed,

    /// Process-wide logger installed twice
    #[error("Process-wide logger already initialized")]
    AlreadyInitialized,

    /// Process-wide logger read before installation
    #[error("Process-wide logger not initialized")]
    NotInitialized,

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
}

impl LoggerError {
    /// Create an invalid level error from any displayable input
    pub fn invalid_level(value: impl ToString) -> Self {
        LoggerError::InvalidLevel {
            value: value.to_string(),
        }
    }

    /// Create an invalid encode error
    pub fn invalid_encode(name: impl Into<String>) -> Self {
        LoggerError::InvalidEncode { name: name.into() }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a missing environment error
    pub fn missing_env(key: impl Into<String>) -> Self {
        LoggerError::MissingEnvironment { key: key.into() }
    }

    /// Create an alert dispatch error
    pub fn alert<S: Into<String>>(msg: S) -> Self {
        LoggerError::AlertDispatch(msg.into())
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
}
