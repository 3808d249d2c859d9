//! Error types for the logging facade
//!
//! Only backend construction and transport I/O can fail. Configuration
//! resolution falls back to defaults instead of erroring.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A filesystem step failed (creating the log directory, compressing a
    /// closed day file, ...)
    #[error("I/O failure during {operation} on '{path}'")]
    IoOperation {
        operation: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid {component} configuration: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Opening or writing the active day file failed
    #[error("Cannot write log file '{path}': {message}")]
    FileAppender { path: String, message: String },

    #[error("Cannot roll log file to '{path}': {message}")]
    FileRotation { path: String, message: String },

    #[error("Writer unavailable: {0}")]
    Writer(String),

    /// The async worker has exited and no longer accepts records
    #[error("Async log worker is no longer running")]
    WorkerGone,

    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    pub fn io_operation(
        operation: impl Into<String>,
        path: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppender {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotation {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::Writer(msg.into())
    }

    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether the failure came from the filesystem.
    pub fn is_io(&self) -> bool {
        matches!(self, LoggerError::IoOperation { .. } | LoggerError::Io(_))
    }
}
