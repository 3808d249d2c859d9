//! # Rust Log Facade
//!
//! Application logging facade with structured records, severity gating and
//! field redaction, backed by console and daily-rotated file output.
//!
//! ## Features
//!
//! - **Mixed inputs**: Text, JSON fields and errors fold into one record
//! - **Nine severities**: The standard ladder plus `event` and `audit`
//! - **Redaction**: Sensitive top-level fields are dropped before output
//! - **Daily files**: Date-stamped files with retention and optional gzip
//! - **Env configuration**: Every setting has a `LOG_*` variable
//!
//! ## Quick start
//!
//! ```
//! use rust_log_facade::prelude::*;
//! use serde_json::json;
//!
//! let log = LogFacade::new(LoggerConfig::default().with_console(false).with_file(false));
//!
//! let record = log.info([
//!     LogInput::from("user signed in"),
//!     LogInput::from(json!({ "user_id": 42, "password": "hunter2" })),
//! ]);
//!
//! assert_eq!(record.level, LogLevel::Info);
//! assert!(record.get("password").is_none());
//! ```
//!
//! ## Custom pipelines
//!
//! ```
//! use rust_log_facade::prelude::*;
//! use std::sync::Arc;
//!
//! let logger = Logger::builder()
//!     .min_level(LogLevel::Warn)
//!     .appender(ConsoleAppender::with_colors(false))
//!     .build();
//!
//! let log = LogFacade::with_backend(LoggerConfig::default(), Arc::new(logger));
//! assert!(log.can_emit(LogLevel::Error));
//! assert!(!log.can_emit(LogLevel::Info));
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    #[cfg(feature = "file")]
    pub use crate::appenders::DailyFileAppender;
    pub use crate::core::{
        Appender, ErrorInfo, LogBackend, LogFacade, LogInput, LogLevel, LogRecord, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Result,
        TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

#[cfg(feature = "console")]
pub use appenders::{ColorMap, ConsoleAppender};
#[cfg(feature = "file")]
pub use appenders::DailyFileAppender;
pub use core::{
    ActiveLogger, Appender, ErrorInfo, IgnoredFields, LogBackend, LogFacade, LogInput, LogLevel,
    LogRecord, LogStream, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerHandle,
    LoggerMetrics, Normalizer, OutputFormat, Result, TimestampFormat, DEFAULT_IGNORED_FIELDS,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
