//! Core logger types and traits

pub mod backend;
pub mod config;
pub mod error;
pub mod facade;
pub mod handle;
pub mod log_input;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod normalizer;
pub mod output_format;
pub mod stream;
pub mod timestamp;

pub use backend::{Appender, LogBackend};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use facade::LogFacade;
pub use handle::{ActiveLogger, LoggerHandle};
pub use log_input::{ErrorInfo, LogInput};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use normalizer::{IgnoredFields, Normalizer, DEFAULT_IGNORED_FIELDS};
pub use output_format::OutputFormat;
pub use stream::LogStream;
pub use timestamp::TimestampFormat;
