//! Level-gated emitters
//!
//! Every emitter normalizes its inputs, stamps the record with its own
//! severity, forwards it to the backend when gating allows, and returns
//! the record either way. Callers can therefore use emitters as pure
//! transformers when no backend is configured or logging is disabled.

use super::{
    backend::LogBackend,
    config::LoggerConfig,
    error::Result,
    handle::{ActiveLogger, LoggerHandle},
    log_input::LogInput,
    log_level::LogLevel,
    log_record::LogRecord,
    normalizer::Normalizer,
    stream::LogStream,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Entry point owned by the application's composition root.
///
/// # Example
///
/// ```
/// use rust_log_facade::{LogFacade, LogInput, LogLevel, LoggerConfig};
/// use serde_json::json;
///
/// let config = LoggerConfig::default().with_console(false).with_file(false);
/// let log = LogFacade::new(config);
///
/// let record = log.warn([
///     LogInput::from("payment retry"),
///     LogInput::from(json!({ "attempt": 2, "token": "tok_123" })),
/// ]);
///
/// assert_eq!(record.level, LogLevel::Warn);
/// assert_eq!(record.get("attempt"), Some(&json!(2)));
/// assert!(record.get("token").is_none());
/// ```
pub struct LogFacade {
    enabled: AtomicBool,
    normalizer: RwLock<Normalizer>,
    handle: LoggerHandle,
}

impl LogFacade {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            enabled: AtomicBool::new(config.enabled),
            normalizer: RwLock::new(Normalizer::new(config.ignored_fields.clone())),
            handle: LoggerHandle::new(config),
        }
    }

    /// Facade configured from `LOG_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(LoggerConfig::from_env())
    }

    /// Facade with `backend` installed up front.
    pub fn with_backend(config: LoggerConfig, backend: Arc<dyn LogBackend>) -> Self {
        let facade = Self::new(config);
        // infallible: nothing is built when a backend is supplied
        let _ = facade.handle.acquire(Some(backend));
        facade
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether a record at `level` would reach the backend right now.
    pub fn can_emit(&self, level: LogLevel) -> bool {
        self.is_logging_enabled()
            && self
                .handle
                .acquire(None)
                .map(|active| active.backend().is_enabled(level))
                .unwrap_or(false)
    }

    /// See [`LoggerHandle::acquire`].
    pub fn acquire_logger(&self, custom: Option<Arc<dyn LogBackend>>) -> Result<ActiveLogger> {
        self.handle.acquire(custom)
    }

    /// See [`LoggerHandle::reset`].
    pub fn reset_logger(&self) -> Option<ActiveLogger> {
        self.handle.reset()
    }

    pub fn handle(&self) -> &LoggerHandle {
        &self.handle
    }

    /// Apply new settings. The backend is rebuilt on next use.
    pub fn reconfigure(&self, config: LoggerConfig) {
        self.enabled.store(config.enabled, Ordering::Relaxed);
        *self.normalizer.write() = Normalizer::new(config.ignored_fields.clone());
        self.handle.reconfigure(config);
    }

    pub fn normalize<I>(&self, inputs: I) -> LogRecord
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        self.normalizer.read().normalize(inputs)
    }

    /// Emit at `level`, surfacing backend construction and write errors.
    ///
    /// # Errors
    ///
    /// Returns the error from building the backend or from its `write`
    pub fn try_log<I>(&self, level: LogLevel, inputs: I) -> Result<LogRecord>
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        let active = self.handle.acquire(None)?;

        let mut record = self.normalize(inputs);
        record.level = level;

        if self.is_logging_enabled() && active.backend().is_enabled(level) {
            active.backend().write(&record)?;
        }
        Ok(record)
    }

    /// Emit at `level`. Backend failures are reported through `tracing`
    /// and never change the returned record.
    pub fn log<I>(&self, level: LogLevel, inputs: I) -> LogRecord
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        let mut record = self.normalize(inputs);
        record.level = level;

        let active = match self.handle.acquire(None) {
            Ok(active) => active,
            Err(e) => {
                tracing::warn!(error = %e, "log backend unavailable");
                return record;
            }
        };

        if self.is_logging_enabled() && active.backend().is_enabled(level) {
            if let Err(e) = active.backend().write(&record) {
                tracing::warn!(backend = active.backend().name(), error = %e, "log write failed");
            }
        }
        record
    }

    pub fn error<I>(&self, inputs: I) -> LogRecord
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        self.log(LogLevel::Error, inputs)
    }

    pub fn warn<I>(&self, inputs: I) -> LogRecord
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        self.log(LogLevel::Warn, inputs)
    }

    pub fn info<I>(&self, inputs: I) -> LogRecord
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        self.log(LogLevel::Info, inputs)
    }

    pub fn http<I>(&self, inputs: I) -> LogRecord
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        self.log(LogLevel::Http, inputs)
    }

    pub fn verbose<I>(&self, inputs: I) -> LogRecord
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        self.log(LogLevel::Verbose, inputs)
    }

    pub fn debug<I>(&self, inputs: I) -> LogRecord
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        self.log(LogLevel::Debug, inputs)
    }

    pub fn silly<I>(&self, inputs: I) -> LogRecord
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        self.log(LogLevel::Silly, inputs)
    }

    pub fn event<I>(&self, inputs: I) -> LogRecord
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        self.log(LogLevel::Event, inputs)
    }

    pub fn audit<I>(&self, inputs: I) -> LogRecord
    where
        I: IntoIterator,
        I::Item: Into<LogInput>,
    {
        self.log(LogLevel::Audit, inputs)
    }

    /// Line writer that logs each line at `info`.
    pub fn stream(&self) -> LogStream<'_> {
        LogStream::new(self)
    }

    /// Flush the active backend, if one is installed.
    pub fn flush(&self) -> Result<()> {
        match self.handle.current() {
            Some(active) => active.backend().flush(),
            None => Ok(()),
        }
    }
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}
