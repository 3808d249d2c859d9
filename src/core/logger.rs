//! Default multi-appender backend

use super::{
    backend::{Appender, LogBackend},
    config::LoggerConfig,
    error::{LoggerError, Result},
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
};
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::RwLock;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default shutdown timeout for draining the async worker (5 seconds)
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

type AppenderList = Arc<RwLock<Vec<Box<dyn Appender>>>>;

/// Backend that fans records out to a list of appenders.
///
/// Synchronous by default. In async mode records go through a bounded
/// queue to a worker thread; when the queue is full the record is
/// dropped and counted.
pub struct Logger {
    min_level: Arc<RwLock<LogLevel>>,
    appenders: AppenderList,
    sender: Option<Sender<LogRecord>>,
    async_handle: Option<thread::JoinHandle<()>>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: Arc::new(RwLock::new(LogLevel::Audit)),
            appenders: Arc::new(RwLock::new(Vec::new())),
            sender: None,
            async_handle: None,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    #[must_use]
    pub fn with_async(buffer_size: usize) -> Self {
        let (sender, receiver) = bounded::<LogRecord>(buffer_size.max(1));
        let appenders: AppenderList = Arc::new(RwLock::new(Vec::new()));
        let appenders_clone = Arc::clone(&appenders);
        let metrics = Arc::new(LoggerMetrics::new());
        let metrics_clone = Arc::clone(&metrics);

        let handle = thread::spawn(move || {
            const BATCH_SIZE: usize = 50;
            let mut batch = Vec::with_capacity(BATCH_SIZE);

            // recv() fails only once every sender is gone
            while let Ok(record) = receiver.recv() {
                batch.push(record);
                while batch.len() < BATCH_SIZE {
                    match receiver.try_recv() {
                        Ok(record) => batch.push(record),
                        Err(_) => break,
                    }
                }

                let mut appenders = appenders_clone.write();
                for record in &batch {
                    Self::dispatch(&mut appenders, record, &metrics_clone);
                }
                Self::flush_isolated(&mut appenders);
                batch.clear();
            }
        });

        Self {
            min_level: Arc::new(RwLock::new(LogLevel::Audit)),
            appenders,
            sender: Some(sender),
            async_handle: Some(handle),
            metrics,
        }
    }

    /// Write `record` to every appender, isolating failures and panics.
    ///
    /// Returns `true` when every appender accepted the record.
    fn dispatch(
        appenders: &mut [Box<dyn Appender>],
        record: &LogRecord,
        metrics: &LoggerMetrics,
    ) -> bool {
        let mut all_ok = true;

        for appender in appenders.iter_mut() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(record)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(appender = appender.name(), error = %e, "appender failed");
                    all_ok = false;
                }
                Err(panic_info) => {
                    tracing::error!(
                        appender = appender.name(),
                        panic = %panic_message(&*panic_info),
                        "appender panicked; other appenders continue"
                    );
                    all_ok = false;
                }
            }
        }

        if all_ok {
            metrics.record_written();
        } else {
            metrics.record_failed();
        }
        all_ok
    }

    fn flush_isolated(appenders: &mut [Box<dyn Appender>]) {
        for appender in appenders.iter_mut() {
            let flush_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.flush()
            }));
            match flush_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(appender = appender.name(), error = %e, "appender flush failed");
                }
                Err(panic_info) => {
                    tracing::error!(
                        appender = appender.name(),
                        panic = %panic_message(&*panic_info),
                        "appender panicked during flush"
                    );
                }
            }
        }
    }

    pub fn add_appender(&mut self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    pub fn appender_names(&self) -> Vec<String> {
        self.appenders
            .read()
            .iter()
            .map(|a| a.name().to_string())
            .collect()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn is_async(&self) -> bool {
        self.sender.is_some()
    }

    /// Forward a record unless it is below the threshold.
    pub fn log(&self, record: LogRecord) {
        if !self.min_level().permits(record.level) {
            self.metrics.record_filtered();
            return;
        }

        match self.sender {
            Some(ref sender) => match sender.try_send(record) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => self.drop_with_alert(),
                Err(TrySendError::Disconnected(_)) => {}
            },
            None => {
                let mut appenders = self.appenders.write();
                Self::dispatch(&mut appenders, &record, &self.metrics);
            }
        }
    }

    fn drop_with_alert(&self) {
        let dropped = self.metrics.record_dropped() + 1;
        if dropped == 1 || dropped % 1000 == 0 {
            tracing::warn!(
                dropped,
                "log queue full; consider a larger buffer"
            );
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    /// Drain the async worker and flush. Returns `false` if the worker did
    /// not finish within `timeout` or the final flush failed.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        drop(self.sender.take());

        if let Some(handle) = self.async_handle.take() {
            let start = std::time::Instant::now();
            while !handle.is_finished() {
                if start.elapsed() >= timeout {
                    tracing::warn!(?timeout, "async log worker did not finish; records may be lost");
                    return false;
                }
                thread::sleep(Duration::from_millis(10));
            }
            if handle.join().is_err() {
                tracing::error!("async log worker panicked during shutdown");
                return false;
            }
        }

        match self.flush() {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "failed to flush during shutdown");
                false
            }
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_log_facade::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Info)
    ///     .appender(ConsoleAppender::new())
    ///     .build();
    /// assert_eq!(logger.min_level(), LogLevel::Info);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBackend for Logger {
    fn level(&self) -> LogLevel {
        self.min_level()
    }

    fn write(&self, record: &LogRecord) -> Result<()> {
        if self.sender.is_some() && self.async_handle.as_ref().is_some_and(|h| h.is_finished()) {
            return Err(LoggerError::WorkerGone);
        }
        self.log(record.clone());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Logger::flush(self)
    }

    fn name(&self) -> &str {
        "logger"
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.sender.is_some() || self.async_handle.is_some() {
            self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
        } else if let Err(e) = self.flush() {
            tracing::error!(error = %e, "failed to flush during shutdown");
        }

        let lost = self.metrics.failed_count() + self.metrics.dropped_count();
        if lost > 0 {
            tracing::warn!(
                lost,
                loss_rate = self.metrics.loss_rate(),
                "logger shutting down with lost records"
            );
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
    async_buffer: Option<usize>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Audit,
            appenders: Vec::new(),
            async_buffer: None,
        }
    }

    /// Builder preloaded from configuration: threshold plus the console
    /// and daily-file transports the configuration enables.
    ///
    /// # Errors
    ///
    /// Returns error if the file transport cannot open its file
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let mut builder = Self::new().min_level(config.level);

        #[cfg(feature = "console")]
        if config.use_console {
            builder = builder.appender(
                crate::appenders::ConsoleAppender::with_colors(config.colors)
                    .with_output_format(config.format),
            );
        }

        #[cfg(feature = "file")]
        if config.use_file {
            builder = builder.appender(
                crate::appenders::DailyFileAppender::new(&config.file_path)?
                    .with_max_files(config.max_files)
                    .with_compression(config.compress),
            );
        }

        Ok(builder)
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Enable async mode with specified buffer size
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_size: usize) -> Self {
        self.async_buffer = Some(buffer_size);
        self
    }

    pub fn build(self) -> Logger {
        let mut logger = match self.async_buffer {
            Some(size) => Logger::with_async(size),
            None => Logger::new(),
        };

        logger.set_min_level(self.min_level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Clone, Default)]
    struct Capture {
        records: Arc<Mutex<Vec<LogRecord>>>,
    }

    impl Appender for Capture {
        fn append(&mut self, record: &LogRecord) -> Result<()> {
            self.records.lock().push(record.clone());
            Ok(())
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "capture"
        }
    }

    struct Failing;

    impl Appender for Failing {
        fn append(&mut self, _record: &LogRecord) -> Result<()> {
            Err(LoggerError::other("simulated failure"))
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Panicking;

    impl Appender for Panicking {
        fn append(&mut self, _record: &LogRecord) -> Result<()> {
            panic!("appender exploded");
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_threshold_filters() {
        let capture = Capture::default();
        let logger = Logger::builder()
            .min_level(LogLevel::Info)
            .appender(capture.clone())
            .build();

        logger.log(LogRecord::new(LogLevel::Warn));
        logger.log(LogRecord::new(LogLevel::Debug));
        logger.log(LogRecord::new(LogLevel::Audit));

        let levels: Vec<LogLevel> = capture.records.lock().iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![LogLevel::Warn]);
        assert_eq!(logger.metrics().filtered_count(), 2);
        assert_eq!(logger.metrics().total_written(), 1);
    }

    #[test]
    fn test_backend_is_enabled() {
        let logger = Logger::builder().min_level(LogLevel::Verbose).build();
        assert!(logger.is_enabled(LogLevel::Http));
        assert!(logger.is_enabled(LogLevel::Verbose));
        assert!(!logger.is_enabled(LogLevel::Debug));
    }

    #[test]
    fn test_failing_appender_is_isolated() {
        let capture = Capture::default();
        let logger = Logger::builder()
            .appender(Failing)
            .appender(Panicking)
            .appender(capture.clone())
            .build();

        logger.log(LogRecord::new(LogLevel::Error).with_message("still delivered"));

        assert_eq!(capture.records.lock().len(), 1);
        assert_eq!(logger.metrics().failed_count(), 1);
        assert_eq!(logger.metrics().total_written(), 0);
    }

    #[test]
    fn test_async_drains_on_shutdown() {
        let capture = Capture::default();
        let mut logger = Logger::builder()
            .async_mode(100)
            .appender(capture.clone())
            .build();
        assert!(logger.is_async());

        for i in 0..20 {
            logger
                .write(&LogRecord::new(LogLevel::Info).with_message(format!("record {}", i)))
                .unwrap();
        }

        assert!(logger.shutdown(Duration::from_secs(5)));
        assert_eq!(capture.records.lock().len(), 20);
    }

    #[test]
    fn test_from_config_without_transports() {
        let config = LoggerConfig::default()
            .with_console(false)
            .with_file(false)
            .with_level(LogLevel::Warn);
        let logger = LoggerBuilder::from_config(&config).unwrap().build();

        assert!(logger.appender_names().is_empty());
        assert_eq!(logger.level(), LogLevel::Warn);
    }

    #[test]
    fn test_from_config_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggerConfig::default()
            .with_console(false)
            .with_file_path(dir.path().join("svc-%DATE%.log"));
        let logger = LoggerBuilder::from_config(&config).unwrap().build();

        assert_eq!(logger.appender_names(), vec!["daily-file".to_string()]);
    }
}
