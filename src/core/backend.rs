//! Seams between the facade and whatever writes records
//!
//! [`LogBackend`] is what the facade talks to; [`Appender`] is a single
//! transport inside the default backend.

use super::{error::Result, log_level::LogLevel, log_record::LogRecord};

/// A log sink the facade forwards gated records to.
///
/// Implementations must be shareable across threads; the facade holds
/// the active backend behind an `Arc`.
pub trait LogBackend: Send + Sync {
    /// Threshold configured on this backend.
    fn level(&self) -> LogLevel;

    /// Whether this backend has a write path for `level` at all.
    fn supports(&self, _level: LogLevel) -> bool {
        true
    }

    /// Whether a record at `level` would be written right now.
    fn is_enabled(&self, level: LogLevel) -> bool {
        self.supports(level) && self.level().permits(level)
    }

    fn write(&self, record: &LogRecord) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// A single output destination (console, file, ...).
pub trait Appender: Send + Sync {
    fn append(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
