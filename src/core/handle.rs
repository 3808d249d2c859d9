//! Shared backend handle
//!
//! Holds at most one active backend. The first [`LoggerHandle::acquire`]
//! installs a backend (injected or built from configuration); later calls
//! return the same one until [`LoggerHandle::reset`] clears it.

use super::{
    backend::LogBackend,
    config::LoggerConfig,
    error::Result,
    logger::LoggerBuilder,
};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// The installed backend together with its identity.
#[derive(Clone)]
pub struct ActiveLogger {
    id: u64,
    created_at: DateTime<Utc>,
    backend: Arc<dyn LogBackend>,
}

impl ActiveLogger {
    /// Identifier unique among all backends installed by one handle.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn backend(&self) -> &Arc<dyn LogBackend> {
        &self.backend
    }

    /// Whether two handles refer to the same installation.
    pub fn same_as(&self, other: &ActiveLogger) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.backend, &other.backend)
    }
}

impl fmt::Debug for ActiveLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveLogger")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Owner of the active backend.
///
/// # Example
///
/// ```
/// use rust_log_facade::{LoggerConfig, LoggerHandle};
///
/// let handle = LoggerHandle::new(LoggerConfig::default().with_console(false).with_file(false));
///
/// let first = handle.acquire(None).unwrap();
/// let again = handle.acquire(None).unwrap();
/// assert_eq!(first.id(), again.id());
///
/// assert!(handle.reset().is_none());
/// let rebuilt = handle.acquire(None).unwrap();
/// assert_ne!(first.id(), rebuilt.id());
/// ```
pub struct LoggerHandle {
    config: RwLock<LoggerConfig>,
    active: Mutex<Option<ActiveLogger>>,
    next_id: AtomicU64,
}

impl LoggerHandle {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            config: RwLock::new(config),
            active: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// Return the active backend, installing one first if there is none.
    ///
    /// `custom` is used only when nothing is installed yet.
    ///
    /// # Errors
    ///
    /// Propagates failures from building the configured backend
    pub fn acquire(&self, custom: Option<Arc<dyn LogBackend>>) -> Result<ActiveLogger> {
        let mut active = self.active.lock();
        if let Some(existing) = active.as_ref() {
            return Ok(existing.clone());
        }

        let backend = match custom {
            Some(backend) => backend,
            None => {
                let config = self.config.read();
                Arc::new(LoggerBuilder::from_config(&config)?.build()) as Arc<dyn LogBackend>
            }
        };

        let installed = ActiveLogger {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            created_at: Utc::now(),
            backend,
        };
        tracing::debug!(
            id = installed.id,
            backend = installed.backend.name(),
            "installed log backend"
        );

        *active = Some(installed.clone());
        Ok(installed)
    }

    /// The active backend, if any, without installing one.
    pub fn current(&self) -> Option<ActiveLogger> {
        self.active.lock().clone()
    }

    /// Clear the active backend. Always returns `None`.
    pub fn reset(&self) -> Option<ActiveLogger> {
        // the lock is released before flushing so a backend may log while it flushes
        let previous = self.active.lock().take();
        if let Some(previous) = previous {
            if let Err(e) = previous.backend.flush() {
                tracing::warn!(id = previous.id, error = %e, "flush failed while resetting backend");
            }
            tracing::debug!(id = previous.id, "reset log backend");
        }
        None
    }

    /// Replace the configuration and clear the active backend so the next
    /// `acquire` builds from the new settings.
    pub fn reconfigure(&self, config: LoggerConfig) {
        *self.config.write() = config;
        self.reset();
    }

    pub fn config(&self) -> LoggerConfig {
        self.config.read().clone()
    }
}

impl Default for LoggerHandle {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, LogRecord, LoggerError};

    struct Null;

    impl LogBackend for Null {
        fn level(&self) -> LogLevel {
            LogLevel::Audit
        }
        fn write(&self, _record: &LogRecord) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "null"
        }
    }

    fn quiet_config() -> LoggerConfig {
        LoggerConfig::default().with_console(false).with_file(false)
    }

    #[test]
    fn test_acquire_is_idempotent() {
        let handle = LoggerHandle::new(quiet_config());
        let a = handle.acquire(None).unwrap();
        let b = handle.acquire(None).unwrap();
        assert!(a.same_as(&b));
    }

    #[test]
    fn test_reset_yields_fresh_identity() {
        let handle = LoggerHandle::new(quiet_config());
        let before = handle.acquire(None).unwrap();

        assert!(handle.reset().is_none());
        assert!(handle.current().is_none());

        let after = handle.acquire(None).unwrap();
        assert_ne!(before.id(), after.id());
        assert!(!before.same_as(&after));
    }

    #[test]
    fn test_custom_backend_installed_when_empty() {
        let handle = LoggerHandle::new(quiet_config());
        let custom: Arc<dyn LogBackend> = Arc::new(Null);

        let active = handle.acquire(Some(Arc::clone(&custom))).unwrap();
        assert!(Arc::ptr_eq(active.backend(), &custom));
        assert_eq!(active.backend().name(), "null");
    }

    #[test]
    fn test_custom_backend_ignored_when_installed() {
        let handle = LoggerHandle::new(quiet_config());
        let first = handle.acquire(None).unwrap();

        let second = handle.acquire(Some(Arc::new(Null))).unwrap();
        assert!(first.same_as(&second));
        assert_eq!(second.backend().name(), "logger");
    }

    #[test]
    fn test_construction_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let handle = LoggerHandle::new(
            quiet_config()
                .with_file(true)
                .with_file_path(blocker.join("app-%DATE%.log")),
        );

        let err = handle.acquire(None).unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(handle.current().is_none());
    }

    /// Flush calls back into the handle, as a backend logging its own
    /// shutdown would.
    struct Reentrant {
        handle: Arc<LoggerHandle>,
        saw_empty: std::sync::atomic::AtomicBool,
    }

    impl LogBackend for Reentrant {
        fn level(&self) -> LogLevel {
            LogLevel::Audit
        }
        fn write(&self, _record: &LogRecord) -> Result<()> {
            Ok(())
        }
        fn flush(&self) -> Result<()> {
            let empty = self.handle.current().is_none();
            self.saw_empty.store(empty, Ordering::SeqCst);
            Ok(())
        }
        fn name(&self) -> &str {
            "reentrant"
        }
    }

    #[test]
    fn test_reset_flushes_outside_the_lock() {
        let handle = Arc::new(LoggerHandle::new(quiet_config()));
        let backend = Arc::new(Reentrant {
            handle: Arc::clone(&handle),
            saw_empty: std::sync::atomic::AtomicBool::new(false),
        });
        handle.acquire(Some(backend.clone())).unwrap();

        let (done_tx, done_rx) = std::sync::mpsc::channel();
        let resetter = Arc::clone(&handle);
        std::thread::spawn(move || {
            resetter.reset();
            let _ = done_tx.send(());
        });

        assert!(
            done_rx.recv_timeout(std::time::Duration::from_secs(5)).is_ok(),
            "reset blocked while flushing"
        );
        assert!(backend.saw_empty.load(Ordering::SeqCst));
    }

    #[test]
    fn test_reconfigure_rebuilds_with_new_level() {
        let handle = LoggerHandle::new(quiet_config());
        let before = handle.acquire(None).unwrap();
        assert_eq!(before.backend().level(), LogLevel::Audit);

        handle.reconfigure(quiet_config().with_level(LogLevel::Warn));
        let after = handle.acquire(None).unwrap();

        assert_eq!(after.backend().level(), LogLevel::Warn);
        assert_ne!(before.id(), after.id());
    }
}
