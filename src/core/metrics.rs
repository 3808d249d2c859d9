//! Backend counters
//!
//! Tracks how many records the default backend wrote, filtered out,
//! lost to a full async queue, or failed to hand to an appender.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use rust_log_facade::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_failed();
///
/// assert_eq!(metrics.total_written(), 1);
/// assert_eq!(metrics.failed_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records every appender accepted
    total_written: AtomicU64,

    /// Records at least one appender rejected or panicked on
    failed_count: AtomicU64,

    /// Records discarded because the async queue was full
    dropped_count: AtomicU64,

    /// Records below the backend threshold
    filtered_count: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            total_written: AtomicU64::new(0),
            failed_count: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_written(&self) -> u64 {
        self.total_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    /// Returns the previous value.
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.total_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of records that never reached every appender, as a
    /// percentage. Filtered records are not counted.
    pub fn loss_rate(&self) -> f64 {
        let lost = (self.failed_count() + self.dropped_count()) as f64;
        let total = self.total_written() as f64 + lost;
        if total == 0.0 {
            0.0
        } else {
            (lost / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.total_written.store(0, Ordering::Relaxed);
        self.failed_count.store(0, Ordering::Relaxed);
        self.dropped_count.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            total_written: AtomicU64::new(self.total_written()),
            failed_count: AtomicU64::new(self.failed_count()),
            dropped_count: AtomicU64::new(self.dropped_count()),
            filtered_count: AtomicU64::new(self.filtered_count()),
        }
    }
}
