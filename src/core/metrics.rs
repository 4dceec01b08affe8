//! Logger metrics for observability
//!
//! Sink failures are silent by design, so these counters are the only
//! place they show up.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-logger dispatch counters
///
/// # Example
///
/// ```
/// use pattern_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dropped();
/// metrics.record_logged();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.total_logged(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Appender writes that failed or panicked
    dropped_count: AtomicU64,

    /// Events dispatched to the appender list
    total_logged: AtomicU64,

    /// Events that reached `log` below the logger threshold
    suppressed_count: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            dropped_count: AtomicU64::new(0),
            total_logged: AtomicU64::new(0),
            suppressed_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed appender writes per dispatched event, as a percentage
    ///
    /// Returns 0.0 if nothing has been dispatched.
    pub fn drop_rate(&self) -> f64 {
        let logged = self.total_logged();
        if logged == 0 {
            return 0.0;
        }
        (self.dropped_count() as f64 / logged as f64) * 100.0
    }

    pub fn reset(&self) {
        self.dropped_count.store(0, Ordering::Relaxed);
        self.total_logged.store(0, Ordering::Relaxed);
        self.suppressed_count.store(0, Ordering::Relaxed);
    }
}
