//! Logger metrics for observability
//!
//! Counters for logger health: entries written, entries dropped, and the
//! fate of incident reports handed to the alert bridge. Alert failures never
//! reach the emitting call site, so these counters are where they surface.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use profile_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_alert_failed();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.alerts_failed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries that reached the sink
    total_logged: AtomicU64,

    /// Entries lost to sink errors or emitted after close
    dropped_count: AtomicU64,

    /// Incident reports accepted by the notifier
    alerts_dispatched: AtomicU64,

    /// Incident reports the notifier rejected
    alerts_failed: AtomicU64,

    /// Incident reports discarded because the dispatch queue was full
    alerts_dropped: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
            alerts_dispatched: AtomicU64::new(0),
            alerts_failed: AtomicU64::new(0),
            alerts_dropped: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn alerts_dispatched(&self) -> u64 {
        self.alerts_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn alerts_failed(&self) -> u64 {
        self.alerts_failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn alerts_dropped(&self) -> u64 {
        self.alerts_dropped.load(Ordering::Relaxed)
    }

    /// Record a successfully written entry, returning the previous count
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a dropped entry, returning the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_alert_dispatched(&self) -> u64 {
        self.alerts_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_alert_failed(&self) -> u64 {
        self.alerts_failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_alert_dropped(&self) -> u64 {
        self.alerts_dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no entries have been processed.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.total_logged() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_logged: AtomicU64::new(self.total_logged()),
            dropped_count: AtomicU64::new(self.dropped_count()),
            alerts_dispatched: AtomicU64::new(self.alerts_dispatched()),
            alerts_failed: AtomicU64::new(self.alerts_failed()),
            alerts_dropped: AtomicU64::new(self.alerts_dropped()),
        }
    }
}

/// First occurrence and every thousandth after it
#[inline]
pub(crate) fn should_report(previous_count: u64) -> bool {
    previous_count == 0 || (previous_count + 1) % 1000 == 0
}
