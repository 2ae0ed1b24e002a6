//! Sink counters for observability
//!
//! [`SeverityCounters`] holds the per-severity tallies every sink reports
//! through `count_of`; [`FlushMetrics`] tracks what a buffered file sink did
//! with the entries it drained.

use super::severity::Severity;
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-severity event counts
///
/// Counters only grow; they are read without blocking writers.
///
/// # Example
///
/// ```
/// use rust_sink_logger::{Severity, SeverityCounters};
///
/// let counters = SeverityCounters::new();
/// counters.record(Severity::Warn);
/// counters.record(Severity::Warn);
///
/// assert_eq!(counters.get(Severity::Warn), 2);
/// assert_eq!(counters.get(Severity::Error), 0);
/// assert_eq!(counters.total(), 2);
/// ```
#[derive(Debug)]
pub struct SeverityCounters {
    info: AtomicU64,
    warn: AtomicU64,
    error: AtomicU64,
}

impl SeverityCounters {
    /// Create a new counter set with all counters at zero
    pub const fn new() -> Self {
        Self {
            info: AtomicU64::new(0),
            warn: AtomicU64::new(0),
            error: AtomicU64::new(0),
        }
    }

    #[inline]
    fn counter(&self, severity: Severity) -> &AtomicU64 {
        match severity {
            Severity::Info => &self.info,
            Severity::Warn => &self.warn,
            Severity::Error => &self.error,
        }
    }

    /// Record one accepted event, returning the previous count
    #[inline]
    pub fn record(&self, severity: Severity) -> u64 {
        self.counter(severity).fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn get(&self, severity: Severity) -> u64 {
        self.counter(severity).load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        Severity::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

impl Default for SeverityCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SeverityCounters {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            info: AtomicU64::new(self.get(Severity::Info)),
            warn: AtomicU64::new(self.get(Severity::Warn)),
            error: AtomicU64::new(self.get(Severity::Error)),
        }
    }
}

/// Outcome tallies of a buffered file sink
#[derive(Debug)]
pub struct FlushMetrics {
    /// Flushes that drained at least one entry
    flushes: AtomicU64,

    /// Entries appended to a log file
    entries_written: AtomicU64,

    /// Entries drained while no destination was available
    entries_discarded: AtomicU64,

    /// Entries lost to a failed append
    entries_failed: AtomicU64,
}

impl FlushMetrics {
    pub const fn new() -> Self {
        Self {
            flushes: AtomicU64::new(0),
            entries_written: AtomicU64::new(0),
            entries_discarded: AtomicU64::new(0),
            entries_failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_written(&self) -> u64 {
        self.entries_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_discarded(&self) -> u64 {
        self.entries_discarded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_failed(&self) -> u64 {
        self.entries_failed.load(Ordering::Relaxed)
    }

    pub(crate) fn record_written(&self, count: usize) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        self.entries_written.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_discarded(&self, count: usize) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        self.entries_discarded.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_failed(&self, count: usize) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        self.entries_failed.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Share of drained entries that never reached a file (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been drained.
    pub fn loss_rate(&self) -> f64 {
        let lost = (self.entries_discarded() + self.entries_failed()) as f64;
        let total = self.entries_written() as f64 + lost;
        if total == 0.0 {
            0.0
        } else {
            (lost / total) * 100.0
        }
    }
}

impl Default for FlushMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for FlushMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            flushes: AtomicU64::new(self.flushes()),
            entries_written: AtomicU64::new(self.entries_written()),
            entries_discarded: AtomicU64::new(self.entries_discarded()),
            entries_failed: AtomicU64::new(self.entries_failed()),
        }
    }
}
