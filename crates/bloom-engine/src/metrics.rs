//! Metrics hooks for filter evaluation
//!
//! The evaluation service reports filter creations, inserts and lookups
//! through a [`MetricsRecorder`]. Lookups are recorded in batches so that
//! timing does not dominate the measured work.
//!
//! ## Usage
//!
//! ```ignore
//! use bloom_engine::metrics::Metrics;
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(Metrics::new());
//! let service = EvaluationService::with_metrics(metrics.clone());
//! service.run(&config, &source, &|| {})?;
//! println!("{:?}", metrics.snapshot());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for filter operations
///
/// Thread-safe counters shared by all evaluation trials.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total filters created
    pub filters_created: AtomicU64,
    /// Total bytes allocated for bit arrays
    pub bytes_allocated: AtomicU64,
    /// Total elements inserted across all filters
    pub elements_inserted: AtomicU64,
    /// Total lookups performed
    pub lookups_performed: AtomicU64,
    /// Total positive lookups (true and false positives)
    pub lookups_positive: AtomicU64,
    /// Cumulative insert time in nanoseconds
    pub insert_time_ns: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record filter creation
    ///
    /// # Arguments
    /// * `size_bits` - Filter size in bits
    pub fn record_filter_created(&self, size_bits: usize) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated
            .fetch_add(size_bits.div_ceil(8) as u64, Ordering::Relaxed);
    }

    /// Record a batch of inserts
    pub fn record_inserts(&self, count: usize, duration: Duration) {
        self.elements_inserted.fetch_add(count as u64, Ordering::Relaxed);
        self.insert_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a batch of lookups, `positive` of which returned true
    pub fn record_lookups(&self, count: usize, positive: usize, duration: Duration) {
        self.lookups_performed.fetch_add(count as u64, Ordering::Relaxed);
        self.lookups_positive.fetch_add(positive as u64, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            bytes_allocated: self.bytes_allocated.load(Ordering::Relaxed),
            elements_inserted: self.elements_inserted.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            avg_insert_ns: average(&self.insert_time_ns, &self.elements_inserted),
            avg_lookup_ns: average(&self.lookup_time_ns, &self.lookups_performed),
        }
    }

    /// Ratio of positive lookups to total lookups
    ///
    /// Includes true positives, so this is not the false positive rate.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.filters_created,
            &self.bytes_allocated,
            &self.elements_inserted,
            &self.lookups_performed,
            &self.lookups_positive,
            &self.insert_time_ns,
            &self.lookup_time_ns,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

fn average(total: &AtomicU64, count: &AtomicU64) -> u64 {
    let count = count.load(Ordering::Relaxed);
    if count > 0 {
        total.load(Ordering::Relaxed) / count
    } else {
        0
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub bytes_allocated: u64,
    pub elements_inserted: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub avg_insert_ns: u64,
    pub avg_lookup_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to forward evaluation metrics to an external system.
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_created(&self, size_bits: usize);

    fn record_inserts(&self, count: usize, duration: Duration);

    fn record_lookups(&self, count: usize, positive: usize, duration: Duration);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: usize) {}
    fn record_inserts(&self, _: usize, _: Duration) {}
    fn record_lookups(&self, _: usize, _: usize, _: Duration) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, size_bits: usize) {
        Metrics::record_filter_created(self, size_bits);
    }

    fn record_inserts(&self, count: usize, duration: Duration) {
        Metrics::record_inserts(self, count, duration);
    }

    fn record_lookups(&self, count: usize, positive: usize, duration: Duration) {
        Metrics::record_lookups(self, count, positive, duration);
    }
}
