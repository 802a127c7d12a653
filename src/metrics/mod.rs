//! Basic metrics instrumentation for tracking dispatch performance.
//!
//! Provides counters and duration tracking for provider HTTP calls and
//! per-cycle send outcomes.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the adapters and the dispatcher.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of provider HTTP requests made
    provider_requests_total: Arc<AtomicU64>,

    /// Total number of provider HTTP errors
    provider_errors_total: Arc<AtomicU64>,

    /// Total duration of all provider requests in milliseconds
    provider_duration_total_ms: Arc<AtomicU64>,

    /// Number of dispatch cycles run
    dispatch_cycles_total: Arc<AtomicU64>,

    /// Sends that reached the provider successfully
    sends_succeeded_total: Arc<AtomicU64>,

    /// Sends that failed for any reason, timeouts included
    sends_failed_total: Arc<AtomicU64>,

    /// Sends cut off by the dispatch cycle deadline
    sends_timed_out_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            provider_requests_total: Arc::new(AtomicU64::new(0)),
            provider_errors_total: Arc::new(AtomicU64::new(0)),
            provider_duration_total_ms: Arc::new(AtomicU64::new(0)),
            dispatch_cycles_total: Arc::new(AtomicU64::new(0)),
            sends_succeeded_total: Arc::new(AtomicU64::new(0)),
            sends_failed_total: Arc::new(AtomicU64::new(0)),
            sends_timed_out_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a provider request with duration.
    pub fn record_provider_request(&self, duration: Duration) {
        self.provider_requests_total.fetch_add(1, Ordering::Relaxed);
        self.provider_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a provider error.
    pub fn record_provider_error(&self) {
        self.provider_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the end of a dispatch cycle.
    pub fn record_dispatch_cycle(&self, succeeded: usize, failed: usize, timed_out: usize) {
        self.dispatch_cycles_total.fetch_add(1, Ordering::Relaxed);
        self.sends_succeeded_total
            .fetch_add(succeeded as u64, Ordering::Relaxed);
        self.sends_failed_total
            .fetch_add(failed as u64, Ordering::Relaxed);
        self.sends_timed_out_total
            .fetch_add(timed_out as u64, Ordering::Relaxed);
    }

    pub fn provider_requests_total(&self) -> u64 {
        self.provider_requests_total.load(Ordering::Relaxed)
    }

    pub fn provider_errors_total(&self) -> u64 {
        self.provider_errors_total.load(Ordering::Relaxed)
    }

    pub fn provider_duration_total_ms(&self) -> u64 {
        self.provider_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average provider request duration in milliseconds.
    pub fn provider_duration_avg_ms(&self) -> f64 {
        let total = self.provider_duration_total_ms.load(Ordering::Relaxed);
        let count = self.provider_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn dispatch_cycles_total(&self) -> u64 {
        self.dispatch_cycles_total.load(Ordering::Relaxed)
    }

    pub fn sends_succeeded_total(&self) -> u64 {
        self.sends_succeeded_total.load(Ordering::Relaxed)
    }

    pub fn sends_failed_total(&self) -> u64 {
        self.sends_failed_total.load(Ordering::Relaxed)
    }

    pub fn sends_timed_out_total(&self) -> u64 {
        self.sends_timed_out_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            provider_requests_total: self.provider_requests_total(),
            provider_errors_total: self.provider_errors_total(),
            provider_duration_total_ms: self.provider_duration_total_ms(),
            provider_duration_avg_ms: self.provider_duration_avg_ms(),
            dispatch_cycles_total: self.dispatch_cycles_total(),
            sends_succeeded_total: self.sends_succeeded_total(),
            sends_failed_total: self.sends_failed_total(),
            sends_timed_out_total: self.sends_timed_out_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub provider_requests_total: u64,
    pub provider_errors_total: u64,
    pub provider_duration_total_ms: u64,
    pub provider_duration_avg_ms: f64,
    pub dispatch_cycles_total: u64,
    pub sends_succeeded_total: u64,
    pub sends_failed_total: u64,
    pub sends_timed_out_total: u64,
}

/// Helper for timing provider requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing a provider request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) -> Duration {
        let duration = self.start.elapsed();
        self.metrics.record_provider_request(duration);
        duration
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) -> Duration {
        let duration = self.start.elapsed();
        self.metrics.record_provider_request(duration);
        self.metrics.record_provider_error();
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.provider_requests_total(), 0);
        assert_eq!(metrics.provider_errors_total(), 0);
        assert_eq!(metrics.dispatch_cycles_total(), 0);
    }

    #[test]
    fn test_average_duration() {
        let metrics = Metrics::new();
        metrics.record_provider_request(Duration::from_millis(100));
        metrics.record_provider_request(Duration::from_millis(200));
        assert_eq!(metrics.provider_requests_total(), 2);
        assert_eq!(metrics.provider_duration_total_ms(), 300);
        assert_eq!(metrics.provider_duration_avg_ms(), 150.0);
    }

    #[test]
    fn test_record_dispatch_cycle() {
        let metrics = Metrics::new();
        metrics.record_dispatch_cycle(3, 1, 1);
        metrics.record_dispatch_cycle(0, 2, 0);

        let summary = metrics.summary();
        assert_eq!(summary.dispatch_cycles_total, 2);
        assert_eq!(summary.sends_succeeded_total, 3);
        assert_eq!(summary.sends_failed_total, 3);
        assert_eq!(summary.sends_timed_out_total, 1);
    }

    #[test]
    fn test_http_timer_with_error() {
        let metrics = Metrics::new();
        let timer = HttpTimer::new(metrics.clone());
        timer.complete_with_error();

        assert_eq!(metrics.provider_requests_total(), 1);
        assert_eq!(metrics.provider_errors_total(), 1);
    }

    #[test]
    fn test_concurrent_access() {
        let metrics = Metrics::new();
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let metrics = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.record_provider_request(Duration::from_millis(1));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.provider_requests_total(), 200);
    }
}
