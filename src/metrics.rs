// Queue metrics module
//
// Provides lightweight counters for monitoring how the bar queue is used

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Bar queue metrics
///
/// Uses atomic operations so a metrics handle can be read from any thread
/// while the manager itself stays on the UI thread.
#[derive(Debug)]
pub struct Metrics {
    /// Requests appended to the queue
    pub bars_enqueued: AtomicU64,

    /// Presentations the presenter reported as shown
    pub bars_shown: AtomicU64,

    /// Presentations the presenter reported as dismissed
    pub bars_dismissed: AtomicU64,

    /// Indefinite requests that played as short
    pub durations_coerced: AtomicU64,

    /// Times the queue was played to the end
    pub queue_drains: AtomicU64,

    /// Times `dismiss_all()` reset the queue
    pub queue_resets: AtomicU64,

    /// Presenter `make` failures
    pub presenter_errors: AtomicU64,

    /// Manager creation time
    start_time: Instant,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            bars_enqueued: AtomicU64::new(0),
            bars_shown: AtomicU64::new(0),
            bars_dismissed: AtomicU64::new(0),
            durations_coerced: AtomicU64::new(0),
            queue_drains: AtomicU64::new(0),
            queue_resets: AtomicU64::new(0),
            presenter_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_enqueued(&self) {
        self.bars_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_shown(&self) {
        self.bars_shown.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dismissed(&self) {
        self.bars_dismissed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_coerced(&self) {
        self.durations_coerced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_drain(&self) {
        self.queue_drains.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reset(&self) {
        self.queue_resets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_presenter_error(&self) {
        self.presenter_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Bar Queue Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Bars: {} enqueued, {} shown, {} dismissed",
            self.bars_enqueued.load(Ordering::Relaxed),
            self.bars_shown.load(Ordering::Relaxed),
            self.bars_dismissed.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Queue: {} drains, {} resets, {} coerced durations, {} presenter errors",
            self.queue_drains.load(Ordering::Relaxed),
            self.queue_resets.load(Ordering::Relaxed),
            self.durations_coerced.load(Ordering::Relaxed),
            self.presenter_errors.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
