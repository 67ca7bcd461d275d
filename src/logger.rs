//! Progress logging collaborators
//!
//! The estimator pushes `(current, total)` samples into a [`ProgressLogger`];
//! what happens to a sample — rendering, suppression, discarding — is entirely
//! the logger's concern.

use crate::tracker::AllocationTracker;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Sink for sampled progress values.
///
/// Called synchronously from importer threads, so implementations must be
/// thread-safe and should stay cheap. Logging is best-effort instrumentation:
/// the estimator never retries or buffers a sample.
pub trait ProgressLogger: Send + Sync {
    /// Receive one progress sample on the shared operations scale.
    fn log_progress(&self, current: u64, total: u64, tracker: &AllocationTracker);
}

/// Logger that renders samples as integer percentages through `tracing`.
///
/// Repeated samples that land on the same percentage are suppressed, so a
/// run emits at most 101 lines per phase however often it is sampled.
pub struct TracingProgressLogger {
    task: String,
    last_percentage: AtomicU64,
}

impl TracingProgressLogger {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            // Sentinel so the very first sample (0% included) is emitted.
            last_percentage: AtomicU64::new(u64::MAX),
        }
    }

    /// Integer percentage of `current/total`, clamped to 100.
    ///
    /// An empty import (`total == 0`) is complete by definition.
    fn percentage(current: u64, total: u64) -> u64 {
        if total == 0 {
            return 100;
        }
        let percent = (current as u128 * 100) / total as u128;
        percent.min(100) as u64
    }
}

impl ProgressLogger for TracingProgressLogger {
    fn log_progress(&self, current: u64, total: u64, tracker: &AllocationTracker) {
        let percentage = Self::percentage(current, total);
        let previous = self.last_percentage.swap(percentage, Ordering::Relaxed);
        if percentage != previous {
            info!(
                task = %self.task,
                percentage,
                current,
                total,
                memory = %tracker.usage_string(),
                "import progress"
            );
        }
    }
}

/// Logger that discards every sample
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgressLogger;

impl ProgressLogger for NullProgressLogger {
    fn log_progress(&self, _current: u64, _total: u64, _tracker: &AllocationTracker) {}
}
