//! Allocation tracking shared across importer threads
//!
//! The tracker is the opaque memory context the estimator threads through to
//! the progress logger on every sample. Importer threads bump it as they
//! allocate; it never synchronizes them.

use std::sync::atomic::{AtomicU64, Ordering};

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;
const TIB: u64 = GIB * 1024;

/// Concurrent counter of bytes currently attributed to an import run
#[derive(Debug, Default)]
pub struct AllocationTracker {
    tracked: AtomicU64,
}

impl AllocationTracker {
    /// Create a tracker with nothing attributed yet
    pub fn new() -> Self {
        Self {
            tracked: AtomicU64::new(0),
        }
    }

    /// Attribute `bytes` to this run
    pub fn add_bytes(&self, bytes: u64) {
        self.tracked.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Release `bytes` from this run; releasing more than is tracked clamps to zero
    pub fn remove_bytes(&self, bytes: u64) {
        let mut current = self.tracked.load(Ordering::Relaxed);
        loop {
            let next = current.saturating_sub(bytes);
            match self.tracked.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }

    /// Bytes currently tracked
    pub fn tracked_bytes(&self) -> u64 {
        self.tracked.load(Ordering::Relaxed)
    }

    /// Human-readable rendering of the current usage
    pub fn usage_string(&self) -> String {
        human_readable(self.tracked_bytes())
    }
}

/// Render a byte count in binary units
pub fn human_readable(bytes: u64) -> String {
    match bytes {
        b if b >= TIB => format!("{:.2} TiB", b as f64 / TIB as f64),
        b if b >= GIB => format!("{:.2} GiB", b as f64 / GIB as f64),
        b if b >= MIB => format!("{:.2} MiB", b as f64 / MIB as f64),
        b if b >= KIB => format!("{:.2} KiB", b as f64 / KIB as f64),
        b => format!("{} B", b),
    }
}
