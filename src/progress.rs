//! Approximate progress estimation for two-phase graph imports
//!
//! An import run creates all nodes first, then all relationships. Both phases
//! tick one shared atomic counter; node ticks count as one operation and
//! relationship ticks are projected onto the same scale through a fixed
//! power-of-two factor derived once at construction.

use crate::bits::{nearest_power_of_two, power_of_two_shift};
use crate::error::{ProgressError, Result};
use crate::logger::ProgressLogger;
use crate::tracker::AllocationTracker;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// How often to sample, relative to node count: one sample per 64 ticks.
const SAMPLE_SHIFT: u32 = 6;

/// Progress reporting capability consumed by the import pipeline.
///
/// Implementations must be thread-safe; importer threads call
/// [`record_node`](ImportProgress::record_node) and
/// [`record_relationship`](ImportProgress::record_relationship) concurrently
/// and are never blocked. Sequencing the single
/// [`reset_for_relationships`](ImportProgress::reset_for_relationships) call
/// between the two phases is the caller's responsibility.
pub trait ImportProgress: Send + Sync {
    /// Record one node processed.
    fn record_node(&self);

    /// Record one relationship processed.
    fn record_relationship(&self);

    /// Rewind the shared counter at the node→relationship phase boundary.
    ///
    /// Must be called exactly once, after the last node tick and before the
    /// first relationship tick; calling it at any other point corrupts the
    /// progress scale.
    fn reset_for_relationships(&self);
}

/// Static inputs of an import run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Total nodes scheduled for import
    pub node_count: u64,
    /// Upper bound on relationships per node, symmetric for both directions
    pub max_rel_count: u64,
    /// Whether incoming relationships are loaded
    pub load_incoming: bool,
    /// Whether outgoing relationships are loaded
    pub load_outgoing: bool,
}

/// Sampled, approximate progress over one shared atomic counter.
///
/// All derived constants are fixed at construction; the counter is the only
/// mutable state, so recording a tick is one relaxed `fetch_add` plus a
/// bitwise mask test. A sample reaches the logger roughly once per 64 node
/// ticks, whatever the true item count.
pub struct ApproximatedImportProgress {
    logger: Arc<dyn ProgressLogger>,
    tracker: Arc<AllocationTracker>,
    node_count: u64,
    approx_operations: u64,
    sample_mask: u64,
    relation_shift: u32,
    counter: AtomicU64,
}

impl ApproximatedImportProgress {
    /// Derive the progress scale for one import run.
    ///
    /// Fails with [`ProgressError::InvalidConfiguration`] when the estimated
    /// operation count cannot be represented in a `u64`.
    pub fn new(
        config: ImportConfig,
        logger: Arc<dyn ProgressLogger>,
        tracker: Arc<AllocationTracker>,
    ) -> Result<Self> {
        let ImportConfig {
            node_count,
            max_rel_count,
            load_incoming,
            load_outgoing,
        } = config;

        let incoming = if load_incoming { max_rel_count } else { 0 };
        let outgoing = if load_outgoing { max_rel_count } else { 0 };
        let rel_operations = incoming
            .checked_add(outgoing)
            .ok_or_else(|| overflow_error(config))?;

        // Average relationship operations per node, rounded up to a power of
        // two so relationship ticks can be projected with a plain shift.
        let rel_factor = if node_count > 0 {
            nearest_power_of_two(rel_operations / node_count)
        } else {
            0
        };
        let relation_shift = power_of_two_shift(rel_factor);

        let scaled_relations = node_count
            .checked_mul(1u64 << relation_shift)
            .ok_or_else(|| overflow_error(config))?;
        let approx_operations = node_count
            .checked_add(scaled_relations)
            .ok_or_else(|| overflow_error(config))?;

        // Saturating: small node counts clamp the mask to 0 (sample every
        // tick) instead of underflowing to an all-ones "never sample" mask.
        let sample_mask = (nearest_power_of_two(node_count) >> SAMPLE_SHIFT).saturating_sub(1);

        debug!(
            node_count,
            approx_operations, sample_mask, relation_shift, "derived import progress scale"
        );

        Ok(Self {
            logger,
            tracker,
            node_count,
            approx_operations,
            sample_mask,
            relation_shift,
            counter: AtomicU64::new(0),
        })
    }

    /// Estimated total operations on the shared progress scale
    pub fn approx_operations(&self) -> u64 {
        self.approx_operations
    }

    /// Power-of-two exponent weighting relationship ticks against node ticks
    pub fn relation_shift(&self) -> u32 {
        self.relation_shift
    }

    /// Sampling mask; a tick is reported when `tick & mask == 0`
    pub fn sample_mask(&self) -> u64 {
        self.sample_mask
    }

    fn next_tick(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl ImportProgress for ApproximatedImportProgress {
    fn record_node(&self) {
        let tick = self.next_tick();
        if tick & self.sample_mask == 0 {
            self.logger
                .log_progress(tick, self.approx_operations, &self.tracker);
        }
    }

    fn record_relationship(&self) {
        let tick = self.next_tick();
        if tick & self.sample_mask == 0 {
            // Project relationship ticks onto the operations scale and place
            // them after the completed node phase.
            let current = (tick << self.relation_shift) + self.node_count;
            self.logger
                .log_progress(current, self.approx_operations, &self.tracker);
        }
    }

    fn reset_for_relationships(&self) {
        self.counter.store(0, Ordering::Relaxed);
    }
}

/// Strategy that drops all progress information
#[derive(Debug, Clone, Copy, Default)]
pub struct NullImportProgress;

impl ImportProgress for NullImportProgress {
    fn record_node(&self) {}
    fn record_relationship(&self) {}
    fn reset_for_relationships(&self) {}
}

fn overflow_error(config: ImportConfig) -> ProgressError {
    ProgressError::InvalidConfiguration(format!(
        "estimated operation count overflows u64 for {:?}",
        config
    ))
}
