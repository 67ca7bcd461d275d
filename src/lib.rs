//! # Import Progress
//!
//! Low-overhead approximate progress reporting for two-phase graph imports.
//! Importer threads tick one shared atomic counter; a bitmask decides when a
//! sample is pushed to a logging collaborator, so neither logging cost nor
//! lock contention is paid per item.

pub mod bits;
pub mod error;
pub mod logger;
pub mod progress;
pub mod tracker;

pub use error::{ProgressError, Result};
pub use logger::{NullProgressLogger, ProgressLogger, TracingProgressLogger};
pub use progress::{ApproximatedImportProgress, ImportConfig, ImportProgress, NullImportProgress};
pub use tracker::AllocationTracker;
