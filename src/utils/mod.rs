//! # Utilities Module
//!
//! Cross-cutting helpers that don't belong in domain-specific modules:
//! work partitioning for the parallel strategies, progress reporting, and
//! thread pool configuration.

pub mod partition;
pub mod progress;
pub mod threading;

pub use partition::{split_ranges, SPLIT_ROUNDS};
pub use progress::{LogReporter, ProgressReporter};
