//! # Threading Configuration
//!
//! Configures the global rayon pool that the parallel query strategies
//! fan out on.

use crate::error::{GtBenchError, Result};

/// Build the global worker pool with `n_threads` threads.
///
/// Called once at startup, before any strategy runs.
pub fn init_global_pool(n_threads: usize) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(|i| format!("gtbench-worker-{i}"))
        .build_global()
        .map_err(|e| GtBenchError::config(format!("failed to create thread pool: {e}")))
}
