//! # Pipeline Module
//!
//! High-level orchestration of the benchmark invocations: the engine that
//! drives the query strategies, and the two entry-point pipelines built on
//! top of it.

pub mod benchmark;
pub mod multi;
pub mod single;

pub use benchmark::{BenchmarkEngine, SampleSubset};
pub use multi::MultiVcfPipeline;
pub use single::SingleVcfPipeline;
