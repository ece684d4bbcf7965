//! # Gtbench Library Root
//!
//! ## Role
//! The crate root that declares all public modules and re-exports common types.
//!
//! ## Module Structure
//! ```text
//! gtbench
//! ├── data      # In-memory representations (variants, genotype calls)
//! ├── io        # File I/O (variant corpus, indexed VCF stores)
//! ├── pipelines # High-level orchestration (benchmark engine, entry points)
//! └── utils     # Helpers (work partitioning, progress reporting, threading)
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod io;
pub mod pipelines;
pub mod utils;

pub use config::{Config, StoreLayout};
pub use data::{Genotype, Variant, VariantCatalog};
pub use error::{GtBenchError, Result};
pub use io::store::{GenotypeSource, GenotypeStore, StoreOpener, VcfStoreOpener};
pub use pipelines::BenchmarkEngine;
