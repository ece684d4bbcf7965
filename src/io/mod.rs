//! # I/O Module
//!
//! File boundaries: the gzip-compressed variant corpus and the
//! tabix-indexed VCF stores queried by the benchmark.

pub mod corpus;
pub mod store;

pub use corpus::load_catalog;
pub use store::{GenotypeSource, GenotypeStore, StoreOpener, VcfStoreOpener};
