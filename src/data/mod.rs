//! # Data Module
//!
//! In-memory representations of the workload: the variants under test and
//! the genotype calls resolved for them. Everything here is built once at
//! startup and read-only for the rest of the run, so it is shared across
//! benchmark workers without synchronization.

pub mod genotype;
pub mod variant;

pub use genotype::Genotype;
pub use variant::{Variant, VariantCatalog};
