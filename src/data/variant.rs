//! # Variant Definitions
//!
//! The variants under test, grouped by chromosome in corpus order.

use std::collections::{BTreeMap, HashMap};

use crate::error::{GtBenchError, Result};

/// A genomic marker identified by rsid, chromosome and position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variant {
    /// The marker rs id
    pub rsid: String,
    /// The chromosome label
    pub chrom: String,
    /// The base-pair position
    pub pos: u32,
}

impl Variant {
    /// Create a new variant
    pub fn new(rsid: impl Into<String>, chrom: impl Into<String>, pos: u32) -> Self {
        Self {
            rsid: rsid.into(),
            chrom: chrom.into(),
            pos,
        }
    }
}

/// Variants grouped by chromosome, preserving insertion order within each
/// group. No deduplication happens here; rsid uniqueness is enforced only
/// when a flat view is requested.
#[derive(Debug, Clone, Default)]
pub struct VariantCatalog {
    by_chrom: HashMap<String, Vec<Variant>>,
}

impl VariantCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variant to its chromosome's group
    pub fn push(&mut self, variant: Variant) {
        self.by_chrom
            .entry(variant.chrom.clone())
            .or_default()
            .push(variant);
    }

    /// Variants for one chromosome, in corpus order
    pub fn get(&self, chrom: &str) -> Option<&[Variant]> {
        self.by_chrom.get(chrom).map(Vec::as_slice)
    }

    /// Number of chromosome groups
    pub fn n_chromosomes(&self) -> usize {
        self.by_chrom.len()
    }

    /// Total number of variants across all groups
    pub fn n_variants(&self) -> usize {
        self.by_chrom.values().map(Vec::len).sum()
    }

    /// True when the catalog holds no variants
    pub fn is_empty(&self) -> bool {
        self.by_chrom.is_empty()
    }

    /// Flat rsid-ordered view of every variant in the catalog.
    ///
    /// Fails with [`GtBenchError::DuplicateRsid`] if any rsid occurs more
    /// than once across the chromosome groups.
    pub fn flatten_unique_by_rsid(&self) -> Result<BTreeMap<String, Variant>> {
        let mut flat = BTreeMap::new();

        for variant in self.by_chrom.values().flatten() {
            if flat
                .insert(variant.rsid.clone(), variant.clone())
                .is_some()
            {
                return Err(GtBenchError::DuplicateRsid(variant.rsid.clone()));
            }
        }

        Ok(flat)
    }
}
