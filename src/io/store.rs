//! # Indexed Genotype Store
//!
//! Random-access genotype queries against per-chromosome VCF files through
//! tabix-indexed `noodles` readers.
//!
//! A store instance is single-consumer: queries take `&mut self` because the
//! underlying indexed reader seeks, so one instance can never be shared
//! between parallel workers. Workers that need concurrent access each open
//! their own store against the same backing files through [`StoreOpener`].

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use noodles::bgzf;
use noodles::core::{Position, Region};
use noodles::tabix;
use noodles::vcf::{
    self,
    variant::record::samples::series::{value::genotype::Phasing, Value},
    variant::record::samples::Series,
    variant::record::Ids,
};

use crate::config::StoreLayout;
use crate::data::{Genotype, Variant};
use crate::error::{GtBenchError, Result};

type IndexedVcfReader = vcf::io::IndexedReader<bgzf::io::Reader<File>>;

/// Resolves per-sample genotype calls for variants.
pub trait GenotypeSource {
    /// Sample labels in cohort order; empty when nothing is registered
    fn samples(&self) -> &[String];

    /// Genotype call for `sample` at `variant`.
    ///
    /// Returns `Ok(None)` when the chromosome has no registered handle, no
    /// record matches the position/rsid pair, or the record has no entry for
    /// the sample. Only unexpected query failures are errors.
    fn genotype(&mut self, sample: &str, variant: &Variant) -> Result<Option<Genotype>>;
}

/// Opens independent [`GenotypeSource`] instances against the same backing
/// files, one per parallel worker.
pub trait StoreOpener: Sync {
    type Source: GenotypeSource;

    fn open_store(&self) -> Result<Self::Source>;
}

/// One open container/index pair and its header-derived metadata
struct ChromHandle {
    reader: IndexedVcfReader,
    header: vcf::Header,
    samples: Vec<String>,
    sample_columns: HashMap<String, usize>,
}

impl ChromHandle {
    fn open(chrom: &str, vcf_path: &Path, index_path: &Path) -> Result<Self> {
        let index = tabix::fs::read(index_path)
            .map_err(|e| GtBenchError::store_open(chrom, index_path, e))?;

        let mut reader = vcf::io::indexed_reader::Builder::default()
            .set_index(index)
            .build_from_path(vcf_path)
            .map_err(|e| GtBenchError::store_open(chrom, vcf_path, e))?;

        let header = reader
            .read_header()
            .map_err(|e| GtBenchError::store_open(chrom, vcf_path, e))?;

        let samples: Vec<String> = header.sample_names().iter().map(|s| s.to_string()).collect();
        let sample_columns = samples
            .iter()
            .enumerate()
            .map(|(column, name)| (name.clone(), column))
            .collect();

        Ok(Self {
            reader,
            header,
            samples,
            sample_columns,
        })
    }

    fn genotype(&mut self, sample: &str, variant: &Variant) -> Result<Option<Genotype>> {
        let Some(&column) = self.sample_columns.get(sample) else {
            return Ok(None);
        };

        // Tabix coordinates are 1-based, so position 0 can match nothing.
        let Ok(start) = Position::try_from(variant.pos as usize) else {
            return Ok(None);
        };

        let region = Region::new(variant.chrom.as_str(), start..=start);
        let query = self
            .reader
            .query(&self.header, &region)
            .map_err(GtBenchError::lookup)?;

        for result in query {
            let record = result.map_err(GtBenchError::lookup)?;

            if record.ids().iter().any(|id| id == variant.rsid) {
                return extract_genotype(&record, &self.header, column);
            }
        }

        Ok(None)
    }
}

/// Pull the GT call for one sample column out of a matched record
fn extract_genotype(
    record: &vcf::Record,
    header: &vcf::Header,
    column: usize,
) -> Result<Option<Genotype>> {
    let samples = record.samples();

    let Some(series) = samples.select("GT") else {
        return Ok(None);
    };

    let Some(value) = series.iter(header).nth(column) else {
        return Ok(None);
    };

    let result = match value.map_err(GtBenchError::lookup)? {
        Some(Value::Genotype(call)) => {
            let mut alleles = Vec::new();
            let mut phased = true;

            for (i, allele) in call.iter().enumerate() {
                let (position, phasing) = allele.map_err(GtBenchError::lookup)?;

                if i > 0 && phasing == Phasing::Unphased {
                    phased = false;
                }

                let index = match position {
                    Some(p) => Some(
                        u8::try_from(p)
                            .map_err(|_| GtBenchError::lookup("allele index out of range"))?,
                    ),
                    None => None,
                };
                alleles.push(index);
            }

            Ok(Some(Genotype::new(alleles, phased)))
        }
        Some(Value::String(s)) => s.parse().map(Some),
        _ => Ok(None),
    };
    result
}

/// Map of open indexed VCF readers keyed by chromosome name
#[derive(Default)]
pub struct GenotypeStore {
    handles: HashMap<String, ChromHandle>,
}

impl GenotypeStore {
    /// Create a store with no registered chromosomes
    pub fn new() -> Self {
        Self::default()
    }

    /// Open every chromosome of `layout` into one store
    pub fn open_layout(layout: &StoreLayout) -> Result<Self> {
        let mut store = Self::new();

        for chrom in layout.chromosomes() {
            store.open(chrom, &layout.vcf_path(chrom), &layout.index_path(chrom))?;
        }

        Ok(store)
    }

    /// Register a chromosome's container/index pair.
    ///
    /// Re-registering a chromosome drops the prior handle first. Both files
    /// are opened and validated eagerly.
    pub fn open(&mut self, chrom: &str, vcf_path: &Path, index_path: &Path) -> Result<()> {
        let handle = ChromHandle::open(chrom, vcf_path, index_path)?;
        self.handles.insert(chrom.to_string(), handle);
        Ok(())
    }

    /// Release every registered handle. Idempotent; never fails.
    pub fn close(&mut self) {
        self.handles.clear();
    }

    /// Number of registered chromosomes
    pub fn n_handles(&self) -> usize {
        self.handles.len()
    }
}

impl GenotypeSource for GenotypeStore {
    fn samples(&self) -> &[String] {
        self.handles
            .values()
            .next()
            .map(|handle| handle.samples.as_slice())
            .unwrap_or(&[])
    }

    fn genotype(&mut self, sample: &str, variant: &Variant) -> Result<Option<Genotype>> {
        match self.handles.get_mut(&variant.chrom) {
            Some(handle) => handle.genotype(sample, variant),
            None => Ok(None),
        }
    }
}

/// Opens a full [`GenotypeStore`] per worker from a shared layout
#[derive(Debug, Clone)]
pub struct VcfStoreOpener {
    layout: StoreLayout,
}

impl VcfStoreOpener {
    /// Create an opener over the given layout
    pub fn new(layout: StoreLayout) -> Self {
        Self { layout }
    }

    /// The layout this opener registers
    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }
}

impl StoreOpener for VcfStoreOpener {
    type Source = GenotypeStore;

    fn open_store(&self) -> Result<GenotypeStore> {
        GenotypeStore::open_layout(&self.layout)
    }
}
