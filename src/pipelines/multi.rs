//! # Multi-Chromosome Pipeline
//!
//! Registers every configured chromosome, runs the three query strategies
//! per chromosome, then flattens the catalog by rsid and stresses the full
//! corpus with the single-variant strategy forms.

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::io::corpus;
use crate::io::store::VcfStoreOpener;
use crate::pipelines::benchmark::{BenchmarkEngine, SampleSubset};
use crate::utils::progress::{LogReporter, ProgressReporter};

/// Stress test across all configured chromosomes plus the flat corpus
pub struct MultiVcfPipeline {
    config: Config,
}

impl MultiVcfPipeline {
    /// Create the pipeline
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the benchmark. Setup failures (catalog load, store open, corpus
    /// flatten) abort; per-chromosome and per-strategy failures are logged
    /// and the run continues.
    pub fn run(&self) -> Result<()> {
        let reporter = LogReporter::new();

        reporter.start("importing variants");
        let catalog = corpus::load_catalog(&self.config.variants)?;
        reporter.end("importing variants");

        reporter.start("importing vcf files");
        let opener = VcfStoreOpener::new(self.config.layout());
        let mut engine = BenchmarkEngine::new(opener, &reporter)?;
        reporter.end("importing vcf files");

        if let Some(size) = self.config.sample_size {
            let seed = self.config.seed.unwrap_or_else(rand::random);
            info!("sampling {size} labels per strategy (seed {seed})");
            engine = engine.with_sample_subset(SampleSubset::new(size, seed));
        }

        info!("cohort has {} samples", engine.samples().len());

        reporter.start("testing individual chromosomes");
        for chrom in self.config.chromosomes() {
            match catalog.get(&chrom) {
                Some(variants) => engine.run_chromosome(&chrom, variants),
                None => reporter.write_line(&format!(
                    "no variants listed for chromosome {chrom}, skipping"
                )),
            }
        }
        reporter.end("testing individual chromosomes");

        let flat = catalog.flatten_unique_by_rsid()?;

        reporter.start("testing all variants");
        engine.run_corpus(&flat);
        reporter.end("testing all variants");

        Ok(())
    }
}
