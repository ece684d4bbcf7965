//! # Single-Chromosome Pipeline
//!
//! Registers one chromosome's indexed VCF and runs the three query
//! strategies over that chromosome's variant list.

use tracing::info;

use crate::config::Config;
use crate::error::{GtBenchError, Result};
use crate::io::corpus;
use crate::io::store::VcfStoreOpener;
use crate::pipelines::benchmark::{BenchmarkEngine, SampleSubset};
use crate::utils::progress::{LogReporter, ProgressReporter};

/// Stress test for one chromosome's VCF
pub struct SingleVcfPipeline {
    config: Config,
    chrom: String,
}

impl SingleVcfPipeline {
    /// Create the pipeline for one chromosome
    pub fn new(config: Config, chrom: String) -> Self {
        Self { config, chrom }
    }

    /// Run the benchmark. Setup failures abort; strategy failures are
    /// contained by the engine.
    pub fn run(&self) -> Result<()> {
        let reporter = LogReporter::new();

        reporter.start("importing variants");
        let catalog = corpus::load_catalog(&self.config.variants)?;
        reporter.end("importing variants");

        let variants = catalog.get(&self.chrom).ok_or_else(|| {
            GtBenchError::config(format!(
                "no variants listed for chromosome {}",
                self.chrom
            ))
        })?;

        reporter.start("importing vcf files");
        let opener = VcfStoreOpener::new(self.config.layout());
        let mut engine = BenchmarkEngine::new(opener, &reporter)?;
        reporter.end("importing vcf files");

        if let Some(size) = self.config.sample_size {
            let seed = self.config.seed.unwrap_or_else(rand::random);
            info!("sampling {size} labels per strategy (seed {seed})");
            engine = engine.with_sample_subset(SampleSubset::new(size, seed));
        }

        info!(
            "querying {} variants on chromosome {} across {} samples",
            variants.len(),
            self.chrom,
            engine.samples().len()
        );

        engine.run_chromosome(&self.chrom, variants);

        Ok(())
    }
}
