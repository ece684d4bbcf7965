//! # Configuration Logic
//!
//! CLI argument parsing and validation, plus the on-disk layout of the
//! per-chromosome VCF stores.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::{GtBenchError, Result};

/// Chromosomes registered when none are given on the command line.
pub const DEFAULT_CHROMOSOMES: [&str; 23] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X",
];

/// Command line configuration
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gtbench",
    version,
    about = "Stress-tests random-access genotype queries against indexed VCF files"
)]
pub struct Config {
    /// Directory holding one `<chrom>.vcf.gz` + `<chrom>.vcf.gz.tbi` pair per chromosome
    #[arg(long, value_name = "DIR")]
    pub vcf_dir: PathBuf,

    /// Gzip-compressed tab-delimited file listing the variants to query
    #[arg(long, value_name = "FILE")]
    pub variants: PathBuf,

    /// Chromosomes to register, comma separated (default: 1-22 and X)
    #[arg(long, value_delimiter = ',', value_name = "CHR,..")]
    pub chromosomes: Vec<String>,

    /// Query a random subset of this many sample labels instead of the full cohort
    #[arg(long, value_name = "N")]
    pub sample_size: Option<usize>,

    /// Random seed for reproducible sample subsetting
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Number of worker threads (default: all cores)
    #[arg(long, value_name = "N")]
    pub nthreads: Option<usize>,

    /// Mirror log output into this file in addition to stderr
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Benchmark invocations
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Query one chromosome's variant set against its indexed VCF
    Single {
        /// Chromosome to test
        #[arg(long, value_name = "CHR")]
        chr: String,
    },
    /// Query every chromosome, then the full rsid-deduplicated corpus
    Multi,
}

impl Config {
    /// Parse command line arguments and validate them
    pub fn parse_and_validate() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Validate the parsed configuration
    pub fn validate(&self) -> Result<()> {
        if !self.vcf_dir.is_dir() {
            return Err(GtBenchError::config(format!(
                "vcf directory not found: {}",
                self.vcf_dir.display()
            )));
        }

        if !self.variants.is_file() {
            return Err(GtBenchError::config(format!(
                "variant file not found: {}",
                self.variants.display()
            )));
        }

        if self.sample_size == Some(0) {
            return Err(GtBenchError::config("sample size must be at least 1"));
        }

        if let Command::Single { chr } = &self.command {
            if chr.is_empty() {
                return Err(GtBenchError::config("chromosome name is empty"));
            }
        }

        Ok(())
    }

    /// Chromosomes to register, falling back to the default list
    pub fn chromosomes(&self) -> Vec<String> {
        if self.chromosomes.is_empty() {
            DEFAULT_CHROMOSOMES.iter().map(|s| s.to_string()).collect()
        } else {
            self.chromosomes.clone()
        }
    }

    /// Number of worker threads to use
    pub fn nthreads(&self) -> usize {
        self.nthreads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Store layout for this invocation: a single-chromosome run only
    /// registers that chromosome's VCF pair.
    pub fn layout(&self) -> StoreLayout {
        let chromosomes = match &self.command {
            Command::Single { chr } => vec![chr.clone()],
            Command::Multi => self.chromosomes(),
        };

        StoreLayout::new(self.vcf_dir.clone(), chromosomes)
    }
}

/// Maps chromosome names to the container/index file pairs backing them.
///
/// Every VCF lives in one directory as `<chrom>.vcf.gz` with a tabix index
/// alongside at `<chrom>.vcf.gz.tbi`.
#[derive(Debug, Clone)]
pub struct StoreLayout {
    dir: PathBuf,
    chromosomes: Vec<String>,
}

impl StoreLayout {
    /// Create a layout rooted at `dir` covering the given chromosomes
    pub fn new(dir: impl Into<PathBuf>, chromosomes: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            chromosomes,
        }
    }

    /// Chromosomes covered by this layout
    pub fn chromosomes(&self) -> &[String] {
        &self.chromosomes
    }

    /// Path of the compressed VCF container for a chromosome
    pub fn vcf_path(&self, chrom: &str) -> PathBuf {
        self.dir.join(format!("{chrom}.vcf.gz"))
    }

    /// Path of the tabix index for a chromosome
    pub fn index_path(&self, chrom: &str) -> PathBuf {
        self.dir.join(format!("{chrom}.vcf.gz.tbi"))
    }

    /// Directory holding the VCF pairs
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
