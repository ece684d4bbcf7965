//! # Gtbench: VCF Random-Access Query Stress Test
//!
//! Benchmarks genotype lookup throughput against chromosome-indexed VCF
//! files under three concurrency strategies.
//!
//! ## Usage
//! ```bash
//! # One chromosome against its indexed VCF
//! gtbench --vcf-dir /data/vcf --variants variants.gz single --chr 22
//!
//! # Every chromosome, then the full rsid-deduplicated corpus
//! gtbench --vcf-dir /data/vcf --variants variants.gz multi --log multi.log
//! ```

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use gtbench::config::{Command, Config};
use gtbench::pipelines::{MultiVcfPipeline, SingleVcfPipeline};
use gtbench::utils::threading;
use gtbench::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber: stderr always, plus an optional
/// plain-text mirror of the run log into a file.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}

fn run() -> Result<()> {
    let start = Instant::now();

    let config = Config::parse_and_validate()?;
    init_logging(config.log.as_deref())?;

    let n_threads = config.nthreads();
    threading::init_global_pool(n_threads)?;

    tracing::info!("gtbench v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("threads: {n_threads}");

    match config.command.clone() {
        Command::Single { chr } => SingleVcfPipeline::new(config, chr).run()?,
        Command::Multi => MultiVcfPipeline::new(config).run()?,
    }

    tracing::info!("completed in {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
