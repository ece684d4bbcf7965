//! # Benchmark Engine
//!
//! Drives the three query strategies over a variant workload, timing each
//! one and containing failures to the strategy that raised them.
//!
//! Strategy order is fixed: single threaded, threaded per sample, threaded
//! per variant. The parallel strategies split their axis into at most 16
//! contiguous ranges; every range runs on a pool worker that opens its own
//! private store against the same files, since an indexed reader must never
//! be shared between workers. Sample-range workers walk all variants in
//! scope; variant-range workers walk all samples in scope.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::data::Variant;
use crate::error::Result;
use crate::io::store::{GenotypeSource, StoreOpener};
use crate::utils::partition::{split_ranges, SPLIT_ROUNDS};
use crate::utils::progress::ProgressReporter;

/// Draws a fixed-size random subset of sample labels before each strategy
/// run. Draws are with replacement; the seed makes them reproducible.
pub struct SampleSubset {
    size: usize,
    rng: StdRng,
}

impl SampleSubset {
    /// Subset of `size` labels drawn from the given seed
    pub fn new(size: usize, seed: u64) -> Self {
        Self {
            size,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn draw(&mut self, labels: &[String]) -> Vec<String> {
        if labels.is_empty() {
            return Vec::new();
        }

        (0..self.size)
            .map(|_| labels[self.rng.random_range(0..labels.len())].clone())
            .collect()
    }
}

/// Runs the query strategies against a primary store, opening additional
/// per-worker stores through the opener for the parallel strategies.
pub struct BenchmarkEngine<O: StoreOpener, R: ProgressReporter> {
    primary: O::Source,
    opener: O,
    reporter: R,
    subset: Option<SampleSubset>,
}

impl<O: StoreOpener, R: ProgressReporter> BenchmarkEngine<O, R> {
    /// Open the primary store and build the engine.
    ///
    /// An open failure here is a setup failure and aborts the run.
    pub fn new(opener: O, reporter: R) -> Result<Self> {
        let primary = opener.open_store()?;

        Ok(Self {
            primary,
            opener,
            reporter,
            subset: None,
        })
    }

    /// Enable the random-subset sampling mode
    pub fn with_sample_subset(mut self, subset: SampleSubset) -> Self {
        self.subset = Some(subset);
        self
    }

    /// Sample labels in cohort order, from the primary store
    pub fn samples(&self) -> &[String] {
        self.primary.samples()
    }

    /// Sample labels in scope for one strategy run
    fn scope_samples(&mut self) -> Vec<String> {
        let labels = self.primary.samples().to_vec();

        match &mut self.subset {
            Some(subset) => subset.draw(&labels),
            None => labels,
        }
    }

    /// Run the three strategies, in order, over one chromosome's variant
    /// list. Each strategy is timed and failure-contained on its own.
    pub fn run_chromosome(&mut self, chrom: &str, variants: &[Variant]) {
        let task = format!("chr {chrom}: single threaded");
        self.run_timed(&task, |engine| engine.query_variants_single(variants));

        let task = format!("chr {chrom}: threaded per sample");
        self.run_timed(&task, |engine| engine.query_variants_per_sample(variants));

        let task = format!("chr {chrom}: threaded per variant");
        self.run_timed(&task, |engine| engine.query_variants_per_variant(variants));
    }

    /// Run the three strategies over the full rsid-ordered corpus, applying
    /// the single-variant strategy forms variant by variant.
    pub fn run_corpus(&mut self, corpus: &BTreeMap<String, Variant>) {
        self.run_timed("corpus: single threaded", |engine| {
            for variant in corpus.values() {
                engine.query_variant_single(variant)?;
            }
            Ok(())
        });

        self.run_timed("corpus: threaded per sample", |engine| {
            for variant in corpus.values() {
                engine.query_variant_per_sample(variant)?;
            }
            Ok(())
        });

        let flat: Vec<Variant> = corpus.values().cloned().collect();
        self.run_timed("corpus: threaded per variant", |engine| {
            engine.query_variants_per_variant(&flat)
        });
    }

    /// Wrap one strategy in start/end events. A strategy failure is logged
    /// here and does not propagate, so sibling strategies still run.
    fn run_timed(&mut self, task: &str, strategy: impl FnOnce(&mut Self) -> Result<()>) {
        self.reporter.start(task);

        match strategy(self) {
            Ok(()) => self.reporter.end(task),
            Err(e) => self.reporter.write_line(&format!("{task} failed: {e}")),
        }
    }

    /// Sequential loop over all (variant, sample) pairs on the primary store
    pub fn query_variants_single(&mut self, variants: &[Variant]) -> Result<()> {
        let samples = self.scope_samples();

        for variant in variants {
            for sample in &samples {
                self.primary.genotype(sample, variant)?;
            }
        }

        Ok(())
    }

    /// Sample ranges fan out; each worker owns a private store and walks
    /// its range against every variant in scope
    pub fn query_variants_per_sample(&mut self, variants: &[Variant]) -> Result<()> {
        let samples = self.scope_samples();
        let opener = &self.opener;

        split_ranges(&samples, SPLIT_ROUNDS)
            .into_par_iter()
            .try_for_each(|range| {
                let mut store = opener.open_store()?;

                for sample in range {
                    for variant in variants {
                        store.genotype(sample, variant)?;
                    }
                }

                Ok(())
            })
    }

    /// Variant ranges fan out; each worker owns a private store and walks
    /// its range against every sample in scope
    pub fn query_variants_per_variant(&mut self, variants: &[Variant]) -> Result<()> {
        let samples = self.scope_samples();
        let opener = &self.opener;

        split_ranges(variants, SPLIT_ROUNDS)
            .into_par_iter()
            .try_for_each(|range| {
                let mut store = opener.open_store()?;

                for variant in range {
                    for sample in &samples {
                        store.genotype(sample, variant)?;
                    }
                }

                Ok(())
            })
    }

    /// Single-variant form of the sequential strategy
    pub fn query_variant_single(&mut self, variant: &Variant) -> Result<()> {
        let samples = self.scope_samples();

        for sample in &samples {
            self.primary.genotype(sample, variant)?;
        }

        Ok(())
    }

    /// Single-variant form of the per-sample strategy
    pub fn query_variant_per_sample(&mut self, variant: &Variant) -> Result<()> {
        let samples = self.scope_samples();
        let opener = &self.opener;

        split_ranges(&samples, SPLIT_ROUNDS)
            .into_par_iter()
            .try_for_each(|range| {
                let mut store = opener.open_store()?;

                for sample in range {
                    store.genotype(sample, variant)?;
                }

                Ok(())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("S{i}")).collect()
    }

    #[test]
    fn subset_draws_are_reproducible_for_a_seed() {
        let labels = labels(100);

        let mut a = SampleSubset::new(10, 42);
        let mut b = SampleSubset::new(10, 42);

        assert_eq!(a.draw(&labels), b.draw(&labels));
    }

    #[test]
    fn subset_draw_has_requested_size() {
        let labels = labels(3);
        let mut subset = SampleSubset::new(10, 7);

        let drawn = subset.draw(&labels);
        assert_eq!(drawn.len(), 10);
        assert!(drawn.iter().all(|s| labels.contains(s)));
    }

    #[test]
    fn subset_draw_from_no_labels_is_empty() {
        let mut subset = SampleSubset::new(5, 1);
        assert!(subset.draw(&[]).is_empty());
    }
}
