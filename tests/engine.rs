//! Engine behavior against an in-memory genotype source: pair coverage
//! across strategies, per-worker store isolation, and failure containment.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gtbench::error::Result;
use gtbench::io::store::{GenotypeSource, StoreOpener};
use gtbench::pipelines::benchmark::{BenchmarkEngine, SampleSubset};
use gtbench::utils::progress::ProgressReporter;
use gtbench::{Genotype, GtBenchError, Variant};

/// Shared tally of every (sample, rsid) pair resolved by any store instance
type Visits = Arc<Mutex<Vec<(String, String)>>>;

/// In-memory genotype source standing in for the indexed VCF store
#[derive(Clone)]
struct FakeStore {
    samples: Vec<String>,
    chromosomes: Vec<String>,
    calls: Arc<HashMap<(String, String), Genotype>>,
    visits: Visits,
    fail: bool,
}

impl GenotypeSource for FakeStore {
    fn samples(&self) -> &[String] {
        &self.samples
    }

    fn genotype(&mut self, sample: &str, variant: &Variant) -> Result<Option<Genotype>> {
        if self.fail {
            return Err(GtBenchError::lookup("injected failure"));
        }

        if !self.chromosomes.contains(&variant.chrom) {
            return Ok(None);
        }

        self.visits
            .lock()
            .unwrap()
            .push((sample.to_string(), variant.rsid.clone()));

        Ok(self
            .calls
            .get(&(variant.rsid.clone(), sample.to_string()))
            .cloned())
    }
}

/// Hands every worker a clone of the template store, counting opens
struct FakeOpener {
    template: FakeStore,
    opens: Arc<Mutex<usize>>,
}

impl FakeOpener {
    fn new(template: FakeStore) -> Self {
        Self {
            template,
            opens: Arc::new(Mutex::new(0)),
        }
    }
}

impl StoreOpener for FakeOpener {
    type Source = FakeStore;

    fn open_store(&self) -> Result<FakeStore> {
        *self.opens.lock().unwrap() += 1;
        Ok(self.template.clone())
    }
}

/// Collects reporter events in arrival order
#[derive(Default)]
struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn start(&self, task: &str) {
        self.events.lock().unwrap().push(format!("start: {task}"));
    }

    fn end(&self, task: &str) {
        self.events.lock().unwrap().push(format!("end: {task}"));
    }

    fn write_line(&self, message: &str) {
        self.events.lock().unwrap().push(format!("line: {message}"));
    }
}

fn fake_store(
    samples: &[&str],
    chromosomes: &[&str],
    calls: &[(&str, &str, &str)],
) -> (FakeStore, Visits) {
    let visits: Visits = Arc::new(Mutex::new(Vec::new()));

    let calls: HashMap<(String, String), Genotype> = calls
        .iter()
        .map(|&(rsid, sample, call)| {
            (
                (rsid.to_string(), sample.to_string()),
                call.parse().unwrap(),
            )
        })
        .collect();

    let store = FakeStore {
        samples: samples.iter().map(|s| s.to_string()).collect(),
        chromosomes: chromosomes.iter().map(|s| s.to_string()).collect(),
        calls: Arc::new(calls),
        visits: Arc::clone(&visits),
        fail: false,
    };

    (store, visits)
}

fn sorted_visits(visits: &Visits) -> Vec<(String, String)> {
    let mut pairs = visits.lock().unwrap().clone();
    pairs.sort();
    pairs
}

fn drain_visits(visits: &Visits) -> Vec<(String, String)> {
    let pairs = sorted_visits(visits);
    visits.lock().unwrap().clear();
    pairs
}

fn variants(specs: &[(&str, &str, u32)]) -> Vec<Variant> {
    specs
        .iter()
        .map(|&(rsid, chrom, pos)| Variant::new(rsid, chrom, pos))
        .collect()
}

#[test]
fn single_thread_retrieves_scenario_genotype_exactly_once() {
    let (store, visits) = fake_store(&["S1"], &["1"], &[("rsA", "S1", "0/1")]);
    let reporter = RecordingReporter::default();

    let mut engine = BenchmarkEngine::new(FakeOpener::new(store.clone()), &reporter).unwrap();
    let workload = variants(&[("rsA", "1", 1000)]);

    engine.query_variants_single(&workload).unwrap();

    assert_eq!(
        drain_visits(&visits),
        [("S1".to_string(), "rsA".to_string())]
    );

    let mut store = store;
    let call = store.genotype("S1", &workload[0]).unwrap().unwrap();
    assert_eq!(call.to_string(), "0/1");
}

#[test]
fn all_strategies_visit_identical_pairs_exactly_once() {
    let samples = ["S0", "S1", "S2", "S3", "S4"];
    let workload = variants(&[("rs0", "1", 100), ("rs1", "1", 200), ("rs2", "1", 300)]);

    let mut expected: Vec<(String, String)> = samples
        .iter()
        .flat_map(|s| {
            workload
                .iter()
                .map(move |v| (s.to_string(), v.rsid.clone()))
        })
        .collect();
    expected.sort();

    let (store, visits) = fake_store(&samples, &["1"], &[]);
    let reporter = RecordingReporter::default();
    let mut engine = BenchmarkEngine::new(FakeOpener::new(store), &reporter).unwrap();

    engine.query_variants_single(&workload).unwrap();
    assert_eq!(drain_visits(&visits), expected, "single threaded");

    engine.query_variants_per_sample(&workload).unwrap();
    assert_eq!(drain_visits(&visits), expected, "threaded per sample");

    engine.query_variants_per_variant(&workload).unwrap();
    assert_eq!(drain_visits(&visits), expected, "threaded per variant");
}

#[test]
fn each_parallel_worker_opens_its_own_store() {
    let samples = ["S0", "S1", "S2", "S3", "S4"];
    let (store, _visits) = fake_store(&samples, &["1"], &[]);

    let opener = FakeOpener::new(store);
    let opens = Arc::clone(&opener.opens);

    let reporter = RecordingReporter::default();
    let mut engine = BenchmarkEngine::new(opener, &reporter).unwrap();

    let workload = variants(&[("rs0", "1", 100)]);
    engine.query_variants_per_sample(&workload).unwrap();

    // The engine's primary store plus one private store per worker range;
    // splitting five samples for four rounds bottoms out at five
    // single-label ranges.
    assert_eq!(*opens.lock().unwrap(), 6);
}

#[test]
fn absent_chromosome_lookup_is_absent_not_fatal() {
    let (store, visits) = fake_store(&["S1"], &["1"], &[]);
    let reporter = RecordingReporter::default();
    let mut engine = BenchmarkEngine::new(FakeOpener::new(store), &reporter).unwrap();

    let workload = variants(&[("rsZ", "2", 500)]);

    engine.query_variants_single(&workload).unwrap();
    assert!(sorted_visits(&visits).is_empty());
}

#[test]
fn strategy_failure_is_contained_and_siblings_still_run() {
    let (mut store, _visits) = fake_store(&["S1"], &["1"], &[]);
    store.fail = true;

    let reporter = RecordingReporter::default();
    let mut engine = BenchmarkEngine::new(FakeOpener::new(store), &reporter).unwrap();

    let workload = variants(&[("rsA", "1", 1000)]);
    engine.run_chromosome("1", &workload);

    let events = reporter.events();

    let starts = events.iter().filter(|e| e.starts_with("start:")).count();
    let ends = events.iter().filter(|e| e.starts_with("end:")).count();
    let failures = events
        .iter()
        .filter(|e| e.starts_with("line:") && e.contains("failed"))
        .count();

    assert_eq!(starts, 3, "every strategy must be attempted: {events:?}");
    assert_eq!(ends, 0);
    assert_eq!(failures, 3);
}

#[test]
fn corpus_run_applies_all_three_strategies() {
    let (store, visits) = fake_store(&["S0", "S1"], &["1", "2"], &[]);
    let reporter = RecordingReporter::default();
    let mut engine = BenchmarkEngine::new(FakeOpener::new(store), &reporter).unwrap();

    let corpus: std::collections::BTreeMap<String, Variant> =
        variants(&[("rsA", "1", 100), ("rsB", "2", 200)])
            .into_iter()
            .map(|v| (v.rsid.clone(), v))
            .collect();

    engine.run_corpus(&corpus);

    let events = reporter.events();
    for task in [
        "corpus: single threaded",
        "corpus: threaded per sample",
        "corpus: threaded per variant",
    ] {
        assert!(events.contains(&format!("start: {task}")), "{events:?}");
        assert!(events.contains(&format!("end: {task}")), "{events:?}");
    }

    // Every strategy visits all 2x2 pairs, three strategies in total.
    assert_eq!(sorted_visits(&visits).len(), 12);
}

#[test]
fn sampling_mode_is_reproducible_for_a_seed() {
    let samples = ["S0", "S1", "S2", "S3", "S4", "S5", "S6", "S7"];
    let workload = variants(&[("rs0", "1", 100)]);

    let run = |seed: u64| {
        let (store, visits) = fake_store(&samples, &["1"], &[]);
        let reporter = RecordingReporter::default();
        let mut engine = BenchmarkEngine::new(FakeOpener::new(store), &reporter)
            .unwrap()
            .with_sample_subset(SampleSubset::new(3, seed));

        engine.query_variants_single(&workload).unwrap();
        sorted_visits(&visits)
    };

    assert_eq!(run(9), run(9));
}
