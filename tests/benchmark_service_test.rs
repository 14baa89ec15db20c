//! Integration tests for BenchmarkService with in-memory and file word sources.

use std::fs;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use ordtree::application::services::{BenchmarkService, Scenario};
use ordtree::application::ApplicationError;
use ordtree::config::{BenchSettings, LookupStrategy};
use ordtree::infrastructure::traits::{FileWordSource, StaticWordSource};
use ordtree::util::testing::init_test_setup;

const WORDS: [&str; 10] = [
    "pear", "Apple", "fig", "kiwi", "banana", "cherry", "date", "grape", "lemon", "mango",
];

fn settings(lookups: usize, strategy: LookupStrategy) -> BenchSettings {
    BenchSettings {
        lookups,
        seed: Some(7),
        lowercase: true,
        strategy,
    }
}

fn service(settings: BenchSettings) -> BenchmarkService {
    BenchmarkService::new(Arc::new(StaticWordSource::new(WORDS)), settings)
}

#[rstest]
#[case(LookupStrategy::Recursive)]
#[case(LookupStrategy::Iterative)]
fn given_word_list_when_running_then_every_scenario_finds_every_probe(
    #[case] strategy: LookupStrategy,
) {
    init_test_setup();

    let report = service(settings(5, strategy)).run().expect("benchmark runs");

    assert_eq!(report.word_count, 10);
    assert_eq!(report.lookups, 5);
    let scenarios: Vec<Scenario> = report.measurements.iter().map(|m| m.scenario).collect();
    assert_eq!(
        scenarios,
        vec![
            Scenario::ListScan,
            Scenario::AlphabeticalTree,
            Scenario::RandomTree,
            Scenario::BalancedTree
        ]
    );
    for measurement in &report.measurements {
        assert_eq!(measurement.hits, 5, "{measurement}");
    }
}

#[test]
fn given_word_list_when_running_then_tree_heights_reflect_shape() {
    let report = service(settings(10, LookupStrategy::Recursive))
        .run()
        .expect("benchmark runs");

    assert_eq!(report.get(Scenario::ListScan).unwrap().height, None);
    assert_eq!(report.get(Scenario::AlphabeticalTree).unwrap().height, Some(9));
    assert_eq!(report.get(Scenario::BalancedTree).unwrap().height, Some(3));
    let random = report.get(Scenario::RandomTree).unwrap().height.unwrap();
    assert!((3..=9).contains(&random), "random height {random}");
}

#[test]
fn given_more_lookups_than_words_when_running_then_clamps_to_word_count() {
    let report = service(settings(100, LookupStrategy::Iterative))
        .run()
        .expect("benchmark runs");

    assert_eq!(report.lookups, 10);
    assert!(report.measurements.iter().all(|m| m.hits == 10));
}

#[test]
fn given_case_kept_when_running_then_mixed_case_words_still_found() {
    let mut bench = settings(10, LookupStrategy::Recursive);
    bench.lowercase = false;

    let report = service(bench).run().expect("benchmark runs");

    assert_eq!(report.get(Scenario::AlphabeticalTree).unwrap().hits, 10);
}

#[test]
fn given_fixed_seed_when_running_twice_then_random_tree_shape_repeats() {
    let first = service(settings(10, LookupStrategy::Recursive)).run().unwrap();
    let second = service(settings(10, LookupStrategy::Recursive)).run().unwrap();

    assert_eq!(
        first.get(Scenario::RandomTree).unwrap().height,
        second.get(Scenario::RandomTree).unwrap().height
    );
}

#[test]
fn given_empty_source_when_running_then_empty_word_list_error() {
    let empty: [&str; 0] = [];
    let service = BenchmarkService::new(
        Arc::new(StaticWordSource::new(empty)),
        settings(10, LookupStrategy::Recursive),
    );

    let result = service.run();

    assert!(
        matches!(result, Err(ApplicationError::EmptyWordList(_))),
        "got {result:?}"
    );
}

#[test]
fn given_word_file_when_running_then_loads_whitespace_separated_words() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("words.txt");
    fs::write(&path, "delta alpha\ncharlie\n\tbravo echo\n").unwrap();
    let service = BenchmarkService::new(
        Arc::new(FileWordSource::new(&path)),
        settings(3, LookupStrategy::Recursive),
    );

    let report = service.run().expect("benchmark runs");

    assert_eq!(report.word_count, 5);
    assert!(report.source.ends_with("words.txt"), "{}", report.source);
    assert!(report.measurements.iter().all(|m| m.hits == 3));
}

#[test]
fn given_missing_word_file_when_running_then_operation_failed() {
    let dir = TempDir::new().unwrap();
    let service = BenchmarkService::new(
        Arc::new(FileWordSource::new(dir.path().join("missing.txt"))),
        settings(3, LookupStrategy::Recursive),
    );

    let result = service.run();

    assert!(
        matches!(result, Err(ApplicationError::OperationFailed { .. })),
        "got {result:?}"
    );
}
