//! Lookup benchmark service
//!
//! Times the same sample of membership lookups against a plain word list and
//! against trees of three shapes: an alphabetical chain, a randomly grown
//! tree, and that random tree after rebalancing.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::{BenchSettings, LookupStrategy};
use crate::domain::OrderedTree;
use crate::infrastructure::traits::WordSource;

/// One timed lookup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Sequential scan of the unsorted list
    ListScan,
    /// Right-leaning chain built by ordered appends of the sorted words
    AlphabeticalTree,
    /// Tree grown by inserting the words in shuffled order
    RandomTree,
    /// The random tree after `rebalance`
    BalancedTree,
}

impl Scenario {
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::ListScan => "list scan",
            Scenario::AlphabeticalTree => "alphabetical tree",
            Scenario::RandomTree => "random tree",
            Scenario::BalancedTree => "balanced tree",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct Measurement {
    pub scenario: Scenario,
    pub elapsed: Duration,
    /// Probes that were found
    pub hits: usize,
    /// Tree height, None for the list scan
    pub height: Option<isize>,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<18} {:>12.6}s  hits={}",
            self.scenario.label(),
            self.elapsed.as_secs_f64(),
            self.hits
        )?;
        if let Some(height) = self.height {
            write!(f, "  height={}", height)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    /// Description of the word source
    pub source: String,
    pub word_count: usize,
    /// Number of probes looked up in every scenario
    pub lookups: usize,
    pub measurements: Vec<Measurement>,
}

impl BenchmarkReport {
    pub fn get(&self, scenario: Scenario) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.scenario == scenario)
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} lookups in {} words from {}",
            self.lookups, self.word_count, self.source
        )?;
        for measurement in &self.measurements {
            writeln!(f, "{}", measurement)?;
        }
        Ok(())
    }
}

/// Counts the needles present in `haystack` by plain sequential comparison.
pub fn linear_scan<T: PartialEq>(haystack: &[T], needles: &[T]) -> usize {
    needles
        .iter()
        .filter(|needle| haystack.contains(needle))
        .count()
}

/// Service comparing list and tree lookups over one word source.
pub struct BenchmarkService {
    source: Arc<dyn WordSource>,
    settings: BenchSettings,
}

impl BenchmarkService {
    pub fn new(source: Arc<dyn WordSource>, settings: BenchSettings) -> Self {
        Self { source, settings }
    }

    /// Runs all four scenarios over the same shuffled probe sample.
    ///
    /// # Errors
    /// * the source cannot be read
    /// * the source yields no words
    #[instrument(level = "debug", skip(self))]
    pub fn run(&self) -> ApplicationResult<BenchmarkReport> {
        let description = self.source.describe();
        let words = self
            .source
            .load()
            .with_context("load word list", &description)?;
        if words.is_empty() {
            return Err(ApplicationError::EmptyWordList(description));
        }
        info!(words = words.len(), "loaded word list");

        let mut rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut shuffled = words.clone();
        shuffled.shuffle(&mut rng);
        let lookups = self.settings.lookups.min(shuffled.len());
        let probes = &shuffled[..lookups];
        debug!(lookups, strategy = ?self.settings.strategy, "probe sample drawn");

        let mut measurements = Vec::with_capacity(4);

        let (elapsed, hits) = timed(|| linear_scan(&words, probes));
        measurements.push(Measurement {
            scenario: Scenario::ListScan,
            elapsed,
            hits,
            height: None,
        });

        // The chain is as deep as the list is long: only the iterative lookup is safe here
        let mut alphabetical: Vec<String> = words.iter().map(|w| self.normalize(w)).collect();
        alphabetical.sort();
        let alphabetical_probes: Vec<String> = probes.iter().map(|w| self.normalize(w)).collect();
        let chain = OrderedTree::from_sorted(alphabetical)?;
        let (elapsed, hits) = timed(|| {
            alphabetical_probes
                .iter()
                .filter(|probe| chain.find_iterative(probe).is_some())
                .count()
        });
        measurements.push(Measurement {
            scenario: Scenario::AlphabeticalTree,
            elapsed,
            hits,
            height: Some(chain.height()),
        });
        drop(chain);

        let mut random_order = words;
        random_order.shuffle(&mut rng);
        let mut tree: OrderedTree<String> = random_order.into_iter().collect();
        let (elapsed, hits) = timed(|| self.lookup_all(&tree, probes));
        measurements.push(Measurement {
            scenario: Scenario::RandomTree,
            elapsed,
            hits,
            height: Some(tree.height()),
        });

        tree.rebalance();
        let (elapsed, hits) = timed(|| self.lookup_all(&tree, probes));
        measurements.push(Measurement {
            scenario: Scenario::BalancedTree,
            elapsed,
            hits,
            height: Some(tree.height()),
        });

        Ok(BenchmarkReport {
            source: description,
            word_count: tree.len(),
            lookups,
            measurements,
        })
    }

    fn normalize(&self, word: &str) -> String {
        if self.settings.lowercase {
            word.to_lowercase()
        } else {
            word.to_string()
        }
    }

    fn lookup_all(&self, tree: &OrderedTree<String>, probes: &[String]) -> usize {
        match self.settings.strategy {
            LookupStrategy::Recursive => probes.iter().filter(|p| tree.find(p).is_some()).count(),
            LookupStrategy::Iterative => probes
                .iter()
                .filter(|p| tree.find_iterative(p).is_some())
                .count(),
        }
    }
}

fn timed<R>(f: impl FnOnce() -> R) -> (Duration, R) {
    let start = Instant::now();
    let result = f();
    (start.elapsed(), result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_needles_when_scanning_then_counts_present_ones() {
        let haystack = ["pear", "apple", "fig"];
        assert_eq!(linear_scan(&haystack, &["fig", "kiwi", "pear"]), 2);
        assert_eq!(linear_scan::<&str>(&[], &["fig"]), 0);
    }

    #[test]
    fn given_measurement_without_height_when_displayed_then_omits_height() {
        let measurement = Measurement {
            scenario: Scenario::ListScan,
            elapsed: Duration::from_millis(1500),
            hits: 3,
            height: None,
        };
        let line = measurement.to_string();
        assert!(line.starts_with("list scan"), "{line}");
        assert!(line.contains("1.500000s"), "{line}");
        assert!(!line.contains("height"), "{line}");
    }
}
