//! Batch false-positive evaluation
//!
//! Builds many independent filters with one configuration, fills each with
//! the same pool of items, and probes it with known items (which must all
//! be found) and with unseen items (whose positives are false positives).
//! Trials share no state and run in parallel.

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::domain::{calculate_fpr, BloomFilter, EvaluationConfig};
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::{ItemSource, MembershipFilter};

/// Unseen items drawn per requested unknown probe, so trials sample
/// different subsets
pub const UNSEEN_POOL_FACTOR: usize = 2;

/// Result of a batch evaluation
#[derive(Clone, Debug, Serialize)]
pub struct EvaluationReport {
    pub config: EvaluationConfig,
    /// Trial filters built
    pub filters: usize,
    /// Items inserted into each filter
    pub items_inserted: usize,
    /// Known-item probes across all filters
    pub known_probes: u64,
    /// Unseen-item probes across all filters
    pub unknown_probes: u64,
    /// Known items reported absent (must be 0)
    pub false_negatives: u64,
    /// Unseen items reported present
    pub false_positives: u64,
    /// `false_positives / unknown_probes`
    pub false_positive_rate: f64,
    /// `(1 - e^(-kn/m))^k` for the same configuration
    pub theoretical_false_positive_rate: f64,
    /// Fraction of bits set after filling one filter
    pub fill_ratio: f64,
    /// Wall-clock duration of the trials
    pub elapsed_secs: f64,
}

impl EvaluationReport {
    pub fn false_positive_percent(&self) -> f64 {
        self.false_positive_rate * 100.0
    }
}

/// Empirical false positive rate at one insert count
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SweepPoint {
    pub items_inserted: usize,
    pub unknown_probes: u64,
    pub false_positives: u64,
    pub false_positive_rate: f64,
    pub theoretical_false_positive_rate: f64,
}

#[derive(Clone, Copy, Debug, Default)]
struct TrialOutcome {
    known_probes: u64,
    unknown_probes: u64,
    false_negatives: u64,
    false_positives: u64,
    bits_set: usize,
}

impl TrialOutcome {
    fn merge(self, other: Self) -> Self {
        Self {
            known_probes: self.known_probes + other.known_probes,
            unknown_probes: self.unknown_probes + other.unknown_probes,
            false_negatives: self.false_negatives + other.false_negatives,
            false_positives: self.false_positives + other.false_positives,
            bits_set: self.bits_set.max(other.bits_set),
        }
    }
}

/// Runs evaluation trials against fresh [`BloomFilter`]s
pub struct EvaluationService<M: MetricsRecorder = NoOpMetrics> {
    metrics: Arc<M>,
}

impl EvaluationService<NoOpMetrics> {
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(NoOpMetrics),
        }
    }
}

impl Default for EvaluationService<NoOpMetrics> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MetricsRecorder> EvaluationService<M> {
    /// Create a service reporting to `metrics`
    pub fn with_metrics(metrics: Arc<M>) -> Self {
        Self { metrics }
    }

    /// Draw the insert pool and the disjoint unseen pool
    fn draw_pools(
        source: &dyn ItemSource,
        items_to_insert: usize,
        unknown_probes: usize,
    ) -> Result<(Vec<String>, Vec<String>), FilterError> {
        let needed = items_to_insert + unknown_probes * UNSEEN_POOL_FACTOR;
        let mut items = source.items(needed)?;
        if items.len() < needed {
            return Err(FilterError::InsufficientItems {
                needed,
                available: items.len(),
            });
        }
        if items.iter().any(|item| item.is_empty()) {
            return Err(FilterError::EmptyItem);
        }

        let unseen = items.split_off(items_to_insert);
        Ok((items, unseen))
    }

    /// Run `num_filters` trials, calling `progress` once per finished trial
    pub fn run(
        &self,
        config: &EvaluationConfig,
        source: &dyn ItemSource,
        progress: &(dyn Fn() + Sync),
    ) -> Result<EvaluationReport, FilterError> {
        config.validate()?;
        let (pool, unseen) = Self::draw_pools(source, config.items_to_insert, config.unknown_probes)?;
        let known_count = config.effective_known_probes();

        info!(
            filters = config.num_filters,
            exponent = config.filter.exponent,
            hash_count = config.filter.hash_count,
            family = %config.filter.family,
            items = pool.len(),
            "Starting evaluation"
        );

        let start = Instant::now();
        let outcome = (0..config.num_filters)
            .into_par_iter()
            .map(|trial| {
                let outcome = self.run_trial(config, trial, &pool, &unseen, known_count);
                progress();
                outcome
            })
            .reduce(TrialOutcome::default, TrialOutcome::merge);
        let elapsed = start.elapsed();

        let m = config.filter.size_bits();
        let report = EvaluationReport {
            config: config.clone(),
            filters: config.num_filters,
            items_inserted: pool.len(),
            known_probes: outcome.known_probes,
            unknown_probes: outcome.unknown_probes,
            false_negatives: outcome.false_negatives,
            false_positives: outcome.false_positives,
            false_positive_rate: ratio(outcome.false_positives, outcome.unknown_probes),
            theoretical_false_positive_rate: calculate_fpr(m, pool.len(), config.filter.hash_count),
            fill_ratio: outcome.bits_set as f64 / m as f64,
            elapsed_secs: elapsed.as_secs_f64(),
        };

        info!(
            false_positives = report.false_positives,
            false_positive_rate = report.false_positive_rate,
            theoretical = report.theoretical_false_positive_rate,
            elapsed_secs = report.elapsed_secs,
            "Evaluation complete"
        );

        Ok(report)
    }

    fn run_trial(
        &self,
        config: &EvaluationConfig,
        trial: usize,
        pool: &[String],
        unseen: &[String],
        known_count: usize,
    ) -> TrialOutcome {
        let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(trial as u64));
        let mut filter = BloomFilter::new(&config.filter);
        self.metrics.record_filter_created(filter.size_bits());

        let start = Instant::now();
        for item in pool {
            filter.insert(item.as_bytes());
        }
        self.metrics.record_inserts(pool.len(), start.elapsed());

        let start = Instant::now();
        let mut false_negatives = 0u64;
        for item in pool.choose_multiple(&mut rng, known_count) {
            if !filter.check(item.as_bytes()) {
                error!(trial, item = %item, "False negative: inserted item reported absent");
                false_negatives += 1;
            }
        }
        let known_probes = known_count.min(pool.len());
        self.metrics.record_lookups(
            known_probes,
            known_probes - false_negatives as usize,
            start.elapsed(),
        );

        let start = Instant::now();
        let unknown_count = config.unknown_probes.min(unseen.len());
        let false_positives = count_positives(
            &filter,
            unseen.choose_multiple(&mut rng, unknown_count),
        );
        self.metrics
            .record_lookups(unknown_count, false_positives as usize, start.elapsed());

        debug!(trial, false_positives, false_negatives, "Trial complete");

        TrialOutcome {
            known_probes: known_probes as u64,
            unknown_probes: unknown_count as u64,
            false_negatives,
            false_positives,
            bits_set: filter.bits_set(),
        }
    }

    /// Measure the false positive rate at increasing insert counts
    ///
    /// Each trial fills one filter incrementally with prefixes of a single
    /// pool and probes the same unseen sample after each step, so the rate
    /// never decreases as more items are inserted.
    pub fn sweep(
        &self,
        config: &EvaluationConfig,
        source: &dyn ItemSource,
        insert_counts: &[usize],
    ) -> Result<Vec<SweepPoint>, FilterError> {
        let mut counts: Vec<usize> = insert_counts.iter().copied().filter(|&n| n > 0).collect();
        counts.sort_unstable();
        counts.dedup();
        let Some(&max_inserts) = counts.last() else {
            return Err(FilterError::InvalidParameters(
                "sweep needs at least one positive insert count".to_string(),
            ));
        };

        let config = EvaluationConfig {
            items_to_insert: max_inserts,
            ..config.clone()
        };
        config.validate()?;
        let (pool, unseen) = Self::draw_pools(source, max_inserts, config.unknown_probes)?;
        let unknown_count = config.unknown_probes.min(unseen.len());

        info!(points = counts.len(), max_inserts, filters = config.num_filters, "Starting sweep");

        let positives = (0..config.num_filters)
            .into_par_iter()
            .map(|trial| {
                let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(trial as u64));
                let probes: Vec<&String> = unseen.choose_multiple(&mut rng, unknown_count).collect();
                let mut filter = BloomFilter::new(&config.filter);
                self.metrics.record_filter_created(filter.size_bits());

                let mut inserted = 0;
                counts
                    .iter()
                    .map(|&target| {
                        let start = Instant::now();
                        for item in &pool[inserted..target] {
                            filter.insert(item.as_bytes());
                        }
                        self.metrics.record_inserts(target - inserted, start.elapsed());
                        inserted = target;
                        count_positives(&filter, probes.iter().copied())
                    })
                    .collect::<Vec<u64>>()
            })
            .reduce(
                || vec![0; counts.len()],
                |a, b| a.iter().zip(&b).map(|(x, y)| x + y).collect(),
            );

        let total_probes = (unknown_count * config.num_filters) as u64;
        Ok(counts
            .iter()
            .zip(positives)
            .map(|(&n, false_positives)| SweepPoint {
                items_inserted: n,
                unknown_probes: total_probes,
                false_positives,
                false_positive_rate: ratio(false_positives, total_probes),
                theoretical_false_positive_rate: calculate_fpr(
                    config.filter.size_bits(),
                    n,
                    config.filter.hash_count,
                ),
            })
            .collect())
    }
}

fn count_positives<'a>(
    filter: &impl MembershipFilter,
    probes: impl Iterator<Item = &'a String>,
) -> u64 {
    probes.filter(|item| filter.check(item.as_bytes())).count() as u64
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
