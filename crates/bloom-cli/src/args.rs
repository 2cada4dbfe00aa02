//! Command line arguments and their translation into engine configuration

use std::path::PathBuf;

use bloom_engine::adapters::DEFAULT_WORD_FILE;
use bloom_engine::domain::ConfigAdjustment;
use bloom_engine::{EvaluationConfig, FilterConfig, HashFamily};
use clap::Parser;

/// Size exponent used by the interactive mode when `--size` is not given
pub const MANUAL_DEFAULT_EXPONENT: u32 = 4;

/// Bloom filter playground: insert and check items interactively, or
/// measure the false positive rate over many filters
#[derive(Parser, Debug, Clone)]
#[command(name = "bloom")]
#[command(about = "Interactive Bloom filter and false-positive evaluation harness")]
pub struct Args {
    /// Exponent size of the bloom filter (2^size bits, clamped to 2..=30)
    #[arg(short, long, allow_negative_numbers = true)]
    pub size: Option<i64>,

    /// Number of hash functions to be used (clamped to 1..=5)
    #[arg(short = 'n', long = "num-func", default_value_t = 3, allow_negative_numbers = true)]
    pub num_func: i64,

    /// Use the cryptographic hash family instead of the non-cryptographic one
    #[arg(short, long)]
    pub crypto: bool,

    /// Run the automatic false-positive evaluation instead of the prompt
    #[arg(short, long)]
    pub auto: bool,

    /// Start with verbose per-hash tracing enabled
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of filters built by the automatic mode
    #[arg(long, default_value_t = 100)]
    pub filters: usize,

    /// Items inserted into every filter
    #[arg(long, default_value_t = 2500)]
    pub inserts: usize,

    /// Known items probed per filter
    #[arg(long, default_value_t = 1000)]
    pub known: usize,

    /// Unseen items probed per filter
    #[arg(long, default_value_t = 1000)]
    pub unknown: usize,

    /// Seed for item selection and sampling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Word list used as item pool (synthetic items if unavailable)
    #[arg(long, default_value = DEFAULT_WORD_FILE)]
    pub words: PathBuf,

    /// Print the evaluation report as JSON
    #[arg(long)]
    pub json: bool,

    /// Comma-separated insert counts to measure the rate at, e.g. 500,1000,2000
    #[arg(long, value_delimiter = ',')]
    pub sweep: Option<Vec<usize>>,
}

impl Args {
    fn family(&self) -> HashFamily {
        if self.crypto {
            HashFamily::Cryptographic
        } else {
            HashFamily::NonCryptographic
        }
    }

    /// Filter configuration, clamped into the supported range
    ///
    /// `default_exponent` applies when `--size` was not given.
    pub fn filter_config(&self, default_exponent: u32) -> (FilterConfig, Vec<ConfigAdjustment>) {
        let exponent = match self.size {
            Some(size) => size.clamp(0, i64::from(u32::MAX)) as u32,
            None => default_exponent,
        };
        let hash_count = self.num_func.max(0) as usize;

        FilterConfig {
            exponent,
            hash_count,
            family: self.family(),
            trace: self.verbose,
        }
        .clamped()
    }

    /// Configuration of the interactive mode
    pub fn manual_config(&self) -> (FilterConfig, Vec<ConfigAdjustment>) {
        self.filter_config(MANUAL_DEFAULT_EXPONENT)
    }

    /// Configuration of the automatic mode
    ///
    /// Verbose tracing is never enabled for batch runs.
    pub fn evaluation_config(&self) -> (EvaluationConfig, Vec<ConfigAdjustment>) {
        let defaults = EvaluationConfig::default();
        let (mut filter, adjustments) = self.filter_config(defaults.filter.exponent);
        filter.trace = false;

        let config = EvaluationConfig {
            filter,
            num_filters: self.filters.max(1),
            items_to_insert: self.inserts.max(1),
            known_probes: self.known,
            unknown_probes: self.unknown.max(1),
            seed: self.seed,
        };
        (config, adjustments)
    }
}
