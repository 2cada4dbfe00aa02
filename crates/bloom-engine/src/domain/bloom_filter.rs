//! Core Bloom Filter implementation
//!
//! INVARIANTS:
//! - No false negatives: once `insert(x)` ran, `check(x)` returns true for
//!   the rest of the filter's lifetime (bits are never cleared)
//! - `1 <= k <= |family|`, enforced by the configuration layer
//! - `check` stops at the first unset bit and only returns true after all
//!   k bits were examined

use tracing::info;

use super::config::FilterConfig;
use super::filter_array::FilterArray;
use super::hash_functions::{HashFamily, HashStrategies};
use super::parameters::calculate_fpr;

/// Outcome of a membership check, including how much work it did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MembershipProbe {
    /// `false` is certain, `true` may be a false positive
    pub present: bool,
    /// Bits read before the verdict (1..=k)
    pub bits_examined: usize,
}

/// Bloom filter for probabilistic membership testing
///
/// A Bloom filter is a space-efficient probabilistic data structure that
/// can test whether an element is a member of a set. False positives are
/// possible, but false negatives are not. Elements cannot be removed.
#[derive(Debug)]
pub struct BloomFilter {
    /// Bit array storing the filter state
    array: FilterArray,
    /// Hash functions of the active family, built once for this filter
    strategies: HashStrategies,
    /// Number of hash functions consulted (k)
    k: usize,
    /// Size exponent (m = 2^e)
    exponent: u32,
    /// Number of insert calls (n)
    n: usize,
    /// Per-instance verbose tracing
    trace: bool,
}

impl BloomFilter {
    /// Create a filter from an in-range configuration
    ///
    /// The configuration must already satisfy [`FilterConfig::validate`];
    /// use [`FilterConfig::clamped`] for untrusted input.
    pub fn new(config: &FilterConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "unvalidated config: {config:?}");
        Self {
            array: FilterArray::new(config.exponent),
            strategies: config.family.build(config.exponent),
            k: config.hash_count,
            exponent: config.exponent,
            n: 0,
            trace: config.trace,
        }
    }

    /// Create a filter of `2^exponent` bits using the first `k` functions of `family`
    pub fn with_params(exponent: u32, k: usize, family: HashFamily) -> Self {
        Self::new(&FilterConfig {
            exponent,
            hash_count: k,
            family,
            trace: false,
        })
    }

    /// Bit positions of `item`, one per consulted hash function
    pub fn positions(&self, item: &[u8]) -> Vec<usize> {
        self.strategies
            .take(self.k)
            .map(|hash| hash.position(item, self.exponent))
            .collect()
    }

    /// Insert an element into the filter
    ///
    /// After insertion, `check(element)` is guaranteed to return true.
    /// Inserting the same element again changes nothing but the insert count.
    pub fn insert(&mut self, item: &[u8]) {
        for hash in self.strategies.take(self.k) {
            let position = hash.position(item, self.exponent);
            if self.trace {
                info!(
                    hash = hash.name(),
                    digest = %hash.digest_hex(item),
                    position,
                    item = %String::from_utf8_lossy(item),
                    "insert"
                );
            }
            self.array.set(position);
        }
        self.n += 1;
    }

    /// Test if an element might be in the filter
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element is definitely NOT in the set (never false negative)
    pub fn check(&self, item: &[u8]) -> bool {
        self.probe(item).present
    }

    /// Like [`check`](Self::check), but also reports how many bits were read
    pub fn probe(&self, item: &[u8]) -> MembershipProbe {
        let mut bits_examined = 0;
        for hash in self.strategies.take(self.k) {
            let position = hash.position(item, self.exponent);
            let set = self.array.get(position);
            bits_examined += 1;
            if self.trace {
                info!(
                    hash = hash.name(),
                    digest = %hash.digest_hex(item),
                    position,
                    set,
                    item = %String::from_utf8_lossy(item),
                    "check"
                );
            }
            if !set {
                return MembershipProbe {
                    present: false,
                    bits_examined,
                };
            }
        }
        MembershipProbe {
            present: true,
            bits_examined,
        }
    }

    /// Expected false positive rate for the current insert count
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k. Repeated inserts of the same item
    /// are counted, so this overestimates for duplicate-heavy workloads.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        calculate_fpr(self.size_bits(), self.n, self.k)
    }

    /// Read-only view of the bit array
    pub fn bits(&self) -> &FilterArray {
        &self.array
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.array.count_ones()
    }

    /// Get the filter size in bits (m)
    pub fn size_bits(&self) -> usize {
        self.array.len()
    }

    /// Get the size exponent (e)
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Get the number of hash functions (k)
    pub fn hash_count(&self) -> usize {
        self.k
    }

    pub fn family(&self) -> HashFamily {
        self.strategies.family()
    }

    /// Names of the consulted hash functions, in index order
    pub fn hash_names(&self) -> Vec<&'static str> {
        self.strategies.take(self.k).map(|hash| hash.name()).collect()
    }

    /// Get the number of insert calls (n)
    pub fn elements_inserted(&self) -> usize {
        self.n
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Flip verbose tracing, returning the new state
    pub fn toggle_trace(&mut self) -> bool {
        self.trace = !self.trace;
        self.trace
    }

    pub fn is_tracing(&self) -> bool {
        self.trace
    }
}
