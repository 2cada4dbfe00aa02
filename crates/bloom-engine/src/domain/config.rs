//! Filter and evaluation configuration
//!
//! The filter engine assumes its configuration is already in range. This
//! module is where ranges are enforced, either strictly (`validate`, `build`)
//! or by clamping (`clamped`, `build_clamped`), which is what the command
//! line uses.
//!
//! # Example
//!
//! ```
//! use bloom_engine::domain::{FilterConfigBuilder, HashFamily};
//!
//! let config = FilterConfigBuilder::new()
//!     .exponent(40)
//!     .hash_count(3)
//!     .family(HashFamily::Cryptographic)
//!     .build_clamped();
//!
//! assert_eq!(config.exponent, 30);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::hash_functions::HashFamily;
use crate::error::FilterError;

/// Smallest supported size exponent (4 bits)
pub const MIN_EXPONENT: u32 = 2;
/// Largest supported size exponent (2^30 bits, 128 MiB)
pub const MAX_EXPONENT: u32 = 30;
/// At least one hash function must be consulted
pub const MIN_HASH_COUNT: usize = 1;

/// Configuration of a single filter: `(e, k, family)` plus tracing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Size exponent: the bit array holds `2^exponent` bits
    pub exponent: u32,
    /// Number of hash functions consulted per item (k)
    pub hash_count: usize,
    /// Hash family the k functions are drawn from
    pub family: HashFamily,
    /// Emit one trace event per hash on insert/check
    #[serde(default)]
    pub trace: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exponent: 4,
            hash_count: 3,
            family: HashFamily::NonCryptographic,
            trace: false,
        }
    }
}

/// Record of one value changed by [`FilterConfig::clamped`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigAdjustment {
    ExponentRaised { requested: u32, applied: u32 },
    ExponentLowered { requested: u32, applied: u32 },
    HashCountRaised { requested: usize, applied: usize },
    HashCountLowered { requested: usize, applied: usize },
}

impl std::fmt::Display for ConfigAdjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigAdjustment::ExponentRaised { applied, .. } => write!(
                f,
                "size restriction, needs to be bigger, now set to 2**{applied} = {} bits",
                1u64 << applied
            ),
            ConfigAdjustment::ExponentLowered { applied, .. } => write!(
                f,
                "size restriction, can't be that big, now set to 2**{applied} = {} bits",
                1u64 << applied
            ),
            ConfigAdjustment::HashCountRaised { applied, .. } => write!(
                f,
                "at least one hash function should be used, value set to {applied}"
            ),
            ConfigAdjustment::HashCountLowered { applied, .. } => write!(
                f,
                "not enough hash functions available, value set to the max of {applied}"
            ),
        }
    }
}

impl FilterConfig {
    /// Create a configuration, rejecting out-of-range values
    pub fn new(exponent: u32, hash_count: usize, family: HashFamily) -> Result<Self, FilterError> {
        let config = Self {
            exponent,
            hash_count,
            family,
            trace: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Bit array size `m = 2^exponent`
    pub fn size_bits(&self) -> usize {
        1usize << self.exponent
    }

    /// Check `e` in `2..=30` and `k` in `1..=|family|`
    pub fn validate(&self) -> Result<(), FilterError> {
        if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&self.exponent) {
            return Err(FilterError::ExponentOutOfRange {
                exponent: self.exponent,
                min: MIN_EXPONENT,
                max: MAX_EXPONENT,
            });
        }

        let max = self.family.size();
        if !(MIN_HASH_COUNT..=max).contains(&self.hash_count) {
            return Err(FilterError::HashCountOutOfRange {
                count: self.hash_count,
                max,
            });
        }

        Ok(())
    }

    /// Bring every value into range, reporting what changed
    ///
    /// Callers decide how to show the adjustments; they are only logged at
    /// debug level here.
    pub fn clamped(&self) -> (Self, Vec<ConfigAdjustment>) {
        let mut config = self.clone();
        let mut adjustments = Vec::new();

        if config.exponent < MIN_EXPONENT {
            adjustments.push(ConfigAdjustment::ExponentRaised {
                requested: config.exponent,
                applied: MIN_EXPONENT,
            });
            config.exponent = MIN_EXPONENT;
        } else if config.exponent > MAX_EXPONENT {
            adjustments.push(ConfigAdjustment::ExponentLowered {
                requested: config.exponent,
                applied: MAX_EXPONENT,
            });
            config.exponent = MAX_EXPONENT;
        }

        let max = config.family.size();
        if config.hash_count < MIN_HASH_COUNT {
            adjustments.push(ConfigAdjustment::HashCountRaised {
                requested: config.hash_count,
                applied: MIN_HASH_COUNT,
            });
            config.hash_count = MIN_HASH_COUNT;
        } else if config.hash_count > max {
            adjustments.push(ConfigAdjustment::HashCountLowered {
                requested: config.hash_count,
                applied: max,
            });
            config.hash_count = max;
        }

        for adjustment in &adjustments {
            debug!(?adjustment, "{}", adjustment);
        }

        (config, adjustments)
    }
}

/// Builder for [`FilterConfig`]
#[derive(Default)]
pub struct FilterConfigBuilder {
    exponent: Option<u32>,
    hash_count: Option<usize>,
    family: Option<HashFamily>,
    trace: Option<bool>,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size exponent (bit array of `2^exponent` bits)
    pub fn exponent(mut self, exponent: u32) -> Self {
        self.exponent = Some(exponent);
        self
    }

    /// Set the number of hash functions
    pub fn hash_count(mut self, k: usize) -> Self {
        self.hash_count = Some(k);
        self
    }

    pub fn family(mut self, family: HashFamily) -> Self {
        self.family = Some(family);
        self
    }

    /// Shorthand for choosing between the two families
    pub fn cryptographic(self, yes: bool) -> Self {
        self.family(if yes {
            HashFamily::Cryptographic
        } else {
            HashFamily::NonCryptographic
        })
    }

    pub fn trace(mut self, trace: bool) -> Self {
        self.trace = Some(trace);
        self
    }

    fn assemble(self) -> FilterConfig {
        let defaults = FilterConfig::default();
        FilterConfig {
            exponent: self.exponent.unwrap_or(defaults.exponent),
            hash_count: self.hash_count.unwrap_or(defaults.hash_count),
            family: self.family.unwrap_or(defaults.family),
            trace: self.trace.unwrap_or(defaults.trace),
        }
    }

    /// Build, rejecting out-of-range values
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let config = self.assemble();
        config.validate()?;
        Ok(config)
    }

    /// Build, clamping out-of-range values into range
    pub fn build_clamped(self) -> FilterConfig {
        self.assemble().clamped().0
    }
}

/// Configuration of a batch false-positive evaluation
///
/// Defaults: 100 filters of 2^16 bits, each filled with 2500 items, then
/// probed with 1000 known and 1000 unseen items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Configuration shared by every trial filter
    pub filter: FilterConfig,
    /// Number of independent trial filters
    pub num_filters: usize,
    /// Size of the shared pool inserted into every filter
    pub items_to_insert: usize,
    /// Known items probed per filter (clamped to the pool size)
    pub known_probes: usize,
    /// Unseen items probed per filter
    pub unknown_probes: usize,
    /// Seed for item selection and per-trial sampling
    pub seed: u64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig {
                exponent: 16,
                ..FilterConfig::default()
            },
            num_filters: 100,
            items_to_insert: 2500,
            known_probes: 1000,
            unknown_probes: 1000,
            seed: 42,
        }
    }
}

impl EvaluationConfig {
    /// Validate the filter configuration and the trial counts
    pub fn validate(&self) -> Result<(), FilterError> {
        self.filter.validate()?;

        if self.num_filters == 0 {
            return Err(FilterError::InvalidParameters(
                "num_filters cannot be 0".to_string(),
            ));
        }

        if self.items_to_insert == 0 {
            return Err(FilterError::InvalidParameters(
                "items_to_insert cannot be 0".to_string(),
            ));
        }

        if self.unknown_probes == 0 {
            return Err(FilterError::InvalidParameters(
                "unknown_probes cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Known probes actually drawn per filter: within `1..=items_to_insert`
    pub fn effective_known_probes(&self) -> usize {
        self.known_probes.clamp(1, self.items_to_insert.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FilterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.size_bits(), 16);
    }

    #[test]
    fn test_validation_rejects_exponent_out_of_range() {
        for exponent in [0, 1, 31, 64] {
            let config = FilterConfig {
                exponent,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(FilterError::ExponentOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_validation_rejects_hash_count_out_of_range() {
        for hash_count in [0, 6] {
            let result = FilterConfig::new(4, hash_count, HashFamily::Cryptographic);
            assert!(matches!(
                result,
                Err(FilterError::HashCountOutOfRange { max: 5, .. })
            ));
        }
    }

    #[test]
    fn test_clamp_raises_small_values() {
        let config = FilterConfig {
            exponent: 1,
            hash_count: 0,
            ..Default::default()
        };
        let (clamped, adjustments) = config.clamped();

        assert_eq!(clamped.exponent, MIN_EXPONENT);
        assert_eq!(clamped.hash_count, MIN_HASH_COUNT);
        assert_eq!(
            adjustments,
            vec![
                ConfigAdjustment::ExponentRaised { requested: 1, applied: 2 },
                ConfigAdjustment::HashCountRaised { requested: 0, applied: 1 },
            ]
        );
        assert!(clamped.validate().is_ok());
    }

    #[test]
    fn test_clamp_lowers_large_values() {
        let config = FilterConfig {
            exponent: 32,
            hash_count: 9,
            family: HashFamily::Cryptographic,
            trace: false,
        };
        let (clamped, adjustments) = config.clamped();

        assert_eq!(clamped.exponent, MAX_EXPONENT);
        assert_eq!(clamped.hash_count, 5);
        assert_eq!(adjustments.len(), 2);
        assert_eq!(
            adjustments[0].to_string(),
            "size restriction, can't be that big, now set to 2**30 = 1073741824 bits"
        );
    }

    #[test]
    fn test_clamp_leaves_valid_config_alone() {
        let config = FilterConfig::default();
        let (clamped, adjustments) = config.clamped();

        assert_eq!(clamped, config);
        assert!(adjustments.is_empty());
    }

    #[test]
    fn test_builder_uses_defaults() {
        let config = FilterConfigBuilder::new()
            .cryptographic(true)
            .build()
            .expect("defaults are in range");

        assert_eq!(config.exponent, 4);
        assert_eq!(config.hash_count, 3);
        assert_eq!(config.family, HashFamily::Cryptographic);
    }

    #[test]
    fn test_builder_rejects_invalid() {
        let result = FilterConfigBuilder::new().hash_count(6).build();
        assert!(matches!(result, Err(FilterError::HashCountOutOfRange { .. })));
    }

    #[test]
    fn test_evaluation_config_validation() {
        assert!(EvaluationConfig::default().validate().is_ok());

        let config = EvaluationConfig {
            num_filters: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_known_probes_clamped_to_pool() {
        let config = EvaluationConfig {
            items_to_insert: 10,
            known_probes: 50,
            ..Default::default()
        };
        assert_eq!(config.effective_known_probes(), 10);

        let config = EvaluationConfig {
            known_probes: 0,
            ..Default::default()
        };
        assert_eq!(config.effective_known_probes(), 1);
    }

    #[test]
    fn test_config_serializes_family_in_kebab_case() {
        let json = serde_json::to_string(&FilterConfig::default()).unwrap();
        assert!(json.contains("\"non-cryptographic\""), "{json}");
    }
}
