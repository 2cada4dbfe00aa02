//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - The bit array and the Bloom filter engine
//! - Both hash families
//! - Configuration with validation and clamping
//! - Theoretical parameter calculations
//!
//! RULES:
//! - No I/O operations
//! - No global mutable state

pub mod bloom_filter;
pub mod config;
pub mod filter_array;
pub mod hash_functions;
pub mod parameters;

pub use bloom_filter::{BloomFilter, MembershipProbe};
pub use config::{
    ConfigAdjustment, EvaluationConfig, FilterConfig, FilterConfigBuilder, MAX_EXPONENT,
    MIN_EXPONENT, MIN_HASH_COUNT,
};
pub use filter_array::FilterArray;
pub use hash_functions::{HashFamily, HashFunction, HashStrategies, FAMILY_SIZE};
pub use parameters::{calculate_fpr, minimum_exponent, optimal_k};
