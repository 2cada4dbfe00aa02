//! Error types for the Bloom filter engine

use thiserror::Error;

/// Errors that can occur while configuring or evaluating filters
///
/// The engine's `insert`/`check` never fail; these errors come from the
/// configuration layer and from the evaluation harness around it.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Size exponent out of range: {exponent} (must be between {min} and {max})")]
    ExponentOutOfRange { exponent: u32, min: u32, max: u32 },

    #[error("Hash function count out of range: {count} (must be between 1 and {max})")]
    HashCountOutOfRange { count: usize, max: usize },

    #[error("Empty item: evaluation items must be non-empty")]
    EmptyItem,

    #[error("Not enough distinct items: needed {needed}, available {available}")]
    InsufficientItems { needed: usize, available: usize },

    #[error("Invalid evaluation parameters: {0}")]
    InvalidParameters(String),
}
