//! Adapters Layer - Concrete implementations of the outbound ports

pub mod word_list;

pub use word_list::{SequentialSource, WordListSource, DEFAULT_WORD_FILE};
