//! Item sources backed by a dictionary file or a counter

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::error::FilterError;
use crate::ports::ItemSource;

/// Dictionary shipped with most Unix systems
pub const DEFAULT_WORD_FILE: &str = "/usr/share/dict/words";

/// Items drawn from a newline-separated word list
///
/// Lines are trimmed, empty lines dropped and duplicates removed. The words
/// are shuffled with a seeded RNG before `count` of them are taken. If the
/// file is missing or too short, synthetic decimal items are appended.
#[derive(Clone, Debug)]
pub struct WordListSource {
    path: PathBuf,
    seed: u64,
}

impl WordListSource {
    pub fn new(path: impl Into<PathBuf>, seed: u64) -> Self {
        Self {
            path: path.into(),
            seed,
        }
    }

    /// Source reading [`DEFAULT_WORD_FILE`]
    pub fn system(seed: u64) -> Self {
        Self::new(DEFAULT_WORD_FILE, seed)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_words(&self) -> Vec<String> {
        match fs::read(&self.path) {
            Ok(raw) => {
                // Invalid UTF-8 sequences are replaced, not rejected
                let contents = String::from_utf8_lossy(&raw);
                let mut seen = HashSet::new();
                let words: Vec<String> = contents
                    .lines()
                    .map(str::trim)
                    .filter(|word| !word.is_empty())
                    .filter(|word| seen.insert(*word))
                    .map(str::to_owned)
                    .collect();
                debug!(path = %self.path.display(), words = words.len(), "Loaded word list");
                words
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Word list unavailable, using synthetic items"
                );
                Vec::new()
            }
        }
    }
}

impl ItemSource for WordListSource {
    fn items(&self, count: usize) -> Result<Vec<String>, FilterError> {
        let mut words = self.load_words();
        let mut rng = StdRng::seed_from_u64(self.seed);
        words.shuffle(&mut rng);
        words.truncate(count);

        if words.len() < count {
            if !words.is_empty() {
                warn!(
                    available = words.len(),
                    requested = count,
                    "Word list too short, topping up with synthetic items"
                );
            }
            let missing = count - words.len();
            words.extend(synthetic_items(missing, &words));
        }

        Ok(words)
    }
}

/// Decimal strings `"0"`, `"1"`, ... skipping any already in `existing`
fn synthetic_items(count: usize, existing: &[String]) -> Vec<String> {
    let taken: HashSet<&str> = existing.iter().map(String::as_str).collect();
    (0u64..)
        .map(|i| i.to_string())
        .filter(|item| !taken.contains(item.as_str()))
        .take(count)
        .collect()
}

/// Synthetic-only source: `"{prefix}{i}"` for `i` in `0..count`
#[derive(Clone, Debug, Default)]
pub struct SequentialSource {
    prefix: String,
    limit: Option<usize>,
}

impl SequentialSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            limit: None,
        }
    }

    /// Refuse requests for more than `limit` items
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl ItemSource for SequentialSource {
    fn items(&self, count: usize) -> Result<Vec<String>, FilterError> {
        if let Some(limit) = self.limit {
            if count > limit {
                return Err(FilterError::InsufficientItems {
                    needed: count,
                    available: limit,
                });
            }
        }
        Ok((0..count).map(|i| format!("{}{}", self.prefix, i)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn word_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write words");
        file
    }

    #[test]
    fn test_reads_trims_and_dedups() {
        let file = word_file("apple\n  banana \n\napple\ncherry\n");
        let source = WordListSource::new(file.path(), 7);

        let mut items = source.items(3).unwrap();
        items.sort();
        assert_eq!(items, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_same_seed_same_selection() {
        let words: String = (0..100).map(|i| format!("word{i}\n")).collect();
        let file = word_file(&words);

        let a = WordListSource::new(file.path(), 1).items(10).unwrap();
        let b = WordListSource::new(file.path(), 1).items(10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_list_is_topped_up_without_duplicates() {
        let file = word_file("1\nalpha\n");
        let source = WordListSource::new(file.path(), 3);

        let items = source.items(5).unwrap();
        let unique: HashSet<&String> = items.iter().collect();

        assert_eq!(items.len(), 5);
        assert_eq!(unique.len(), 5, "synthetic items must not repeat words: {items:?}");
    }

    #[test]
    fn test_non_utf8_word_list_is_still_used() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"apple\ncaf\xe9\nna\xefve\n").expect("write words");
        let source = WordListSource::new(file.path(), 5);

        let mut items = source.items(3).unwrap();
        items.sort();
        assert_eq!(items, vec!["apple", "caf\u{fffd}", "na\u{fffd}ve"]);
    }

    #[test]
    fn test_missing_file_falls_back_to_synthetic() {
        let source = WordListSource::new("/nonexistent/bloom/words", 0);
        let items = source.items(4).unwrap();

        assert_eq!(items, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn test_sequential_source_limit() {
        let source = SequentialSource::new("item_").with_limit(3);

        assert_eq!(source.items(2).unwrap(), vec!["item_0", "item_1"]);
        assert!(matches!(
            source.items(4),
            Err(FilterError::InsufficientItems { needed: 4, available: 3 })
        ));
    }
}
