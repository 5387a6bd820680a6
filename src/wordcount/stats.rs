//! Partial keyword-frequency aggregates.

use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Frequencies of key words seen so far. Words never seen are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub word_frequencies: BTreeMap<String, u64>,
}

impl Stats {
    /// Counts one occurrence of `word`.
    pub fn record(&mut self, word: &str) {
        match self.word_frequencies.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                self.word_frequencies.insert(word.to_string(), 1);
            }
        }
    }

    pub fn get(&self, word: &str) -> u64 {
        self.word_frequencies.get(word).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.word_frequencies.is_empty()
    }
}

impl AddAssign<&Stats> for Stats {
    fn add_assign(&mut self, other: &Stats) {
        for (word, count) in &other.word_frequencies {
            *self.word_frequencies.entry(word.clone()).or_insert(0) += count;
        }
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, other: Stats) {
        for (word, count) in other.word_frequencies {
            *self.word_frequencies.entry(word).or_insert(0) += count;
        }
    }
}

impl<const N: usize> From<[(&str, u64); N]> for Stats {
    fn from(pairs: [(&str, u64); N]) -> Self {
        Self {
            word_frequencies: pairs
                .into_iter()
                .map(|(word, count)| (word.to_string(), count))
                .collect(),
        }
    }
}
