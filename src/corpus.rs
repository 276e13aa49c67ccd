use crate::error::{BpeError, Result};
use crate::vocab::{eow, Symbol, Vocabulary};
use std::collections::BTreeMap;

/// Split text into words on runs of whitespace.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// One symbol per character followed by EOW
pub fn word_symbols(word: &str) -> Vec<Symbol> {
    let mut buf = [0u8; 4];
    let mut symbols: Vec<Symbol> = word
        .chars()
        .map(|c| Symbol::from(&*c.encode_utf8(&mut buf)))
        .collect();
    symbols.push(eow());
    symbols
}

/// A distinct corpus word, how often it occurs, and its current symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub count: usize,
    pub symbols: Vec<Symbol>,
}

/// The corpus as a multiset of words. Entries are ordered by word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<WordEntry>,
    total_words: usize,
}

impl Corpus {
    /// Count the words of `text` and build the initial vocabulary.
    pub fn build(text: &str) -> Result<(Self, Vocabulary)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut total_words = 0;
        for word in split_words(text) {
            *counts.entry(word).or_insert(0) += 1;
            total_words += 1;
        }
        if total_words == 0 {
            return Err(BpeError::EmptyCorpus);
        }

        let vocab = Vocabulary::from_chars(counts.keys().flat_map(|word| word.chars()));
        let entries = counts
            .into_iter()
            .map(|(word, count)| WordEntry {
                word: word.to_string(),
                count,
                symbols: word_symbols(word),
            })
            .collect();

        Ok((
            Self {
                entries,
                total_words,
            },
            vocab,
        ))
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_words(&self) -> usize {
        self.total_words
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [WordEntry] {
        &mut self.entries
    }

    /// Total number of symbols across all words, weighted by count
    pub fn symbol_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.count * entry.symbols.len())
            .sum()
    }
}
