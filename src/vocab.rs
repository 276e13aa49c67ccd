use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

/// A vocabulary atom: a base character or a merged compound.
pub type Symbol = Arc<str>;

/// End-of-word marker appended to every word.
///
/// Words come from whitespace splitting, so no symbol built from corpus
/// characters can contain a space.
pub const EOW: &str = " ";

pub fn eow() -> Symbol {
    Symbol::from(EOW)
}

/// A learned merge. `rank` is the 0-based learning order and the replay order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeRule {
    pub left: Symbol,
    pub right: Symbol,
    pub result: Symbol,
    pub rank: usize,
    /// Total pair frequency in the corpus when this rule was selected
    pub frequency: usize,
}

impl MergeRule {
    pub fn new(left: Symbol, right: Symbol, rank: usize, frequency: usize) -> Self {
        let mut joined = String::with_capacity(left.len() + right.len());
        joined.push_str(&left);
        joined.push_str(&right);
        Self {
            left,
            right,
            result: Symbol::from(joined),
            rank,
            frequency,
        }
    }
}

impl fmt::Display for MergeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}: {:?} + {:?} -> {:?} ({})",
            self.rank, self.left, self.right, self.result, self.frequency
        )
    }
}

/// The growing symbol set.
///
/// Symbols are kept in insertion order: the base characters sorted, then EOW,
/// then one compound per merge in rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    ordered: Vec<Symbol>,
    symbols: HashSet<Symbol>,
    alphabet_len: usize,
}

impl Vocabulary {
    /// Build the initial vocabulary from the distinct characters of a corpus.
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let distinct: BTreeSet<char> = chars.into_iter().collect();
        let mut vocab = Self {
            ordered: Vec::with_capacity(distinct.len() + 1),
            symbols: HashSet::with_capacity(distinct.len() + 1),
            alphabet_len: 0,
        };
        let mut buf = [0u8; 4];
        for c in distinct {
            vocab.insert(Symbol::from(&*c.encode_utf8(&mut buf)));
        }
        vocab.insert(eow());
        vocab.alphabet_len = vocab.len();
        vocab
    }

    /// Adds `symbol` if absent. Returns whether it was new.
    pub(crate) fn insert(&mut self, symbol: Symbol) -> bool {
        if !self.symbols.insert(symbol.clone()) {
            return false;
        }
        self.ordered.push(symbol);
        true
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.ordered.iter()
    }

    /// Base characters plus EOW
    pub fn alphabet(&self) -> &[Symbol] {
        &self.ordered[..self.alphabet_len]
    }

    pub fn alphabet_len(&self) -> usize {
        self.alphabet_len
    }

    /// Compound symbols added by merges, in rank order
    pub fn merged(&self) -> &[Symbol] {
        &self.ordered[self.alphabet_len..]
    }

}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}
