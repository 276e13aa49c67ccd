use crate::corpus::{split_words, word_symbols};
use crate::error::{BpeError, Result};
use crate::merge::merge_pair;
use crate::vocab::{MergeRule, Symbol, EOW};
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

/// How characters outside the base alphabet are emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UnknownCharPolicy {
    /// Emit the character as its own symbol
    #[default]
    Passthrough,
    /// Emit this symbol in place of the character
    Replace(Symbol),
}

/// Replays learned merges, in rank order, over new text.
#[derive(Debug, Clone)]
pub struct Segmenter {
    rules: Arc<[MergeRule]>,
    alphabet: HashSet<char>,
    unknown: UnknownCharPolicy,
}

impl Segmenter {
    /// `alphabet` is the base vocabulary; any symbol that is not a single
    /// character is ignored.
    pub fn new(rules: impl Into<Arc<[MergeRule]>>, alphabet: &[Symbol]) -> Self {
        let alphabet = alphabet
            .iter()
            .filter(|symbol| &symbol[..] != EOW)
            .filter_map(|symbol| {
                let mut chars = symbol.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            })
            .collect();
        Self {
            rules: rules.into(),
            alphabet,
            unknown: UnknownCharPolicy::default(),
        }
    }

    pub fn with_unknown_policy(self, unknown: UnknownCharPolicy) -> Self {
        Self { unknown, ..self }
    }

    pub fn rules(&self) -> &[MergeRule] {
        &self.rules
    }

    pub fn knows(&self, c: char) -> bool {
        self.alphabet.contains(&c)
    }

    /// Apply every rule once, in rank order.
    pub fn replay(&self, symbols: &mut Vec<Symbol>) {
        for rule in self.rules.iter() {
            if symbols.len() < 2 {
                break;
            }
            merge_pair(symbols, &rule.left, &rule.right, &rule.result);
        }
    }

    /// Segment one word. The last symbol always ends with EOW.
    pub fn segment_word(&self, word: &str) -> Vec<Symbol> {
        let mut symbols = word_symbols(word);
        if let UnknownCharPolicy::Replace(replacement) = &self.unknown {
            // the trailing EOW is never replaced
            let n = symbols.len() - 1;
            for (symbol, c) in symbols[..n].iter_mut().zip(word.chars()) {
                if !self.knows(c) {
                    *symbol = replacement.clone();
                }
            }
        }
        self.replay(&mut symbols);
        symbols
    }

    /// Segment every whitespace-separated word of `text`, in order.
    pub fn segment(&self, text: &str) -> Vec<Symbol> {
        split_words(text)
            .flat_map(|word| self.segment_word(word))
            .collect()
    }

    /// Like [`Segmenter::segment`], but fails on the first character outside
    /// the base alphabet.
    pub fn segment_strict(&self, text: &str) -> Result<Vec<Symbol>> {
        let mut tokens = vec![];
        for word in split_words(text) {
            if let Some(ch) = word.chars().find(|&c| !self.knows(c)) {
                return Err(BpeError::UnknownCharacter {
                    ch,
                    word: word.to_string(),
                });
            }
            tokens.extend(self.segment_word(word));
        }
        Ok(tokens)
    }

    /// Segment many texts in parallel
    pub fn segment_batch(&self, texts: &[&str]) -> Vec<Vec<Symbol>> {
        texts.par_iter().map(|&text| self.segment(text)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::{Trainer, TrainerOptions};

    fn as_strs(symbols: &[Symbol]) -> Vec<&str> {
        symbols.iter().map(|s| &**s).collect()
    }

    fn rule(left: &str, right: &str, rank: usize) -> MergeRule {
        MergeRule::new(Symbol::from(left), Symbol::from(right), rank, 2)
    }

    fn alphabet(chars: &str) -> Vec<Symbol> {
        word_symbols(chars)
    }

    fn low_segmenter() -> Segmenter {
        let result = Trainer::new(TrainerOptions::new(100))
            .train("low low low lower lowest")
            .unwrap();
        Segmenter::new(result.rules, result.vocabulary.alphabet())
    }

    #[test]
    fn test_segment_trained_word() {
        let segmenter = low_segmenter();
        assert_eq!(as_strs(&segmenter.segment("low")), vec!["low "]);
        assert_eq!(as_strs(&segmenter.segment("lower")), vec!["lowe", "r", " "]);
        assert_eq!(
            as_strs(&segmenter.segment("low lowest")),
            vec!["low ", "lowe", "s", "t", " "]
        );
    }

    #[test]
    fn test_segment_unseen_word() {
        let segmenter = low_segmenter();
        assert_eq!(as_strs(&segmenter.segment("slow")), vec!["s", "low "]);
        assert_eq!(as_strs(&segmenter.segment("owl")), vec!["o", "w", "l", " "]);
    }

    #[test]
    fn test_segment_empty() {
        let segmenter = low_segmenter();
        assert!(segmenter.segment("").is_empty());
        assert!(segmenter.segment(" \n ").is_empty());
        assert_eq!(segmenter.segment_strict("").unwrap(), Vec::<Symbol>::new());
    }

    #[test]
    fn test_rank_order_matters() {
        // "abc": (b, c) first gives a|bc, (a, b) first gives ab|c
        let rules = vec![rule("b", "c", 0), rule("a", "b", 1)];
        let segmenter = Segmenter::new(rules, &alphabet("abc"));
        assert_eq!(as_strs(&segmenter.segment_word("abc")), vec!["a", "bc", " "]);

        let rules = vec![rule("a", "b", 0), rule("b", "c", 1)];
        let segmenter = Segmenter::new(rules, &alphabet("abc"));
        assert_eq!(as_strs(&segmenter.segment_word("abc")), vec!["ab", "c", " "]);
    }

    #[test]
    fn test_unknown_passthrough() {
        let segmenter = low_segmenter();
        assert!(!segmenter.knows('z'));
        assert_eq!(
            as_strs(&segmenter.segment("zlowz")),
            vec!["z", "low", "z", " "]
        );
    }

    #[test]
    fn test_unknown_replace() {
        let segmenter =
            low_segmenter().with_unknown_policy(UnknownCharPolicy::Replace(Symbol::from("?")));
        assert_eq!(
            as_strs(&segmenter.segment("zlowé")),
            vec!["?", "low", "?", " "]
        );
        assert_eq!(as_strs(&segmenter.segment("low")), vec!["low "]);
    }

    #[test]
    fn test_segment_strict() {
        let segmenter = low_segmenter();
        assert_eq!(
            as_strs(&segmenter.segment_strict("low low").unwrap()),
            vec!["low ", "low "]
        );
        assert_eq!(
            segmenter.segment_strict("low zoo").unwrap_err(),
            BpeError::UnknownCharacter {
                ch: 'z',
                word: "zoo".to_string()
            }
        );
    }

    #[test]
    fn test_replay_is_idempotent() {
        let segmenter = low_segmenter();
        for word in ["low", "lowest", "slower", "wool"] {
            let mut symbols = segmenter.segment_word(word);
            let before = symbols.clone();
            segmenter.replay(&mut symbols);
            assert_eq!(symbols, before);
        }
    }

    #[test]
    fn test_segment_batch_matches_segment() {
        let segmenter = low_segmenter();
        let texts = ["low lower", "", "lowest slow", "zzz"];
        let batch = segmenter.segment_batch(&texts);
        assert_eq!(batch.len(), texts.len());
        for (text, tokens) in texts.iter().zip(batch) {
            assert_eq!(tokens, segmenter.segment(text));
        }
    }
}
