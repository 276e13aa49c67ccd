use crate::error::Result;
use crate::segmenter::{Segmenter, UnknownCharPolicy};
use crate::trainer::{StopReason, Trainer, TrainerOptions, TrainingProgress, TrainingResult};
use crate::vocab::{MergeRule, Symbol, Vocabulary, EOW};

/// A trained BPE vocabulary together with its ordered merge rules.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    vocabulary: Vocabulary,
    stop_reason: StopReason,
    segmenter: Segmenter,
}

impl Tokenizer {
    pub fn new(training: TrainingResult) -> Self {
        let TrainingResult {
            vocabulary,
            rules,
            stop_reason,
        } = training;
        let segmenter = Segmenter::new(rules, vocabulary.alphabet());
        Self {
            vocabulary,
            stop_reason,
            segmenter,
        }
    }

    /// Learn a vocabulary of at most `target_vocab_size` symbols from `corpus`.
    pub fn train(corpus: &str, target_vocab_size: usize) -> Result<Self> {
        Self::train_with_options(corpus, TrainerOptions::new(target_vocab_size), |_| {})
    }

    pub fn train_with_progress<F>(corpus: &str, target_vocab_size: usize, progress: F) -> Result<Self>
    where
        F: FnMut(&TrainingProgress<'_>),
    {
        Self::train_with_options(corpus, TrainerOptions::new(target_vocab_size), progress)
    }

    pub fn train_with_options<F>(corpus: &str, options: TrainerOptions, progress: F) -> Result<Self>
    where
        F: FnMut(&TrainingProgress<'_>),
    {
        let training = Trainer::new(options).train_with_progress(corpus, progress)?;
        Ok(Self::new(training))
    }

    pub fn with_unknown_policy(self, policy: UnknownCharPolicy) -> Self {
        Self {
            segmenter: self.segmenter.with_unknown_policy(policy),
            ..self
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn rules(&self) -> &[MergeRule] {
        self.segmenter.rules()
    }

    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// Split `text` into subword tokens. Never fails.
    pub fn segment(&self, text: &str) -> Vec<String> {
        to_strings(self.segmenter.segment(text))
    }

    pub fn segment_symbols(&self, text: &str) -> Vec<Symbol> {
        self.segmenter.segment(text)
    }

    /// Fails on characters that were never seen in training.
    pub fn segment_strict(&self, text: &str) -> Result<Vec<String>> {
        Ok(to_strings(self.segmenter.segment_strict(text)?))
    }

    pub fn segment_batch(&self, texts: &[&str]) -> Vec<Vec<String>> {
        self.segmenter
            .segment_batch(texts)
            .into_iter()
            .map(to_strings)
            .collect()
    }

    /// Join tokens back into text. EOW is a space, so words come out
    /// space-separated.
    pub fn decode<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let joined = tokens.iter().fold(String::new(), |mut acc, token| {
            acc.push_str(token.as_ref());
            acc
        });
        match joined.strip_suffix(EOW) {
            Some(stripped) => stripped.to_string(),
            None => joined,
        }
    }

    /// Show EOW as `placeholder`. Presentation only.
    pub fn display_token(token: &str, placeholder: &str) -> String {
        token.replace(EOW, placeholder)
    }
}

fn to_strings(symbols: Vec<Symbol>) -> Vec<String> {
    symbols.into_iter().map(|s| s.to_string()).collect()
}
