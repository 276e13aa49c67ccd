use crate::corpus::Corpus;
use crate::error::{BpeError, Result};
use crate::merge::merge_pair;
use crate::vocab::{MergeRule, Symbol, Vocabulary};
use std::collections::HashMap;

pub type Pair = (Symbol, Symbol);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerOptions {
    /// Training stops once the vocabulary reaches this many symbols.
    pub target_vocab_size: usize,

    /// Pairs seen fewer times than this are never merged.
    pub min_pair_frequency: usize,

    /// Log progress every this many merges.
    pub log_interval: usize,
}

impl TrainerOptions {
    pub fn new(target_vocab_size: usize) -> Self {
        Self {
            target_vocab_size,
            min_pair_frequency: 2,
            log_interval: 100,
        }
    }

    pub fn with_target_vocab_size(self, target_vocab_size: usize) -> Self {
        Self {
            target_vocab_size,
            ..self
        }
    }

    pub fn with_min_pair_frequency(self, min_pair_frequency: usize) -> Self {
        Self {
            min_pair_frequency,
            ..self
        }
    }

    pub fn with_log_interval(self, log_interval: usize) -> Self {
        Self {
            log_interval,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_pair_frequency == 0 {
            return Err(BpeError::InvalidConfig(
                "min_pair_frequency must be at least 1".to_string(),
            ));
        }
        if self.log_interval == 0 {
            return Err(BpeError::InvalidConfig(
                "log_interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The vocabulary reached the target size
    TargetReached,
    /// No pair occurs often enough to merge
    Exhausted,
}

/// Passed to the progress callback after every merge.
#[derive(Debug)]
pub struct TrainingProgress<'a> {
    /// Number of merges done so far, starting at 1
    pub iteration: usize,
    /// Target vocabulary size
    pub target: usize,
    pub rule: &'a MergeRule,
    pub vocabulary: &'a Vocabulary,
    pub corpus: &'a Corpus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingResult {
    pub vocabulary: Vocabulary,
    pub rules: Vec<MergeRule>,
    pub stop_reason: StopReason,
}

/// Sum, over every word, the word count for each adjacent symbol pair.
pub fn count_pairs(corpus: &Corpus) -> HashMap<Pair, usize> {
    let mut counts: HashMap<Pair, usize> = HashMap::new();
    for entry in corpus.entries() {
        for w in entry.symbols.windows(2) {
            *counts.entry((w[0].clone(), w[1].clone())).or_insert(0) += entry.count;
        }
    }
    counts
}

/// The most frequent pair. Ties go to the lexicographically smallest
/// `(left, right)`, so the result never depends on hash order.
pub fn select_best_pair(counts: &HashMap<Pair, usize>) -> Option<(Pair, usize)> {
    counts
        .iter()
        .max_by(|(pair_a, count_a), (pair_b, count_b)| {
            count_a.cmp(count_b).then_with(|| pair_b.cmp(pair_a))
        })
        .map(|(pair, &count)| (pair.clone(), count))
}

pub struct Trainer {
    pub options: TrainerOptions,
}

impl Trainer {
    pub fn new(options: TrainerOptions) -> Self {
        Self { options }
    }

    pub fn train(&self, text: &str) -> Result<TrainingResult> {
        self.train_with_progress(text, |_| {})
    }

    /// Learn merges from `text` until the target size is reached or no pair
    /// is frequent enough. `progress` is called once per merge.
    pub fn train_with_progress<F>(&self, text: &str, mut progress: F) -> Result<TrainingResult>
    where
        F: FnMut(&TrainingProgress<'_>),
    {
        self.options.validate()?;
        let target = self.options.target_vocab_size;

        let (mut corpus, mut vocabulary) = Corpus::build(text)?;
        if target < vocabulary.alphabet_len() {
            return Err(BpeError::InvalidTargetSize {
                target,
                alphabet: vocabulary.alphabet_len(),
            });
        }

        log::info!(
            "Starting BPE training: {} distinct words, {} total, alphabet of {}, target vocabulary {}",
            corpus.len(),
            corpus.total_words(),
            vocabulary.alphabet_len(),
            target
        );

        let mut rules: Vec<MergeRule> =
            Vec::with_capacity((target - vocabulary.len()).min(corpus.symbol_count()));
        let stop_reason = loop {
            if vocabulary.len() >= target {
                break StopReason::TargetReached;
            }

            let counts = count_pairs(&corpus);
            let ((left, right), frequency) = match select_best_pair(&counts) {
                Some(best) if best.1 >= self.options.min_pair_frequency => best,
                _ => break StopReason::Exhausted,
            };

            let rule = MergeRule::new(left, right, rules.len(), frequency);
            if !vocabulary.insert(rule.result.clone()) {
                log::debug!("merge result {:?} is already in the vocabulary", rule.result);
            }
            for entry in corpus.entries_mut() {
                merge_pair(&mut entry.symbols, &rule.left, &rule.right, &rule.result);
            }
            log::debug!("{}", rule);
            rules.push(rule);

            let iteration = rules.len();
            if iteration % self.options.log_interval == 0 {
                log::info!(
                    "Merged {} pairs, vocabulary size {} of {}",
                    iteration,
                    vocabulary.len(),
                    target
                );
            }

            if let Some(rule) = rules.last() {
                progress(&TrainingProgress {
                    iteration,
                    target,
                    rule,
                    vocabulary: &vocabulary,
                    corpus: &corpus,
                });
            }
        };

        log::info!(
            "Finished training: {} merges, vocabulary size {} ({:?})",
            rules.len(),
            vocabulary.len(),
            stop_reason
        );

        Ok(TrainingResult {
            vocabulary,
            rules,
            stop_reason,
        })
    }
}
