//! Learn a subword vocabulary from a text corpus with byte-pair-encoding
//! merges, then segment new text with the learned merges.
//!
//! ```
//! use bpe_subword::Tokenizer;
//!
//! let tokenizer = Tokenizer::train("low low low lower lowest", 100).unwrap();
//! assert_eq!(tokenizer.segment("lowest"), vec!["lowe", "s", "t", " "]);
//! ```

pub mod corpus;
pub mod error;
pub mod merge;
pub mod segmenter;
pub mod tokenizer;
pub mod trainer;
pub mod vocab;

pub use corpus::{split_words, word_symbols, Corpus, WordEntry};
pub use error::{BpeError, Result};
pub use segmenter::{Segmenter, UnknownCharPolicy};
pub use tokenizer::Tokenizer;
pub use trainer::{
    count_pairs, select_best_pair, Pair, StopReason, Trainer, TrainerOptions, TrainingProgress,
    TrainingResult,
};
pub use vocab::{MergeRule, Symbol, Vocabulary, EOW};
