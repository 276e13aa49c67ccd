use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BpeError {
    /// The corpus contained no whitespace-separated words
    #[error("corpus contains no words")]
    EmptyCorpus,

    #[error("target vocabulary size {target} is smaller than the initial alphabet size {alphabet}")]
    InvalidTargetSize { target: usize, alphabet: usize },

    #[error("invalid trainer configuration: {0}")]
    InvalidConfig(String),

    /// Only raised by strict segmentation
    #[error("character {ch:?} in word {word:?} is not in the base alphabet")]
    UnknownCharacter { ch: char, word: String },
}

pub type Result<T> = std::result::Result<T, BpeError>;
