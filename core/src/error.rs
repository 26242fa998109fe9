use std::path::PathBuf;
use thiserror::Error;

/// Failure to reconstruct an index from its text file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open index file {path}: {source}")]
    Open { path: PathBuf, source: std::io::Error },

    #[error("error reading index: {0}")]
    Read(#[from] std::io::Error),

    #[error("line {line}: {word:?} is not a lowercase alphabetic word")]
    InvalidWord { line: usize, word: String },

    #[error("line {line}: {token:?} is not a valid {what}")]
    InvalidNumber { line: usize, token: String, what: &'static str },

    #[error("line {line}: word {word:?} is followed by an odd number of integers")]
    UnpairedCount { line: usize, word: String },
}

impl LoadError {
    /// True when the file could not be opened or read, as opposed to being malformed.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, LoadError::Open { .. } | LoadError::Read(_))
    }
}

/// A query line that breaks the AND/OR syntax.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("empty query")]
    Empty,

    #[error("'{0}' cannot be first")]
    LeadingOperator(String),

    #[error("'{0}' cannot be last")]
    TrailingOperator(String),

    #[error("'{0}' and '{1}' cannot be adjacent")]
    AdjacentOperators(String, String),
}

#[derive(Error, Debug)]
pub enum PageDirError {
    #[error("{0} is not a crawler directory")]
    NotCrawlerDirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
