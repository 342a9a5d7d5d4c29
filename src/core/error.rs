//! Error types for gridcypher

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using gridcypher's Error
pub type Result<T> = std::result::Result<T, Error>;

/// gridcypher error types
#[derive(Error, Debug)]
pub enum Error {
    /// A grid cell reached during indexing is not an ASCII letter.
    /// Fatal to the whole build; no partial index is produced.
    #[error("Invalid character {character:?} in source at page {page}, row {row}, column {col}")]
    InvalidCharacter {
        character: char,
        page: usize,
        row: usize,
        col: usize,
    },

    #[error("Phrase is empty after stripping")]
    EmptyPhrase,

    #[error("Letter {letter:?} not found (phrase offset {position})")]
    LetterNotFound { letter: char, position: usize },

    #[error("Unable to complete phrase {phrase:?}")]
    PhraseUnmatchable { phrase: String },

    #[error("Unknown direction: {name}")]
    InvalidDirection { name: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Corpus error ({path}): {message}")]
    CorpusError { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// True for failures of a single reconstruction request (as opposed to
    /// build, configuration, or I/O failures)
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyPhrase | Error::LetterNotFound { .. } | Error::PhraseUnmatchable { .. }
        )
    }
}
