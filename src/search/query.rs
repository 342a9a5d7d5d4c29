//! Query preprocessing and execution

use crate::core::error::Result;
use crate::index::{Direction, Trie};
use crate::search::results::CypherResponse;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::debug;

static NON_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z]+").unwrap());

/// Remove everything but ASCII letters from raw user input
pub fn normalize_query(raw: &str) -> String {
    NON_LETTERS.replace_all(raw, "").into_owned()
}

/// Reconstruction strategy
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Longest indexed substring first, then the text around it
    #[default]
    Longest,
    /// Greedy longest prefix, left to right
    Ltr,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Longest => f.write_str("longest"),
            Mode::Ltr => f.write_str("ltr"),
        }
    }
}

/// A phrase to encode with its options
#[derive(Debug, Clone)]
pub struct CypherQuery {
    /// Raw text as given by the user
    pub text: String,
    pub directions: Direction,
    pub mode: Mode,
}

impl CypherQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            directions: Direction::RIGHT,
            mode: Mode::default(),
        }
    }

    pub fn with_directions(mut self, directions: Direction) -> Self {
        self.directions = directions;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// The phrase actually reconstructed: letters only
    pub fn phrase(&self) -> String {
        normalize_query(&self.text)
    }

    /// Reconstruct the phrase against a built trie
    pub fn execute(&self, trie: &Trie) -> Result<CypherResponse> {
        let start = Instant::now();
        let phrase = self.phrase();

        let runs = trie.construct(&phrase, self.directions, self.mode)?;

        let elapsed = start.elapsed();
        debug!(
            query = %self.text,
            runs = runs.len(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Cypher completed"
        );

        Ok(CypherResponse {
            query: self.text.clone(),
            phrase,
            mode: self.mode,
            directions: self.directions,
            runs,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        })
    }
}
