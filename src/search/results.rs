use crate::index::{Coordinate, Direction};
use crate::search::Mode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CypherResponse {
    /// Raw input
    pub query: String,
    /// Letters actually encoded
    pub phrase: String,
    pub mode: Mode,
    pub directions: Direction,
    /// Zero-based runs in phrase order
    pub runs: Vec<Coordinate>,
    pub elapsed_ms: f64,
}

impl CypherResponse {
    /// Letters covered by all runs
    pub fn total_len(&self) -> usize {
        self.runs.iter().map(|run| run.len).sum()
    }

    /// Distinct directions the runs are read in
    pub fn used_directions(&self) -> Direction {
        self.runs
            .iter()
            .fold(Direction::empty(), |acc, run| acc | run.direction)
    }
}
