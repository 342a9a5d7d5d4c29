//! Output formatting
//!
//! All positions are zero-based until they reach this module; display
//! offsets are added here and nowhere else.

pub mod human;
pub mod json;

use crate::cli::OutputFormat;
use crate::core::config::DisplayConfig;
use crate::grid::Grid;
use crate::index::{Coordinate, Direction, TrieStats};
use crate::search::{CypherResponse, SearchHit};
use serde::Serialize;

/// A run as shown to the user: offsets applied, letters spelled out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRun {
    pub page: i64,
    pub row: i64,
    pub col: i64,
    pub len: usize,
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letters: Option<String>,
}

impl DisplayRun {
    pub fn new(coord: &Coordinate, grid: &Grid, display: &DisplayConfig) -> Self {
        Self {
            page: coord.page as i64 + display.page_offset,
            row: coord.row as i64 + display.row_offset,
            col: coord.col as i64 + display.col_offset,
            len: coord.len,
            direction: coord.direction,
            letters: grid.spell(coord),
        }
    }
}

pub fn display_runs(runs: &[Coordinate], grid: &Grid, display: &DisplayConfig) -> Vec<DisplayRun> {
    runs.iter()
        .map(|coord| DisplayRun::new(coord, grid, display))
        .collect()
}

/// Format an encoded phrase
pub fn format_cypher(
    response: &CypherResponse,
    grid: &Grid,
    display: &DisplayConfig,
    format: OutputFormat,
) -> String {
    let runs = display_runs(&response.runs, grid, display);
    match format {
        OutputFormat::Compact => human::compact(&runs),
        OutputFormat::Table => human::cypher_table(response, &runs),
        OutputFormat::Json => json::cypher(response, runs),
    }
}

/// Format a prefix search
pub fn format_search(
    term: &str,
    hit: &SearchHit,
    grid: &Grid,
    display: &DisplayConfig,
    format: OutputFormat,
) -> String {
    let runs = display_runs(&hit.candidates, grid, display);
    match format {
        OutputFormat::Compact => human::compact(&runs),
        OutputFormat::Table => human::search_table(term, hit.matched, &runs),
        OutputFormat::Json => json::search(term, hit.matched, runs),
    }
}

/// Format corpus and trie statistics
pub fn format_stats(grid: &Grid, stats: &TrieStats, as_json: bool) -> String {
    if as_json {
        json::stats(grid, stats)
    } else {
        human::stats(grid, stats)
    }
}
