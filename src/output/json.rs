//! JSON output formatting

use super::DisplayRun;
use crate::grid::Grid;
use crate::index::TrieStats;
use crate::search::CypherResponse;
use serde::Serialize;

#[derive(Serialize)]
struct CypherOutput<'a> {
    query: &'a str,
    phrase: &'a str,
    mode: crate::search::Mode,
    directions: crate::index::Direction,
    runs: Vec<DisplayRun>,
    elapsed_ms: f64,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    term: &'a str,
    matched: usize,
    candidates: Vec<DisplayRun>,
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    pages: usize,
    rows: usize,
    cells: usize,
    trie: &'a TrieStats,
}

fn to_json<T: Serialize>(value: &T) -> String {
    let mut out = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize results: {}"}}"#, e));
    out.push('\n');
    out
}

/// Runs carry display offsets, unlike the raw response
pub fn cypher(response: &CypherResponse, runs: Vec<DisplayRun>) -> String {
    to_json(&CypherOutput {
        query: &response.query,
        phrase: &response.phrase,
        mode: response.mode,
        directions: response.directions,
        runs,
        elapsed_ms: response.elapsed_ms,
    })
}

pub fn search(term: &str, matched: usize, candidates: Vec<DisplayRun>) -> String {
    to_json(&SearchOutput {
        term,
        matched,
        candidates,
    })
}

pub fn stats(grid: &Grid, stats: &TrieStats) -> String {
    to_json(&StatsOutput {
        pages: grid.page_count(),
        rows: grid.row_count(),
        cells: grid.cell_count(),
        trie: stats,
    })
}
