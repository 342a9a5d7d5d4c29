//! Human-readable output formatting

use super::DisplayRun;
use crate::grid::Grid;
use crate::index::TrieStats;
use crate::search::CypherResponse;

/// `page row col len` per run, space separated, on one line
pub fn compact(runs: &[DisplayRun]) -> String {
    let parts: Vec<String> = runs
        .iter()
        .map(|run| format!("{} {} {} {}", run.page, run.row, run.col, run.len))
        .collect();
    format!("{}\n", parts.join(" "))
}

fn table_rows(output: &mut String, runs: &[DisplayRun]) {
    output.push_str(&format!(
        "  {:>3}  {:>5}  {:>5}  {:>5}  {:>4}  {:<11} {}\n",
        "#", "page", "row", "col", "len", "direction", "letters"
    ));
    for (i, run) in runs.iter().enumerate() {
        output.push_str(&format!(
            "  {:>3}  {:>5}  {:>5}  {:>5}  {:>4}  {:<11} {}\n",
            i + 1,
            run.page,
            run.row,
            run.col,
            run.len,
            run.direction.to_string(),
            run.letters.as_deref().unwrap_or("?")
        ));
    }
}

pub fn cypher_table(response: &CypherResponse, runs: &[DisplayRun]) -> String {
    let mut output = format!(
        "Encoded '{}' in {} runs ({}, {:.1}ms)\n\n",
        response.phrase,
        runs.len(),
        response.mode,
        response.elapsed_ms
    );
    table_rows(&mut output, runs);
    output
}

pub fn search_table(term: &str, matched: usize, runs: &[DisplayRun]) -> String {
    if matched == 0 {
        return format!("No indexed prefix of '{}'\n", term);
    }

    let mut output = format!(
        "Matched {} of {} letters of '{}' at {} locations\n\n",
        matched,
        term.len(),
        term,
        runs.len()
    );
    table_rows(&mut output, runs);
    output
}

pub fn stats(grid: &Grid, stats: &TrieStats) -> String {
    format!(
        "Corpus:\n  Pages:        {:>8}\n  Rows:         {:>8}\n  Cells:        {:>8}\n\n{}",
        grid.page_count(),
        grid.row_count(),
        grid.cell_count(),
        stats
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Direction;

    fn run(page: i64, row: i64, col: i64, len: usize) -> DisplayRun {
        DisplayRun {
            page,
            row,
            col,
            len,
            direction: Direction::RIGHT,
            letters: Some("ab".to_string()),
        }
    }

    #[test]
    fn test_compact() {
        let runs = vec![run(1, 2, 3, 3), run(1, 3, 3, 2)];
        assert_eq!(compact(&runs), "1 2 3 3 1 3 3 2\n");
    }

    #[test]
    fn test_search_table() {
        let table = search_table("abz", 2, &[run(1, 1, 1, 2)]);
        assert!(table.starts_with("Matched 2 of 3 letters of 'abz' at 1 locations"));
        assert!(table.contains("right"));
        assert!(table.contains(" ab\n"));

        assert_eq!(search_table("zz", 0, &[]), "No indexed prefix of 'zz'\n");
    }
}
