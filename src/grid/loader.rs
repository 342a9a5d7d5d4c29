//! Corpus loading
//!
//! Corpus text is split on a blank line (`"\n\n"`) into pages and each page
//! on `"\n"` into rows. Rows keep their raw bytes; validation happens at
//! index build time.

use super::{Grid, Page};
use crate::core::error::{Error, Result};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Load a corpus file into a grid
pub fn load_grid(path: &Path) -> Result<Grid> {
    let start = Instant::now();
    let data = std::fs::read(path).map_err(|e| Error::CorpusError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let grid = parse_grid(&data);
    info!(
        file = %path.display(),
        pages = grid.page_count(),
        rows = grid.row_count(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Loaded corpus"
    );
    Ok(grid)
}

/// Parse corpus bytes into a grid
pub fn parse_grid(data: &[u8]) -> Grid {
    let normalized;
    let data = if data.contains(&b'\r') {
        normalized = strip_carriage_returns(data);
        &normalized[..]
    } else {
        data
    };

    let pages = split(data, b"\n\n")
        .into_iter()
        .map(|page| Page::new(split(page, b"\n").into_iter().map(<[u8]>::to_vec).collect()))
        .collect();
    Grid::new(pages)
}

/// Split on every occurrence of `sep`; always yields at least one part
fn split<'a>(data: &'a [u8], sep: &[u8]) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + sep.len() <= data.len() {
        if &data[i..i + sep.len()] == sep {
            parts.push(&data[start..i]);
            i += sep.len();
            start = i;
        } else {
            i += 1;
        }
    }
    parts.push(&data[start..]);
    parts
}

fn strip_carriage_returns(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for (i, &b) in data.iter().enumerate() {
        if b == b'\r' && data.get(i + 1) == Some(&b'\n') {
            continue;
        }
        out.push(b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pages_and_rows() {
        let grid = parse_grid(b"abc\ndef\n\nghij\nk");
        assert_eq!(grid.page_count(), 2);
        assert_eq!(grid.pages()[0].rows(), &[b"abc".to_vec(), b"def".to_vec()]);
        assert_eq!(grid.pages()[1].rows(), &[b"ghij".to_vec(), b"k".to_vec()]);
    }

    #[test]
    fn test_trailing_newline_gives_empty_row() {
        let grid = parse_grid(b"abc\n");
        assert_eq!(grid.page_count(), 1);
        assert_eq!(grid.pages()[0].rows(), &[b"abc".to_vec(), Vec::new()]);
        assert_eq!(grid.cell_count(), 3);
    }

    #[test]
    fn test_crlf() {
        let grid = parse_grid(b"ab\r\ncd\r\n\r\nef");
        assert_eq!(grid.page_count(), 2);
        assert_eq!(grid.pages()[0].rows(), &[b"ab".to_vec(), b"cd".to_vec()]);
        assert_eq!(grid.pages()[1].rows(), &[b"ef".to_vec()]);
    }

    #[test]
    fn test_split_edges() {
        assert_eq!(split(b"", b"\n\n"), vec![&b""[..]]);
        assert_eq!(split(b"a\n\n\nb", b"\n\n"), vec![&b"a"[..], &b"\nb"[..]]);
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("source.txt");
        std::fs::write(&path, "fgh\nabc\n\nxyz").unwrap();

        let grid = load_grid(&path).unwrap();
        assert_eq!(grid.page_count(), 2);
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = load_grid(&temp.path().join("nope.txt"));
        assert!(matches!(result, Err(Error::CorpusError { .. })));
    }
}
