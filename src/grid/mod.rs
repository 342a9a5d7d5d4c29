//! Paginated character grid
//!
//! A [`Grid`] is an ordered list of pages, each an ordered list of rows of
//! raw bytes. Rows within a page may have different lengths, so every bounds
//! check is made against the specific row being read.
//!
//! @module grid

pub mod loader;

use crate::core::error::{Error, Result};
use crate::index::Coordinate;
use rayon::prelude::*;

pub use loader::{load_grid, parse_grid};

/// One page of the corpus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    rows: Vec<Vec<u8>>,
}

/// The full corpus, immutable once loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    pages: Vec<Page>,
}

impl Page {
    pub fn new(rows: Vec<Vec<u8>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Walk from (row, col) by `step` until leaving the page
    pub fn ray(&self, row: usize, col: usize, step: (isize, isize)) -> Ray<'_> {
        Ray {
            page: self,
            row: row as isize,
            col: col as isize,
            step,
            done: false,
        }
    }
}

impl Grid {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Single-page grid from a list of rows
    pub fn from_rows<S: AsRef<[u8]>>(rows: &[S]) -> Self {
        Self::new(vec![Page::new(
            rows.iter().map(|r| r.as_ref().to_vec()).collect(),
        )])
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, page: usize) -> Option<&Page> {
        self.pages.get(page)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn row_count(&self) -> usize {
        self.pages.iter().map(Page::row_count).sum()
    }

    pub fn cell_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| p.rows.iter())
            .map(Vec::len)
            .sum()
    }

    /// The maximal byte sequence read from (page, row, col) along `step`.
    /// Empty when the start is out of bounds.
    pub fn ray(&self, page: usize, row: usize, col: usize, step: (isize, isize)) -> Vec<u8> {
        match self.pages.get(page) {
            Some(p) => p.ray(row, col, step).map(|(_, _, b)| b).collect(),
            None => Vec::new(),
        }
    }

    /// Check every cell is an ASCII letter, reporting the first offender in
    /// page/row/column order
    pub fn validate(&self) -> Result<()> {
        let invalid = self
            .pages
            .par_iter()
            .enumerate()
            .find_map_first(|(p, page)| {
                page.rows.iter().enumerate().find_map(|(r, row)| {
                    row.iter()
                        .position(|b| !b.is_ascii_alphabetic())
                        .map(|c| (p, r, c, row[c]))
                })
            });

        match invalid {
            Some((page, row, col, byte)) => Err(Error::InvalidCharacter {
                character: byte as char,
                page,
                row,
                col,
            }),
            None => Ok(()),
        }
    }

    /// Read a coordinate back out of the grid as lowercase letters.
    /// `None` if the run leaves the grid before `len` characters.
    pub fn spell(&self, coord: &Coordinate) -> Option<String> {
        let step = coord.direction.step()?;
        let page = self.pages.get(coord.page)?;
        let letters: Vec<u8> = page
            .ray(coord.row, coord.col, step)
            .take(coord.len)
            .map(|(_, _, b)| b.to_ascii_lowercase())
            .collect();
        if letters.len() != coord.len {
            return None;
        }
        String::from_utf8(letters).ok()
    }
}

/// Iterator over the cells of a ray, yielding (row, col, byte)
#[derive(Debug, Clone)]
pub struct Ray<'a> {
    page: &'a Page,
    row: isize,
    col: isize,
    step: (isize, isize),
    done: bool,
}

impl Iterator for Ray<'_> {
    type Item = (usize, usize, u8);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.row < 0 || self.col < 0 {
            self.done = true;
            return None;
        }
        let (row, col) = (self.row as usize, self.col as usize);
        match self.page.get(row, col) {
            Some(byte) => {
                self.row += self.step.0;
                self.col += self.step.1;
                Some((row, col, byte))
            }
            None => {
                // A later row may be long enough again; the ray still ends here.
                self.done = true;
                None
            }
        }
    }
}
