//! Direction-aware trie over every reading ray of a grid
//!
//! Every cell of every row is the start of one ray per indexed direction.
//! Each ray is walked into the trie one letter at a time, and a location is
//! recorded at *every* depth, so all prefixes of every ray are searchable.
//!
//! Nodes live in a flat arena addressed by [`NodeId`]; the root is node 0
//! and never owns a location. A built [`Trie`] is immutable and cheap to
//! clone: clones share the arena and may carry a different [`Selector`].
//!
//! @module index/trie

use super::direction::Direction;
use super::node::{letter_index, Location, Node, NodeId};
use super::select::{choose, FirstSelector, Selector};
use crate::core::error::{Error, Result};
use crate::grid::Grid;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

const ROOT: NodeId = 0;

// =============================================================================
// BUILDER
// =============================================================================

/// Mutable trie under construction
#[derive(Debug, Clone)]
pub struct TrieBuilder {
    nodes: Vec<Node>,
    directions: Direction,
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrieBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
            directions: Direction::empty(),
        }
    }

    /// Insert one ray of `letters` starting at (page, row, col), read along
    /// a single `direction`
    pub fn insert_ray(
        &mut self,
        direction: Direction,
        page: usize,
        row: usize,
        col: usize,
        letters: &[u8],
    ) -> Result<()> {
        let (dr, dc) = single_step(direction)?;
        // A cell that would lie before the grid origin is reported at the
        // ray start.
        let cells = letters.iter().enumerate().map(|(k, &b)| {
            let k = k as isize;
            match (row.checked_add_signed(dr * k), col.checked_add_signed(dc * k)) {
                (Some(r), Some(c)) => (r, c, b),
                _ => (row, col, b),
            }
        });
        self.insert_cells(direction, page, row, col, cells)
    }

    /// Insert every suffix of `letters` as a ray starting at columns 0..n
    pub fn insert_row(
        &mut self,
        direction: Direction,
        page: usize,
        row: usize,
        letters: &[u8],
    ) -> Result<()> {
        for col in 0..letters.len() {
            self.insert_ray(direction, page, row, col, &letters[col..])?;
        }
        Ok(())
    }

    /// Index every ray of `grid` for each direction in `set`.
    ///
    /// Order is page, row, column, then direction; that order is the
    /// insertion order of every per-direction location list.
    pub fn insert_grid(&mut self, grid: &Grid, set: Direction) -> Result<()> {
        let steps: Vec<(Direction, (isize, isize))> = set
            .directions()
            .filter_map(|dir| dir.step().map(|step| (dir, step)))
            .collect();

        for (p, page) in grid.pages().iter().enumerate() {
            for (r, row) in page.rows().iter().enumerate() {
                for c in 0..row.len() {
                    for &(dir, step) in &steps {
                        self.insert_cells(dir, p, r, c, page.ray(r, c, step))?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk `cells` from the root, creating children as needed and recording
    /// a location of length k at the node reached after the k-th cell
    fn insert_cells<I>(
        &mut self,
        direction: Direction,
        page: usize,
        row: usize,
        col: usize,
        cells: I,
    ) -> Result<()>
    where
        I: Iterator<Item = (usize, usize, u8)>,
    {
        let mut current = ROOT as usize;
        for (depth, (cell_row, cell_col, byte)) in cells.enumerate() {
            let letter = letter_index(byte).ok_or_else(|| Error::InvalidCharacter {
                character: byte as char,
                page,
                row: cell_row,
                col: cell_col,
            })?;

            current = match self.nodes[current].child(letter) {
                Some(id) => id as usize,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(Node::new());
                    self.nodes[current].set_child(letter, id as NodeId);
                    id
                }
            };

            self.nodes[current].add_location(direction, Location::new(page, row, col, depth + 1));
        }
        self.directions |= direction;
        Ok(())
    }

    /// Freeze into a shareable trie using the first-candidate strategy
    pub fn finish(self) -> Trie {
        Trie {
            nodes: Arc::from(self.nodes),
            directions: self.directions,
            selector: Arc::new(FirstSelector),
        }
    }
}

fn single_step(direction: Direction) -> Result<(isize, isize)> {
    direction.step().ok_or_else(|| Error::InvalidDirection {
        name: direction.to_string(),
    })
}

// =============================================================================
// TRIE
// =============================================================================

/// Immutable direction-aware trie
#[derive(Clone)]
pub struct Trie {
    nodes: Arc<[Node]>,
    /// Directions with at least one inserted ray
    directions: Direction,
    selector: Arc<dyn Selector>,
}

impl Trie {
    /// Build a trie over every ray of `grid` in each direction of `set`.
    ///
    /// Fails with [`Error::InvalidCharacter`] if any traversed cell is not a
    /// letter; no partial trie is returned.
    pub fn build(grid: &Grid, set: Direction) -> Result<Trie> {
        let start = Instant::now();

        if !set.is_empty() {
            grid.validate()?;
        }

        let mut builder = TrieBuilder::new();
        builder.insert_grid(grid, set)?;
        let mut trie = builder.finish();
        // Directions were requested even if the grid held no cells for them.
        trie.directions |= set;

        let stats = trie.stats();
        info!(
            directions = %set,
            pages = grid.page_count(),
            nodes = stats.nodes,
            locations = stats.locations,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Built trie"
        );
        Ok(trie)
    }

    /// A trie sharing this one's nodes but choosing candidates with `selector`
    pub fn with_selector(&self, selector: Arc<dyn Selector>) -> Trie {
        Trie {
            nodes: Arc::clone(&self.nodes),
            directions: self.directions,
            selector,
        }
    }

    pub fn set_selector(&mut self, selector: Arc<dyn Selector>) {
        debug!("Replaced trie selection strategy");
        self.selector = selector;
    }

    pub fn selector(&self) -> &dyn Selector {
        self.selector.as_ref()
    }

    /// Handle to the strategy, for carrying it over to a rebuilt trie
    pub fn shared_selector(&self) -> Arc<dyn Selector> {
        Arc::clone(&self.selector)
    }

    /// Pick one of `candidates` with this trie's strategy, clamped in range
    #[inline]
    pub fn choose(&self, candidates: usize) -> usize {
        choose(self.selector.as_ref(), candidates)
    }

    /// Directions this trie was built for
    pub fn directions(&self) -> Direction {
        self.directions
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.nodes[ROOT as usize]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when both tries hold the same nodes and locations in the same order
    pub fn same_index(&self, other: &Trie) -> bool {
        self.directions == other.directions && self.nodes[..] == other.nodes[..]
    }

    pub fn stats(&self) -> TrieStats {
        let mut per_direction: Vec<(Direction, usize)> =
            Direction::all().directions().map(|d| (d, 0)).collect();
        for node in self.nodes.iter() {
            for (dir, count) in per_direction.iter_mut() {
                *count += node.locations(*dir).len();
            }
        }
        per_direction.retain(|(dir, _)| self.directions.contains(*dir));

        TrieStats {
            directions: self.directions,
            nodes: self.nodes.len(),
            locations: per_direction.iter().map(|(_, n)| n).sum(),
            per_direction,
        }
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("directions", &self.directions)
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Size summary of a built trie
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrieStats {
    pub directions: Direction,
    pub nodes: usize,
    pub locations: usize,
    pub per_direction: Vec<(Direction, usize)>,
}

impl fmt::Display for TrieStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trie Statistics:")?;
        writeln!(f, "  Directions:   {}", self.directions)?;
        writeln!(f, "  Nodes:        {:>8}", self.nodes)?;
        writeln!(f, "  Locations:    {:>8}", self.locations)?;
        for (dir, count) in &self.per_direction {
            writeln!(f, "    {:<12}{:>8}", dir.to_string(), count)?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
