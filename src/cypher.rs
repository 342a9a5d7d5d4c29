//! Long-lived cypher service
//!
//! Owns a loaded grid and the trie currently serving queries. A change of
//! direction set builds a whole new trie and swaps it in; callers already
//! holding the previous `Arc<Trie>` finish against it undisturbed.

use crate::core::error::Result;
use crate::grid::{load_grid, Grid};
use crate::index::{Direction, Selector, Trie, TrieStats};
use crate::search::{CypherQuery, CypherResponse, Mode, SearchHit};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub struct CypherService {
    grid: Arc<Grid>,
    trie: RwLock<Arc<Trie>>,
}

impl CypherService {
    /// Build the initial trie over `grid` for `directions`
    pub fn new(grid: Grid, directions: Direction) -> Result<Self> {
        let trie = Trie::build(&grid, directions)?;
        Ok(Self {
            grid: Arc::new(grid),
            trie: RwLock::new(Arc::new(trie)),
        })
    }

    /// Load a corpus file and build over it
    pub fn open(path: &Path, directions: Direction) -> Result<Self> {
        let grid = load_grid(path)?;
        Self::new(grid, directions)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Snapshot of the trie currently in use
    pub fn trie(&self) -> Arc<Trie> {
        self.trie.read().clone()
    }

    pub fn directions(&self) -> Direction {
        self.trie.read().directions()
    }

    pub fn stats(&self) -> TrieStats {
        self.trie().stats()
    }

    /// Rebuild for exactly `directions` and swap the result in.
    /// On failure the current trie stays in service.
    pub fn set_directions(&self, directions: Direction) -> Result<Arc<Trie>> {
        let selector = self.trie.read().shared_selector();
        let rebuilt = Arc::new(Trie::build(&self.grid, directions)?.with_selector(selector));

        *self.trie.write() = Arc::clone(&rebuilt);
        info!(directions = %directions, "Swapped in rebuilt trie");
        Ok(rebuilt)
    }

    /// Replace the selection strategy without rebuilding
    pub fn set_selector(&self, selector: Arc<dyn Selector>) {
        let mut guard = self.trie.write();
        let swapped = guard.with_selector(selector);
        *guard = Arc::new(swapped);
        debug!("Swapped trie selection strategy");
    }

    /// A trie covering `directions`, rebuilding if any are not indexed
    fn trie_for(&self, directions: Direction) -> Result<Arc<Trie>> {
        let current = self.trie();
        if current.directions().contains(directions) {
            return Ok(current);
        }
        debug!(
            indexed = %current.directions(),
            requested = %directions,
            "Requested directions not indexed, rebuilding"
        );
        self.set_directions(directions)
    }

    /// Encode raw user text: strip non-letters, then reconstruct
    pub fn encode(&self, text: &str, directions: Direction, mode: Mode) -> Result<CypherResponse> {
        let trie = self.trie_for(directions)?;
        CypherQuery::new(text)
            .with_directions(directions)
            .with_mode(mode)
            .execute(&trie)
    }

    /// Longest indexed prefix of `term`
    pub fn search(&self, term: &str, directions: Direction) -> Result<SearchHit> {
        let trie = self.trie_for(directions)?;
        Ok(trie.search(term, directions))
    }
}
