//! Trie nodes and location records
//!
//! @module index/node

use super::direction::Direction;
use serde::{Deserialize, Serialize};

/// Index of a node in the trie's node arena
pub type NodeId = u32;

/// Letters indexed per node (a-z)
pub const ALPHABET: usize = 26;

/// Map a byte to its child slot, folding case. `None` for non-letters.
#[inline]
pub fn letter_index(byte: u8) -> Option<usize> {
    if byte.is_ascii_alphabetic() {
        Some((byte.to_ascii_lowercase() - b'a') as usize)
    } else {
        None
    }
}

/// Reading `len` characters from (page, row, col) spells the owning node's
/// letter sequence. The direction is implied by which list holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub page: usize,
    pub row: usize,
    pub col: usize,
    pub len: usize,
}

/// A location tagged with the direction it is read in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub page: usize,
    pub row: usize,
    pub col: usize,
    pub len: usize,
    pub direction: Direction,
}

impl Location {
    #[inline]
    pub fn new(page: usize, row: usize, col: usize, len: usize) -> Self {
        Self {
            page,
            row,
            col,
            len,
        }
    }

    #[inline]
    pub fn tagged(self, direction: Direction) -> Coordinate {
        Coordinate {
            page: self.page,
            row: self.row,
            col: self.col,
            len: self.len,
            direction,
        }
    }
}

/// One trie node per reachable letter sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    children: [Option<NodeId>; ALPHABET],
    /// Directions with at least one location at this node
    directions: Direction,
    /// Per-direction locations in insertion order, indexed by direction ordinal
    locations: [Vec<Location>; Direction::COUNT],
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn child(&self, letter: usize) -> Option<NodeId> {
        self.children.get(letter).copied().flatten()
    }

    #[inline]
    pub(crate) fn set_child(&mut self, letter: usize, id: NodeId) {
        self.children[letter] = Some(id);
    }

    #[inline]
    pub fn directions(&self) -> Direction {
        self.directions
    }

    /// Locations recorded for a single direction
    pub fn locations(&self, direction: Direction) -> &[Location] {
        match direction.ordinal() {
            Some(i) => &self.locations[i],
            None => &[],
        }
    }

    /// Record a location reached along a single direction
    pub(crate) fn add_location(&mut self, direction: Direction, location: Location) {
        if let Some(i) = direction.ordinal() {
            self.directions |= direction;
            self.locations[i].push(location);
        }
    }

    /// All locations for the requested directions, concatenated in direction
    /// enumeration order and tagged with their direction
    pub fn locations_for(&self, set: Direction) -> Vec<Coordinate> {
        set.directions()
            .flat_map(|dir| self.locations(dir).iter().map(move |loc| loc.tagged(dir)))
            .collect()
    }

    /// Total locations across all directions
    pub fn location_count(&self) -> usize {
        self.locations.iter().map(Vec::len).sum()
    }
}
