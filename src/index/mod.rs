//! Direction-aware trie index
//!
//! - [`direction`] - reading direction flags and their fixed order
//! - [`node`] - trie nodes and location records
//! - [`select`] - candidate selection strategies
//! - [`trie`] - building and holding the index

pub mod direction;
pub mod node;
pub mod select;
pub mod trie;

pub use direction::{Direction, DIRECTION_TABLE};
pub use node::{Coordinate, Location, Node, NodeId};
pub use select::{FirstSelector, RandomSelector, SeededSelector, Selector};
pub use trie::{Trie, TrieBuilder, TrieStats};
