//! gridcypher - encode phrases as positions in a paginated letter grid
//!
//! Every reading ray of a grid (rows, columns, diagonals) is indexed in a
//! direction-aware trie. A phrase is then spelled as a sequence of runs,
//! each a start cell, a length, and a direction.

pub mod cli;
pub mod core;
pub mod cypher;
pub mod grid;
pub mod index;
pub mod output;
pub mod search;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use cypher::CypherService;
pub use grid::Grid;
pub use index::{Coordinate, Direction, Trie};
pub use search::Mode;
