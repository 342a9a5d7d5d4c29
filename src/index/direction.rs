//! Reading directions
//!
//! Each direction is an independent bit flag; flags combine with `|` into a
//! direction set. The enumeration order of [`DIRECTION_TABLE`] is the
//! tie-break order whenever several directions are queried together.
//!
//! @module index/direction

use crate::core::error::{Error, Result};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// A set of reading directions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    pub struct Direction: u8 {
        const RIGHT = 0b0000_0001;
        const LEFT = 0b0000_0010;
        const UP = 0b0000_0100;
        const DOWN = 0b0000_1000;
        const RIGHT_UP = 0b0001_0000;
        const RIGHT_DOWN = 0b0010_0000;
        const LEFT_UP = 0b0100_0000;
        const LEFT_DOWN = 0b1000_0000;
    }
}

/// Single direction, display name, and (row, col) step, in enumeration order
pub const DIRECTION_TABLE: [(Direction, &str, (isize, isize)); Direction::COUNT] = [
    (Direction::RIGHT, "right", (0, 1)),
    (Direction::LEFT, "left", (0, -1)),
    (Direction::UP, "up", (-1, 0)),
    (Direction::DOWN, "down", (1, 0)),
    (Direction::RIGHT_UP, "right-up", (-1, 1)),
    (Direction::RIGHT_DOWN, "right-down", (1, 1)),
    (Direction::LEFT_UP, "left-up", (-1, -1)),
    (Direction::LEFT_DOWN, "left-down", (1, -1)),
];

impl Direction {
    /// Number of single directions
    pub const COUNT: usize = 8;

    /// All four diagonals
    pub const DIAGONAL: Direction = Direction::RIGHT_UP
        .union(Direction::RIGHT_DOWN)
        .union(Direction::LEFT_UP)
        .union(Direction::LEFT_DOWN);

    /// The four axis-aligned directions
    pub const ORTHOGONAL: Direction = Direction::RIGHT
        .union(Direction::LEFT)
        .union(Direction::UP)
        .union(Direction::DOWN);

    /// Decompose into single directions, in enumeration order
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        DIRECTION_TABLE
            .iter()
            .map(|(dir, _, _)| *dir)
            .filter(move |dir| self.contains(*dir))
    }

    /// Position of a single direction in the enumeration order
    #[inline]
    pub fn ordinal(self) -> Option<usize> {
        DIRECTION_TABLE.iter().position(|(dir, _, _)| *dir == self)
    }

    /// (row, col) step of a single direction
    #[inline]
    pub fn step(self) -> Option<(isize, isize)> {
        self.ordinal().map(|i| DIRECTION_TABLE[i].2)
    }

    /// Display name of a single direction
    pub fn name(self) -> Option<&'static str> {
        self.ordinal().map(|i| DIRECTION_TABLE[i].1)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::empty()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (dir, name, _) in DIRECTION_TABLE.iter() {
            if self.contains(*dir) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl FromStr for Direction {
    type Err = Error;

    /// Parse a `|`- or `,`-separated list of direction names.
    /// `diagonal`, `orthogonal`, and `all` name the composite sets.
    fn from_str(s: &str) -> Result<Self> {
        let mut set = Direction::empty();
        for part in s.split(['|', ',']) {
            let name = part.trim().to_ascii_lowercase().replace('_', "-");
            let dir = match name.as_str() {
                "all" => Direction::all(),
                "diagonal" | "diag" => Direction::DIAGONAL,
                "orthogonal" => Direction::ORTHOGONAL,
                _ => DIRECTION_TABLE
                    .iter()
                    .find(|(_, n, _)| *n == name)
                    .map(|(dir, _, _)| *dir)
                    .ok_or_else(|| Error::InvalidDirection {
                        name: part.trim().to_string(),
                    })?,
            };
            set |= dir;
        }
        Ok(set)
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
