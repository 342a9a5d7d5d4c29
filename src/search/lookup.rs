//! Longest indexed prefix search

use crate::index::node::letter_index;
use crate::index::{Coordinate, Direction, Trie};

/// Result of walking a term into the trie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHit {
    /// How many leading characters of the term were matched
    pub matched: usize,
    /// Every location spelling those characters in the requested directions
    pub candidates: Vec<Coordinate>,
}

impl Trie {
    /// Find the longest prefix of `term` readable in any direction of `set`,
    /// with all of its candidate locations.
    ///
    /// The walk stops before a character whose child is missing, or whose
    /// child has no locations in `set`.
    pub fn search(&self, term: &str, set: Direction) -> SearchHit {
        self.search_bytes(term.as_bytes(), set)
    }

    pub fn search_bytes(&self, term: &[u8], set: Direction) -> SearchHit {
        let mut current = self.root();
        for (i, &byte) in term.iter().enumerate() {
            let next = letter_index(byte)
                .and_then(|letter| current.child(letter))
                .map(|id| self.node(id));

            match next {
                Some(node) if node.directions().intersects(set) => current = node,
                _ => {
                    return SearchHit {
                        matched: i,
                        candidates: current.locations_for(set),
                    }
                }
            }
        }

        SearchHit {
            matched: term.len(),
            candidates: current.locations_for(set),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::index::TrieBuilder;

    fn right_trie(rows: &[&str]) -> Trie {
        let mut builder = TrieBuilder::new();
        for (i, row) in rows.iter().enumerate() {
            builder
                .insert_row(Direction::RIGHT, 0, i, row.as_bytes())
                .unwrap();
        }
        builder.finish()
    }

    fn coord(page: usize, row: usize, col: usize, len: usize, direction: Direction) -> Coordinate {
        Coordinate {
            page,
            row,
            col,
            len,
            direction,
        }
    }

    #[test]
    fn test_full_match() {
        let hit = right_trie(&["abc"]).search("abc", Direction::RIGHT);
        assert_eq!(hit.matched, 3);
        assert_eq!(hit.candidates, vec![coord(0, 0, 0, 3, Direction::RIGHT)]);
    }

    #[test]
    fn test_empty_term() {
        let hit = right_trie(&["abc"]).search("", Direction::RIGHT);
        assert_eq!(hit, SearchHit::default());
    }

    #[test]
    fn test_no_match() {
        let hit = right_trie(&["abc"]).search("def", Direction::RIGHT);
        assert_eq!(hit.matched, 0);
        assert!(hit.candidates.is_empty());
    }

    #[test]
    fn test_multi_rows() {
        let hit = right_trie(&["abc", "def", "ghi"]).search("hi", Direction::RIGHT);
        assert_eq!(hit.matched, 2);
        assert_eq!(hit.candidates, vec![coord(0, 2, 1, 2, Direction::RIGHT)]);
    }

    #[test]
    fn test_partial_match() {
        let trie = right_trie(&["aaaaa", "aaaaa", "aaaaa", "helaa", "aaaaa"]);
        let hit = trie.search("hello", Direction::RIGHT);
        assert_eq!(hit.matched, 3);
        assert_eq!(hit.candidates, vec![coord(0, 3, 0, 3, Direction::RIGHT)]);
    }

    #[test]
    fn test_case_and_non_letters() {
        let trie = right_trie(&["abc"]);
        assert_eq!(trie.search("ABc", Direction::RIGHT).matched, 3);
        let hit = trie.search("ab1c", Direction::RIGHT);
        assert_eq!(hit.matched, 2);
        assert_eq!(hit.candidates, vec![coord(0, 0, 0, 2, Direction::RIGHT)]);
    }

    #[test]
    fn test_wrong_direction_stops_walk() {
        let grid = Grid::from_rows(&["ab", "cd"]);
        let trie = Trie::build(&grid, Direction::RIGHT | Direction::DOWN).unwrap();

        // "ac" only reads downward.
        assert_eq!(trie.search("ac", Direction::DOWN).matched, 2);
        let hit = trie.search("ac", Direction::RIGHT);
        assert_eq!(hit.matched, 1);
        assert_eq!(hit.candidates, vec![coord(0, 0, 0, 1, Direction::RIGHT)]);
    }

    #[test]
    fn test_candidates_ordered_by_direction_then_insertion() {
        let grid = Grid::from_rows(&["ab", "ba"]);
        let trie = Trie::build(&grid, Direction::all()).unwrap();
        let hit = trie.search("ab", Direction::LEFT | Direction::RIGHT | Direction::DOWN);
        assert_eq!(hit.matched, 2);
        assert_eq!(
            hit.candidates,
            vec![
                coord(0, 0, 0, 2, Direction::RIGHT),
                coord(0, 1, 1, 2, Direction::LEFT),
                coord(0, 0, 0, 2, Direction::DOWN),
            ]
        );
    }

    #[test]
    fn test_every_ray_prefix_is_found() {
        let grid = Grid::from_rows(&["cat", "ode", "wxy"]);
        let set = Direction::all();
        let trie = Trie::build(&grid, set).unwrap();

        for dir in set.directions() {
            let step = dir.step().unwrap();
            for row in 0..3 {
                for col in 0..3 {
                    let ray = grid.ray(0, row, col, step);
                    for n in 1..=ray.len() {
                        let term = std::str::from_utf8(&ray[..n]).unwrap();
                        let hit = trie.search(term, dir);
                        assert_eq!(hit.matched, n, "{} {}", term, dir);
                        assert!(hit.candidates.contains(&coord(0, row, col, n, dir)));
                        assert!(hit
                            .candidates
                            .iter()
                            .all(|c| grid.spell(c).as_deref() == Some(term)));
                    }
                }
            }
        }
    }
}
