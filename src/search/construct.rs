//! Phrase reconstruction
//!
//! Turns a phrase into an ordered list of grid runs whose letters, read in
//! order, spell the phrase. Two strategies are offered:
//!
//! - **left-to-right**: greedily take the longest indexed prefix of what
//!   remains, then continue after it.
//! - **longest**: find the longest indexed substring anywhere in the phrase,
//!   then solve the text before and after it the same way.
//!
//! Both fold case and ignore spaces in the phrase.
//!
//! @module search/construct

use super::lookup::SearchHit;
use super::Mode;
use crate::core::error::{Error, Result};
use crate::index::{Coordinate, Direction, Trie};
use std::ops::Range;
use std::time::Instant;
use tracing::debug;

/// Longest indexed substring of a phrase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongestMatch {
    /// Byte offset of the substring within the phrase
    pub offset: usize,
    /// Substring length
    pub matched: usize,
    pub candidates: Vec<Coordinate>,
}

/// Pending work for longest-mode reconstruction
enum Task {
    Solve(Range<usize>),
    Emit(Coordinate),
}

/// Lowercase and drop spaces
fn fold_phrase(phrase: &str) -> String {
    phrase
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl Trie {
    /// Reconstruct `phrase` with the given strategy
    pub fn construct(&self, phrase: &str, set: Direction, mode: Mode) -> Result<Vec<Coordinate>> {
        match mode {
            Mode::Longest => self.construct_longest(phrase, set),
            Mode::Ltr => self.construct_ltr(phrase, set),
        }
    }

    /// Greedy left-to-right reconstruction.
    ///
    /// Fails with [`Error::LetterNotFound`] naming the first character that
    /// no indexed run can start with.
    pub fn construct_ltr(&self, phrase: &str, set: Direction) -> Result<Vec<Coordinate>> {
        let start = Instant::now();
        let folded = fold_phrase(phrase);
        if folded.is_empty() {
            return Err(Error::EmptyPhrase);
        }

        let bytes = folded.as_bytes();
        let mut runs = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let SearchHit {
                matched,
                candidates,
            } = self.search_bytes(&bytes[pos..], set);

            if matched == 0 || candidates.is_empty() {
                // Matched runs are ASCII, so `at` is a char boundary.
                let at = (pos + matched).min(bytes.len() - 1);
                let letter = folded[at..].chars().next().unwrap_or('\0');
                return Err(Error::LetterNotFound {
                    letter,
                    position: at,
                });
            }

            runs.push(candidates[self.choose(candidates.len())]);
            pos += matched;
        }

        debug!(
            mode = "ltr",
            runs = runs.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Reconstructed phrase"
        );
        Ok(runs)
    }

    /// Longest-substring-first reconstruction.
    ///
    /// The chosen run for a (sub)phrase is picked before its prefix and
    /// suffix are solved, and output is ordered prefix, run, suffix. Fails
    /// with [`Error::PhraseUnmatchable`] when some remaining fragment has
    /// no indexed letter at all.
    pub fn construct_longest(&self, phrase: &str, set: Direction) -> Result<Vec<Coordinate>> {
        let start = Instant::now();
        let folded = fold_phrase(phrase);
        if folded.is_empty() {
            return Err(Error::EmptyPhrase);
        }

        let bytes = folded.as_bytes();
        let mut runs = Vec::new();
        let mut stack = vec![Task::Solve(0..bytes.len())];

        while let Some(task) = stack.pop() {
            let range = match task {
                Task::Emit(run) => {
                    runs.push(run);
                    continue;
                }
                Task::Solve(range) => range,
            };

            let fragment = &bytes[range.clone()];
            let longest = self.find_longest(fragment, set);
            if longest.candidates.is_empty() {
                return Err(Error::PhraseUnmatchable {
                    phrase: String::from_utf8_lossy(fragment).into_owned(),
                });
            }

            let chosen = longest.candidates[self.choose(longest.candidates.len())];
            if longest.matched == fragment.len() {
                runs.push(chosen);
                continue;
            }

            let split = range.start + longest.offset;
            let after = split + longest.matched;
            if after < range.end {
                stack.push(Task::Solve(after..range.end));
            }
            stack.push(Task::Emit(chosen));
            if split > range.start {
                stack.push(Task::Solve(range.start..split));
            }
        }

        debug!(
            mode = "longest",
            runs = runs.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Reconstructed phrase"
        );
        Ok(runs)
    }

    /// Longest indexed substring of `phrase`, scanning offsets left to right.
    ///
    /// Earlier offsets win ties. The scan stops at the first match longer
    /// than half the phrase.
    pub fn find_longest(&self, phrase: &[u8], set: Direction) -> LongestMatch {
        let half = phrase.len() / 2;
        let mut best = LongestMatch::default();

        for offset in 0..phrase.len() {
            let hit = self.search_bytes(&phrase[offset..], set);
            let past_half = hit.matched > half;

            if hit.matched > best.matched {
                best = LongestMatch {
                    offset,
                    matched: hit.matched,
                    candidates: hit.candidates,
                };
            }
            if past_half {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use std::sync::Arc;

    fn right_trie(rows: &[&str]) -> Trie {
        Trie::build(&Grid::from_rows(rows), Direction::RIGHT).unwrap()
    }

    fn runs(list: &[(usize, usize, usize, usize)]) -> Vec<Coordinate> {
        list.iter()
            .map(|&(page, row, col, len)| Coordinate {
                page,
                row,
                col,
                len,
                direction: Direction::RIGHT,
            })
            .collect()
    }

    fn both(trie: &Trie, phrase: &str) -> [Result<Vec<Coordinate>>; 2] {
        [
            trie.construct_ltr(phrase, Direction::RIGHT),
            trie.construct_longest(phrase, Direction::RIGHT),
        ]
    }

    #[test]
    fn test_single_word() {
        let trie = right_trie(&["abc"]);
        for result in both(&trie, "abc") {
            assert_eq!(result.unwrap(), runs(&[(0, 0, 0, 3)]));
        }
    }

    #[test]
    fn test_empty_phrase() {
        let trie = right_trie(&["abc"]);
        for result in both(&trie, "") {
            assert!(matches!(result, Err(Error::EmptyPhrase)));
        }
        for result in both(&trie, "   ") {
            assert!(matches!(result, Err(Error::EmptyPhrase)));
        }
    }

    #[test]
    fn test_missing_letter() {
        let trie = right_trie(&["abc"]);
        assert!(matches!(
            trie.construct_ltr("d", Direction::RIGHT),
            Err(Error::LetterNotFound {
                letter: 'd',
                position: 0
            })
        ));
        assert!(matches!(
            trie.construct_longest("d", Direction::RIGHT),
            Err(Error::PhraseUnmatchable { .. })
        ));
    }

    #[test]
    fn test_missing_letter_mid_phrase() {
        let trie = right_trie(&["abc"]);
        assert!(matches!(
            trie.construct_ltr("abxc", Direction::RIGHT),
            Err(Error::LetterNotFound {
                letter: 'x',
                position: 2
            })
        ));
        match trie.construct_longest("abxc", Direction::RIGHT) {
            Err(Error::PhraseUnmatchable { phrase }) => assert_eq!(phrase, "x"),
            other => panic!("expected PhraseUnmatchable, got {:?}", other),
        }
    }

    #[test]
    fn test_reused_letters() {
        let trie = right_trie(&["abcdefg"]);
        for result in both(&trie, "bab") {
            assert_eq!(result.unwrap(), runs(&[(0, 0, 1, 1), (0, 0, 0, 2)]));
        }
    }

    #[test]
    fn test_multi_row() {
        let trie = right_trie(&["fghooo", "ooabco", "oodeoo"]);
        for result in both(&trie, "abcdefgh") {
            assert_eq!(
                result.unwrap(),
                runs(&[(0, 1, 2, 3), (0, 2, 2, 2), (0, 0, 0, 3)])
            );
        }
    }

    #[test]
    fn test_single_long_run() {
        let trie = right_trie(&["abcdea", "aaabca", "aabcda"]);
        for result in both(&trie, "abcde") {
            assert_eq!(result.unwrap(), runs(&[(0, 0, 0, 5)]));
        }
    }

    #[test]
    fn test_longest_in_middle() {
        let trie = right_trie(&["bcdefa", "ooooog", "obcode"]);
        for result in both(&trie, "abcdefg") {
            assert_eq!(
                result.unwrap(),
                runs(&[(0, 0, 5, 1), (0, 0, 0, 5), (0, 1, 5, 1)])
            );
        }
    }

    #[test]
    fn test_ltr_takes_shorter_first_run() {
        let trie = right_trie(&["bcdefa", "abooog", "obcode"]);
        assert_eq!(
            trie.construct_ltr("abcdefg", Direction::RIGHT).unwrap(),
            runs(&[(0, 1, 0, 2), (0, 0, 1, 4), (0, 1, 5, 1)])
        );
        assert_eq!(
            trie.construct_longest("abcdefg", Direction::RIGHT).unwrap(),
            runs(&[(0, 0, 5, 1), (0, 0, 0, 5), (0, 1, 5, 1)])
        );
    }

    #[test]
    fn test_spaces_and_case_are_folded() {
        let trie = right_trie(&["abcdefg"]);
        for result in both(&trie, " B  a B ") {
            assert_eq!(result.unwrap(), runs(&[(0, 0, 1, 1), (0, 0, 0, 2)]));
        }
    }

    #[test]
    fn test_runs_spell_phrase() {
        let grid = Grid::from_rows(&["thequick", "brownfox", "jumpsove", "rlazydog"]);
        let trie = Trie::build(&grid, Direction::all()).unwrap();
        let phrase = "the lazy fox jumps over the quick brown dog";
        let expected: String = phrase.chars().filter(|c| *c != ' ').collect();

        for mode in [Mode::Ltr, Mode::Longest] {
            let result = trie.construct(phrase, Direction::all(), mode).unwrap();
            let spelled: String = result.iter().filter_map(|c| grid.spell(c)).collect();
            assert_eq!(spelled, expected);
            assert_eq!(result.iter().map(|c| c.len).sum::<usize>(), expected.len());
            assert!(result.iter().all(|c| c.len >= 1));
        }
    }

    #[test]
    fn test_selector_picks_candidate() {
        let trie = right_trie(&["ab", "ab"]);
        let last = trie.with_selector(Arc::new(|n: usize| n - 1));

        assert_eq!(
            trie.construct_longest("ab", Direction::RIGHT).unwrap(),
            runs(&[(0, 0, 0, 2)])
        );
        assert_eq!(
            last.construct_longest("ab", Direction::RIGHT).unwrap(),
            runs(&[(0, 1, 0, 2)])
        );
        assert_eq!(
            last.construct_ltr("ab", Direction::RIGHT).unwrap(),
            runs(&[(0, 1, 0, 2)])
        );
    }

    #[test]
    fn test_find_longest_prefers_earliest() {
        let trie = right_trie(&["abxcd"]);
        let longest = trie.find_longest(b"abcd", Direction::RIGHT);
        assert_eq!(longest.offset, 0);
        assert_eq!(longest.matched, 2);
        assert_eq!(longest.candidates, runs(&[(0, 0, 0, 2)]));
    }

    #[test]
    fn test_find_longest_stops_past_half() {
        // "bcdefg" at offset 1 is longer, but "abcd" already covers more
        // than half of the phrase.
        let trie = right_trie(&["abcdxx", "bcdefg"]);
        let longest = trie.find_longest(b"abcdefg", Direction::RIGHT);
        assert_eq!(longest.offset, 0);
        assert_eq!(longest.matched, 4);
        assert_eq!(longest.candidates, runs(&[(0, 0, 0, 4)]));

        assert_eq!(
            trie.construct_longest("abcdefg", Direction::RIGHT).unwrap(),
            runs(&[(0, 0, 0, 4), (0, 1, 3, 3)])
        );
    }

    #[test]
    fn test_selector_call_order() {
        use parking_lot::Mutex;

        // "bcd" twice, "a" once, "g" three times
        let trie = right_trie(&["bcd", "bcd", "a", "g", "g", "g"]);
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&calls);
        let recording = trie.with_selector(Arc::new(move |n: usize| {
            recorded.lock().push(n);
            0
        }));

        let result = recording
            .construct_longest("abcdg", Direction::RIGHT)
            .unwrap();
        assert_eq!(result, runs(&[(0, 2, 0, 1), (0, 0, 0, 3), (0, 3, 0, 1)]));
        // Current level first, then the prefix, then the suffix.
        assert_eq!(*calls.lock(), vec![2, 1, 3]);
    }

    #[test]
    fn test_find_longest_unmatched() {
        let trie = right_trie(&["abc"]);
        let longest = trie.find_longest(b"xyz", Direction::RIGHT);
        assert_eq!(longest, LongestMatch::default());
    }

    #[test]
    fn test_long_phrase_does_not_overflow_stack() {
        let trie = right_trie(&["ab"]);
        let phrase = "ba".repeat(2_000);
        let result = trie.construct_longest(&phrase, Direction::RIGHT).unwrap();
        assert_eq!(result.iter().map(|c| c.len).sum::<usize>(), phrase.len());
    }
}
