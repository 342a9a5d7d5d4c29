//! Candidate selection strategies
//!
//! When a search yields several equally long candidate runs, a [`Selector`]
//! picks which one to use. Strategies are independent of building and
//! searching, so a trie can swap its strategy without being rebuilt.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Maps a candidate count `n` (always >= 1) to an index in `[0, n)`.
/// Out-of-range answers are clamped to the last candidate by callers.
pub trait Selector: Send + Sync {
    fn select(&self, candidates: usize) -> usize;
}

/// Always the earliest candidate (direction order, then insertion order)
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSelector;

impl Selector for FirstSelector {
    #[inline]
    fn select(&self, _candidates: usize) -> usize {
        0
    }
}

/// Uniformly random over all candidates, using the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl Selector for RandomSelector {
    fn select(&self, candidates: usize) -> usize {
        if candidates <= 1 {
            return 0;
        }
        rand::thread_rng().gen_range(0..candidates)
    }
}

/// Uniformly random with a fixed seed, for reproducible output
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Selector for SeededSelector {
    fn select(&self, candidates: usize) -> usize {
        if candidates <= 1 {
            return 0;
        }
        self.rng.lock().gen_range(0..candidates)
    }
}

impl fmt::Debug for SeededSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededSelector").finish_non_exhaustive()
    }
}

impl<F> Selector for F
where
    F: Fn(usize) -> usize + Send + Sync,
{
    fn select(&self, candidates: usize) -> usize {
        self(candidates)
    }
}

/// Apply a selector and clamp its answer to a valid index
#[inline]
pub fn choose(selector: &dyn Selector, candidates: usize) -> usize {
    selector
        .select(candidates)
        .min(candidates.saturating_sub(1))
}
