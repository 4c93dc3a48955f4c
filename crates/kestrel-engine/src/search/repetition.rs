//! Visited-position set for the repetition-draw heuristic.
//!
//! A position seen once before counts as a draw. This is deliberately
//! looser than the threefold rule.

use std::collections::HashSet;

/// Set of position hashes.
#[derive(Debug, Clone, Default)]
pub struct RepetitionTracker {
    seen: HashSet<u64>,
}

impl RepetitionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `hash`. Returns `true` if it was not already present.
    pub fn insert(&mut self, hash: u64) -> bool {
        self.seen.insert(hash)
    }

    pub fn remove(&mut self, hash: u64) {
        self.seen.remove(&hash);
    }

    pub fn contains(&self, hash: u64) -> bool {
        self.seen.contains(&hash)
    }

    /// An independent copy; changes to either side do not affect the other.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}
