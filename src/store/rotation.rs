//! No-repeat rotation sampling.
//!
//! [`RotationState`] owns the set of identifiers already returned since the
//! last full-pool exhaustion. It is an explicit value passed into every
//! sampling call — never ambient process state — so independent bot instances
//! and deterministic tests each get their own rotation.
//!
//! The guarantee: within an unbroken run against a fixed eligible set, no
//! identifier is returned twice until every identifier in that set has been
//! returned once. The run then restarts.

use std::collections::HashSet;
use std::hash::Hash;

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{StoreError, StoreResult};

/// The seen-set for one content kind (quotes or memes).
///
/// Shared across all filters for that kind: a record returned under one
/// author's pool is considered seen under every other pool that contains it.
/// Entries for since-deleted items linger harmlessly; they are never part of
/// a current eligible set, so they are no-ops on future sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RotationState<T: Eq + Hash> {
    seen: HashSet<T>,
}

impl<T: Eq + Hash> Default for RotationState<T> {
    fn default() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> RotationState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identifiers currently marked as seen.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn contains(&self, id: &T) -> bool {
        self.seen.contains(id)
    }

    /// Choose one identifier from `eligible`, avoiding repeats until the pool
    /// is exhausted.
    ///
    /// If every eligible identifier has been seen, the members of `eligible`
    /// are removed from the seen-set (a reset scoped to this pool only) and
    /// sampling starts a fresh pass. The choice is uniform and drawn from the
    /// operating system's entropy source, so the next pick is not predictable.
    ///
    /// Fails with [`StoreError::EmptyPool`] when `eligible` is empty.
    pub fn sample(&mut self, eligible: &[T]) -> StoreResult<T> {
        if eligible.is_empty() {
            return Err(StoreError::EmptyPool);
        }

        let mut rng = OsRng;
        let fresh: Vec<&T> = eligible
            .iter()
            .filter(|id| !self.seen.contains(*id))
            .collect();

        let chosen = if fresh.is_empty() {
            // Whole pool exhausted: forget this pool's members and restart.
            debug!(pool = eligible.len(), "pool exhausted, resetting rotation");
            for id in eligible {
                self.seen.remove(id);
            }
            eligible.choose(&mut rng).ok_or(StoreError::EmptyPool)?
        } else {
            fresh.choose(&mut rng).copied().ok_or(StoreError::EmptyPool)?
        };

        self.seen.insert(chosen.clone());
        Ok(chosen.clone())
    }
}

/// Uniform choice without rotation tracking, from the same entropy source.
///
/// Used where the caller wants plain randomness, e.g. picking an author
/// directory for a `random` meme query.
pub fn pick_one<T>(items: &[T]) -> StoreResult<&T> {
    items.choose(&mut OsRng).ok_or(StoreError::EmptyPool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pool_fails() {
        let mut state: RotationState<u32> = RotationState::new();
        assert!(matches!(state.sample(&[]), Err(StoreError::EmptyPool)));
    }

    #[test]
    fn no_repeat_until_exhaustion() {
        let pool: Vec<u32> = (0..10).collect();
        let mut state = RotationState::new();

        let mut first_pass: HashSet<u32> = HashSet::new();
        for _ in 0..10 {
            let picked = state.sample(&pool).unwrap();
            assert!(first_pass.insert(picked), "identifier repeated mid-pass");
        }
        assert_eq!(first_pass.len(), 10);
    }

    #[test]
    fn reset_starts_a_fresh_pass() {
        let pool: Vec<u32> = (0..4).collect();
        let mut state = RotationState::new();

        for _ in 0..4 {
            state.sample(&pool).unwrap();
        }
        // Pool is exhausted — the next draw resets and re-seeds the seen-set
        // with exactly one choice.
        let picked = state.sample(&pool).unwrap();
        assert!(pool.contains(&picked));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn reset_leaves_orphaned_entries_alone() {
        let pool = vec!["a".to_string(), "b".to_string()];
        let mut state = RotationState::new();
        // Simulate an identifier whose item was deleted after being seen.
        state.seen.insert("ghost".to_string());

        for _ in 0..2 {
            state.sample(&pool).unwrap();
        }
        state.sample(&pool).unwrap();

        // The reset only removed this pool's members.
        assert!(state.contains(&"ghost".to_string()));
    }

    #[test]
    fn single_element_pool_repeats_instead_of_failing() {
        let pool = vec![42u32];
        let mut state = RotationState::new();
        assert_eq!(state.sample(&pool).unwrap(), 42);
        assert_eq!(state.sample(&pool).unwrap(), 42);
        assert_eq!(state.sample(&pool).unwrap(), 42);
    }

    #[test]
    fn every_cycle_covers_the_pool_exactly_once() {
        // 30 draws over a 3-item pool = 10 full cycles, so each item must
        // appear exactly 10 times regardless of the randomness source.
        let pool: Vec<u32> = vec![1, 2, 3];
        let mut state = RotationState::new();
        let mut counts = std::collections::HashMap::new();
        for _ in 0..30 {
            *counts.entry(state.sample(&pool).unwrap()).or_insert(0u32) += 1;
        }
        for item in &pool {
            assert_eq!(counts[item], 10);
        }
    }

    #[test]
    fn pick_one_empty_fails() {
        let items: Vec<u32> = Vec::new();
        assert!(matches!(pick_one(&items), Err(StoreError::EmptyPool)));
    }

    #[test]
    fn serde_roundtrip() {
        let pool: Vec<String> = vec!["x".into(), "y".into()];
        let mut state = RotationState::new();
        state.sample(&pool).unwrap();

        let json = serde_json::to_string(&state).unwrap();
        let restored: RotationState<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 1);
    }
}
