//! Deterministic random number generation for the search.
//!
//! All randomness in the crate — deck draws, action shuffling, rollout
//! choices — flows through an explicitly threaded `GameRng` rather than
//! ambient global state, so a seed reproduces an entire search.
//!
//! ```
//! use kariba_mcts::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut iteration_rng = rng.fork();
//!
//! // Forks are deterministic: the k-th fork of a seed is always the
//! // same stream.
//! let mut rng2 = GameRng::new(42);
//! let mut iteration_rng2 = rng2.fork();
//! assert_eq!(
//!     iteration_rng.sample_weighted(&[3, 0, 5]),
//!     iteration_rng2.sample_weighted(&[3, 0, 5]),
//! );
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded, forkable RNG built on ChaCha8.
///
/// Forking gives each search iteration its own independent stream while
/// keeping the whole run a pure function of the master seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence; the n-th
    /// fork of a given seed is always the same stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a uniformly random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Sample an index with probability proportional to integer counts.
    ///
    /// This is the deck-draw primitive: `counts[i]` is how many cards of
    /// kind `i` remain in the pool. Returns `None` when the pool is empty
    /// (all counts zero), which callers must treat as an exhausted deck.
    pub fn sample_weighted(&mut self, counts: &[u32]) -> Option<usize> {
        let total: u32 = counts.iter().sum();
        if total == 0 {
            return None;
        }

        let mut threshold = self.inner.gen_range(0..total);
        for (i, &count) in counts.iter().enumerate() {
            if threshold < count {
                return Some(i);
            }
            threshold -= count;
        }
        unreachable!("threshold below total implies a bucket is hit");
    }

    /// Capture the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state.
///
/// ChaCha8's word position makes the capture O(1) no matter how far the
/// stream has advanced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
    /// Fork counter for deterministic branching.
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range(0..1000), rng2.gen_range(0..1000));
        }
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = GameRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| rng.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        assert_eq!(rng1.fork().seed, rng2.fork().seed);
        assert_eq!(rng1.fork().seed, rng2.fork().seed);
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        rng.shuffle(&mut data);

        data.sort();
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3];

        assert!(items.contains(rng.choose(&items).unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_sample_weighted_respects_zero_counts() {
        let mut rng = GameRng::new(42);

        // Only index 1 has any weight
        for _ in 0..20 {
            assert_eq!(rng.sample_weighted(&[0, 7, 0]), Some(1));
        }
    }

    #[test]
    fn test_sample_weighted_empty_pool() {
        let mut rng = GameRng::new(42);

        assert_eq!(rng.sample_weighted(&[]), None);
        assert_eq!(rng.sample_weighted(&[0, 0, 0]), None);
    }

    #[test]
    fn test_sample_weighted_covers_all_buckets() {
        let mut rng = GameRng::new(42);
        let mut seen = [false; 3];

        for _ in 0..200 {
            seen[rng.sample_weighted(&[1, 1, 1]).unwrap()] = true;
        }

        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.gen_range(0..1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_range(0..1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_range(0..1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
            fork_counter: 5,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
