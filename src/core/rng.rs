//! Deterministic random number generation for shuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same shuffle order
//! - **Unbiased**: Shuffles go through `rand`'s Fisher-Yates
//!
//! ```
//! use shanghai_engine::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//!
//! let mut xs: Vec<u32> = (0..10).collect();
//! let mut ys = xs.clone();
//! a.shuffle(&mut xs);
//! b.shuffle(&mut ys);
//!
//! assert_eq!(xs, ys);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded RNG used by decks.
///
/// Uses ChaCha8 for speed while keeping a uniform output distribution,
/// which the shuffle relies on for unbiased permutations.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    ///
    /// `SliceRandom::shuffle` is a Fisher-Yates shuffle: every permutation
    /// is equally likely.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(rng: &mut GameRng) -> Vec<u32> {
        let mut data: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut data);
        data
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..10 {
            assert_eq!(shuffled(&mut rng1), shuffled(&mut rng2));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        assert_ne!(shuffled(&mut rng1), shuffled(&mut rng2));
        assert_eq!(rng1.seed(), 1);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let original: Vec<u32> = (0..20).collect();

        let mut data = shuffled(&mut rng);

        assert_ne!(data, original);
        data.sort_unstable();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut rng = GameRng::new(1);

        let mut empty: Vec<u8> = vec![];
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![9];
        rng.shuffle(&mut single);
        assert_eq!(single, vec![9]);
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        // All 6 orderings of 3 elements should appear with similar frequency.
        let mut rng = GameRng::new(2024);
        let mut counts = std::collections::HashMap::new();
        let trials = 60_000;

        for _ in 0..trials {
            let mut v = [0u8, 1, 2];
            rng.shuffle(&mut v);
            *counts.entry(v).or_insert(0u32) += 1;
        }

        assert_eq!(counts.len(), 6);
        for &count in counts.values() {
            // Expected 10_000 each; allow a generous band.
            assert!((9_000..11_000).contains(&count), "skewed count {count}");
        }
    }
}
