//! Deterministic random number generation with forking for rollouts.
//!
//! The whole engine draws randomness through `GameRng` so that a seeded
//! match or search replays identically. Rollouts fork the search RNG: each
//! fork is an independent, reproducible stream, so reordering simulations
//! never changes what any single simulation sees.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded, forkable RNG.
///
/// ChaCha8 keeps the stream deterministic across platforms, which the
/// seeded-search and seeded-match tests rely on.
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
    /// The nth fork of a given RNG always produces the same stream, and no
    /// fork shares a stream with its parent.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Uniform usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Uniformly choose an element of a slice. `None` on an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);

        for _ in 0..50 {
            assert_eq!(a.gen_range_usize(0..1000), b.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_forks_are_independent_but_reproducible() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);

        let mut fork_a = a.fork();
        let mut fork_b = b.fork();

        // nth fork of equal parents agrees with itself...
        let seq_a: Vec<_> = (0..10).map(|_| fork_a.gen_range_usize(0..100)).collect();
        let seq_b: Vec<_> = (0..10).map(|_| fork_b.gen_range_usize(0..100)).collect();
        assert_eq!(seq_a, seq_b);

        // ...and differs from the parent stream
        let parent: Vec<_> = (0..10).map(|_| a.gen_range_usize(0..100)).collect();
        assert_ne!(seq_a, parent);
    }

    #[test]
    fn test_shuffle_permutes() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u8> = (1..=20).collect();
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, original);
        data.sort_unstable();
        assert_eq!(data, original);
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = [3, 5, 9];

        assert!(items.contains(rng.choose(&items).unwrap()));
        assert!(rng.choose::<u8>(&[]).is_none());
    }
}
