//! Deterministic RNG keys.
//!
//! A key is a `u64` seed that can be split into independent child keys, so a
//! trainer can hand one stream to each worker (or to the positive and negative
//! phase) and still reproduce a run from a single seed.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::source::SeededSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RngKey(pub u64);

impl RngKey {
    pub fn new(seed: u64) -> Self {
        RngKey(seed)
    }

    /// Derive `n` child keys from a ChaCha8 stream seeded with this key.
    pub fn split(self, n: usize) -> Vec<RngKey> {
        match n {
            0 => Vec::new(),
            1 => vec![self],
            _ => {
                let mut rng = ChaCha8Rng::seed_from_u64(self.0);
                (0..n).map(|_| RngKey(rng.next_u64())).collect()
            }
        }
    }

    pub fn split_two(self) -> (RngKey, RngKey) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.0);
        (RngKey(rng.next_u64()), RngKey(rng.next_u64()))
    }

    /// Child key for worker or step `index`; stable for a given parent.
    pub fn fold_in(self, index: u64) -> RngKey {
        let mut rng = ChaCha8Rng::seed_from_u64(self.0);
        rng.set_stream(index);
        RngKey(rng.next_u64())
    }

    pub fn seed(&self) -> u64 {
        self.0
    }

    /// A random source drawing from this key's stream.
    pub fn source(self) -> SeededSource {
        SeededSource::from_key(self)
    }
}
