use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform integer source the opponent and session draw from.
pub trait RandomSource {
    /// Returns a value uniformly distributed in `[0, upper)`. `upper` must be non-zero.
    fn next_below(&mut self, upper: usize) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

}

impl RandomSource for SessionRng {
    fn next_below(&mut self, upper: usize) -> usize {
        assert!(upper > 0, "next_below requires a non-empty range");
        self.rng.random_range(0..upper)
    }
}
