//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness every
//! operator in this crate draws from. It wraps the `rand` crate's `StdRng`, so a
//! run can be made reproducible by seeding it explicitly.
//!
//! ## Example
//!
//! ```rust
//! use gasearch::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let window: i64 = rng.gen_range(5..=200);
//! let stop_loss = rng.unit() * 0.2;
//!
//! assert!((5..=200).contains(&window));
//! assert!((0.0..0.2).contains(&stop_loss));
//! ```

use rand::{
    distributions::uniform::{SampleRange, SampleUniform},
    rngs::StdRng,
    Rng, SeedableRng,
};

/// A wrapper around the `rand` crate's `StdRng` that provides the draws needed
/// by sampling, selection, crossover and mutation.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a random value in the given range.
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.gen_range(range)
    }

    /// Draws a uniform value from `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns `true` with probability `p`. Values outside `[0, 1]` are clamped.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.clone();

        // Both RNGs should generate the same sequence after cloning
        let nums1: Vec<f64> = (0..5).map(|_| rng1.unit()).collect();
        let nums2: Vec<f64> = (0..5).map(|_| rng2.unit()).collect();

        assert_eq!(nums1, nums2);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomNumberGenerator::from_seed(11);
        let mut b = RandomNumberGenerator::from_seed(11);

        let xs: Vec<i64> = (0..20).map(|_| a.gen_range(0..=100)).collect();
        let ys: Vec<i64> = (0..20).map(|_| b.gen_range(0..=100)).collect();

        assert_eq!(xs, ys);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        assert!((0..100).all(|_| !rng.chance(0.0)));
        assert!((0..100).all(|_| rng.chance(1.0)));
        // Out-of-range probabilities are clamped rather than panicking
        assert!(rng.chance(1.5));
        assert!(!rng.chance(-0.5));
    }

    #[test]
    fn test_unit_range() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        for _ in 0..1000 {
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
        }
    }
}
