//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! One `SimRng` per simulation, created from the run's seed and threaded
//! explicitly through every sampling site: patience draws, handling-time
//! draws, inter-arrival generation, line shuffling in the drain scan, and
//! disabled-agent sampling.  There is no ambient/global source anywhere, so
//! the same seed and the same inputs always reproduce the same trace.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Gamma};

/// Seeded simulation-level RNG.
///
/// Wraps `SmallRng`; the type is `!Sync` so it cannot be shared across
/// threads by accident — the simulator is single-threaded by design.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice; `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    // ── Distribution sampling ─────────────────────────────────────────────

    /// Draw from an exponential distribution with the given mean.
    ///
    /// `mean` must be positive and finite; configuration validation upstream
    /// guarantees it, so an invalid parameter degrades to 0 rather than
    /// panicking mid-simulation.
    pub fn sample_exp(&mut self, mean: f64) -> f64 {
        debug_assert!(mean > 0.0 && mean.is_finite());
        match Exp::new(1.0 / mean) {
            Ok(d)  => d.sample(&mut self.0),
            Err(_) => 0.0,
        }
    }

    /// Draw from a gamma distribution with the given shape and scale.
    ///
    /// Same parameter contract as [`SimRng::sample_exp`].
    pub fn sample_gamma(&mut self, shape: f64, scale: f64) -> f64 {
        debug_assert!(shape > 0.0 && scale > 0.0 && scale.is_finite());
        match Gamma::new(shape, scale) {
            Ok(d)  => d.sample(&mut self.0),
            Err(_) => 0.0,
        }
    }
}
