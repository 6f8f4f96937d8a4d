use std::iter::FusedIterator;

use barm_protocol::TargetPoint;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::Error;

pub const DEFAULT_BOUND: f64 = 10.0;

/// Endless stream of random targets.
///
/// The first point is always the origin, as a warm-up. Every later point
/// draws each coordinate independently and uniformly from `[-bound, bound]`.
#[derive(Debug)]
pub struct RandomSampler<R = StdRng> {
    bound: f64,
    rng: R,
    warmed_up: bool,
}

impl RandomSampler<StdRng> {
    /// Sampler with the default bound and a fresh entropy seed.
    pub fn new() -> Self {
        Self {
            bound: DEFAULT_BOUND,
            rng: StdRng::from_entropy(),
            warmed_up: false,
        }
    }

    /// Reproducible sampler. The sequence for a given seed is only stable
    /// within one build of `rand`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            bound: DEFAULT_BOUND,
            rng: StdRng::seed_from_u64(seed),
            warmed_up: false,
        }
    }

    pub fn try_new(bound: f64, seed: Option<u64>) -> Result<Self, Error> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(bound, rng)
    }
}

impl Default for RandomSampler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSampler<R> {
    pub fn with_rng(bound: f64, rng: R) -> Result<Self, Error> {
        // The sampled range `-bound..=bound` must have a finite width.
        if !(2.0 * bound).is_finite() || bound < 0.0 {
            return Err(Error::InvalidBound(bound));
        }
        Ok(Self {
            bound,
            rng,
            warmed_up: false,
        })
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    fn sample(&mut self) -> f64 {
        self.rng.gen_range(-self.bound..=self.bound)
    }
}

impl<R: Rng> Iterator for RandomSampler<R> {
    type Item = TargetPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.warmed_up {
            self.warmed_up = true;
            return Some(TargetPoint::ORIGIN);
        }
        let x = self.sample();
        let y = self.sample();
        let z = self.sample();
        Some(TargetPoint::new(x, y, z))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: Rng> FusedIterator for RandomSampler<R> {}
