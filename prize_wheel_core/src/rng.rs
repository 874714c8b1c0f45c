use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform `[0, 1)` generator used by the spin resolver.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Adapter over any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        RngSource(StdRng::from_entropy())
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays a fixed list of draws, then repeats `fallback`.
///
/// Values are clamped into `[0, 1)`.
#[derive(Clone, Debug, Default)]
pub struct SequenceSource {
    values: VecDeque<f64>,
    fallback: f64,
}

impl SequenceSource {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: 0.0,
        }
    }

    /// Always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            values: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn with_fallback(mut self, value: f64) -> Self {
        self.fallback = value;
        self
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        let v = self.values.pop_front().unwrap_or(self.fallback);
        if !v.is_finite() || v < 0.0 {
            0.0
        } else if v >= 1.0 {
            1.0 - f64::EPSILON
        } else {
            v
        }
    }
}
