//! Pseudo-random sources used by the generators.

use rand::{rngs::StdRng, Rng, SeedableRng};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Supplies uniform draws to the feed.
///
/// Only [`RandomSource::next_unit`] is required; the remaining helpers are
/// derived from it so alternative sources stay trivial to write.
pub trait RandomSource: Send {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[0, upper)`. Returns 0 when `upper` is 0.
    fn below(&mut self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        let scaled = (self.next_unit() * upper as f64) as u64;
        scaled.min(upper - 1)
    }

    /// Uniform real in `[-half_width, half_width)`.
    fn symmetric(&mut self, half_width: f64) -> f64 {
        (self.next_unit() - 0.5) * 2.0 * half_width
    }

    /// Returns true with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Lowercase hexadecimal string of `len` digits.
    fn hex(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| HEX_DIGITS[self.below(16) as usize] as char)
            .collect()
    }
}

/// Seedable source backed by [`StdRng`].
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Source that always returns the same draw.
///
/// `FixedRandom(0.5)` yields zero random-walk deltas, no height bumps and
/// the most likely transaction status, which makes scripted scenarios exact.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
