//! Uniform interval distribution
//!
//! Every value in `[min, max)` is (up to the 10,000-step draw resolution)
//! equally likely. Used for fixed-range jitter such as pre-stimulus delays.
//!
//! # Example
//!
//! ```
//! use trialkit::distribution::{IntervalDistribution, uniform::UniformInterval};
//! use trialkit::rng::session_rng;
//!
//! let mut rng = session_rng(Some(8));
//! let delay = UniformInterval::new(2000, 4000).unwrap();
//!
//! for _ in 0..10 {
//!     let ms = delay.next_interval(&mut rng);
//!     assert!((2000..4000).contains(&ms));
//! }
//! ```

use super::{IntervalDistribution, ParameterError};
use crate::rng::DRAW_RESOLUTION;
use rand::Rng;

/// Uniform distribution over `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformInterval {
    min: u64,
    max: u64,
}

impl UniformInterval {
    /// Create a uniform interval
    ///
    /// `min == max` is allowed and always yields `min`.
    pub fn new(min: u64, max: u64) -> Result<Self, ParameterError> {
        if min > max {
            return Err(ParameterError::InvertedRange { min, max });
        }
        tracing::debug!(min, max, "uniform interval");
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }
}

impl IntervalDistribution for UniformInterval {
    /// `min + floor(k * (max - min) / DRAW_RESOLUTION)`, exact for any `u64` bounds
    #[inline]
    fn at_step(&self, k: u64) -> u64 {
        let span = u128::from(self.max - self.min);
        let offset = u128::from(k) * span / u128::from(DRAW_RESOLUTION);
        self.min + offset as u64
    }

    fn bounds(&self) -> (u64, u64) {
        (self.min, self.max)
    }
}

impl rand_distr::Distribution<u64> for UniformInterval {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        self.at_step(rng.gen_range(0..DRAW_RESOLUTION))
    }
}
