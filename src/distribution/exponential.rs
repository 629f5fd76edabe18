//! Truncated exponential interval distribution
//!
//! This module provides a long-tailed interval distribution for variable
//! interval schedules (operant conditioning, inter-trial intervals) where
//! waits should be unpredictable but never exceed a wall-clock-safe bound.
//!
//! # Transform
//!
//! A unit draw `u` in `[0, 1)` is mapped through the inverse CDF of an
//! exponential distribution truncated at `max` and offset by `min`:
//!
//! ```text
//! max_factor = max / mean
//! min_factor = min / mean
//! cdf_span   = 1 - exp(-max_factor)
//! shape      = -ln(1 - cdf_span * u)
//! factor     = shape + min_factor * (1 - u)
//! interval   = trunc(mean * factor)
//! ```
//!
//! # Bias
//!
//! The realized mean approaches `mean` only for large `max / mean` and small
//! `min / mean`. With `max:mean = 3:1` and `min = 0` it is about `0.84 * mean`.
//! This bias is part of the schedule and is not corrected.
//!
//! # Envelope
//!
//! Outputs stay within `[min, max]` whenever
//! `min <= mean * (1 - exp(-max / mean))`, which covers the intended
//! `min << mean <= max` usage. Outside that region the transform is still
//! applied verbatim; [`ExponentialInterval::is_bounded`] reports which case
//! applies.
//!
//! # Example
//!
//! ```
//! use trialkit::distribution::{IntervalDistribution, exponential::ExponentialInterval};
//! use trialkit::rng::session_rng;
//!
//! let mut rng = session_rng(Some(21));
//! let iti = ExponentialInterval::new(1000, 0, 3000).unwrap();
//!
//! let ratio = iti.expected_value() / 1000.0;
//! assert!(ratio > 0.83 && ratio < 0.85);
//!
//! let wait_ms = iti.next_interval(&mut rng);
//! assert!(wait_ms <= 3000);
//! ```

use super::{IntervalDistribution, ParameterError};
use crate::rng::{unit_from_step, DRAW_RESOLUTION};
use rand::Rng;

/// Exponential distribution truncated to `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialInterval {
    mean: u64,
    min: u64,
    max: u64,

    /// `min / mean`
    min_factor: f64,

    /// Exponential mass inside `[0, max]`
    cdf_span: f64,
}

impl ExponentialInterval {
    /// Create a truncated exponential interval
    ///
    /// # Errors
    ///
    /// - [`ParameterError::ZeroMean`] if `mean == 0`
    /// - [`ParameterError::InvertedRange`] if `min > max`
    pub fn new(mean: u64, min: u64, max: u64) -> Result<Self, ParameterError> {
        if mean == 0 {
            return Err(ParameterError::ZeroMean);
        }
        if min > max {
            return Err(ParameterError::InvertedRange { min, max });
        }

        let max_factor = max as f64 / mean as f64;
        let min_factor = min as f64 / mean as f64;
        let cdf_span = 1.0 - (-max_factor).exp();

        let dist = Self {
            mean,
            min,
            max,
            min_factor,
            cdf_span,
        };

        if dist.is_bounded() {
            tracing::debug!(mean, min, max, "exponential interval");
        } else {
            tracing::warn!(
                mean,
                min,
                max,
                "exponential interval parameters leave the [min, max] envelope"
            );
        }

        Ok(dist)
    }

    pub fn mean(&self) -> u64 {
        self.mean
    }

    /// Whether every output is guaranteed to lie in `[min, max]`
    pub fn is_bounded(&self) -> bool {
        self.min_factor <= self.cdf_span
    }
}

impl IntervalDistribution for ExponentialInterval {
    #[inline]
    fn at_step(&self, k: u64) -> u64 {
        let u = unit_from_step(k);
        let shape = -(1.0 - self.cdf_span * u).ln();
        let factor = shape + self.min_factor * (1.0 - u);
        (self.mean as f64 * factor) as u64
    }

    fn bounds(&self) -> (u64, u64) {
        (self.min, self.max)
    }
}

impl rand_distr::Distribution<u64> for ExponentialInterval {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        self.at_step(rng.gen_range(0..DRAW_RESOLUTION))
    }
}
