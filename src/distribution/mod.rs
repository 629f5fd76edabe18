//! Random interval distributions
//!
//! This module provides bounded random intervals (typically milliseconds) for
//! scheduling stimuli: inter-trial intervals, pre-stimulus delays, variable
//! reward schedules.
//!
//! # Distributions
//!
//! - **Uniform**: every value in `[min, max)` equally likely
//! - **Exponential**: truncated exponential with a long right tail, for
//!   variable-interval schedules that should not feel regular
//!
//! # Discrete Draws
//!
//! Both distributions take one draw `k` in `[0, DRAW_RESOLUTION)` and map it
//! through a deterministic transform, truncating the result toward zero.
//! The distributions are therefore discrete with exactly 10,000 equally
//! likely outcomes, and their exact expected values are computable.
//!
//! # Example
//!
//! ```
//! use trialkit::distribution::{IntervalDistribution, exponential::ExponentialInterval};
//! use trialkit::rng::session_rng;
//!
//! let mut rng = session_rng(Some(1));
//! let iti = ExponentialInterval::new(1000, 0, 3000).unwrap();
//! let wait_ms = iti.next_interval(&mut rng);
//! assert!(wait_ms <= 3000);
//! ```

use crate::rng::{RandomSource, DRAW_RESOLUTION};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod exponential;
pub mod uniform;

use exponential::ExponentialInterval;
use uniform::UniformInterval;

/// Rejected distribution parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("invalid parameter: mean must be greater than zero")]
    ZeroMean,
    #[error("invalid parameter: min ({min}) is greater than max ({max})")]
    InvertedRange { min: u64, max: u64 },
}

/// Bounded interval generator
///
/// Implementations hold only their parameters; randomness is injected on
/// every call so that all samplers in a session share one generator.
pub trait IntervalDistribution: Send + Sync {
    /// Map a discrete draw `k` in `[0, DRAW_RESOLUTION)` to an interval
    ///
    /// `k` stands for the unit draw `k / DRAW_RESOLUTION`.
    fn at_step(&self, k: u64) -> u64;

    /// Lower and upper bound parameters `(min, max)`
    fn bounds(&self) -> (u64, u64);

    /// Draw the next interval from `source`
    fn next_interval(&self, source: &mut dyn RandomSource) -> u64 {
        self.at_step(source.next_in_range(0, DRAW_RESOLUTION))
    }

    /// Exact mean over all discrete draws
    fn expected_value(&self) -> f64 {
        let total: f64 = (0..DRAW_RESOLUTION)
            .map(|k| self.at_step(k) as f64)
            .sum();
        total / DRAW_RESOLUTION as f64
    }
}

/// Interval distribution configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalKind {
    Uniform { min: u64, max: u64 },
    Exponential { mean: u64, min: u64, max: u64 },
}

impl Default for IntervalKind {
    fn default() -> Self {
        Self::Uniform { min: 0, max: 1000 }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalKind::Uniform { min, max } => write!(f, "uniform [{}, {})", min, max),
            IntervalKind::Exponential { mean, min, max } => {
                write!(f, "exponential mean={} [{}, {}]", mean, min, max)
            }
        }
    }
}

impl IntervalKind {
    /// Build the configured distribution
    pub fn build(&self) -> Result<Box<dyn IntervalDistribution>, ParameterError> {
        Ok(match *self {
            Self::Uniform { min, max } => Box::new(UniformInterval::new(min, max)?),
            Self::Exponential { mean, min, max } => {
                Box::new(ExponentialInterval::new(mean, min, max)?)
            }
        })
    }
}

/// Draw one uniform interval in `[min, max)`
///
/// Returns `min` when `min == max`.
pub fn uniform_sample<S: RandomSource>(
    source: &mut S,
    min: u64,
    max: u64,
) -> Result<u64, ParameterError> {
    Ok(UniformInterval::new(min, max)?.next_interval(source))
}

/// Draw one truncated-exponential interval
///
/// See [`ExponentialInterval`] for the transform.
pub fn exponential_sample<S: RandomSource>(
    source: &mut S,
    mean: u64,
    min: u64,
    max: u64,
) -> Result<u64, ParameterError> {
    Ok(ExponentialInterval::new(mean, min, max)?.next_interval(source))
}
