//! Shared random source
//!
//! Every sampler and the shuffler draw from a caller-supplied [`RandomSource`]
//! instead of ambient global state. The source is seeded once by the caller
//! (from entropy on a rig, from a fixed seed in tests) and then consumed by
//! every draw for the lifetime of the session.
//!
//! # Resolution
//!
//! Continuous draws are quantized to [`DRAW_RESOLUTION`] steps: a unit draw is
//! `k / 10_000` with `k` uniform in `[0, 10_000)`. This bounds the precision of
//! both interval distributions and is part of their observable behavior.
//!
//! # Example
//!
//! ```
//! use trialkit::rng::{session_rng, unit_draw, RandomSource};
//!
//! let mut rng = session_rng(Some(42));
//! let k = rng.next_in_range(3, 8);
//! assert!((3..8).contains(&k));
//!
//! let u = unit_draw(&mut rng);
//! assert!((0.0..1.0).contains(&u));
//! ```

use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::{Arc, Mutex};

/// Number of discrete steps in a unit draw
pub const DRAW_RESOLUTION: u64 = 10_000;

/// Generator used for experiment sessions
pub type SessionRng = Xoshiro256PlusPlus;

/// Uniform integer source over a half-open range
///
/// This is the only randomness primitive the toolkit consumes. Any
/// [`rand::RngCore`] generator implements it.
pub trait RandomSource {
    /// Draw an integer uniformly from `[low, high)`
    ///
    /// Returns `low` when `high <= low`.
    fn next_in_range(&mut self, low: u64, high: u64) -> u64;
}

impl<R: RngCore> RandomSource for R {
    #[inline]
    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        self.gen_range(low..high)
    }
}

/// Create a session generator
///
/// With `Some(seed)` the sequence is reproducible; with `None` the generator
/// is seeded from the operating system.
pub fn session_rng(seed: Option<u64>) -> SessionRng {
    match seed {
        Some(seed) => {
            tracing::debug!(seed, "seeding session rng");
            Xoshiro256PlusPlus::seed_from_u64(seed)
        }
        None => {
            tracing::debug!("seeding session rng from entropy");
            Xoshiro256PlusPlus::from_entropy()
        }
    }
}

/// Convert a discrete step `k` in `[0, DRAW_RESOLUTION)` to a unit value
#[inline]
pub fn unit_from_step(k: u64) -> f64 {
    k as f64 / DRAW_RESOLUTION as f64
}

/// Draw a unit value in `[0, 1)` at [`DRAW_RESOLUTION`] steps
#[inline]
pub fn unit_draw<S: RandomSource + ?Sized>(source: &mut S) -> f64 {
    unit_from_step(source.next_in_range(0, DRAW_RESOLUTION))
}

/// Lock-guarded source for hosts that draw from more than one thread
///
/// Each draw holds the lock for the complete read-modify-write of the
/// generator state. Clones share the same generator.
#[derive(Debug)]
pub struct SharedSource<R> {
    inner: Arc<Mutex<R>>,
}

impl<R> SharedSource<R> {
    pub fn new(source: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(source)),
        }
    }
}

impl<R> Clone for SharedSource<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: RandomSource> RandomSource for SharedSource<R> {
    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        // A poisoned lock still holds a consistent generator; keep drawing.
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.next_in_range(low, high)
    }
}

/// Source that walks every step of a range in order
///
/// Draw `n` returns `low + (n mod (high - low))`. Used to enumerate all
/// discrete outcomes of a sampler.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct SteppingSource {
    pub(crate) draws: u64,
}

#[cfg(test)]
impl RandomSource for SteppingSource {
    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        let n = self.draws;
        self.draws += 1;
        if high <= low {
            return low;
        }
        low + n % (high - low)
    }
}
