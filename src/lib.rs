//! trialkit - randomization and event logging primitives for behavioral rigs
//!
//! trialkit provides the small set of primitives a behavioral experiment loop
//! needs from its support code. The caller owns the loop and decides when to
//! draw, shuffle, or log.
//!
//! # Architecture
//!
//! - **Interval sampling**: uniform and truncated exponential intervals at a
//!   fixed 10,000-step draw resolution
//! - **Trial shuffling**: in-place Fisher-Yates over caller-owned trial blocks
//! - **Event records**: `code,timestamp,payload` lines to any byte sink, and a
//!   reader for the logger side
//! - **Injected randomness**: every draw comes from a caller-supplied
//!   [`rng::RandomSource`], seeded once per session
//!
//! # Example
//!
//! ```
//! use trialkit::distribution::{exponential_sample, uniform_sample};
//! use trialkit::event::emitter::send_data;
//! use trialkit::rng::session_rng;
//! use trialkit::shuffle::{shuffle, trial_block};
//!
//! let mut rng = session_rng(Some(2024));
//!
//! let mut trials = trial_block(&[3, 3]);
//! shuffle(&mut rng, &mut trials);
//!
//! let mut serial = Vec::new();
//! let mut clock = 0;
//! for &trial in &trials {
//!     clock += exponential_sample(&mut rng, 1000, 0, 3000).unwrap();
//!     clock += uniform_sample(&mut rng, 200, 400).unwrap();
//!     send_data(&mut serial, 3, clock, i64::from(trial));
//! }
//!
//! assert_eq!(String::from_utf8(serial).unwrap().lines().count(), 6);
//! ```

pub mod config;
pub mod distribution;
pub mod event;
pub mod params;
pub mod rng;
pub mod shuffle;
pub mod stats;

// Re-export commonly used types
pub use config::Config;
pub use distribution::{IntervalDistribution, IntervalKind, ParameterError};
pub use event::EventRecord;
pub use rng::RandomSource;

/// Result type used throughout trialkit
pub type Result<T> = anyhow::Result<T>;
