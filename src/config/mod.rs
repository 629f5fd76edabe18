//! Configuration module
//!
//! Handles CLI argument parsing, TOML session files, and validation.

pub mod cli;
pub mod toml;
pub mod validator;

use crate::distribution::IntervalKind;
use serde::{Deserialize, Serialize};

/// Complete session configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Seed for the session generator (entropy if absent)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Interval schedule
    #[serde(default)]
    pub interval: IntervalKind,
    #[serde(default)]
    pub trials: TrialConfig,
    #[serde(default)]
    pub events: EventConfig,
}

/// Trial block configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialConfig {
    /// Trials per label; label `i` appears `counts[i]` times per block
    #[serde(default = "default_counts")]
    pub counts: Vec<usize>,
    /// Number of independently shuffled blocks
    #[serde(default = "default_blocks")]
    pub blocks: usize,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            counts: default_counts(),
            blocks: default_blocks(),
        }
    }
}

fn default_counts() -> Vec<usize> {
    vec![10, 10]
}

fn default_blocks() -> usize {
    1
}

/// Event codes used by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    /// Code that ends a session stream
    #[serde(default = "default_end_code")]
    pub end_code: u32,
    /// Code for scheduled trial onsets
    #[serde(default = "default_trial_code")]
    pub trial_code: u32,
    /// Code for drawn intervals
    #[serde(default = "default_interval_code")]
    pub interval_code: u32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            end_code: default_end_code(),
            trial_code: default_trial_code(),
            interval_code: default_interval_code(),
        }
    }
}

fn default_end_code() -> u32 {
    0
}

fn default_trial_code() -> u32 {
    3
}

fn default_interval_code() -> u32 {
    8
}
