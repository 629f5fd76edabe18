//! TOML session file parsing

use super::*;
use crate::config::cli::{Cli, Command, DistributionType};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML session file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML session configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Load the session file named on the command line, or defaults
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => Config::default(),
    };
    merge_cli_with_config(cli, config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    match &cli.command {
        Command::Sample(args) => {
            config.interval = merge_interval(
                config.interval,
                args.distribution,
                args.mean,
                args.min,
                args.max,
            )?;
        }
        Command::Shuffle(args) => {
            if let Some(counts) = &args.counts {
                config.trials.counts = counts.clone();
            }
            if let Some(blocks) = args.blocks {
                config.trials.blocks = blocks;
            }
        }
        Command::Decode(args) => {
            if let Some(code) = args.end_code {
                config.events.end_code = code;
            }
        }
        Command::Emit { .. } | Command::Params { .. } => {}
    }

    Ok(config)
}

/// Override interval parameters, switching distribution type if requested
///
/// Bounds not given on the command line are carried over from the session
/// file. Switching to exponential without any mean available is an error.
fn merge_interval(
    current: IntervalKind,
    distribution: Option<DistributionType>,
    mean: Option<u64>,
    min: Option<u64>,
    max: Option<u64>,
) -> Result<IntervalKind> {
    let (cur_mean, cur_min, cur_max) = match current {
        IntervalKind::Uniform { min, max } => (None, min, max),
        IntervalKind::Exponential { mean, min, max } => (Some(mean), min, max),
    };

    let distribution = distribution.unwrap_or(match current {
        IntervalKind::Uniform { .. } if mean.is_none() => DistributionType::Uniform,
        _ => DistributionType::Exponential,
    });

    let min = min.unwrap_or(cur_min);
    let max = max.unwrap_or(cur_max);

    Ok(match distribution {
        DistributionType::Uniform => IntervalKind::Uniform { min, max },
        DistributionType::Exponential => {
            let mean = mean
                .or(cur_mean)
                .context("exponential distribution requires --mean")?;
            IntervalKind::Exponential { mean, min, max }
        }
    })
}
