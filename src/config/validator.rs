//! Configuration validation

use super::*;
use crate::config::cli::Command;
use anyhow::{Context, Result};

/// Largest number of distinct trial labels (labels are `u8`)
const MAX_LABELS: usize = 256;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_interval(&config.interval)?;
    validate_trials(&config.trials)?;
    validate_events(&config.events)?;
    Ok(())
}

/// Validate the parts of the configuration a subcommand uses
///
/// Event code collisions matter only for commands that emit trial or
/// interval events; `decode` may end on any code.
pub fn validate_for_command(config: &Config, command: &Command) -> Result<()> {
    match command {
        Command::Sample(_) => {
            validate_interval(&config.interval)?;
            validate_events(&config.events)?;
        }
        Command::Shuffle(_) => {
            validate_trials(&config.trials)?;
            validate_events(&config.events)?;
        }
        Command::Emit { .. } | Command::Decode(_) | Command::Params { .. } => {}
    }
    Ok(())
}

/// Validate interval parameters
pub fn validate_interval(interval: &IntervalKind) -> Result<()> {
    interval
        .build()
        .with_context(|| format!("Invalid interval configuration: {}", interval))?;
    Ok(())
}

/// Validate trial block configuration
pub fn validate_trials(trials: &TrialConfig) -> Result<()> {
    if trials.counts.is_empty() {
        anyhow::bail!("trials.counts must list at least one label");
    }

    if trials.counts.len() > MAX_LABELS {
        anyhow::bail!(
            "trials.counts supports at most {} labels, got {}",
            MAX_LABELS,
            trials.counts.len()
        );
    }

    if trials.counts.iter().sum::<usize>() == 0 {
        anyhow::bail!("trials.counts must contain at least one trial");
    }

    if trials.blocks == 0 {
        anyhow::bail!("trials.blocks must be at least 1");
    }

    Ok(())
}

/// Validate event codes
pub fn validate_events(events: &EventConfig) -> Result<()> {
    let EventConfig {
        end_code,
        trial_code,
        interval_code,
    } = *events;

    if end_code == trial_code || end_code == interval_code {
        anyhow::bail!(
            "events.end_code ({}) must differ from trial_code ({}) and interval_code ({})",
            end_code,
            trial_code,
            interval_code
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_interval() {
        let mut config = Config::default();
        config.interval = IntervalKind::Exponential { mean: 0, min: 0, max: 100 };
        let err = validate_config(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("mean must be greater than zero"));

        config.interval = IntervalKind::Uniform { min: 9, max: 1 };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_trials() {
        let mut trials = TrialConfig::default();
        trials.counts = vec![];
        assert!(validate_trials(&trials).is_err());

        trials.counts = vec![0, 0];
        assert!(validate_trials(&trials).is_err());

        trials.counts = vec![1; 257];
        assert!(validate_trials(&trials).is_err());

        trials.counts = vec![1; 256];
        assert!(validate_trials(&trials).is_ok());

        trials.blocks = 0;
        assert!(validate_trials(&trials).is_err());
    }

    #[test]
    fn test_end_code_collision() {
        let events = EventConfig {
            end_code: 3,
            ..EventConfig::default()
        };
        assert!(validate_events(&events).is_err());
    }

    #[test]
    fn test_decode_accepts_any_end_code() {
        use crate::config::cli::Cli;
        use crate::config::toml::load_config;
        use clap::Parser;

        for code in ["3", "8"] {
            let cli = Cli::try_parse_from(["trialkit", "decode", "--end-code", code]).unwrap();
            let config = load_config(&cli).unwrap();
            assert!(validate_for_command(&config, &cli.command).is_ok());
        }
    }

    #[test]
    fn test_emitting_commands_reject_collision() {
        use crate::config::cli::Cli;
        use clap::Parser;

        let mut config = Config::default();
        config.events.end_code = 3;

        for args in [["trialkit", "sample"], ["trialkit", "shuffle"]] {
            let cli = Cli::try_parse_from(args).unwrap();
            let err = validate_for_command(&config, &cli.command).unwrap_err();
            assert!(err.to_string().contains("must differ from trial_code"));
        }
    }

    #[test]
    fn test_command_scoped_checks() {
        use crate::config::cli::Cli;
        use clap::Parser;

        let mut config = Config::default();
        config.trials.counts = vec![];

        let sample = Cli::try_parse_from(["trialkit", "sample"]).unwrap();
        assert!(validate_for_command(&config, &sample.command).is_ok());
        let shuffle = Cli::try_parse_from(["trialkit", "shuffle"]).unwrap();
        assert!(validate_for_command(&config, &shuffle.command).is_err());
    }
}
