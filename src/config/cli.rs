//! CLI argument parsing using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// trialkit - randomized schedules and event logging for behavioral rigs
#[derive(Parser, Debug)]
#[command(name = "trialkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML session file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for reproducible draws (random if omitted)
    #[arg(long, global = true, env = "TRIALKIT_SEED")]
    pub seed: Option<u64>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw intervals from the configured distribution
    Sample(SampleArgs),

    /// Build a trial block and shuffle it
    Shuffle(ShuffleArgs),

    /// Write a single event line to stdout
    Emit {
        /// Event code
        code: u32,
        /// Timestamp (device clock)
        timestamp: u64,
        /// Signed payload
        #[arg(allow_negative_numbers = true, default_value = "0")]
        payload: i64,
    },

    /// Read event lines and report per-code counts
    Decode(DecodeArgs),

    /// Encode integers as a parameter upload message
    Params {
        /// Command character to lead the message with (e.g. D)
        #[arg(long)]
        code: Option<char>,
        /// Parameter values in device order
        #[arg(allow_negative_numbers = true, required = true)]
        values: Vec<i64>,
    },
}

/// Interval distribution type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DistributionType {
    Uniform,
    Exponential,
}

#[derive(Args, Debug, Default)]
pub struct SampleArgs {
    /// Distribution type (defaults to the session file's)
    #[arg(long, value_enum)]
    pub distribution: Option<DistributionType>,

    /// Nominal mean (exponential only)
    #[arg(long)]
    pub mean: Option<u64>,

    /// Lower bound
    #[arg(long)]
    pub min: Option<u64>,

    /// Upper bound
    #[arg(long)]
    pub max: Option<u64>,

    /// Number of intervals to draw
    #[arg(short = 'n', long, default_value = "10")]
    pub count: usize,

    /// Print a summary instead of one event line per interval
    #[arg(long)]
    pub summary: bool,

    /// Print the summary as JSON (implies --summary)
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct ShuffleArgs {
    /// Trials per label, comma separated (e.g. 10,10)
    #[arg(long, value_delimiter = ',')]
    pub counts: Option<Vec<usize>>,

    /// Number of independently shuffled blocks
    #[arg(long)]
    pub blocks: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub struct DecodeArgs {
    /// Input file (stdin if omitted)
    #[arg(value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Stop after this event code (defaults to the session end code)
    #[arg(long)]
    pub end_code: Option<u32>,

    /// Read to the end of input even after the end code
    #[arg(long, conflicts_with = "end_code")]
    pub no_end: bool,

    /// Echo non-event text lines to stderr
    #[arg(long)]
    pub echo_text: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> anyhow::Result<()> {
        match &self.command {
            Command::Sample(args) => {
                if let (Some(min), Some(max)) = (args.min, args.max) {
                    if min > max {
                        anyhow::bail!("--min ({}) must not exceed --max ({})", min, max);
                    }
                }
                if args.mean == Some(0) {
                    anyhow::bail!("--mean must be greater than zero");
                }
                if args.distribution == Some(DistributionType::Uniform) && args.mean.is_some() {
                    anyhow::bail!("--mean only applies to the exponential distribution");
                }
            }
            Command::Shuffle(args) => {
                if args.blocks == Some(0) {
                    anyhow::bail!("--blocks must be at least 1");
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("trialkit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let cli = parse(&[
            "sample",
            "--distribution",
            "exponential",
            "--mean",
            "1000",
            "--max",
            "3000",
            "-n",
            "5",
            "--seed",
            "7",
        ]);
        assert_eq!(cli.seed, Some(7));
        match cli.command {
            Command::Sample(args) => {
                assert_eq!(args.distribution, Some(DistributionType::Exponential));
                assert_eq!(args.mean, Some(1000));
                assert_eq!(args.min, None);
                assert_eq!(args.count, 5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_emit_negative_payload() {
        let cli = parse(&["emit", "7", "1000", "-3"]);
        match cli.command {
            Command::Emit { code, timestamp, payload } => {
                assert_eq!((code, timestamp, payload), (7, 1000, -3));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_shuffle_counts() {
        let cli = parse(&["shuffle", "--counts", "4,6,2"]);
        match cli.command {
            Command::Shuffle(args) => assert_eq!(args.counts, Some(vec![4, 6, 2])),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_params() {
        let cli = parse(&["params", "0", "-5", "10"]);
        match cli.command {
            Command::Params { code, values } => {
                assert_eq!(code, None);
                assert_eq!(values, vec![0, -5, 10]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_params_with_code() {
        let cli = parse(&["params", "--code", "D", "0", "5000", "-1"]);
        match cli.command {
            Command::Params { code, values } => {
                assert_eq!(code, Some('D'));
                assert_eq!(values, vec![0, 5000, -1]);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let result = Cli::try_parse_from(["trialkit", "params", "--code", "DX", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let cli = parse(&["sample", "--min", "10", "--max", "5"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_mean() {
        let cli = parse(&["sample", "--mean", "0"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_blocks() {
        let cli = parse(&["shuffle", "--blocks", "0"]);
        assert!(cli.validate().is_err());
        assert!(parse(&["shuffle", "--blocks", "2"]).validate().is_ok());
    }
}
