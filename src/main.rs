//! trialkit CLI entry point

use anyhow::Context;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing_subscriber::EnvFilter;
use trialkit::config::cli::{Cli, Command, DecodeArgs, SampleArgs};
use trialkit::config::{toml::load_config, validator, Config};
use trialkit::event::emitter::{send_data, EventEmitter};
use trialkit::event::reader::{EventReader, SerialLine};
use trialkit::params::{encode_parameters, encode_parameters_with_code};
use trialkit::rng::session_rng;
use trialkit::shuffle::{shuffle, trial_block};
use trialkit::stats::{IntervalSummary, SummarySnapshot};
use trialkit::Result;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);
    cli.validate()?;

    let config = load_config(&cli)?;
    validator::validate_for_command(&config, &cli.command)
        .context("Configuration validation failed")?;
    tracing::debug!(?config, "configuration loaded");

    match &cli.command {
        Command::Sample(args) => run_sample(&config, args),
        Command::Shuffle(_) => run_shuffle(&config),
        Command::Emit {
            code,
            timestamp,
            payload,
        } => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            send_data(&mut out, *code, *timestamp, *payload);
            Ok(())
        }
        Command::Decode(args) => run_decode(&config, args),
        Command::Params { code, values } => {
            let message = match code {
                Some(code) => encode_parameters_with_code(*code, values),
                None => encode_parameters(values),
            };
            println!("{}", message);
            Ok(())
        }
    }
}

/// Route tracing output to stderr; RUST_LOG wins over --debug
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Sampling report
#[derive(Serialize)]
struct SampleReport {
    distribution: String,
    expected_mean: f64,
    #[serde(flatten)]
    observed: SummarySnapshot,
}

fn run_sample(config: &Config, args: &SampleArgs) -> Result<()> {
    let dist = config.interval.build()?;
    let mut rng = session_rng(config.seed);

    if args.summary || args.json {
        let mut summary = IntervalSummary::new();
        for _ in 0..args.count {
            summary.record(dist.next_interval(&mut rng));
        }

        let report = SampleReport {
            distribution: config.interval.to_string(),
            expected_mean: dist.expected_value(),
            observed: summary.snapshot(),
        };

        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_sample_report(&report);
        }
        return Ok(());
    }

    // One event per interval, timestamped at its scheduled onset
    let stdout = io::stdout();
    let mut emitter = EventEmitter::new(stdout.lock());
    let mut clock = 0u64;
    for _ in 0..args.count {
        let interval = dist.next_interval(&mut rng);
        clock = clock.saturating_add(interval);
        emitter.emit(config.events.interval_code, clock, interval as i64);
    }
    emitter.flush()?;
    Ok(())
}

fn print_sample_report(report: &SampleReport) {
    let fmt_opt = |v: Option<u64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());

    println!("Distribution: {}", report.distribution);
    println!("  Expected mean: {:.1}", report.expected_mean);
    println!("  Samples:       {}", report.observed.count);
    if let Some(mean) = report.observed.mean {
        println!("  Observed mean: {:.1}", mean);
    }
    println!("  Min:           {}", fmt_opt(report.observed.min));
    println!("  Max:           {}", fmt_opt(report.observed.max));
    println!("  Percentiles:");
    println!("    p50: {}", fmt_opt(report.observed.p50));
    println!("    p90: {}", fmt_opt(report.observed.p90));
    println!("    p99: {}", fmt_opt(report.observed.p99));
}

fn run_shuffle(config: &Config) -> Result<()> {
    let mut rng = session_rng(config.seed);
    let mut block = trial_block(&config.trials.counts);

    let stdout = io::stdout();
    let mut emitter = EventEmitter::new(stdout.lock());
    let mut index = 0u64;
    for _ in 0..config.trials.blocks {
        shuffle(&mut rng, &mut block);
        for &label in &block {
            emitter.emit(config.events.trial_code, index, i64::from(label));
            index += 1;
        }
    }
    emitter.flush()?;
    Ok(())
}

/// Decoding report
#[derive(Serialize, Default)]
struct DecodeReport {
    events: u64,
    text_lines: u64,
    per_code: BTreeMap<u32, u64>,
    first_timestamp: Option<u64>,
    last_timestamp: Option<u64>,
    ended: bool,
}

fn run_decode(config: &Config, args: &DecodeArgs) -> Result<()> {
    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut reader = EventReader::new(input);
    if !args.no_end {
        reader = reader.with_end_code(config.events.end_code);
    }

    let mut report = DecodeReport::default();
    for line in reader {
        match line.context("Failed to read input")? {
            SerialLine::Event(record) => {
                report.events += 1;
                *report.per_code.entry(record.code).or_insert(0) += 1;
                report.first_timestamp.get_or_insert(record.timestamp);
                report.last_timestamp = Some(record.timestamp);
                if !args.no_end && record.code == config.events.end_code {
                    report.ended = true;
                }
            }
            SerialLine::Text(text) => {
                report.text_lines += 1;
                if args.echo_text {
                    eprintln!("  [device]: {}", text);
                }
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Events:     {}", report.events)?;
    writeln!(out, "Text lines: {}", report.text_lines)?;
    if let (Some(first), Some(last)) = (report.first_timestamp, report.last_timestamp) {
        writeln!(out, "Span:       {} - {}", first, last)?;
    }
    writeln!(
        out,
        "End code:   {}",
        if report.ended { "received" } else { "not received" }
    )?;
    writeln!(out, "Per code:")?;
    for (code, count) in &report.per_code {
        writeln!(out, "  {:>5}: {}", code, count)?;
    }
    Ok(())
}
