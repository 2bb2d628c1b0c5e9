use anyhow::Context;
use clap::Parser;
use omap_harness::{Harness, HarnessConfig};
use omap_logger::Logger;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Measures explicit mappers against a convention-based reference mapper.
#[derive(Parser, Debug)]
#[command(name = "omap-harness", version, about)]
struct Args {
    /// Configuration file (TOML, JSON, YAML...). Defaults to `omap-harness.*` if present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Measured calls per case.
    #[arg(long)]
    iterations: Option<u64>,

    /// Unmeasured calls per case.
    #[arg(long)]
    warmup: Option<u64>,

    /// Concurrent tasks for the async case.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Override the configured log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Print the report as JSON on stdout.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply(&self, config: &mut HarnessConfig) {
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(warmup) = self.warmup {
            config.warmup = warmup;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(level) = &self.log_level {
            config.log.level.clone_from(level);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config =
        HarnessConfig::load(args.config.as_deref()).context("Critical: Configuration is malformed")?;
    args.apply(&mut config);
    config.validate().context("Invalid command line overrides")?;

    let _log = Logger::from_settings(env!("CARGO_PKG_NAME"), &config.log)?;
    info!(
        iterations = config.iterations,
        warmup = config.warmup,
        concurrency = config.concurrency,
        "Starting mapping harness"
    );

    let report = Harness::run(&config)?;
    report.log();

    let mut stdout = std::io::stdout().lock();
    if args.json {
        writeln!(stdout, "{}", report.to_json()?)?;
    } else {
        write!(stdout, "{report}")?;
    }
    Ok(())
}
