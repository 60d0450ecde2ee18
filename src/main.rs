//! site-sweep main entry point
//!
//! This is the command-line interface for the site-sweep crawler.

use anyhow::Context;
use clap::Parser;
use site_sweep::config::{load_config, validate, Config};
use site_sweep::crawler::Coordinator;
use site_sweep::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// site-sweep: a same-domain web crawler
///
/// Starting from SEED, site-sweep follows every hyperlink that stays on the
/// seed's host and prints each URL it discovers. Logs go to stderr; stdout
/// carries only discovered URLs.
#[derive(Parser, Debug)]
#[command(name = "site-sweep")]
#[command(version)]
#[command(about = "A same-domain web crawler", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(value_name = "SEED")]
    seed: String,

    /// Maximum number of requests in flight at once
    #[arg(short, long, value_name = "N")]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print crawl statistics to stderr when the crawl finishes
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    tracing::debug!("Effective configuration: {:?}", config);

    let mut coordinator = Coordinator::new(&cli.seed, &config)
        .with_context(|| format!("Failed to start crawl at {}", cli.seed))?;

    let stats = coordinator.run().await.context("Crawl failed")?;

    if cli.stats {
        print_statistics(&stats);
    }

    Ok(())
}

/// Loads the configuration file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency_limit = concurrency;
    }

    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout_secs = timeout;
    }

    validate(&config).context("Invalid configuration")?;

    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_sweep=info,warn"),
            1 => EnvFilter::new("site_sweep=debug,info"),
            2 => EnvFilter::new("site_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
