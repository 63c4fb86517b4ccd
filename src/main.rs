mod backend;
mod config;
mod credentials;
mod engine;
mod models;
mod types;
mod validation;

use std::env::current_exe;
use std::io::stderr;
use std::path::PathBuf;
use std::process::exit;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::backend::HmyCli;
use crate::config::{expand_home, PipelineConfig, SubmitMode};
use crate::credentials::TerminalPrompt;
use crate::engine::BatchEngine;

/// Sends a batch of transactions described in a CSV file through the `hmy` CLI.
///
/// Due to a possible nonce mismatch, do NOT have one `from` wallet appear in
/// multiple CSV files that are sent at the same time.
#[derive(Parser, Debug)]
#[command(name = "csv-batch-transfer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to the CSV file
    path: String,

    /// The node or endpoint to send the transactions to
    #[arg(short, long, default_value = config::DEFAULT_NODE)]
    node: String,

    /// Number of transactions to send in one batch to the CLI before checking output
    #[arg(long, default_value_t = config::DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Max seconds spent checking for a single transaction to confirm, ignored with --fast
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT_PER_TX.as_secs())]
    timeout_per_tx: u64,

    /// The chain id of the transactions (mainnet, testnet, stressnet, partner, dryrun)
    #[arg(long)]
    chain_id: Option<String>,

    /// Send transactions without waiting for transaction confirmation
    #[arg(long)]
    fast: bool,

    /// Use the default passphrase if no passphrase file or string is provided in the CSV file
    #[arg(long)]
    use_default_passphrase: bool,

    /// Say yes to the confirmation check
    #[arg(long)]
    yes: bool,

    /// Enable verbose mode when sending transactions
    #[arg(long)]
    verbose: bool,

    /// Path to the hmy CLI (defaults to `hmy` next to this binary)
    #[arg(long)]
    cli_path: Option<PathBuf>,

    /// Directory for the per-batch logs (defaults to this binary's directory)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Max seconds for any CLI call other than sending a batch
    #[arg(long, default_value_t = config::DEFAULT_QUERY_TIMEOUT.as_secs())]
    query_timeout: u64,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: String
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_level = parse_log_level(&cli.log_level);
    if cli.verbose && log_level < LevelFilter::DEBUG {
        log_level = LevelFilter::DEBUG;
    }

    setup_logging(log_level);

    let config = build_config(cli)?;
    let backend = HmyCli::new(config.cli_path.clone(), config.verbose, config.query_timeout)
        .context("Could not build the HTTP client")?;
    let mut engine = BatchEngine::new(config, backend, TerminalPrompt);

    let timer = Instant::now();

    match engine.run().await {
        Ok(report) => {
            info!(
                "Run finished as {:?} in {:?}: {} line(s) processed, {} skipped, {} batch(es) sent",
                report.status,
                timer.elapsed(),
                report.processed,
                report.rejected,
                report.outcomes.len()
            );

            for outcome in &report.outcomes {
                info!("Batch [{}] of {} transaction(s) logged at {}", outcome.index(), outcome.size(), outcome.log_path().display());
            }

            Ok(())
        },
        Err(error) => {
            error!("{:?} failure: {error}", error.kind());
            exit(1);
        }
    }
}

fn build_config(cli: Cli) -> Result<PipelineConfig> {
    let binary_directory = current_exe()
        .context("Could not locate this binary")?
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();

    let input_path = expand_home(&cli.path)?;
    let cli_path = cli.cli_path.unwrap_or_else(|| binary_directory.join("hmy"));
    let log_dir = cli.log_dir.unwrap_or(binary_directory);

    let mut config = PipelineConfig::new(input_path, cli_path, log_dir);
    config.node = cli.node;
    config.batch_size = cli.batch_size;
    config.timeout_per_tx = Duration::from_secs(cli.timeout_per_tx);
    config.submit_mode = if cli.fast { SubmitMode::Fast } else { SubmitMode::Wait };
    config.chain_id = cli.chain_id;
    config.use_default_secret = cli.use_default_passphrase;
    config.auto_confirm = cli.yes;
    config.verbose = cli.verbose;
    config.query_timeout = Duration::from_secs(cli.query_timeout);

    Ok(config)
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the transaction summary and prompts, logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
