//! Prosperity Standings - round-over-round standings table builder
//!
//! A CLI tool that merges per-round roster and leaderboard snapshots into
//! one team-keyed table and writes it, flattened with deltas, as JSON for
//! the standings grid.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any failure (bad arguments, unreadable snapshot, inconsistent input)

mod analysis;
mod cli;
mod config;
mod countries;
mod models;
mod report;
mod snapshot;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE};
use countries::RegionNames;
use models::ProcessedData;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration first so `general.verbose` can raise the log level
    let config = match prepare_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(args.log_level(config.general.verbose));

    info!("Prosperity Standings v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    if let Err(e) = run(&args, &config) {
        error!("Processing failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .standings.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to customize the data directory, rounds, and output.");
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the complete processing workflow.
fn run(args: &Args, config: &Config) -> Result<()> {
    let start_time = Instant::now();

    if !args.quiet {
        println!("📥 Loading snapshots from: {}", config.input.data_dir);
    }
    let data = build_table(config)?;

    if args.dry_run {
        if !args.quiet {
            println!("\n🔍 Dry run: snapshots are consistent, nothing written.\n");
            print!("{}", report::render_round_summary(&data.rounds, data.rows.len()));
        }
        return Ok(());
    }

    let output = report::generate_json(&data, config.output.format, config.output.pretty)?;
    let output_path = Path::new(&config.general.output);
    report::write_output(output_path, &output)?;

    if !args.quiet {
        println!("\n📊 Standings Summary:");
        print!("{}", report::render_round_summary(&data.rounds, data.rows.len()));
        println!("   Duration: {:.2}s", start_time.elapsed().as_secs_f64());
        println!("\n✅ Done! Table saved to: {}", output_path.display());
    }

    Ok(())
}

/// Load, aggregate and flatten every configured round.
fn build_table(config: &Config) -> Result<ProcessedData> {
    let sources = snapshot::resolve_rounds(&config.input);
    if sources.is_empty() {
        anyhow::bail!("No rounds configured");
    }
    info!("Processing {} rounds", sources.len());

    let rounds = snapshot::load_rounds(&sources)?;
    let names = RegionNames::with_overrides(config.countries.clone());

    let data = analysis::process(&rounds, &names, config.output.order)
        .context("Snapshots are inconsistent")?;
    info!("Built {} team rows", data.rows.len());

    Ok(data)
}

/// Load the config file and apply command-line overrides.
fn prepare_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);
    Ok(config)
}

/// Load configuration from file or use defaults.
///
/// Runs before the subscriber is installed, so problems go to stderr.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("⚠️  Failed to load {}: {:#}", CONFIG_FILE, e);
            Ok(Config::default())
        }
    }
}
