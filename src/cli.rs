//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::RowOrder;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prosperity Standings - round-over-round standings table builder
///
/// Reads each round's roster and leaderboard snapshots, merges them into
/// one team-keyed table and writes the flattened rows, with deltas against
/// the previous round, as JSON for the standings grid.
///
/// Examples:
///   prosperity-standings --data-dir data --rounds 5
///   prosperity-standings --output web/processed.json --order latest-rank
///   prosperity-standings --format legacy --pretty
///   prosperity-standings --dry-run --verbose
///   prosperity-standings --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory containing the round snapshots
    ///
    /// Defaults to `data`, or `input.data_dir` from the config file.
    #[arg(short, long, value_name = "DIR", env = "STANDINGS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Number of rounds to process, starting at round 1
    #[arg(short, long, value_name = "COUNT")]
    pub rounds: Option<usize>,

    /// Output file path for the processed table
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .standings.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output shape (rounds, legacy)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Row order (first-seen, latest-rank)
    #[arg(long, value_name = "ORDER")]
    pub order: Option<RowOrder>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pub pretty: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load and aggregate the snapshots without writing output
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .standings.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Shape of the written JSON.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `{rows, rounds}` with labeled per-round summaries (default)
    #[default]
    Rounds,
    /// `{rows, uniqueTeamsByRound, rankedTeamsByRound}`
    Legacy,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.rounds == Some(0) {
            return Err("Rounds must be at least 1".to_string());
        }

        if let Some(ref data_dir) = self.data_dir {
            if !data_dir.exists() {
                return Err(format!(
                    "Data directory does not exist: {}",
                    data_dir.display()
                ));
            }
            if !data_dir.is_dir() {
                return Err(format!(
                    "Data path is not a directory: {}",
                    data_dir.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is `general.verbose` from the config file; `--quiet`
    /// overrides it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Args {
            data_dir: None,
            rounds: None,
            output: None,
            config: None,
            format: None,
            order: None,
            pretty: false,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
        }
    }
}
