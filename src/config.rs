//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.standings.toml` files.

use crate::cli::OutputFormat;
use crate::models::RowOrder;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".standings.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Snapshot input settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Country display-name overrides, keyed by alpha-2 code.
    #[serde(default)]
    pub countries: BTreeMap<String, String>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "processed.json".to_string()
}

/// Where round snapshots are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory that snapshot paths are relative to.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Number of rounds generated from the patterns.
    #[serde(default = "default_round_count")]
    pub round_count: usize,

    /// Roster path pattern; `{round}` is the round number, `{next}` the one after it.
    #[serde(default = "default_roster_pattern")]
    pub roster_pattern: String,

    /// Leaderboard path pattern.
    #[serde(default = "default_leaderboard_pattern")]
    pub leaderboard_pattern: String,

    /// Round label pattern.
    #[serde(default = "default_label_pattern")]
    pub label_pattern: String,

    /// Explicit round list, oldest first. Overrides the patterns when set.
    #[serde(default)]
    pub rounds: Vec<RoundConfig>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            round_count: default_round_count(),
            roster_pattern: default_roster_pattern(),
            leaderboard_pattern: default_leaderboard_pattern(),
            label_pattern: default_label_pattern(),
            rounds: Vec::new(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_round_count() -> usize {
    5
}

fn default_roster_pattern() -> String {
    "round{round}/archipelago_ROUND{next}.json".to_string()
}

fn default_leaderboard_pattern() -> String {
    "round{round}/team-leaderboard.json".to_string()
}

fn default_label_pattern() -> String {
    "Round {round}".to_string()
}

/// One explicitly listed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    #[serde(default)]
    pub label: Option<String>,
    pub roster: String,
    pub leaderboard: String,
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output shape.
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print the JSON.
    #[serde(default)]
    pub pretty: bool,

    /// Row ordering.
    #[serde(default)]
    pub order: RowOrder,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when explicitly given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if args.verbose {
            self.general.verbose = true;
        }

        if let Some(ref data_dir) = args.data_dir {
            self.input.data_dir = data_dir.display().to_string();
        }
        if let Some(rounds) = args.rounds {
            // An explicit count replaces any listed rounds.
            self.input.round_count = rounds;
            self.input.rounds.clear();
        }

        if let Some(format) = args.format {
            self.output.format = format;
        }
        if let Some(order) = args.order {
            self.output.order = order;
        }
        if args.pretty {
            self.output.pretty = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "processed.json");
        assert_eq!(config.input.round_count, 5);
        assert_eq!(config.output.format, OutputFormat::Rounds);
        assert_eq!(config.output.order, RowOrder::FirstSeen);
        assert!(config.countries.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "web/processed.json"

[input]
data_dir = "snapshots"
round_count = 3

[output]
format = "legacy"
order = "latest-rank"
pretty = true

[countries]
TW = "Chinese Taipei"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "web/processed.json");
        assert_eq!(config.input.data_dir, "snapshots");
        assert_eq!(config.input.round_count, 3);
        assert_eq!(
            config.input.roster_pattern,
            "round{round}/archipelago_ROUND{next}.json"
        );
        assert_eq!(config.output.format, OutputFormat::Legacy);
        assert_eq!(config.output.order, RowOrder::LatestRank);
        assert!(config.output.pretty);
        assert_eq!(
            config.countries.get("TW").map(String::as_str),
            Some("Chinese Taipei")
        );
    }

    #[test]
    fn test_parse_explicit_rounds() {
        let toml_content = r#"
[[input.rounds]]
label = "Tutorial"
roster = "tutorial/roster.json"
leaderboard = "tutorial/leaderboard.json"

[[input.rounds]]
roster = "round1/roster.json"
leaderboard = "round1/leaderboard.json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.rounds.len(), 2);
        assert_eq!(config.input.rounds[0].label.as_deref(), Some("Tutorial"));
        assert_eq!(config.input.rounds[1].label, None);
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        config.input.rounds.push(RoundConfig {
            label: None,
            roster: "r.json".to_string(),
            leaderboard: "l.json".to_string(),
        });

        let mut args = Args::for_tests();
        args.data_dir = Some(PathBuf::from("elsewhere"));
        args.rounds = Some(2);
        args.format = Some(OutputFormat::Legacy);
        args.pretty = true;

        config.merge_with_args(&args);

        assert_eq!(config.input.data_dir, "elsewhere");
        assert_eq!(config.input.round_count, 2);
        assert!(config.input.rounds.is_empty());
        assert_eq!(config.output.format, OutputFormat::Legacy);
        assert_eq!(config.output.order, RowOrder::FirstSeen);
        assert!(config.output.pretty);
        assert_eq!(config.general.output, "processed.json");
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[input]"));
        assert!(toml_str.contains("[output]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.input.round_count, 5);
    }
}
