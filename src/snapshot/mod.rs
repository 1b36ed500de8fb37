//! Round snapshot loading.
//!
//! Resolves where each round's roster and leaderboard files live and parses
//! them from the upstream JSON format into [`RoundInput`]s.

use crate::config::InputConfig;
use crate::models::{Leaderboard, LeaderboardEntry, RosterEntry, RoundInput, TeamId};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Location of one round's snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSource {
    pub label: String,
    pub roster: PathBuf,
    pub leaderboard: PathBuf,
}

/// Resolves the rounds to process, oldest first.
///
/// An explicit `[[input.rounds]]` list wins over the generated patterns.
pub fn resolve_rounds(config: &InputConfig) -> Vec<RoundSource> {
    let data_dir = Path::new(&config.data_dir);

    if !config.rounds.is_empty() {
        return config
            .rounds
            .iter()
            .enumerate()
            .map(|(i, round)| RoundSource {
                label: round
                    .label
                    .clone()
                    .unwrap_or_else(|| expand_pattern(&config.label_pattern, i + 1)),
                roster: data_dir.join(&round.roster),
                leaderboard: data_dir.join(&round.leaderboard),
            })
            .collect();
    }

    (1..=config.round_count)
        .map(|round| RoundSource {
            label: expand_pattern(&config.label_pattern, round),
            roster: data_dir.join(expand_pattern(&config.roster_pattern, round)),
            leaderboard: data_dir.join(expand_pattern(&config.leaderboard_pattern, round)),
        })
        .collect()
}

/// Substitutes `{round}` and `{next}` in a path or label pattern.
pub fn expand_pattern(pattern: &str, round: usize) -> String {
    pattern
        .replace("{round}", &round.to_string())
        .replace("{next}", &(round + 1).to_string())
}

/// Loads both snapshots of a round.
pub fn load_round(source: &RoundSource) -> Result<RoundInput> {
    let roster: Vec<RawRosterEntry> = read_json(&source.roster)?;
    let leaderboard: RawLeaderboard = read_json(&source.leaderboard)?;

    let leaderboard = leaderboard
        .into_leaderboard()
        .with_context(|| format!("Invalid leaderboard: {}", source.leaderboard.display()))?;

    info!(
        "Loaded {}: {} roster entries, {} manual, {} algorithmic",
        source.label,
        roster.len(),
        leaderboard.manual.len(),
        leaderboard.algorithmic.len()
    );

    Ok(RoundInput {
        label: source.label.clone(),
        roster: roster.into_iter().map(RosterEntry::from).collect(),
        leaderboard,
    })
}

/// Loads all rounds in order, failing on the first bad snapshot.
pub fn load_rounds(sources: &[RoundSource]) -> Result<Vec<RoundInput>> {
    sources.iter().map(load_round).collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading {}", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRosterEntry {
    team_id: TeamId,
    profit: f64,
    current_place: Option<u32>,
    country: String,
    team: RawTeam,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    name: String,
}

impl From<RawRosterEntry> for RosterEntry {
    fn from(raw: RawRosterEntry) -> Self {
        Self {
            team_id: raw.team_id,
            team_name: raw.team.name,
            country_code: raw.country,
            overall_rank: raw.current_place,
            overall_profit: raw.profit,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawLeaderboard {
    #[serde(default)]
    manual: Vec<RawLeaderboardEntry>,
    #[serde(default, rename = "algo", alias = "algorithmic")]
    algorithmic: Vec<RawLeaderboardEntry>,
}

impl RawLeaderboard {
    fn into_leaderboard(self) -> Result<Leaderboard> {
        Ok(Leaderboard {
            manual: convert_entries(self.manual)?,
            algorithmic: convert_entries(self.algorithmic)?,
        })
    }
}

fn convert_entries(entries: Vec<RawLeaderboardEntry>) -> Result<Vec<LeaderboardEntry>> {
    entries
        .into_iter()
        .map(|entry| -> Result<LeaderboardEntry> {
            Ok(LeaderboardEntry {
                team_id: entry.team_id.parse()?,
                rank: entry.position,
                profit: entry.profit,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLeaderboardEntry {
    team_id: RawTeamId,
    position: u32,
    profit: f64,
}

/// Leaderboards publish team ids as strings; accept numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTeamId {
    Number(TeamId),
    Text(String),
}

impl RawTeamId {
    fn parse(&self) -> Result<TeamId> {
        match self {
            RawTeamId::Number(id) => Ok(*id),
            RawTeamId::Text(text) => text
                .trim()
                .parse()
                .with_context(|| format!("Invalid team id: {text:?}")),
        }
    }
}
