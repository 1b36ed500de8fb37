//! Data models for the standings builder.
//!
//! This module contains the round inputs, the per-team time series built
//! from them, and the flattened output shapes consumed by the grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Competition-wide team identifier.
pub type TeamId = u32;

/// One (rank, profit) standing within a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standing {
    /// Rank within the category, `None` when the standing was inferred.
    pub rank: Option<u32>,
    /// Profit within the category.
    pub profit: f64,
}

impl Standing {
    /// Creates a ranked standing.
    pub fn ranked(rank: u32, profit: f64) -> Self {
        Self {
            rank: Some(rank),
            profit,
        }
    }

    /// Creates an unranked standing.
    pub fn unranked(profit: f64) -> Self {
        Self { rank: None, profit }
    }

    /// Returns the requested field as a number, if present.
    pub fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::Rank => self.rank.map(f64::from),
            Field::Profit => Some(self.profit),
        }
    }
}

/// Scoring category of a round result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Overall,
    Manual,
    Algorithmic,
}

/// The two leaderboard tracks whose profits sum to the overall profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Manual,
    Algorithmic,
}

impl Track {
    pub const ALL: [Track; 2] = [Track::Manual, Track::Algorithmic];

    /// The complementary track.
    pub fn opposite(self) -> Track {
        match self {
            Track::Manual => Track::Algorithmic,
            Track::Algorithmic => Track::Manual,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Manual => write!(f, "manual"),
            Track::Algorithmic => write!(f, "algorithmic"),
        }
    }
}

/// Field of a standing that can be tracked across rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Rank,
    Profit,
}

/// A team's result in a round it was ranked in.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub overall: Standing,
    pub manual: Option<Standing>,
    pub algorithmic: Option<Standing>,
}

impl RoundResult {
    /// Creates a result with only the overall standing known.
    pub fn new(rank: u32, profit: f64) -> Self {
        Self {
            overall: Standing::ranked(rank, profit),
            manual: None,
            algorithmic: None,
        }
    }

    /// Returns the standing for a category, if present.
    pub fn category(&self, category: Category) -> Option<&Standing> {
        match category {
            Category::Overall => Some(&self.overall),
            Category::Manual => self.manual.as_ref(),
            Category::Algorithmic => self.algorithmic.as_ref(),
        }
    }

    pub fn track(&self, track: Track) -> Option<&Standing> {
        match track {
            Track::Manual => self.manual.as_ref(),
            Track::Algorithmic => self.algorithmic.as_ref(),
        }
    }

    pub fn track_mut(&mut self, track: Track) -> &mut Option<Standing> {
        match track {
            Track::Manual => &mut self.manual,
            Track::Algorithmic => &mut self.algorithmic,
        }
    }

    /// Fills a missing track from the overall profit when exactly one
    /// track is known. The inferred standing has no rank.
    ///
    /// Returns the track that was filled in, if any.
    pub fn complete_tracks(&mut self) -> Option<Track> {
        for track in Track::ALL {
            let missing = track.opposite();
            if let (Some(known), None) = (self.track(track), self.track(missing)) {
                let profit = self.overall.profit - known.profit;
                *self.track_mut(missing) = Some(Standing::unranked(profit));
                return Some(missing);
            }
        }
        None
    }
}

/// One team's entry in a round roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub team_id: TeamId,
    pub team_name: String,
    /// ISO 3166-1 alpha-2 code.
    pub country_code: String,
    /// `None` when the team is unranked (disqualified or incomplete).
    pub overall_rank: Option<u32>,
    pub overall_profit: f64,
}

/// One team's entry in a track leaderboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderboardEntry {
    pub team_id: TeamId,
    pub rank: u32,
    pub profit: f64,
}

/// Per-track leaderboards of a round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    pub manual: Vec<LeaderboardEntry>,
    pub algorithmic: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn entries(&self, track: Track) -> &[LeaderboardEntry] {
        match track {
            Track::Manual => &self.manual,
            Track::Algorithmic => &self.algorithmic,
        }
    }
}

/// Everything known about one round before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundInput {
    /// Display label, e.g. "Round 3".
    pub label: String,
    pub roster: Vec<RosterEntry>,
    pub leaderboard: Leaderboard,
}

/// A team and its results across all declared rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
    pub country: String,
    /// One slot per declared round, `None` while unranked.
    pub results: Vec<Option<RoundResult>>,
}

impl TeamRecord {
    pub fn new(id: TeamId, name: String, country: String, round_count: usize) -> Self {
        Self {
            id,
            name,
            country,
            results: vec![None; round_count],
        }
    }
}

/// Team counts of a single round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub label: String,
    pub registered_teams: usize,
    pub ranked_teams: usize,
}

impl RoundSummary {
    /// Creates a summary from a round roster.
    pub fn from_roster(label: &str, roster: &[RosterEntry]) -> Self {
        Self {
            label: label.to_string(),
            registered_teams: roster.len(),
            ranked_teams: roster.iter().filter(|e| e.overall_rank.is_some()).count(),
        }
    }
}

/// A single cell of an output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Empty,
}

impl Cell {
    /// Converts a tracked value to a cell, ranks as integers.
    pub fn from_value(field: Field, value: Option<f64>) -> Self {
        match (field, value) {
            (_, None) => Cell::Empty,
            (Field::Rank, Some(v)) => Cell::Integer(v.round() as i64),
            (Field::Profit, Some(v)) => Cell::Decimal(v),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(v) => Some(*v as f64),
            Cell::Decimal(v) => Some(*v),
            Cell::Text(_) | Cell::Empty => None,
        }
    }
}

/// Positional row: name, country, then eight cells per round, newest first.
pub type OutputRow = Vec<Cell>;

/// Row ordering applied after flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RowOrder {
    /// Order in which teams first appeared in a roster
    #[default]
    FirstSeen,
    /// Most recent overall rank ascending, unranked teams last
    LatestRank,
}

/// The processed table written for the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedData {
    pub rows: Vec<OutputRow>,
    pub rounds: Vec<RoundSummary>,
}

/// Older output shape with parallel count arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProcessedData {
    pub rows: Vec<OutputRow>,
    pub unique_teams_by_round: Vec<usize>,
    pub ranked_teams_by_round: Vec<usize>,
}

impl From<ProcessedData> for LegacyProcessedData {
    fn from(data: ProcessedData) -> Self {
        Self {
            unique_teams_by_round: data.rounds.iter().map(|r| r.registered_teams).collect(),
            ranked_teams_by_round: data.rounds.iter().map(|r| r.ranked_teams).collect(),
            rows: data.rows,
        }
    }
}
