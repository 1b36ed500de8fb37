//! Round aggregation.
//!
//! Merges each round's roster and track leaderboards into one team-keyed
//! time series. Rounds must be applied in ascending order.

use crate::countries::RegionNames;
use crate::models::{RoundInput, RoundResult, RoundSummary, Standing, TeamId, TeamRecord, Track};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq)]
pub enum AggregateError {
    #[error("team {team_id} ({team_name}) has unknown country code {code:?}")]
    UnknownCountry {
        team_id: TeamId,
        team_name: String,
        code: String,
    },

    #[error("{round}: {track} leaderboard lists team {team_id}, which is not in any roster")]
    UnknownTeam {
        round: String,
        track: Track,
        team_id: TeamId,
    },

    #[error("{round}: {track} leaderboard lists team {team_id}, which is unranked this round")]
    UnrankedTeam {
        round: String,
        track: Track,
        team_id: TeamId,
    },

    #[error("{label}: more rounds applied than the {declared} declared")]
    UndeclaredRound { declared: usize, label: String },
}

pub type Result<T> = std::result::Result<T, AggregateError>;

/// Merged results of all rounds.
///
/// Teams are kept in the order they first appeared in a roster. That order
/// is incidental; sort explicitly when a business order is needed.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    teams: Vec<TeamRecord>,
    index: HashMap<TeamId, usize>,
    summaries: Vec<RoundSummary>,
}

impl Aggregation {
    /// Teams in first-seen order.
    pub fn teams(&self) -> &[TeamRecord] {
        &self.teams
    }

    #[allow(dead_code)] // Lookup by id, rows only need iteration
    pub fn team(&self, id: TeamId) -> Option<&TeamRecord> {
        self.index.get(&id).map(|&i| &self.teams[i])
    }

    /// One summary per round, oldest first.
    pub fn summaries(&self) -> &[RoundSummary] {
        &self.summaries
    }
}

/// Aggregate all rounds, oldest first.
pub fn aggregate(rounds: &[RoundInput], names: &RegionNames) -> Result<Aggregation> {
    let mut aggregator = Aggregator::new(rounds.len(), names);
    for round in rounds {
        aggregator.apply_round(round)?;
    }
    Ok(aggregator.finish())
}

/// Incremental builder behind [`aggregate`].
pub struct Aggregator<'a> {
    round_count: usize,
    names: &'a RegionNames,
    aggregation: Aggregation,
}

impl<'a> Aggregator<'a> {
    pub fn new(round_count: usize, names: &'a RegionNames) -> Self {
        Self {
            round_count,
            names,
            aggregation: Aggregation::default(),
        }
    }

    /// Applies the next round.
    ///
    /// Every leaderboard entry must refer to a team ranked in this round's
    /// roster; anything else is rejected.
    pub fn apply_round(&mut self, input: &RoundInput) -> Result<()> {
        let round = self.aggregation.summaries.len();
        if round >= self.round_count {
            return Err(AggregateError::UndeclaredRound {
                declared: self.round_count,
                label: input.label.clone(),
            });
        }

        self.aggregation
            .summaries
            .push(RoundSummary::from_roster(&input.label, &input.roster));

        for entry in &input.roster {
            let team = self.team_entry(entry.team_id, &entry.team_name, &entry.country_code)?;

            let Some(rank) = entry.overall_rank else {
                debug!("{}: team {} is unranked", input.label, entry.team_id);
                continue;
            };
            team.results[round] = Some(RoundResult::new(rank, entry.overall_profit));
        }

        for track in Track::ALL {
            for entry in input.leaderboard.entries(track) {
                let result = self.ranked_result(round, input, track, entry.team_id)?;
                *result.track_mut(track) = Some(Standing::ranked(entry.rank, entry.profit));
            }
        }

        for team in &mut self.aggregation.teams {
            if let Some(result) = team.results[round].as_mut() {
                if let Some(inferred) = result.complete_tracks() {
                    debug!(
                        "{}: inferred {} profit for team {}",
                        input.label, inferred, team.id
                    );
                }
            }
        }

        Ok(())
    }

    pub fn finish(self) -> Aggregation {
        self.aggregation
    }

    /// Returns the record for a team, creating it on first sight.
    fn team_entry(&mut self, id: TeamId, name: &str, code: &str) -> Result<&mut TeamRecord> {
        let aggregation = &mut self.aggregation;

        let index = match aggregation.index.get(&id) {
            Some(&index) => index,
            None => {
                let country =
                    self.names
                        .display_name(code)
                        .ok_or_else(|| AggregateError::UnknownCountry {
                            team_id: id,
                            team_name: name.to_string(),
                            code: code.to_string(),
                        })?;

                aggregation.teams.push(TeamRecord::new(
                    id,
                    name.to_string(),
                    country,
                    self.round_count,
                ));
                aggregation.index.insert(id, aggregation.teams.len() - 1);
                aggregation.teams.len() - 1
            }
        };

        Ok(&mut aggregation.teams[index])
    }

    fn ranked_result(
        &mut self,
        round: usize,
        input: &RoundInput,
        track: Track,
        team_id: TeamId,
    ) -> Result<&mut RoundResult> {
        let index = *self
            .aggregation
            .index
            .get(&team_id)
            .ok_or_else(|| AggregateError::UnknownTeam {
                round: input.label.clone(),
                track,
                team_id,
            })?;

        self.aggregation.teams[index].results[round]
            .as_mut()
            .ok_or_else(|| AggregateError::UnrankedTeam {
                round: input.label.clone(),
                track,
                team_id,
            })
    }
}
