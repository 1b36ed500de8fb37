//! Standings analysis.
//!
//! Aggregation merges round inputs into per-team results; flattening turns
//! those into display rows.

pub mod aggregator;
pub mod flatten;

pub use aggregator::{aggregate, AggregateError};
pub use flatten::flatten;

use crate::countries::RegionNames;
use crate::models::{ProcessedData, RoundInput, RowOrder};

/// Runs aggregation and flattening over all rounds, oldest first.
pub fn process(
    rounds: &[RoundInput],
    names: &RegionNames,
    order: RowOrder,
) -> Result<ProcessedData, AggregateError> {
    let aggregation = aggregate(rounds, names)?;

    Ok(ProcessedData {
        rows: flatten(&aggregation, order),
        rounds: aggregation.summaries().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cell, Leaderboard, LeaderboardEntry, RosterEntry};

    fn two_rounds() -> Vec<RoundInput> {
        let team = |rank, profit| RosterEntry {
            team_id: 17,
            team_name: "Tidewater".to_string(),
            country_code: "HK".to_string(),
            overall_rank: Some(rank),
            overall_profit: profit,
        };

        vec![
            RoundInput {
                label: "Round 1".to_string(),
                roster: vec![team(2, 500.0)],
                leaderboard: Leaderboard::default(),
            },
            RoundInput {
                label: "Round 2".to_string(),
                roster: vec![team(1, 700.0)],
                leaderboard: Leaderboard {
                    manual: vec![LeaderboardEntry {
                        team_id: 17,
                        rank: 1,
                        profit: 300.0,
                    }],
                    algorithmic: vec![],
                },
            },
        ]
    }

    #[test]
    fn test_two_round_scenario() {
        let data = process(&two_rounds(), &RegionNames::default(), RowOrder::FirstSeen).unwrap();

        assert_eq!(data.rows.len(), 1);
        let row = &data.rows[0];

        assert_eq!(row[0], Cell::Text("Tidewater".to_string()));
        assert_eq!(row[1], Cell::Text("Hong Kong".to_string()));

        let tail = &row[2..];
        let expected = vec![
            // Round 2
            Cell::Integer(1),
            Cell::Integer(1),
            Cell::Decimal(700.0),
            Cell::Decimal(200.0),
            Cell::Decimal(300.0),
            Cell::Empty,
            Cell::Decimal(400.0),
            Cell::Empty,
            // Round 1
            Cell::Integer(2),
            Cell::Empty,
            Cell::Decimal(500.0),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
        ];
        assert_eq!(tail, expected.as_slice());

        let labels: Vec<_> = data.rounds.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Round 1", "Round 2"]);
    }

    #[test]
    fn test_reprocessing_is_identical() {
        let rounds = two_rounds();
        let names = RegionNames::default();

        let first = serde_json::to_string(&process(&rounds, &names, RowOrder::FirstSeen).unwrap())
            .unwrap();
        let second = serde_json::to_string(&process(&rounds, &names, RowOrder::FirstSeen).unwrap())
            .unwrap();

        assert_eq!(first, second);
    }
}
