//! Row flattening.
//!
//! Turns the per-team time series into fixed-width rows of
//! (value, delta) pairs, newest round first.

use crate::analysis::aggregator::Aggregation;
use crate::models::{Category, Cell, Field, OutputRow, RoundResult, RowOrder, TeamRecord};
use std::cmp::Ordering;

/// Deltas smaller than this are reported as exactly zero.
pub const DELTA_EPSILON: f64 = 1e-6;

/// Metrics emitted for every round, in column order.
pub const ROUND_METRICS: [(Category, Field); 4] = [
    (Category::Overall, Field::Rank),
    (Category::Overall, Field::Profit),
    (Category::Manual, Field::Profit),
    (Category::Algorithmic, Field::Profit),
];

/// Leading team columns (name, country).
pub const TEAM_COLUMNS: usize = 2;

/// Columns per round: a (value, delta) pair per metric.
pub const ROUND_COLUMNS: usize = ROUND_METRICS.len() * 2;

/// A value and its change since the previous round.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValueDelta {
    pub value: Option<f64>,
    pub delta: Option<f64>,
}

/// Computes the value of a metric in a round and its delta against the
/// round before it.
///
/// Rank deltas are `previous - current` so an improvement is positive.
pub fn value_delta_pair(
    results: &[Option<RoundResult>],
    round: usize,
    category: Category,
    field: Field,
) -> ValueDelta {
    let Some(current) = metric(results, round, category, field) else {
        return ValueDelta::default();
    };

    let delta = round
        .checked_sub(1)
        .and_then(|previous| metric(results, previous, category, field))
        .map(|previous| {
            let delta = match field {
                Field::Rank => previous - current,
                Field::Profit => current - previous,
            };
            if delta.abs() < DELTA_EPSILON {
                0.0
            } else {
                delta
            }
        });

    ValueDelta {
        value: Some(current),
        delta,
    }
}

fn metric(
    results: &[Option<RoundResult>],
    round: usize,
    category: Category,
    field: Field,
) -> Option<f64> {
    results
        .get(round)?
        .as_ref()?
        .category(category)?
        .value(field)
}

/// Builds the output row of one team.
pub fn team_row(team: &TeamRecord) -> OutputRow {
    let mut row = Vec::with_capacity(TEAM_COLUMNS + team.results.len() * ROUND_COLUMNS);
    row.push(Cell::Text(team.name.clone()));
    row.push(Cell::Text(team.country.clone()));

    for round in (0..team.results.len()).rev() {
        for (category, field) in ROUND_METRICS {
            let pair = value_delta_pair(&team.results, round, category, field);
            row.push(Cell::from_value(field, pair.value));
            row.push(Cell::from_value(field, pair.delta));
        }
    }

    row
}

/// Flattens every team, in the requested order.
pub fn flatten(aggregation: &Aggregation, order: RowOrder) -> Vec<OutputRow> {
    let mut rows: Vec<OutputRow> = aggregation.teams().iter().map(team_row).collect();

    if order == RowOrder::LatestRank {
        sort_by_latest_rank(&mut rows);
    }

    rows
}

/// Sorts rows by the newest round's overall rank, unranked last, then name.
pub fn sort_by_latest_rank(rows: &mut [OutputRow]) {
    rows.sort_by(|a, b| {
        let rank_a = a.get(TEAM_COLUMNS).and_then(Cell::as_f64);
        let rank_b = b.get(TEAM_COLUMNS).and_then(Cell::as_f64);

        let by_rank = match (rank_a, rank_b) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };

        by_rank.then_with(|| row_name(a).cmp(row_name(b)))
    });
}

fn row_name(row: &OutputRow) -> &str {
    match row.first() {
        Some(Cell::Text(name)) => name,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Standing;

    fn ranked(rank: u32, profit: f64) -> Option<RoundResult> {
        Some(RoundResult::new(rank, profit))
    }

    fn team(name: &str, results: Vec<Option<RoundResult>>) -> TeamRecord {
        TeamRecord {
            id: 1,
            name: name.to_string(),
            country: "Netherlands".to_string(),
            results,
        }
    }

    #[test]
    fn test_rank_delta_improvement_is_positive() {
        let results = vec![ranked(3, 0.0), ranked(1, 0.0)];
        let pair = value_delta_pair(&results, 1, Category::Overall, Field::Rank);
        assert_eq!(pair.value, Some(1.0));
        assert_eq!(pair.delta, Some(2.0));
    }

    #[test]
    fn test_profit_delta_is_plain_difference() {
        let results = vec![ranked(1, 100.0), ranked(1, 80.0)];
        let pair = value_delta_pair(&results, 1, Category::Overall, Field::Profit);
        assert_eq!(pair.value, Some(80.0));
        assert_eq!(pair.delta, Some(-20.0));
    }

    #[test]
    fn test_tiny_delta_is_clamped() {
        let results = vec![ranked(1, 100.0), ranked(1, 100.0 + 3e-7)];
        let pair = value_delta_pair(&results, 1, Category::Overall, Field::Profit);
        assert_eq!(pair.delta, Some(0.0));

        let results = vec![ranked(1, 100.0), ranked(1, 100.0 - 3e-7)];
        let pair = value_delta_pair(&results, 1, Category::Overall, Field::Profit);
        assert_eq!(pair.delta, Some(0.0));
    }

    #[test]
    fn test_first_round_has_no_delta() {
        let results = vec![ranked(5, 42.0)];
        let pair = value_delta_pair(&results, 0, Category::Overall, Field::Profit);
        assert_eq!(pair.value, Some(42.0));
        assert_eq!(pair.delta, None);
    }

    #[test]
    fn test_absent_slot_or_category() {
        let results = vec![ranked(1, 10.0), None];
        assert_eq!(
            value_delta_pair(&results, 1, Category::Overall, Field::Rank),
            ValueDelta::default()
        );
        assert_eq!(
            value_delta_pair(&results, 0, Category::Manual, Field::Profit),
            ValueDelta::default()
        );
    }

    #[test]
    fn test_inferred_rank_is_null() {
        let mut result = RoundResult::new(1, 10.0);
        result.manual = Some(Standing::unranked(4.0));
        let results = vec![Some(result)];

        assert_eq!(
            value_delta_pair(&results, 0, Category::Manual, Field::Rank),
            ValueDelta::default()
        );
    }

    #[test]
    fn test_previous_missing_category_gives_no_delta() {
        let mut current = RoundResult::new(1, 10.0);
        current.manual = Some(Standing::ranked(1, 4.0));
        let results = vec![ranked(2, 5.0), Some(current)];

        let pair = value_delta_pair(&results, 1, Category::Manual, Field::Profit);
        assert_eq!(pair.value, Some(4.0));
        assert_eq!(pair.delta, None);
    }

    #[test]
    fn test_previous_unranked_gives_no_delta() {
        let results = vec![None, ranked(2, 5.0)];
        let pair = value_delta_pair(&results, 1, Category::Overall, Field::Rank);
        assert_eq!(pair.value, Some(2.0));
        assert_eq!(pair.delta, None);
    }

    #[test]
    fn test_team_row_layout() {
        let row = team_row(&team("Alpha", vec![ranked(2, 500.0), None, ranked(1, 700.0)]));

        assert_eq!(row.len(), TEAM_COLUMNS + 3 * ROUND_COLUMNS);
        assert_eq!(row[0], Cell::Text("Alpha".to_string()));
        assert_eq!(row[1], Cell::Text("Netherlands".to_string()));

        // Newest round first; its predecessor is unranked.
        assert_eq!(row[2], Cell::Integer(1));
        assert_eq!(row[3], Cell::Empty);
        assert_eq!(row[4], Cell::Decimal(700.0));
        assert_eq!(row[5], Cell::Empty);

        // Middle round is entirely empty.
        assert!(row[10..18].iter().all(|c| *c == Cell::Empty));

        // Oldest round.
        assert_eq!(row[18], Cell::Integer(2));
        assert_eq!(row[20], Cell::Decimal(500.0));
    }

    #[test]
    fn test_sort_by_latest_rank() {
        let mut rows = vec![
            team_row(&team("Gamma", vec![None])),
            team_row(&team("Beta", vec![ranked(2, 0.0)])),
            team_row(&team("Alpha", vec![None])),
            team_row(&team("Delta", vec![ranked(1, 0.0)])),
        ];

        sort_by_latest_rank(&mut rows);

        let names: Vec<_> = rows.iter().map(row_name).collect();
        assert_eq!(names, vec!["Delta", "Beta", "Alpha", "Gamma"]);
    }
}
