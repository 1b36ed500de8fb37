//! Processed table output.
//!
//! This module serializes the processed table in the selected shape and
//! renders the console summary printed after a run.

use crate::cli::OutputFormat;
use crate::models::{LegacyProcessedData, ProcessedData, RoundSummary};
use anyhow::{Context, Result};
use std::path::Path;

/// Generate the output JSON in the requested shape.
pub fn generate_json(data: &ProcessedData, format: OutputFormat, pretty: bool) -> Result<String> {
    let json = match (format, pretty) {
        (OutputFormat::Rounds, false) => serde_json::to_string(data)?,
        (OutputFormat::Rounds, true) => serde_json::to_string_pretty(data)?,
        (OutputFormat::Legacy, pretty) => {
            let legacy = LegacyProcessedData::from(data.clone());
            if pretty {
                serde_json::to_string_pretty(&legacy)?
            } else {
                serde_json::to_string(&legacy)?
            }
        }
    };

    Ok(json)
}

/// Write the generated JSON, creating parent directories as needed.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output to {}", path.display()))
}

/// Render the per-round team counts, newest round first as in the grid.
pub fn render_round_summary(rounds: &[RoundSummary], team_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("   Teams: {}\n", team_count));
    for round in rounds.iter().rev() {
        output.push_str(&format!(
            "   - After {}: {} registered teams, {} ranked teams\n",
            round.label, round.registered_teams, round.ranked_teams
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;
    use tempfile::TempDir;

    fn create_test_data() -> ProcessedData {
        ProcessedData {
            rows: vec![vec![
                Cell::Text("Alpha".to_string()),
                Cell::Text("Netherlands".to_string()),
                Cell::Integer(1),
                Cell::Empty,
            ]],
            rounds: vec![
                RoundSummary {
                    label: "Round 1".to_string(),
                    registered_teams: 4,
                    ranked_teams: 3,
                },
                RoundSummary {
                    label: "Round 2".to_string(),
                    registered_teams: 5,
                    ranked_teams: 5,
                },
            ],
        }
    }

    #[test]
    fn test_generate_rounds_json() {
        let json = generate_json(&create_test_data(), OutputFormat::Rounds, false).unwrap();

        assert!(json.starts_with(r#"{"rows":[["Alpha","Netherlands",1,null]]"#));
        assert!(json.contains(r#""rounds":[{"label":"Round 1","registeredTeams":4,"rankedTeams":3}"#));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_generate_legacy_json() {
        let json = generate_json(&create_test_data(), OutputFormat::Legacy, false).unwrap();

        assert!(json.contains(r#""uniqueTeamsByRound":[4,5]"#));
        assert!(json.contains(r#""rankedTeamsByRound":[3,5]"#));
        assert!(!json.contains("\"rounds\""));
    }

    #[test]
    fn test_generate_pretty_json() {
        let json = generate_json(&create_test_data(), OutputFormat::Rounds, true).unwrap();
        assert!(json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rounds"][1]["rankedTeams"], 5);
    }

    #[test]
    fn test_write_output_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("web").join("processed.json");

        write_output(&path, "{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_render_round_summary() {
        let data = create_test_data();
        let summary = render_round_summary(&data.rounds, 6);

        assert!(summary.contains("Teams: 6"));
        let newest = summary.find("Round 2").unwrap();
        let oldest = summary.find("Round 1").unwrap();
        assert!(newest < oldest);
        assert!(summary.contains("5 registered teams, 5 ranked teams"));
    }
}
