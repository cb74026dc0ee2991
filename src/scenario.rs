//! Scripted mate demonstrations.
//! Moves are UCI text; a scenario without a FEN starts from the opening position.

use std::fs;
use std::path::Path;

use cozy_chess::Move;
use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    pub moves: Vec<String>,
}

impl Scenario {
    pub fn new(name: &str, fen: Option<&str>, moves: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            fen: fen.map(String::from),
            moves: moves.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Parse the move text. Only the UCI syntax is checked here.
    pub fn parse_moves(&self) -> Result<Vec<Move>, ScenarioError> {
        self.moves
            .iter()
            .enumerate()
            .map(|(index, text)| {
                text.trim().parse::<Move>().map_err(|_| ScenarioError::BadMove {
                    scenario: self.name.clone(),
                    index,
                    text: text.clone(),
                })
            })
            .collect()
    }
}

/// Get all built-in scenarios
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        // 1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7#
        Scenario::new("Scholar's Mate", None, &["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"]),
        Scenario::new("Rook Mate", Some("7k/5KRp/8/8/8/8/8/8 w - - 0 1"), &["g7g8"]),
        // 1. f3 e5 2. g4 Qh4#
        Scenario::new("Fool's Mate", None, &["f2f3", "e7e5", "g2g4", "d8h4"]),
        Scenario::new("Back Rank Mate", Some("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1"), &["a1a8"]),
    ]
}

/// Look up by 1-based index or case-insensitive name.
pub fn find_scenario<'a>(scenarios: &'a [Scenario], key: &str) -> Result<&'a Scenario, ScenarioError> {
    let key = key.trim();
    if let Ok(n) = key.parse::<usize>() {
        if n >= 1 && n <= scenarios.len() { return Ok(&scenarios[n - 1]); }
    }
    scenarios
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| ScenarioError::Unknown(key.to_string()))
}

/// Read a JSON array of scenarios.
pub fn load_scenarios(path: &Path) -> Result<Vec<Scenario>, ScenarioError> {
    let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text).map_err(|source| ScenarioError::Json { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_parse() {
        for s in builtin_scenarios() {
            let moves = s.parse_moves().unwrap();
            assert_eq!(moves.len(), s.moves.len(), "{}", s.name);
        }
    }

    #[test]
    fn lookup_by_index_and_name() {
        let all = builtin_scenarios();
        assert_eq!(find_scenario(&all, "1").unwrap().name, "Scholar's Mate");
        assert_eq!(find_scenario(&all, "rook mate").unwrap().name, "Rook Mate");
        assert!(matches!(find_scenario(&all, "9"), Err(ScenarioError::Unknown(_))));
        assert!(matches!(find_scenario(&all, "Legal's Mate"), Err(ScenarioError::Unknown(_))));
    }

    #[test]
    fn bad_move_text_reports_index() {
        let s = Scenario::new("broken", None, &["e2e4", "e7e9"]);
        match s.parse_moves() {
            Err(ScenarioError::BadMove { index, text, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(text, "e7e9");
            }
            other => panic!("expected BadMove, got {:?}", other),
        }
    }
}
