//! Match record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{MatchSet, Player};

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    #[serde(alias = "loss")]
    Lose,
}

/// A match: metadata plus its sets in play order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub id: String,
    /// Calendar date as `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    #[serde(rename = "tournamentName", default)]
    pub tournament_name: String,
    #[serde(default)]
    pub opponent: String,
    #[serde(default)]
    pub sets: Vec<MatchSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
}

impl Match {
    /// New match with an opening set and no id (the store assigns one)
    pub fn new(date: String, tournament_name: String, opponent: String) -> Self {
        Self {
            id: String::new(),
            date,
            tournament_name,
            opponent,
            sets: vec![MatchSet::opening()],
            result: None,
        }
    }

    /// Parsed calendar date, if the stored string is a valid date
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    /// Players across all sets, first occurrence of each id wins
    pub fn roster_union(&self) -> Vec<&Player> {
        let mut seen = std::collections::HashSet::new();
        self.sets
            .iter()
            .flat_map(|s| s.players.iter())
            .filter(|p| seen.insert(p.id.as_str()))
            .collect()
    }
}
