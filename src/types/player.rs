//! Roster entries

use serde::{Deserialize, Serialize};

/// Player on a set's roster
///
/// Identity is `id`. Log entries reference the id, so renaming a player
/// relabels all of that player's history. A removed player keeps the id with
/// a blank name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: u32,
}

impl Player {
    pub fn new(id: String, name: String, number: u32) -> Self {
        Self { id, name, number }
    }

    /// Create a player with a fresh unique id
    pub fn with_generated_id(name: String, number: u32) -> Self {
        Self {
            id: format!("player-{}", uuid::Uuid::new_v4()),
            name,
            number,
        }
    }

    /// Trimmed display name
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// True once the name is empty (never entered, or soft-deleted)
    pub fn is_blank(&self) -> bool {
        self.trimmed_name().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Player::with_generated_id(String::new(), 1);
        let b = Player::with_generated_id(String::new(), 2);
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("player-"));
        assert!(a.is_blank());
    }

    #[test]
    fn test_number_defaults_when_missing() {
        let p: Player = serde_json::from_str(r#"{"id":"p1","name":" Sato "}"#).unwrap();
        assert_eq!(p.number, 0);
        assert_eq!(p.trimmed_name(), "Sato");
    }
}
