//! Stat keys, recorded actions and per-player totals

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Countable action category of the input table
///
/// Variant order is the display order. The one/two-letter tags written by
/// older versions are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatKey {
    /// サ
    #[serde(alias = "S")]
    ServeAttempt,
    /// サM
    #[serde(alias = "SM")]
    ServeMiss,
    /// サP (ace)
    #[serde(alias = "SP")]
    ServePoint,
    /// ブ
    #[serde(alias = "B")]
    BlockPoint,
    /// ア
    #[serde(alias = "A")]
    AttackAttempt,
    /// アM
    #[serde(alias = "AM")]
    AttackMiss,
    /// アP
    #[serde(alias = "AP")]
    AttackPoint,
}

impl StatKey {
    /// All keys in display order
    pub const ALL: [StatKey; 7] = [
        StatKey::ServeAttempt,
        StatKey::ServeMiss,
        StatKey::ServePoint,
        StatKey::BlockPoint,
        StatKey::AttackAttempt,
        StatKey::AttackMiss,
        StatKey::AttackPoint,
    ];

    /// Column label shown in the input table
    pub fn label(&self) -> &'static str {
        match self {
            StatKey::ServeAttempt => "サ",
            StatKey::ServeMiss => "サM",
            StatKey::ServePoint => "サP",
            StatKey::BlockPoint => "ブ",
            StatKey::AttackAttempt => "ア",
            StatKey::AttackMiss => "アM",
            StatKey::AttackPoint => "アP",
        }
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatKey::ServeAttempt => write!(f, "serve-attempt"),
            StatKey::ServeMiss => write!(f, "serve-miss"),
            StatKey::ServePoint => write!(f, "serve-point"),
            StatKey::BlockPoint => write!(f, "block-point"),
            StatKey::AttackAttempt => write!(f, "attack-attempt"),
            StatKey::AttackMiss => write!(f, "attack-miss"),
            StatKey::AttackPoint => write!(f, "attack-point"),
        }
    }
}

/// One recorded tap in the input table
///
/// `deltas` holds every counter the tap increments, linked ones included.
/// Zero entries are never stored: they are dropped on both read and write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatAction {
    #[serde(rename = "playerId")]
    pub player_id: String,
    pub primary: StatKey,
    #[serde(
        serialize_with = "serialize_deltas",
        deserialize_with = "deserialize_deltas"
    )]
    pub deltas: BTreeMap<StatKey, u32>,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

impl StatAction {
    /// Increment this action applies to `key` (0 when absent)
    pub fn delta(&self, key: StatKey) -> u32 {
        self.deltas.get(&key).copied().unwrap_or(0)
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn serialize_deltas<S: Serializer>(
    deltas: &BTreeMap<StatKey, u32>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(deltas.iter().filter(|(_, v)| **v > 0))
}

fn deserialize_deltas<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<StatKey, u32>, D::Error> {
    let raw = BTreeMap::<StatKey, u32>::deserialize(deserializer)?;
    Ok(raw.into_iter().filter(|(_, v)| *v > 0).collect())
}

/// Counter per stat key for one player
///
/// Always fully populated; counters are unsigned and every subtraction
/// saturates, so a total can never go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StatTotals {
    pub serve_attempt: u32,
    pub serve_miss: u32,
    pub serve_point: u32,
    pub block_point: u32,
    pub attack_attempt: u32,
    pub attack_miss: u32,
    pub attack_point: u32,
}

impl StatTotals {
    pub fn get(&self, key: StatKey) -> u32 {
        match key {
            StatKey::ServeAttempt => self.serve_attempt,
            StatKey::ServeMiss => self.serve_miss,
            StatKey::ServePoint => self.serve_point,
            StatKey::BlockPoint => self.block_point,
            StatKey::AttackAttempt => self.attack_attempt,
            StatKey::AttackMiss => self.attack_miss,
            StatKey::AttackPoint => self.attack_point,
        }
    }

    fn slot_mut(&mut self, key: StatKey) -> &mut u32 {
        match key {
            StatKey::ServeAttempt => &mut self.serve_attempt,
            StatKey::ServeMiss => &mut self.serve_miss,
            StatKey::ServePoint => &mut self.serve_point,
            StatKey::BlockPoint => &mut self.block_point,
            StatKey::AttackAttempt => &mut self.attack_attempt,
            StatKey::AttackMiss => &mut self.attack_miss,
            StatKey::AttackPoint => &mut self.attack_point,
        }
    }

    /// Add `amount` to one counter
    pub fn add(&mut self, key: StatKey, amount: u32) {
        let slot = self.slot_mut(key);
        *slot = slot.saturating_add(amount);
    }

    /// Remove `amount` from one counter, clamping at zero
    pub fn remove(&mut self, key: StatKey, amount: u32) {
        let slot = self.slot_mut(key);
        *slot = slot.saturating_sub(amount);
    }

    /// Apply every delta of an action
    pub fn apply(&mut self, action: &StatAction) {
        for (key, delta) in &action.deltas {
            self.add(*key, *delta);
        }
    }

    /// Roll back every delta of an action (saturating)
    pub fn subtract(&mut self, action: &StatAction) {
        for (key, delta) in &action.deltas {
            self.remove(*key, *delta);
        }
    }

    /// Sum another player's totals into this one
    pub fn merge(&mut self, other: &StatTotals) {
        for key in StatKey::ALL {
            self.add(key, other.get(key));
        }
    }

    pub fn is_zero(&self) -> bool {
        StatKey::ALL.iter().all(|k| self.get(*k) == 0)
    }

    /// `(key, count)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (StatKey, u32)> + '_ {
        StatKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// Totals keyed by player id
pub type TotalsByPlayer = BTreeMap<String, StatTotals>;
