//! Set record: score, roster, court, action log and legacy quality records

use serde::{Deserialize, Serialize};

use super::{Player, StatAction};

/// Number of on-court slots
pub const COURT_SIZE: usize = 6;

/// On-court slots; `None` is an empty slot
pub type Court = [Option<String>; COURT_SIZE];

/// Team side for score updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Ours,
    Opponent,
}

/// Serve quality recorded by the serve/receive sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServeQuality {
    ServeMiss,
    SetterMove,
    SetterPinpoint,
    OtherThanSetter,
    /// Service ace
    RedStar,
    /// Point won off the serve by a later play
    BlackStar,
    Dash,
}

impl ServeQuality {
    pub const ALL: [ServeQuality; 7] = [
        ServeQuality::ServeMiss,
        ServeQuality::SetterMove,
        ServeQuality::SetterPinpoint,
        ServeQuality::OtherThanSetter,
        ServeQuality::RedStar,
        ServeQuality::BlackStar,
        ServeQuality::Dash,
    ];
}

/// Receive quality recorded by the serve/receive sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReceiveQuality {
    /// Counted as a receive miss
    SetterReturn,
    NoReturn,
    SetterPinpoint,
    OtherThanSetter,
}

impl ReceiveQuality {
    pub const ALL: [ReceiveQuality; 4] = [
        ReceiveQuality::SetterReturn,
        ReceiveQuality::NoReturn,
        ReceiveQuality::SetterPinpoint,
        ReceiveQuality::OtherThanSetter,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServeRecord {
    #[serde(rename = "playerId")]
    pub player_id: String,
    pub quality: ServeQuality,
    #[serde(default)]
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveRecord {
    #[serde(rename = "playerId")]
    pub player_id: String,
    pub quality: ReceiveQuality,
    #[serde(default)]
    pub timestamp: i64,
}

/// One substitution, with the score at the time it was made
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    #[serde(rename = "outPlayer")]
    pub out_player: String,
    #[serde(rename = "inPlayer")]
    pub in_player: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(rename = "ourScore", default, skip_serializing_if = "Option::is_none")]
    pub our_score: Option<u32>,
    #[serde(
        rename = "opponentScore",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub opponent_score: Option<u32>,
}

/// One set of a match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    #[serde(rename = "ourScore", default)]
    pub our_score: u32,
    #[serde(rename = "opponentScore", default)]
    pub opponent_score: u32,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub serves: Vec<ServeRecord>,
    #[serde(default)]
    pub receives: Vec<ReceiveRecord>,
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
    /// Input-table log in chronological order
    #[serde(rename = "statActions", default)]
    pub stat_actions: Vec<StatAction>,
    #[serde(rename = "courtPlayerIds", default)]
    pub court_player_ids: Court,
}

impl MatchSet {
    /// Empty set: zero score, empty roster and log, empty court
    pub fn empty() -> Self {
        Self::default()
    }

    /// First set of a new match: six blank players numbered 1..=6 on court
    pub fn opening() -> Self {
        let players: Vec<Player> = (1..=COURT_SIZE as u32)
            .map(|n| Player::with_generated_id(String::new(), n))
            .collect();
        let court = court_from_roster(&players);
        Self {
            players,
            court_player_ids: court,
            ..Self::default()
        }
    }

    /// Next set: roster and court carried over, everything else reset
    pub fn following(previous: &MatchSet) -> Self {
        Self {
            players: previous.players.clone(),
            court_player_ids: previous.court_player_ids.clone(),
            ..Self::default()
        }
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.player(player_id).is_some()
    }

    /// Court slot index holding `player_id`
    pub fn court_slot_of(&self, player_id: &str) -> Option<usize> {
        self.court_player_ids
            .iter()
            .position(|slot| slot.as_deref() == Some(player_id))
    }

    pub fn is_on_court(&self, player_id: &str) -> bool {
        self.court_slot_of(player_id).is_some()
    }

    /// Shirt number for the next player added to the roster
    pub fn next_player_number(&self) -> u32 {
        self.players.len() as u32 + 1
    }
}

/// First six roster ids, padded with empty slots
pub fn court_from_roster(players: &[Player]) -> Court {
    let mut court: Court = Default::default();
    for (slot, player) in court.iter_mut().zip(players.iter()) {
        *slot = Some(player.id.clone());
    }
    court
}
