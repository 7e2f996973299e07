//! Data types for the scorebook
//!
//! Canonical in-memory shapes of matches, sets, rosters and the input-table
//! action log. All of them are JSON-serializable in the storage layout.

mod match_record;
mod player;
mod set;
mod stat;

pub use match_record::{Match, MatchResult};
pub use player::Player;
pub use set::{
    court_from_roster, Court, MatchSet, ReceiveQuality, ReceiveRecord, ServeQuality, ServeRecord,
    Side, Substitution, COURT_SIZE,
};
pub use stat::{StatAction, StatKey, StatTotals, TotalsByPlayer};
