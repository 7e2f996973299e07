//! Event Log & Aggregator
//!
//! The input table records each tap as an immutable [`StatAction`] appended
//! to its set's log. Totals are a fold over the log:
//!
//! ```text
//! tap(player, key) ──► build_deltas(key) ──► append to set.statActions
//!                      (linkage rules)            │
//!                                                 ▼
//!                 totals_for_set ◄── fold ── [a1, a2, ..., an]   undo_last pops an
//!                        │
//!                        ▼
//!                 totals_for_match (sum over sets by player id)
//! ```
//!
//! [`StatAction`]: crate::types::StatAction

mod aggregate;
mod career;
mod linkage;
mod log;

pub use aggregate::{
    all_players, replay, team_totals, totals_for_match, totals_for_set, totals_table, TotalsRow,
};
pub use career::{
    career_stats, match_performances, CareerStats, MatchPerformance, ReceiveCounts, ServeCounts,
};
pub use linkage::{build_deltas, linked_keys, LINKAGE_RULES};
pub use log::{build_action, record_action, record_action_at, undo_last, UnknownPlayerPolicy};
