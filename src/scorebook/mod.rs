//! Scorebook - match-level operations
//!
//! Every operation takes the current `Match` and returns a new one, so the
//! caller decides when to persist. Per-set log semantics live in
//! `event_log`; this module resolves the set index and rebuilds the match.

mod roster;
mod sets;
mod substitution;

pub use roster::{add_player, merge_duplicate_players, remove_player, rename_player};
pub use sets::{ensure_set, record_action, set_at, set_result, undo_last, update_score};
pub use substitution::{substitute, undo_substitution};

use crate::error::ScorebookResult;
use crate::event_log::UnknownPlayerPolicy;
use crate::types::{Match, MatchResult, Player, Side, StatAction, StatKey, Substitution};

/// Scorebook operations bound to an unknown-player policy
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorebook {
    policy: UnknownPlayerPolicy,
}

impl Scorebook {
    /// Scorebook that rejects actions for players not on the roster
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: UnknownPlayerPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnknownPlayerPolicy {
        self.policy
    }

    pub fn ensure_set(&self, m: &Match, index: usize) -> ScorebookResult<Match> {
        sets::ensure_set(m, index)
    }

    pub fn update_score(
        &self,
        m: &Match,
        index: usize,
        side: Side,
        delta: i32,
    ) -> ScorebookResult<Match> {
        sets::update_score(m, index, side, delta)
    }

    /// Record one input-table tap for `player_id` in set `index`
    pub fn record_action(
        &self,
        m: &Match,
        index: usize,
        player_id: &str,
        key: StatKey,
    ) -> ScorebookResult<(Match, StatAction)> {
        sets::record_action(m, index, player_id, key, self.policy)
    }

    /// Undo the most recent tap in set `index`, whoever it belongs to
    pub fn undo_last(
        &self,
        m: &Match,
        index: usize,
    ) -> ScorebookResult<(Match, Option<StatAction>)> {
        sets::undo_last(m, index)
    }

    pub fn set_result(&self, m: &Match, result: MatchResult) -> Match {
        sets::set_result(m, result)
    }

    pub fn add_player(
        &self,
        m: &Match,
        index: usize,
        name: &str,
    ) -> ScorebookResult<(Match, Player)> {
        roster::add_player(m, index, name)
    }

    pub fn rename_player(&self, m: &Match, player_id: &str, name: &str) -> ScorebookResult<Match> {
        roster::rename_player(m, player_id, name)
    }

    pub fn remove_player(
        &self,
        m: &Match,
        index: usize,
        player_id: &str,
    ) -> ScorebookResult<Match> {
        roster::remove_player(m, index, player_id)
    }

    pub fn merge_duplicate_players(
        &self,
        m: &Match,
        index: usize,
    ) -> ScorebookResult<(Match, usize)> {
        roster::merge_duplicate_players(m, index)
    }

    pub fn substitute(
        &self,
        m: &Match,
        index: usize,
        out_id: &str,
        in_name: &str,
    ) -> ScorebookResult<(Match, Substitution)> {
        substitution::substitute(m, index, out_id, in_name)
    }

    pub fn undo_substitution(
        &self,
        m: &Match,
        index: usize,
    ) -> ScorebookResult<(Match, Option<Substitution>)> {
        substitution::undo_substitution(m, index)
    }
}
