//! Per-set action log: record and undo
//!
//! Both operations are copy-on-write: they take the current set and return
//! a new one, leaving the input untouched.

use std::str::FromStr;

use tracing::debug;

use crate::error::{ScorebookError, ScorebookResult};
use crate::types::{MatchSet, Player, StatAction, StatKey};
use crate::utils::current_timestamp_millis;

use super::linkage::build_deltas;

/// What to do when an action names a player that is not on the set's roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPlayerPolicy {
    /// Fail with `ScorebookError::UnknownPlayer`
    #[default]
    Reject,
    /// Add a blank-named player with that id to the roster, then record
    AutoCreate,
}

impl FromStr for UnknownPlayerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(UnknownPlayerPolicy::Reject),
            "auto-create" | "auto_create" | "autocreate" => Ok(UnknownPlayerPolicy::AutoCreate),
            other => Err(format!("unknown player policy '{}'", other)),
        }
    }
}

/// Build the action for one tap, linked increments included
pub fn build_action(player_id: &str, primary: StatKey, timestamp: i64) -> StatAction {
    StatAction {
        player_id: player_id.to_string(),
        primary,
        deltas: build_deltas(primary),
        timestamp,
    }
}

/// Append an action for `player_id` stamped with the current time
pub fn record_action(
    set: &MatchSet,
    player_id: &str,
    primary: StatKey,
    policy: UnknownPlayerPolicy,
) -> ScorebookResult<(MatchSet, StatAction)> {
    record_action_at(set, player_id, primary, policy, current_timestamp_millis())
}

/// Append an action with an explicit timestamp
pub fn record_action_at(
    set: &MatchSet,
    player_id: &str,
    primary: StatKey,
    policy: UnknownPlayerPolicy,
    timestamp: i64,
) -> ScorebookResult<(MatchSet, StatAction)> {
    let mut next = set.clone();

    if !set.has_player(player_id) {
        match policy {
            UnknownPlayerPolicy::Reject => {
                return Err(ScorebookError::UnknownPlayer {
                    player_id: player_id.to_string(),
                });
            }
            UnknownPlayerPolicy::AutoCreate => {
                let number = next.next_player_number();
                next.players
                    .push(Player::new(player_id.to_string(), String::new(), number));
            }
        }
    }

    let action = build_action(player_id, primary, timestamp);
    next.stat_actions.push(action.clone());

    debug!(player_id, key = %primary, log_len = next.stat_actions.len(), "Recorded action");

    Ok((next, action))
}

/// Remove the most recent action, whichever player it belongs to
///
/// Returns the removed action, or `None` when the log is already empty.
pub fn undo_last(set: &MatchSet) -> (MatchSet, Option<StatAction>) {
    let mut next = set.clone();
    let removed = next.stat_actions.pop();

    match &removed {
        Some(action) => debug!(
            player_id = %action.player_id,
            key = %action.primary,
            log_len = next.stat_actions.len(),
            "Undid action"
        ),
        None => debug!("Nothing to undo"),
    }

    (next, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_set() -> MatchSet {
        let mut set = MatchSet::empty();
        set.players = vec![
            Player::new("p1".into(), "Sato".into(), 1),
            Player::new("p2".into(), "Suzuki".into(), 2),
        ];
        set
    }

    #[test]
    fn test_record_appends_linked_action() {
        let set = roster_set();
        let (next, action) = record_action_at(
            &set,
            "p1",
            StatKey::ServePoint,
            UnknownPlayerPolicy::Reject,
            42,
        )
        .unwrap();

        assert!(set.stat_actions.is_empty());
        assert_eq!(next.stat_actions.len(), 1);
        assert_eq!(next.stat_actions[0], action);
        assert_eq!(action.delta(StatKey::ServePoint), 1);
        assert_eq!(action.delta(StatKey::ServeAttempt), 1);
        assert_eq!(action.timestamp, 42);
    }

    #[test]
    fn test_record_rejects_unknown_player() {
        let set = roster_set();
        let err = record_action(
            &set,
            "ghost",
            StatKey::BlockPoint,
            UnknownPlayerPolicy::Reject,
        )
        .unwrap_err();
        match err {
            ScorebookError::UnknownPlayer { player_id } => assert_eq!(player_id, "ghost"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_record_auto_creates_unknown_player() {
        let set = roster_set();
        let (next, _) = record_action(
            &set,
            "ghost",
            StatKey::BlockPoint,
            UnknownPlayerPolicy::AutoCreate,
        )
        .unwrap();

        let created = next.player("ghost").unwrap();
        assert!(created.is_blank());
        assert_eq!(created.number, 3);
        assert_eq!(next.stat_actions.len(), 1);
    }

    #[test]
    fn test_undo_is_global_lifo() {
        let set = roster_set();
        let policy = UnknownPlayerPolicy::Reject;
        let (set, first) = record_action(&set, "p1", StatKey::ServeAttempt, policy).unwrap();
        let (set, second) = record_action(&set, "p2", StatKey::AttackAttempt, policy).unwrap();

        let (set, removed) = undo_last(&set);
        assert_eq!(removed, Some(second));
        assert_eq!(set.stat_actions, vec![first]);
    }

    #[test]
    fn test_undo_on_empty_log_is_noop() {
        let set = roster_set();
        let (next, removed) = undo_last(&set);
        assert!(removed.is_none());
        assert_eq!(next, set);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "reject".parse::<UnknownPlayerPolicy>(),
            Ok(UnknownPlayerPolicy::Reject)
        );
        assert_eq!(
            " Auto-Create ".parse::<UnknownPlayerPolicy>(),
            Ok(UnknownPlayerPolicy::AutoCreate)
        );
        assert!("sometimes".parse::<UnknownPlayerPolicy>().is_err());
    }
}
