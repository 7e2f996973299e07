//! Set access, score and input-table operations on a match

use tracing::debug;

use crate::error::{ScorebookError, ScorebookResult};
use crate::event_log::{self, UnknownPlayerPolicy};
use crate::types::{Match, MatchResult, MatchSet, Side, StatAction, StatKey};

/// Return a match where set `index` exists
///
/// Only the next set can be opened: `index` may name an existing set or
/// `sets.len()`, anything further is `SetOutOfRange`. The first set opens
/// with six blank players; later sets carry over the previous set's roster
/// and court.
pub fn ensure_set(m: &Match, index: usize) -> ScorebookResult<Match> {
    let len = m.sets.len();
    if index < len {
        return Ok(m.clone());
    }
    if index > len {
        return Err(ScorebookError::SetOutOfRange { index, len });
    }

    let mut next = m.clone();
    let set = match next.sets.last() {
        Some(previous) => MatchSet::following(previous),
        None => MatchSet::opening(),
    };
    next.sets.push(set);
    debug!(match_id = %next.id, set_count = next.sets.len(), "Created set");
    Ok(next)
}

/// Borrow the set at `index`
pub fn set_at(m: &Match, index: usize) -> ScorebookResult<&MatchSet> {
    m.sets.get(index).ok_or(ScorebookError::SetOutOfRange {
        index,
        len: m.sets.len(),
    })
}

/// Replace the set at `index` with the one produced by `f`
pub(crate) fn update_set<T, F>(m: &Match, index: usize, f: F) -> ScorebookResult<(Match, T)>
where
    F: FnOnce(&MatchSet) -> ScorebookResult<(MatchSet, T)>,
{
    let (set, out) = f(set_at(m, index)?)?;
    let mut next = m.clone();
    next.sets[index] = set;
    Ok((next, out))
}

/// Add `delta` points to one side; scores never drop below zero
pub fn update_score(m: &Match, index: usize, side: Side, delta: i32) -> ScorebookResult<Match> {
    let (next, ()) = update_set(m, index, |set| {
        let mut set = set.clone();
        let score = match side {
            Side::Ours => &mut set.our_score,
            Side::Opponent => &mut set.opponent_score,
        };
        *score = score.saturating_add_signed(delta);
        Ok((set, ()))
    })?;
    Ok(next)
}

/// Record one input-table tap in set `index`
pub fn record_action(
    m: &Match,
    index: usize,
    player_id: &str,
    key: StatKey,
    policy: UnknownPlayerPolicy,
) -> ScorebookResult<(Match, StatAction)> {
    update_set(m, index, |set| {
        event_log::record_action(set, player_id, key, policy)
    })
}

/// Undo the last input-table tap in set `index`
pub fn undo_last(m: &Match, index: usize) -> ScorebookResult<(Match, Option<StatAction>)> {
    update_set(m, index, |set| Ok(event_log::undo_last(set)))
}

/// Set the final result of the match
pub fn set_result(m: &Match, result: MatchResult) -> Match {
    Match {
        result: Some(result),
        ..m.clone()
    }
}
