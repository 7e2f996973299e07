//! Substitutions: swap a court slot and keep a history that can be undone

use tracing::debug;

use crate::error::{ScorebookError, ScorebookResult};
use crate::types::{Match, Player, Substitution};
use crate::utils::current_timestamp_millis;

use super::sets::update_set;

/// Replace the on-court player `out_id` with the player named `in_name`
///
/// An existing roster player with the same trimmed name is reused, otherwise
/// a new player is appended. The out player stays on the roster.
pub fn substitute(
    m: &Match,
    index: usize,
    out_id: &str,
    in_name: &str,
) -> ScorebookResult<(Match, Substitution)> {
    let in_name = in_name.trim();
    if in_name.is_empty() {
        return Err(ScorebookError::EmptyName);
    }

    update_set(m, index, |set| {
        let slot = set
            .court_slot_of(out_id)
            .ok_or_else(|| ScorebookError::NotOnCourt {
                player_id: out_id.to_string(),
            })?;

        let mut next = set.clone();
        let in_id = match set.players.iter().find(|p| p.trimmed_name() == in_name) {
            Some(existing) => existing.id.clone(),
            None => {
                let player =
                    Player::with_generated_id(in_name.to_string(), next.next_player_number());
                let id = player.id.clone();
                next.players.push(player);
                id
            }
        };

        let sub = Substitution {
            out_player: out_id.to_string(),
            in_player: in_id.clone(),
            timestamp: current_timestamp_millis(),
            our_score: Some(set.our_score),
            opponent_score: Some(set.opponent_score),
        };
        next.substitutions.push(sub.clone());
        next.court_player_ids[slot] = Some(in_id);

        debug!(
            out_player = out_id,
            in_player = %sub.in_player,
            set_index = index,
            "Substituted"
        );
        Ok((next, sub))
    })
}

/// Pop the last substitution of set `index` and put the out player back
///
/// `None` when the set has no substitutions.
pub fn undo_substitution(
    m: &Match,
    index: usize,
) -> ScorebookResult<(Match, Option<Substitution>)> {
    update_set(m, index, |set| {
        let mut next = set.clone();
        let Some(popped) = next.substitutions.pop() else {
            return Ok((next, None));
        };

        if let Some(slot) = next.court_slot_of(&popped.in_player) {
            next.court_player_ids[slot] = Some(popped.out_player.clone());
        }
        debug!(
            out_player = %popped.out_player,
            in_player = %popped.in_player,
            "Undid substitution"
        );
        Ok((next, Some(popped)))
    })
}
