//! Roster operations: add, rename, soft-delete and duplicate merging

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{ScorebookError, ScorebookResult};
use crate::types::{Match, MatchSet, Player};

use super::sets::update_set;

fn unknown(player_id: &str) -> ScorebookError {
    ScorebookError::UnknownPlayer {
        player_id: player_id.to_string(),
    }
}

/// Append a player with a fresh id and the next shirt number
pub fn add_player(m: &Match, index: usize, name: &str) -> ScorebookResult<(Match, Player)> {
    update_set(m, index, |set| {
        let mut set = set.clone();
        let player = Player::with_generated_id(name.trim().to_string(), set.next_player_number());
        set.players.push(player.clone());
        debug!(player_id = %player.id, set_index = index, "Added player");
        Ok((set, player))
    })
}

/// Rename a player in every set that lists them
///
/// Log entries reference the id, so past actions follow the new name.
pub fn rename_player(m: &Match, player_id: &str, name: &str) -> ScorebookResult<Match> {
    let mut next = m.clone();
    let mut found = false;

    for set in &mut next.sets {
        for player in set.players.iter_mut().filter(|p| p.id == player_id) {
            player.name = name.trim().to_string();
            found = true;
        }
    }

    if !found {
        return Err(unknown(player_id));
    }
    debug!(player_id, "Renamed player");
    Ok(next)
}

/// Soft-delete a player from one set
///
/// The roster entry stays with a blank name so existing log entries keep a
/// valid reference. The player's court slot is vacated.
pub fn remove_player(m: &Match, index: usize, player_id: &str) -> ScorebookResult<Match> {
    let (next, ()) = update_set(m, index, |set| {
        let mut set = set.clone();
        let player = set
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| unknown(player_id))?;
        player.name.clear();

        for slot in set.court_player_ids.iter_mut() {
            if slot.as_deref() == Some(player_id) {
                *slot = None;
            }
        }
        debug!(player_id, set_index = index, "Removed player");
        Ok((set, ()))
    })?;
    Ok(next)
}

/// Map of duplicate id -> surviving id for players sharing a trimmed name
fn duplicate_ids(set: &MatchSet) -> HashMap<String, String> {
    let mut first_by_name: HashMap<&str, &str> = HashMap::new();
    let mut redirects = HashMap::new();

    for player in &set.players {
        let name = player.trimmed_name();
        if name.is_empty() {
            continue;
        }
        match first_by_name.get(name) {
            Some(keep) if *keep != player.id => {
                redirects.insert(player.id.clone(), keep.to_string());
            }
            Some(_) => {}
            None => {
                first_by_name.insert(name, player.id.as_str());
            }
        }
    }
    redirects
}

fn redirect(id: &mut String, redirects: &HashMap<String, String>) {
    if let Some(keep) = redirects.get(id.as_str()) {
        *id = keep.clone();
    }
}

fn merge_set(set: &MatchSet) -> (MatchSet, usize) {
    let redirects = duplicate_ids(set);
    if redirects.is_empty() {
        return (set.clone(), 0);
    }

    let mut next = set.clone();
    next.players.retain(|p| !redirects.contains_key(&p.id));

    for action in &mut next.stat_actions {
        redirect(&mut action.player_id, &redirects);
    }
    for serve in &mut next.serves {
        redirect(&mut serve.player_id, &redirects);
    }
    for receive in &mut next.receives {
        redirect(&mut receive.player_id, &redirects);
    }
    for sub in &mut next.substitutions {
        redirect(&mut sub.out_player, &redirects);
        redirect(&mut sub.in_player, &redirects);
    }

    // A player holds at most one court slot
    let mut on_court: Vec<String> = Vec::new();
    for slot in next.court_player_ids.iter_mut() {
        let duplicate = match slot.as_mut() {
            Some(id) => {
                redirect(id, &redirects);
                if on_court.contains(id) {
                    true
                } else {
                    on_court.push(id.clone());
                    false
                }
            }
            None => false,
        };
        if duplicate {
            *slot = None;
        }
    }

    (next, redirects.len())
}

/// Merge players of one set that share a trimmed, non-empty name
///
/// The earliest roster entry survives. Returns the match and the number of
/// roster entries merged away.
pub fn merge_duplicate_players(m: &Match, index: usize) -> ScorebookResult<(Match, usize)> {
    update_set(m, index, |set| {
        let (merged, count) = merge_set(set);
        if count > 0 {
            info!(set_index = index, merged = count, "Merged duplicate players");
        }
        Ok((merged, count))
    })
}
