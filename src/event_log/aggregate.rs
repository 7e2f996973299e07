//! Aggregation: folding action logs into per-player totals
//!
//! Totals are never stored. They are recomputed from the log on demand, so
//! the result depends only on the log content and the roster.

use serde::Serialize;

use crate::types::{Match, MatchSet, Player, StatAction, StatTotals, TotalsByPlayer};

/// Fold a sequence of actions into totals, in order
///
/// Players only get a bucket once one of their actions is seen.
pub fn replay<'a, I>(actions: I) -> TotalsByPlayer
where
    I: IntoIterator<Item = &'a StatAction>,
{
    let mut totals = TotalsByPlayer::new();
    apply_all(&mut totals, actions);
    totals
}

fn apply_all<'a, I>(totals: &mut TotalsByPlayer, actions: I)
where
    I: IntoIterator<Item = &'a StatAction>,
{
    for action in actions {
        totals
            .entry(action.player_id.clone())
            .or_default()
            .apply(action);
    }
}

/// Totals for one set
///
/// Every roster player starts at zero. Actions for ids that are not on the
/// roster still get their own bucket.
pub fn totals_for_set(set: &MatchSet) -> TotalsByPlayer {
    let mut totals: TotalsByPlayer = set
        .players
        .iter()
        .map(|p| (p.id.clone(), StatTotals::default()))
        .collect();
    apply_all(&mut totals, &set.stat_actions);
    totals
}

/// Totals for a whole match: per-set totals summed by player id
pub fn totals_for_match(m: &Match) -> TotalsByPlayer {
    let mut totals = TotalsByPlayer::new();
    for set in &m.sets {
        for (player_id, set_totals) in totals_for_set(set) {
            totals.entry(player_id).or_default().merge(&set_totals);
        }
    }
    totals
}

/// Players across every set of a match, first occurrence of each id wins
pub fn all_players(m: &Match) -> Vec<&Player> {
    m.roster_union()
}

/// Team total across all players
pub fn team_totals(totals: &TotalsByPlayer) -> StatTotals {
    totals.values().fold(StatTotals::default(), |mut acc, t| {
        acc.merge(t);
        acc
    })
}

/// One display row of the input table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsRow {
    #[serde(rename = "playerId")]
    pub player_id: String,
    pub name: String,
    pub number: u32,
    pub totals: StatTotals,
}

/// Display rows for a match, in roster order
///
/// With `set_index` the rows carry that set's totals, otherwise the totals
/// of the whole match. Players that only appear in the log are appended
/// after the roster with a blank name.
pub fn totals_table(m: &Match, set_index: Option<usize>) -> Vec<TotalsRow> {
    let mut totals = match set_index {
        Some(i) => m.sets.get(i).map(totals_for_set).unwrap_or_default(),
        None => totals_for_match(m),
    };

    let mut rows: Vec<TotalsRow> = all_players(m)
        .into_iter()
        .map(|p| TotalsRow {
            player_id: p.id.clone(),
            name: p.name.clone(),
            number: p.number,
            totals: totals.remove(&p.id).unwrap_or_default(),
        })
        .collect();

    rows.extend(totals.into_iter().map(|(player_id, totals)| TotalsRow {
        player_id,
        name: String::new(),
        number: 0,
        totals,
    }));

    rows
}
