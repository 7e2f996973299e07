//! Property tests for log aggregation

use proptest::prelude::*;

use volley_scorebook::event_log::{build_action, record_action_at, replay, undo_last};
use volley_scorebook::types::{MatchSet, Player};
use volley_scorebook::{totals_for_set, StatKey, UnknownPlayerPolicy};

const PLAYERS: [&str; 3] = ["p1", "p2", "p3"];

fn roster_set() -> MatchSet {
    let mut set = MatchSet::empty();
    set.players = PLAYERS
        .iter()
        .enumerate()
        .map(|(i, id)| Player::new(id.to_string(), format!("Player {}", i + 1), i as u32 + 1))
        .collect();
    set
}

fn stat_key() -> impl Strategy<Value = StatKey> {
    prop::sample::select(StatKey::ALL.to_vec())
}

fn tap() -> impl Strategy<Value = (usize, StatKey)> {
    (0..PLAYERS.len(), stat_key())
}

#[derive(Debug, Clone)]
enum Op {
    Record(usize, StatKey),
    Undo,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => tap().prop_map(|(p, k)| Op::Record(p, k)),
        1 => Just(Op::Undo),
    ]
}

fn record_all(taps: &[(usize, StatKey)]) -> MatchSet {
    let mut set = roster_set();
    for (i, (player, key)) in taps.iter().enumerate() {
        let (next, _) = record_action_at(
            &set,
            PLAYERS[*player],
            *key,
            UnknownPlayerPolicy::Reject,
            i as i64,
        )
        .unwrap();
        set = next;
    }
    set
}

proptest! {
    #[test]
    fn replay_is_idempotent(taps in prop::collection::vec(tap(), 0..60)) {
        let set = record_all(&taps);
        prop_assert_eq!(totals_for_set(&set), totals_for_set(&set));
        prop_assert_eq!(replay(&set.stat_actions), replay(&set.stat_actions));
    }

    #[test]
    fn linked_keys_move_together(taps in prop::collection::vec(tap(), 0..60)) {
        let set = record_all(&taps);
        for totals in totals_for_set(&set).values() {
            prop_assert!(totals.serve_attempt >= totals.serve_point);
            prop_assert!(totals.attack_attempt >= totals.attack_point + totals.attack_miss);
        }
        for action in &set.stat_actions {
            prop_assert_eq!(action.delta(action.primary), 1);
        }
    }

    #[test]
    fn attack_point_is_one_atomic_action(
        prefix in prop::collection::vec(tap(), 0..20),
        player in 0..PLAYERS.len(),
    ) {
        let before = record_all(&prefix);
        let (after, action) = record_action_at(
            &before,
            PLAYERS[player],
            StatKey::AttackPoint,
            UnknownPlayerPolicy::Reject,
            1_000,
        )
        .unwrap();

        prop_assert_eq!(after.stat_actions.len(), before.stat_actions.len() + 1);
        prop_assert_eq!(action.deltas.len(), 2);

        let old = totals_for_set(&before)[PLAYERS[player]];
        let new = totals_for_set(&after)[PLAYERS[player]];
        prop_assert_eq!(new.attack_point, old.attack_point + 1);
        prop_assert_eq!(new.attack_attempt, old.attack_attempt + 1);
    }

    #[test]
    fn undo_is_inverse_of_record(prefix in prop::collection::vec(tap(), 0..30), extra in tap()) {
        let before = record_all(&prefix);
        let (recorded, _) = record_action_at(
            &before,
            PLAYERS[extra.0],
            extra.1,
            UnknownPlayerPolicy::Reject,
            1_000,
        )
        .unwrap();

        let (undone, removed) = undo_last(&recorded);
        prop_assert!(removed.is_some());
        prop_assert_eq!(undone.stat_actions.len(), before.stat_actions.len());
        prop_assert_eq!(totals_for_set(&undone), totals_for_set(&before));
    }

    #[test]
    fn incremental_subtract_matches_fresh_fold(prefix in prop::collection::vec(tap(), 1..40)) {
        let set = record_all(&prefix);
        let mut running = totals_for_set(&set);

        let (undone, removed) = undo_last(&set);
        let removed = removed.unwrap();
        if let Some(t) = running.get_mut(&removed.player_id) {
            t.subtract(&removed);
        }
        prop_assert_eq!(running, totals_for_set(&undone));
    }

    #[test]
    fn totals_stay_consistent_under_any_sequence(ops in prop::collection::vec(op(), 0..80)) {
        let mut set = roster_set();
        let mut expected: Vec<(usize, StatKey)> = Vec::new();

        for (i, op) in ops.iter().enumerate() {
            match op {
                Op::Record(player, key) => {
                    let (next, _) = record_action_at(
                        &set,
                        PLAYERS[*player],
                        *key,
                        UnknownPlayerPolicy::Reject,
                        i as i64,
                    )
                    .unwrap();
                    set = next;
                    expected.push((*player, *key));
                }
                Op::Undo => {
                    let (next, _) = undo_last(&set);
                    set = next;
                    expected.pop();
                }
            }
        }

        // Unsigned counters: the fold must equal a fold of the surviving taps
        let rebuilt: Vec<_> = expected
            .iter()
            .enumerate()
            .map(|(i, (p, k))| build_action(PLAYERS[*p], *k, i as i64))
            .collect();
        let mut from_scratch = replay(&rebuilt);
        for id in PLAYERS {
            from_scratch.entry(id.to_string()).or_default();
        }
        prop_assert_eq!(totals_for_set(&set), from_scratch);
    }
}
