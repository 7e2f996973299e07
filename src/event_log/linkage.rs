//! Linkage rules: counters that increment together with a primary key

use std::collections::BTreeMap;

use crate::types::StatKey;

/// `(primary, linked)` pairs. Recording `primary` also adds 1 to `linked`
/// in the same action.
pub const LINKAGE_RULES: &[(StatKey, StatKey)] = &[
    (StatKey::ServePoint, StatKey::ServeAttempt),
    (StatKey::AttackPoint, StatKey::AttackAttempt),
    (StatKey::AttackMiss, StatKey::AttackAttempt),
];

/// Keys linked to `primary`
pub fn linked_keys(primary: StatKey) -> impl Iterator<Item = StatKey> {
    LINKAGE_RULES
        .iter()
        .filter(move |(p, _)| *p == primary)
        .map(|(_, linked)| *linked)
}

/// Full delta map for one tap on `primary`
pub fn build_deltas(primary: StatKey) -> BTreeMap<StatKey, u32> {
    let mut deltas = BTreeMap::new();
    deltas.insert(primary, 1);
    for linked in linked_keys(primary) {
        *deltas.entry(linked).or_insert(0) += 1;
    }
    deltas
}
