//! CRUD operations for the match store
//!
//! Each mutation holds the write lock for the whole read-modify-persist
//! cycle. The cache is only replaced once the file write succeeded.

use tracing::debug;

use crate::error::{ScorebookError, ScorebookResult};
use crate::types::Match;

use super::MatchStore;

fn unknown(id: &str) -> ScorebookError {
    ScorebookError::UnknownMatch { id: id.to_string() }
}

/// Every match, newest first
pub fn list(store: &MatchStore) -> Vec<Match> {
    store.matches.read().clone()
}

pub fn get(store: &MatchStore, id: &str) -> ScorebookResult<Match> {
    store
        .matches
        .read()
        .iter()
        .find(|m| m.id == id)
        .cloned()
        .ok_or_else(|| unknown(id))
}

/// Add a match at the front; an empty id is replaced by a fresh UUID
///
/// A match whose id is already stored replaces the stored one.
pub fn insert(store: &MatchStore, mut m: Match) -> ScorebookResult<Match> {
    if m.id.trim().is_empty() {
        m.id = uuid::Uuid::new_v4().to_string();
    }

    let mut matches = store.matches.write();
    let mut next: Vec<Match> = Vec::with_capacity(matches.len() + 1);
    next.push(m.clone());
    next.extend(matches.iter().filter(|existing| existing.id != m.id).cloned());

    store.persist(&next)?;
    *matches = next;
    debug!(match_id = %m.id, "Inserted match");
    Ok(m)
}

/// Replace the stored match with the same id
pub fn update(store: &MatchStore, m: Match) -> ScorebookResult<Match> {
    let mut matches = store.matches.write();
    let position = matches
        .iter()
        .position(|existing| existing.id == m.id)
        .ok_or_else(|| unknown(&m.id))?;

    let mut next = matches.clone();
    next[position] = m.clone();

    store.persist(&next)?;
    *matches = next;
    debug!(match_id = %m.id, "Updated match");
    Ok(m)
}

/// Remove a match, returning it
pub fn delete(store: &MatchStore, id: &str) -> ScorebookResult<Match> {
    let mut matches = store.matches.write();
    let position = matches
        .iter()
        .position(|m| m.id == id)
        .ok_or_else(|| unknown(id))?;

    let mut next = matches.clone();
    let removed = next.remove(position);

    store.persist(&next)?;
    *matches = next;
    debug!(match_id = id, "Deleted match");
    Ok(removed)
}

/// Run `f` on the stored match under the write lock and persist its result
///
/// `f` must not call back into `store`.
pub fn with_match<T, F>(store: &MatchStore, id: &str, f: F) -> ScorebookResult<T>
where
    F: FnOnce(&Match) -> ScorebookResult<(Match, T)>,
{
    let mut matches = store.matches.write();
    let position = matches
        .iter()
        .position(|m| m.id == id)
        .ok_or_else(|| unknown(id))?;

    let (mut updated, out) = f(&matches[position])?;
    // The closure cannot move a match to another id
    updated.id = id.to_string();

    let mut next = matches.clone();
    next[position] = updated;

    store.persist(&next)?;
    *matches = next;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use crate::types::{Side, StatKey};
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> MatchStore {
        MatchStore::open(StoreConfig::new(dir.path().join("matches.json"))).unwrap()
    }

    fn new_match(opponent: &str) -> Match {
        Match::new("2024-05-01".into(), "Cup".into(), opponent.into())
    }

    #[test]
    fn test_insert_assigns_id_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);

        let first = store.insert(new_match("Eagles")).unwrap();
        let second = store.insert(new_match("Hawks")).unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);

        let ids: Vec<String> = store.list().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let inserted = {
            let store = open(&dir);
            store.insert(new_match("Eagles")).unwrap()
        };

        let reopened = open(&dir);
        assert_eq!(reopened.get(&inserted.id).unwrap(), inserted);
        assert_eq!(reopened.load_report().matches, 1);
    }

    #[test]
    fn test_update_and_delete() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        let mut m = store.insert(new_match("Eagles")).unwrap();

        m.opponent = "Falcons".into();
        store.update(m.clone()).unwrap();
        assert_eq!(store.get(&m.id).unwrap().opponent, "Falcons");

        let removed = store.delete(&m.id).unwrap();
        assert_eq!(removed.id, m.id);
        assert!(matches!(
            store.get(&m.id),
            Err(ScorebookError::UnknownMatch { .. })
        ));
        assert!(matches!(
            store.update(m.clone()),
            Err(ScorebookError::UnknownMatch { .. })
        ));
    }

    #[test]
    fn test_with_match_persists_operation() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        let m = store.insert(new_match("Eagles")).unwrap();
        let pid = m.sets[0].players[0].id.clone();
        let book = store.scorebook();

        let action = store
            .with_match(&m.id, |current| {
                book.record_action(current, 0, &pid, StatKey::AttackPoint)
            })
            .unwrap();
        assert_eq!(action.delta(StatKey::AttackAttempt), 1);

        store
            .with_match(&m.id, |current| {
                Ok((book.update_score(current, 0, Side::Ours, 1)?, ()))
            })
            .unwrap();

        let reopened = open(&dir);
        let stored = reopened.get(&m.id).unwrap();
        assert_eq!(stored.sets[0].stat_actions.len(), 1);
        assert_eq!(stored.sets[0].our_score, 1);
    }

    #[test]
    fn test_with_match_sees_latest_version() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        let mut m = store.insert(new_match("Eagles")).unwrap();
        m.opponent = "Falcons".into();
        store.update(m.clone()).unwrap();

        let seen = store
            .with_match(&m.id, |current| {
                let mut next = current.clone();
                next.id = "moved".into();
                Ok((next, current.opponent.clone()))
            })
            .unwrap();
        assert_eq!(seen, "Falcons");

        // Released after the closure returns, and the id is kept
        assert_eq!(store.get(&m.id).unwrap().opponent, "Falcons");
        assert!(store.get("moved").is_err());
    }

    #[test]
    fn test_failed_operation_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        let m = store.insert(new_match("Eagles")).unwrap();
        let book = store.scorebook();

        let err = store
            .with_match(&m.id, |current| {
                book.record_action(current, 0, "ghost", StatKey::BlockPoint)
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.get(&m.id).unwrap(), m);
    }
}
