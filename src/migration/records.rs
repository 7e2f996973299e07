//! Lenient field and record readers over raw JSON

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::types::{court_from_roster, Court, Player, COURT_SIZE};

use super::MigrationReport;

/// Array stored under `key`; missing or non-array values read as empty
pub(crate) fn array<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// String stored under `key`; numbers are stringified, anything else is empty
pub(crate) fn string(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Non-negative count stored under `key`; missing or negative reads as 0
pub(crate) fn count(obj: &Map<String, Value>, key: &str) -> u32 {
    obj.get(key).map(count_value).unwrap_or(0)
}

fn count_value(value: &Value) -> u32 {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).unwrap_or(u32::MAX);
    }
    match value.as_f64() {
        Some(f) if f > 0.0 => f.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Deserialize every element, skipping the ones that do not parse
pub(crate) fn parse_each<T: DeserializeOwned>(
    items: &[Value],
    kind: &str,
    report: &mut MigrationReport,
) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<T>(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(kind, index = i, error = %e, "Skipping unreadable record");
                report.skipped_records += 1;
                None
            }
        })
        .collect()
}

/// Roster entry; `None` without a usable id
///
/// A missing shirt number becomes the 1-based roster position.
pub(crate) fn player(value: &Value, position: usize) -> Option<Player> {
    let obj = value.as_object()?;
    let id = string(obj, "id");
    if id.is_empty() {
        return None;
    }
    let number = match obj.get("number") {
        Some(n) if !n.is_null() => count_value(n),
        _ => position as u32 + 1,
    };
    Some(Player::new(id, string(obj, "name"), number))
}

/// Roster with unreadable entries skipped and ids deduplicated
pub(crate) fn players(items: &[Value], report: &mut MigrationReport) -> Vec<Player> {
    let mut roster: Vec<Player> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match player(item, i) {
            Some(p) if roster.iter().any(|q| q.id == p.id) => {
                warn!(player_id = %p.id, "Skipping duplicate roster id");
                report.skipped_records += 1;
            }
            Some(p) => roster.push(p),
            None => {
                warn!(index = i, "Skipping roster entry without id");
                report.skipped_records += 1;
            }
        }
    }
    roster
}

/// Exactly six court slots
///
/// Non-string entries become empty slots. A missing or empty court is
/// filled from the first six roster ids.
pub(crate) fn court(raw: Option<&Value>, roster: &[Player]) -> Court {
    let slots = match raw.and_then(Value::as_array) {
        Some(slots) if !slots.is_empty() => slots,
        _ => return court_from_roster(roster),
    };

    let mut court: Court = Default::default();
    for (slot, value) in court.iter_mut().zip(slots.iter().take(COURT_SIZE)) {
        *slot = value.as_str().filter(|s| !s.is_empty()).map(str::to_string);
    }
    court
}
