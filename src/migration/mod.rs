//! Normalize on load
//!
//! Stored matches come in two layouts: the lineup schema (v1) and the
//! players schema (v6 onward, the canonical one). Every record read from
//! storage passes through `normalize_match`, which detects the layout,
//! upgrades v1 records, then decodes leniently: missing fields take
//! defaults and unreadable individual records are skipped with a warning.

mod legacy;
mod records;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::{ScorebookError, ScorebookResult};
use crate::event_log::build_deltas;
use crate::types::{
    Match, MatchResult, MatchSet, ReceiveRecord, ServeRecord, StatAction, Substitution,
};

/// Stored match layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// `lineup`/`bench`/`services`/`myScore`, match-level `tournament`
    Lineup,
    /// `players`/`serves`/`ourScore`/`statActions`, `tournamentName`
    Players,
}

impl SchemaVersion {
    pub fn number(&self) -> u32 {
        match self {
            SchemaVersion::Lineup => 1,
            SchemaVersion::Players => 6,
        }
    }
}

const LINEUP_SET_FIELDS: &[&str] = &["lineup", "bench", "services", "myScore"];

/// Detect the layout of a raw match record
pub fn detect_version(raw: &Value) -> SchemaVersion {
    let Some(obj) = raw.as_object() else {
        return SchemaVersion::Players;
    };

    if obj.contains_key("tournament") && !obj.contains_key("tournamentName") {
        return SchemaVersion::Lineup;
    }

    let legacy_set = records::array(obj, "sets")
        .iter()
        .filter_map(Value::as_object)
        .any(|set| LINEUP_SET_FIELDS.iter().any(|f| set.contains_key(*f)));

    if legacy_set {
        SchemaVersion::Lineup
    } else {
        SchemaVersion::Players
    }
}

/// Counts gathered while normalizing a collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub matches: usize,
    pub upgraded_matches: usize,
    pub skipped_matches: usize,
    pub skipped_records: usize,
}

/// A stored action is kept only when its deltas are exactly what recording
/// its primary key produces: the primary at 1 plus each linked key at 1.
fn read_action(value: &Value, index: usize, report: &mut MigrationReport) -> Option<StatAction> {
    match serde_json::from_value::<StatAction>(value.clone()) {
        Ok(action) if action.deltas != build_deltas(action.primary) => {
            warn!(
                index,
                player_id = %action.player_id,
                primary = %action.primary,
                "Skipping action whose deltas do not match its primary key"
            );
            report.skipped_records += 1;
            None
        }
        Ok(action) => Some(action),
        Err(e) => {
            warn!(index, error = %e, "Skipping unreadable action");
            report.skipped_records += 1;
            None
        }
    }
}

fn decode_set(obj: &Map<String, Value>, report: &mut MigrationReport) -> MatchSet {
    let players = records::players(records::array(obj, "players"), report);
    let court = records::court(obj.get("courtPlayerIds"), &players);

    let stat_actions = records::array(obj, "statActions")
        .iter()
        .enumerate()
        .filter_map(|(i, v)| read_action(v, i, report))
        .collect();

    MatchSet {
        our_score: records::count(obj, "ourScore"),
        opponent_score: records::count(obj, "opponentScore"),
        serves: records::parse_each::<ServeRecord>(records::array(obj, "serves"), "serve", report),
        receives: records::parse_each::<ReceiveRecord>(
            records::array(obj, "receives"),
            "receive",
            report,
        ),
        substitutions: records::parse_each::<Substitution>(
            records::array(obj, "substitutions"),
            "substitution",
            report,
        ),
        stat_actions,
        court_player_ids: court,
        players,
    }
}

/// Normalize one raw set record in the canonical layout
pub fn normalize_set(raw: &Value) -> ScorebookResult<MatchSet> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ScorebookError::Malformed("set record is not an object".into()))?;
    Ok(decode_set(obj, &mut MigrationReport::default()))
}

fn decode_result(obj: &Map<String, Value>) -> Option<MatchResult> {
    let raw = obj.get("result")?;
    if raw.is_null() {
        return None;
    }
    match serde_json::from_value::<MatchResult>(raw.clone()) {
        Ok(result) => Some(result),
        Err(_) => {
            warn!(result = %raw, "Ignoring unknown match result");
            None
        }
    }
}

fn decode_match(obj: &Map<String, Value>, report: &mut MigrationReport) -> Match {
    let mut sets: Vec<MatchSet> = Vec::new();
    for (i, raw_set) in records::array(obj, "sets").iter().enumerate() {
        match raw_set.as_object() {
            Some(set) => sets.push(decode_set(set, report)),
            None => {
                warn!(index = i, "Skipping set that is not an object");
                report.skipped_records += 1;
            }
        }
    }

    if sets.is_empty() {
        sets.push(MatchSet::opening());
    } else if sets[0].players.is_empty() {
        // The first set always starts with a full court of blank players
        let opening = MatchSet::opening();
        let first = &mut sets[0];
        first.players = opening.players;
        if first.court_player_ids.iter().all(Option::is_none) {
            first.court_player_ids = opening.court_player_ids;
        }
    }

    Match {
        id: records::string(obj, "id"),
        date: records::string(obj, "date"),
        tournament_name: records::string(obj, "tournamentName"),
        opponent: records::string(obj, "opponent"),
        result: decode_result(obj),
        sets,
    }
}

fn normalize_with_report(raw: &Value, report: &mut MigrationReport) -> ScorebookResult<Match> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ScorebookError::Malformed("match record is not an object".into()))?;

    let m = match detect_version(raw) {
        SchemaVersion::Lineup => {
            report.upgraded_matches += 1;
            decode_match(&legacy::upgrade_match(obj), report)
        }
        SchemaVersion::Players => decode_match(obj, report),
    };
    report.matches += 1;
    Ok(m)
}

/// Normalize one raw match record of any supported layout
pub fn normalize_match(raw: &Value) -> ScorebookResult<Match> {
    normalize_with_report(raw, &mut MigrationReport::default())
}

/// Normalize a stored collection
///
/// Accepts an array of matches or an object keyed by match id, in which
/// case the key becomes the match id. `null` reads as an empty collection.
/// Entries that are not objects are skipped.
pub fn normalize_collection(raw: &Value) -> ScorebookResult<(Vec<Match>, MigrationReport)> {
    let mut report = MigrationReport::default();

    let entries: Vec<(Option<&String>, &Value)> = match raw {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().map(|v| (None, v)).collect(),
        Value::Object(by_id) => by_id.iter().map(|(k, v)| (Some(k), v)).collect(),
        other => {
            return Err(ScorebookError::Malformed(format!(
                "match collection must be an array or object, got {other}"
            )));
        }
    };

    let mut matches = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        match normalize_with_report(value, &mut report) {
            Ok(mut m) => {
                if let Some(key) = key {
                    m.id = key.clone();
                }
                matches.push(m);
            }
            Err(e) => {
                warn!(error = %e, "Skipping match");
                report.skipped_matches += 1;
            }
        }
    }

    info!(
        matches = report.matches,
        upgraded = report.upgraded_matches,
        skipped_matches = report.skipped_matches,
        skipped_records = report.skipped_records,
        "Normalized match collection"
    );
    Ok((matches, report))
}
