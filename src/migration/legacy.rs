//! Lineup schema (v1) adapter
//!
//! v1 sets kept the starting six in `lineup`, reserves in `bench`, serves in
//! `services` with a separate `pointType`, and the match carried
//! `tournament`. This module rewrites such records into the canonical field
//! layout; the canonical decoder then reads them like any other record.

use serde_json::{json, Map, Value};

use super::records::{array, string};

/// v1 set fields with no canonical counterpart
const STALE_SET_FIELDS: &[&str] = &[
    "myScore",
    "lineup",
    "bench",
    "services",
    "serveTurn",
    "setNumber",
];

fn serve_quality(service: &Map<String, Value>) -> Value {
    match service.get("pointType").and_then(Value::as_str) {
        Some("red_star") => return json!("red-star"),
        Some("black_star") => return json!("black-star"),
        _ => {}
    }
    match service.get("quality").and_then(Value::as_str) {
        Some("pinpoint") => json!("setter-pinpoint"),
        Some("setter_move") => json!("setter-move"),
        Some("other") => json!("other-than-setter"),
        Some("miss") => json!("serve-miss"),
        // Unknown values are passed through and rejected by the decoder
        Some(other) => json!(other),
        None => Value::Null,
    }
}

fn receive_quality(receive: &Map<String, Value>) -> Value {
    match receive.get("quality").and_then(Value::as_str) {
        Some("perfect") => json!("setter-pinpoint"),
        Some("good") => json!("other-than-setter"),
        Some("follow") => json!("no-return"),
        Some("miss") => json!("setter-return"),
        Some(other) => json!(other),
        None => Value::Null,
    }
}

/// Split a `"ours-theirs"` score string
fn parse_score(score: &str) -> Option<(u32, u32)> {
    let (ours, theirs) = score.split_once('-')?;
    Some((ours.trim().parse().ok()?, theirs.trim().parse().ok()?))
}

fn upgrade_substitution(sub: &Map<String, Value>) -> Value {
    let mut out = Map::new();
    let out_player = sub.get("outPlayer").or_else(|| sub.get("outPlayerId"));
    let in_player = sub.get("inPlayer").or_else(|| sub.get("inPlayerId"));
    out.insert(
        "outPlayer".into(),
        out_player.cloned().unwrap_or(Value::Null),
    );
    out.insert("inPlayer".into(), in_player.cloned().unwrap_or(Value::Null));
    out.insert(
        "timestamp".into(),
        sub.get("timestamp").cloned().unwrap_or(json!(0)),
    );

    if let Some((ours, theirs)) = parse_score(&string(sub, "score")) {
        out.insert("ourScore".into(), json!(ours));
        out.insert("opponentScore".into(), json!(theirs));
    }
    Value::Object(out)
}

fn upgrade_record(record: &Value, quality: impl Fn(&Map<String, Value>) -> Value) -> Value {
    match record.as_object() {
        Some(obj) => json!({
            "playerId": obj.get("playerId").cloned().unwrap_or(Value::Null),
            "quality": quality(obj),
            "timestamp": obj.get("timestamp").cloned().unwrap_or(json!(0)),
        }),
        None => record.clone(),
    }
}

/// Rewrite one v1 set into canonical field names
pub(crate) fn upgrade_set(set: &Map<String, Value>) -> Map<String, Value> {
    let mut out = set.clone();

    if !out.contains_key("ourScore") {
        if let Some(score) = out.remove("myScore") {
            out.insert("ourScore".into(), score);
        }
    }

    if !out.contains_key("players") {
        let lineup = array(set, "lineup");
        let mut players: Vec<Value> = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        for entry in lineup.iter().chain(array(set, "bench")) {
            let Some(obj) = entry.as_object() else {
                continue;
            };
            let id = string(obj, "id");
            if id.is_empty() || seen.contains(&id) {
                continue;
            }
            players.push(json!({
                "id": id,
                "name": string(obj, "name"),
                "number": players.len() + 1,
            }));
            seen.push(id);
        }
        out.insert("players".into(), Value::Array(players));

        if !out.contains_key("courtPlayerIds") {
            let court: Vec<Value> = lineup
                .iter()
                .filter_map(Value::as_object)
                .map(|p| json!(string(p, "id")))
                .collect();
            out.insert("courtPlayerIds".into(), Value::Array(court));
        }
    }

    if !out.contains_key("serves") {
        let serves: Vec<Value> = array(set, "services")
            .iter()
            .map(|s| upgrade_record(s, serve_quality))
            .collect();
        out.insert("serves".into(), Value::Array(serves));
    }

    let receives: Vec<Value> = array(set, "receives")
        .iter()
        .map(|r| upgrade_record(r, receive_quality))
        .collect();
    out.insert("receives".into(), Value::Array(receives));

    let substitutions: Vec<Value> = array(set, "substitutions")
        .iter()
        .map(|s| match s.as_object() {
            Some(obj) => upgrade_substitution(obj),
            None => s.clone(),
        })
        .collect();
    out.insert("substitutions".into(), Value::Array(substitutions));

    for stale in STALE_SET_FIELDS {
        out.remove(*stale);
    }
    out
}

/// Rewrite one v1 match into canonical field names
pub(crate) fn upgrade_match(m: &Map<String, Value>) -> Map<String, Value> {
    let mut out = m.clone();

    if let Some(tournament) = out.remove("tournament") {
        out.entry("tournamentName").or_insert(tournament);
    }
    if out.get("result").and_then(Value::as_str) == Some("loss") {
        out.insert("result".into(), json!("lose"));
    }

    let sets: Vec<Value> = array(m, "sets")
        .iter()
        .map(|s| match s.as_object() {
            Some(obj) => Value::Object(upgrade_set(obj)),
            None => s.clone(),
        })
        .collect();
    out.insert("sets".into(), Value::Array(sets));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_map(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_lineup_and_bench_become_players() {
        let set = as_map(json!({
            "myScore": 12,
            "opponentScore": 9,
            "lineup": [{"id": "a", "name": "A"}, {"id": "b", "name": "B"}],
            "bench": [{"id": "c", "name": "C"}, {"id": "a", "name": "dup"}],
        }));

        let out = upgrade_set(&set);
        assert_eq!(out["ourScore"], json!(12));
        assert!(!out.contains_key("myScore"));

        let players = out["players"].as_array().unwrap();
        assert_eq!(players.len(), 3);
        assert_eq!(players[2], json!({"id": "c", "name": "C", "number": 3}));
        assert_eq!(out["courtPlayerIds"], json!(["a", "b"]));
    }

    #[test]
    fn test_service_quality_mapping() {
        let set = as_map(json!({
            "services": [
                {"playerId": "a", "quality": "pinpoint", "pointType": "none", "timestamp": 1},
                {"playerId": "a", "quality": "other", "pointType": "red_star", "timestamp": 2},
                {"playerId": "a", "quality": "miss", "timestamp": 3},
            ],
            "receives": [
                {"playerId": "b", "quality": "follow", "timestamp": 4},
            ],
        }));

        let out = upgrade_set(&set);
        let qualities: Vec<&str> = out["serves"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["quality"].as_str().unwrap())
            .collect();
        assert_eq!(qualities, vec!["setter-pinpoint", "red-star", "serve-miss"]);
        assert_eq!(out["receives"][0]["quality"], json!("no-return"));
    }

    #[test]
    fn test_substitution_fields_and_score() {
        let set = as_map(json!({
            "substitutions": [
                {"outPlayerId": "a", "inPlayerId": "c", "score": "10-8", "timestamp": 5},
            ],
        }));

        let expected = json!({
            "outPlayer": "a",
            "inPlayer": "c",
            "timestamp": 5,
            "ourScore": 10,
            "opponentScore": 8,
        });
        let out = upgrade_set(&set);
        assert_eq!(out["substitutions"][0], expected);
    }

    #[test]
    fn test_match_level_fields() {
        let raw = json!({"tournament": "Spring Cup", "result": "loss", "sets": []});
        let out = upgrade_match(&as_map(raw));
        assert_eq!(out["tournamentName"], json!("Spring Cup"));
        assert_eq!(out["result"], json!("lose"));
        assert!(!out.contains_key("tournament"));
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("25-23"), Some((25, 23)));
        assert_eq!(parse_score(" 3 - 0 "), Some((3, 0)));
        assert_eq!(parse_score("deuce"), None);
    }
}
