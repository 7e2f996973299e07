//! Player statistics across many matches
//!
//! Rosters are per set and ids are minted per match, so a player is matched
//! across matches by trimmed name.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::types::{Match, MatchSet, ReceiveQuality, ServeQuality, StatTotals};

/// Serve counts from the serve/receive sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServeCounts {
    pub total: u32,
    pub miss: u32,
    pub red_star: u32,
    pub black_star: u32,
}

/// Receive counts from the serve/receive sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReceiveCounts {
    pub total: u32,
    /// `setter-return` receives
    pub miss: u32,
    pub no_return: u32,
    pub setter_pinpoint: u32,
    pub other_than_setter: u32,
}

/// Career summary for one player name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CareerStats {
    pub player_name: String,
    pub match_count: usize,
    pub serves: ServeCounts,
    pub receives: ReceiveCounts,
    /// Input-table totals summed over every match
    pub input_totals: StatTotals,
}

impl CareerStats {
    /// `(total - miss) / total`, `None` without serves
    pub fn serve_success_rate(&self) -> Option<f64> {
        success_rate(self.serves.total, self.serves.miss)
    }

    /// `(total - miss) / total`, `None` without receives
    pub fn receive_success_rate(&self) -> Option<f64> {
        success_rate(self.receives.total, self.receives.miss)
    }

    fn merge(mut self, other: CareerStats) -> CareerStats {
        self.match_count += other.match_count;

        self.serves.total += other.serves.total;
        self.serves.miss += other.serves.miss;
        self.serves.red_star += other.serves.red_star;
        self.serves.black_star += other.serves.black_star;

        self.receives.total += other.receives.total;
        self.receives.miss += other.receives.miss;
        self.receives.no_return += other.receives.no_return;
        self.receives.setter_pinpoint += other.receives.setter_pinpoint;
        self.receives.other_than_setter += other.receives.other_than_setter;

        self.input_totals.merge(&other.input_totals);
        self
    }
}

fn success_rate(total: u32, miss: u32) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(total.saturating_sub(miss) as f64 / total as f64)
    }
}

fn is_named(set: &MatchSet, player_id: &str, name: &str) -> bool {
    set.player(player_id)
        .map(|p| p.trimmed_name() == name)
        .unwrap_or(false)
}

fn appears_in(set: &MatchSet, name: &str) -> bool {
    set.players.iter().any(|p| p.trimmed_name() == name)
}

fn match_contribution(m: &Match, name: &str) -> CareerStats {
    let mut stats = CareerStats::default();
    let mut appeared = false;

    for set in &m.sets {
        appeared |= appears_in(set, name);
        let named = |player_id: &str| is_named(set, player_id, name);

        for serve in set.serves.iter().filter(|s| named(&s.player_id)) {
            stats.serves.total += 1;
            match serve.quality {
                ServeQuality::ServeMiss => stats.serves.miss += 1,
                ServeQuality::RedStar => stats.serves.red_star += 1,
                ServeQuality::BlackStar => stats.serves.black_star += 1,
                _ => {}
            }
        }

        for receive in set.receives.iter().filter(|r| named(&r.player_id)) {
            stats.receives.total += 1;
            match receive.quality {
                ReceiveQuality::SetterReturn => stats.receives.miss += 1,
                ReceiveQuality::NoReturn => stats.receives.no_return += 1,
                ReceiveQuality::SetterPinpoint => stats.receives.setter_pinpoint += 1,
                ReceiveQuality::OtherThanSetter => stats.receives.other_than_setter += 1,
            }
        }

        for action in set.stat_actions.iter().filter(|a| named(&a.player_id)) {
            stats.input_totals.apply(action);
        }
    }

    if appeared {
        stats.match_count = 1;
    }
    stats
}

/// Career statistics for `player_name` over `matches`
pub fn career_stats(matches: &[Match], player_name: &str) -> CareerStats {
    let name = player_name.trim();
    if name.is_empty() {
        return CareerStats::default();
    }
    let mut stats = matches
        .par_iter()
        .map(|m| match_contribution(m, name))
        .reduce(CareerStats::default, CareerStats::merge);
    stats.player_name = name.to_string();
    stats
}

/// Serve/receive quality breakdown of one match for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchPerformance {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub date: String,
    pub opponent: String,
    #[serde(rename = "tournamentName")]
    pub tournament_name: String,
    pub serves: BTreeMap<ServeQuality, u32>,
    pub receives: BTreeMap<ReceiveQuality, u32>,
}

fn performance_in(m: &Match, name: &str) -> Option<MatchPerformance> {
    let mut serves: BTreeMap<ServeQuality, u32> =
        ServeQuality::ALL.iter().map(|q| (*q, 0)).collect();
    let mut receives: BTreeMap<ReceiveQuality, u32> =
        ReceiveQuality::ALL.iter().map(|q| (*q, 0)).collect();
    let mut appeared = false;

    for set in &m.sets {
        if !appears_in(set, name) {
            continue;
        }
        appeared = true;
        let named = |player_id: &str| is_named(set, player_id, name);

        for serve in set.serves.iter().filter(|s| named(&s.player_id)) {
            *serves.entry(serve.quality).or_insert(0) += 1;
        }
        for receive in set.receives.iter().filter(|r| named(&r.player_id)) {
            *receives.entry(receive.quality).or_insert(0) += 1;
        }
    }

    appeared.then(|| MatchPerformance {
        match_id: m.id.clone(),
        date: m.date.clone(),
        opponent: m.opponent.clone(),
        tournament_name: m.tournament_name.clone(),
        serves,
        receives,
    })
}

/// Per-match breakdowns for every match `player_name` appeared in, newest first
pub fn match_performances(matches: &[Match], player_name: &str) -> Vec<MatchPerformance> {
    let name = player_name.trim();
    if name.is_empty() {
        return Vec::new();
    }
    let mut rows: Vec<(Option<chrono::NaiveDate>, MatchPerformance)> = matches
        .par_iter()
        .filter_map(|m| performance_in(m, name).map(|p| (m.parsed_date(), p)))
        .collect();

    rows.sort_by(|(da, a), (db, b)| db.cmp(da).then_with(|| b.date.cmp(&a.date)));
    rows.into_iter().map(|(_, p)| p).collect()
}
