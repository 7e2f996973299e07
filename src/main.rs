//! Scorebook report - Binary Entry Point
//!
//! Loads the match file and prints per-match input-table totals as JSON.
//!
//! ```text
//! scorebook [FILE] [--player NAME] [--table]
//! ```
//!
//! `FILE` overrides `SCOREBOOK_FILE_PATH`. With `--player` the report also
//! carries that player's career statistics. `--table` prints the input
//! table as text instead of JSON.

use std::path::PathBuf;

use clap::Parser;
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use volley_scorebook::event_log::{match_performances, team_totals};
use volley_scorebook::{
    career_stats, totals_for_match, totals_table, Match, MatchStore, ScorebookResult, StatKey,
    StoreConfig,
};

#[derive(Parser, Debug)]
#[command(name = "scorebook", version, about, long_about = None)]
struct Args {
    /// Match file, overrides SCOREBOOK_FILE_PATH
    file: Option<PathBuf>,

    /// Add this player's career statistics to the report
    #[arg(short, long)]
    player: Option<String>,

    /// Print the input table as text instead of JSON
    #[arg(long)]
    table: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn match_report(m: &Match) -> Value {
    let sets: Vec<Value> = m
        .sets
        .iter()
        .map(|s| json!([s.our_score, s.opponent_score]))
        .collect();
    json!({
        "id": m.id,
        "date": m.date,
        "tournamentName": m.tournament_name,
        "opponent": m.opponent,
        "result": m.result,
        "sets": sets,
        "team": team_totals(&totals_for_match(m)),
        "players": totals_table(m, None),
    })
}

/// Input table as text: one row per player, one column per stat key
fn render_table(m: &Match) -> String {
    let mut out = format!("{} {} vs {}\n", m.date, m.tournament_name, m.opponent);
    out.push_str(&format!("{:>3} {:<16}", "#", "name"));
    for key in StatKey::ALL {
        out.push_str(&format!("{:>5}", key.label()));
    }
    out.push('\n');

    for row in totals_table(m, None) {
        let name = row.name.trim();
        let name = if name.is_empty() { "-" } else { name };
        out.push_str(&format!("{:>3} {:<16}", row.number, name));
        for (_, count) in row.totals.iter() {
            out.push_str(&format!("{:>5}", count));
        }
        out.push('\n');
    }
    out
}

fn main() -> ScorebookResult<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = StoreConfig::from_env();
    if let Some(path) = &args.file {
        config = config.with_file_path(path);
    }
    let store = MatchStore::open(config)?;
    let matches = store.list();
    info!(matches = matches.len(), "Building report");

    if args.table {
        for m in &matches {
            println!("{}", render_table(m));
        }
        return Ok(());
    }

    let mut report = json!({
        "matches": matches.iter().map(match_report).collect::<Vec<_>>(),
    });

    if let Some(name) = &args.player {
        let stats = career_stats(&matches, name);
        report["career"] = json!({
            "stats": stats,
            "serveSuccessRate": stats.serve_success_rate(),
            "receiveSuccessRate": stats.receive_success_rate(),
            "performances": match_performances(&matches, name),
        });
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
