//! Volley Scorebook
//!
//! Volleyball match scorekeeping: every tap in the input table is appended
//! to a per-set action log, and player statistics are recomputed from the
//! log on demand.
//!
//! # Features
//!
//! - **Linked counters**: a serve point also counts a serve attempt, an
//!   attack point or miss also counts an attack attempt
//! - **Global undo**: the most recent action of a set is removed, whoever it
//!   belongs to
//! - **Copy-on-write**: every operation returns a new match value
//! - **Normalize on load**: older stored layouts are upgraded when read
//!
//! # Modules
//!
//! - `types`: Match, set, player and stat data structures
//! - `event_log`: Action log, linkage rules and aggregation
//! - `scorebook`: Match-level operations (scores, roster, substitutions)
//! - `migration`: Schema detection and lenient decoding of stored records
//! - `store`: JSON-file persistence with an in-memory cache
//! - `error`: Error type shared by all operations
//! - `utils`: Timestamps and atomic file writes
//!
//! # Example
//!
//! ```no_run
//! use volley_scorebook::{totals_for_match, Match, MatchStore, StatKey};
//!
//! fn main() -> volley_scorebook::ScorebookResult<()> {
//!     let store = MatchStore::from_env()?;
//!     let book = store.scorebook();
//!
//!     let m = Match::new("2024-05-01".into(), "Spring Cup".into(), "Eagles".into());
//!     let m = store.insert(m)?;
//!     let server = m.sets[0].players[0].id.clone();
//!     store.with_match(&m.id, |current| {
//!         book.record_action(current, 0, &server, StatKey::ServePoint)
//!     })?;
//!
//!     let totals = totals_for_match(&store.get(&m.id)?);
//!     println!("{:?}", totals[&server]);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod event_log;
pub mod migration;
pub mod scorebook;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use error::{ScorebookError, ScorebookResult};
pub use event_log::{
    career_stats, match_performances, totals_for_match, totals_for_set, totals_table,
    CareerStats, UnknownPlayerPolicy,
};
pub use migration::{normalize_collection, normalize_match};
pub use scorebook::Scorebook;
pub use store::{MatchStore, StoreConfig};
pub use types::{
    Match, MatchResult, MatchSet, Player, Side, StatAction, StatKey, StatTotals, TotalsByPlayer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
