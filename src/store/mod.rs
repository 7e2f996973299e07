//! Match Store - JSON-file persistence with an in-memory cache
//!
//! The whole collection lives in one JSON array on disk. It is read and
//! normalized once when the store opens, then rewritten atomically after
//! every mutation.

mod config;
mod crud;

pub use config::{StoreConfig, DEFAULT_FILE_NAME, FILE_PATH_ENV, UNKNOWN_PLAYER_ENV};

use std::fs;
use std::path::Path;

use parking_lot::RwLock;
use tracing::info;

use crate::error::ScorebookResult;
use crate::migration::{normalize_collection, MigrationReport};
use crate::scorebook::Scorebook;
use crate::types::Match;
use crate::utils::atomic_write;

/// Match collection backed by a JSON file, newest match first
pub struct MatchStore {
    pub(crate) config: StoreConfig,
    pub(crate) matches: RwLock<Vec<Match>>,
    report: MigrationReport,
}

impl MatchStore {
    /// Open the store described by `SCOREBOOK_FILE_PATH`
    pub fn from_env() -> ScorebookResult<Self> {
        Self::open(StoreConfig::from_env())
    }

    /// Open a store, loading and normalizing the file if it exists
    pub fn open(config: StoreConfig) -> ScorebookResult<Self> {
        let (matches, report) = Self::load_from_file(config.file_path())?;
        info!(
            path = %config.file_path().display(),
            matches = matches.len(),
            "Opened match store"
        );
        Ok(Self {
            config,
            matches: RwLock::new(matches),
            report,
        })
    }

    /// Open a store at `file_path` with default settings otherwise
    pub fn with_file_path<P: AsRef<Path>>(file_path: P) -> ScorebookResult<Self> {
        Self::open(StoreConfig::new(file_path))
    }

    fn load_from_file(path: &Path) -> ScorebookResult<(Vec<Match>, MigrationReport)> {
        if !path.exists() {
            return Ok((Vec::new(), MigrationReport::default()));
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok((Vec::new(), MigrationReport::default()));
        }

        let raw: serde_json::Value = serde_json::from_str(&content)?;
        normalize_collection(&raw)
    }

    /// Write the collection to disk (caller holds the write lock)
    pub(crate) fn persist(&self, matches: &[Match]) -> ScorebookResult<()> {
        let content = serde_json::to_string_pretty(matches)?;
        atomic_write(self.config.file_path(), &content)?;
        info!(
            path = %self.config.file_path().display(),
            matches = matches.len(),
            "Persisted matches"
        );
        Ok(())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// What normalization did when the file was loaded
    pub fn load_report(&self) -> &MigrationReport {
        &self.report
    }

    /// Scorebook bound to the configured unknown-player policy
    pub fn scorebook(&self) -> Scorebook {
        Scorebook::with_policy(self.config.unknown_player)
    }
}

impl MatchStore {
    pub fn list(&self) -> Vec<Match> {
        crud::list(self)
    }

    pub fn get(&self, id: &str) -> ScorebookResult<Match> {
        crud::get(self, id)
    }

    pub fn insert(&self, m: Match) -> ScorebookResult<Match> {
        crud::insert(self, m)
    }

    pub fn update(&self, m: Match) -> ScorebookResult<Match> {
        crud::update(self, m)
    }

    pub fn delete(&self, id: &str) -> ScorebookResult<Match> {
        crud::delete(self, id)
    }

    /// Apply a scorebook operation to one match and persist the result
    ///
    /// `f` runs while the store's write lock is held. The lock is not
    /// reentrant: calling `get`, `list` or any other method of this store
    /// from inside `f` deadlocks. Work from the `&Match` passed to `f`, which
    /// is the current stored version. Nothing is written when `f` fails.
    pub fn with_match<T, F>(&self, id: &str, f: F) -> ScorebookResult<T>
    where
        F: FnOnce(&Match) -> ScorebookResult<(Match, T)>,
    {
        crud::with_match(self, id, f)
    }
}
