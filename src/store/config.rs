//! Store configuration

use std::env;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::event_log::UnknownPlayerPolicy;

/// Environment variable holding the match file path
pub const FILE_PATH_ENV: &str = "SCOREBOOK_FILE_PATH";
/// Environment variable selecting the unknown-player policy
pub const UNKNOWN_PLAYER_ENV: &str = "SCOREBOOK_UNKNOWN_PLAYER";
/// File name used when no path is configured
pub const DEFAULT_FILE_NAME: &str = "matches.json";

/// Configuration for the MatchStore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path to the JSON file holding every match
    pub file_path: PathBuf,
    /// Policy for actions naming a player that is not on the roster
    pub unknown_player: UnknownPlayerPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_path: current_dir().join(DEFAULT_FILE_NAME),
            unknown_player: UnknownPlayerPolicy::default(),
        }
    }
}

fn current_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Relative paths are resolved against the current directory
fn resolve(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        current_dir().join(path)
    }
}

impl StoreConfig {
    /// Create config with a custom file path
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: resolve(file_path.as_ref()),
            ..Default::default()
        }
    }

    /// Read `SCOREBOOK_FILE_PATH` and `SCOREBOOK_UNKNOWN_PLAYER`
    ///
    /// Unset variables keep their defaults; an unrecognised policy is logged
    /// and ignored.
    pub fn from_env() -> Self {
        let mut config = match env::var(FILE_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::new(path.trim()),
            _ => Self::default(),
        };

        if let Ok(raw) = env::var(UNKNOWN_PLAYER_ENV) {
            match raw.parse::<UnknownPlayerPolicy>() {
                Ok(policy) => config.unknown_player = policy,
                Err(e) => warn!(value = %raw, error = %e, "Ignoring {}", UNKNOWN_PLAYER_ENV),
            }
        }
        config
    }

    /// Replace the file path
    pub fn with_file_path<P: AsRef<Path>>(mut self, file_path: P) -> Self {
        self.file_path = resolve(file_path.as_ref());
        self
    }

    /// Replace the unknown-player policy
    pub fn with_unknown_player(mut self, policy: UnknownPlayerPolicy) -> Self {
        self.unknown_player = policy;
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}
