//! Error types for scorebook operations

use thiserror::Error;

/// Result type for scorebook operations
pub type ScorebookResult<T> = Result<T, ScorebookError>;

/// Errors that can occur while recording or persisting match data
///
/// Undo on an empty log is not an error; those operations return `None`.
#[derive(Error, Debug)]
pub enum ScorebookError {
    #[error("Player '{player_id}' is not on the roster")]
    UnknownPlayer { player_id: String },

    #[error("Set index {index} out of range (match has {len} sets)")]
    SetOutOfRange { index: usize, len: usize },

    #[error("Player '{player_id}' is not on court")]
    NotOnCourt { player_id: String },

    #[error("Player name must not be empty")]
    EmptyName,

    #[error("Match not found: {id}")]
    UnknownMatch { id: String },

    #[error("Malformed record: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScorebookError {
    /// Whether the error is a caller validation error (shown inline to the user)
    /// rather than a persistence failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScorebookError::UnknownPlayer { .. }
                | ScorebookError::SetOutOfRange { .. }
                | ScorebookError::NotOnCourt { .. }
                | ScorebookError::EmptyName
                | ScorebookError::UnknownMatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScorebookError::UnknownPlayer {
            player_id: "p9".to_string(),
        };
        assert_eq!(err.to_string(), "Player 'p9' is not on the roster");

        let err = ScorebookError::SetOutOfRange { index: 3, len: 2 };
        assert_eq!(
            err.to_string(),
            "Set index 3 out of range (match has 2 sets)"
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(ScorebookError::EmptyName.is_validation());
        let io = ScorebookError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!io.is_validation());
    }
}
