//! Error types for the statistics and rating engine
//!
//! Fallible operations return `anyhow::Result`; the specific conditions a
//! caller may want to react to are modelled as `LedgerError` variants and can
//! be recovered with `downcast_ref`.

use crate::types::{MatchId, PlayerId};

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific ledger scenarios
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Malformed set score '{token}': {reason}")]
    MalformedScore { token: String, reason: String },

    #[error("Match {match_id} references unknown player {player_id}")]
    UnknownPlayerReference {
        match_id: MatchId,
        player_id: PlayerId,
    },

    #[error("Invalid match {match_id}: {reason}")]
    InvalidMatch { match_id: MatchId, reason: String },

    #[error("Invalid match draft: {reason}")]
    InvalidMatchDraft { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Snapshot unavailable: {message}")]
    SnapshotUnavailable { message: String },
}

impl LedgerError {
    /// Shorthand for a malformed score token
    pub fn malformed_score(token: &str, reason: impl Into<String>) -> Self {
        Self::MalformedScore {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}
