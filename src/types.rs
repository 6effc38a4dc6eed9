//! Common types shared by the statistics and rating engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Identifier of a user (an individual or a doubles pairing)
pub type PlayerId = i64;

/// Identifier of a recorded match
pub type MatchId = i64;

/// Whether a user entry stands for one person or a doubles pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayType {
    Singles,
    Doubles,
}

impl PlayType {
    /// Classify a username by the doubles separator convention ("Ann/Bob")
    pub fn from_username(username: &str, separator: &str) -> Self {
        if !separator.is_empty() && username.contains(separator) {
            PlayType::Doubles
        } else {
            PlayType::Singles
        }
    }
}

impl std::fmt::Display for PlayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayType::Singles => write!(f, "Singles"),
            PlayType::Doubles => write!(f, "Doubles"),
        }
    }
}

/// A user as seen by the engine, tagged with its play type at ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: PlayerId,
    pub username: String,
    pub play_type: PlayType,
}

impl User {
    /// Create a user, deriving the play type from the username
    pub fn new(id: PlayerId, username: impl Into<String>, separator: &str) -> Self {
        let username = username.into();
        let play_type = PlayType::from_username(&username, separator);
        Self {
            id,
            username,
            play_type,
        }
    }
}

/// A recorded head-to-head match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub location: String,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    /// Set results in play order, each "<games player1>-<games player2>"
    pub score: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Whether the given player took part in this match
    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.player1_id == player_id || self.player2_id == player_id
    }

    /// Whether the two participants are exactly `a` and `b`, in either order
    pub fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.player1_id == a && self.player2_id == b)
            || (self.player1_id == b && self.player2_id == a)
    }

    /// Both participants, player 1 first
    pub fn participants(&self) -> [PlayerId; 2] {
        [self.player1_id, self.player2_id]
    }
}

/// Consistent view of users and matches handed over by the collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub matches: Vec<Match>,
}

impl Snapshot {
    pub fn new(users: Vec<User>, matches: Vec<Match>) -> Self {
        Self { users, matches }
    }

    /// Look up a user by id
    pub fn user(&self, id: PlayerId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }
}

/// A match about to be recorded, before storage assigns an id and timestamp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDraft {
    pub player1_id: Option<PlayerId>,
    pub player2_id: Option<PlayerId>,
    pub location: String,
    pub score: Vec<String>,
}

impl MatchDraft {
    /// Check required fields and that every set token parses
    pub fn validate(&self) -> Result<()> {
        let (player1_id, player2_id) = match (self.player1_id, self.player2_id) {
            (Some(p1), Some(p2)) => (p1, p2),
            _ => {
                return Err(LedgerError::InvalidMatchDraft {
                    reason: "both players are required".to_string(),
                }
                .into())
            }
        };

        if player1_id == player2_id {
            return Err(LedgerError::InvalidMatchDraft {
                reason: format!("player {} cannot play against themselves", player1_id),
            }
            .into());
        }

        if self.location.trim().is_empty() {
            return Err(LedgerError::InvalidMatchDraft {
                reason: "location is required".to_string(),
            }
            .into());
        }

        if self.score.is_empty() {
            return Err(LedgerError::InvalidMatchDraft {
                reason: "at least one set score is required".to_string(),
            }
            .into());
        }

        for token in &self.score {
            crate::score::parse_set_score(token)?;
        }

        Ok(())
    }
}
