//! Snapshot source trait, the in-memory source and ingestion

use crate::error::{LedgerError, Result};
use crate::types::{Match, PlayType, PlayerId, Snapshot, User};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// A user row as stored, before play-type tagging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: PlayerId,
    pub username: String,
}

/// Trait for the storage collaborator that supplies users and matches
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// All users, in storage order
    async fn list_users(&self) -> Result<Vec<UserRecord>>;

    /// All matches, in storage order (not necessarily chronological)
    async fn list_matches(&self) -> Result<Vec<Match>>;
}

/// Source backed by vectors held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSnapshotSource {
    users: Vec<UserRecord>,
    matches: Vec<Match>,
}

impl StaticSnapshotSource {
    pub fn new(users: Vec<UserRecord>, matches: Vec<Match>) -> Self {
        Self { users, matches }
    }
}

#[async_trait]
impl SnapshotSource for StaticSnapshotSource {
    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        Ok(self.users.clone())
    }

    async fn list_matches(&self) -> Result<Vec<Match>> {
        Ok(self.matches.clone())
    }
}

/// Fetch users and matches concurrently and ingest them
pub async fn load_snapshot(source: &dyn SnapshotSource, separator: &str) -> Result<Snapshot> {
    let (users, matches) = tokio::try_join!(source.list_users(), source.list_matches())?;
    ingest(users, matches, separator)
}

/// Tag users with their play type and check match invariants
///
/// A match whose two player ids are equal is rejected. Ids that do not
/// resolve to a user are left in place; the rating engine reports them.
pub fn ingest(users: Vec<UserRecord>, matches: Vec<Match>, separator: &str) -> Result<Snapshot> {
    let mut seen = BTreeSet::new();
    let users: Vec<User> = users
        .into_iter()
        .filter(|record| seen.insert(record.id))
        .map(|record| User::new(record.id, record.username, separator))
        .collect();

    for m in &matches {
        if m.player1_id == m.player2_id {
            return Err(LedgerError::InvalidMatch {
                match_id: m.id,
                reason: format!("player {} is on both sides", m.player1_id),
            }
            .into());
        }
    }

    debug!(
        "Ingested {} users ({} doubles pairings)",
        users.len(),
        users
            .iter()
            .filter(|u| u.play_type == PlayType::Doubles)
            .count()
    );
    info!(
        "Loaded snapshot with {} users and {} matches",
        users.len(),
        matches.len()
    );

    Ok(Snapshot::new(users, matches))
}
