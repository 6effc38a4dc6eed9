//! JSON file snapshot source

use crate::error::{LedgerError, Result};
use crate::source::provider::{SnapshotSource, UserRecord};
use crate::types::Match;
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;

/// On-disk layout: the two collaborator listings side by side
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

/// Reads users and matches from a JSON export
///
/// The file is parsed at most once per source, so both listings always come
/// from the same contents. A failed read is not cached.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    contents: OnceCell<SnapshotFile>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            contents: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn snapshot_file(&self) -> Result<&SnapshotFile> {
        self.contents.get_or_try_init(|| self.read()).await
    }

    async fn read(&self) -> Result<SnapshotFile> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            LedgerError::SnapshotUnavailable {
                message: format!("{}: {}", self.path.display(), e),
            }
        })?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse snapshot {}", self.path.display()))
    }
}

#[async_trait]
impl SnapshotSource for JsonFileSource {
    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        Ok(self.snapshot_file().await?.users.clone())
    }

    async fn list_matches(&self) -> Result<Vec<Match>> {
        Ok(self.snapshot_file().await?.matches.clone())
    }
}
