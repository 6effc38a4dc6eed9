//! Recent-match feed with resolved usernames

use crate::types::{MatchId, Snapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// One row of the match feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub id: MatchId,
    pub location: String,
    /// `None` when the id does not resolve to a known user
    pub player1: Option<String>,
    pub player2: Option<String>,
    pub score: Vec<String>,
    pub date: DateTime<Utc>,
}

/// All matches, newest first; equal timestamps order by id descending
pub fn recent_matches(snapshot: &Snapshot) -> Vec<MatchSummary> {
    let username = |id| snapshot.user(id).map(|user| user.username.clone());

    let mut feed: Vec<MatchSummary> = snapshot
        .matches
        .iter()
        .map(|m| MatchSummary {
            id: m.id,
            location: m.location.clone(),
            player1: username(m.player1_id),
            player2: username(m.player2_id),
            score: m.score.clone(),
            date: m.created_at,
        })
        .collect();

    feed.sort_by_key(|summary| Reverse((summary.date, summary.id)));
    feed
}
