//! Ranked leaderboard for one play type

use crate::rating::engine::RatingReport;
use crate::types::{PlayType, PlayerId, User};
use crate::utils::{display_rating, rating_difference};
use serde::{Deserialize, Serialize};

/// Podium marker for the top three rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal for a 1-based rank, if any
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub player_id: PlayerId,
    pub username: String,
    pub rating: f64,
    /// Rating rounded for display
    pub display_rating: i64,
    pub gap_to_leader: f64,
    pub medal: Option<Medal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub play_type: PlayType,
    pub rows: Vec<LeaderboardRow>,
}

impl Leaderboard {
    /// Rank the rated users of `play_type`, highest rating first
    pub fn build(users: &[User], report: &RatingReport, play_type: PlayType) -> Self {
        let table = report.for_play_type(users, play_type);
        let ranked = table.ranked();
        let leader = ranked.first().map(|(_, rating)| *rating);

        let rows = ranked
            .into_iter()
            .enumerate()
            .filter_map(|(index, (player_id, rating))| {
                let user = users.iter().find(|user| user.id == player_id)?;
                let rank = index + 1;
                Some(LeaderboardRow {
                    rank,
                    player_id,
                    username: user.username.clone(),
                    rating,
                    display_rating: display_rating(rating),
                    gap_to_leader: leader.map_or(0.0, |top| rating_difference(top, rating)),
                    medal: Medal::for_rank(rank),
                })
            })
            .collect();

        Self { play_type, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
