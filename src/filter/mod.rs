//! Filter and grouping policy
//!
//! Plain predicate values deciding which matches take part in a computation:
//! an exclusion list, a set of season windows, and the singles/doubles split
//! of the user list. Statistics use only the exclusion list; the rating fold
//! uses both exclusion and seasons.

pub mod season;

pub use season::{SeasonWindow, SeasonWindows};

use crate::types::{Match, PlayType, PlayerId, User};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which matches qualify for a computation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchFilter {
    excluded: BTreeSet<PlayerId>,
    /// `None` means no season restriction at all
    seasons: Option<SeasonWindows>,
}

impl MatchFilter {
    /// A filter that admits every match
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the given players and all of their matches
    pub fn with_excluded(mut self, ids: impl IntoIterator<Item = PlayerId>) -> Self {
        self.excluded.extend(ids);
        self
    }

    /// Restrict matches to the enabled season windows
    pub fn with_seasons(mut self, seasons: SeasonWindows) -> Self {
        self.seasons = Some(seasons);
        self
    }

    pub fn excluded(&self) -> &BTreeSet<PlayerId> {
        &self.excluded
    }

    pub fn seasons(&self) -> Option<&SeasonWindows> {
        self.seasons.as_ref()
    }

    pub fn is_excluded(&self, player_id: PlayerId) -> bool {
        self.excluded.contains(&player_id)
    }

    /// Whether neither participant of `m` is excluded
    pub fn admits_players(&self, m: &Match) -> bool {
        !self.is_excluded(m.player1_id) && !self.is_excluded(m.player2_id)
    }

    /// Whether `m` passes both the exclusion list and the season windows
    pub fn admits(&self, m: &Match) -> bool {
        self.admits_players(m)
            && self
                .seasons
                .as_ref()
                .map_or(true, |seasons| seasons.admits(m.created_at))
    }
}

/// Ids of the users of one play type
pub fn players_of_type(users: &[User], play_type: PlayType) -> BTreeSet<PlayerId> {
    users
        .iter()
        .filter(|user| user.play_type == play_type)
        .map(|user| user.id)
        .collect()
}
