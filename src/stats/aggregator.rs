//! Cumulative win/loss, set and game counters
//!
//! Statistics are plain sums over classified matches, so unlike ratings they
//! do not depend on the order matches are delivered in.

use crate::error::Result;
use crate::score::{classify, MatchOutcome, MatchResult};
use crate::types::{Match, PlayerId, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Aggregate record for one player, optionally against one opponent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    /// Matches where both sides won the same number of sets
    pub draws: u32,
    /// Percentage of decided matches won, 0 when nothing was decided
    pub win_rate: f64,
    /// Decided matches, always `wins + losses`
    pub total_matches: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
}

impl PlayerStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified match into the counters
    pub fn add_outcome(&mut self, outcome: &MatchOutcome) {
        match outcome.result {
            MatchResult::Win => self.wins += 1,
            MatchResult::Loss => self.losses += 1,
            MatchResult::Draw => self.draws += 1,
        }

        self.sets_won = self.sets_won.saturating_add(outcome.sets_won);
        self.sets_lost = self.sets_lost.saturating_add(outcome.sets_lost);
        self.games_won = self.games_won.saturating_add(outcome.games_won);
        self.games_lost = self.games_lost.saturating_add(outcome.games_lost);

        self.total_matches = self.wins + self.losses;
        self.win_rate = if self.total_matches > 0 {
            self.wins as f64 / self.total_matches as f64 * 100.0
        } else {
            0.0
        };
    }

    /// Every match counted, drawn ones included
    pub fn matches_played(&self) -> u32 {
        self.total_matches + self.draws
    }
}

/// Computes statistics over a snapshot, honouring an exclusion list
#[derive(Debug, Clone)]
pub struct StatsAggregator<'a> {
    snapshot: &'a Snapshot,
    excluded: BTreeSet<PlayerId>,
}

impl<'a> StatsAggregator<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            excluded: BTreeSet::new(),
        }
    }

    /// Ignore every match involving one of these players
    pub fn with_excluded(mut self, ids: impl IntoIterator<Item = PlayerId>) -> Self {
        self.excluded.extend(ids);
        self
    }

    /// Totals over every match `player_id` took part in
    pub fn stats_for(&self, player_id: PlayerId) -> Result<PlayerStats> {
        self.aggregate(player_id, |m| m.involves(player_id))
    }

    /// Totals over matches between exactly `player_id` and `opponent_id`,
    /// from `player_id`'s side
    pub fn head_to_head(&self, player_id: PlayerId, opponent_id: PlayerId) -> Result<PlayerStats> {
        self.aggregate(player_id, |m| m.is_between(player_id, opponent_id))
    }

    /// `stats_for` every user in the snapshot
    pub fn all_player_stats(&self) -> Result<BTreeMap<PlayerId, PlayerStats>> {
        self.snapshot
            .users
            .iter()
            .map(|user| Ok((user.id, self.stats_for(user.id)?)))
            .collect()
    }

    fn aggregate<F>(&self, perspective: PlayerId, selects: F) -> Result<PlayerStats>
    where
        F: Fn(&Match) -> bool,
    {
        let mut stats = PlayerStats::new();

        for m in self.snapshot.matches.iter().filter(|m| selects(m)) {
            if self.excluded.contains(&m.player1_id) || self.excluded.contains(&m.player2_id) {
                continue;
            }
            let outcome = classify(m, perspective)?;
            stats.add_outcome(&outcome);
        }

        debug!(
            "Aggregated {} decided matches for player {}",
            stats.total_matches, perspective
        );
        Ok(stats)
    }
}
