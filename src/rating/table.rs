//! Rating tables
//!
//! `RatingLedger` is the working state of one fold: every player's current
//! rating and how many qualifying matches they played. It lives only for a
//! single computation. `RatingTable` is the published result.

use crate::types::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Working entry for one player during a fold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub player_id: PlayerId,
    pub rating: f64,
    pub matches_played: u32,
}

impl RatingEntry {
    /// Create a new rating entry for a player who has not played yet
    pub fn new(player_id: PlayerId, initial_rating: f64) -> Self {
        Self {
            player_id,
            rating: initial_rating,
            matches_played: 0,
        }
    }

    /// Update the rating and increment matches played
    pub fn update_rating(&mut self, new_rating: f64) {
        self.rating = new_rating;
        self.matches_played += 1;
    }
}

/// Per-invocation accumulator for the rating fold
#[derive(Debug, Clone)]
pub struct RatingLedger {
    entries: BTreeMap<PlayerId, RatingEntry>,
    initial_rating: f64,
}

impl RatingLedger {
    pub fn new(initial_rating: f64) -> Self {
        Self {
            entries: BTreeMap::new(),
            initial_rating,
        }
    }

    /// Register a player at the initial rating; no-op if already present
    pub fn register(&mut self, player_id: PlayerId) {
        let initial_rating = self.initial_rating;
        self.entries
            .entry(player_id)
            .or_insert_with(|| RatingEntry::new(player_id, initial_rating));
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.entries.contains_key(&player_id)
    }

    /// Current rating, or the initial rating for an unseen player
    pub fn rating(&self, player_id: PlayerId) -> f64 {
        self.entries
            .get(&player_id)
            .map_or(self.initial_rating, |entry| entry.rating)
    }

    pub fn get(&self, player_id: PlayerId) -> Option<&RatingEntry> {
        self.entries.get(&player_id)
    }

    /// Record a processed match for `player_id`, registering them if needed
    pub fn record(&mut self, player_id: PlayerId, new_rating: f64) {
        self.register(player_id);
        if let Some(entry) = self.entries.get_mut(&player_id) {
            entry.update_rating(new_rating);
        }
    }

    /// Matches played by every registered player
    pub fn match_counts(&self) -> BTreeMap<PlayerId, u32> {
        self.entries
            .values()
            .map(|entry| (entry.player_id, entry.matches_played))
            .collect()
    }

    /// Publish players with at least `minimum_matches` qualifying matches
    pub fn into_table(self, minimum_matches: u32) -> RatingTable {
        RatingTable {
            ratings: self
                .entries
                .into_values()
                .filter(|entry| entry.matches_played >= minimum_matches)
                .map(|entry| (entry.player_id, entry.rating))
                .collect(),
        }
    }
}

/// Final ratings keyed by player id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingTable {
    ratings: BTreeMap<PlayerId, f64>,
}

impl RatingTable {
    pub fn get(&self, player_id: PlayerId) -> Option<f64> {
        self.ratings.get(&player_id).copied()
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.ratings.contains_key(&player_id)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, f64)> + '_ {
        self.ratings.iter().map(|(id, rating)| (*id, *rating))
    }

    /// Only the entries whose id is in `players`
    pub fn restricted_to(&self, players: &BTreeSet<PlayerId>) -> RatingTable {
        RatingTable {
            ratings: self
                .ratings
                .iter()
                .filter(|(id, _)| players.contains(id))
                .map(|(id, rating)| (*id, *rating))
                .collect(),
        }
    }

    /// Entries ordered by rating, highest first; equal ratings by id
    pub fn ranked(&self) -> Vec<(PlayerId, f64)> {
        let mut ranked: Vec<(PlayerId, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    pub fn into_inner(self) -> BTreeMap<PlayerId, f64> {
        self.ratings
    }
}

impl FromIterator<(PlayerId, f64)> for RatingTable {
    fn from_iter<I: IntoIterator<Item = (PlayerId, f64)>>(iter: I) -> Self {
        Self {
            ratings: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_entry_update() {
        let mut entry = RatingEntry::new(1, 1000.0);
        assert_eq!(entry.matches_played, 0);

        entry.update_rating(1016.0);
        assert_eq!(entry.rating, 1016.0);
        assert_eq!(entry.matches_played, 1);
    }

    #[test]
    fn test_ledger_defaults_and_registration() {
        let mut ledger = RatingLedger::new(1000.0);
        assert_eq!(ledger.rating(7), 1000.0);
        assert!(!ledger.contains(7));

        ledger.register(7);
        ledger.record(7, 1010.0);
        ledger.register(7);
        assert_eq!(ledger.rating(7), 1010.0);
        assert_eq!(ledger.get(7).unwrap().matches_played, 1);

        ledger.record(8, 990.0);
        assert!(ledger.contains(8));
        assert_eq!(ledger.match_counts(), BTreeMap::from([(7, 1), (8, 1)]));
    }

    #[test]
    fn test_into_table_prunes_low_counts() {
        let mut ledger = RatingLedger::new(1000.0);
        ledger.register(1);
        ledger.record(2, 1020.0);
        ledger.record(2, 1030.0);
        ledger.record(3, 980.0);

        let table = ledger.clone().into_table(2);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(2), Some(1030.0));

        let table = ledger.into_table(1);
        assert_eq!(table.len(), 2);
        assert!(!table.contains(1));
    }

    #[test]
    fn test_table_ranking_and_restriction() {
        let table: RatingTable = vec![(1, 1000.0), (2, 1040.0), (3, 1040.0), (4, 990.0)]
            .into_iter()
            .collect();

        assert_eq!(
            table.ranked(),
            vec![(2, 1040.0), (3, 1040.0), (1, 1000.0), (4, 990.0)]
        );

        let singles = table.restricted_to(&BTreeSet::from([1, 4]));
        assert_eq!(singles.len(), 2);
        assert_eq!(singles.get(2), None);
    }

    #[test]
    fn test_table_serializes_as_map() {
        let table: RatingTable = vec![(1, 1024.0)].into_iter().collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"1":1024.0}"#);
    }
}
