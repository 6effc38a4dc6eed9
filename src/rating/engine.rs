//! The rating fold
//!
//! Ratings are path dependent, so the engine fixes its own processing order
//! (creation time, then match id) instead of trusting delivery order. Each
//! call builds a fresh `RatingLedger`; nothing carries over between calls.

use crate::config::RatingConfig;
use crate::error::{LedgerError, Result};
use crate::filter::{players_of_type, MatchFilter};
use crate::rating::calculator::RatingCalculator;
use crate::rating::elo::{EloCalculator, ExtendedEloConfig};
use crate::rating::table::{RatingLedger, RatingTable};
use crate::score::classify;
use crate::types::{Match, MatchId, PlayType, PlayerId, User};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Output of one rating computation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingReport {
    /// Ratings of players with enough qualifying matches
    pub ratings: RatingTable,
    /// Qualifying matches per player, including players pruned from `ratings`
    pub match_counts: BTreeMap<PlayerId, u32>,
    pub processed_matches: usize,
    pub skipped_matches: usize,
    /// Player ids missing from the user list, with the first match naming them
    pub unknown_players: BTreeMap<PlayerId, MatchId>,
}

impl RatingReport {
    /// Ratings of the users of one play type
    pub fn for_play_type(&self, users: &[User], play_type: PlayType) -> RatingTable {
        self.ratings.restricted_to(&players_of_type(users, play_type))
    }

    /// Degraded conditions the caller should surface
    pub fn warnings(&self) -> Vec<LedgerError> {
        self.unknown_players
            .iter()
            .map(|(player_id, match_id)| LedgerError::UnknownPlayerReference {
                match_id: *match_id,
                player_id: *player_id,
            })
            .collect()
    }
}

/// Folds a match history into ratings
#[derive(Clone)]
pub struct RatingEngine {
    calculator: Arc<dyn RatingCalculator>,
    filter: MatchFilter,
    minimum_qualifying_matches: u32,
}

impl std::fmt::Debug for RatingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingEngine")
            .field("calculator", &self.calculator.config())
            .field("filter", &self.filter)
            .field("minimum_qualifying_matches", &self.minimum_qualifying_matches)
            .finish()
    }
}

impl RatingEngine {
    /// Default minimum number of qualifying matches to appear in the output
    pub const DEFAULT_MINIMUM_QUALIFYING_MATCHES: u32 = 2;

    pub fn new(
        calculator: Arc<dyn RatingCalculator>,
        filter: MatchFilter,
        minimum_qualifying_matches: u32,
    ) -> Self {
        Self {
            calculator,
            filter,
            minimum_qualifying_matches,
        }
    }

    /// Build an Elo engine from configuration
    pub fn from_config(config: &RatingConfig) -> Result<Self> {
        config.validate()?;
        let calculator = EloCalculator::new(ExtendedEloConfig::from(config))?;

        Ok(Self::new(
            Arc::new(calculator),
            config.match_filter(),
            config.minimum_qualifying_matches,
        ))
    }

    pub fn filter(&self) -> &MatchFilter {
        &self.filter
    }

    pub fn minimum_qualifying_matches(&self) -> u32 {
        self.minimum_qualifying_matches
    }

    /// Run the fold over `matches`
    ///
    /// Fails on the first malformed score or self match among qualifying
    /// matches; matches filtered out are never parsed.
    pub fn compute(&self, users: &[User], matches: &[Match]) -> Result<RatingReport> {
        let mut ledger = RatingLedger::new(self.calculator.initial_rating());
        for user in users.iter().filter(|u| !self.filter.is_excluded(u.id)) {
            ledger.register(user.id);
        }
        let known: BTreeSet<PlayerId> = users.iter().map(|u| u.id).collect();

        if let Some(seasons) = self.filter.seasons() {
            if !seasons.any_enabled() {
                warn!("No season window is enabled, no match can qualify");
            }
        }

        let mut qualifying: Vec<&Match> =
            matches.iter().filter(|m| self.filter.admits(m)).collect();
        qualifying.sort_by_key(|m| (m.created_at, m.id));
        let skipped_matches = matches.len() - qualifying.len();

        let mut unknown_players = BTreeMap::new();

        for m in &qualifying {
            if m.player1_id == m.player2_id {
                return Err(LedgerError::InvalidMatch {
                    match_id: m.id,
                    reason: format!("player {} is on both sides", m.player1_id),
                }
                .into());
            }

            for player_id in m.participants() {
                if !known.contains(&player_id) && !unknown_players.contains_key(&player_id) {
                    warn!("Match {} references unknown player {}", m.id, player_id);
                    unknown_players.insert(player_id, m.id);
                }
            }

            let outcome = classify(m, m.player1_id)?;
            let rating_a = ledger.rating(m.player1_id);
            let rating_b = ledger.rating(m.player2_id);
            let result = self.calculator.rate_match(rating_a, rating_b, &outcome);

            debug!(
                "Match {}: {} {:.2} -> {:.2}, {} {:.2} -> {:.2}",
                m.id,
                m.player1_id,
                rating_a,
                result.new_rating_a,
                m.player2_id,
                rating_b,
                result.new_rating_b
            );

            ledger.record(m.player1_id, result.new_rating_a);
            ledger.record(m.player2_id, result.new_rating_b);
        }

        let match_counts = ledger.match_counts();
        let ratings = ledger.into_table(self.minimum_qualifying_matches);

        info!(
            "Rated {} matches ({} skipped), {} players ranked",
            qualifying.len(),
            skipped_matches,
            ratings.len()
        );

        Ok(RatingReport {
            ratings,
            match_counts,
            processed_matches: qualifying.len(),
            skipped_matches,
            unknown_players,
        })
    }
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self::new(
            Arc::new(EloCalculator::default()),
            MatchFilter::new(),
            Self::DEFAULT_MINIMUM_QUALIFYING_MATCHES,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SeasonWindows;
    use crate::rating::calculator::{MatchRatingResult, MockRatingCalculator};
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 19, 0, 0).unwrap()
    }

    fn m(id: MatchId, p1: PlayerId, p2: PlayerId, score: &[&str], day: u32) -> Match {
        Match {
            id,
            location: "Club".to_string(),
            player1_id: p1,
            player2_id: p2,
            score: score.iter().map(|s| s.to_string()).collect(),
            created_at: ts(day),
        }
    }

    fn users() -> Vec<User> {
        vec![
            User::new(1, "A", "/"),
            User::new(2, "B", "/"),
            User::new(3, "C", "/"),
            User::new(4, "A/B", "/"),
            User::new(5, "C/D", "/"),
        ]
    }

    fn engine(minimum: u32) -> RatingEngine {
        RatingEngine::new(
            Arc::new(EloCalculator::default()),
            MatchFilter::new(),
            minimum,
        )
    }

    #[test]
    fn test_single_dominant_match() {
        let report = engine(1)
            .compute(&users()[..2], &[m(1, 1, 2, &["6-1", "6-2"], 1)])
            .unwrap();

        let a = report.ratings.get(1).unwrap();
        let b = report.ratings.get(2).unwrap();
        assert!(a > 1000.0 && 1000.0 > b);
        assert!((a - 1024.0).abs() < 1e-9);
        assert!((b - 981.0).abs() < 1e-9);
        assert_eq!(report.processed_matches, 1);
    }

    #[test]
    fn test_minimum_match_pruning() {
        let users = users();
        let matches = [m(1, 1, 2, &["6-4"], 1), m(2, 1, 3, &["6-4"], 2)];

        let report = engine(2).compute(&users, &matches).unwrap();
        assert!(report.ratings.contains(1));
        assert!(!report.ratings.contains(2));
        assert!(!report.ratings.contains(3));
        assert_eq!(report.match_counts[&2], 1);
        // never played, still tracked at zero
        assert_eq!(report.match_counts[&4], 0);

        let report = engine(1).compute(&users, &matches).unwrap();
        assert!(report.ratings.contains(2));
        assert!(report.ratings.contains(3));
        assert!(!report.ratings.contains(4));
    }

    #[test]
    fn test_processing_order_is_chronological() {
        let users = users();
        let chronological = [
            m(1, 1, 2, &["6-0", "6-0"], 1),
            m(2, 2, 3, &["6-3", "6-4"], 2),
            m(3, 3, 1, &["7-5", "6-4"], 3),
        ];
        let mut shuffled = chronological.clone();
        shuffled.reverse();

        let a = engine(1).compute(&users, &chronological).unwrap();
        let b = engine(1).compute(&users, &shuffled).unwrap();
        assert_eq!(a.ratings, b.ratings);
    }

    #[test]
    fn test_same_timestamp_orders_by_id() {
        let users = users();
        let mut first = m(1, 1, 2, &["6-0"], 1);
        let mut second = m(2, 2, 1, &["6-0"], 1);
        first.created_at = ts(5);
        second.created_at = ts(5);

        let forward = engine(1)
            .compute(&users, &[first.clone(), second.clone()])
            .unwrap();
        let backward = engine(1).compute(&users, &[second, first]).unwrap();
        assert_eq!(forward.ratings, backward.ratings);
    }

    #[test]
    fn test_exclusion_removes_all_influence() {
        let users = users();
        let matches = [
            m(1, 1, 2, &["6-1", "6-1"], 1),
            m(2, 3, 1, &["6-1", "6-1"], 2),
            m(3, 2, 1, &["6-4", "6-4"], 3),
        ];

        let excluded = RatingEngine::new(
            Arc::new(EloCalculator::default()),
            MatchFilter::new().with_excluded([3]),
            1,
        )
        .compute(&users, &matches)
        .unwrap();
        let without = engine(1)
            .compute(&users, &[matches[0].clone(), matches[2].clone()])
            .unwrap();

        assert_eq!(excluded.ratings, without.ratings);
        assert!(!excluded.match_counts.contains_key(&3));
        assert_eq!(excluded.skipped_matches, 1);
    }

    #[test]
    fn test_season_filter() {
        let users = users();
        let boundary = ts(10);
        let matches = [m(1, 1, 2, &["6-1"], 1), m(2, 1, 2, &["1-6"], 20)];

        let season2_only = RatingEngine::new(
            Arc::new(EloCalculator::default()),
            MatchFilter::new().with_seasons(SeasonWindows::split_at(boundary, false, true)),
            1,
        )
        .compute(&users, &matches)
        .unwrap();
        assert_eq!(season2_only.processed_matches, 1);
        assert!(season2_only.ratings.get(2).unwrap() > 1000.0);

        let none_enabled = RatingEngine::new(
            Arc::new(EloCalculator::default()),
            MatchFilter::new().with_seasons(SeasonWindows::split_at(boundary, false, false)),
            1,
        )
        .compute(&users, &matches)
        .unwrap();
        assert!(none_enabled.ratings.is_empty());
        assert_eq!(none_enabled.skipped_matches, 2);
    }

    #[test]
    fn test_draw_counts_but_awards_no_win() {
        let report = engine(1)
            .compute(&users(), &[m(1, 1, 2, &["6-4", "4-6"], 1)])
            .unwrap();

        assert_eq!(report.match_counts[&1], 1);
        assert_eq!(report.match_counts[&2], 1);
        assert!((report.ratings.get(1).unwrap() - 984.0).abs() < 1e-9);
        assert!((report.ratings.get(2).unwrap() - 984.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_score_aborts() {
        let err = engine(1)
            .compute(&users(), &[m(1, 1, 2, &["6-1"], 1), m(2, 2, 3, &["6_1"], 2)])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::MalformedScore { .. })
        ));
    }

    #[test]
    fn test_malformed_score_in_skipped_match_is_ignored() {
        let report = RatingEngine::new(
            Arc::new(EloCalculator::default()),
            MatchFilter::new().with_excluded([3]),
            1,
        )
        .compute(&users(), &[m(1, 1, 2, &["6-1"], 1), m(2, 2, 3, &["bad"], 2)])
        .unwrap();
        assert_eq!(report.processed_matches, 1);
    }

    #[test]
    fn test_self_match_is_rejected() {
        let err = engine(1)
            .compute(&users(), &[m(1, 1, 2, &["6-1"], 1), m(2, 3, 3, &["6-1"], 2)])
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<LedgerError>(),
            Some(&LedgerError::InvalidMatch {
                match_id: 2,
                reason: "player 3 is on both sides".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_player_is_flagged_not_fatal() {
        let report = engine(1)
            .compute(&users(), &[m(7, 1, 42, &["6-1", "6-0"], 1)])
            .unwrap();

        assert!(report.ratings.contains(42));
        assert_eq!(report.unknown_players, BTreeMap::from([(42, 7)]));
        assert_eq!(
            report.warnings(),
            vec![LedgerError::UnknownPlayerReference {
                match_id: 7,
                player_id: 42
            }]
        );
    }

    #[test]
    fn test_grouping_by_play_type() {
        let users = users();
        let matches = [m(1, 1, 2, &["6-1"], 1), m(2, 4, 5, &["6-1"], 2)];
        let report = engine(1).compute(&users, &matches).unwrap();

        let singles = report.for_play_type(&users, PlayType::Singles);
        let doubles = report.for_play_type(&users, PlayType::Doubles);
        let ids = |table: &RatingTable| table.iter().map(|(id, _)| id).collect::<Vec<_>>();
        assert_eq!(ids(&singles), vec![1, 2]);
        assert_eq!(ids(&doubles), vec![4, 5]);
    }

    #[test]
    fn test_empty_history() {
        let report = RatingEngine::default().compute(&users(), &[]).unwrap();
        assert!(report.ratings.is_empty());
        assert_eq!(report.processed_matches, 0);
    }

    #[test]
    fn test_calculator_sees_player1_perspective() {
        let mut calculator = MockRatingCalculator::new();
        calculator.expect_initial_rating().return_const(1500.0);
        calculator
            .expect_rate_match()
            .withf(|a, b, outcome| {
                *a == 1500.0
                    && *b == 1500.0
                    && outcome.is_perspective_player1
                    && outcome.sets_lost == 2
            })
            .times(1)
            .returning(|a, b, _| MatchRatingResult {
                expected_a: 0.5,
                expected_b: 0.5,
                new_rating_a: a - 10.0,
                new_rating_b: b + 10.0,
            });

        let engine = RatingEngine::new(Arc::new(calculator), MatchFilter::new(), 1);
        let report = engine
            .compute(&users(), &[m(1, 2, 1, &["3-6", "2-6"], 1)])
            .unwrap();

        assert_eq!(report.ratings.get(2), Some(1490.0));
        assert_eq!(report.ratings.get(1), Some(1510.0));
    }
}
