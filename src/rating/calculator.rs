//! Rating calculator trait
//!
//! The engine owns ordering, filtering and bookkeeping; a calculator only
//! knows how two ratings move after one classified match.

use crate::score::MatchOutcome;
use serde::{Deserialize, Serialize};

/// Result of rating a single match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchRatingResult {
    /// Expected score of side A before the match (0.0 to 1.0)
    pub expected_a: f64,
    /// Expected score of side B before the match (0.0 to 1.0)
    pub expected_b: f64,
    pub new_rating_a: f64,
    pub new_rating_b: f64,
}

impl MatchRatingResult {
    pub fn delta_a(&self, old_rating_a: f64) -> f64 {
        self.new_rating_a - old_rating_a
    }

    pub fn delta_b(&self, old_rating_b: f64) -> f64 {
        self.new_rating_b - old_rating_b
    }
}

/// Trait for calculating rating changes after one match
#[cfg_attr(test, mockall::automock)]
pub trait RatingCalculator: Send + Sync {
    /// Rating every player starts from
    fn initial_rating(&self) -> f64;

    /// Rate one match between A and B
    ///
    /// # Arguments
    /// * `rating_a` - Current rating of side A
    /// * `rating_b` - Current rating of side B
    /// * `outcome` - The match classified from A's perspective
    fn rate_match(&self, rating_a: f64, rating_b: f64, outcome: &MatchOutcome)
        -> MatchRatingResult;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}
