//! Elo rating calculator with margin and win bonuses
//!
//! Expected scores come from the skillratings logistic Elo model. On top of
//! the base K-factor update two flat adjustments apply: a dominant-win bonus
//! when the game margin is large, and a per-win bonus for the match winner.

use crate::config::RatingConfig;
use crate::error::{LedgerError, Result};
use crate::rating::calculator::{MatchRatingResult, RatingCalculator};
use crate::score::{MatchOutcome, MatchResult};
use serde::{Deserialize, Serialize};
use skillratings::elo::{expected_score, EloConfig, EloRating};

/// Extended configuration for the Elo rating system
/// This wraps the skillratings EloConfig with the league's bonus rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedEloConfig {
    /// Core Elo parameters (K-factor)
    pub elo_config: EloConfig,
    /// Initial rating for new players
    pub initial_rating: f64,
    /// Game margin that must be exceeded for the dominant-win bonus
    pub dominant_margin: u32,
    /// Points moved from loser to winner on a dominant win
    pub dominant_win_bonus: f64,
    /// Points added to the winner of every decided match
    pub win_streak_bonus: f64,
}

impl Default for ExtendedEloConfig {
    fn default() -> Self {
        Self {
            elo_config: EloConfig { k: 32.0 },
            initial_rating: 1000.0,
            dominant_margin: 5,
            dominant_win_bonus: 3.0,
            win_streak_bonus: 5.0,
        }
    }
}

impl From<&RatingConfig> for ExtendedEloConfig {
    fn from(config: &RatingConfig) -> Self {
        Self {
            elo_config: EloConfig {
                k: config.k_factor,
            },
            initial_rating: config.initial_rating,
            dominant_margin: config.dominant_margin,
            dominant_win_bonus: config.dominant_win_bonus,
            win_streak_bonus: config.win_streak_bonus,
        }
    }
}

impl ExtendedEloConfig {
    /// Plain Elo without either bonus
    pub fn without_bonuses() -> Self {
        Self {
            dominant_win_bonus: 0.0,
            win_streak_bonus: 0.0,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let k = self.elo_config.k;
        if k.is_nan() || k.is_infinite() || k <= 0.0 {
            return Err(LedgerError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if !self.initial_rating.is_finite() {
            return Err(LedgerError::ConfigurationError {
                message: "Initial rating must be finite".to_string(),
            }
            .into());
        }

        let bonuses = [self.dominant_win_bonus, self.win_streak_bonus];
        if bonuses.iter().any(|bonus| bonus.is_nan() || *bonus < 0.0) {
            return Err(LedgerError::ConfigurationError {
                message: "Bonuses must be non-negative".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Elo rating calculator implementation
#[derive(Debug, Clone)]
pub struct EloCalculator {
    config: ExtendedEloConfig,
}

impl EloCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: ExtendedEloConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Win probability of A against B under the logistic model
    pub fn expected_score(&self, rating_a: f64, rating_b: f64) -> f64 {
        let (expected_a, _) = expected_score(
            &EloRating { rating: rating_a },
            &EloRating { rating: rating_b },
        );
        expected_a
    }
}

impl Default for EloCalculator {
    fn default() -> Self {
        Self {
            config: ExtendedEloConfig::default(),
        }
    }
}

impl RatingCalculator for EloCalculator {
    fn initial_rating(&self) -> f64 {
        self.config.initial_rating
    }

    fn rate_match(
        &self,
        rating_a: f64,
        rating_b: f64,
        outcome: &MatchOutcome,
    ) -> MatchRatingResult {
        let (expected_a, expected_b) = expected_score(
            &EloRating { rating: rating_a },
            &EloRating { rating: rating_b },
        );
        let (score_a, score_b) = outcome.actual_scores();
        let k = self.config.elo_config.k;

        let mut new_rating_a = rating_a + k * (score_a - expected_a);
        let mut new_rating_b = rating_b + k * (score_b - expected_b);

        if !outcome.is_draw() && outcome.game_margin() > self.config.dominant_margin {
            let bonus = self.config.dominant_win_bonus;
            if outcome.perspective_won() {
                new_rating_a += bonus;
                new_rating_b -= bonus;
            } else {
                new_rating_a -= bonus;
                new_rating_b += bonus;
            }
        }

        match outcome.result {
            MatchResult::Win => new_rating_a += self.config.win_streak_bonus,
            MatchResult::Loss => new_rating_b += self.config.win_streak_bonus,
            MatchResult::Draw => {}
        }

        MatchRatingResult {
            expected_a,
            expected_b,
            new_rating_a,
            new_rating_b,
        }
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}
