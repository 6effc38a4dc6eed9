//! Rating engine configuration

use crate::error::{LedgerError, Result};
use crate::filter::{MatchFilter, SeasonWindows};
use crate::types::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every tunable of the rating fold, with the league's defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub initial_rating: f64,
    pub k_factor: f64,
    /// Game margin that must be exceeded for the dominant-win bonus
    pub dominant_margin: u32,
    pub dominant_win_bonus: f64,
    pub win_streak_bonus: f64,
    /// Players with fewer qualifying matches are left out of the output
    pub minimum_qualifying_matches: u32,
    pub excluded_player_ids: Vec<PlayerId>,
    /// Split point between season 1 and season 2; `None` means one all-time season
    pub season_boundary: Option<DateTime<Utc>>,
    pub season1_enabled: bool,
    pub season2_enabled: bool,
    /// Marker in a username identifying a doubles pairing
    pub doubles_separator: String,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_rating: 1000.0,
            k_factor: 32.0,
            dominant_margin: 5,
            dominant_win_bonus: 3.0,
            win_streak_bonus: 5.0,
            minimum_qualifying_matches: 2,
            excluded_player_ids: Vec::new(),
            season_boundary: None,
            season1_enabled: true,
            season2_enabled: true,
            doubles_separator: "/".to_string(),
        }
    }
}

impl RatingConfig {
    /// Exclude one more player from rating computation
    pub fn exclude_player(&mut self, player_id: PlayerId) {
        if !self.excluded_player_ids.contains(&player_id) {
            self.excluded_player_ids.push(player_id);
        }
    }

    /// The season windows selected by the boundary and the two toggles
    pub fn season_windows(&self) -> SeasonWindows {
        match self.season_boundary {
            Some(boundary) => {
                SeasonWindows::split_at(boundary, self.season1_enabled, self.season2_enabled)
            }
            None => SeasonWindows::all_time(self.season1_enabled || self.season2_enabled),
        }
    }

    /// Exclusion list plus season windows, as consumed by the rating engine
    pub fn match_filter(&self) -> MatchFilter {
        MatchFilter::new()
            .with_excluded(self.excluded_player_ids.iter().copied())
            .with_seasons(self.season_windows())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.k_factor.is_nan() || self.k_factor.is_infinite() || self.k_factor <= 0.0 {
            return Err(LedgerError::ConfigurationError {
                message: format!("K-factor must be positive, got {}", self.k_factor),
            }
            .into());
        }

        if !self.initial_rating.is_finite() {
            return Err(LedgerError::ConfigurationError {
                message: "Initial rating must be finite".to_string(),
            }
            .into());
        }

        for (name, bonus) in [
            ("dominant_win_bonus", self.dominant_win_bonus),
            ("win_streak_bonus", self.win_streak_bonus),
        ] {
            if bonus.is_nan() || bonus < 0.0 {
                return Err(LedgerError::ConfigurationError {
                    message: format!("{} must be non-negative, got {}", name, bonus),
                }
                .into());
            }
        }

        if self.doubles_separator.is_empty() {
            return Err(LedgerError::ConfigurationError {
                message: "Doubles separator cannot be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let config = RatingConfig::default();
        assert_eq!(config.initial_rating, 1000.0);
        assert_eq!(config.k_factor, 32.0);
        assert_eq!(config.minimum_qualifying_matches, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = RatingConfig::default();
        config.k_factor = -4.0;
        assert!(config.validate().is_err());

        let mut config = RatingConfig::default();
        config.dominant_win_bonus = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = RatingConfig::default();
        config.doubles_separator.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_season_windows_from_toggles() {
        let mut config = RatingConfig::default();
        let early = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        assert!(config.season_windows().admits(early));

        config.season_boundary = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        config.season1_enabled = false;
        let windows = config.season_windows();
        assert!(!windows.admits(early));
        assert!(windows.admits(late));

        config.season_boundary = None;
        config.season2_enabled = false;
        assert!(!config.season_windows().any_enabled());
    }

    #[test]
    fn test_exclude_player_is_idempotent() {
        let mut config = RatingConfig::default();
        config.exclude_player(4);
        config.exclude_player(4);
        assert_eq!(config.excluded_player_ids, vec![4]);
        assert!(config.match_filter().is_excluded(4));
    }

    #[test]
    fn test_partial_toml() {
        let config: RatingConfig = toml::from_str(
            r#"
            minimum_qualifying_matches = 1
            excluded_player_ids = [4]
            season_boundary = "2024-06-01T00:00:00Z"
            "#,
        )
        .unwrap();

        assert_eq!(config.minimum_qualifying_matches, 1);
        assert_eq!(config.excluded_player_ids, vec![4]);
        assert!(config.season_boundary.is_some());
        assert_eq!(config.k_factor, 32.0);
    }
}
