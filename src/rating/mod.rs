//! Elo rating computation over the match history
//!
//! This module provides the rating calculator seam, the Elo implementation
//! backed by the skillratings crate, the sequential fold that turns a match
//! history into a rating table, and the leaderboard built from its output.

pub mod calculator;
pub mod elo;
pub mod engine;
pub mod leaderboard;
pub mod table;

// Re-export commonly used types
pub use calculator::{MatchRatingResult, RatingCalculator};
pub use elo::{EloCalculator, ExtendedEloConfig};
pub use engine::{RatingEngine, RatingReport};
pub use leaderboard::{Leaderboard, LeaderboardRow, Medal};
pub use table::{RatingEntry, RatingLedger, RatingTable};
