//! Courtside - match statistics and Elo ratings for a racket league
//!
//! This crate turns a snapshot of users and head-to-head matches into
//! per-player and head-to-head statistics and an Elo-style rating table,
//! with exclusion, season and minimum-match filters.

pub mod config;
pub mod error;
pub mod filter;
pub mod rating;
pub mod score;
pub mod source;
pub mod stats;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{LedgerError, Result};
pub use types::*;

// Re-export key components
pub use rating::{Leaderboard, RatingEngine, RatingReport, RatingTable};
pub use stats::{PlayerStats, StatsAggregator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
