//! Per-player and head-to-head statistics, plus the recent-match feed

pub mod aggregator;
pub mod feed;

// Re-export commonly used types
pub use aggregator::{PlayerStats, StatsAggregator};
pub use feed::{recent_matches, MatchSummary};
