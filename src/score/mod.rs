//! Set score parsing and per-match classification
//!
//! A match score is an ordered list of set tokens such as `["6-2", "4-6", "7-5"]`.
//! The parser turns one token into a pair of game counts; the classifier folds
//! a whole score into set and game tallies from one participant's perspective.

pub mod classifier;
pub mod parser;

// Re-export commonly used types
pub use classifier::{classify, MatchOutcome, MatchResult};
pub use parser::{parse_set_score, SetScore, SET_SEPARATOR};
