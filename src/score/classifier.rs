//! Match classification from one participant's perspective

use crate::error::{LedgerError, Result};
use crate::score::parser::parse_set_score;
use crate::types::{Match, PlayerId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Result of a match for the perspective player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Loss,
    /// Both sides won the same number of sets
    Draw,
}

/// Set and game tallies of one match, seen from one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub is_perspective_player1: bool,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub result: MatchResult,
}

impl MatchOutcome {
    pub fn perspective_won(&self) -> bool {
        self.result == MatchResult::Win
    }

    pub fn is_draw(&self) -> bool {
        self.result == MatchResult::Draw
    }

    /// Actual Elo score for each side: `(perspective, opponent)`, 1.0 for the
    /// match winner and 0.0 otherwise. A draw scores 0.0 for both.
    pub fn actual_scores(&self) -> (f64, f64) {
        match self.result {
            MatchResult::Win => (1.0, 0.0),
            MatchResult::Loss => (0.0, 1.0),
            MatchResult::Draw => (0.0, 0.0),
        }
    }

    /// Absolute difference between games won and games lost
    pub fn game_margin(&self) -> u32 {
        self.games_won.abs_diff(self.games_lost)
    }
}

/// Classify `m` from the point of view of `perspective`
///
/// Sets tied on games count for neither side. Fails on the first malformed
/// set token, or when `perspective` did not play in the match.
pub fn classify(m: &Match, perspective: PlayerId) -> Result<MatchOutcome> {
    let is_player1 = if m.player1_id == perspective {
        true
    } else if m.player2_id == perspective {
        false
    } else {
        return Err(LedgerError::InvalidMatch {
            match_id: m.id,
            reason: format!("player {} did not take part", perspective),
        }
        .into());
    };

    let mut sets_won = 0u32;
    let mut sets_lost = 0u32;
    let mut games_won = 0u32;
    let mut games_lost = 0u32;

    for token in &m.score {
        let set = parse_set_score(token)?;
        let set = if is_player1 { set } else { set.flipped() };

        games_won = games_won.saturating_add(set.games_a);
        games_lost = games_lost.saturating_add(set.games_b);

        match set.winner() {
            Ordering::Greater => sets_won += 1,
            Ordering::Less => sets_lost += 1,
            Ordering::Equal => {}
        }
    }

    let result = match sets_won.cmp(&sets_lost) {
        Ordering::Greater => MatchResult::Win,
        Ordering::Less => MatchResult::Loss,
        Ordering::Equal => MatchResult::Draw,
    };

    Ok(MatchOutcome {
        is_perspective_player1: is_player1,
        sets_won,
        sets_lost,
        games_won,
        games_lost,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn match_with(score: &[&str]) -> Match {
        Match {
            id: 1,
            location: "Club".to_string(),
            player1_id: 10,
            player2_id: 20,
            score: score.iter().map(|s| s.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_straight_sets_win() {
        let m = match_with(&["6-1", "6-2"]);
        let outcome = classify(&m, 10).unwrap();

        assert!(outcome.is_perspective_player1);
        assert_eq!(outcome.sets_won, 2);
        assert_eq!(outcome.sets_lost, 0);
        assert_eq!(outcome.games_won, 12);
        assert_eq!(outcome.games_lost, 3);
        assert!(outcome.perspective_won());
        assert_eq!(outcome.game_margin(), 9);
        assert_eq!(outcome.actual_scores(), (1.0, 0.0));
    }

    #[test]
    fn test_player2_perspective_is_mirrored() {
        let m = match_with(&["6-1", "3-6", "7-5"]);
        let p1 = classify(&m, 10).unwrap();
        let p2 = classify(&m, 20).unwrap();

        assert!(!p2.is_perspective_player1);
        assert_eq!(p2.sets_won, p1.sets_lost);
        assert_eq!(p2.games_won, p1.games_lost);
        assert_eq!(p1.result, MatchResult::Win);
        assert_eq!(p2.result, MatchResult::Loss);
    }

    #[test]
    fn test_split_sets_is_a_draw() {
        let m = match_with(&["6-4", "4-6"]);
        let outcome = classify(&m, 10).unwrap();

        assert!(outcome.is_draw());
        assert_eq!(outcome.actual_scores(), (0.0, 0.0));
    }

    #[test]
    fn test_tied_set_counts_for_neither_side() {
        let m = match_with(&["6-6", "6-3"]);
        let outcome = classify(&m, 20).unwrap();

        assert_eq!(outcome.sets_won, 0);
        assert_eq!(outcome.sets_lost, 1);
        assert_eq!(outcome.result, MatchResult::Loss);
    }

    #[test]
    fn test_empty_score_is_a_draw() {
        let m = match_with(&[]);
        let outcome = classify(&m, 10).unwrap();
        assert!(outcome.is_draw());
        assert_eq!(outcome.games_won, 0);
    }

    #[test]
    fn test_malformed_token_aborts() {
        let m = match_with(&["6-1", "six-2"]);
        let err = classify(&m, 10).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::MalformedScore { .. })
        ));
    }

    #[test]
    fn test_non_participant_perspective() {
        let m = match_with(&["6-1"]);
        assert!(classify(&m, 99).is_err());
    }
}
