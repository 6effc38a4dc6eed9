//! Parser for single set-result tokens

use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Separator between the two game counts of a set token
pub const SET_SEPARATOR: char = '-';

/// Games won by each side in one set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    /// Games won by player 1
    pub games_a: u32,
    /// Games won by player 2
    pub games_b: u32,
}

impl SetScore {
    pub fn new(games_a: u32, games_b: u32) -> Self {
        Self { games_a, games_b }
    }

    /// Which side took the set; `Equal` when games are tied
    pub fn winner(&self) -> Ordering {
        self.games_a.cmp(&self.games_b)
    }

    /// The same set seen from player 2's side
    pub fn flipped(&self) -> Self {
        Self {
            games_a: self.games_b,
            games_b: self.games_a,
        }
    }
}

impl std::fmt::Display for SetScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.games_a, SET_SEPARATOR, self.games_b)
    }
}

impl std::str::FromStr for SetScore {
    type Err = anyhow::Error;

    fn from_str(token: &str) -> Result<Self> {
        parse_set_score(token)
    }
}

/// Parse a token of the form `"<games>-<games>"`
///
/// Both sides must be plain ASCII digit runs that fit in a `u32`; signs,
/// whitespace and additional separators are rejected.
pub fn parse_set_score(token: &str) -> Result<SetScore> {
    let mut parts = token.split(SET_SEPARATOR);
    let (left, right) = match (parts.next(), parts.next(), parts.next()) {
        (Some(left), Some(right), None) => (left, right),
        (_, None, _) => {
            return Err(LedgerError::malformed_score(token, "missing separator").into());
        }
        _ => {
            return Err(LedgerError::malformed_score(token, "more than one separator").into());
        }
    };

    Ok(SetScore {
        games_a: parse_games(token, left)?,
        games_b: parse_games(token, right)?,
    })
}

fn parse_games(token: &str, side: &str) -> Result<u32> {
    if side.is_empty() {
        return Err(LedgerError::malformed_score(token, "empty game count").into());
    }
    if !side.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LedgerError::malformed_score(
            token,
            format!("'{}' is not a non-negative integer", side),
        )
        .into());
    }

    side.parse::<u32>().map_err(|_| {
        anyhow::Error::from(LedgerError::malformed_score(
            token,
            format!("game count '{}' is out of range", side),
        ))
    })
}
