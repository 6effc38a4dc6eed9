//! Shared fixtures for integration and property tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use courtside::source::UserRecord;
use courtside::types::{Match, MatchId, PlayerId, User};

/// Fixed reference instant so tests are reproducible
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap()
}

pub fn day(n: i64) -> DateTime<Utc> {
    epoch() + Duration::days(n)
}

pub fn user(id: PlayerId, username: &str) -> User {
    User::new(id, username, "/")
}

pub fn record(id: PlayerId, username: &str) -> UserRecord {
    UserRecord {
        id,
        username: username.to_string(),
    }
}

pub fn match_on(
    id: MatchId,
    player1_id: PlayerId,
    player2_id: PlayerId,
    score: &[&str],
    on_day: i64,
) -> Match {
    Match {
        id,
        location: "Riverside Courts".to_string(),
        player1_id,
        player2_id,
        score: score.iter().map(|s| s.to_string()).collect(),
        created_at: day(on_day),
    }
}

/// Four singles players and two doubles pairings
pub fn league_users() -> Vec<User> {
    vec![
        user(1, "Ann"),
        user(2, "Bob"),
        user(3, "Cy"),
        user(4, "Dee"),
        user(5, "Ann/Bob"),
        user(6, "Cy/Dee"),
    ]
}

/// A short season, stored out of chronological order
pub fn league_matches() -> Vec<Match> {
    vec![
        match_on(4, 2, 3, &["6-4", "6-4"], 12),
        match_on(1, 1, 2, &["6-1", "6-2"], 1),
        match_on(2, 3, 4, &["4-6", "6-3", "7-5"], 3),
        match_on(6, 5, 6, &["6-3", "3-6", "6-4"], 20),
        match_on(3, 1, 3, &["6-0", "6-1"], 7),
        match_on(5, 4, 1, &["7-6", "6-7", "6-4"], 15),
        match_on(7, 6, 5, &["6-2", "6-2"], 40),
        match_on(8, 2, 4, &["6-4", "4-6"], 45),
    ]
}
