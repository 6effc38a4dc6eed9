//! Utility functions for the statistics and rating engine

/// Round a rating for display; the engine itself never rounds
pub fn display_rating(rating: f64) -> i64 {
    rating.round() as i64
}

/// Calculate the absolute difference between two ratings
pub fn rating_difference(rating1: f64, rating2: f64) -> f64 {
    (rating1 - rating2).abs()
}
