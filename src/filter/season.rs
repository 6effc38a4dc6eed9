//! Season windows over match timestamps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open time range `[start, end)`; a missing bound is unbounded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonWindow {
    pub label: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub enabled: bool,
}

impl SeasonWindow {
    pub fn new(
        label: impl Into<String>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        enabled: bool,
    ) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            enabled,
        }
    }

    /// Whether `at` falls inside the window, regardless of `enabled`
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at < end)
    }
}

/// Ordered set of season windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonWindows {
    windows: Vec<SeasonWindow>,
}

impl SeasonWindows {
    /// Windows sorted by start; an unbounded start sorts first
    pub fn new(mut windows: Vec<SeasonWindow>) -> Self {
        windows.sort_by_key(|window| window.start);
        Self { windows }
    }

    /// A single window covering all of history
    pub fn all_time(enabled: bool) -> Self {
        Self::new(vec![SeasonWindow::new("all-time", None, None, enabled)])
    }

    /// Season 1 before `boundary`, season 2 from `boundary` on
    pub fn split_at(boundary: DateTime<Utc>, season1_enabled: bool, season2_enabled: bool) -> Self {
        Self::new(vec![
            SeasonWindow::new("season-1", None, Some(boundary), season1_enabled),
            SeasonWindow::new("season-2", Some(boundary), None, season2_enabled),
        ])
    }

    pub fn windows(&self) -> &[SeasonWindow] {
        &self.windows
    }

    pub fn any_enabled(&self) -> bool {
        self.windows.iter().any(|window| window.enabled)
    }

    /// Whether `at` lies in at least one enabled window
    pub fn admits(&self, at: DateTime<Utc>) -> bool {
        self.windows
            .iter()
            .any(|window| window.enabled && window.contains(at))
    }
}

impl Default for SeasonWindows {
    fn default() -> Self {
        Self::all_time(true)
    }
}
