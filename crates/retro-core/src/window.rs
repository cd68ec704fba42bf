// SPDX-License-Identifier: Apache-2.0

//! Reporting time windows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An inclusive time window: `start <= t <= end` counts as inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First instant inside the window.
    pub start: DateTime<Utc>,
    /// Last instant inside the window.
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window spanning `start..=end`.
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window of length `span` ending at `end`.
    #[must_use]
    pub fn ending_at(end: DateTime<Utc>, span: chrono::Duration) -> Self {
        Self {
            start: end - span,
            end,
        }
    }

    /// Whether `t` falls inside the window, inclusive on both ends.
    #[must_use]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }

    /// Window start formatted as `YYYY-MM-DD`.
    #[must_use]
    pub fn start_date(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// Window end formatted as `YYYY-MM-DD`.
    #[must_use]
    pub fn end_date(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// Adjective describing a window length, for the report header.
///
/// Spans shorter than an hour yield an empty string and the caller picks a
/// fallback.
#[must_use]
pub fn duration_as_adj(span: chrono::Duration) -> &'static str {
    if span >= chrono::Duration::days(365) {
        "yearly"
    } else if span >= chrono::Duration::days(30) {
        "monthly"
    } else if span >= chrono::Duration::days(14) {
        "biweekly"
    } else if span >= chrono::Duration::days(7) {
        "weekly"
    } else if span >= chrono::Duration::days(1) {
        "daily"
    } else if span >= chrono::Duration::hours(1) {
        "hourly"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().expect("valid RFC3339 instant")
    }

    fn window() -> TimeWindow {
        TimeWindow::new(
            instant("2026-08-11T00:00:00Z"),
            instant("2026-08-25T00:00:00Z"),
        )
    }

    #[test]
    fn both_boundary_instants_are_inside() {
        let window = window();
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
    }

    #[test]
    fn instants_outside_are_rejected() {
        let window = window();
        assert!(!window.contains(instant("2026-08-10T23:59:59Z")));
        assert!(!window.contains(instant("2026-08-25T00:00:01Z")));
        assert!(window.contains(instant("2026-08-18T12:00:00Z")));
    }

    #[test]
    fn ending_at_subtracts_the_span() {
        let end = instant("2026-08-25T00:00:00Z");
        let window = TimeWindow::ending_at(end, chrono::Duration::days(14));
        assert_eq!(window.start, instant("2026-08-11T00:00:00Z"));
        assert_eq!(window.end, end);
    }

    #[test]
    fn dates_format_as_ymd() {
        assert_eq!(window().start_date(), "2026-08-11");
        assert_eq!(window().end_date(), "2026-08-25");
    }

    #[test]
    fn adjectives_match_the_span() {
        assert_eq!(duration_as_adj(chrono::Duration::days(400)), "yearly");
        assert_eq!(duration_as_adj(chrono::Duration::days(365)), "yearly");
        assert_eq!(duration_as_adj(chrono::Duration::days(30)), "monthly");
        assert_eq!(duration_as_adj(chrono::Duration::days(14)), "biweekly");
        assert_eq!(duration_as_adj(chrono::Duration::days(7)), "weekly");
        assert_eq!(duration_as_adj(chrono::Duration::days(2)), "daily");
        assert_eq!(duration_as_adj(chrono::Duration::hours(3)), "hourly");
        assert_eq!(duration_as_adj(chrono::Duration::minutes(5)), "");
    }
}
