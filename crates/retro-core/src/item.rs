// SPDX-License-Identifier: Apache-2.0

//! The tracked work item and its derived presentation values.
//!
//! An [`Item`] is one issue or pull request authored by the report subject.
//! [`Item::status`] derives the label a report row shows and
//! [`format_duration`] renders how long the item has been in flight.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue or pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A plain issue.
    Issue,
    /// A pull request.
    PullRequest,
}

/// Open or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    /// Still open.
    Open,
    /// Closed, by completion, rejection, or merge.
    Closed,
}

/// Why an item is in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateReason {
    /// Closed as completed.
    Completed,
    /// Closed as not planned.
    NotPlanned,
    /// Reopened after being closed.
    Reopened,
}

impl StateReason {
    /// Parse the API's `state_reason` string; unknown reasons map to `None`.
    #[must_use]
    pub fn parse(reason: &str) -> Option<Self> {
        match reason {
            "completed" => Some(Self::Completed),
            "not_planned" => Some(Self::NotPlanned),
            "reopened" => Some(Self::Reopened),
            _ => None,
        }
    }
}

/// Reaction totals on an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    /// Hearts.
    pub heart: u32,
    /// Eyes.
    pub eyes: u32,
    /// Thumbs up.
    pub plus_one: u32,
    /// Thumbs down.
    pub minus_one: u32,
    /// Rockets.
    pub rocket: u32,
    /// Party poppers.
    pub hooray: u32,
    /// Smiles.
    pub laugh: u32,
    /// Confused faces.
    pub confused: u32,
}

/// A work item authored by the report subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Canonical identity, used as the working-set key. Currently the web
    /// URL, which is unique across all of GitHub.
    pub id: String,
    /// Web URL, used to derive the owning repository.
    pub html_url: String,
    /// Number within the owning repository.
    pub number: u64,
    /// Title shown in the report row.
    pub title: String,
    /// Login of the author.
    pub author: String,
    /// Issue or pull request.
    pub kind: ItemKind,
    /// Open or closed.
    pub state: ItemState,
    /// Close or reopen reason, when the API reports one.
    pub state_reason: Option<StateReason>,
    /// Whether a closed pull request was merged. Filled in by the
    /// merge-status lookup; stays `false` when that lookup fails.
    #[serde(default)]
    pub merged: bool,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Close instant, when closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Reaction totals.
    #[serde(default)]
    pub reactions: ReactionCounts,
}

/// Presentation status of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Closed pull request confirmed merged.
    Merged,
    /// Closed pull request that was not merged.
    Closed,
    /// Issue closed as completed.
    Done,
    /// Issue closed as not planned.
    Dropped,
    /// Still in flight, reopened included.
    Active,
}

impl Status {
    /// Lowercase label for report rows.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Merged => "merged",
            Self::Closed => "closed",
            Self::Done => "done",
            Self::Dropped => "dropped",
            Self::Active => "active",
        }
    }
}

impl Item {
    /// Derive the presentation status.
    ///
    /// Closed pull requests are `merged` or `closed` depending on the merge
    /// lookup; closed issues map their state reason to `done` or `dropped`
    /// and otherwise have no status; everything still open, reopened
    /// included, is `active`.
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        if self.state == ItemState::Closed {
            if self.kind == ItemKind::PullRequest {
                return Some(if self.merged {
                    Status::Merged
                } else {
                    Status::Closed
                });
            }
            return match self.state_reason {
                Some(StateReason::NotPlanned) => Some(Status::Dropped),
                Some(StateReason::Completed) => Some(Status::Done),
                _ => None,
            };
        }
        Some(Status::Active)
    }

    /// Time the item has been in flight: close minus creation when closed,
    /// `now` minus creation while open.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> chrono::Duration {
        self.closed_at.unwrap_or(now) - self.created_at
    }
}

/// Upper-bound rendering of an elapsed duration, like `<=3d`.
///
/// Walks units largest to smallest and picks the first whose value exceeds
/// 1, rounding up, so the figure reads "at most this many". Exactness is
/// not the point.
#[must_use]
pub fn format_duration(elapsed: chrono::Duration) -> String {
    const UNITS: &[(&str, u64)] = &[
        ("y", 365 * 86_400),
        ("mo", 30 * 86_400),
        ("w", 7 * 86_400),
        ("d", 86_400),
        ("h", 3_600),
        ("m", 60),
    ];

    let secs = u64::try_from(elapsed.num_seconds()).unwrap_or(0);
    for (label, unit) in UNITS {
        if secs > *unit {
            return format!("<={}{label}", secs.div_ceil(*unit));
        }
    }
    format!("<={}s", secs.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().expect("valid RFC3339 instant")
    }

    fn item(kind: ItemKind, state: ItemState) -> Item {
        Item {
            id: "https://api.github.com/repos/octo/demo/issues/1".to_string(),
            html_url: "https://github.com/octo/demo/issues/1".to_string(),
            number: 1,
            title: "Demo".to_string(),
            author: "octocat".to_string(),
            kind,
            state,
            state_reason: None,
            merged: false,
            created_at: instant("2026-08-01T00:00:00Z"),
            closed_at: None,
            reactions: ReactionCounts::default(),
        }
    }

    // ========================================================================
    // Status derivation
    // ========================================================================

    #[test]
    fn closed_completed_issue_is_done() {
        let mut issue = item(ItemKind::Issue, ItemState::Closed);
        issue.state_reason = Some(StateReason::Completed);
        assert_eq!(issue.status(), Some(Status::Done));
    }

    #[test]
    fn closed_not_planned_issue_is_dropped() {
        let mut issue = item(ItemKind::Issue, ItemState::Closed);
        issue.state_reason = Some(StateReason::NotPlanned);
        assert_eq!(issue.status(), Some(Status::Dropped));
    }

    #[test]
    fn closed_issue_without_reason_has_no_status() {
        let issue = item(ItemKind::Issue, ItemState::Closed);
        assert_eq!(issue.status(), None);
    }

    #[test]
    fn closed_pull_with_confirmed_merge_is_merged() {
        let mut pull = item(ItemKind::PullRequest, ItemState::Closed);
        pull.merged = true;
        assert_eq!(pull.status(), Some(Status::Merged));
    }

    #[test]
    fn closed_pull_without_merge_is_closed() {
        let pull = item(ItemKind::PullRequest, ItemState::Closed);
        assert_eq!(pull.status(), Some(Status::Closed));
    }

    #[test]
    fn open_issue_is_active() {
        let issue = item(ItemKind::Issue, ItemState::Open);
        assert_eq!(issue.status(), Some(Status::Active));
    }

    #[test]
    fn reopened_issue_is_active() {
        let mut issue = item(ItemKind::Issue, ItemState::Open);
        issue.state_reason = Some(StateReason::Reopened);
        assert_eq!(issue.status(), Some(Status::Active));
    }

    // ========================================================================
    // Elapsed time and duration rendering
    // ========================================================================

    #[test]
    fn elapsed_uses_close_instant_when_closed() {
        let mut issue = item(ItemKind::Issue, ItemState::Closed);
        issue.closed_at = Some(instant("2026-08-03T00:00:00Z"));
        let now = instant("2026-08-20T00:00:00Z");
        assert_eq!(issue.elapsed(now), chrono::Duration::days(2));
    }

    #[test]
    fn elapsed_counts_to_now_while_open() {
        let issue = item(ItemKind::Issue, ItemState::Open);
        let now = instant("2026-08-05T00:00:00Z");
        assert_eq!(issue.elapsed(now), chrono::Duration::days(4));
    }

    #[test]
    fn durations_round_up_in_the_largest_exceeded_unit() {
        let day = chrono::Duration::days(1);
        assert_eq!(format_duration(day * 2 + chrono::Duration::hours(12)), "<=3d");
        assert_eq!(format_duration(chrono::Duration::days(8)), "<=2w");
        assert_eq!(format_duration(chrono::Duration::days(45)), "<=2mo");
        assert_eq!(format_duration(chrono::Duration::days(400)), "<=2y");
        assert_eq!(format_duration(chrono::Duration::minutes(90)), "<=2h");
        assert_eq!(format_duration(chrono::Duration::seconds(61)), "<=2m");
    }

    #[test]
    fn exactly_one_unit_falls_to_the_next_smaller() {
        assert_eq!(format_duration(chrono::Duration::days(7)), "<=7d");
        assert_eq!(format_duration(chrono::Duration::minutes(1)), "<=60s");
    }

    #[test]
    fn short_and_negative_durations_render_as_a_second() {
        assert_eq!(format_duration(chrono::Duration::seconds(30)), "<=30s");
        assert_eq!(format_duration(chrono::Duration::zero()), "<=1s");
        assert_eq!(format_duration(chrono::Duration::seconds(-5)), "<=1s");
    }

    #[test]
    fn state_reasons_parse_from_api_strings() {
        assert_eq!(StateReason::parse("completed"), Some(StateReason::Completed));
        assert_eq!(StateReason::parse("not_planned"), Some(StateReason::NotPlanned));
        assert_eq!(StateReason::parse("reopened"), Some(StateReason::Reopened));
        assert_eq!(StateReason::parse("duplicate"), None);
    }
}
