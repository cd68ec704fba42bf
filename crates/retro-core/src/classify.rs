// SPDX-License-Identifier: Apache-2.0

//! Drain-by-predicate classification of the working set into report
//! sections.
//!
//! Rules are ordered data: an item joins the first category whose predicate
//! matches and is claimed there, so later rules never see it. Whatever no
//! rule claims lands in the remaining bucket. Rule order is load-bearing.

use serde::Serialize;

use crate::item::{Item, ItemState};
use crate::window::TimeWindow;
use crate::workset::WorkingSet;

/// Label of the implicit catch-all category.
pub const REMAINING_LABEL: &str = "Remaining";

/// Claim test a rule evaluates against the active window.
pub type Predicate = fn(&Item, &TimeWindow) -> bool;

/// One ordered classification rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Section heading for the category this rule produces.
    pub label: &'static str,
    /// Claim test.
    pub predicate: Predicate,
}

/// A named bucket of claimed items.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Section heading.
    pub label: &'static str,
    /// Items claimed by this category's rule, in arena order.
    pub items: Vec<Item>,
}

/// Partition the working set.
///
/// Returns the per-rule categories in rule order plus the unclaimed
/// remainder. Claimed items leave the arena, so the categories and the
/// remainder together hold every original item exactly once.
#[must_use]
pub fn classify(
    set: WorkingSet,
    window: &TimeWindow,
    rules: &[Rule],
) -> (Vec<Category>, Vec<Item>) {
    let mut arena: Vec<Option<Item>> = set.into_arena().into_iter().map(Some).collect();
    let mut categories = Vec::with_capacity(rules.len());

    for rule in rules {
        let mut claimed = Vec::new();
        for slot in &mut arena {
            let matches = slot
                .as_ref()
                .is_some_and(|item| (rule.predicate)(item, window));
            if matches && let Some(item) = slot.take() {
                claimed.push(item);
            }
        }
        categories.push(Category {
            label: rule.label,
            items: claimed,
        });
    }

    let remaining = arena.into_iter().flatten().collect();
    (categories, remaining)
}

/// Rule list for the standard report.
///
/// Keeps the original wide completed policy: any closed item created before
/// the window ends counts as completed this cycle, long-running work
/// included.
#[must_use]
pub fn standard_rules() -> Vec<Rule> {
    vec![
        Rule {
            label: "Completed this cycle",
            predicate: completed_this_cycle,
        },
        Rule {
            label: "Updated this cycle",
            predicate: closed_before_window,
        },
    ]
}

/// Rule list for the detailed report.
///
/// Completed narrows to work created within the window so long-running work
/// gets its own finished and continuing sections instead of folding into the
/// generic buckets.
#[must_use]
pub fn detailed_rules() -> Vec<Rule> {
    vec![
        Rule {
            label: "Completed this cycle",
            predicate: completed_within_window,
        },
        Rule {
            label: "Updated this cycle",
            predicate: closed_before_window,
        },
        Rule {
            label: "Finished long-running work",
            predicate: long_term_finished,
        },
        Rule {
            label: "Continuing long-running work",
            predicate: long_term_continuing,
        },
    ]
}

/// Closed, and either created within the window or carried in from before
/// it.
fn completed_this_cycle(item: &Item, window: &TimeWindow) -> bool {
    item.state == ItemState::Closed
        && (window.contains(item.created_at) || item.created_at < window.start)
}

/// Closed and created within the window.
fn completed_within_window(item: &Item, window: &TimeWindow) -> bool {
    item.state == ItemState::Closed && window.contains(item.created_at)
}

/// Closed before the window started; only an update landed this cycle.
/// Open items have no close instant and never match.
fn closed_before_window(item: &Item, window: &TimeWindow) -> bool {
    item.closed_at.is_some_and(|closed| closed < window.start)
}

/// Started before the window and finished by now.
fn long_term_finished(item: &Item, window: &TimeWindow) -> bool {
    item.created_at < window.start && item.state == ItemState::Closed
}

/// Still open, whenever it started.
fn long_term_continuing(item: &Item, _window: &TimeWindow) -> bool {
    item.state == ItemState::Open
}
