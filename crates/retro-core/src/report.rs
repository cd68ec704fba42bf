// SPDX-License-Identifier: Apache-2.0

//! Report assembly pipeline.
//!
//! Runs the two activity queries through the page walker, merges every page
//! into a deduplicated working set, resolves merge status for closed pull
//! requests, and classifies the set into the report's categories.

use async_trait::async_trait;
use bon::Builder;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::classify::{Category, REMAINING_LABEL, Rule, classify};
use crate::clock::Clock;
use crate::github::{parse_owner_repo, search};
use crate::item::{ItemKind, ItemState};
use crate::page::paginate;
use crate::window::TimeWindow;
use crate::workset::WorkingSet;

/// Merge status lookup for a pull request.
///
/// Search results report merged pull requests as plain "closed"; this seam
/// lets the pipeline ask the pulls API which closed PRs actually merged,
/// and lets tests answer without the network.
#[async_trait]
pub trait MergeCheck: Send + Sync {
    /// Whether the pull request has been merged.
    ///
    /// # Errors
    ///
    /// Returns `RetroError::GitHub` when the lookup fails.
    async fn is_merged(&self, owner: &str, repo: &str, number: u64) -> Result<bool>;
}

/// Everything [`build_report`] needs.
#[derive(Builder)]
pub struct ReportParams<'a> {
    /// Authenticated GitHub client.
    pub client: &'a Octocrab,
    /// Time source, swappable in tests.
    pub clock: &'a dyn Clock,
    /// Merge status lookup for closed pull requests.
    pub merge_check: &'a dyn MergeCheck,
    /// Login of the user the report covers.
    pub user: &'a str,
    /// Reporting window, both ends inclusive.
    pub window: TimeWindow,
    /// Cadence name shown in the report header.
    pub cadence: String,
    /// Classification rules, applied in order.
    pub rules: Vec<Rule>,
    /// Search page size.
    #[builder(default = 100)]
    pub per_page: u8,
}

/// A classified activity report.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Login the report covers.
    pub user: String,
    /// Cadence name, e.g. "biweekly".
    pub cadence: String,
    /// Window the activity was gathered for.
    pub window: TimeWindow,
    /// Instant the report was assembled.
    pub generated_at: DateTime<Utc>,
    /// Categories in presentation order, the unclaimed remainder last.
    pub categories: Vec<Category>,
}

impl Report {
    /// Total items across every category.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.items.len())
            .sum()
    }

    /// Whether the window held no activity at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

/// Assembles the activity report for one user and window.
///
/// Fetches items created in the window and items updated in the window,
/// deduplicating by identity, so work that predates the window but saw
/// activity inside it is still covered.
///
/// # Errors
///
/// Returns `RetroError::Search` when a query fails for reasons other than
/// rate limiting. Rate limits are waited out internally and never surface.
#[instrument(skip_all, fields(user = %params.user))]
pub async fn build_report(params: ReportParams<'_>) -> Result<Report> {
    let start = params.window.start_date();
    let end = params.window.end_date();
    let queries = [
        format!("author:{} created:{start}..{end}", params.user),
        format!("author:{} updated:{start}..{end}", params.user),
    ];

    let mut set = WorkingSet::new();
    for query in &queries {
        let items = paginate(params.clock, query, params.per_page, |state| {
            let client = params.client.clone();
            let query = query.clone();
            async move { search::search_items(&client, &query, "updated", "asc", state).await }
        })
        .await?;
        set.merge(items);
    }
    debug!(items = set.len(), "working set assembled");

    resolve_merge_status(&mut set, params.merge_check).await;

    let generated_at = params.clock.now();
    let (mut categories, remaining) = classify(set, &params.window, &params.rules);
    categories.push(Category {
        label: REMAINING_LABEL,
        items: remaining,
    });

    Ok(Report {
        user: params.user.to_string(),
        cadence: params.cadence,
        window: params.window,
        generated_at,
        categories,
    })
}

/// Fills in `merged` for every closed pull request in the set.
///
/// A failed lookup leaves the item unmerged rather than failing the report.
async fn resolve_merge_status(set: &mut WorkingSet, check: &dyn MergeCheck) {
    for item in set.items_mut() {
        if item.kind != ItemKind::PullRequest || item.state != ItemState::Closed {
            continue;
        }
        let Some((owner, repo)) = parse_owner_repo(&item.html_url) else {
            warn!(url = %item.html_url, "cannot derive owner/repo, skipping merge lookup");
            continue;
        };
        match check.is_merged(&owner, &repo, item.number).await {
            Ok(merged) => item.merged = merged,
            Err(err) => {
                warn!(
                    error = %err,
                    number = item.number,
                    "merge lookup failed, treating as unmerged"
                );
                item.merged = false;
            }
        }
    }
}
