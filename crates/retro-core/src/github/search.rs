// SPDX-License-Identifier: Apache-2.0

//! GitHub issue and pull request search.
//!
//! Wraps the `/search/issues` endpoint: builds the encoded route, maps the
//! wire payload into [`Item`], derives pagination metadata, and classifies
//! rate-limit responses so the page walker can recover from them.

use chrono::{DateTime, Duration, Utc};
use octocrab::Octocrab;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::error::RetroError;
use crate::item::{Item, ItemKind, ItemState, ReactionCounts, StateReason};
use crate::page::{Page, PageMeta, PageState};

/// The search API serves at most this many results per query.
const SEARCH_MAX_RESULTS: u32 = 1000;

/// Reset horizon assumed when the rate limit endpoint is unavailable.
const FALLBACK_RESET_SECS: i64 = 60;

/// Wire payload of one `/search/issues` page.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Total matches across all pages.
    pub total_count: u32,
    /// Set when the query timed out server-side and results were truncated.
    #[serde(default)]
    pub incomplete_results: bool,
    /// Matches on this page.
    pub items: Vec<SearchItem>,
}

/// One issue or pull request as returned by the search API.
#[derive(Debug, Deserialize)]
pub struct SearchItem {
    /// Web URL of the item.
    pub html_url: String,
    /// Issue or PR number within its repository.
    pub number: u64,
    /// Title text.
    pub title: String,
    /// Lifecycle state, `"open"` or `"closed"`.
    pub state: String,
    /// Closure reason for issues.
    pub state_reason: Option<String>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Closure instant, absent while open.
    pub closed_at: Option<DateTime<Utc>>,
    /// Author, absent for deleted accounts.
    pub user: Option<SearchUser>,
    /// Present exactly when the item is a pull request.
    pub pull_request: Option<serde_json::Value>,
    /// Reaction tallies.
    pub reactions: Option<ReactionSummary>,
}

/// Author stanza of a search result.
#[derive(Debug, Deserialize)]
pub struct SearchUser {
    /// Account login.
    pub login: String,
}

/// Reaction tallies as keyed on the wire.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReactionSummary {
    /// Thumbs up.
    #[serde(rename = "+1")]
    pub plus_one: u32,
    /// Thumbs down.
    #[serde(rename = "-1")]
    pub minus_one: u32,
    /// Heart.
    pub heart: u32,
    /// Eyes.
    pub eyes: u32,
    /// Rocket.
    pub rocket: u32,
    /// Hooray.
    pub hooray: u32,
    /// Laugh.
    pub laugh: u32,
    /// Confused.
    pub confused: u32,
}

impl From<ReactionSummary> for ReactionCounts {
    fn from(summary: ReactionSummary) -> Self {
        ReactionCounts {
            heart: summary.heart,
            eyes: summary.eyes,
            plus_one: summary.plus_one,
            minus_one: summary.minus_one,
            rocket: summary.rocket,
            hooray: summary.hooray,
            laugh: summary.laugh,
            confused: summary.confused,
        }
    }
}

impl SearchItem {
    /// Maps the wire representation into the report model.
    ///
    /// The `pull_request` stanza marks PR-ness but its contents are not
    /// trusted for merge status; that comes from a dedicated lookup later.
    fn into_item(self) -> Item {
        let kind = if self.pull_request.is_some() {
            ItemKind::PullRequest
        } else {
            ItemKind::Issue
        };
        let state = if self.state == "closed" {
            ItemState::Closed
        } else {
            ItemState::Open
        };

        Item {
            id: self.html_url.clone(),
            html_url: self.html_url,
            number: self.number,
            title: self.title,
            author: self.user.map_or_else(String::new, |user| user.login),
            kind,
            state,
            state_reason: self.state_reason.as_deref().and_then(StateReason::parse),
            merged: false,
            created_at: self.created_at,
            closed_at: self.closed_at,
            reactions: self.reactions.map_or_else(ReactionCounts::default, Into::into),
        }
    }
}

/// Fetches one page of search results for `query`.
///
/// # Errors
///
/// Returns `RetroError::RateLimited` when GitHub throttled the request,
/// carrying the reset instant, and `RetroError::Search` for every other
/// failure.
#[instrument(skip_all, fields(query = %query, page = state.page))]
pub async fn search_items(
    client: &Octocrab,
    query: &str,
    sort: &str,
    order: &str,
    state: PageState,
) -> Result<Page<Item>> {
    let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
    let route = format!(
        "/search/issues?q={encoded}&sort={sort}&order={order}&per_page={}&page={}",
        state.per_page, state.page
    );

    let response = match client.get::<SearchResponse, _, _>(&route, None::<&()>).await {
        Ok(response) => response,
        Err(err) => return Err(classify_search_error(client, query, err).await),
    };

    if response.incomplete_results {
        warn!(query, "search results flagged incomplete");
    }

    let meta = page_meta(state, response.total_count);
    debug!(
        total = response.total_count,
        fetched = response.items.len(),
        last_page = meta.last_page,
        "fetched search page"
    );

    Ok(Page {
        items: response.items.into_iter().map(SearchItem::into_item).collect(),
        stop_early: false,
        meta,
    })
}

/// Derives pagination metadata from the reported match count.
///
/// The search API never serves past [`SEARCH_MAX_RESULTS`] matches, so the
/// last page is computed against the clamped total.
fn page_meta(state: PageState, total_count: u32) -> PageMeta {
    let per_page = u32::from(state.per_page).max(1);
    let total = total_count.min(SEARCH_MAX_RESULTS);
    PageMeta {
        next_page: state.page + 1,
        last_page: total.div_ceil(per_page).max(1),
    }
}

/// Turns an API failure into the error the page walker understands.
async fn classify_search_error(client: &Octocrab, query: &str, err: octocrab::Error) -> RetroError {
    if is_rate_limit(&err) {
        let reset_at = rate_limit_reset(client)
            .await
            .unwrap_or_else(|| Utc::now() + Duration::seconds(FALLBACK_RESET_SECS));
        warn!(query, %reset_at, "search hit the rate limit");
        return RetroError::RateLimited { reset_at };
    }
    RetroError::Search {
        query: query.to_string(),
        message: err.to_string(),
    }
}

fn is_rate_limit(err: &octocrab::Error) -> bool {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            is_rate_limit_response(source.status_code.as_u16(), &source.message)
        }
        _ => false,
    }
}

/// Rate limiting answers 403 (primary) or 429 (secondary) with a message
/// naming the limit.
fn is_rate_limit_response(status: u16, message: &str) -> bool {
    matches!(status, 403 | 429) && message.to_lowercase().contains("rate limit")
}

/// Asks the rate limit endpoint when the search bucket resets.
async fn rate_limit_reset(client: &Octocrab) -> Option<DateTime<Utc>> {
    let limits = client.ratelimit().get().await.ok()?;
    let reset = i64::try_from(limits.resources.search.reset).ok()?;
    DateTime::from_timestamp(reset, 0)
}
