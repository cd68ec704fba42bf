// SPDX-License-Identifier: Apache-2.0

//! Generic page-walking with rate-limit recovery.
//!
//! [`paginate`] drives a fetch closure across pages, starting at page 1. A
//! rate-limited attempt waits out the reset and retries the same page; any
//! other error aborts the walk immediately. The page counter only advances
//! on a successful, non-final page.

use std::future::Future;

use tracing::debug;

use crate::Result;
use crate::clock::Clock;
use crate::ratelimit::wait_if_rate_limited;

/// Position of one fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page number.
    pub page: u32,
    /// Requested page size.
    pub per_page: u8,
}

/// Pagination signals from a fetched response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    /// Page to request next.
    pub next_page: u32,
    /// Final page of the result set, 1-based.
    pub last_page: u32,
}

/// One fetched page plus the signals that drive the walk.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Caller-controlled early termination after this page.
    pub stop_early: bool,
    /// Response pagination metadata.
    pub meta: PageMeta,
}

/// Walk every page of a result set, collecting items.
///
/// `detail` names the walk in logs. The fetch closure is retried on the
/// same page after a rate-limit wait; other errors are returned as-is, with
/// nothing fetched so far surviving.
pub async fn paginate<T, F, Fut>(
    clock: &dyn Clock,
    detail: &str,
    per_page: u8,
    mut fetch: F,
) -> Result<Vec<T>>
where
    F: FnMut(PageState) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut all = Vec::new();
    let mut page = 1;

    loop {
        debug!(detail, page, per_page, "fetching page");
        match fetch(PageState { page, per_page }).await {
            Err(err) => {
                if wait_if_rate_limited(clock, &err).await {
                    // Stay on the same page after a rate-limit wait.
                    continue;
                }
                return Err(err);
            }
            Ok(fetched) => {
                all.extend(fetched.items);
                if fetched.stop_early || fetched.meta.last_page == page {
                    return Ok(all);
                }
                page = fetched.meta.next_page;
            }
        }
    }
}
