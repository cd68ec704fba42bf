// SPDX-License-Identifier: Apache-2.0

//! Pull request merge status via Octocrab.
//!
//! Search results say "closed" for both merged and rejected pull requests;
//! the pulls endpoint tells them apart through `merged_at`.

use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::{debug, instrument};

use crate::Result;
use crate::report::MergeCheck;

/// [`MergeCheck`] backed by the GitHub pulls API.
#[derive(Clone)]
pub struct GithubMergeCheck {
    client: Octocrab,
}

impl GithubMergeCheck {
    /// Wraps an authenticated client.
    #[must_use]
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MergeCheck for GithubMergeCheck {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, number = number))]
    async fn is_merged(&self, owner: &str, repo: &str, number: u64) -> Result<bool> {
        let pull = self.client.pulls(owner, repo).get(number).await?;
        let merged = pull.merged_at.is_some();
        debug!(merged, "checked merge status");
        Ok(merged)
    }
}
