// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides authentication, the issue/PR search boundary, and the merge
//! status lookup for pull requests.

use octocrab::Octocrab;
use tracing::{debug, instrument};

use crate::Result;

pub mod auth;
pub mod pulls;
pub mod search;

/// Looks up the login of the authenticated user.
///
/// # Errors
///
/// Returns `RetroError::GitHub` if the API call fails, including when the
/// token lacks the scopes to read the current user.
#[instrument(skip(client))]
pub async fn current_username(client: &Octocrab) -> Result<String> {
    let user = client.current().user().await?;
    debug!(login = %user.login, "resolved authenticated user");
    Ok(user.login)
}

/// Extracts `(owner, repo)` from an item's GitHub web URL.
///
/// Works for both issue and pull request URLs. Returns `None` for URLs
/// outside `github.com` or with a truncated path.
#[must_use]
pub fn parse_owner_repo(html_url: &str) -> Option<(String, String)> {
    let path = html_url.strip_prefix("https://github.com/")?;
    let mut segments = path.split('/');
    let owner = segments.next().unwrap_or_default();
    let repo = segments.next().unwrap_or_default();
    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_request_urls_parse() {
        let parsed = parse_owner_repo("https://github.com/rust-lang/cargo/pull/1234");
        assert_eq!(
            parsed,
            Some(("rust-lang".to_string(), "cargo".to_string()))
        );
    }

    #[test]
    fn issue_urls_parse() {
        let parsed = parse_owner_repo("https://github.com/octocat/hello-world/issues/7");
        assert_eq!(
            parsed,
            Some(("octocat".to_string(), "hello-world".to_string()))
        );
    }

    #[test]
    fn non_github_urls_are_rejected() {
        assert_eq!(parse_owner_repo("https://gitlab.com/group/project/-/issues/1"), None);
    }

    #[test]
    fn truncated_paths_are_rejected() {
        assert_eq!(parse_owner_repo("https://github.com/octocat"), None);
        assert_eq!(parse_owner_repo("https://github.com/"), None);
    }
}
