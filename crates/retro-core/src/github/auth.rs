// SPDX-License-Identifier: Apache-2.0

//! GitHub token resolution and client construction.
//!
//! Provides a token resolution priority chain:
//! 1. `GITHUB_TOKEN` environment variable
//! 2. `GITHUB_OAUTH_TOKEN` environment variable
//! 3. GitHub CLI (`gh auth token`)

use std::process::Command;

use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument};

use crate::Result;
use crate::error::RetroError;

/// Source of the GitHub authentication token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Token from the `GITHUB_TOKEN` environment variable.
    Environment,
    /// Token from the `GITHUB_OAUTH_TOKEN` environment variable.
    OauthEnvironment,
    /// Token from `gh auth token`.
    GhCli,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Environment => write!(f, "GITHUB_TOKEN environment variable"),
            TokenSource::OauthEnvironment => {
                write!(f, "GITHUB_OAUTH_TOKEN environment variable")
            }
            TokenSource::GhCli => write!(f, "GitHub CLI"),
        }
    }
}

/// Attempts to get a token from the GitHub CLI (`gh auth token`).
///
/// Returns `None` if:
/// - `gh` is not installed
/// - `gh` is not authenticated
/// - Any other error occurs
#[instrument]
fn get_token_from_gh_cli() -> Option<SecretString> {
    debug!("Attempting to get token from gh CLI");

    let output = Command::new("gh").args(["auth", "token"]).output();

    match output {
        Ok(output) if output.status.success() => {
            let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if token.is_empty() {
                debug!("gh auth token returned empty output");
                None
            } else {
                debug!("Successfully retrieved token from gh CLI");
                Some(SecretString::from(token))
            }
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(
                status = ?output.status,
                stderr = %stderr.trim(),
                "gh auth token failed"
            );
            None
        }
        Err(e) => {
            debug!(error = %e, "Failed to execute gh command");
            None
        }
    }
}

/// Resolves a GitHub token using the priority chain.
///
/// Checks sources in order:
/// 1. `GITHUB_TOKEN` environment variable
/// 2. `GITHUB_OAUTH_TOKEN` environment variable
/// 3. GitHub CLI (`gh auth token`)
///
/// Returns the token and its source, or `None` if no token is found.
#[instrument]
pub fn resolve_token() -> Option<(SecretString, TokenSource)> {
    // Priority 1: GITHUB_TOKEN environment variable
    if let Ok(token) = std::env::var("GITHUB_TOKEN")
        && !token.is_empty()
    {
        debug!("Using token from GITHUB_TOKEN environment variable");
        return Some((SecretString::from(token), TokenSource::Environment));
    }

    // Priority 2: GITHUB_OAUTH_TOKEN environment variable
    if let Ok(token) = std::env::var("GITHUB_OAUTH_TOKEN")
        && !token.is_empty()
    {
        debug!("Using token from GITHUB_OAUTH_TOKEN environment variable");
        return Some((SecretString::from(token), TokenSource::OauthEnvironment));
    }

    // Priority 3: GitHub CLI
    if let Some(token) = get_token_from_gh_cli() {
        debug!("Using token from GitHub CLI");
        return Some((token, TokenSource::GhCli));
    }

    debug!("No token found in any source");
    None
}

/// Creates an authenticated Octocrab client using the token priority chain.
///
/// Uses [`resolve_token`] to find credentials from environment variables or
/// the GitHub CLI.
///
/// # Errors
///
/// Returns `RetroError::NotAuthenticated` if no token is found from any
/// source, or `RetroError::GitHub` if the client cannot be built.
#[instrument]
pub fn create_client() -> Result<Octocrab> {
    let (token, source) = resolve_token().ok_or(RetroError::NotAuthenticated)?;

    info!(source = %source, "Creating GitHub client");

    let client = Octocrab::builder()
        .personal_token(token.expose_secret().to_string())
        .build()?;

    debug!("Created authenticated GitHub client");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_tokens<F: FnOnce()>(primary: Option<&str>, oauth: Option<&str>, body: F) {
        let saved_primary = std::env::var("GITHUB_TOKEN").ok();
        let saved_oauth = std::env::var("GITHUB_OAUTH_TOKEN").ok();
        unsafe {
            match primary {
                Some(val) => std::env::set_var("GITHUB_TOKEN", val),
                None => std::env::remove_var("GITHUB_TOKEN"),
            }
            match oauth {
                Some(val) => std::env::set_var("GITHUB_OAUTH_TOKEN", val),
                None => std::env::remove_var("GITHUB_OAUTH_TOKEN"),
            }
        }

        body();

        unsafe {
            match saved_primary {
                Some(val) => std::env::set_var("GITHUB_TOKEN", val),
                None => std::env::remove_var("GITHUB_TOKEN"),
            }
            match saved_oauth {
                Some(val) => std::env::set_var("GITHUB_OAUTH_TOKEN", val),
                None => std::env::remove_var("GITHUB_OAUTH_TOKEN"),
            }
        }
    }

    #[test]
    #[serial]
    fn github_token_takes_priority() {
        with_tokens(Some("ghp_primary"), Some("ghp_oauth"), || {
            let (token, source) = resolve_token().expect("token should resolve");
            assert_eq!(source, TokenSource::Environment);
            assert_eq!(token.expose_secret(), "ghp_primary");
        });
    }

    #[test]
    #[serial]
    fn oauth_variable_is_the_fallback() {
        with_tokens(None, Some("ghp_oauth"), || {
            let (token, source) = resolve_token().expect("token should resolve");
            assert_eq!(source, TokenSource::OauthEnvironment);
            assert_eq!(token.expose_secret(), "ghp_oauth");
        });
    }

    #[test]
    #[serial]
    fn empty_variables_are_treated_as_missing() {
        with_tokens(Some(""), Some("ghp_oauth"), || {
            let (_, source) = resolve_token().expect("token should resolve");
            assert_eq!(source, TokenSource::OauthEnvironment);
        });
    }

    #[test]
    fn token_source_display_names_the_origin() {
        assert_eq!(
            TokenSource::Environment.to_string(),
            "GITHUB_TOKEN environment variable"
        );
        assert_eq!(
            TokenSource::OauthEnvironment.to_string(),
            "GITHUB_OAUTH_TOKEN environment variable"
        );
        assert_eq!(TokenSource::GhCli.to_string(), "GitHub CLI");
    }
}
