// SPDX-License-Identifier: Apache-2.0

//! Error types for retro-core.
//!
//! [`RetroError`] is a tagged enum so callers can match on error kinds
//! instead of inspecting dynamic error types; the rate-limit variant carries
//! the reset instant the backoff loop needs.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Core error type for retro operations.
#[derive(Error, Debug)]
pub enum RetroError {
    /// The API rejected a request because the rate limit is exhausted.
    ///
    /// Recoverable: the pagination loop waits for the reset and retries, so
    /// this variant never reaches the user during a report run.
    #[error("rate limited until {reset_at}")]
    RateLimited {
        /// Instant at which the rate-limit window resets.
        reset_at: DateTime<Utc>,
    },

    /// A search query failed for a reason other than rate limiting.
    #[error("search `{query}` failed: {message}")]
    Search {
        /// The query that was being executed.
        query: String,
        /// Error message from the GitHub API.
        message: String,
    },

    /// GitHub API error outside the search path.
    #[error("GitHub API error: {message}")]
    GitHub {
        /// Error message from the GitHub API.
        message: String,
    },

    /// No usable GitHub token could be resolved.
    #[error(
        "GitHub token must be provided through the GITHUB_TOKEN or GITHUB_OAUTH_TOKEN environment variables or through the gh CLI"
    )]
    NotAuthenticated,

    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },
}

impl From<octocrab::Error> for RetroError {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHub {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for RetroError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
