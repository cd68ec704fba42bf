// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `RetroError` and adds actionable hints per
//! error type, keeping structured error data in the library and presentation
//! here.

use anyhow::Error;
use retro_core::error::RetroError;

/// Formats an error for CLI display with helpful hints.
///
/// If the error is not a `RetroError`, returns the original error message.
pub fn format_error(error: &Error) -> String {
    if let Some(retro_err) = error.downcast_ref::<RetroError>() {
        match retro_err {
            RetroError::NotAuthenticated => {
                format!(
                    "{retro_err}\n\nTip: export GITHUB_TOKEN, or run `gh auth login` so the gh CLI can supply a token."
                )
            }
            RetroError::RateLimited { reset_at } => {
                format!(
                    "{retro_err}\n\nTip: The search quota resets at {reset_at}. Report runs wait this out automatically; try again then."
                )
            }
            RetroError::Search { .. } => {
                format!(
                    "{retro_err}\n\nTip: Check the query syntax and that your token has scopes to search the repositories involved."
                )
            }
            RetroError::GitHub { message: _ } => {
                format!("{retro_err}\n\nTip: Check your GitHub token and network connectivity.")
            }
            RetroError::Config { message: _ } => {
                format!(
                    "{retro_err}\n\nTip: Check your config file at {}",
                    retro_core::config::config_file_path().display()
                )
            }
        }
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_authenticated_gets_a_tip() {
        let anyhow_err = anyhow::Error::new(RetroError::NotAuthenticated);
        let formatted = format_error(&anyhow_err);

        assert!(formatted.contains("GITHUB_TOKEN"));
        assert!(formatted.contains("gh auth login"));
    }

    #[test]
    fn search_errors_keep_the_query() {
        let anyhow_err = anyhow::Error::new(RetroError::Search {
            query: "author:octocat created:2026-08-01..2026-08-15".to_string(),
            message: "422 Unprocessable Entity".to_string(),
        });
        let formatted = format_error(&anyhow_err);

        assert!(formatted.contains("author:octocat"));
        assert!(formatted.contains("Tip:"));
    }

    #[test]
    fn rate_limited_names_the_reset() {
        let anyhow_err = anyhow::Error::new(RetroError::RateLimited {
            reset_at: "2026-08-15T10:30:00Z".parse().expect("valid instant"),
        });
        let formatted = format_error(&anyhow_err);

        assert!(formatted.contains("2026-08-15 10:30:00 UTC"));
    }

    #[test]
    fn plain_errors_pass_through() {
        let error = anyhow::anyhow!("Some generic error");
        let formatted = format_error(&error);

        assert_eq!(formatted, "Some generic error");
    }
}
