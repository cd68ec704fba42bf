// SPDX-License-Identifier: Apache-2.0

//! Blocking recovery from GitHub rate limits.

use tracing::info;

use crate::clock::Clock;
use crate::error::RetroError;

/// Handle a rate-limit error by sleeping until the reported reset.
///
/// Returns `true` when the error was a rate limit and it is now safe to
/// retry, whether or not a sleep was needed. Any other error returns
/// `false` untouched.
pub async fn wait_if_rate_limited(clock: &dyn Clock, err: &RetroError) -> bool {
    let RetroError::RateLimited { reset_at } = err else {
        return false;
    };

    let wait = *reset_at - clock.now();
    if wait > chrono::Duration::zero() {
        info!(
            seconds = wait.num_seconds(),
            reset_at = %reset_at,
            "rate limited, waiting for reset"
        );
        clock.sleep(wait.to_std().unwrap_or_default()).await;
    }
    true
}
