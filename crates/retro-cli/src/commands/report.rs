// SPDX-License-Identifier: Apache-2.0

//! The default command: gather a window of GitHub activity and render it.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use retro_core::{
    AppConfig, Clock, GithubMergeCheck, ReportParams, SystemClock, TimeWindow, build_report,
    create_client, current_username, detailed_rules, duration_as_adj, standard_rules,
};
use tracing::{debug, warn};

use super::maybe_spinner;
use crate::cli::{Cadence, OutputContext, ReportArgs, parse_since, parse_until};
use crate::output;

pub async fn run(args: ReportArgs, ctx: &OutputContext, config: &AppConfig) -> Result<()> {
    let clock = SystemClock;
    let (window, cadence) = resolve_window(&args, config, clock.now())?;

    let client = create_client()?;
    let user = match args.user.clone().or_else(|| config.report.user.clone()) {
        Some(user) => user,
        None => current_username(&client)
            .await
            .context("Failed to discover the authenticated user")?,
    };
    debug!(
        user = %user,
        start = %window.start,
        end = %window.end,
        cadence = %cadence,
        "resolved reporting window"
    );

    let rules = if args.detailed || config.report.detailed {
        detailed_rules()
    } else {
        standard_rules()
    };
    let per_page = args
        .per_page
        .unwrap_or_else(|| config.github.page_size())
        .clamp(1, retro_core::MAX_PER_PAGE);
    let merge_check = GithubMergeCheck::new(client.clone());

    let spinner = maybe_spinner(ctx, "Fetching activity...");
    let report = build_report(
        ReportParams::builder()
            .client(&client)
            .clock(&clock)
            .merge_check(&merge_check)
            .user(&user)
            .window(window)
            .cadence(cadence)
            .rules(rules)
            .per_page(per_page)
            .build(),
    )
    .await?;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    output::render(&report, ctx)
}

/// Derives the reporting window and its display name from flags and config.
///
/// Explicit `--since` wins over any cadence; the window is then described by
/// the adjective matching its length. Without `--since`, the cadence flag,
/// then the configured cadence, then the biweekly default decide the span,
/// ending at `--until` or now.
fn resolve_window(
    args: &ReportArgs,
    config: &AppConfig,
    now: DateTime<Utc>,
) -> Result<(TimeWindow, String)> {
    let end = match &args.until {
        Some(raw) => parse_until(raw)?,
        None => now,
    };

    if let Some(raw) = &args.since {
        let start = parse_since(raw)?;
        if start > end {
            anyhow::bail!("Window start {start} is after its end {end}");
        }
        let adj = duration_as_adj(end - start);
        let cadence = if adj.is_empty() { "custom" } else { adj };
        return Ok((TimeWindow::new(start, end), cadence.to_string()));
    }

    let cadence = args
        .cadence
        .or_else(|| configured_cadence(config))
        .unwrap_or(Cadence::Biweekly);
    Ok((
        TimeWindow::ending_at(end, cadence.span()),
        cadence.label().to_string(),
    ))
}

/// Cadence named in the config file, if it parses.
fn configured_cadence(config: &AppConfig) -> Option<Cadence> {
    let name = config.report.cadence.as_deref()?;
    match Cadence::from_str(name, true) {
        Ok(cadence) => Some(cadence),
        Err(_) => {
            warn!(name, "unknown cadence in config, using the default");
            None
        }
    }
}
