// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the retro CLI.

mod completion;
mod report;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use retro_core::AppConfig;

use crate::cli::{Commands, OutputContext, ReportArgs};

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if ctx.is_interactive() {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    } else {
        None
    }
}

/// Dispatch to the appropriate command handler.
pub async fn run(
    report_args: ReportArgs,
    command: Option<Commands>,
    ctx: OutputContext,
    config: &AppConfig,
) -> Result<()> {
    match command {
        Some(Commands::Completion { shell }) => completion::run(shell),
        None => report::run(report_args, &ctx, config).await,
    }
}
