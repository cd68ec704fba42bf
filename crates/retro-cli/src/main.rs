// SPDX-License-Identifier: Apache-2.0

//! Retro - periodic GitHub activity reports.
//!
//! A CLI tool that summarizes the issues and pull requests a user authored
//! or touched in a reporting window, classified by what happened to them.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use retro_core::config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet, cli.verbose);

    let config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    match commands::run(cli.report, cli.command, output_ctx, &config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            std::process::exit(1);
        }
    }
}
