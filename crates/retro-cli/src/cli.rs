// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for retro.
//!
//! Uses clap's derive API. The bare invocation runs the activity report;
//! subcommands cover everything else.

use std::io::IsTerminal;

use chrono::{DateTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Extended help text for the completion subcommand with shell-specific examples.
const COMPLETION_HELP: &str = r#"EXAMPLES

  bash
    Add to ~/.bashrc or ~/.bash_profile:
      eval "$(retro completion bash)"

  zsh
    Generate completion file:
      mkdir -p ~/.zsh/completions
      retro completion zsh > ~/.zsh/completions/_retro

    Add to ~/.zshrc (before compinit):
      fpath=(~/.zsh/completions $fpath)
      autoload -U compinit && compinit -i

  fish
    Generate completion file:
      retro completion fish > ~/.config/fish/completions/retro.fish
"#;

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// YAML output for programmatic consumption
    Yaml,
    /// Markdown output for sharing or posting
    Markdown,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json, yaml, markdown)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, progress)
    pub quiet: bool,
    /// Enable verbose output (debug-level logging)
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// How far back a report reaches by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Cadence {
    /// The last day
    Daily,
    /// The last 7 days
    Weekly,
    /// The last 14 days (default)
    Biweekly,
    /// The last 30 days
    Monthly,
    /// The last 91 days
    Quarterly,
    /// The last 365 days
    Yearly,
}

impl Cadence {
    /// Length of the reporting window.
    pub fn span(self) -> chrono::Duration {
        match self {
            Cadence::Daily => chrono::Duration::days(1),
            Cadence::Weekly => chrono::Duration::days(7),
            Cadence::Biweekly => chrono::Duration::days(14),
            Cadence::Monthly => chrono::Duration::days(30),
            Cadence::Quarterly => chrono::Duration::days(91),
            Cadence::Yearly => chrono::Duration::days(365),
        }
    }

    /// Lowercase name shown in the report header.
    pub fn label(self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Biweekly => "biweekly",
            Cadence::Monthly => "monthly",
            Cadence::Quarterly => "quarterly",
            Cadence::Yearly => "yearly",
        }
    }
}

/// Parses a window start bound in YYYY-MM-DD or RFC3339 format.
///
/// Bare dates resolve to midnight UTC.
///
/// # Errors
///
/// Returns an error if the input matches neither format.
pub fn parse_since(input: &str) -> anyhow::Result<DateTime<Utc>> {
    parse_bound(input, false)
}

/// Parses a window end bound in YYYY-MM-DD or RFC3339 format.
///
/// Bare dates resolve to the end of that day so the whole day is covered.
///
/// # Errors
///
/// Returns an error if the input matches neither format.
pub fn parse_until(input: &str) -> anyhow::Result<DateTime<Utc>> {
    parse_bound(input, true)
}

fn parse_bound(input: &str, end_of_day: bool) -> anyhow::Result<DateTime<Utc>> {
    // Try RFC3339 format first
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }

    // Try YYYY-MM-DD format
    if let Ok(date) = chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let (h, m, s) = if end_of_day { (23, 59, 59) } else { (0, 0, 0) };
        let datetime = date
            .and_hms_opt(h, m, s)
            .ok_or_else(|| anyhow::anyhow!("Failed to create datetime from date {input}"))?;
        return Ok(Utc.from_utc_datetime(&datetime));
    }

    anyhow::bail!("Invalid date format. Expected YYYY-MM-DD or RFC3339 format, got: {input}")
}

/// Retro - periodic GitHub activity reports.
///
/// Summarizes the issues and pull requests you authored or touched in a
/// reporting window, with merge status resolved for closed pull requests.
/// Run without a subcommand to produce the report.
#[derive(Parser)]
#[command(name = "retro")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format (text, json, yaml, markdown)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners, progress)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug-level logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Report options for the default invocation
    #[command(flatten)]
    pub report: ReportArgs,

    /// Subcommand to execute (omit to run the report)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options for the default report invocation.
#[derive(Args)]
pub struct ReportArgs {
    /// User to report on (defaults to the authenticated user)
    #[arg(long, short = 'u')]
    pub user: Option<String>,

    /// Reporting cadence
    #[arg(long, short = 'c', value_enum)]
    pub cadence: Option<Cadence>,

    /// Window start (YYYY-MM-DD or RFC3339), overrides the cadence
    #[arg(long)]
    pub since: Option<String>,

    /// Window end (YYYY-MM-DD or RFC3339), defaults to now
    #[arg(long)]
    pub until: Option<String>,

    /// Break out long-running work into its own sections
    #[arg(long)]
    pub detailed: bool,

    /// Search page size (1-100)
    #[arg(long)]
    pub per_page: Option<u8>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completion scripts
    #[command(after_long_help = COMPLETION_HELP)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_parses() {
        let cli = Cli::try_parse_from(["retro"]).expect("bare invocation should parse");
        assert!(cli.command.is_none());
        assert!(cli.report.user.is_none());
        assert!(cli.report.cadence.is_none());
    }

    #[test]
    fn report_flags_parse() {
        let cli = Cli::try_parse_from([
            "retro",
            "--user",
            "octocat",
            "--cadence",
            "weekly",
            "--detailed",
            "--per-page",
            "30",
        ])
        .expect("report flags should parse");

        assert_eq!(cli.report.user.as_deref(), Some("octocat"));
        assert_eq!(cli.report.cadence, Some(Cadence::Weekly));
        assert!(cli.report.detailed);
        assert_eq!(cli.report.per_page, Some(30));
    }

    #[test]
    fn unknown_cadence_is_rejected() {
        let result = Cli::try_parse_from(["retro", "--cadence", "fortnightly"]);
        assert!(result.is_err());
    }

    #[test]
    fn completion_subcommand_parses() {
        let cli = Cli::try_parse_from(["retro", "completion", "bash"])
            .expect("completion should parse");
        assert!(matches!(
            cli.command,
            Some(Commands::Completion { shell: Shell::Bash })
        ));
    }

    #[test]
    fn bare_dates_parse_to_day_bounds() {
        let since = parse_since("2026-08-01").expect("since should parse");
        assert_eq!(since, "2026-08-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());

        let until = parse_until("2026-08-15").expect("until should parse");
        assert_eq!(until, "2026-08-15T23:59:59Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn rfc3339_bounds_pass_through() {
        let since = parse_since("2026-08-01T12:30:00Z").expect("rfc3339 should parse");
        assert_eq!(since, "2026-08-01T12:30:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert!(parse_since("last tuesday").is_err());
        assert!(parse_until("2026-13-40").is_err());
    }

    #[test]
    fn cadence_spans_cover_the_calendar() {
        assert_eq!(Cadence::Daily.span(), chrono::Duration::days(1));
        assert_eq!(Cadence::Weekly.span(), chrono::Duration::days(7));
        assert_eq!(Cadence::Biweekly.span(), chrono::Duration::days(14));
        assert_eq!(Cadence::Monthly.span(), chrono::Duration::days(30));
        assert_eq!(Cadence::Quarterly.span(), chrono::Duration::days(91));
        assert_eq!(Cadence::Yearly.span(), chrono::Duration::days(365));
        assert_eq!(Cadence::Biweekly.label(), "biweekly");
    }
}
