// SPDX-License-Identifier: Apache-2.0

//! Rendering for the activity report.
//!
//! Text output paints row fields with [`console`] styles; markdown output is
//! the same layout unstyled, so it pastes cleanly into an issue or a standup
//! note.

use std::fmt::Write as _;
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use console::style;
use retro_core::{Category, Item, ItemKind, ReactionCounts, Report, Status, format_duration};

use super::Renderable;
use crate::cli::OutputContext;

impl Renderable for Report {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(
            w,
            "# {} report for {}: {}",
            self.cadence,
            self.user,
            self.window.start_date()
        )?;
        writeln!(w)?;

        if self.is_empty() {
            writeln!(w, "{}", style("No activity found in this window.").yellow())?;
            return Ok(());
        }

        for category in &self.categories {
            render_section(w, category, self.generated_at, true)?;
        }
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(
            w,
            "# {} report for {}: {}",
            self.cadence,
            self.user,
            self.window.start_date()
        )?;
        writeln!(w)?;

        if self.is_empty() {
            writeln!(w, "No activity found in this window.")?;
            return Ok(());
        }

        for category in &self.categories {
            render_section(w, category, self.generated_at, false)?;
        }
        Ok(())
    }
}

/// One aligned report row, measured before styling so ANSI escapes never
/// count toward column widths.
struct Row {
    kind: &'static str,
    id: String,
    status: Option<Status>,
    duration: String,
    title: String,
    reactions: String,
}

impl Row {
    fn status_label(&self) -> &'static str {
        self.status.map_or("", Status::label)
    }
}

fn build_row(item: &Item, now: DateTime<Utc>) -> Row {
    Row {
        kind: match item.kind {
            ItemKind::PullRequest => "PR",
            ItemKind::Issue => "IS",
        },
        id: format!("#{}", item.number),
        status: item.status(),
        duration: format_duration(item.elapsed(now)),
        title: item.title.clone(),
        reactions: format_reactions(&item.reactions),
    }
}

/// Writes one category as a `##` section. Empty categories are skipped so a
/// quiet window stays short.
fn render_section(
    w: &mut dyn Write,
    category: &Category,
    now: DateTime<Utc>,
    styled: bool,
) -> io::Result<()> {
    if category.items.is_empty() {
        return Ok(());
    }

    writeln!(w, "## {}", category.label)?;
    writeln!(w)?;

    let rows: Vec<Row> = category
        .items
        .iter()
        .map(|item| build_row(item, now))
        .collect();
    let id_width = rows.iter().map(|row| row.id.len()).max().unwrap_or(0);
    let status_width = rows
        .iter()
        .map(|row| row.status_label().len())
        .max()
        .unwrap_or(0);
    let duration_width = rows.iter().map(|row| row.duration.len()).max().unwrap_or(0);

    for row in &rows {
        writeln!(
            w,
            "{}",
            format_row(row, id_width, status_width, duration_width, styled)
        )?;
    }
    writeln!(w)?;
    Ok(())
}

fn format_row(
    row: &Row,
    id_width: usize,
    status_width: usize,
    duration_width: usize,
    styled: bool,
) -> String {
    let id = format!("{:>id_width$}", row.id);
    let status = format!("{:<status_width$}", row.status_label());
    let duration = format!("{:<duration_width$}", row.duration);

    let (kind, id, status) = if styled {
        (
            style(row.kind).bold().to_string(),
            style(id).bold().to_string(),
            paint_status(row.status, &status),
        )
    } else {
        (row.kind.to_string(), id, status)
    };

    let mut line = format!("{kind} {id} {status} {duration} - {}", row.title);
    if !row.reactions.is_empty() {
        let _ = write!(line, " ({})", row.reactions);
    }
    line
}

fn paint_status(status: Option<Status>, padded: &str) -> String {
    match status {
        Some(Status::Merged) => style(padded).magenta().to_string(),
        Some(Status::Active) => style(padded).yellow().to_string(),
        Some(Status::Done) => style(padded).green().to_string(),
        Some(Status::Dropped) => style(padded).dim().to_string(),
        Some(Status::Closed) => style(padded).red().to_string(),
        None => padded.to_string(),
    }
}

/// Space-joined `count emoji` pairs in a fixed order, empty when the item
/// drew no reactions.
fn format_reactions(reactions: &ReactionCounts) -> String {
    let pairs = [
        (reactions.heart, "❤️"),
        (reactions.eyes, "👀"),
        (reactions.plus_one, "👍"),
        (reactions.minus_one, "👎"),
        (reactions.rocket, "🚀"),
        (reactions.hooray, "🎉"),
        (reactions.laugh, "😃"),
        (reactions.confused, "😕"),
    ];
    pairs
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, emoji)| format!("{count} {emoji}"))
        .collect::<Vec<_>>()
        .join(" ")
}
