// SPDX-License-Identifier: Apache-2.0

//! Output rendering for CLI results.
//!
//! Centralizes all output formatting logic, supporting text, JSON, YAML, and
//! markdown formats. Command handlers return data; this module handles
//! presentation.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::{OutputContext, OutputFormat};

mod report;

/// Trait for types that can be rendered in multiple output formats.
pub trait Renderable: Serialize {
    /// Render as human-readable text to the given writer.
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()>;

    /// Render as markdown. Defaults to the text rendering.
    fn render_markdown(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        self.render_text(w, ctx)
    }
}

/// Renders a result in the format the context asks for.
///
/// JSON and YAML go through serde; text and markdown delegate to the
/// [`Renderable`] implementation.
pub fn render<T: Renderable>(result: &T, ctx: &OutputContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(result).context("Failed to serialize to JSON")?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_saphyr::to_string(result).context("Failed to serialize to YAML")?;
            println!("{yaml}");
        }
        OutputFormat::Markdown => {
            result
                .render_markdown(&mut io::stdout(), ctx)
                .context("Failed to render markdown")?;
        }
        OutputFormat::Text => {
            result
                .render_text(&mut io::stdout(), ctx)
                .context("Failed to render text")?;
        }
    }
    Ok(())
}
