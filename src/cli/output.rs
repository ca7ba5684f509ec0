/// Output formatting: text, JSON, NDJSON and table renderings of result pages.
use std::io::{self, Write};
use std::time::Instant;

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;
use tracing::debug;

use super::args::OutputFormat;
use crate::catalog::Page;
use crate::format::{Rendered, render_text};
use crate::types::{ErrorOutput, PageOutput};

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
}

impl OutputCtx {
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Start a named timer that logs its elapsed time at debug level on drop.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> Timer {
        Timer::new(label)
    }

    /// Whether errors and results are machine-readable.
    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json | OutputFormat::Ndjson)
    }
}

// --- Result pages ---

/// Write one result page to `out` in the context's format.
///
/// `template` only applies to text output.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_page<W: Write>(
    page: &Page,
    template: Option<&str>,
    ctx: &OutputCtx,
    out: &mut W,
) -> io::Result<Rendered> {
    match ctx.format {
        OutputFormat::Text => return render_text(page, template, out),
        OutputFormat::Json => write_json(out, &PageOutput::from(page))?,
        OutputFormat::Ndjson => {
            for row in 0..page.row_count() {
                write_compact_json(out, &page.row(row))?;
            }
        }
        OutputFormat::Table => write_page_table(page, out)?,
    }
    Ok(Rendered::Complete)
}

fn write_page_table<W: Write>(page: &Page, out: &mut W) -> io::Result<()> {
    if page.is_empty() {
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(page.headers());
    for row in 0..page.row_count() {
        table.add_row(page.row(row));
    }
    writeln!(out, "{table}")
}

// --- Attribute names ---

/// Write the attribute name list to `out`.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_attrs<W: Write>(names: &[&str], ctx: &OutputCtx, out: &mut W) -> io::Result<()> {
    match ctx.format {
        OutputFormat::Json => write_json(out, names),
        OutputFormat::Ndjson => {
            for name in names {
                write_compact_json(out, name)?;
            }
            Ok(())
        }
        OutputFormat::Text | OutputFormat::Table => {
            for name in names {
                writeln!(out, "{name}")?;
            }
            Ok(())
        }
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, ctx: &OutputCtx) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    if ctx.is_json() {
        let s = serde_json::to_string_pretty(err).unwrap_or_default();
        let _ = writeln!(out, "{s}");
    } else {
        let _ = writeln!(out, "Error: {}", err.error.message);
    }
}

// --- Timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`].
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        debug!(label = self.label, "{ms:.2}ms");
    }
}

// --- Generic JSON helpers ---

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::from)?;
    writeln!(out)
}

fn write_compact_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value).map_err(io::Error::from)?;
    writeln!(out)
}
