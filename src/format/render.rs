/// Plain-text page rendering, one value per line or through a template.
use std::io::{self, Write};

use super::template::{FormatError, Template};
use crate::catalog::Page;

/// Row separator for template-less output.
pub const ROW_SEPARATOR: &str = "----";

/// How a render pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Every row was written.
    Complete,
    /// A template error was printed in place of a row; nothing after it was written.
    Aborted(FormatError),
}

/// Write `page` as text.
///
/// Without a template (or with an empty one) every cell goes on its own line,
/// as `NAME = value` when the column is labelled, with [`ROW_SEPARATOR`]
/// between rows. With a template each row is substituted into it and a
/// newline is added if the template lacks one.
///
/// # Errors
///
/// Returns an I/O error if writing to `out` fails. Template problems are not
/// errors here; they are printed and reported as [`Rendered::Aborted`].
pub fn render_text<W: Write>(
    page: &Page,
    template: Option<&str>,
    out: &mut W,
) -> io::Result<Rendered> {
    match template.filter(|t| !t.is_empty()) {
        None => {
            render_lines(page, out)?;
            Ok(Rendered::Complete)
        }
        Some(text) => render_template(page, text, out),
    }
}

fn render_lines<W: Write>(page: &Page, out: &mut W) -> io::Result<()> {
    for row in 0..page.row_count() {
        if row > 0 {
            writeln!(out, "{ROW_SEPARATOR}")?;
        }
        for column in &page.columns {
            let value = column.values.get(row).map_or("", String::as_str);
            match &column.name {
                Some(name) => writeln!(out, "{name} = {value}")?,
                None => writeln!(out, "{value}")?,
            }
        }
    }
    Ok(())
}

fn render_template<W: Write>(page: &Page, text: &str, out: &mut W) -> io::Result<Rendered> {
    if page.is_empty() {
        return Ok(Rendered::Complete);
    }

    let mut template = match Template::parse(text) {
        Ok(t) => t,
        Err(err) => return abort(err, out),
    };
    template.ensure_trailing_newline();

    for row in 0..page.row_count() {
        match template.render(&page.row(row)) {
            Ok(line) => out.write_all(line.as_bytes())?,
            Err(err) => return abort(err, out),
        }
    }
    Ok(Rendered::Complete)
}

fn abort<W: Write>(err: FormatError, out: &mut W) -> io::Result<Rendered> {
    writeln!(out, "{err}")?;
    Ok(Rendered::Aborted(err))
}
