//! Printed (non-interactive) output.

use std::io::{self, Write};

use health_report::Report;
use tracing::debug;

use crate::layout::{DisplayLine, layout_rows};
use crate::theme::{AnsiPainter, ansi};

/// Separator width when the terminal size is unknown.
pub const FALLBACK_WIDTH: usize = 80;

/// How printed output looks.
#[derive(Debug, Clone, Copy)]
pub struct PrintStyle {
    pub color: bool,
    /// Separator width in cells.
    pub width: usize,
}

/// Width of the terminal, or [`FALLBACK_WIDTH`] when it cannot be read.
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => usize::from(cols),
        _ => FALLBACK_WIDTH,
    }
}

/// Print the preamble, the header and the rows matching any of `terms`.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &Report,
    terms: &[String],
    style: PrintStyle,
) -> io::Result<()> {
    let painter = AnsiPainter { color: style.color };

    for line in &report.preamble_lines {
        writeln!(out, " {line}")?;
    }
    writeln!(out)?;
    writeln!(out, " {}", painter.colored(&report.header, ansi::HEADER, true))?;
    writeln!(out)?;

    let rows = report.filter(terms);
    debug!(terms = ?terms, rows = rows.len(), "printing matches");
    if rows.is_empty() {
        writeln!(out, " No matches found")?;
        return Ok(());
    }

    let rule = "─".repeat(style.width);
    for line in layout_rows(&rows, terms, true) {
        match line {
            DisplayLine::Separator => {
                writeln!(out, "{}", painter.colored(&rule, ansi::SEPARATOR, false))?;
            }
            DisplayLine::Content(h) => writeln!(out, " {}", h.paint(&painter))?,
        }
    }
    Ok(())
}

/// Print the report as pretty JSON, keeping only rows matching `terms`.
///
/// Without terms every row is kept.
pub fn write_json<W: Write>(out: &mut W, report: &Report, terms: &[String]) -> io::Result<()> {
    let filtered = Report {
        preamble_lines: report.preamble_lines.clone(),
        header: report.header.clone(),
        rows: report.filter(terms).into_iter().cloned().collect(),
    };
    let json = serde_json::to_string_pretty(&filtered).map_err(io::Error::other)?;
    writeln!(out, "{json}")
}
