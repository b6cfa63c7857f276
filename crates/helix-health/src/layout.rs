//! Turns filtered rows into the lines both outputs display.

use health_report::{Highlighted, Row, highlight_words, mark_status_symbols};

/// One displayed line of the row section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayLine {
    /// A rule between two rows, drawn as wide as the output.
    Separator,
    /// A row line with its highlights.
    Content(Highlighted),
}

impl DisplayLine {
    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }
}

/// Lay out `rows` for display.
///
/// While `searching`, rows are separated by [`DisplayLine::Separator`] and
/// every word containing one of `terms` is highlighted. Status symbols are
/// always tagged.
pub fn layout_rows<S: AsRef<str>>(rows: &[&Row], terms: &[S], searching: bool) -> Vec<DisplayLine> {
    let capacity = rows.iter().map(|row| row.lines.len() + 1).sum();
    let mut out = Vec::with_capacity(capacity);
    for (i, row) in rows.iter().enumerate() {
        if searching && i > 0 {
            out.push(DisplayLine::Separator);
        }
        for line in &row.lines {
            let highlighted = if searching {
                highlight_words(line, terms)
            } else {
                Highlighted::plain(line)
            };
            out.push(DisplayLine::Content(mark_status_symbols(highlighted)));
        }
    }
    out
}
