#![forbid(unsafe_code)]

//! Report model and the `--health` text parser.
//!
//! The report has three parts separated by blank lines: a preamble of
//! configuration lines, a column header, and the language rows. A row starts
//! at an unindented line and owns every indented line after it.
//!
//! ```text
//! Config file: default
//! Language file: default
//!
//! Language  LSP              DAP   Formatter
//!
//! rust      ✓ rust-analyzer  ✓ lldb-dap  None
//! python    ✓ pylsp          None  ✘ black
//!           ✘ ruff
//! ```
//!
//! The preamble length differs between Helix versions, so the section
//! boundaries are found from the blank lines, not from fixed line numbers.

use tracing::{debug, trace};

use crate::matcher;
use crate::tools::extract_tools;

/// One logical record of the report (one language).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Row {
    /// First whitespace-delimited token of the first line.
    pub primary_key: String,
    /// The first line followed by its continuation lines, verbatim.
    pub lines: Vec<String>,
    /// `primary_key` followed by every tool name found on `lines`.
    pub search_terms: Vec<String>,
}

impl Row {
    /// Tool names of this row (the search terms after the primary key).
    pub fn tools(&self) -> &[String] {
        self.search_terms.get(1..).unwrap_or_default()
    }
}

/// The parsed `--health` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    /// Leading non-blank lines (config and log file locations).
    pub preamble_lines: Vec<String>,
    /// Column header line, empty if the report has none.
    pub header: String,
    /// Language rows in report order.
    pub rows: Vec<Row>,
}

impl Report {
    /// Returns `true` if the report has no preamble, header or rows.
    pub fn is_empty(&self) -> bool {
        self.preamble_lines.is_empty() && self.header.is_empty() && self.rows.is_empty()
    }

    /// Rows matching any of `queries`; see [`matcher::filter_rows`].
    pub fn filter<S: AsRef<str>>(&self, queries: &[S]) -> Vec<&Row> {
        matcher::filter_rows(&self.rows, queries)
    }

    /// Total number of row lines (without separators).
    pub fn line_count(&self) -> usize {
        self.rows.iter().map(|row| row.lines.len()).sum()
    }
}

#[inline]
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[inline]
fn starts_row(line: &str) -> bool {
    !line.is_empty() && !line.starts_with([' ', '\t'])
}

/// Row-section scanner state.
#[derive(Debug)]
enum RowState {
    NoOpenRow,
    RowOpen(Row),
}

impl RowState {
    /// Feed one line of the row section. Finished rows are pushed to `rows`.
    fn step(self, line: &str, rows: &mut Vec<Row>) -> Self {
        if starts_row(line) {
            if let RowState::RowOpen(row) = self {
                rows.push(row);
            }
            let Some(primary_key) = line.split_whitespace().next() else {
                trace!(line, "skipping row line without tokens");
                return RowState::NoOpenRow;
            };
            let mut search_terms = vec![primary_key.to_string()];
            search_terms.extend(extract_tools(line));
            return RowState::RowOpen(Row {
                primary_key: primary_key.to_string(),
                lines: vec![line.to_string()],
                search_terms,
            });
        }

        match self {
            RowState::RowOpen(mut row) if !line.is_empty() => {
                row.lines.push(line.to_string());
                row.search_terms.extend(extract_tools(line));
                RowState::RowOpen(row)
            }
            state => state,
        }
    }

    fn finish(self, rows: &mut Vec<Row>) {
        if let RowState::RowOpen(row) = self {
            rows.push(row);
        }
    }
}

/// Parse the raw `--health` output into a [`Report`].
///
/// Never fails: text that does not look like a report yields a report with
/// whatever sections could be found (possibly empty).
#[must_use]
pub fn parse(raw: &str) -> Report {
    let mut lines = raw
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .peekable();
    let mut report = Report::default();

    while let Some(line) = lines.next_if(|line| !is_blank(line)) {
        report.preamble_lines.push(line.to_string());
    }
    while lines.next_if(|line| is_blank(line)).is_some() {}
    if let Some(header) = lines.next() {
        report.header = header.to_string();
    }
    while lines.next_if(|line| is_blank(line)).is_some() {}

    let mut state = RowState::NoOpenRow;
    for line in lines {
        state = state.step(line, &mut report.rows);
    }
    state.finish(&mut report.rows);

    debug!(
        preamble = report.preamble_lines.len(),
        header = !report.header.is_empty(),
        rows = report.rows.len(),
        "parsed health report"
    );
    report
}
