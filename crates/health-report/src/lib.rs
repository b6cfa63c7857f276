#![forbid(unsafe_code)]

//! Parsing and search for the Helix `--health` report.
//!
//! This crate turns the text printed by `hx --health` into structured rows and
//! provides the search primitives the viewer is built on:
//! - [`parse`] - raw report text into a [`Report`] of [`Row`]s
//! - [`extract_tools`] - tool names reported next to a status symbol
//! - [`matches`] / [`matches_any`] - case-insensitive row filtering
//! - [`highlight_substring`] / [`highlight_words`] - tagged [`Span`]s marking matches
//!
//! Everything here is pure: no I/O, no global state, no errors.
//!
//! # Example
//! ```
//! use health_report::{highlight_words, parse, SpanKind};
//!
//! let report = parse(
//!     "Config file: default\n\nLanguage  LSP\n\nrust  ✓ rust-analyzer\npython  ✘ pylsp\n",
//! );
//! assert_eq!(report.header, "Language  LSP");
//!
//! let rows = report.filter(&["analyzer"]);
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].primary_key, "rust");
//!
//! let line = highlight_words(&rows[0].lines[0], &["analyzer"]);
//! let matched: Vec<&str> = line
//!     .spans()
//!     .iter()
//!     .filter(|span| span.kind == SpanKind::Matched)
//!     .map(|span| span.text.as_str())
//!     .collect();
//! assert_eq!(matched, ["analyzer"]);
//! ```

pub mod highlight;
pub mod matcher;
pub mod report;
pub mod tools;

pub use highlight::{
    Highlighted, Painter, PlainPainter, Span, SpanKind, Word, find_case_insensitive, fold_case,
    highlight_substring, highlight_words, mark_status_symbols, split_first_match, words,
};
pub use matcher::{filter_rows, matches, matches_any};
pub use report::{Report, Row, parse};
pub use tools::{
    ELLIPSIS, FAIL_SYMBOL, NONE_PLACEHOLDER, PASS_SYMBOL, extract_tools, is_status_symbol,
};
