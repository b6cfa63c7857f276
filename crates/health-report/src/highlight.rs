#![forbid(unsafe_code)]

//! Match highlighting as tagged spans.
//!
//! The highlighter never produces escape codes. It splits text into [`Span`]s
//! tagged with a [`SpanKind`]; a renderer decides how each kind looks by
//! implementing [`Painter`] (or by mapping spans onto its own styled text).
//! Concatenating the spans of a [`Highlighted`] always gives back the input.
//!
//! Matching is case-insensitive. Positions are found on the lowercased text
//! and mapped back to the original characters, so the emitted match keeps the
//! original casing even when lowercasing changes the byte length (`İ`, `ẞ`).
//!
//! # Example
//! ```
//! use health_report::{highlight_substring, SpanKind};
//!
//! let h = highlight_substring("Gofmt", "FMT");
//! let spans: Vec<(SpanKind, &str)> = h
//!     .spans()
//!     .iter()
//!     .map(|span| (span.kind, span.text.as_str()))
//!     .collect();
//! assert_eq!(spans, [(SpanKind::Plain, "Go"), (SpanKind::Matched, "fmt")]);
//! ```

use std::fmt;
use std::ops::Range;

use smallvec::SmallVec;

use crate::tools::{FAIL_SYMBOL, NONE_PLACEHOLDER, PASS_SYMBOL};

/// What a span of highlighted text represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Text with no special meaning.
    Plain,
    /// Text matching the search query.
    Matched,
    /// The pass status symbol.
    Pass,
    /// The fail status symbol.
    Fail,
}

/// A run of text with a single [`SpanKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

impl Span {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Paints spans into an output string.
///
/// Implementations carry their own styles; the highlighter only decides where
/// the spans are.
pub trait Painter {
    fn paint(&self, kind: SpanKind, text: &str, out: &mut String);
}

impl<F> Painter for F
where
    F: Fn(SpanKind, &str, &mut String),
{
    fn paint(&self, kind: SpanKind, text: &str, out: &mut String) {
        self(kind, text, out)
    }
}

/// Painter that drops all emphasis.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPainter;

impl Painter for PlainPainter {
    fn paint(&self, _kind: SpanKind, text: &str, out: &mut String) {
        out.push_str(text);
    }
}

/// Text split into tagged spans.
///
/// Spans are never empty and adjacent spans never share a kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlighted {
    spans: Vec<Span>,
}

impl Highlighted {
    /// Text without any highlight.
    pub fn plain(text: &str) -> Self {
        let mut h = Self::default();
        h.push(SpanKind::Plain, text);
        h
    }

    /// Append `text` as `kind`, merging with the last span when kinds agree.
    pub fn push(&mut self, kind: SpanKind, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(text),
            _ => self.spans.push(Span::new(kind, text)),
        }
    }

    /// Append all spans of `other`.
    pub fn append(&mut self, other: Highlighted) {
        for span in other.spans {
            self.push(span.kind, &span.text);
        }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns `true` if any span is [`SpanKind::Matched`].
    pub fn has_match(&self) -> bool {
        self.spans.iter().any(|span| span.kind == SpanKind::Matched)
    }

    /// The text with all tags dropped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Render every span through `painter`.
    pub fn paint<P: Painter + ?Sized>(&self, painter: &P) -> String {
        let mut out = String::new();
        for span in &self.spans {
            painter.paint(span.kind, &span.text, &mut out);
        }
        out
    }
}

impl fmt::Display for Highlighted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            f.write_str(&span.text)?;
        }
        Ok(())
    }
}

/// Case-fold one character: lowercase it, with final `ς` folded to `σ`.
fn fold_char(ch: char) -> impl Iterator<Item = char> {
    ch.to_lowercase()
        .map(|lower| if lower == 'ς' { 'σ' } else { lower })
}

/// Case-fold `text` one character at a time.
///
/// Unlike [`str::to_lowercase`] this ignores context, so every form of sigma
/// folds to `σ`. Matching and highlighting both fold with this.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(fold_char).collect()
}

/// Byte range of the first case-insensitive occurrence of `needle` in `haystack`.
///
/// The range always lies on character boundaries of `haystack`. Returns
/// `None` for an empty needle.
#[must_use]
pub fn find_case_insensitive(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    let needle = fold_case(needle);

    // For every byte of the lowered text, the original char it came from.
    let mut folded = String::with_capacity(haystack.len());
    let mut start_map: Vec<usize> = Vec::with_capacity(haystack.len());
    let mut end_map: Vec<usize> = Vec::with_capacity(haystack.len());
    for (offset, ch) in haystack.char_indices() {
        let end = offset + ch.len_utf8();
        for lower in fold_char(ch) {
            for _ in 0..lower.len_utf8() {
                start_map.push(offset);
                end_map.push(end);
            }
            folded.push(lower);
        }
    }

    let found = folded.find(&needle)?;
    let start = start_map[found];
    let end = end_map[found + needle.len() - 1];
    Some(start..end)
}

/// Split `text` around the first case-insensitive occurrence of `query`.
///
/// Returns `(before, matched, after)`, where `matched` is the original slice
/// of `text`.
#[must_use]
pub fn split_first_match<'a>(text: &'a str, query: &str) -> Option<(&'a str, &'a str, &'a str)> {
    let range = find_case_insensitive(text, query)?;
    Some((&text[..range.start], &text[range.clone()], &text[range.end..]))
}

/// Mark the first case-insensitive occurrence of `query` in `text`.
///
/// An empty query or no occurrence leaves the text as a single plain span.
#[must_use]
pub fn highlight_substring(text: &str, query: &str) -> Highlighted {
    let Some((before, matched, after)) = split_first_match(text, query) else {
        return Highlighted::plain(text);
    };
    let mut h = Highlighted::default();
    h.push(SpanKind::Plain, before);
    h.push(SpanKind::Matched, matched);
    h.push(SpanKind::Plain, after);
    h
}

/// A space- or tab-delimited word of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    /// Code point index of the first character.
    pub start: usize,
    /// Code point index one past the last character.
    pub end: usize,
    byte_offset: usize,
}

/// Split `line` into words on `' '` and `'\t'` only.
///
/// Other whitespace (such as no-break space) is part of a word.
pub fn words(line: &str) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    let mut chars = 0;

    for (offset, ch) in line.char_indices() {
        if ch == ' ' || ch == '\t' {
            if let Some((byte_offset, start)) = current.take() {
                words.push(Word {
                    text: &line[byte_offset..offset],
                    start,
                    end: chars,
                    byte_offset,
                });
            }
        } else if current.is_none() {
            current = Some((offset, chars));
        }
        chars += 1;
    }
    if let Some((byte_offset, start)) = current {
        words.push(Word {
            text: &line[byte_offset..],
            start,
            end: chars,
            byte_offset,
        });
    }
    words
}

/// Highlight every word of `line` that contains one of `queries`.
///
/// Each word is checked against the queries in order and highlighted with the
/// first one it contains; the `None` placeholder is never highlighted.
/// Separators and all other words are kept verbatim.
#[must_use]
pub fn highlight_words<S: AsRef<str>>(line: &str, queries: &[S]) -> Highlighted {
    let queries: SmallVec<[&str; 4]> = queries
        .iter()
        .map(|query| query.as_ref())
        .filter(|query| !query.is_empty())
        .collect();
    if queries.is_empty() {
        return Highlighted::plain(line);
    }

    let mut out = Highlighted::default();
    let mut cursor = 0;
    for word in words(line) {
        if word.text == NONE_PLACEHOLDER {
            continue;
        }
        let Some(query) = queries
            .iter()
            .find(|query| find_case_insensitive(word.text, query).is_some())
        else {
            continue;
        };
        out.push(SpanKind::Plain, &line[cursor..word.byte_offset]);
        out.append(highlight_substring(word.text, query));
        cursor = word.byte_offset + word.text.len();
    }
    out.push(SpanKind::Plain, &line[cursor..]);
    out
}

fn status_kind(symbol: &str) -> Option<SpanKind> {
    match symbol {
        PASS_SYMBOL => Some(SpanKind::Pass),
        FAIL_SYMBOL => Some(SpanKind::Fail),
        _ => None,
    }
}

/// Tag the status symbols inside plain spans as [`SpanKind::Pass`] or
/// [`SpanKind::Fail`]. Matched spans are kept whole.
#[must_use]
pub fn mark_status_symbols(highlighted: Highlighted) -> Highlighted {
    let mut out = Highlighted::default();
    for span in highlighted.spans {
        if span.kind != SpanKind::Plain {
            out.push(span.kind, &span.text);
            continue;
        }
        let text = span.text.as_str();
        let mut plain_start = 0;
        for (offset, ch) in text.char_indices() {
            let symbol = &text[offset..offset + ch.len_utf8()];
            if let Some(kind) = status_kind(symbol) {
                out.push(SpanKind::Plain, &text[plain_start..offset]);
                out.push(kind, symbol);
                plain_start = offset + symbol.len();
            }
        }
        out.push(SpanKind::Plain, &text[plain_start..]);
    }
    out
}
