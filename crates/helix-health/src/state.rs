//! Search and scroll state of the viewer, independent of rendering.

use health_report::{Report, Row, matches};
use tracing::debug;

use crate::layout::{DisplayLine, layout_rows};

/// Longest accepted query, in characters.
pub const MAX_QUERY_CHARS: usize = 156;

/// What the viewer shows: the query, the rows it keeps, their laid-out lines
/// and the scroll offset into those lines.
#[derive(Debug)]
pub struct ViewState {
    report: Report,
    query: String,
    /// Indices into `report.rows` of the rows shown.
    visible: Vec<usize>,
    lines: Vec<DisplayLine>,
    /// First displayed line.
    scroll: usize,
}

impl ViewState {
    pub fn new(report: Report) -> Self {
        let mut state = Self {
            report,
            query: String::new(),
            visible: Vec::new(),
            lines: Vec::new(),
            scroll: 0,
        };
        state.refilter();
        state
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// A non-empty query filters and highlights.
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Number of rows shown.
    pub fn match_count(&self) -> usize {
        self.visible.len()
    }

    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Replace the query. Returns `false` when it did not change.
    pub fn set_query(&mut self, query: &str) -> bool {
        let query: String = query.chars().take(MAX_QUERY_CHARS).collect();
        if query == self.query {
            return false;
        }
        self.query = query;
        self.refilter();
        true
    }

    /// Append typed text, up to [`MAX_QUERY_CHARS`].
    pub fn push_str(&mut self, text: &str) -> bool {
        let mut query = self.query.clone();
        query.extend(text.chars().filter(|c| !c.is_control()));
        self.set_query(&query)
    }

    /// Remove the last character.
    pub fn pop(&mut self) -> bool {
        let mut query = self.query.clone();
        query.pop().is_some() && self.set_query(&query)
    }

    fn refilter(&mut self) {
        let rows = &self.report.rows;
        self.visible = if self.query.is_empty() {
            (0..rows.len()).collect()
        } else {
            (0..rows.len())
                .filter(|&i| matches(&rows[i], &self.query))
                .collect()
        };
        let shown: Vec<&Row> = self.visible.iter().map(|&i| &rows[i]).collect();
        self.lines = layout_rows(&shown, &[self.query.as_str()], self.is_searching());
        self.scroll = 0;
        debug!(
            query = %self.query,
            rows = self.visible.len(),
            lines = self.lines.len(),
            "query changed"
        );
    }

    /// Largest scroll offset that still fills a `viewport` of that many lines.
    pub fn max_scroll(&self, viewport: usize) -> usize {
        self.lines.len().saturating_sub(viewport)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize, viewport: usize) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll(viewport));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self, viewport: usize) {
        self.scroll = self.max_scroll(viewport);
    }

    /// Clamp after the viewport changed size.
    pub fn clamp(&mut self, viewport: usize) {
        self.scroll = self.scroll.min(self.max_scroll(viewport));
    }

    /// Scroll position in percent; 100 when everything fits.
    pub fn scroll_percent(&self, viewport: usize) -> usize {
        let max = self.max_scroll(viewport);
        if max == 0 {
            return 100;
        }
        self.scroll.min(max) * 100 / max
    }

    /// The lines of a `viewport` starting at the current scroll offset.
    pub fn visible_lines(&self, viewport: usize) -> &[DisplayLine] {
        let start = self.scroll.min(self.max_scroll(viewport));
        let end = (start + viewport).min(self.lines.len());
        &self.lines[start..end]
    }
}
