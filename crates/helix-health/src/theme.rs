//! Colours and styles for the viewer and for printed output.
//!
//! Both outputs use the same xterm palette entries: the viewer as RGB
//! [`Style`]s, printed output as 256-colour ANSI codes.

use crossterm::style::{Color, Stylize};
use ftui_render::cell::PackedRgba;
use ftui_style::Style;
use health_report::{Painter, SpanKind};

/// xterm palette indices.
pub mod ansi {
    pub const PASS: u8 = 2;
    pub const FAIL: u8 = 1;
    pub const MATCH: u8 = 11;
    pub const SEARCH_LABEL: u8 = 12;
    pub const HEADER: u8 = 14;
    pub const FOOTER: u8 = 240;
    pub const SEPARATOR: u8 = 235;
}

const PASS: PackedRgba = PackedRgba::rgb(0, 205, 0);
const FAIL: PackedRgba = PackedRgba::rgb(205, 0, 0);
const MATCH: PackedRgba = PackedRgba::rgb(255, 255, 0);
const SEARCH_LABEL: PackedRgba = PackedRgba::rgb(92, 92, 255);
const HEADER: PackedRgba = PackedRgba::rgb(0, 255, 255);
const FOOTER: PackedRgba = PackedRgba::rgb(88, 88, 88);
const SEPARATOR: PackedRgba = PackedRgba::rgb(38, 38, 38);

pub fn search_label() -> Style {
    Style::new().fg(SEARCH_LABEL).bold()
}

pub fn header() -> Style {
    Style::new().fg(HEADER).bold()
}

pub fn footer() -> Style {
    Style::new().fg(FOOTER)
}

pub fn separator() -> Style {
    Style::new().fg(SEPARATOR)
}

/// Style of a highlighted span in the viewer.
pub fn span(kind: SpanKind) -> Style {
    match kind {
        SpanKind::Plain => Style::new(),
        SpanKind::Matched => Style::new().fg(MATCH).bold(),
        SpanKind::Pass => Style::new().fg(PASS),
        SpanKind::Fail => Style::new().fg(FAIL),
    }
}

/// Paints spans with ANSI escapes, or verbatim when colour is off.
#[derive(Debug, Clone, Copy)]
pub struct AnsiPainter {
    pub color: bool,
}

impl AnsiPainter {
    /// `text` in `index` colour, bold if asked.
    pub fn colored(&self, text: &str, index: u8, bold: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = text.with(Color::AnsiValue(index));
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }
}

impl Painter for AnsiPainter {
    fn paint(&self, kind: SpanKind, text: &str, out: &mut String) {
        let painted = match kind {
            SpanKind::Plain => {
                out.push_str(text);
                return;
            }
            SpanKind::Matched => self.colored(text, ansi::MATCH, true),
            SpanKind::Pass => self.colored(text, ansi::PASS, false),
            SpanKind::Fail => self.colored(text, ansi::FAIL, false),
        };
        out.push_str(&painted);
    }
}
