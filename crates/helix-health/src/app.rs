#![forbid(unsafe_code)]

//! Interactive viewer.
//!
//! Layout, top to bottom: search line, blank, preamble, blank, column
//! header, blank, the scrolling rows viewport and a one-line footer.
//!
//! Keys: typing edits the search, `Up`/`Down`/`Ctrl+P`/`Ctrl+N` scroll a
//! line, `PgUp`/`PgDn` a page, `Home`/`End` jump. `Esc` and `Ctrl+C` quit;
//! `q` quits while the search is empty.

use std::cell::Cell;

use ftui_core::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseEvent, MouseEventKind};
use ftui_core::geometry::Rect;
use ftui_layout::{Constraint, Flex};
use ftui_render::frame::Frame;
use ftui_runtime::{Cmd, Model};
use ftui_text::{Line, Span, Text};
use ftui_widgets::Widget;
use ftui_widgets::input::TextInput;
use ftui_widgets::paragraph::Paragraph;
use health_report::Report;
use tracing::{debug, info};

use crate::layout::DisplayLine;
use crate::msg::Msg;
use crate::state::ViewState;
use crate::theme;

const SEARCH_LABEL: &str = "Search: ";
const PLACEHOLDER: &str = "Type to search...";
const INPUT_WIDTH: u16 = 50;
/// Lines scrolled per mouse wheel step.
const WHEEL_LINES: usize = 3;
/// Rows viewport height assumed before the first render.
const DEFAULT_VIEWPORT: usize = 20;
/// Fixed lines around the preamble: search, three blanks, header, footer.
const CHROME_LINES: usize = 6;

pub struct Viewer {
    state: ViewState,
    /// Rows viewport height from the last render or resize.
    viewport: Cell<usize>,
}

impl Viewer {
    pub fn new(report: Report) -> Self {
        Self {
            state: ViewState::new(report),
            viewport: Cell::new(DEFAULT_VIEWPORT),
        }
    }

    /// Rows viewport height for a terminal `height` lines tall.
    fn viewport_for(&self, height: u16) -> usize {
        let chrome = CHROME_LINES + self.state.report().preamble_lines.len();
        usize::from(height).saturating_sub(chrome)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Cmd<Msg> {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return Cmd::None;
        }
        let ctrl = key.modifiers.contains(Modifiers::CTRL);
        let viewport = self.viewport.get();

        match key.code {
            KeyCode::Char('c' | 'C') if ctrl => return self.quit("ctrl+c"),
            KeyCode::Escape => return self.quit("escape"),
            KeyCode::Char('q') if !ctrl && self.state.query().is_empty() => {
                return self.quit("q");
            }
            KeyCode::Char('p' | 'P') if ctrl => self.state.scroll_up(1),
            KeyCode::Char('n' | 'N') if ctrl => self.state.scroll_down(1, viewport),
            KeyCode::Up => self.state.scroll_up(1),
            KeyCode::Down => self.state.scroll_down(1, viewport),
            KeyCode::PageUp => self.state.scroll_up(viewport.max(1)),
            KeyCode::PageDown => self.state.scroll_down(viewport.max(1), viewport),
            KeyCode::Home => self.state.scroll_to_top(),
            KeyCode::End => self.state.scroll_to_bottom(viewport),
            KeyCode::Backspace => {
                self.state.pop();
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(Modifiers::ALT) => {
                self.state.push_str(c.encode_utf8(&mut [0; 4]));
            }
            _ => {}
        }
        Cmd::None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Cmd<Msg> {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.state.scroll_up(WHEEL_LINES),
            MouseEventKind::ScrollDown => {
                self.state.scroll_down(WHEEL_LINES, self.viewport.get());
            }
            _ => {}
        }
        Cmd::None
    }

    fn quit(&self, key: &str) -> Cmd<Msg> {
        info!(key, query = self.state.query(), "quit");
        Cmd::Quit
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let cols = Flex::horizontal()
            .constraints([
                Constraint::Fixed(1),
                Constraint::Fixed(SEARCH_LABEL.len() as u16),
                Constraint::Fixed(INPUT_WIDTH),
                Constraint::Fill,
            ])
            .split(area);

        Paragraph::new(SEARCH_LABEL)
            .style(theme::search_label())
            .render(cols[1], frame);

        let input_area = cols[2];
        if input_area.is_empty() {
            return;
        }
        let input = TextInput::new()
            .with_value(self.state.query())
            .with_placeholder(PLACEHOLDER)
            .with_placeholder_style(theme::footer())
            .with_focused(true);
        input.render(input_area, frame);
        frame.set_cursor(Some(input.cursor_position(input_area)));
    }

    fn render_preamble(&self, frame: &mut Frame, area: Rect) {
        let lines = self
            .state
            .report()
            .preamble_lines
            .iter()
            .map(|line| Line::raw(format!(" {line}")));
        Paragraph::new(Text::from_lines(lines)).render(area, frame);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Line::from_spans([
            Span::raw(" "),
            Span::styled(self.state.report().header.as_str(), theme::header()),
        ]);
        Paragraph::new(header).render(area, frame);
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect, viewport: usize) {
        if self.state.lines().is_empty() {
            Paragraph::new(" No matches found")
                .style(theme::footer())
                .render(area, frame);
            return;
        }

        let rule = "─".repeat(usize::from(area.width));
        let lines = self
            .state
            .visible_lines(viewport)
            .iter()
            .map(|line| match line {
                DisplayLine::Separator => Line::styled(rule.clone(), theme::separator()),
                DisplayLine::Content(highlighted) => {
                    let mut spans = vec![Span::raw(" ")];
                    spans.extend(
                        highlighted
                            .spans()
                            .iter()
                            .map(|span| Span::styled(span.text.as_str(), theme::span(span.kind))),
                    );
                    Line::from_spans(spans)
                }
            });
        Paragraph::new(Text::from_lines(lines)).render(area, frame);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, viewport: usize) {
        let footer = format!(
            " {} matches | {}% | ↑↓ scroll | q/Esc to quit",
            self.state.match_count(),
            self.state.scroll_percent(viewport)
        );
        Paragraph::new(footer)
            .style(theme::footer())
            .render(area, frame);
    }
}

impl Model for Viewer {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Self::Message> {
        debug!(
            rows = self.state.match_count(),
            lines = self.state.lines().len(),
            "viewer started"
        );
        Cmd::None
    }

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::Mouse(mouse) => self.handle_mouse(mouse),
            Msg::Paste(text) => {
                self.state.push_str(&text);
                Cmd::None
            }
            Msg::Resize { width, height } => {
                let viewport = self.viewport_for(height);
                debug!(width, height, viewport, "resized");
                self.viewport.set(viewport);
                self.state.clamp(viewport);
                Cmd::None
            }
            Msg::Noop => Cmd::None,
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = Rect::from_size(frame.buffer.width(), frame.buffer.height());
        if area.is_empty() {
            return;
        }

        let preamble = u16::try_from(self.state.report().preamble_lines.len()).unwrap_or(u16::MAX);
        let chunks = Flex::vertical()
            .constraints([
                Constraint::Fixed(1),
                Constraint::Fixed(1),
                Constraint::Fixed(preamble),
                Constraint::Fixed(1),
                Constraint::Fixed(1),
                Constraint::Fixed(1),
                Constraint::Fill,
                Constraint::Fixed(1),
            ])
            .split(area);

        let viewport = usize::from(chunks[6].height);
        self.viewport.set(viewport);

        self.render_search(frame, chunks[0]);
        self.render_preamble(frame, chunks[2]);
        self.render_header(frame, chunks[4]);
        self.render_rows(frame, chunks[6], viewport);
        self.render_footer(frame, chunks[7], viewport);
    }
}
