use ftui_core::event::{Event, KeyEvent, MouseEvent};

#[derive(Debug)]
pub enum Msg {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Pasted text, typed into the search.
    Paste(String),
    Resize { width: u16, height: u16 },
    Noop,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => Msg::Key(key),
            Event::Mouse(mouse) => Msg::Mouse(mouse),
            Event::Paste(paste) => Msg::Paste(paste.text),
            Event::Resize { width, height } => Msg::Resize { width, height },
            _ => Msg::Noop,
        }
    }
}
