pub mod dispatcher;
pub mod navigation;
pub mod secret;

pub use dispatcher::{Dispatcher, Outcome, Shell};
pub use navigation::Direction;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key press reduced to what the dispatcher cares about: an identifier
/// plus the three modifier booleans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,
    Char(char),
    Other,
}

impl Key {
    /// Lowercase identifier token used for sequence matching.
    pub fn token(self) -> String {
        match self {
            Key::Up => "arrowup".to_string(),
            Key::Down => "arrowdown".to_string(),
            Key::Left => "arrowleft".to_string(),
            Key::Right => "arrowright".to_string(),
            Key::Enter => "enter".to_string(),
            Key::Escape => "escape".to_string(),
            Key::Backspace => "backspace".to_string(),
            Key::Tab => "tab".to_string(),
            Key::Delete => "delete".to_string(),
            Key::Char(ch) => ch.to_lowercase().collect(),
            Key::Other => String::new(),
        }
    }
}

impl KeyPress {
    pub fn from_event(event: &KeyEvent) -> Self {
        let key = match event.code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::Delete => Key::Delete,
            KeyCode::Char(ch) => Key::Char(ch),
            _ => Key::Other,
        };
        Self {
            key,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
            shift: event.modifiers.contains(KeyModifiers::SHIFT),
        }
    }

    /// A press with no modifiers held.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }
}
