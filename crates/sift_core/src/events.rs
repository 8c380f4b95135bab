//! Keyboard events
//!
//! A [`KeyEvent`] is handed to each handler in turn. Handlers record whether the
//! default action was suppressed and whether the event should keep bubbling, the
//! same two flags a browser exposes through `preventDefault` / `stopPropagation`.

/// Logical key identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Tab,
    Escape,
    /// A printable character
    Character(char),
    /// Any other named key (e.g. "Home", "F5")
    Named(String),
}

impl Key {
    /// Parse a key from its DOM `key` name
    ///
    /// Single-character names become [`Key::Character`]; unrecognized names are
    /// kept verbatim as [`Key::Named`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Named(name.to_string()),
                }
            }
        }
    }
}

/// A key press travelling through the handler chain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    key: Key,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Suppress the platform's default action for this key
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop the event from reaching ancestor handlers
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        KeyEvent::new(key)
    }
}
