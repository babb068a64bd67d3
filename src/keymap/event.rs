//! Adapter to convert raw platform key-down events to our Chord type

use super::chord::{Chord, KeyToken, Modifiers};

/// A raw key-down event as delivered by the platform
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    /// Platform key code (DOM `keyCode`)
    pub key_code: u32,
}

impl KeyEvent {
    pub const fn new(key_code: u32) -> Self {
        Self {
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
            key_code,
        }
    }

    pub const fn with_mods(key_code: u32, mods: Modifiers) -> Self {
        Self {
            ctrl: mods.ctrl(),
            alt: mods.alt(),
            shift: mods.shift(),
            meta: mods.meta(),
            key_code,
        }
    }

    pub const fn mods(&self) -> Modifiers {
        Modifiers::new(self.ctrl, self.alt, self.shift, self.meta)
    }
}

/// Convert a key-down event into the chord it would be written as in a binding table
///
/// Digits (48-57) and letters (65-90) become literal uppercase tokens, so
/// Ctrl+Alt+B arrives as `Ctrl+Alt+B`; every other code stays numeric (`#38`).
pub fn chord_from_event(event: &KeyEvent) -> Chord {
    let key = match event.key_code {
        code @ (48..=57 | 65..=90) => match char::from_u32(code) {
            Some(c) => KeyToken::Literal(c.to_string()),
            None => KeyToken::Code(code),
        },
        code => KeyToken::Code(code),
    };
    Chord::new(key, event.mods())
}

impl From<KeyEvent> for Chord {
    fn from(event: KeyEvent) -> Self {
        chord_from_event(&event)
    }
}
