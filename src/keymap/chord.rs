//! Core types for the keymap system: Chord, Modifiers, KeyToken

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const ALT: Modifiers = Modifiers(0b0010);
    pub const SHIFT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= Self::CTRL.0;
        }
        if alt {
            bits |= Self::ALT.0;
        }
        if shift {
            bits |= Self::SHIFT.0;
        }
        if meta {
            bits |= Self::META.0;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & Self::META.0 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Modifier names in canonical order (Ctrl, Alt, Shift, Meta)
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        [
            (Self::CTRL, "Ctrl"),
            (Self::ALT, "Alt"),
            (Self::SHIFT, "Shift"),
            (Self::META, "Meta"),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().collect::<Vec<_>>().join("+"))
    }
}

/// The non-modifier part of a chord
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyToken {
    /// A numeric key code reference, written `#38`
    Code(u32),
    /// A literal key identifier, case preserved (`A`, `1`)
    Literal(String),
}

impl KeyToken {
    pub fn literal(s: impl Into<String>) -> Self {
        KeyToken::Literal(s.into())
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Code(code) => write!(f, "#{}", code),
            KeyToken::Literal(s) => write!(f, "{}", s),
        }
    }
}

/// A key chord: a key token with a set of held modifiers
///
/// Two chords are equal iff their modifier sets and key tokens match, so
/// `Alt+Ctrl+A` and `Ctrl+Alt+A` are the same chord.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Chord {
    pub mods: Modifiers,
    pub key: KeyToken,
}

impl Chord {
    pub const fn new(key: KeyToken, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Chord for a bare key code with no modifiers
    pub const fn code(code: u32) -> Self {
        Self {
            key: KeyToken::Code(code),
            mods: Modifiers::NONE,
        }
    }

    pub const fn code_with_mods(code: u32, mods: Modifiers) -> Self {
        Self {
            key: KeyToken::Code(code),
            mods,
        }
    }

    pub fn literal_with_mods(key: impl Into<String>, mods: Modifiers) -> Self {
        Self {
            key: KeyToken::Literal(key.into()),
            mods,
        }
    }

    pub const fn ctrl(&self) -> bool {
        self.mods.ctrl()
    }

    pub const fn alt(&self) -> bool {
        self.mods.alt()
    }

    pub const fn shift(&self) -> bool {
        self.mods.shift()
    }

    pub const fn meta(&self) -> bool {
        self.mods.meta()
    }
}

/// Canonical chord text, e.g. `Ctrl+Alt+Shift+#189`. Parses back to the same chord.
impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mods.is_empty() {
            write!(f, "{}+{}", self.mods, self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        let mods = Modifiers::NONE;
        assert!(mods.is_empty());
        assert!(!mods.ctrl());
        assert!(!mods.alt());
        assert!(!mods.shift());
        assert!(!mods.meta());
    }

    #[test]
    fn test_modifiers_new() {
        let mods = Modifiers::new(true, true, false, false);
        assert_eq!(mods, Modifiers::CTRL | Modifiers::ALT);
        assert!(!mods.shift());
        assert!(!mods.meta());
    }

    #[test]
    fn test_modifiers_display_is_canonical_order() {
        let mods = Modifiers::META | Modifiers::SHIFT | Modifiers::CTRL | Modifiers::ALT;
        assert_eq!(mods.to_string(), "Ctrl+Alt+Shift+Meta");
    }

    #[test]
    fn test_chord_display() {
        let chord = Chord::code_with_mods(189, Modifiers::CTRL | Modifiers::ALT | Modifiers::SHIFT);
        assert_eq!(chord.to_string(), "Ctrl+Alt+Shift+#189");
        assert_eq!(Chord::code(38).to_string(), "#38");
        assert_eq!(
            Chord::literal_with_mods("B", Modifiers::CTRL | Modifiers::ALT).to_string(),
            "Ctrl+Alt+B"
        );
    }

    #[test]
    fn test_literal_case_is_significant() {
        let upper = Chord::literal_with_mods("A", Modifiers::CTRL);
        let lower = Chord::literal_with_mods("a", Modifiers::CTRL);
        assert_ne!(upper, lower);
    }
}
