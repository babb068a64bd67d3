//! Chord text parsing
//!
//! Grammar: tokens separated by `+`. `Ctrl`, `Alt`, `Shift` and `Meta` are
//! modifiers (any case); exactly one other token names the key. `#<digits>`
//! is a numeric key code, anything else is a literal key with case preserved.

use std::fmt;
use std::str::FromStr;

use super::chord::{Chord, KeyToken, Modifiers};

/// Why a chord string was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    Empty,
    EmptyToken,
    Whitespace,
    DuplicateModifier(&'static str),
    MissingKey,
    MultipleKeys,
    BadKeyCode,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::Empty => write!(f, "empty chord"),
            MalformedReason::EmptyToken => write!(f, "empty token between '+' separators"),
            MalformedReason::Whitespace => write!(f, "whitespace inside a token"),
            MalformedReason::DuplicateModifier(m) => write!(f, "modifier {} given twice", m),
            MalformedReason::MissingKey => write!(f, "no key token"),
            MalformedReason::MultipleKeys => write!(f, "more than one key token"),
            MalformedReason::BadKeyCode => write!(f, "key code must be '#' followed by digits"),
        }
    }
}

/// Errors that can occur when parsing a chord
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed chord {input:?}: {reason}")]
    Malformed {
        input: String,
        reason: MalformedReason,
    },
}

impl ParseError {
    fn malformed(input: &str, reason: MalformedReason) -> Self {
        ParseError::Malformed {
            input: input.to_string(),
            reason,
        }
    }

    pub fn reason(&self) -> MalformedReason {
        match self {
            ParseError::Malformed { reason, .. } => *reason,
        }
    }
}

/// Parse a chord string like "Ctrl+Alt+#38" into a Chord
pub fn parse_chord(text: &str) -> Result<Chord, ParseError> {
    if text.is_empty() {
        return Err(ParseError::malformed(text, MalformedReason::Empty));
    }

    let mut mods = Modifiers::NONE;
    let mut key = None;

    for part in text.split('+') {
        if part.is_empty() {
            return Err(ParseError::malformed(text, MalformedReason::EmptyToken));
        }
        if part.chars().any(char::is_whitespace) {
            return Err(ParseError::malformed(text, MalformedReason::Whitespace));
        }

        if let Some((flag, name)) = modifier_token(part) {
            if mods.contains(flag) {
                return Err(ParseError::malformed(
                    text,
                    MalformedReason::DuplicateModifier(name),
                ));
            }
            mods = mods | flag;
            continue;
        }

        if key.is_some() {
            return Err(ParseError::malformed(text, MalformedReason::MultipleKeys));
        }
        key = Some(parse_key_token(part).ok_or_else(|| {
            ParseError::malformed(text, MalformedReason::BadKeyCode)
        })?);
    }

    let key = key.ok_or_else(|| ParseError::malformed(text, MalformedReason::MissingKey))?;
    Ok(Chord::new(key, mods))
}

fn modifier_token(part: &str) -> Option<(Modifiers, &'static str)> {
    match part.to_ascii_lowercase().as_str() {
        "ctrl" => Some((Modifiers::CTRL, "Ctrl")),
        "alt" => Some((Modifiers::ALT, "Alt")),
        "shift" => Some((Modifiers::SHIFT, "Shift")),
        "meta" => Some((Modifiers::META, "Meta")),
        _ => None,
    }
}

/// `None` means a `#` token that is not a valid key code
fn parse_key_token(part: &str) -> Option<KeyToken> {
    let Some(digits) = part.strip_prefix('#') else {
        return Some(KeyToken::Literal(part.to_string()));
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(KeyToken::Code)
}

impl FromStr for Chord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_chord(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_code() {
        let chord = parse_chord("#38").unwrap();
        assert_eq!(chord.key, KeyToken::Code(38));
        assert!(chord.mods.is_empty());
    }

    #[test]
    fn test_parse_bare_literal() {
        let chord = parse_chord("A").unwrap();
        assert_eq!(chord.key, KeyToken::literal("A"));
        assert!(chord.mods.is_empty());
    }

    #[test]
    fn test_parse_with_modifiers() {
        let chord = parse_chord("Ctrl+Alt+Shift+#189").unwrap();
        assert_eq!(chord.key, KeyToken::Code(189));
        assert!(chord.ctrl());
        assert!(chord.alt());
        assert!(chord.shift());
        assert!(!chord.meta());
    }

    #[test]
    fn test_modifiers_case_insensitive() {
        assert_eq!(parse_chord("ctrl+ALT+B"), parse_chord("Ctrl+Alt+B"));
        assert!(parse_chord("META+#13").unwrap().meta());
    }

    #[test]
    fn test_modifier_order_does_not_matter() {
        assert_eq!(parse_chord("Alt+Ctrl+A"), parse_chord("Ctrl+Alt+A"));
        assert_eq!(parse_chord("Shift+#37+Alt"), parse_chord("Alt+Shift+#37"));
    }

    #[test]
    fn test_literal_case_preserved() {
        let chord = parse_chord("Ctrl+b").unwrap();
        assert_eq!(chord.key, KeyToken::literal("b"));
        assert_ne!(chord, parse_chord("Ctrl+B").unwrap());
    }

    #[test]
    fn test_multi_char_literal() {
        let chord = parse_chord("Alt+Enter").unwrap();
        assert_eq!(chord.key, KeyToken::literal("Enter"));
    }

    #[test]
    fn test_empty_input() {
        let err = parse_chord("").unwrap_err();
        assert_eq!(err.reason(), MalformedReason::Empty);
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(
            parse_chord("Ctrl++A").unwrap_err().reason(),
            MalformedReason::EmptyToken
        );
        assert_eq!(
            parse_chord("Ctrl+").unwrap_err().reason(),
            MalformedReason::EmptyToken
        );
    }

    #[test]
    fn test_whitespace_rejected() {
        assert_eq!(
            parse_chord("Ctrl + A").unwrap_err().reason(),
            MalformedReason::Whitespace
        );
    }

    #[test]
    fn test_duplicate_modifier() {
        assert_eq!(
            parse_chord("Ctrl+ctrl+A").unwrap_err().reason(),
            MalformedReason::DuplicateModifier("Ctrl")
        );
    }

    #[test]
    fn test_missing_key() {
        assert_eq!(
            parse_chord("Ctrl+Alt").unwrap_err().reason(),
            MalformedReason::MissingKey
        );
    }

    #[test]
    fn test_multiple_keys() {
        assert_eq!(
            parse_chord("Ctrl+A+B").unwrap_err().reason(),
            MalformedReason::MultipleKeys
        );
    }

    #[test]
    fn test_bad_key_code() {
        for text in ["#", "#abc", "Alt+#3x", "#99999999999"] {
            assert_eq!(
                parse_chord(text).unwrap_err().reason(),
                MalformedReason::BadKeyCode,
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["#17", "Alt+#40", "Ctrl+Alt+Shift+#187", "Ctrl+Alt+X", "Meta+q"] {
            let chord = parse_chord(text).unwrap();
            assert_eq!(chord.to_string(), text);
        }
    }

    #[test]
    fn test_error_message_names_input() {
        let err = parse_chord("Ctrl+").unwrap_err();
        assert!(err.to_string().contains("\"Ctrl+\""));
    }
}
