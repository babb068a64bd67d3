//! Compiled binding tables keyed by structured chord

use std::collections::HashMap;

use super::chord::Chord;
use super::parse::{parse_chord, ParseError};
use super::raw::{RawBinding, RawBindingTable};

/// Command name that marks a chord as intentionally swallowed
pub const NOP_COMMAND: &str = "nop";

/// What a bound chord does
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Consume the key event without running anything
    NoOp,
    /// Run the named command
    Invoke(String),
}

impl Action {
    pub fn from_command(name: &str) -> Self {
        if name == NOP_COMMAND {
            Action::NoOp
        } else {
            Action::Invoke(name.to_string())
        }
    }

    /// Command name as written in a binding table
    pub fn command_name(&self) -> &str {
        match self {
            Action::NoOp => NOP_COMMAND,
            Action::Invoke(name) => name,
        }
    }
}

/// A compiled binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingEntry {
    pub chord: Chord,
    pub action: Action,
    /// Empty for no-op entries
    pub description: String,
    /// Position of the defining entry in the raw source
    pub source_index: usize,
}

impl BindingEntry {
    pub fn is_noop(&self) -> bool {
        self.action == Action::NoOp
    }

    pub fn command_name(&self) -> &str {
        self.action.command_name()
    }
}

/// Where a raw entry came from, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub index: usize,
    pub text: String,
    pub command: String,
}

impl SourceRef {
    fn from_raw(index: usize, raw: &RawBinding) -> Self {
        Self {
            index,
            text: raw.chord.clone(),
            command: raw.command.clone(),
        }
    }
}

/// Non-fatal findings recorded while compiling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A later entry resolved to the same chord as an earlier one and replaced it
    Overridden {
        chord: Chord,
        previous: SourceRef,
        replacement: SourceRef,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::Overridden {
                chord,
                previous,
                replacement,
            } => write!(
                f,
                "{}: entry #{} ({:?} -> {}) overrides entry #{} ({:?} -> {})",
                chord,
                replacement.index,
                replacement.text,
                replacement.command,
                previous.index,
                previous.text,
                previous.command
            ),
        }
    }
}

/// Errors that abort table construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("invalid chord {text:?} at entry #{index}")]
    InvalidChord {
        index: usize,
        text: String,
        #[source]
        source: ParseError,
    },
    #[error("entry #{index} ({text:?}) has an empty command name")]
    EmptyCommand { index: usize, text: String },
}

/// Immutable chord → binding lookup, built once per session
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    /// Bindings in source order
    entries: Vec<BindingEntry>,
    /// Index into `entries` for each chord
    lookup: HashMap<Chord, usize>,
    diagnostics: Vec<Diagnostic>,
}

impl BindingTable {
    /// A table with no bindings; every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile a raw table; see [`compile`]
    pub fn compile(raw: &RawBindingTable) -> Result<Self, CompileError> {
        compile(raw)
    }

    pub fn get(&self, chord: &Chord) -> Option<&BindingEntry> {
        self.lookup.get(chord).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, chord: &Chord) -> bool {
        self.lookup.contains_key(chord)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings in source order
    pub fn iter(&self) -> std::slice::Iter<'_, BindingEntry> {
        self.entries.iter()
    }

    /// Overrides recorded during compilation
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the binding for a command name (first in source order)
    pub fn binding_for(&self, command: &str) -> Option<&BindingEntry> {
        self.entries.iter().find(|b| b.command_name() == command)
    }

    /// Get the chord text bound to a command
    pub fn display_for(&self, command: &str) -> Option<String> {
        self.binding_for(command).map(|b| b.chord.to_string())
    }

    /// Distinct invokable command names, in source order
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if let Action::Invoke(name) = &entry.action {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Compile raw bindings into a lookup table
///
/// All-or-nothing: the first unparsable chord or empty command aborts the
/// whole table. When two entries resolve to the same chord the later one
/// wins and a [`Diagnostic::Overridden`] is recorded and logged.
pub fn compile<'a, I>(raw: I) -> Result<BindingTable, CompileError>
where
    I: IntoIterator<Item = &'a RawBinding>,
{
    let mut table = BindingTable::empty();
    let mut sources: Vec<SourceRef> = Vec::new();

    for (index, entry) in raw.into_iter().enumerate() {
        let chord = parse_chord(&entry.chord).map_err(|source| CompileError::InvalidChord {
            index,
            text: entry.chord.clone(),
            source,
        })?;

        if entry.command.is_empty() {
            return Err(CompileError::EmptyCommand {
                index,
                text: entry.chord.clone(),
            });
        }

        let action = Action::from_command(&entry.command);
        let description = match action {
            Action::NoOp => String::new(),
            Action::Invoke(_) => entry.description.clone(),
        };
        let source = SourceRef::from_raw(index, entry);
        let binding = BindingEntry {
            chord: chord.clone(),
            action,
            description,
            source_index: index,
        };

        match table.lookup.get(&chord) {
            Some(&slot) => {
                let diagnostic = Diagnostic::Overridden {
                    chord,
                    previous: std::mem::replace(&mut sources[slot], source.clone()),
                    replacement: source,
                };
                tracing::warn!("Keymap override: {}", diagnostic);
                table.diagnostics.push(diagnostic);
                table.entries[slot] = binding;
            }
            None => {
                table.lookup.insert(chord, table.entries.len());
                table.entries.push(binding);
                sources.push(source);
            }
        }
    }

    tracing::debug!(
        "Compiled binding table: {} bindings, {} overrides",
        table.len(),
        table.diagnostics.len()
    );
    Ok(table)
}
