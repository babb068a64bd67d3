//! Key-chord binding system
//!
//! This module turns human-authored binding tables into an executable lookup:
//! - Parses chord text like `Ctrl+Alt+#38` into structured [`Chord`]s
//! - Compiles ordered `chord → [command, description]` tables into a [`BindingTable`]
//! - Loads and layers raw tables from JSON or YAML
//! - Translates raw key-down events into chords
//!
//! # Architecture
//!
//! ```text
//! RawBindingTable → compile() → BindingTable
//! KeyEvent → Chord → BindingTable::get() → BindingEntry
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! let raw = RawBindingTable::from_json(r##"{"#38": ["backward", "Navigate backward"]}"##)?;
//! let table = compile(&raw)?;
//! ```

mod chord;
mod event;
mod parse;
mod raw;
mod table;

pub use chord::{Chord, KeyToken, Modifiers};
pub use event::{chord_from_event, KeyEvent};
pub use parse::{parse_chord, MalformedReason, ParseError};
pub use raw::{load_raw_bindings, KeymapFileError, RawBinding, RawBindingTable};
pub use table::{
    compile, Action, BindingEntry, BindingTable, CompileError, Diagnostic, SourceRef, NOP_COMMAND,
};

#[cfg(test)]
mod tests;
