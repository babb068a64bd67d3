//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use voxhost::dispatch::CommandRegistry;
use voxhost::keymap::{compile, parse_chord, BindingTable, Chord, RawBindingTable};

/// Parse chord text, panicking on malformed input
pub fn chord(text: &str) -> Chord {
    parse_chord(text).unwrap_or_else(|e| panic!("bad chord in test: {}", e))
}

/// Compile `(chord, command, description)` triples
pub fn table(entries: &[(&str, &str, &str)]) -> BindingTable {
    compile(&RawBindingTable::from_static(entries)).expect("test table should compile")
}

/// Registry whose handlers append their command name to a shared log
pub fn recording_registry<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> (CommandRegistry, Rc<RefCell<Vec<String>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = CommandRegistry::new();
    for name in names {
        let log = log.clone();
        let owned = name.to_string();
        registry.register(name, move || {
            log.borrow_mut().push(owned.clone());
            Ok(())
        });
    }
    (registry, log)
}
