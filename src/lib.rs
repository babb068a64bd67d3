//! voxhost - platform hosts and key-chord dispatch for a screen reader
//!
//! A platform host declares its key bindings as data, compiles them once at
//! init, and routes incoming key events to named commands:
//!
//! ```text
//! Host::init → compile(raw bindings) → Session (Dispatcher)
//! KeyEvent → Chord → Dispatcher::handle → HandlerRegistry::invoke
//! ```

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod dispatch;
pub mod host;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use config::{ApiEndpoints, VoxConfig};
pub use dispatch::{CommandRegistry, DispatchOutcome, Dispatcher, Disposition};
pub use host::{create_host, start, Host, HostKind, Session};
pub use keymap::{compile, parse_chord, BindingTable, Chord, KeyEvent, RawBindingTable};
