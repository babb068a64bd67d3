//! Chord → command dispatch
//!
//! The dispatcher owns the active [`BindingTable`] behind an `Arc`. Lookups
//! resolve a chord to a [`DispatchOutcome`]; dispatching runs the bound
//! command through a [`HandlerRegistry`] and reports whether the key event was
//! consumed.
//!
//! ```text
//! Chord → resolve() → Unbound | NoOp | Invoke(name) → HandlerRegistry::invoke
//! ```

mod registry;

use std::sync::Arc;

use crate::keymap::{Action, BindingTable, Chord};

pub use registry::{CommandRegistry, HandlerRegistry, HandlerResult};

/// Result of looking up a chord
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No binding; the platform should handle the key
    Unbound,
    /// Bound to `nop`; swallow the key and do nothing
    NoOp,
    /// Run this command
    Invoke(String),
}

/// Whether the key event was handled here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Mark the event handled; suppress the platform default
    Consumed,
    /// Let the platform default run
    PassThrough,
}

impl Disposition {
    pub fn is_consumed(self) -> bool {
        self == Disposition::Consumed
    }
}

/// Runtime dispatch failures. The key event counts as consumed for all of them.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("command {0:?} is bound but has no handler")]
    UnknownCommand(String),
    #[error("command {name:?} failed: {source}")]
    HandlerFailed {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl DispatchError {
    pub fn command_name(&self) -> &str {
        match self {
            DispatchError::UnknownCommand(name) => name,
            DispatchError::HandlerFailed { name, .. } => name,
        }
    }

    /// Events that fail are still consumed so the platform does not handle them twice
    pub fn disposition(&self) -> Disposition {
        Disposition::Consumed
    }
}

/// Resolves chords against the active binding table and runs their commands
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: Arc<BindingTable>,
}

impl Dispatcher {
    pub fn new(table: BindingTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Swap in a new table as one step; snapshots taken earlier keep the old one
    pub fn install(&mut self, table: BindingTable) {
        self.table = Arc::new(table);
        tracing::info!("Installed binding table ({} bindings)", self.table.len());
    }

    /// Shared handle to the active table
    pub fn table(&self) -> Arc<BindingTable> {
        Arc::clone(&self.table)
    }

    pub fn resolve(&self, chord: &Chord) -> DispatchOutcome {
        let outcome = resolve_in(&self.table, chord);
        tracing::debug!("Resolved {} -> {:?}", chord, outcome);
        outcome
    }

    /// Resolve a chord and run its command
    ///
    /// Unbound chords pass through. No-op chords are consumed without touching
    /// the registry. Errors imply the event was consumed.
    pub fn dispatch(
        &self,
        chord: &Chord,
        registry: &mut dyn HandlerRegistry,
    ) -> Result<Disposition, DispatchError> {
        match self.resolve(chord) {
            DispatchOutcome::Unbound => Ok(Disposition::PassThrough),
            DispatchOutcome::NoOp => Ok(Disposition::Consumed),
            DispatchOutcome::Invoke(name) => {
                if !registry.has(&name) {
                    return Err(DispatchError::UnknownCommand(name));
                }
                registry
                    .invoke(&name)
                    .map_err(|e| DispatchError::HandlerFailed {
                        name: name.clone(),
                        source: e.into(),
                    })?;
                Ok(Disposition::Consumed)
            }
        }
    }

    /// Event-loop entry point: dispatch, log any failure, never fail
    pub fn handle(&self, chord: &Chord, registry: &mut dyn HandlerRegistry) -> Disposition {
        match self.dispatch(chord, registry) {
            Ok(disposition) => disposition,
            Err(e @ DispatchError::UnknownCommand(_)) => {
                tracing::warn!("Keymap configuration error for {}: {}", chord, e);
                e.disposition()
            }
            Err(e) => {
                tracing::warn!("Dispatch of {} failed: {:#}", chord, e);
                e.disposition()
            }
        }
    }
}

/// Look up a chord in a table snapshot
pub fn resolve_in(table: &BindingTable, chord: &Chord) -> DispatchOutcome {
    match table.get(chord).map(|entry| &entry.action) {
        None => DispatchOutcome::Unbound,
        Some(Action::NoOp) => DispatchOutcome::NoOp,
        Some(Action::Invoke(name)) => DispatchOutcome::Invoke(name.clone()),
    }
}
