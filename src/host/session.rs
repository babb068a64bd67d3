//! Process-wide session state owned by the active host
//!
//! A session holds everything a host sets up during init: the version string,
//! the installed binding table, the script loader endpoints, runtime tunables
//! and the one-shot readiness signal. `teardown` returns it to a blank state.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiEndpoints;
use crate::dispatch::{DispatchOutcome, Dispatcher, Disposition, HandlerRegistry};
use crate::keymap::{chord_from_event, BindingTable, Chord, KeyEvent};

/// Default delay before a mouseover moves focus
pub const DEFAULT_MOUSEOVER_DELAY: Duration = Duration::from_millis(500);

/// Event-timing parameters hosts may adjust per page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTunables {
    pub mouseover_delay: Duration,
}

impl Default for EventTunables {
    fn default() -> Self {
        Self {
            mouseover_delay: DEFAULT_MOUSEOVER_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no binding table installed; the host has not been initialized")]
    NotInitialized,
    #[error("session already initialized as {version:?}")]
    AlreadyInitialized { version: String },
}

type ReadyHook = Box<dyn FnMut(&str)>;

#[derive(Default)]
pub struct Session {
    version: Option<String>,
    dispatcher: Option<Dispatcher>,
    endpoints: Option<ApiEndpoints>,
    tunables: EventTunables,
    ready: bool,
    ready_hooks: Vec<ReadyHook>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the running host's version. Only once per session.
    pub fn set_version(&mut self, version: &str) -> Result<(), SessionError> {
        if let Some(existing) = &self.version {
            return Err(SessionError::AlreadyInitialized {
                version: existing.clone(),
            });
        }
        self.version = Some(version.to_string());
        Ok(())
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Install a freshly compiled table, replacing any previous one wholesale
    pub fn install_table(&mut self, table: BindingTable) {
        match &mut self.dispatcher {
            Some(dispatcher) => dispatcher.install(table),
            None => {
                tracing::info!("Installed binding table ({} bindings)", table.len());
                self.dispatcher = Some(Dispatcher::new(table));
            }
        }
    }

    pub fn dispatcher(&self) -> Result<&Dispatcher, SessionError> {
        self.dispatcher.as_ref().ok_or(SessionError::NotInitialized)
    }

    pub fn table(&self) -> Result<Arc<BindingTable>, SessionError> {
        self.dispatcher().map(Dispatcher::table)
    }

    pub fn resolve(&self, chord: &Chord) -> Result<DispatchOutcome, SessionError> {
        Ok(self.dispatcher()?.resolve(chord))
    }

    /// Translate and dispatch one key-down event
    ///
    /// Command failures are logged and reported as consumed; the only error is
    /// a session with no table.
    pub fn handle_key(
        &self,
        event: &KeyEvent,
        registry: &mut dyn HandlerRegistry,
    ) -> Result<Disposition, SessionError> {
        let chord = chord_from_event(event);
        Ok(self.dispatcher()?.handle(&chord, registry))
    }

    pub fn apply_endpoints(&mut self, endpoints: ApiEndpoints) {
        tracing::debug!(
            "Site script loader {} (base {})",
            endpoints.site_specific_script_loader,
            endpoints.site_specific_script_base
        );
        self.endpoints = Some(endpoints);
    }

    pub fn endpoints(&self) -> Option<&ApiEndpoints> {
        self.endpoints.as_ref()
    }

    pub fn tunables(&self) -> EventTunables {
        self.tunables
    }

    pub fn tunables_mut(&mut self) -> &mut EventTunables {
        &mut self.tunables
    }

    /// Register a hook run when the host signals readiness (receives the version)
    pub fn on_ready<F>(&mut self, hook: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.ready_hooks.push(Box::new(hook));
    }

    /// Fire the readiness signal. Returns false if it already fired this session.
    pub fn signal_ready(&mut self) -> bool {
        if self.ready {
            tracing::debug!("Readiness already signalled");
            return false;
        }
        self.ready = true;
        let version = self.version.clone().unwrap_or_default();
        tracing::info!("Session ready ({})", version);
        for hook in &mut self.ready_hooks {
            hook(&version);
        }
        true
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// End the session: drop the table and reset all host-applied state.
    /// Ready hooks stay registered for the next session.
    pub fn teardown(&mut self) {
        tracing::info!("Session teardown ({})", self.version().unwrap_or("uninitialized"));
        self.version = None;
        self.dispatcher = None;
        self.endpoints = None;
        self.tunables = EventTunables::default();
        self.ready = false;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("version", &self.version)
            .field("dispatcher", &self.dispatcher)
            .field("endpoints", &self.endpoints)
            .field("tunables", &self.tunables)
            .field("ready", &self.ready)
            .field("ready_hooks", &self.ready_hooks.len())
            .finish()
    }
}
