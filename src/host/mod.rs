//! Platform hosts
//!
//! Every supported platform implements [`Host`]. Hosts differ only in their
//! binding data and their lifecycle hooks; parsing, compiling and dispatch are
//! shared. The concrete host is picked once at startup by [`create_host`].
//!
//! ```ignore
//! let (host, session) = start(HostKind::Android, None)?;
//! let disposition = session.handle_key(&event, &mut registry)?;
//! ```

mod android;
mod session;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::keymap::{CompileError, RawBindingTable};

pub use android::AndroidHost;
pub use session::{EventTunables, Session, SessionError, DEFAULT_MOUSEOVER_DELAY};

/// Supported platforms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    #[default]
    Android,
}

impl HostKind {
    pub const ALL: &'static [HostKind] = &[HostKind::Android];

    pub fn name(self) -> &'static str {
        match self {
            HostKind::Android => "android",
        }
    }
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform {0:?}")]
pub struct UnknownHostKind(pub String);

impl FromStr for HostKind {
    type Err = UnknownHostKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HostKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownHostKind(s.to_string()))
    }
}

/// Errors surfaced by host lifecycle hooks
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("embedded keymap for {kind} is unreadable")]
    EmbeddedKeymap {
        kind: HostKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("{kind} key bindings failed to compile")]
    Bindings {
        kind: HostKind,
        #[source]
        source: CompileError,
    },
    #[error("invalid {name} endpoint")]
    Endpoint {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// The contract every platform host satisfies
pub trait Host {
    fn kind(&self) -> HostKind;

    /// One-time setup: compile and install the binding table, apply fixed
    /// configuration, record the version and signal readiness.
    fn init(&mut self, session: &mut Session) -> Result<(), HostError>;

    /// Re-apply platform state after an external reset. Must leave a valid
    /// table installed.
    fn reinit(&mut self, session: &mut Session) -> Result<(), HostError>;

    /// Called when a new document starts. Idempotent.
    fn on_page_load(&mut self, session: &mut Session);

    /// Injectable script source for a message; empty when unsupported
    fn api_source(&self, message: &str) -> String;

    fn has_tts_callback(&self) -> bool;

    /// The platform's binding table as authored
    fn raw_bindings(&self) -> Result<RawBindingTable, HostError>;
}

impl<'h> dyn Host + 'h {
    pub fn capabilities(&self) -> HostCapabilities<'_> {
        HostCapabilities::new(self)
    }
}

/// Capability view handed to collaborators that must not know the concrete host
#[derive(Clone, Copy)]
pub struct HostCapabilities<'a> {
    host: &'a dyn Host,
}

impl<'a> HostCapabilities<'a> {
    pub fn new(host: &'a dyn Host) -> Self {
        Self { host }
    }

    pub fn has_tts_callback(&self) -> bool {
        self.host.has_tts_callback()
    }

    pub fn api_source(&self, message: &str) -> String {
        self.host.api_source(message)
    }
}

impl fmt::Debug for HostCapabilities<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCapabilities")
            .field("kind", &self.host.kind())
            .field("has_tts_callback", &self.has_tts_callback())
            .finish()
    }
}

/// Construct the host for a platform. `overrides` are layered over its bindings.
pub fn create_host(kind: HostKind, overrides: Option<RawBindingTable>) -> Box<dyn Host> {
    match kind {
        HostKind::Android => Box::new(AndroidHost::with_overrides(overrides)),
    }
}

/// Create and initialize a host with a fresh session
pub fn start(
    kind: HostKind,
    overrides: Option<RawBindingTable>,
) -> Result<(Box<dyn Host>, Session), HostError> {
    let mut host = create_host(kind, overrides);
    let mut session = Session::new();
    host.init(&mut session)?;
    Ok((host, session))
}
