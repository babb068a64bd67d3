//! Android host

use std::time::Duration;

use super::{Host, HostError, HostKind, Session};
use crate::config::ApiEndpoints;
use crate::keymap::{compile, RawBindingTable};

/// Version string recorded in the session
pub const ANDROID_VERSION: &str = "AndroidVox";

// Hard coded in lieu of a prefs system on Android
const SITE_SPECIFIC_SCRIPT_LOADER: &str = "https://ssl.gstatic.com/accessibility/javascript/ext/";
const SITE_SPECIFIC_SCRIPT_BASE: &str =
    "https://ssl.gstatic.com/accessibility/javascript/ext/loader.js";

/// Android key bindings, embedded at compile time
const ANDROID_KEYMAP_JSON: &str = include_str!("../../keymaps/android.json");

/// Host for Android. No TTS callback and no API script source.
#[derive(Debug, Clone, Default)]
pub struct AndroidHost {
    overrides: Option<RawBindingTable>,
}

impl AndroidHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Android host whose bindings are extended by user overrides
    pub fn with_overrides(overrides: Option<RawBindingTable>) -> Self {
        Self { overrides }
    }

    pub fn endpoints() -> Result<ApiEndpoints, HostError> {
        ApiEndpoints::parse(SITE_SPECIFIC_SCRIPT_LOADER, SITE_SPECIFIC_SCRIPT_BASE).map_err(
            |source| HostError::Endpoint {
                name: "site-specific script",
                source,
            },
        )
    }
}

impl Host for AndroidHost {
    fn kind(&self) -> HostKind {
        HostKind::Android
    }

    fn init(&mut self, session: &mut Session) -> Result<(), HostError> {
        let mut raw = self.raw_bindings()?;
        if let Some(overrides) = &self.overrides {
            raw = raw.layer(overrides.clone());
        }
        let table = compile(&raw).map_err(|source| HostError::Bindings {
            kind: HostKind::Android,
            source,
        })?;
        let endpoints = Self::endpoints()?;

        // Everything fallible is done before the session is touched
        session.set_version(ANDROID_VERSION)?;
        session.install_table(table);
        session.apply_endpoints(endpoints);
        session.signal_ready();
        Ok(())
    }

    fn reinit(&mut self, session: &mut Session) -> Result<(), HostError> {
        session.dispatcher()?;
        tracing::debug!("Android reinit: nothing to re-apply");
        Ok(())
    }

    fn on_page_load(&mut self, session: &mut Session) {
        // Gesture detection enables focus-follows-mouse on drag, so no hover delay
        session.tunables_mut().mouseover_delay = Duration::ZERO;
    }

    fn api_source(&self, _message: &str) -> String {
        String::new()
    }

    fn has_tts_callback(&self) -> bool {
        false
    }

    fn raw_bindings(&self) -> Result<RawBindingTable, HostError> {
        RawBindingTable::from_json(ANDROID_KEYMAP_JSON).map_err(|source| {
            HostError::EmbeddedKeymap {
                kind: HostKind::Android,
                source,
            }
        })
    }
}
