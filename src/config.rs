//! Configuration
//!
//! Two kinds of settings live here:
//! - [`VoxConfig`], the user's settings in `~/.config/voxhost/config.yaml`
//! - [`ApiEndpoints`], the fixed script loader endpoints a host applies to the
//!   session at init. These are never written to disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::host::HostKind;
use crate::keymap::{load_raw_bindings, KeymapFileError, RawBindingTable};

/// Site-specific script loader endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    pub site_specific_script_loader: Url,
    pub site_specific_script_base: Url,
}

impl ApiEndpoints {
    pub fn parse(loader: &str, base: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            site_specific_script_loader: Url::parse(loader)?,
            site_specific_script_base: Url::parse(base)?,
        })
    }
}

/// User configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoxConfig {
    /// Which host to start
    #[serde(default)]
    pub platform: HostKind,

    /// Keymap override file layered over the platform bindings.
    /// Falls back to `~/.config/voxhost/keymap.yaml` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keymap: Option<PathBuf>,
}

impl VoxConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on error
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Path of the keymap override file, if one is configured or present
    pub fn keymap_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.keymap {
            return Some(path.clone());
        }
        crate::config_paths::keymap_file().filter(|p| p.exists())
    }

    /// Load the user's keymap overrides
    ///
    /// An explicitly configured file that cannot be loaded is an error; no
    /// file at all is `Ok(None)`.
    pub fn keymap_overrides(&self) -> Result<Option<RawBindingTable>, KeymapFileError> {
        let Some(path) = self.keymap_path() else {
            return Ok(None);
        };
        let table = load_raw_bindings(&path)?;
        tracing::info!(
            "Loaded keymap overrides from {} ({} bindings)",
            path.display(),
            table.len()
        );
        Ok(Some(table))
    }
}
