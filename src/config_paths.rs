//! Where voxhost keeps its files
//!
//! ```text
//! <config>/voxhost/config.yaml   user settings
//! <config>/voxhost/keymap.yaml   keymap overrides
//! <config>/voxhost/logs/         rolling log files
//! ```
//!
//! `<config>` is `$XDG_CONFIG_HOME` or `~/.config`, and the platform config
//! directory from `dirs` on Windows.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

const APP_DIR: &str = "voxhost";

/// The voxhost config directory, if a home or config directory is known
pub fn config_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        return dirs::config_dir().map(|base| base.join(APP_DIR));
    }
    unix_config_dir(std::env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())
}

/// An empty `XDG_CONFIG_HOME` counts as unset
fn unix_config_dir(xdg_config_home: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    let base = match xdg_config_home.filter(|value| !value.is_empty()) {
        Some(xdg) => PathBuf::from(xdg),
        None => home?.join(".config"),
    };
    Some(base.join(APP_DIR))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn keymap_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("keymap.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let logs = logs_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "no config directory available")
    })?;
    std::fs::create_dir_all(&logs)?;
    Ok(logs)
}
