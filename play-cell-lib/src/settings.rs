//! Settings file (`~/.config/play-cell/settings.toml`).
//!
//! The file supplies defaults for the playback options; command-line flags
//! are applied on top by the frontend.
//!
//! ```toml
//! [playback]
//! ignore_read_errors = true
//! max_read_retries = 3
//! report_cell_gaps = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SettingsError;
use crate::options::PlaybackOptions;

/// Contents of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackOptions,
}

/// Canonical path to the settings file: `~/.config/play-cell/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("play-cell").join("settings.toml")
}

/// Load settings from `path`, or from [`settings_path`] when `None`.
///
/// A missing default file yields the defaults; a missing file that was
/// asked for explicitly is an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (settings_path(), false),
    };

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(SettingsError::io(&path, e)),
    };

    let settings = toml::from_str(&contents).map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("loaded settings from {}", path.display());
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
