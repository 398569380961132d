// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawSettings, Settings};
use crate::errors::{Result, SetupError};

/// Load a settings file and return the raw, unvalidated `RawSettings`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawSettings = toml::from_str(&contents)?;

    Ok(raw)
}

/// Load a settings file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Settings> {
    let raw = load_from_path(&path)?;
    Settings::try_from(raw)
}

/// Settings file looked up in the project root when `--config` is absent.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("gpuproxy-setup.toml")
}

/// Pick the settings for this run.
///
/// - An explicit path must exist.
/// - Otherwise `gpuproxy-setup.toml` in the project root is used if present.
/// - Otherwise the built-in defaults apply.
pub fn resolve_settings(project_root: &Path, explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(SetupError::ConfigError(format!(
                "settings file not found: {}",
                path.display()
            )));
        }
        debug!(path = %path.display(), "loading settings file");
        return load_and_validate(path);
    }

    let candidate = project_root.join(default_config_path());
    if candidate.is_file() {
        debug!(path = %candidate.display(), "loading settings file");
        load_and_validate(&candidate)
    } else {
        debug!("no settings file; using built-in defaults");
        Ok(Settings::default())
    }
}
