// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{RawSettings, Settings};
use crate::errors::{Result, SetupError};
use crate::types::{Readiness, TargetKind};

impl TryFrom<RawSettings> for Settings {
    type Error = SetupError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_raw_settings(&raw)?;
        Ok(Settings::new_unchecked(raw))
    }
}

fn validate_raw_settings(raw: &RawSettings) -> Result<()> {
    validate_project(raw)?;
    validate_toolchain(raw)?;
    validate_build_targets(raw)?;
    validate_database(raw)?;
    validate_providers(raw)?;
    Ok(())
}

fn config_error(message: impl Into<String>) -> SetupError {
    SetupError::ConfigError(message.into())
}

fn validate_project(raw: &RawSettings) -> Result<()> {
    let project = &raw.project;
    for (field, value) in [
        ("env_file", &project.env_file),
        ("env_template", &project.env_template),
        ("bin_dir", &project.bin_dir),
        ("secret_placeholder", &project.secret_placeholder),
    ] {
        if value.trim().is_empty() {
            return Err(config_error(format!("[project].{field} must not be empty")));
        }
    }
    if project.env_file == project.env_template {
        return Err(config_error(format!(
            "[project].env_file and env_template must differ (both '{}')",
            project.env_file
        )));
    }
    Ok(())
}

fn validate_toolchain(raw: &RawSettings) -> Result<()> {
    let tc = &raw.toolchain;
    for (field, value) in [
        ("compiler", &tc.compiler),
        ("compose", &tc.compose),
        ("container_engine", &tc.container_engine),
        ("vcs", &tc.vcs),
    ] {
        if value.trim().is_empty() {
            return Err(config_error(format!("[toolchain].{field} must not be empty")));
        }
    }
    Ok(())
}

fn validate_build_targets(raw: &RawSettings) -> Result<()> {
    let mut seen = HashSet::new();
    for kind in TargetKind::ALL {
        let target = raw.build.target(kind);
        if target.source.trim().is_empty() || target.binary.trim().is_empty() {
            return Err(config_error(format!(
                "[build.{kind}] needs a non-empty source and binary"
            )));
        }
        if target.binary.contains('/') || target.binary.contains('\\') {
            return Err(config_error(format!(
                "[build.{kind}].binary must be a file name, got '{}'",
                target.binary
            )));
        }
        if !seen.insert(target.binary.as_str()) {
            return Err(config_error(format!(
                "[build.{kind}].binary '{}' is used by another target",
                target.binary
            )));
        }
    }
    Ok(())
}

fn validate_database(raw: &RawSettings) -> Result<()> {
    if raw.database.services.is_empty() {
        return Err(config_error("[database].services must list at least one service"));
    }
    if let Readiness::Probe {
        command, attempts, ..
    } = &raw.database.readiness
    {
        if command.is_empty() {
            return Err(config_error("[database.readiness].command must not be empty"));
        }
        if *attempts == 0 {
            return Err(config_error("[database.readiness].attempts must be >= 1 (got 0)"));
        }
    }
    Ok(())
}

fn validate_providers(raw: &RawSettings) -> Result<()> {
    let mut seen = HashSet::new();
    for provider in &raw.providers {
        let key = provider.env_key.as_str();
        let well_formed = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !well_formed {
            return Err(config_error(format!(
                "provider '{}' has invalid env_key '{}'",
                provider.label, key
            )));
        }
        if !seen.insert(key) {
            return Err(config_error(format!("provider env_key '{key}' listed twice")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{BuildTargetConfig, ProviderConfig};

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::try_from(RawSettings::default()).is_ok());
    }

    #[test]
    fn duplicate_binary_names_are_rejected() {
        let mut raw = RawSettings::default();
        raw.build.client = BuildTargetConfig::new("./cmd/client", "aiserve-gpuproxyd");

        let err = Settings::try_from(raw).unwrap_err();
        assert!(err.to_string().contains("used by another target"), "{err}");
    }

    #[test]
    fn zero_probe_attempts_are_rejected() {
        let mut raw = RawSettings::default();
        raw.database.readiness = Readiness::Probe {
            command: vec!["true".into()],
            attempts: 0,
            interval_secs: 1,
        };

        assert!(matches!(Settings::try_from(raw), Err(SetupError::ConfigError(_))));
    }

    #[test]
    fn provider_keys_must_be_env_safe() {
        let mut raw = RawSettings::default();
        raw.providers.push(ProviderConfig::new("Broken", "BAD KEY="));

        assert!(Settings::try_from(raw).is_err());
    }
}
