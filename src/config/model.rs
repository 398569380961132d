// src/config/model.rs

use serde::Deserialize;

use crate::types::{Readiness, TargetKind};

/// Settings exactly as read from `gpuproxy-setup.toml`, before validation.
///
/// Every section is optional; missing values fall back to the layout of the
/// `aiserve-gpuproxyd` repository.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub project: ProjectSection,
    pub toolchain: ToolchainSection,
    pub build: BuildSection,
    pub database: DatabaseSection,
    pub dev: DevSection,
    #[serde(rename = "provider")]
    pub providers: Vec<ProviderConfig>,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            project: ProjectSection::default(),
            toolchain: ToolchainSection::default(),
            build: BuildSection::default(),
            database: DatabaseSection::default(),
            dev: DevSection::default(),
            providers: default_providers(),
        }
    }
}

/// Validated settings. Construct with `Settings::try_from(raw)` or
/// `Settings::default()`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub project: ProjectSection,
    pub toolchain: ToolchainSection,
    pub build: BuildSection,
    pub database: DatabaseSection,
    pub dev: DevSection,
    pub providers: Vec<ProviderConfig>,
}

impl Settings {
    pub(crate) fn new_unchecked(raw: RawSettings) -> Self {
        Self {
            project: raw.project,
            toolchain: raw.toolchain,
            build: raw.build,
            database: raw.database,
            dev: raw.dev,
            providers: raw.providers,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new_unchecked(RawSettings::default())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectSection {
    /// Relative to the project root.
    pub env_file: String,
    pub env_template: String,
    pub bin_dir: String,
    /// Template token whose first occurrence is replaced by the generated
    /// secret. Only the token itself is replaced; the key in front of it
    /// stays as written in the template.
    pub secret_placeholder: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            env_file: ".env".to_string(),
            env_template: ".env.example".to_string(),
            bin_dir: "bin".to_string(),
            secret_placeholder: "changeme-generate-a-secure-random-string".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainSection {
    pub compiler: String,
    pub compose: String,
    pub container_engine: String,
    pub vcs: String,
    /// Inserted after `build` when `--debug` is given.
    pub debug_flags: Vec<String>,
}

impl Default for ToolchainSection {
    fn default() -> Self {
        Self {
            compiler: "go".to_string(),
            compose: "docker-compose".to_string(),
            container_engine: "docker".to_string(),
            vcs: "git".to_string(),
            debug_flags: vec!["-gcflags".to_string(), "all=-N -l".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    pub server: BuildTargetConfig,
    pub client: BuildTargetConfig,
    pub admin: BuildTargetConfig,
}

impl BuildSection {
    pub fn target(&self, kind: TargetKind) -> &BuildTargetConfig {
        match kind {
            TargetKind::Server => &self.server,
            TargetKind::Client => &self.client,
            TargetKind::Admin => &self.admin,
        }
    }
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            server: BuildTargetConfig::new("./cmd/server", "aiserve-gpuproxyd"),
            client: BuildTargetConfig::new("./cmd/client", "aiserve-gpuproxy-client"),
            admin: BuildTargetConfig::new("./cmd/admin", "aiserve-gpuproxy-admin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildTargetConfig {
    /// Package path handed to the compiler.
    pub source: String,
    /// File name inside the binary directory.
    pub binary: String,
}

impl BuildTargetConfig {
    pub fn new(source: &str, binary: &str) -> Self {
        Self {
            source: source.to_string(),
            binary: binary.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    /// Compose services started by `--db --docker-db`.
    pub services: Vec<String>,
    pub readiness: Readiness,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            services: vec!["postgres".to_string(), "redis".to_string()],
            readiness: Readiness::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevSection {
    /// Flags passed to the server binary by `--dev`.
    pub server_flags: Vec<String>,
    /// Address printed after `--docker` brings the stack up.
    pub listen_address: String,
}

impl Default for DevSection {
    fn default() -> Self {
        Self {
            server_flags: vec!["-dv".to_string(), "-dm".to_string()],
            listen_address: "http://localhost:8080".to_string(),
        }
    }
}

/// One provider API key collected by the provider sub-flow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    pub label: String,
    pub env_key: String,
}

impl ProviderConfig {
    pub fn new(label: &str, env_key: &str) -> Self {
        Self {
            label: label.to_string(),
            env_key: env_key.to_string(),
        }
    }
}

pub fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new("Vast.ai", "VASTAI_API_KEY"),
        ProviderConfig::new("IO.net", "IONET_API_KEY"),
    ]
}
