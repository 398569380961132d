// src/config/mod.rs

//! Tool settings and project layout.
//!
//! Responsibilities:
//! - Define the TOML-backed settings model (`model.rs`).
//! - Load an optional settings file from disk (`loader.rs`).
//! - Validate settings invariants (`validate.rs`).
//! - Resolve the project paths used by every step (`paths.rs`).

pub mod loader;
pub mod model;
pub mod paths;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve_settings};
pub use model::{
    BuildSection, BuildTargetConfig, DatabaseSection, DevSection, ProjectSection, ProviderConfig,
    RawSettings, Settings, ToolchainSection,
};
pub use paths::{BuildTarget, ProjectPaths};
