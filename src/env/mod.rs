// src/env/mod.rs

//! Environment file configuration.
//!
//! - [`file`]: the `.env` line model and the read-modify-write upsert.
//! - [`secret`]: random secret generation.
//! - [`flows`]: interactive sub-flows that collect database and provider
//!   settings as value objects, and the functions that apply them.
//! - [`setup`]: the `--env` step tying the above together.

pub mod file;
pub mod flows;
pub mod secret;
pub mod setup;

pub use file::{upsert_env_var, EnvFile, Upsert};
pub use flows::{DatabaseSettings, ProviderKeys};
pub use secret::{generate_secret, Secret, SECRET_ALPHABET};
pub use setup::{setup_environment, EnvSetupOutcome};
