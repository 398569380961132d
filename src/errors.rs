// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    /// A required external tool could not be probed successfully.
    #[error("Required tool not found: {name} ({description})")]
    ToolMissing { name: String, description: String },

    #[error("Template file not found: {0}")]
    TemplateMissing(String),

    /// Empty or malformed interactive input.
    #[error("{0}")]
    Validation(String),

    /// A program exited non-zero or could not be launched.
    #[error("`{command}` failed: {message}")]
    ExternalCommand {
        command: String,
        message: String,
        hint: Option<String>,
    },

    #[error("Dependency check failed: missing {}", .missing.join(", "))]
    DependencyCheckFailed { missing: Vec<String> },

    #[error("{name} not found at {path}. Build the project first.")]
    MissingBinary { name: String, path: String },

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SetupError {
    pub fn external(command: impl Into<String>, message: impl Into<String>) -> Self {
        SetupError::ExternalCommand {
            command: command.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Attach a remediation hint to an `ExternalCommand` error.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        match self {
            SetupError::ExternalCommand {
                command, message, ..
            } => SetupError::ExternalCommand {
                command,
                message,
                hint: Some(hint.into()),
            },
            other => other,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            SetupError::ExternalCommand { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// Errors outside the expected taxonomy. These are not gated per step;
    /// they end the run with a diagnostic trace.
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            SetupError::IoError(_)
                | SetupError::TomlError(_)
                | SetupError::ConfigError(_)
                | SetupError::Other(_)
        )
    }
}

/// Render an error and its `source()` chain, one cause per line.
pub fn diagnostic_trace(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = format!("Error: {err}");
    let mut source = err.source();
    let mut depth = 0;
    while let Some(cause) = source {
        out.push_str(&format!("\n  {depth}: {cause}"));
        depth += 1;
        source = cause.source();
    }
    out
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SetupError>;
