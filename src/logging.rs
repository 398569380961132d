// src/logging.rs

//! Diagnostic logging via `tracing` + `tracing-subscriber`.
//!
//! Level priority:
//! 1. `--log-level`
//! 2. `GPUPROXY_SETUP_LOG` (e.g. "info", "debug")
//! 3. `warn`
//!
//! Logs go to STDERR. Operator-facing progress is not logging; it goes
//! through the reporter on stdout.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "GPUPROXY_SETUP_LOG";

const DEFAULT_LEVEL: Level = Level::WARN;

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let level = effective_level(cli_level, env_value.as_deref());

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing tracing subscriber: {e}"))
}

/// An unparseable env value falls back to the default, never errors.
fn effective_level(cli_level: Option<LogLevel>, env_value: Option<&str>) -> Level {
    if let Some(lvl) = cli_level {
        return lvl.into();
    }
    env_value.and_then(parse_level).unwrap_or(DEFAULT_LEVEL)
}

impl From<LogLevel> for Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_beats_environment() {
        assert_eq!(effective_level(Some(LogLevel::Debug), Some("error")), Level::DEBUG);
    }

    #[test]
    fn environment_used_when_flag_absent() {
        assert_eq!(effective_level(None, Some(" Warning ")), Level::WARN);
        assert_eq!(effective_level(None, Some("TRACE")), Level::TRACE);
    }

    #[test]
    fn quiet_by_default() {
        assert_eq!(effective_level(None, None), Level::WARN);
        assert_eq!(effective_level(None, Some("loud")), Level::WARN);
    }
}
