use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// The three deliverables produced by the compiler, in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Server,
    Client,
    Admin,
}

impl TargetKind {
    pub const ALL: [TargetKind; 3] = [TargetKind::Server, TargetKind::Client, TargetKind::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Server => "server",
            TargetKind::Client => "client",
            TargetKind::Admin => "admin",
        }
    }

    /// Human label used in progress output.
    pub fn label(self) -> &'static str {
        match self {
            TargetKind::Server => "Server",
            TargetKind::Client => "Client",
            TargetKind::Admin => "Admin tool",
        }
    }

    /// Only the server is the primary deliverable; the others may fail
    /// without failing the build.
    pub fn is_primary(self) -> bool {
        matches!(self, TargetKind::Server)
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a missing external tool fails the dependency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
}

/// How stdout/stderr of an external process are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capture {
    /// Inherit the caller's terminal; nothing is collected.
    #[default]
    Inherit,
    /// Collect stdout/stderr as text.
    Captured,
}

/// Kind of database selected in the interactive database sub-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Postgres,
    Sqlite,
}

impl DatabaseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DatabaseKind::Postgres => "postgres",
            DatabaseKind::Sqlite => "sqlite",
        }
    }
}

impl FromStr for DatabaseKind {
    type Err = String;

    /// Anything that is not `postgres` selects the embedded file database.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "postgres" => Ok(DatabaseKind::Postgres),
            _ => Ok(DatabaseKind::Sqlite),
        }
    }
}

/// What to do between starting the database containers and migrating.
///
/// - `FixedDelay`: unconditional sleep (the historical behaviour).
/// - `Probe`: run a readiness command until it exits 0, up to `attempts`
///   times, sleeping `interval_secs` between attempts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case", deny_unknown_fields)]
pub enum Readiness {
    FixedDelay {
        #[serde(default = "default_delay_secs")]
        seconds: u64,
    },
    Probe {
        #[serde(default = "default_probe_command")]
        command: Vec<String>,
        #[serde(default = "default_probe_attempts")]
        attempts: u32,
        #[serde(default = "default_probe_interval")]
        interval_secs: u64,
    },
}

impl Readiness {
    pub fn fixed_delay(&self) -> Option<Duration> {
        match self {
            Readiness::FixedDelay { seconds } => Some(Duration::from_secs(*seconds)),
            Readiness::Probe { .. } => None,
        }
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Readiness::FixedDelay {
            seconds: default_delay_secs(),
        }
    }
}

fn default_delay_secs() -> u64 {
    5
}

fn default_probe_command() -> Vec<String> {
    ["docker-compose", "exec", "-T", "postgres", "pg_isready"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_probe_attempts() -> u32 {
    10
}

fn default_probe_interval() -> u64 {
    2
}
