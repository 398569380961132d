// src/env/file.rs

use std::path::Path;

use tracing::debug;

use crate::errors::Result;
use crate::fs::FileSystem;

/// A `.env` file as an ordered list of lines.
///
/// Only lines of the form `KEY=VALUE` are interpreted; comments, blanks and
/// anything else are kept verbatim and in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvFile {
    lines: Vec<String>,
}

/// What an upsert did to the line list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Replaced { line: usize },
    Appended { line: usize },
}

impl EnvFile {
    pub fn parse(text: &str) -> Self {
        let lines = text
            .split_inclusive('\n')
            .map(|l| l.strip_suffix('\n').unwrap_or(l).to_string())
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Value of the first line starting with `key=`.
    pub fn get(&self, key: &str) -> Option<&str> {
        let prefix = format!("{key}=");
        self.lines
            .iter()
            .find_map(|line| line.strip_prefix(prefix.as_str()))
    }

    /// Replace the first `key=` line in place, or append one.
    pub fn upsert(&mut self, key: &str, value: &str) -> Upsert {
        let prefix = format!("{key}=");
        let entry = format!("{key}={value}");
        match self.lines.iter().position(|line| line.starts_with(&prefix)) {
            Some(idx) => {
                self.lines[idx] = entry;
                Upsert::Replaced { line: idx }
            }
            None => {
                self.lines.push(entry);
                Upsert::Appended {
                    line: self.lines.len() - 1,
                }
            }
        }
    }

    /// Serialise with one `\n` after every line.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Read `path`, upsert `key=value`, and rewrite the whole file.
///
/// Returns `Ok(None)` without touching anything when the file does not
/// exist. There is no locking: concurrent writers race and the last full
/// rewrite wins.
pub fn upsert_env_var(
    fs: &dyn FileSystem,
    path: &Path,
    key: &str,
    value: &str,
) -> Result<Option<Upsert>> {
    if !fs.is_file(path) {
        debug!(key, path = %path.display(), "env file missing; upsert skipped");
        return Ok(None);
    }

    let mut env = EnvFile::parse(&fs.read_to_string(path)?);
    let outcome = env.upsert(key, value);
    fs.write(path, env.render().as_bytes())?;

    debug!(key, ?outcome, "env var upserted");
    Ok(Some(outcome))
}
