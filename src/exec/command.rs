// src/exec/command.rs

use std::fmt;
use std::path::{Path, PathBuf};

use crate::types::Capture;

/// One external invocation: program, arguments, and how to run it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory. `None` means the runner's project root.
    pub cwd: Option<PathBuf>,
    pub capture: Capture,
    /// Turn a non-zero exit into an `ExternalCommand` error.
    pub check: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            capture: Capture::Inherit,
            check: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn captured(mut self) -> Self {
        self.capture = Capture::Captured;
        self
    }

    pub fn checked(mut self) -> Self {
        self.check = true;
        self
    }

    /// Program and arguments joined with spaces, for logs and messages.
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_line())
    }
}

/// Exit code plus captured output (only in `Capture::Captured` mode).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    /// `-1` when the process was terminated by a signal.
    pub code: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl CommandResult {
    pub fn exited(code: i32) -> Self {
        Self {
            code,
            stdout: None,
            stderr: None,
        }
    }

    pub fn captured(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: Some(stdout.into()),
            stderr: Some(stderr.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }

    pub fn stdout_text(&self) -> &str {
        self.stdout.as_deref().unwrap_or("")
    }

    pub fn stderr_text(&self) -> &str {
        self.stderr.as_deref().unwrap_or("")
    }

    /// Best description of a failure: trimmed stderr, else the exit code.
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr_text().trim();
        if stderr.is_empty() {
            format!("exit code {}", self.code)
        } else {
            stderr.to_string()
        }
    }
}
