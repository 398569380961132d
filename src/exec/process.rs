// src/exec/process.rs

//! Production runner on top of `tokio::process`.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{Result, SetupError};
use crate::exec::backend::CommandRunner;
use crate::exec::command::{CommandResult, CommandSpec};
use crate::types::Capture;

/// Spawns real OS processes, one at a time, rooted at the project root.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    root: PathBuf,
}

impl ProcessRunner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn run_inner(&self, spec: &CommandSpec) -> Result<CommandResult> {
        let cwd = spec.cwd.as_ref().unwrap_or(&self.root);
        debug!(cmd = %spec, cwd = ?cwd, capture = ?spec.capture, "starting process");

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args).current_dir(cwd).kill_on_drop(true);

        let launch_error =
            |e: std::io::Error| SetupError::external(spec.display_line(), e.to_string());

        let result = match spec.capture {
            Capture::Captured => {
                let output = cmd
                    .stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .output()
                    .await
                    .map_err(launch_error)?;
                CommandResult::captured(
                    output.status.code().unwrap_or(-1),
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr),
                )
            }
            Capture::Inherit => {
                let status = cmd.status().await.map_err(launch_error)?;
                CommandResult::exited(status.code().unwrap_or(-1))
            }
        };

        info!(
            program = %spec.program,
            exit_code = result.code,
            success = result.success(),
            "process exited"
        );

        Ok(result)
    }
}

impl CommandRunner for ProcessRunner {
    fn run<'a>(
        &'a self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult>> + Send + 'a>> {
        Box::pin(self.run_inner(spec))
    }
}
