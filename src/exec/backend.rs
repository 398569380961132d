// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! Every step talks to a `CommandRunner` instead of spawning processes
//! itself. Production uses [`super::ProcessRunner`]; tests provide a runner
//! that records invocations and answers from a script.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::errors::{Result, SetupError};
use crate::exec::command::{CommandResult, CommandSpec};

/// Trait abstracting how a single external command is executed.
///
/// Implementations run the command to completion and return its exit code.
/// A non-zero exit is *not* an error at this level; only failing to launch
/// the program is. Callers that want "check" semantics go through
/// [`execute`].
pub trait CommandRunner: Send + Sync {
    fn run<'a>(
        &'a self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult>> + Send + 'a>>;
}

/// Run `spec` and, when `spec.check` is set, convert a non-zero exit into
/// an `ExternalCommand` error carrying the captured stderr.
pub async fn execute(runner: &dyn CommandRunner, spec: &CommandSpec) -> Result<CommandResult> {
    let result = runner.run(spec).await?;
    if spec.check && !result.success() {
        debug!(cmd = %spec, exit_code = result.code, "checked command failed");
        return Err(SetupError::external(spec.display_line(), result.failure_message()));
    }
    Ok(result)
}
