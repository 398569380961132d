// src/steps/dev.rs

use std::time::Duration;

use tracing::info;

use crate::context::Context;
use crate::errors::Result;
use crate::exec::CommandSpec;
use crate::steps::{path_arg, require_binary};
use crate::types::TargetKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevServerExit {
    /// The server exited on its own with this code.
    Exited(i32),
    /// The operator pressed Ctrl+C.
    Interrupted,
}

/// Exit status of a process killed by SIGINT, as reported by a shell.
const SIGINT_EXIT_CODE: i32 = 130;

const INTERRUPT_SETTLE: Duration = Duration::from_millis(100);

impl DevServerExit {
    /// The server shares the terminal, so Ctrl+C usually reaches it first.
    /// A child killed by a signal (no exit code, reported as `-1`) or one
    /// that exits with the SIGINT status counts as an operator stop.
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 | SIGINT_EXIT_CODE => DevServerExit::Interrupted,
            code => DevServerExit::Exited(code),
        }
    }
}

/// `--dev`: run the server in the foreground with developer/debug flags.
///
/// Ctrl+C while the server runs stops it and returns normally.
pub async fn start_dev_server(ctx: &Context) -> Result<DevServerExit> {
    let reporter = ctx.reporter();
    reporter.header("Starting Development Server");

    let server = require_binary(ctx, TargetKind::Server)?;

    reporter.info("Starting server in developer/debug mode...");
    reporter.info("Press Ctrl+C to stop");
    reporter.plain("");

    let spec = CommandSpec::new(path_arg(&server)).args(ctx.settings.dev.server_flags.iter().cloned());

    let guard = ctx.interrupts.foreground();
    let (exit, interrupt_seen) = tokio::select! {
        res = ctx.runner().run(&spec) => (DevServerExit::from_code(res?.code), false),
        _ = guard.stopped() => (DevServerExit::Interrupted, true),
    };
    if exit == DevServerExit::Interrupted && !interrupt_seen {
        // The Ctrl+C that killed the server may still be on its way to the
        // listener; take it here so it does not cancel the rest of the run.
        let _ = tokio::time::timeout(INTERRUPT_SETTLE, guard.stopped()).await;
    }
    drop(guard);

    match exit {
        DevServerExit::Interrupted => {
            reporter.plain("");
            reporter.info("Server stopped");
        }
        DevServerExit::Exited(0) => reporter.info("Server exited"),
        DevServerExit::Exited(code) => {
            reporter.warning(&format!("Server exited with code {code}"));
        }
    }
    info!(?exit, "dev server finished");
    Ok(exit)
}
