// src/lib.rs

pub mod cli;
pub mod config;
pub mod context;
pub mod env;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod pipeline;
pub mod signal;
pub mod steps;
pub mod types;
pub mod ui;

use std::path::PathBuf;

use tracing::info;

use crate::cli::CliArgs;
use crate::config::{resolve_settings, ProjectPaths};
use crate::context::Context;
use crate::errors::diagnostic_trace;
use crate::exec::ProcessRunner;
use crate::fs::RealFileSystem;
use crate::pipeline::{dispatch, EXIT_FAILURE};
use crate::signal::Interrupts;
use crate::ui::{Reporter, StdinPrompter, TerminalReporter};

/// High-level entry point used by `main.rs`; returns the process exit code.
///
/// This wires together:
/// - project root and settings resolution
/// - the real process runner, filesystem and terminal I/O
/// - Ctrl-C routing
/// - the dispatcher
pub async fn run(args: CliArgs) -> u8 {
    let reporter = TerminalReporter;

    let root = match project_root(&args) {
        Ok(root) => root,
        Err(e) => {
            reporter.error(&format!("Cannot determine project root: {e}"));
            return EXIT_FAILURE;
        }
    };

    let settings = match resolve_settings(&root, args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            reporter.error(&format!("Unexpected error: {e}"));
            reporter.plain(&diagnostic_trace(&e));
            return EXIT_FAILURE;
        }
    };

    let paths = ProjectPaths::resolve(&root, &settings);
    info!(root = %paths.root.display(), "project root resolved");

    let ctx = Context {
        runner: Box::new(ProcessRunner::new(&paths.root)),
        paths,
        settings,
        fs: Box::new(RealFileSystem),
        reporter: Box::new(reporter),
        prompter: Box::new(StdinPrompter),
        interrupts: Interrupts::listen(),
    };

    dispatch(&ctx, &args).await
}

fn project_root(args: &CliArgs) -> std::io::Result<PathBuf> {
    match &args.project_root {
        Some(dir) => std::fs::canonicalize(dir),
        None => std::env::current_dir(),
    }
}
