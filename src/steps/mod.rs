// src/steps/mod.rs

//! One module per pipeline step.
//!
//! Steps report progress through the context's reporter and return
//! `Result`; whether a failure ends the run is decided by the pipeline, not
//! here.

pub mod admin;
pub mod build;
pub mod database;
pub mod deps;
pub mod dev;
pub mod docker;
pub mod status;
pub mod testing;

use std::path::Path;

use crate::context::Context;
use crate::errors::{Result, SetupError};
use crate::types::TargetKind;

/// Path of a built binary, or `MissingBinary` if it has not been built.
pub(crate) fn require_binary(ctx: &Context, kind: TargetKind) -> Result<std::path::PathBuf> {
    let path = ctx.paths.binary(&ctx.settings, kind);
    if ctx.fs().is_file(&path) {
        Ok(path)
    } else {
        Err(SetupError::MissingBinary {
            name: binary_label(kind).to_string(),
            path: path.display().to_string(),
        })
    }
}

fn binary_label(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Server => "Server binary",
        TargetKind::Client => "Client binary",
        TargetKind::Admin => "Admin tool",
    }
}

pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
