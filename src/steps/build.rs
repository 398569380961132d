// src/steps/build.rs

use tracing::{info, warn};

use crate::config::BuildTarget;
use crate::context::Context;
use crate::errors::{Result, SetupError};
use crate::exec::CommandSpec;
use crate::steps::path_arg;

/// Compiler invocation for one target.
pub fn build_command(ctx: &Context, target: &BuildTarget, debug: bool) -> CommandSpec {
    let tc = &ctx.settings.toolchain;
    let mut spec = CommandSpec::new(&tc.compiler).arg("build");
    if debug {
        spec = spec.args(tc.debug_flags.iter().cloned());
    }
    spec.arg("-o")
        .arg(path_arg(&target.output))
        .arg(&target.source)
        .captured()
}

/// Build server, client and admin in that order, each exactly once.
///
/// Only the server decides the result. Client and admin failures are
/// reported as warnings, and a server failure still lets the other two
/// targets build so every compiler error shows up in one run.
pub async fn build_project(ctx: &Context, debug: bool) -> Result<()> {
    let reporter = ctx.reporter();
    reporter.header("Building Project");

    ctx.fs().create_dir_all(&ctx.paths.bin_dir)?;

    let mut primary_failure = None;
    for target in ctx.paths.build_targets(&ctx.settings) {
        reporter.info(&format!("Building {} ({})...", target.name, target.kind));
        let spec = build_command(ctx, &target, debug);
        let outcome = ctx.runner().run(&spec).await;

        let message = match outcome {
            Ok(res) if res.success() => {
                info!(target = %target.kind, "target built");
                reporter.success(&format!("{} built successfully", target.kind.label()));
                continue;
            }
            Ok(res) => res.failure_message(),
            Err(SetupError::ExternalCommand { message, .. }) => message,
            Err(other) => return Err(other),
        };

        if target.kind.is_primary() {
            warn!(target = %target.kind, "primary target failed");
            primary_failure = Some(SetupError::external(spec.display_line(), message));
        } else {
            warn!(target = %target.kind, "secondary target failed");
            reporter.warning(&format!("{} build failed: {}", target.kind.label(), message));
        }
    }

    if let Some(err) = primary_failure {
        return Err(err);
    }

    reporter.success("Build finished");
    reporter.info(&format!("Binaries located in: {}", ctx.paths.bin_dir.display()));
    Ok(())
}
