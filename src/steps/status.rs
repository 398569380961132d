// src/steps/status.rs

use tracing::debug;

use crate::context::Context;
use crate::errors::Result;
use crate::exec::CommandSpec;
use crate::types::TargetKind;

/// `--status`: read-only report of what has been set up so far.
pub async fn show_status(ctx: &Context) -> Result<()> {
    let reporter = ctx.reporter();
    let fs = ctx.fs();
    reporter.header("Project Status");

    let env_name = &ctx.settings.project.env_file;
    let env_path = ctx.paths.env_file.display();
    if fs.is_file(&ctx.paths.env_file) {
        reporter.success(&format!("{env_name} file exists: {env_path}"));
    } else {
        reporter.warning(&format!("{env_name} file not found: {env_path}"));
    }

    for kind in TargetKind::ALL {
        let binary = &ctx.settings.build.target(kind).binary;
        if fs.is_file(&ctx.paths.binary(&ctx.settings, kind)) {
            reporter.success(&format!("Binary built: {binary}"));
        } else {
            reporter.warning(&format!("Binary not built: {binary}"));
        }
    }

    let ps = CommandSpec::new(&ctx.settings.toolchain.compose).arg("ps").captured();
    match ctx.runner().run(&ps).await {
        Ok(res) if res.success() && !res.stdout_text().trim().is_empty() => {
            reporter.plain("");
            reporter.plain("Docker Services:");
            reporter.plain(res.stdout_text());
        }
        Ok(res) => debug!(exit_code = res.code, "no service listing"),
        Err(e) if !e.is_unexpected() => debug!(error = %e, "service listing unavailable"),
        Err(e) => return Err(e),
    }

    Ok(())
}
