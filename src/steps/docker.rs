// src/steps/docker.rs

use crate::context::Context;
use crate::errors::Result;
use crate::exec::{execute, CommandSpec};

/// `--docker`: build the images and bring the whole stack up detached.
pub async fn docker_setup(ctx: &Context) -> Result<()> {
    let reporter = ctx.reporter();
    let compose = &ctx.settings.toolchain.compose;
    reporter.header("Docker Setup");

    reporter.info("Building Docker images...");
    let build = CommandSpec::new(compose).arg("build").captured().checked();
    execute(ctx.runner(), &build).await?;
    reporter.success("Docker images built successfully");

    reporter.info("Starting Docker services...");
    let up = CommandSpec::new(compose).args(["up", "-d"]).captured().checked();
    execute(ctx.runner(), &up).await?;
    reporter.success("Docker services started");

    reporter.info(&format!("View logs with: {compose} logs -f"));
    reporter.info(&format!("Server running at: {}", ctx.settings.dev.listen_address));
    Ok(())
}
