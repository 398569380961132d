// src/steps/testing.rs

use crate::context::Context;
use crate::errors::{Result, SetupError};
use crate::exec::CommandSpec;

/// `--test`: run the project's test suite with output streamed.
pub async fn run_tests(ctx: &Context) -> Result<()> {
    let reporter = ctx.reporter();
    reporter.header("Running Tests");

    reporter.info("Running Go tests...");
    let spec = CommandSpec::new(&ctx.settings.toolchain.compiler).args(["test", "-v", "./..."]);
    let res = ctx.runner().run(&spec).await?;

    if res.success() {
        reporter.success("All tests passed!");
        Ok(())
    } else {
        Err(SetupError::external(spec.display_line(), "some tests failed"))
    }
}
