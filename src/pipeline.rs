// src/pipeline.rs

//! Flag interpretation and step sequencing.
//!
//! [`Plan::from_args`] turns CLI flags into an ordered list of steps;
//! [`run_plan`] executes them, stopping at the first failure of a fatal
//! step; [`dispatch`] adds help mode, cancellation and the mapping to
//! process exit codes.

use std::fmt;

use clap::CommandFactory;
use tracing::{debug, error, info};

use crate::cli::CliArgs;
use crate::context::Context;
use crate::env::setup_environment;
use crate::errors::{diagnostic_trace, Result, SetupError};
use crate::steps::{admin, build, database, deps, dev, docker, status, testing};

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CANCELLED: u8 = 130;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    CheckDeps,
    InstallDeps,
    Environment,
    Build,
    Database,
    CreateAdmin,
    Test,
    Docker,
    DevServer,
    Status,
}

impl Step {
    pub const ORDER: [Step; 10] = [
        Step::CheckDeps,
        Step::InstallDeps,
        Step::Environment,
        Step::Build,
        Step::Database,
        Step::CreateAdmin,
        Step::Test,
        Step::Docker,
        Step::DevServer,
        Step::Status,
    ];

    /// Whether a failure of this step ends the run with exit code 1.
    pub fn is_fatal(self) -> bool {
        match self {
            Step::CheckDeps
            | Step::InstallDeps
            | Step::Build
            | Step::Database
            | Step::Test
            | Step::Docker => true,
            Step::Environment | Step::CreateAdmin | Step::DevServer | Step::Status => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::CheckDeps => "Dependency check",
            Step::InstallDeps => "Dependency installation",
            Step::Environment => "Environment setup",
            Step::Build => "Build",
            Step::Database => "Database setup",
            Step::CreateAdmin => "Admin user creation",
            Step::Test => "Tests",
            Step::Docker => "Docker setup",
            Step::DevServer => "Development server",
            Step::Status => "Status",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Steps selected by the flags plus the modifiers they run with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<Step>,
    pub setup: bool,
    pub debug: bool,
    pub force: bool,
    pub docker_db: bool,
}

impl Plan {
    pub fn from_args(args: &CliArgs) -> Self {
        let wanted = |step: Step| match step {
            Step::CheckDeps => args.check || args.setup,
            Step::InstallDeps => args.deps || args.setup,
            Step::Environment => args.env,
            Step::Build => args.build || args.setup,
            Step::Database => args.db,
            Step::CreateAdmin => args.create_admin,
            Step::Test => args.test,
            Step::Docker => args.docker,
            Step::DevServer => args.dev,
            Step::Status => args.status,
        };

        Self {
            steps: Step::ORDER.into_iter().filter(|&s| wanted(s)).collect(),
            setup: args.setup,
            debug: args.debug,
            force: args.force,
            docker_db: args.docker_db,
        }
    }

    /// No action flag given: help mode.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// What happened to each step of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub succeeded: Vec<Step>,
    /// Non-fatal failures; later steps still ran.
    pub failed: Vec<Step>,
    /// Fatal failure that stopped the run.
    pub aborted_at: Option<Step>,
}

impl PipelineReport {
    pub fn exit_code(&self) -> u8 {
        if self.aborted_at.is_some() {
            EXIT_FAILURE
        } else {
            EXIT_OK
        }
    }
}

/// Execute the plan's steps in order.
///
/// Expected failures are reported and gated per step. Unexpected errors
/// (I/O, settings) are returned to the caller untouched.
pub async fn run_plan(ctx: &Context, plan: &Plan) -> Result<PipelineReport> {
    let mut report = PipelineReport::default();

    for &step in &plan.steps {
        info!(%step, "running step");
        match run_step(ctx, plan, step).await {
            Ok(()) => report.succeeded.push(step),
            Err(e) if e.is_unexpected() => return Err(e),
            Err(e) => {
                report_failure(ctx, &e);
                if step.is_fatal() {
                    error!(%step, error = %e, "fatal step failed");
                    ctx.reporter().error(&format!("{step} failed"));
                    report.aborted_at = Some(step);
                    return Ok(report);
                }
                debug!(%step, error = %e, "non-fatal step failed");
                report.failed.push(step);
            }
        }
    }

    Ok(report)
}

async fn run_step(ctx: &Context, plan: &Plan, step: Step) -> Result<()> {
    match step {
        Step::CheckDeps => deps::check_dependencies(ctx).await?.into_result().map(drop),
        Step::InstallDeps => deps::install_dependencies(ctx).await,
        Step::Environment => setup_environment(ctx, plan.force).await.map(drop),
        Step::Build => build::build_project(ctx, plan.debug).await,
        Step::Database => database::setup_database(ctx, plan.docker_db).await,
        Step::CreateAdmin => admin::create_admin_user(ctx).await,
        Step::Test => testing::run_tests(ctx).await,
        Step::Docker => docker::docker_setup(ctx).await,
        Step::DevServer => dev::start_dev_server(ctx).await.map(drop),
        Step::Status => status::show_status(ctx).await,
    }
}

fn report_failure(ctx: &Context, err: &SetupError) {
    let reporter = ctx.reporter();
    match err {
        // Per-tool messages were already printed while probing.
        SetupError::DependencyCheckFailed { .. } => {}
        other => reporter.error(&other.to_string()),
    }
    if let Some(hint) = err.hint() {
        reporter.info(hint);
    }
}

/// Usage text printed in help mode.
pub fn usage() -> String {
    CliArgs::command().render_long_help().to_string()
}

/// Top-level entry: help mode, pipeline, cancellation and exit codes.
pub async fn dispatch(ctx: &Context, args: &CliArgs) -> u8 {
    let plan = Plan::from_args(args);
    if plan.is_empty() {
        ctx.reporter().plain(&usage());
        return EXIT_OK;
    }
    debug!(?plan, "dispatching");

    let outcome = tokio::select! {
        biased;
        res = run_plan(ctx, &plan) => Some(res),
        _ = ctx.interrupts.cancelled() => None,
    };

    match outcome {
        None | Some(Err(SetupError::Cancelled)) => {
            ctx.reporter().plain("");
            ctx.reporter().info("Operation cancelled by user");
            EXIT_CANCELLED
        }
        Some(Ok(report)) => {
            if report.aborted_at.is_none() && plan.setup {
                print_next_steps(ctx);
            }
            report.exit_code()
        }
        Some(Err(e)) => {
            error!(error = %e, "unexpected error");
            ctx.reporter().error(&format!("Unexpected error: {e}"));
            ctx.reporter().plain(&diagnostic_trace(&e));
            EXIT_FAILURE
        }
    }
}

fn print_next_steps(ctx: &Context) {
    let reporter = ctx.reporter();
    let bin = env!("CARGO_PKG_NAME");
    reporter.header("Setup Complete!");
    reporter.plain("Next Steps:");
    reporter.plain(&format!("  1. Configure environment: {bin} --env"));
    reporter.plain(&format!("  2. Set up database: {bin} --db"));
    reporter.plain(&format!("  3. Create admin user: {bin} --create-admin"));
    reporter.plain(&format!("  4. Start dev server: {bin} --dev"));
    reporter.plain("");
    reporter.plain("Or use Docker:");
    reporter.plain(&format!("  {bin} --docker"));
    reporter.plain("");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn plan(argv: &[&str]) -> Plan {
        let mut full = vec!["gpuproxy-setup"];
        full.extend_from_slice(argv);
        Plan::from_args(&CliArgs::parse_from(full))
    }

    #[test]
    fn setup_implies_check_deps_and_build() {
        assert_eq!(
            plan(&["--setup"]).steps,
            vec![Step::CheckDeps, Step::InstallDeps, Step::Build]
        );
    }

    #[test]
    fn steps_follow_pipeline_order_not_flag_order() {
        let p = plan(&["--status", "--dev", "--db", "--env", "--check"]);
        assert_eq!(
            p.steps,
            vec![Step::CheckDeps, Step::Environment, Step::Database, Step::DevServer, Step::Status]
        );
    }

    #[test]
    fn modifiers_alone_are_help_mode() {
        let p = plan(&["--debug", "--force", "--docker-db"]);
        assert!(p.is_empty());
        assert!(p.debug && p.force && p.docker_db);
    }

    #[test]
    fn fatality_table() {
        let fatal: Vec<Step> = Step::ORDER.into_iter().filter(|s| s.is_fatal()).collect();
        assert_eq!(
            fatal,
            vec![
                Step::CheckDeps,
                Step::InstallDeps,
                Step::Build,
                Step::Database,
                Step::Test,
                Step::Docker
            ]
        );
    }

    #[test]
    fn usage_mentions_every_flag() {
        let text = usage();
        for flag in [
            "--check", "--deps", "--env", "--build", "--db", "--create-admin", "--test", "--dev",
            "--docker", "--status", "--setup", "--debug", "--force", "--docker-db",
        ] {
            assert!(text.contains(flag), "usage is missing {flag}");
        }
    }
}
