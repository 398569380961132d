// src/steps/database.rs

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::context::Context;
use crate::errors::Result;
use crate::exec::{execute, CommandSpec};
use crate::steps::{path_arg, require_binary};
use crate::types::{Readiness, TargetKind};

const MIGRATE_HINT: &str =
    "Make sure the database is running and the env file is configured correctly";

/// `--db`: optionally start the database containers, then migrate.
pub async fn setup_database(ctx: &Context, use_containers: bool) -> Result<()> {
    let reporter = ctx.reporter();
    reporter.header("Database Setup");

    if use_containers {
        start_database_services(ctx).await?;
        wait_for_database(ctx).await?;
    }

    reporter.info("Running database migrations...");
    let admin = require_binary(ctx, TargetKind::Admin)?;

    let migrate = CommandSpec::new(path_arg(&admin))
        .arg("migrate")
        .captured()
        .checked();
    execute(ctx.runner(), &migrate)
        .await
        .map_err(|e| e.with_hint(MIGRATE_HINT))?;

    reporter.success("Database migrations completed successfully");
    Ok(())
}

async fn start_database_services(ctx: &Context) -> Result<()> {
    let reporter = ctx.reporter();
    reporter.info("Starting database services with Docker...");

    let up = CommandSpec::new(&ctx.settings.toolchain.compose)
        .args(["up", "-d"])
        .args(ctx.settings.database.services.iter().cloned())
        .captured()
        .checked();
    execute(ctx.runner(), &up).await?;

    reporter.success("Docker database services started");
    Ok(())
}

/// Either sleep unconditionally or poll the readiness command.
async fn wait_for_database(ctx: &Context) -> Result<()> {
    let reporter = ctx.reporter();
    reporter.info("Waiting for databases to be ready...");

    match &ctx.settings.database.readiness {
        Readiness::FixedDelay { seconds } => {
            debug!(seconds, "fixed post-start delay");
            tokio::time::sleep(Duration::from_secs(*seconds)).await;
        }
        Readiness::Probe {
            command,
            attempts,
            interval_secs,
        } => {
            let Some((program, args)) = command.split_first() else {
                return Ok(());
            };
            let probe = CommandSpec::new(program).args(args.iter().cloned()).captured();

            for attempt in 1..=*attempts {
                let ready = match ctx.runner().run(&probe).await {
                    Ok(res) => res.success(),
                    Err(e) if !e.is_unexpected() => false,
                    Err(e) => return Err(e),
                };
                if ready {
                    info!(attempt, "database reported ready");
                    reporter.success("Database is accepting connections");
                    return Ok(());
                }
                debug!(attempt, "database not ready yet");
                if attempt < *attempts {
                    tokio::time::sleep(Duration::from_secs(*interval_secs)).await;
                }
            }

            warn!(attempts, "readiness probe exhausted");
            reporter.warning(&format!(
                "Database did not report ready after {attempts} attempts; migrating anyway"
            ));
        }
    }
    Ok(())
}
