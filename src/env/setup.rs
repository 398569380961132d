// src/env/setup.rs

use tracing::{debug, info};

use crate::context::Context;
use crate::env::flows::{DatabaseSettings, ProviderKeys};
use crate::env::secret::{generate_secret, AUXILIARY_SECRET_LEN, PRIMARY_SECRET_LEN};
use crate::errors::{Result, SetupError};
use crate::ui::confirm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvSetupOutcome {
    /// The operator declined to overwrite an existing env file.
    Skipped,
    Written,
}

/// The `--env` step.
///
/// Copies the template over the env file, writes a fresh primary secret in
/// place of the placeholder, then offers the database and provider
/// sub-flows.
pub async fn setup_environment(ctx: &Context, force: bool) -> Result<EnvSetupOutcome> {
    let reporter = ctx.reporter();
    let fs = ctx.fs();
    let env_path = &ctx.paths.env_file;
    let template = &ctx.paths.env_template;

    reporter.header("Environment Configuration");

    if fs.exists(env_path) && !force {
        reporter.warning(&format!(
            "{} file already exists at {}",
            ctx.settings.project.env_file,
            env_path.display()
        ));
        if !confirm(ctx.prompter(), "Overwrite?").await? {
            reporter.info("Skipping environment setup");
            return Ok(EnvSetupOutcome::Skipped);
        }
    }

    if !fs.is_file(template) {
        return Err(SetupError::TemplateMissing(template.display().to_string()));
    }

    fs.copy(template, env_path)?;
    reporter.success(&format!(
        "Created {} from {}",
        ctx.settings.project.env_file, ctx.settings.project.env_template
    ));

    reporter.info("Generating secure secrets...");
    let primary = generate_secret(PRIMARY_SECRET_LEN);
    // Generated for parity with earlier releases; nothing consumes it yet.
    let auxiliary = generate_secret(AUXILIARY_SECRET_LEN);
    debug!(?primary, ?auxiliary, "secrets generated");

    let placeholder = &ctx.settings.project.secret_placeholder;
    let content = fs.read_to_string(env_path)?;
    if content.contains(placeholder.as_str()) {
        let replaced = content.replacen(placeholder.as_str(), primary.expose(), 1);
        fs.write(env_path, replaced.as_bytes())?;
        reporter.success("Generated secure JWT secret");
    } else {
        reporter.warning(&format!(
            "Secret placeholder not found in template (`{placeholder}`); no secret written"
        ));
    }

    reporter.plain("");
    reporter.plain("Optional Configuration:");
    reporter.plain("You can configure these now or edit the env file later");
    reporter.plain("");

    if confirm(ctx.prompter(), "Configure database settings?").await? {
        reporter.plain("Database Configuration:");
        let db = DatabaseSettings::collect(ctx.prompter()).await?;
        db.apply(fs, env_path)?;
        info!(kind = db.kind().as_str(), "database settings written");
    }

    if confirm(ctx.prompter(), "Configure GPU provider API keys?").await? {
        reporter.plain("GPU Provider Configuration:");
        reporter.plain("(Leave blank to skip)");
        let keys = ProviderKeys::collect(ctx.prompter(), &ctx.settings.providers).await?;
        keys.apply(fs, env_path)?;
        info!(count = keys.entries.len(), "provider keys written");
    }

    reporter.success(&format!(
        "Environment configuration saved to {}",
        env_path.display()
    ));
    reporter.info("Review and update the env file as needed before running the server");
    Ok(EnvSetupOutcome::Written)
}
