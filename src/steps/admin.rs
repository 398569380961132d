// src/steps/admin.rs

use tracing::info;

use crate::context::Context;
use crate::errors::{Result, SetupError};
use crate::exec::{execute, CommandSpec};
use crate::steps::{path_arg, require_binary};
use crate::types::TargetKind;
use crate::ui::{ask_required, Prompter};

const DEFAULT_ADMIN_NAME: &str = "Admin";

/// Operator account collected before anything is invoked.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl AdminAccount {
    /// Email and password are required; the display name defaults to
    /// `Admin`.
    pub async fn collect(prompter: &dyn Prompter) -> Result<Self> {
        let email = ask_required(prompter, "Admin email", "Email").await?;
        let password = ask_required(prompter, "Admin password", "Password").await?;
        let name = prompter.ask("Admin name: ").await?;
        let name = match name.trim() {
            "" => DEFAULT_ADMIN_NAME.to_string(),
            other => other.to_string(),
        };
        Ok(Self {
            email,
            password,
            name,
        })
    }
}

/// `--create-admin`: create the account, then elevate it.
///
/// If elevation fails the account stays created but unprivileged; nothing is
/// rolled back.
pub async fn create_admin_user(ctx: &Context) -> Result<()> {
    let reporter = ctx.reporter();
    reporter.header("Create Admin User");

    let admin = path_arg(&require_binary(ctx, TargetKind::Admin)?);
    let account = AdminAccount::collect(ctx.prompter()).await?;

    reporter.info("Creating user...");
    let create = CommandSpec::new(&admin)
        .args([
            "create-user",
            account.email.as_str(),
            account.password.as_str(),
            account.name.as_str(),
        ])
        .captured();
    let res = ctx.runner().run(&create).await?;
    if !res.success() {
        return Err(SetupError::external("create-user", res.failure_message()));
    }
    info!(email = %account.email, "user created");

    reporter.info("Granting admin privileges...");
    let elevate = CommandSpec::new(&admin)
        .args(["make-admin", account.email.as_str()])
        .captured()
        .checked();
    execute(ctx.runner(), &elevate).await.map_err(|e| match e {
        SetupError::ExternalCommand { message, .. } => {
            SetupError::external("make-admin", message).with_hint(format!(
                "User {} was created but is not an admin; rerun `{} make-admin {}`",
                account.email, admin, account.email
            ))
        }
        other => other,
    })?;

    reporter.success(&format!("Admin user created: {}", account.email));
    Ok(())
}
