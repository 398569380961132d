// src/steps/deps.rs

//! Toolchain probing (`--check`) and module download (`--deps`).

use tracing::{debug, warn};

use crate::config::Settings;
use crate::context::Context;
use crate::errors::{Result, SetupError};
use crate::exec::{execute, CommandSpec};
use crate::types::Requirement;

/// One row of the dependency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolProbe {
    pub name: String,
    pub probe: CommandSpec,
    pub description: &'static str,
    pub requirement: Requirement,
}

/// The fixed set of tools the project needs, in probe order.
pub fn dependency_table(settings: &Settings) -> Vec<ToolProbe> {
    let tc = &settings.toolchain;
    let row = |program: &str, arg: &str, description: &'static str, requirement| ToolProbe {
        name: program.to_string(),
        probe: CommandSpec::new(program).arg(arg).captured(),
        description,
        requirement,
    };
    vec![
        row(tc.compiler.as_str(), "version", "Go 1.25.2 or later", Requirement::Required),
        row(
            tc.container_engine.as_str(),
            "--version",
            "Docker (optional, for containerized deployment)",
            Requirement::Optional,
        ),
        row(tc.compose.as_str(), "--version", "Docker Compose (optional)", Requirement::Optional),
        row(tc.vcs.as_str(), "--version", "Git", Requirement::Required),
    ]
}

/// Outcome of probing every tool in the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyReport {
    /// `(tool, version line)` for each tool that answered.
    pub found: Vec<(String, String)>,
    pub missing_required: Vec<String>,
    pub missing_optional: Vec<String>,
}

impl DependencyReport {
    pub fn all_required_present(&self) -> bool {
        self.missing_required.is_empty()
    }

    pub fn into_result(self) -> Result<Self> {
        if self.all_required_present() {
            Ok(self)
        } else {
            Err(SetupError::DependencyCheckFailed {
                missing: self.missing_required,
            })
        }
    }
}

/// Probe each tool once. A tool that cannot even be launched counts the same
/// as one that exits non-zero.
pub async fn check_dependencies(ctx: &Context) -> Result<DependencyReport> {
    let reporter = ctx.reporter();
    reporter.header("Checking Dependencies");

    let mut report = DependencyReport::default();
    for tool in dependency_table(&ctx.settings) {
        let version = match ctx.runner().run(&tool.probe).await {
            Ok(res) if res.success() => Some(res.stdout_text().trim().to_string()),
            Ok(res) => {
                debug!(tool = %tool.name, exit_code = res.code, "probe exited non-zero");
                None
            }
            Err(SetupError::ExternalCommand { message, .. }) => {
                debug!(tool = %tool.name, error = %message, "probe could not start");
                None
            }
            Err(other) => return Err(other),
        };

        match (version, tool.requirement) {
            (Some(version), _) => {
                reporter.success(&format!("{}: {}", tool.name, version));
                report.found.push((tool.name, version));
            }
            (None, Requirement::Optional) => {
                reporter.warning(&format!("{} not found (optional): {}", tool.name, tool.description));
                report.missing_optional.push(tool.name);
            }
            (None, Requirement::Required) => {
                let err = SetupError::ToolMissing {
                    name: tool.name.clone(),
                    description: tool.description.to_string(),
                };
                warn!(tool = %tool.name, "required tool missing");
                reporter.error(&err.to_string());
                report.missing_required.push(tool.name);
            }
        }
    }

    Ok(report)
}

/// `go mod download` then `go mod tidy`; the first failure stops the step.
pub async fn install_dependencies(ctx: &Context) -> Result<()> {
    let reporter = ctx.reporter();
    let compiler = &ctx.settings.toolchain.compiler;
    reporter.header("Installing Dependencies");

    reporter.info("Downloading Go modules...");
    let download = CommandSpec::new(compiler)
        .args(["mod", "download"])
        .captured()
        .checked();
    execute(ctx.runner(), &download).await?;

    reporter.info("Tidying Go modules...");
    let tidy = CommandSpec::new(compiler)
        .args(["mod", "tidy"])
        .captured()
        .checked();
    execute(ctx.runner(), &tidy).await?;

    reporter.success("Dependencies installed successfully");
    Ok(())
}
