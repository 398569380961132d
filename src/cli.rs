// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! All action flags are independent and combinable; steps always run in
//! pipeline order regardless of the order the flags were given in.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

const EXAMPLES: &str = "\
Examples:
  # Quick setup (checks dependencies, installs packages, builds project)
  gpuproxy-setup --setup

  # Full setup with environment and database
  gpuproxy-setup --setup --env --db

  # Build with debug symbols
  gpuproxy-setup --build --debug

  # Set up and run with Docker
  gpuproxy-setup --docker

  # Create admin user
  gpuproxy-setup --create-admin

  # Start development server
  gpuproxy-setup --dev";

/// Command-line arguments for `gpuproxy-setup`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "gpuproxy-setup",
    version,
    about = "aiserve-gpuproxyd configuration and setup utility",
    after_long_help = EXAMPLES
)]
pub struct CliArgs {
    /// Run basic setup (check deps, install packages, build).
    #[arg(long)]
    pub setup: bool,

    /// Check dependencies only.
    #[arg(long)]
    pub check: bool,

    /// Install Go dependencies.
    #[arg(long)]
    pub deps: bool,

    /// Set up environment configuration.
    #[arg(long)]
    pub env: bool,

    /// Build the project.
    #[arg(long)]
    pub build: bool,

    /// Set up and migrate the database.
    #[arg(long)]
    pub db: bool,

    /// Create an admin user.
    #[arg(long)]
    pub create_admin: bool,

    /// Run tests.
    #[arg(long)]
    pub test: bool,

    /// Start the development server.
    #[arg(long)]
    pub dev: bool,

    /// Set up and run with Docker.
    #[arg(long)]
    pub docker: bool,

    /// Show project status.
    #[arg(long)]
    pub status: bool,

    /// Build with debug symbols (disables optimisation and inlining).
    #[arg(long)]
    pub debug: bool,

    /// Force overwrite of existing files.
    #[arg(long)]
    pub force: bool,

    /// Use Docker for database services.
    #[arg(long)]
    pub docker_db: bool,

    /// Project root. Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Settings file (TOML).
    ///
    /// Default: `gpuproxy-setup.toml` in the project root, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GPUPROXY_SETUP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
