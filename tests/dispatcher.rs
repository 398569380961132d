use std::time::Duration;

use clap::Parser;
use gpuproxy_setup::cli::CliArgs;
use gpuproxy_setup::pipeline::{dispatch, EXIT_CANCELLED, EXIT_FAILURE, EXIT_OK};
use gpuproxy_setup::signal::Interrupts;
use gpuproxy_setup::types::TargetKind;
use gpuproxy_setup_test_utils::builders::TEMPLATE;
use gpuproxy_setup_test_utils::{
    init_tracing, with_timeout, ContextBuilder, FakeResponse, FakeRunner, Level,
};

fn args(flags: &[&str]) -> CliArgs {
    let mut argv = vec!["gpuproxy-setup"];
    argv.extend_from_slice(flags);
    CliArgs::parse_from(argv)
}

/// Raise one interrupt once the dev server owns the terminal.
fn interrupt_when_foreground(interrupts: Interrupts) {
    tokio::spawn(async move {
        while !interrupts.in_foreground() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        interrupts.raise();
    });
}

#[tokio::test]
async fn no_flags_prints_usage_and_runs_nothing() {
    init_tracing();
    let h = ContextBuilder::new().build();

    let code = dispatch(&h.ctx, &args(&[])).await;

    assert_eq!(code, EXIT_OK);
    assert!(h.runner.calls().is_empty());
    assert!(h.reporter.has(Level::Plain, "--setup"));
}

#[tokio::test]
async fn modifiers_without_actions_are_help_mode() {
    let h = ContextBuilder::new().build();

    let code = dispatch(&h.ctx, &args(&["--debug", "--force"])).await;

    assert_eq!(code, EXIT_OK);
    assert!(h.runner.calls().is_empty());
}

#[tokio::test]
async fn setup_runs_check_install_build_and_prints_next_steps() {
    let runner = FakeRunner::new();
    runner.on("go version", FakeResponse::ok().stdout("go version go1.22.1 linux/amd64\n"));
    let h = ContextBuilder::new().with_runner(runner).build();

    let code = dispatch(&h.ctx, &args(&["--setup"])).await;

    assert_eq!(code, EXIT_OK);
    let lines = h.runner.lines();
    let first_download = lines.iter().position(|l| l == "go mod download").unwrap();
    let first_build = lines.iter().position(|l| l.starts_with("go build")).unwrap();
    assert!(lines.iter().position(|l| l == "git --version").unwrap() < first_download);
    assert!(first_download < first_build);
    assert!(h.reporter.has(Level::Success, "go1.22.1"));
    assert!(h.reporter.has(Level::Header, "Setup Complete!"));
}

#[tokio::test]
async fn missing_compiler_stops_setup_before_install_or_build() {
    let runner = FakeRunner::new();
    runner.on("go version", FakeResponse::LaunchError("No such file or directory".into()));
    let h = ContextBuilder::new().with_runner(runner).build();

    let code = dispatch(&h.ctx, &args(&["--setup"])).await;

    assert_eq!(code, EXIT_FAILURE);
    assert_eq!(h.runner.count("mod download"), 0);
    assert_eq!(h.runner.count("go build"), 0);
    assert!(h.reporter.has(Level::Error, "Required tool not found: go"));
    assert!(!h.reporter.has(Level::Header, "Setup Complete!"));
}

#[tokio::test]
async fn missing_optional_tools_only_warn() {
    let runner = FakeRunner::new();
    runner.on("docker", FakeResponse::exit(127));
    let h = ContextBuilder::new().with_runner(runner).build();

    let code = dispatch(&h.ctx, &args(&["--check"])).await;

    assert_eq!(code, EXIT_OK);
    assert_eq!(h.reporter.at(Level::Warning).len(), 2);
}

#[tokio::test]
async fn environment_failure_does_not_stop_later_steps() {
    // No template: the environment step fails, status still runs.
    let h = ContextBuilder::new().build();

    let code = dispatch(&h.ctx, &args(&["--env", "--status"])).await;

    assert_eq!(code, EXIT_OK);
    assert!(h.reporter.has(Level::Error, "Template file not found"));
    assert!(h.reporter.has(Level::Header, "Project Status"));
}

#[tokio::test]
async fn build_failure_is_fatal() {
    let runner = FakeRunner::new();
    runner.on("./cmd/server", FakeResponse::fail("syntax error"));
    let h = ContextBuilder::new().with_runner(runner).build();

    let code = dispatch(&h.ctx, &args(&["--build", "--status"])).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(h.reporter.has(Level::Error, "syntax error"));
    assert!(h.reporter.has(Level::Error, "Build failed"));
    assert!(!h.reporter.has(Level::Header, "Project Status"));
}

#[tokio::test]
async fn docker_failure_is_fatal_with_captured_output() {
    let runner = FakeRunner::new();
    runner.on("docker-compose build", FakeResponse::fail("no Dockerfile found"));
    let h = ContextBuilder::new().with_runner(runner).build();

    let code = dispatch(&h.ctx, &args(&["--docker", "--status"])).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(h.reporter.has(Level::Error, "no Dockerfile found"));
    assert_eq!(h.runner.count("up -d"), 0);
}

#[tokio::test]
async fn failing_tests_are_fatal() {
    let runner = FakeRunner::new();
    runner.on("go test", FakeResponse::exit(1));
    let h = ContextBuilder::new().with_runner(runner).build();

    let code = dispatch(&h.ctx, &args(&["--test", "--docker"])).await;

    assert_eq!(code, EXIT_FAILURE);
    assert_eq!(h.runner.count("docker-compose"), 0);
}

#[tokio::test]
async fn admin_failure_is_not_fatal() {
    let h = ContextBuilder::new().with_answers([""]).with_all_binaries().build();

    let code = dispatch(&h.ctx, &args(&["--create-admin", "--status"])).await;

    assert_eq!(code, EXIT_OK);
    assert!(h.reporter.has(Level::Error, "Email is required"));
    assert!(h.reporter.has(Level::Header, "Project Status"));
}

#[tokio::test]
async fn interrupt_outside_dev_server_cancels_run() {
    let runner = FakeRunner::new();
    runner.on("go test", FakeResponse::Pending);
    let h = ContextBuilder::new().with_runner(runner).build();

    let interrupts = h.interrupts.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        interrupts.raise();
    });

    let code = with_timeout(dispatch(&h.ctx, &args(&["--test", "--status"]))).await;

    assert_eq!(code, EXIT_CANCELLED);
    assert!(h.reporter.has(Level::Info, "Operation cancelled by user"));
    assert!(!h.reporter.has(Level::Header, "Project Status"));
}

#[tokio::test]
async fn interrupt_while_waiting_for_an_answer_cancels_run() {
    let h = ContextBuilder::new()
        .with_template(TEMPLATE)
        .with_env("JWT_SECRET=existing\n")
        .with_unanswered_prompt()
        .build();

    let interrupts = h.interrupts.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        interrupts.raise();
    });

    let code = with_timeout(dispatch(&h.ctx, &args(&["--env", "--status"]))).await;

    assert_eq!(code, EXIT_CANCELLED);
    assert_eq!(h.prompter.questions(), vec!["Overwrite? (y/N): ".to_string()]);
    assert!(h.reporter.has(Level::Info, "Operation cancelled by user"));
    assert!(!h.reporter.has(Level::Header, "Project Status"));
    assert_eq!(h.env_contents().unwrap(), "JWT_SECRET=existing\n");
}

#[tokio::test]
async fn interrupt_during_dev_server_is_a_clean_stop() {
    let runner = FakeRunner::new();
    runner.on("aiserve-gpuproxyd -dv -dm", FakeResponse::Pending);
    let h = ContextBuilder::new()
        .with_runner(runner)
        .with_binary(TargetKind::Server)
        .build();
    interrupt_when_foreground(h.interrupts.clone());

    let code = with_timeout(dispatch(&h.ctx, &args(&["--dev", "--status"]))).await;

    assert_eq!(code, EXIT_OK);
    assert!(h.reporter.has(Level::Info, "Server stopped"));
    assert!(h.reporter.has(Level::Header, "Project Status"));
    assert!(!h.interrupts.in_foreground());
}

#[tokio::test]
async fn dev_server_nonzero_exit_is_only_a_warning() {
    let runner = FakeRunner::new();
    runner.on("aiserve-gpuproxyd", FakeResponse::exit(2));
    let h = ContextBuilder::new()
        .with_runner(runner)
        .with_binary(TargetKind::Server)
        .build();

    let code = dispatch(&h.ctx, &args(&["--dev"])).await;

    assert_eq!(code, EXIT_OK);
    assert!(h.reporter.has(Level::Warning, "Server exited with code 2"));
}

#[tokio::test]
async fn dev_server_killed_by_ctrl_c_is_a_clean_stop() {
    let runner = FakeRunner::new();
    runner.on("aiserve-gpuproxyd", FakeResponse::exit(-1));
    let h = ContextBuilder::new()
        .with_runner(runner)
        .with_binary(TargetKind::Server)
        .build();
    // The same Ctrl+C reaches the listener after the server is already gone.
    interrupt_when_foreground(h.interrupts.clone());

    let code = with_timeout(dispatch(&h.ctx, &args(&["--dev", "--status"]))).await;

    assert_eq!(code, EXIT_OK);
    assert!(h.reporter.has(Level::Info, "Server stopped"));
    assert!(!h.reporter.has(Level::Warning, "Server exited with code"));
    assert!(h.reporter.has(Level::Header, "Project Status"));
}

#[tokio::test]
async fn unexpected_filesystem_error_ends_run_with_trace() {
    // A plain file where the output directory should be.
    let h = ContextBuilder::new().with_file("bin", "not a directory").build();

    let code = dispatch(&h.ctx, &args(&["--build", "--status"])).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(h.reporter.has(Level::Error, "Unexpected error"));
    assert!(h.reporter.has(Level::Plain, "Not a directory"));
    assert!(h.runner.calls().is_empty());
}

#[tokio::test]
async fn full_flow_env_then_build_then_db() {
    let h = ContextBuilder::new()
        .with_template(TEMPLATE)
        .with_answers(["n", "n"])
        .with_binary(TargetKind::Admin)
        .build();

    let code = dispatch(&h.ctx, &args(&["--db", "--build", "--env", "--force"])).await;

    assert_eq!(code, EXIT_OK);
    let lines = h.runner.lines();
    assert_eq!(lines.len(), 4);
    assert!(lines[..3].iter().all(|l| l.starts_with("go build")));
    assert!(lines[3].ends_with("aiserve-gpuproxy-admin migrate"));
    assert!(h.env_contents().unwrap().contains("JWT_SECRET="));
}

#[tokio::test]
async fn status_lists_files_and_running_services() {
    let runner = FakeRunner::new();
    runner.on("compose ps", FakeResponse::ok().stdout("postgres   Up 3 minutes\n"));
    let h = ContextBuilder::new()
        .with_runner(runner)
        .with_env("JWT_SECRET=x\n")
        .with_binary(TargetKind::Server)
        .build();

    let code = dispatch(&h.ctx, &args(&["--status"])).await;

    assert_eq!(code, EXIT_OK);
    assert!(h.reporter.has(Level::Success, ".env file exists"));
    assert!(h.reporter.has(Level::Success, "Binary built: aiserve-gpuproxyd"));
    assert!(h.reporter.has(Level::Warning, "Binary not built: aiserve-gpuproxy-client"));
    assert!(h.reporter.has(Level::Plain, "postgres   Up"));
}

#[tokio::test]
async fn status_without_compose_stays_quiet() {
    let runner = FakeRunner::new();
    runner.on("compose ps", FakeResponse::LaunchError("not found".into()));
    let h = ContextBuilder::new().with_runner(runner).build();

    let code = dispatch(&h.ctx, &args(&["--status"])).await;

    assert_eq!(code, EXIT_OK);
    assert!(!h.reporter.has(Level::Plain, "Docker Services:"));
    assert!(h.reporter.at(Level::Error).is_empty());
}
