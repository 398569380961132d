// src/main.rs

use std::process::ExitCode;

use gpuproxy_setup::{cli, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = cli::parse();
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("gpuproxy-setup error: {err:?}");
        return ExitCode::FAILURE;
    }
    ExitCode::from(run(args).await)
}
