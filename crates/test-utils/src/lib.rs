pub mod builders;
pub mod fake_runner;
pub mod scripted_ui;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

pub use builders::{ContextBuilder, TestHarness};
pub use fake_runner::{FakeResponse, FakeRunner, Invocation};
pub use scripted_ui::{Level, RecordingReporter, ScriptedPrompter};

static INIT: Once = Once::new();

/// Initialise tracing for tests, once per test binary.
///
/// Output goes through `with_test_writer()`, so it only shows for failing
/// tests unless run with `--nocapture`. Override the filter with `RUST_LOG`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gpuproxy_setup=debug"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Fail the test if `f` takes longer than five seconds.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}
