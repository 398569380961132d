use std::io::Write;
use std::path::Path;

use gpuproxy_setup::config::{load_and_validate, resolve_settings, ProjectPaths};
use gpuproxy_setup::errors::SetupError;
use gpuproxy_setup::types::{Readiness, TargetKind};
use tempfile::NamedTempFile;

fn settings_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{body}").unwrap();
    file
}

#[test]
fn empty_file_yields_repository_defaults() {
    let file = settings_file("");

    let settings = load_and_validate(file.path()).unwrap();

    assert_eq!(settings.project.env_file, ".env");
    assert_eq!(settings.toolchain.compiler, "go");
    assert_eq!(settings.build.target(TargetKind::Server).binary, "aiserve-gpuproxyd");
    assert_eq!(settings.database.services, vec!["postgres", "redis"]);
    assert_eq!(settings.database.readiness, Readiness::FixedDelay { seconds: 5 });
    let keys: Vec<_> = settings.providers.iter().map(|p| p.env_key.as_str()).collect();
    assert_eq!(keys, vec!["VASTAI_API_KEY", "IONET_API_KEY"]);
}

#[test]
fn overrides_layout_readiness_and_providers() {
    let file = settings_file(
        r#"
[project]
bin_dir = "out"

[toolchain]
compose = "podman-compose"

[build.admin]
source = "./tools/admin"
binary = "proxy-admin"

[database]
services = ["postgres"]
readiness = { mode = "probe", attempts = 4 }

[[provider]]
label = "RunPod"
env_key = "RUNPOD_API_KEY"
"#,
    );

    let settings = load_and_validate(file.path()).unwrap();

    assert_eq!(settings.toolchain.compose, "podman-compose");
    assert_eq!(settings.toolchain.compiler, "go");
    assert_eq!(
        settings.database.readiness,
        Readiness::Probe {
            command: ["docker-compose", "exec", "-T", "postgres", "pg_isready"]
                .map(String::from)
                .to_vec(),
            attempts: 4,
            interval_secs: 2,
        }
    );
    assert_eq!(settings.providers.len(), 1);
    assert_eq!(settings.providers[0].label, "RunPod");

    let paths = ProjectPaths::resolve("/srv/proxy", &settings);
    assert_eq!(
        paths.binary(&settings, TargetKind::Admin),
        Path::new("/srv/proxy/out/proxy-admin")
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let file = settings_file("[toolchain]\ncompilr = \"go\"\n");

    let err = load_and_validate(file.path()).unwrap_err();

    assert!(matches!(err, SetupError::TomlError(_)), "got {err:?}");
}

#[test]
fn duplicate_binary_names_fail_validation() {
    let file = settings_file(
        r#"
[build.client]
source = "./cmd/client"
binary = "aiserve-gpuproxyd"
"#,
    );

    match load_and_validate(file.path()) {
        Err(SetupError::ConfigError(msg)) => assert!(msg.contains("used by another target")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn zero_probe_attempts_fail_validation() {
    let file = settings_file("[database]\nreadiness = { mode = \"probe\", attempts = 0 }\n");

    let err = load_and_validate(file.path()).unwrap_err();

    assert!(err.to_string().contains("attempts must be >= 1"));
}

#[test]
fn resolve_prefers_root_file_then_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let defaults = resolve_settings(dir.path(), None).unwrap();
    assert_eq!(defaults.dev.listen_address, "http://localhost:8080");

    std::fs::write(
        dir.path().join("gpuproxy-setup.toml"),
        "[dev]\nlisten_address = \"http://localhost:9090\"\n",
    )
    .unwrap();
    let from_root = resolve_settings(dir.path(), None).unwrap();
    assert_eq!(from_root.dev.listen_address, "http://localhost:9090");
}

#[test]
fn explicit_missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = resolve_settings(dir.path(), Some(&missing)).unwrap_err();

    assert!(matches!(err, SetupError::ConfigError(ref m) if m.contains("nope.toml")));
    assert!(err.is_unexpected());
}
