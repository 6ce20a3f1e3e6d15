//! Behavioural tests for manifest loading and docker-compose invocation.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;

use rentomatic::orchestration::{COMPOSE_PROGRAM, ComposeProject, OrchestrationError};
use rentomatic::settings::{AppConfig, ConfigVariant, Environment, Manifest};
use rstest::{fixture, rstest};
use tempfile::TempDir;

const TESTING_MANIFEST: &str = r#"[
    {"name": "FLASK_CONFIG", "value": "testing"},
    {"name": "POSTGRES_DB", "value": "postgres"},
    {"name": "POSTGRES_USER", "value": "postgres"},
    {"name": "POSTGRES_HOSTNAME", "value": "localhost"},
    {"name": "POSTGRES_PORT", "value": "5433"},
    {"name": "POSTGRES_PASSWORD", "value": "postgres"},
    {"name": "APPLICATION_DB", "value": "test"},
    {"name": "EXTRA_SETTING", "value": "passed-through"}
]"#;

/// Project tree with a `testing` manifest and compose file.
#[fixture]
fn project() -> TempDir {
    let root = tempfile::tempdir().expect("temp dir");
    write(root.path(), "config/testing.json", TESTING_MANIFEST);
    write(root.path(), "docker/testing.yml", "services: {}\n");
    root
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, contents).expect("write fixture");
}

#[rstest]
fn compose_command_names_project_and_file(project: TempDir) {
    let compose = ComposeProject::new(project.path(), "testing").expect("valid config");

    let command = compose
        .command(["up", "-d", "--build"])
        .expect("compose file exists");

    let expected: Vec<OsString> = vec![
        "-p".into(),
        "testing".into(),
        "-f".into(),
        project.path().join("docker/testing.yml").into_os_string(),
        "up".into(),
        "-d".into(),
        "--build".into(),
    ];
    assert_eq!(command.program(), COMPOSE_PROGRAM);
    assert_eq!(command.args(), expected.as_slice());
}

#[rstest]
fn arguments_with_spaces_are_not_split(project: TempDir) {
    let compose = ComposeProject::new(project.path(), "testing").expect("valid config");

    let command = compose
        .command(["exec", "postgres", "psql -c 'select 1'"])
        .expect("compose file exists");

    assert_eq!(
        command.args().last().map(OsString::as_os_str),
        Some(OsStr::new("psql -c 'select 1'"))
    );
}

#[rstest]
fn missing_compose_file_is_reported(project: TempDir) {
    let compose = ComposeProject::new(project.path(), "staging").expect("valid config");

    let err = compose.command(["ps"]).expect_err("no compose file");

    assert!(matches!(err, OrchestrationError::MissingComposeFile { .. }));
}

#[rstest]
#[case("../etc")]
#[case("")]
#[case("prod uction")]
fn config_names_must_be_plain(project: TempDir, #[case] config: &str) {
    assert!(ComposeProject::new(project.path(), config).is_err());
}

#[rstest]
fn manifest_defaults_never_override_existing_variables(project: TempDir) {
    let manifest = Manifest::load(project.path(), "testing").expect("manifest loads");
    let mut env = Environment::from_pairs([("POSTGRES_PORT", "6543")]);

    let applied = env.apply_defaults(&manifest);

    assert_eq!(env.get("POSTGRES_PORT"), Some("6543"));
    assert_eq!(env.get("EXTRA_SETTING"), Some("passed-through"));
    assert!(!applied.iter().any(|name| name == "POSTGRES_PORT"));
    assert_eq!(applied.len(), 7);
}

#[rstest]
fn manifest_feeds_application_settings(project: TempDir) {
    let manifest = Manifest::load(project.path(), "testing").expect("manifest loads");
    let mut env = Environment::from_pairs(Vec::<(String, String)>::new());
    env.apply_defaults(&manifest);

    let config = AppConfig::from_environment(&env).expect("valid settings");

    assert_eq!(config.variant, ConfigVariant::Testing);
    let postgres = config.postgres.expect("database configured");
    assert_eq!(postgres.port, 5433);
    assert_eq!(postgres.application_db, "test");
}

#[rstest]
fn missing_manifest_is_an_error(project: TempDir) {
    assert!(Manifest::load(project.path(), "development").is_err());
}

#[cfg(unix)]
mod process {
    use super::*;
    use rentomatic::orchestration::{exit_code, run_forwarding_interrupts};
    use tokio::process::Command;

    fn shell(script: &str) -> Command {
        let mut command = Command::new("sh");
        command.arg("-c").arg(script);
        command
    }

    #[rstest]
    #[case("exit 0", 0)]
    #[case("exit 3", 3)]
    #[case("kill -TERM $$", 128 + 15)]
    #[tokio::test]
    async fn child_exit_codes_are_mirrored(#[case] script: &str, #[case] expected: i32) {
        let code = run_forwarding_interrupts(shell(script))
            .await
            .expect("child runs");

        assert_eq!(code, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn overlay_variables_reach_the_child() {
        let mut env = Environment::from_pairs(Vec::<(String, String)>::new());
        env.set("ROOMS_PROBE", "overlay");
        let mut command = shell("test \"$ROOMS_PROBE\" = overlay");
        command.envs(env.overlay());

        let code = run_forwarding_interrupts(command).await.expect("child runs");

        assert_eq!(code, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_programs_fail_to_spawn() {
        let result = run_forwarding_interrupts(Command::new("rentomatic-no-such-program")).await;

        assert!(matches!(result, Err(OrchestrationError::Spawn { .. })));
    }

    #[rstest]
    fn exit_code_falls_back_to_signal_number() {
        use std::os::unix::process::ExitStatusExt;

        let status = std::process::ExitStatus::from_raw(9);

        assert_eq!(exit_code(status), 128 + 9);
    }
}
