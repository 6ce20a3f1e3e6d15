//! `docker-compose` command lines.

use std::ffi::OsString;
use std::path::PathBuf;

use tokio::process::Command;

use super::OrchestrationError;
use crate::settings::{Environment, validate_config_name};

/// Executable invoked for every compose operation.
pub const COMPOSE_PROGRAM: &str = "docker-compose";
const COMPOSE_DIR: &str = "docker";

/// A compose project: one configuration name under a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeProject {
    project_root: PathBuf,
    config: String,
}

impl ComposeProject {
    /// # Errors
    ///
    /// Fails when `config` is not a plain file stem.
    pub fn new(project_root: impl Into<PathBuf>, config: &str) -> Result<Self, OrchestrationError> {
        let config = validate_config_name(config)?.to_owned();
        Ok(Self {
            project_root: project_root.into(),
            config,
        })
    }

    pub fn config(&self) -> &str {
        &self.config
    }

    /// `docker/<config>.yml` under the project root.
    pub fn compose_file(&self) -> PathBuf {
        self.project_root
            .join(COMPOSE_DIR)
            .join(format!("{}.yml", self.config))
    }

    /// Build `docker-compose -p <config> -f <file> <args...>`.
    ///
    /// Arguments are forwarded verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::MissingComposeFile`] when the compose
    /// file does not exist.
    pub fn command<I, S>(&self, args: I) -> Result<ComposeCommand, OrchestrationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let compose_file = self.compose_file();
        if !compose_file.is_file() {
            return Err(OrchestrationError::MissingComposeFile { path: compose_file });
        }

        let mut argv: Vec<OsString> = vec![
            "-p".into(),
            self.config.clone().into(),
            "-f".into(),
            compose_file.into_os_string(),
        ];
        argv.extend(args.into_iter().map(Into::into));
        Ok(ComposeCommand { args: argv })
    }
}

/// A fully assembled compose invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeCommand {
    args: Vec<OsString>,
}

impl ComposeCommand {
    pub fn program(&self) -> &str {
        COMPOSE_PROGRAM
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Human-readable command line for logs.
    pub fn display(&self) -> String {
        std::iter::once(COMPOSE_PROGRAM.to_owned())
            .chain(self.args.iter().map(|arg| arg.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Build a process inheriting stdio, with `env`'s overlay applied on top
    /// of the inherited environment.
    pub fn to_command(&self, env: &Environment) -> Command {
        let mut command = Command::new(COMPOSE_PROGRAM);
        command.args(&self.args).envs(env.overlay());
        command
    }
}

/// Whether `docker-compose logs <service>` output contains `needle`.
///
/// # Errors
///
/// Fails when the compose file is missing or the command cannot run.
pub async fn service_logs_contain(
    project: &ComposeProject,
    env: &Environment,
    service: &str,
    needle: &str,
) -> Result<bool, OrchestrationError> {
    let output = project
        .command(["logs", service])?
        .to_command(env)
        .output()
        .await
        .map_err(|source| OrchestrationError::Spawn {
            program: COMPOSE_PROGRAM.to_owned(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&output.stdout).contains(needle)
        || String::from_utf8_lossy(&output.stderr).contains(needle))
}
