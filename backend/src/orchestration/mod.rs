//! Process orchestration behind the `manage` binary.
//!
//! Builds `docker-compose` invocations for a named configuration, runs them
//! with the merged [`Environment`](crate::settings::Environment) overlay,
//! forwards interrupts, and provisions the application database.

mod compose;
mod process;
mod provision;
mod readiness;

use std::path::PathBuf;

pub use compose::{COMPOSE_PROGRAM, ComposeCommand, ComposeProject, service_logs_contain};
pub use process::{exit_code, run_forwarding_interrupts};
pub use provision::{ProvisionReport, provision_database};
pub use readiness::{ReadinessPolicy, wait_until_ready};

use crate::outbound::persistence::{MigrationError, ProvisioningError};
use crate::settings::SettingsError;

/// Errors raised while orchestrating external processes.
#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The compose file for the selected configuration does not exist.
    #[error("compose file {path} does not exist")]
    MissingComposeFile { path: PathBuf },
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{service} did not become ready after {attempts} attempts")]
    NotReady { service: String, attempts: u32 },
    /// `POSTGRES_HOSTNAME` is unset, so there is no database to provision.
    #[error("no PostgreSQL settings configured; set POSTGRES_HOSTNAME")]
    MissingDatabaseSettings,
    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
}
