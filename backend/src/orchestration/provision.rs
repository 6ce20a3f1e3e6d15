//! Database provisioning: create the application database, then migrate it.

use tracing::info;

use super::OrchestrationError;
use crate::outbound::persistence::{
    ProvisionOutcome, create_application_database, run_pending_migrations,
};
use crate::settings::PostgresSettings;

/// What provisioning did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub database: ProvisionOutcome,
    /// Migration versions applied in this run.
    pub migrations: Vec<String>,
}

/// Create the application database if needed and apply pending migrations.
///
/// Both steps are idempotent. Blocking; call it outside the async runtime.
///
/// # Errors
///
/// Fails when either step fails for a reason other than the database
/// already existing.
pub fn provision_database(
    settings: &PostgresSettings,
) -> Result<ProvisionReport, OrchestrationError> {
    let database = create_application_database(settings)?;
    let migrations = run_pending_migrations(&settings.application_database_url()?)?;
    info!(
        database = %settings.application_db,
        applied = migrations.len(),
        "application database provisioned"
    );
    Ok(ProvisionReport {
        database,
        migrations,
    })
}
