//! Idempotent creation of the application database.
//!
//! `CREATE DATABASE` cannot run inside a transaction, so this uses the
//! synchronous `postgres` client against the maintenance database rather
//! than a pooled Diesel connection.

use std::fmt;

use postgres::error::SqlState;
use postgres::{Client, NoTls};
use tracing::info;

use crate::settings::PostgresSettings;

/// Largest identifier PostgreSQL accepts without truncation.
const MAX_IDENTIFIER_LEN: usize = 63;

/// A database name safe to interpolate into DDL.
///
/// # Examples
/// ```
/// use rentomatic::outbound::persistence::DatabaseName;
///
/// assert!(DatabaseName::new("application").is_ok());
/// assert!(DatabaseName::new("app\"; DROP TABLE room; --").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseName(String);

impl DatabaseName {
    /// Accept names made of ASCII letters, digits and underscores that do
    /// not start with a digit.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::InvalidDatabaseName`] otherwise.
    pub fn new(name: impl Into<String>) -> Result<Self, ProvisioningError> {
        let name = name.into();
        let starts_well = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid = starts_well
            && name.len() <= MAX_IDENTIFIER_LEN
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(Self(name))
        } else {
            Err(ProvisioningError::InvalidDatabaseName { name })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn create_statement(&self) -> String {
        format!("CREATE DATABASE \"{}\"", self.0)
    }
}

impl fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a provisioning attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyExists,
}

/// Errors raised while provisioning.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
    #[error("invalid database name '{name}'")]
    InvalidDatabaseName { name: String },
    #[error("cannot connect to database {database}: {message}")]
    Connection { database: String, message: String },
    #[error("CREATE DATABASE {database} failed: {message}")]
    Create { database: String, message: String },
}

/// Render a `postgres` error including SQLSTATE and server message.
fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {}: {}",
        db_error.code().code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

fn client_config(settings: &PostgresSettings) -> postgres::Config {
    let mut config = postgres::Config::new();
    config
        .host(&settings.hostname)
        .port(settings.port)
        .user(&settings.user)
        .password(&settings.password)
        .dbname(&settings.maintenance_db);
    config
}

/// Classify a failed `CREATE DATABASE` by its SQLSTATE.
fn classify_failure(
    database: &DatabaseName,
    code: Option<&SqlState>,
    message: String,
) -> Result<ProvisionOutcome, ProvisioningError> {
    if code == Some(&SqlState::DUPLICATE_DATABASE) {
        return Ok(ProvisionOutcome::AlreadyExists);
    }
    Err(ProvisioningError::Create {
        database: database.to_string(),
        message,
    })
}

/// Create the application database unless it already exists.
///
/// Blocking; call it outside the async runtime.
///
/// # Errors
///
/// Fails on an invalid database name, when the maintenance database is
/// unreachable, or on any `CREATE DATABASE` failure other than
/// `duplicate_database`.
pub fn create_application_database(
    settings: &PostgresSettings,
) -> Result<ProvisionOutcome, ProvisioningError> {
    let database = DatabaseName::new(settings.application_db.as_str())?;

    let mut client = client_config(settings)
        .connect(NoTls)
        .map_err(|err| ProvisioningError::Connection {
            database: settings.maintenance_db.clone(),
            message: format_postgres_error(&err),
        })?;

    let outcome = match client.batch_execute(&database.create_statement()) {
        Ok(()) => ProvisionOutcome::Created,
        Err(err) => classify_failure(&database, err.code(), format_postgres_error(&err))?,
    };
    match outcome {
        ProvisionOutcome::Created => info!(database = %database, "created application database"),
        ProvisionOutcome::AlreadyExists => {
            info!(database = %database, "application database already exists");
        }
    }
    Ok(outcome)
}
