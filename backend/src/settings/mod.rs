//! Environment-driven configuration.
//!
//! Configuration is resolved in two layers. An [`Environment`] snapshot of
//! the process environment is overlaid with the defaults listed in a JSON
//! [`Manifest`]; variables already set always win. The merged view is then
//! parsed once into an [`AppConfig`]. Nothing in this module mutates the
//! process environment.

mod app;
mod environment;
mod manifest;
mod postgres;

use std::path::PathBuf;

pub use app::{AppConfig, ConfigVariant};
pub use environment::Environment;
pub use manifest::{Manifest, ManifestEntry, manifest_path, validate_config_name};
pub use postgres::PostgresSettings;

/// Variable naming the manifest used by the `manage` CLI.
pub const APPLICATION_CONFIG_ENV: &str = "APPLICATION_CONFIG";
/// Manifest selected when `APPLICATION_CONFIG` is unset.
pub const DEFAULT_APPLICATION_CONFIG: &str = "production";

/// Errors raised while loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The configuration name cannot be used to locate a manifest.
    #[error("invalid configuration name '{name}'")]
    InvalidConfigName { name: String },
    /// Reading the manifest file failed.
    #[error("failed to read manifest at {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The manifest is not a JSON list of `{name, value}` objects.
    #[error("failed to parse manifest at {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A database URL could not be assembled from the settings.
    #[error("cannot build database URL: {message}")]
    DatabaseUrl { message: String },
}
