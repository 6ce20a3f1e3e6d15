//! Application configuration resolved from an [`Environment`].

use std::fmt;
use std::str::FromStr;

use super::{Environment, PostgresSettings, SettingsError};

const FLASK_CONFIG_ENV: &str = "FLASK_CONFIG";
const FLASK_ENV_ENV: &str = "FLASK_ENV";
const VARIANT_EXPECTED: &str = "development|testing|production";

/// Deployment flavour selected by `FLASK_CONFIG`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConfigVariant {
    Development,
    Testing,
    #[default]
    Production,
}

impl ConfigVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Production => "production",
        }
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Testing | Self::Production => "info",
        }
    }
}

impl fmt::Display for ConfigVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised variant name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant;

impl FromStr for ConfigVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Development),
            "test" | "testing" => Ok(Self::Testing),
            "prod" | "production" => Ok(Self::Production),
            _ => Err(UnknownVariant),
        }
    }
}

/// Configuration the service runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub variant: ConfigVariant,
    /// Database settings; `None` selects the in-memory repository.
    pub postgres: Option<PostgresSettings>,
}

impl AppConfig {
    /// Resolve configuration from `env`.
    ///
    /// `FLASK_CONFIG` selects the variant, falling back to `FLASK_ENV` and
    /// then to production.
    ///
    /// # Errors
    ///
    /// Fails on an unknown variant name or incomplete database settings.
    ///
    /// # Examples
    /// ```
    /// use rentomatic::settings::{AppConfig, ConfigVariant, Environment};
    ///
    /// let env = Environment::from_pairs([("FLASK_CONFIG", "dev")]);
    /// let config = AppConfig::from_environment(&env).expect("valid config");
    /// assert_eq!(config.variant, ConfigVariant::Development);
    /// assert!(config.postgres.is_none());
    /// ```
    pub fn from_environment(env: &Environment) -> Result<Self, SettingsError> {
        let variant = variant_from_env(env)?;
        let postgres = PostgresSettings::from_environment(env)?;
        Ok(Self { variant, postgres })
    }
}

fn variant_from_env(env: &Environment) -> Result<ConfigVariant, SettingsError> {
    let lookup = [FLASK_CONFIG_ENV, FLASK_ENV_ENV]
        .into_iter()
        .find_map(|name| env.get(name).map(|value| (name, value)));

    match lookup {
        None => Ok(ConfigVariant::default()),
        Some((name, value)) => value.parse().map_err(|UnknownVariant| SettingsError::InvalidEnv {
            name,
            value: value.to_owned(),
            expected: VARIANT_EXPECTED,
        }),
    }
}
