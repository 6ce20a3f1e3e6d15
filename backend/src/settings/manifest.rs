//! JSON manifests of environment defaults.
//!
//! A manifest lives at `config/<name>.json` under the project root and holds
//! a list of `{"name": ..., "value": ...}` objects.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;

use super::SettingsError;

const MANIFEST_DIR: &str = "config";

/// One default environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    name: String,
    value: String,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Ordered list of environment defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Fails when the text is not a list of `{name, value}` string pairs.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load `config/<config>.json` relative to `project_root`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidConfigName`] for names that are not a
    /// single path component, and read or parse errors otherwise.
    pub fn load(project_root: &Path, config: &str) -> Result<Self, SettingsError> {
        let relative = manifest_path(config)?;
        let path = project_root.join(&relative);
        let json = Dir::open_ambient_dir(project_root, ambient_authority())
            .and_then(|dir| dir.read_to_string(&relative))
            .map_err(|source| SettingsError::ManifestRead {
                path: path.clone(),
                source,
            })?;
        Self::from_json_str(&json).map_err(|source| SettingsError::ManifestParse { path, source })
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }
}

impl FromIterator<ManifestEntry> for Manifest {
    fn from_iter<I: IntoIterator<Item = ManifestEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Check that `config` can be used as a file stem.
///
/// # Errors
///
/// Rejects empty names and anything other than ASCII letters, digits, `-`
/// and `_`.
pub fn validate_config_name(config: &str) -> Result<&str, SettingsError> {
    let valid = !config.is_empty()
        && config
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(config)
    } else {
        Err(SettingsError::InvalidConfigName {
            name: config.to_owned(),
        })
    }
}

/// Manifest location for `config`, relative to the project root.
///
/// # Examples
/// ```
/// use rentomatic::settings::manifest_path;
///
/// let path = manifest_path("testing").expect("valid name");
/// assert_eq!(path, std::path::Path::new("config/testing.json"));
/// ```
pub fn manifest_path(config: &str) -> Result<PathBuf, SettingsError> {
    let config = validate_config_name(config)?;
    Ok(Path::new(MANIFEST_DIR).join(format!("{config}.json")))
}
