//! Snapshot of environment variables with set-if-absent overlays.

use std::collections::BTreeMap;

use super::Manifest;

/// Environment variables visible to the service and its child processes.
///
/// The snapshot keeps inherited variables apart from the values layered on
/// top (manifest defaults and explicit overrides), so the overlay can be
/// handed to child processes without touching the real environment.
///
/// # Examples
/// ```
/// use rentomatic::settings::{Environment, Manifest};
///
/// let mut env = Environment::from_pairs([("POSTGRES_USER", "operator")]);
/// let manifest = Manifest::from_json_str(
///     r#"[{"name": "POSTGRES_USER", "value": "postgres"},
///         {"name": "POSTGRES_DB", "value": "postgres"}]"#,
/// )
/// .expect("valid manifest");
///
/// let applied = env.apply_defaults(&manifest);
/// assert_eq!(applied, ["POSTGRES_DB"]);
/// assert_eq!(env.string("POSTGRES_USER").as_deref(), Some("operator"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    inherited: BTreeMap<String, String>,
    overlay: BTreeMap<String, String>,
}

impl Environment {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        Self::from_pairs(
            std::env::vars_os().filter_map(|(name, value)| {
                Some((name.into_string().ok()?, value.into_string().ok()?))
            }),
        )
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inherited: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
            overlay: BTreeMap::new(),
        }
    }

    /// Fetch a value by name.
    pub fn string(&self, name: &str) -> Option<String> {
        self.get(name).map(ToOwned::to_owned)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.overlay
            .get(name)
            .or_else(|| self.inherited.get(name))
            .map(String::as_str)
    }

    /// Set `name` only when it is absent. Returns whether it was applied.
    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if self.get(&name).is_some() {
            return false;
        }
        self.overlay.insert(name, value.into());
        true
    }

    /// Apply every manifest entry with set-if-absent semantics.
    ///
    /// Returns the names that were applied, in manifest order.
    pub fn apply_defaults(&mut self, manifest: &Manifest) -> Vec<String> {
        manifest
            .entries()
            .iter()
            .filter(|entry| self.set_default(entry.name(), entry.value()))
            .map(|entry| entry.name().to_owned())
            .collect()
    }

    /// Override `name` unconditionally.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.overlay.insert(name.into(), value.into());
    }

    /// Values a child process needs on top of the inherited environment.
    pub fn overlay(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overlay
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}
