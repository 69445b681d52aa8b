//! Load `.issuerelay.toml` from a directory (CLI only). Lib callers inject
//! config via [`EnvConfig`](crate::environment::EnvConfig) instead.

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub(crate) struct RelayToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    db_path: Option<String>,
    script_path: Option<String>,
    verbose: Option<bool>,
}

/// Load `.issuerelay.toml` from `dir` if present. Returns None if the file is
/// missing or unreadable. CLI only.
pub(crate) fn load_relay_toml(dir: &Path) -> Option<RelayToml> {
    let path = dir.join(".issuerelay.toml");
    let s = std::fs::read_to_string(&path).ok()?;
    toml::from_str(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

impl RelayToml {
    pub(crate) fn db_path(&self) -> Option<&str> {
        self.settings.db_path.as_deref()
    }

    pub(crate) fn script_path(&self) -> Option<&str> {
        self.settings.script_path.as_deref()
    }

    pub(crate) fn verbose(&self) -> Option<bool> {
        self.settings.verbose
    }
}
