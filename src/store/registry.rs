//! Installed-version registry.
//!
//! A single JSON file mapping package name to its installed versions, each
//! carrying the install directory and any environment bindings. The whole
//! map is loaded, mutated, and written back, so entries for untouched
//! packages survive every save.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::version;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Registry parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Per-version installation data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VData {
    /// Install directory of this version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Environment bindings recorded by install directives.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub envs: BTreeMap<String, String>,
}

/// Registry of installed (name, version) pairs, persisted as JSON.
#[derive(Debug, Default)]
pub struct VersionRegistry {
    file: PathBuf,
    // name -> version -> data; BTreeMap keeps the file diff-friendly.
    entries: BTreeMap<String, BTreeMap<String, VData>>,
}

impl VersionRegistry {
    /// Load the registry from `file`. A missing file is an empty registry,
    /// not an error; a malformed file is.
    pub fn load(file: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let file = file.into();
        let entries = match fs::read_to_string(&file) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { file, entries })
    }

    /// Write the full registry back to its file.
    pub fn save(&self) -> Result<(), RegistryError> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.file, content)?;
        debug!(file = %self.file.display(), packages = self.entries.len(), "registry saved");
        Ok(())
    }

    /// Record `name@version` as installed. Overwrites existing data for the
    /// same pair; other versions of the same package are untouched.
    pub fn register(&mut self, name: &str, version: &str, data: VData) {
        self.entries
            .entry(name.to_string())
            .or_default()
            .insert(version.to_string(), data);
    }

    /// Remove one version. Returns the removed data, or None when the pair
    /// was not registered. A package with no versions left disappears from
    /// the registry entirely.
    pub fn deregister(&mut self, name: &str, version: &str) -> Option<VData> {
        let versions = self.entries.get_mut(name)?;
        let removed = versions.remove(version);
        if versions.is_empty() {
            self.entries.remove(name);
        }
        removed
    }

    pub fn lookup(&self, name: &str, version: &str) -> Option<&VData> {
        self.entries.get(name)?.get(version)
    }

    pub fn has_version(&self, name: &str, version: &str) -> bool {
        self.lookup(name, version).is_some()
    }

    /// Installed versions of `name`, sorted.
    pub fn versions_of(&self, name: &str) -> Vec<String> {
        self.entries
            .get(name)
            .map(|versions| versions.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All registered package names, sorted.
    pub fn package_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Fuzzy version selection over the installed versions of `name`, with
    /// the same semantics the index uses for available versions.
    pub fn match_version(&self, name: &str, query: &str) -> Option<String> {
        let versions = self.entries.get(name)?;
        version::match_version(versions.keys().map(String::as_str), query)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The backing file path.
    pub fn file(&self) -> &Path {
        &self.file
    }
}
