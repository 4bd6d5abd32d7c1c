//! Package index store.
//!
//! Scans a package-index repository (one subdirectory per package name, one
//! TOML manifest per version) into an in-memory catalog supporting name
//! search, fuzzy version matching, and per-entry installed flags.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::manifest::{ManifestError, PackageManifest};
use crate::core::version;
use crate::types::{PackageName, Version};

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index repository not found: {0}")]
    Missing(PathBuf),

    #[error("Index repository contains no package manifests: {0}")]
    Empty(PathBuf),

    #[error("Unknown index entry: {name}@{version}")]
    UnknownEntry { name: String, version: String },

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// One (name, version) pair known to the index.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub name: PackageName,
    pub version: Version,
    /// Path to this version's manifest file.
    pub manifest_path: PathBuf,
    /// Whether this version is currently installed. Mutated only by
    /// [`IndexStore::mark_installed`] and reset by [`IndexStore::rebuild`].
    pub installed: bool,
}

/// In-memory catalog over a package-index repository.
///
/// The catalog is rebuilt per process invocation; a partially scanned state
/// is never observable because [`rebuild`](Self::rebuild) builds a fresh
/// catalog aside and swaps it in only on success.
#[derive(Debug, Default)]
pub struct IndexStore {
    repo_dir: PathBuf,
    // name -> version -> entry; BTreeMap keeps iteration deterministic.
    catalog: BTreeMap<String, BTreeMap<String, IndexEntry>>,
    loaded: bool,
}

impl IndexStore {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            catalog: BTreeMap::new(),
            loaded: false,
        }
    }

    /// Scan the repository directory and replace the catalog atomically.
    ///
    /// Fails when the directory does not exist or yields no manifests; in
    /// that case the previous catalog is left untouched.
    pub fn rebuild(&mut self) -> Result<(), IndexError> {
        if !self.repo_dir.is_dir() {
            return Err(IndexError::Missing(self.repo_dir.clone()));
        }

        let mut fresh: BTreeMap<String, BTreeMap<String, IndexEntry>> = BTreeMap::new();

        for pkg_dir in fs::read_dir(&self.repo_dir)? {
            let pkg_dir = pkg_dir?;
            if !pkg_dir.file_type()?.is_dir() {
                continue;
            }
            let name = PackageName::new(&pkg_dir.file_name().to_string_lossy());

            for manifest in fs::read_dir(pkg_dir.path())? {
                let manifest = manifest?;
                let path = manifest.path();
                if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let version = Version::new(stem);

                fresh.entry(name.to_string()).or_default().insert(
                    version.to_string(),
                    IndexEntry {
                        name: name.clone(),
                        version,
                        manifest_path: path,
                        installed: false,
                    },
                );
            }
        }

        // A package dir with no manifests contributes nothing
        fresh.retain(|_, versions| !versions.is_empty());

        if fresh.is_empty() {
            return Err(IndexError::Empty(self.repo_dir.clone()));
        }

        debug!(packages = fresh.len(), repo = %self.repo_dir.display(), "index rebuilt");
        self.catalog = fresh;
        self.loaded = true;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of distinct package names in the catalog.
    pub fn size(&self) -> usize {
        self.catalog.len()
    }

    /// All package names containing `query`, case-sensitive, sorted.
    pub fn search(&self, query: &str) -> Vec<String> {
        self.catalog
            .keys()
            .filter(|name| name.contains(query))
            .cloned()
            .collect()
    }

    /// Every known package name, lexicographically sorted, no duplicates.
    pub fn all_names(&self) -> Vec<String> {
        self.catalog.keys().cloned().collect()
    }

    /// Known versions of `name`, or None when the package is unknown.
    pub fn versions_of(&self, name: &str) -> Option<Vec<String>> {
        self.catalog
            .get(name)
            .map(|versions| versions.keys().cloned().collect())
    }

    /// Fuzzy version selection: exact match wins, otherwise the highest
    /// version with `query` as a dot-segment prefix.
    pub fn match_version(&self, name: &str, query: &str) -> Option<String> {
        let versions = self.catalog.get(name)?;
        version::match_version(versions.keys().map(String::as_str), query)
    }

    /// Highest known version of `name`.
    pub fn latest_version(&self, name: &str) -> Option<String> {
        let versions = self.catalog.get(name)?;
        version::latest_version(versions.keys().map(String::as_str))
    }

    pub fn find_entry(&self, name: &str, version: &str) -> Option<&IndexEntry> {
        self.catalog.get(name)?.get(version)
    }

    /// Parse and return the manifest for a known entry.
    pub fn load_package(&self, name: &str, version: &str) -> Result<PackageManifest, IndexError> {
        let entry = self
            .find_entry(name, version)
            .ok_or_else(|| IndexError::UnknownEntry {
                name: name.to_string(),
                version: version.to_string(),
            })?;
        Ok(PackageManifest::from_file(&entry.manifest_path)?)
    }

    /// Idempotently set an entry's installed flag.
    ///
    /// Errors when the entry does not exist; silent no-ops would let callers
    /// believe a missing package was recorded.
    pub fn mark_installed(
        &mut self,
        name: &str,
        version: &str,
        installed: bool,
    ) -> Result<(), IndexError> {
        let entry = self
            .catalog
            .get_mut(name)
            .and_then(|versions| versions.get_mut(version))
            .ok_or_else(|| IndexError::UnknownEntry {
                name: name.to_string(),
                version: version.to_string(),
            })?;
        entry.installed = installed;
        Ok(())
    }

    /// The repository directory this store scans.
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }
}
