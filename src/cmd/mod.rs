//! Subcommand implementations.
//!
//! Each module is a thin layer: open the index and registry, call into the
//! library, map outcomes to output and exit codes.

pub mod info;
pub mod install;
pub mod list;
pub mod search;
pub mod uninstall;

use anyhow::{Context, Result};
use xim::store::VersionRegistry;
use xim::IndexStore;

/// Open and scan the local package index.
pub fn open_index() -> Result<IndexStore> {
    let mut index = IndexStore::new(xim::index_path());
    index.rebuild().context("Failed to load package index")?;
    Ok(index)
}

/// Open the installed-version registry.
pub fn open_registry() -> Result<VersionRegistry> {
    VersionRegistry::load(xim::registry_path()).context("Failed to load version registry")
}

/// Project the registry's installed versions onto the freshly rebuilt
/// index, so resolution sees what is already on disk.
pub fn sync_installed_flags(index: &mut IndexStore, registry: &VersionRegistry) {
    for name in registry.package_names() {
        for version in registry.versions_of(&name) {
            // Entries that left the index since installation are fine to skip
            let _ = index.mark_installed(&name, &version, true);
        }
    }
}
