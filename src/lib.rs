//! xim - cross-platform package manager
//!
//! # Overview
//!
//! xim installs versioned tool packages from a local package-index repository
//! (a directory tree of TOML manifests, one subdirectory per package and one
//! manifest per version). The pipeline is:
//!
//! 1. **Index Store** (`core::index`) scans the repository into a catalog.
//! 2. **Resolver** (`core::resolver`) turns requested targets into an ordered,
//!    deduplicated [`InstallPlan`](types::InstallPlan).
//! 3. **Downloader** (`io::download`) fetches artifacts concurrently with
//!    SHA-256 verification.
//! 4. **Installer** (`ops::install`) extracts, runs install directives, and
//!    commits results into the persisted version registry.
//!
//! # Directory Layout
//!
//! ```text
//! ~/.xim/
//! ├── index/         # Package index repository (one dir per package)
//! ├── store/         # Installed artifacts by name/version
//! ├── cache/         # Downloaded archives
//! ├── bin/           # Symlinked binaries
//! └── versions.json  # Version registry
//! ```

pub mod core;
pub mod io;
pub mod ops;
pub mod store;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use crate::core::index::IndexStore;
pub use crate::core::resolver::resolve;
pub use crate::io::download as downloader;
pub use crate::io::extract as extractor;
pub use crate::ops::install::Installer;
pub use crate::store::registry::VersionRegistry;
pub use crate::types::{InstallPlan, PackageName, PlanNode, Version};

use dirs::home_dir;
use std::path::PathBuf;

/// Returns the primary data directory, or None if the user's home cannot be resolved.
pub fn try_xim_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("XIM_HOME") {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".xim"))
}

/// Returns the canonical xim home directory (`~/.xim`).
///
/// # Panics
/// Panics if the home directory cannot be determined.
pub fn xim_home() -> PathBuf {
    try_xim_home().expect("Could not determine home directory")
}

/// Package index repository: ~/.xim/index
pub fn index_path() -> PathBuf {
    xim_home().join("index")
}

/// Installed artifact store: ~/.xim/store
pub fn store_path() -> PathBuf {
    xim_home().join("store")
}

/// Download staging area: ~/.xim/cache
pub fn cache_path() -> PathBuf {
    xim_home().join("cache")
}

/// Binary link target: ~/.xim/bin
pub fn bin_path() -> PathBuf {
    xim_home().join("bin")
}

/// Version registry file: ~/.xim/versions.json
pub fn registry_path() -> PathBuf {
    xim_home().join("versions.json")
}

/// Extract the filename from a URL, stripping any query string.
///
/// # Example
///
/// ```
/// use xim::filename_from_url;
///
/// assert_eq!(filename_from_url("https://example.com/path/to/file.tar.gz"), "file.tar.gz");
/// assert_eq!(filename_from_url("https://example.com/gcc.zip?token=abc"), "gcc.zip");
/// assert_eq!(filename_from_url(""), "");
/// ```
pub fn filename_from_url(url: &str) -> &str {
    let without_query = url.split('?').next().unwrap_or(url);
    without_query.split('/').next_back().unwrap_or("")
}

/// Platform identifier for the running host: "linux", "macosx", or "windows".
pub fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macosx"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

/// User Agent string
pub const USER_AGENT: &str = concat!("xim/", env!("CARGO_PKG_VERSION"));
