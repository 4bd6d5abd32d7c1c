//! TOML package manifest parsing.
//!
//! Human-readable package definitions, one file per version under the index
//! repository: `<repo>/<name>/<version>.toml`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{PackageName, Version};

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid manifest {path}: {reason}")]
    Invalid { path: String, reason: String },
}

/// Package metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: PackageName,
    pub version: Version,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub homepage: String,
    #[serde(default)]
    pub license: String,
}

/// Downloadable artifact location and integrity data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artifact {
    pub url: String,
    /// SHA-256 hex digest; empty means the download is not verified.
    #[serde(default)]
    pub sha256: String,
}

/// One dependency edge with an optional version constraint and platform
/// predicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepSpec {
    pub name: PackageName,
    /// Optional version query, fuzzy-matched against the index; absent means
    /// latest.
    #[serde(default)]
    pub version: Option<String>,
    /// Platforms this dependency applies to; empty means all platforms.
    #[serde(default)]
    pub platforms: Vec<String>,
}

impl DepSpec {
    /// Whether this dependency applies on the given platform identifier.
    pub fn matches_platform(&self, platform: &str) -> bool {
        self.platforms.is_empty() || self.platforms.iter().any(|p| p == platform)
    }
}

/// A single install step, interpreted by the installer via exhaustive
/// matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InstallDirective {
    /// Copy a file or directory from the extracted artifact into the store.
    Copy { from: String, to: String },
    /// Create a symlink in the bin directory pointing at an installed file.
    Symlink { from: String, to: String },
    /// Record an environment binding alongside the registered version.
    Env { name: String, value: String },
}

/// Complete package definition for one (name, version).
///
/// Loaded on demand from an index entry's path; immutable once loaded and
/// not cached across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    pub package: PackageInfo,
    #[serde(default)]
    pub artifact: Artifact,
    #[serde(default)]
    pub deps: Vec<DepSpec>,
    #[serde(default)]
    pub directives: Vec<InstallDirective>,
}

impl PackageManifest {
    /// Load and parse a manifest file.
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path)?;
        let manifest: PackageManifest = toml::from_str(&content)?;

        if manifest.package.name.is_empty() {
            return Err(ManifestError::Invalid {
                path: path.display().to_string(),
                reason: "package.name is empty".to_string(),
            });
        }
        if manifest.package.version.is_empty() {
            return Err(ManifestError::Invalid {
                path: path.display().to_string(),
                reason: "package.version is empty".to_string(),
            });
        }

        Ok(manifest)
    }

    /// Dependencies applicable on `platform`, in manifest order.
    pub fn deps_for_platform<'a>(
        &'a self,
        platform: &'a str,
    ) -> impl Iterator<Item = &'a DepSpec> + 'a {
        self.deps.iter().filter(move |d| d.matches_platform(platform))
    }
}

/// Expand `${install_dir}` placeholders in directive paths and env values.
pub fn expand_install_dir(input: &str, install_dir: &str) -> String {
    input.replace("${install_dir}", install_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const GCC_MANIFEST: &str = r#"
[package]
name = "gcc"
version = "15.1.0"
description = "GNU Compiler Collection"

[artifact]
url = "https://example.com/gcc-15.1.0-linux.tar.gz"
sha256 = "abc123"

[[deps]]
name = "glibc"
version = "2.39"
platforms = ["linux"]

[[deps]]
name = "binutils"

[[directives]]
kind = "copy"
from = "bin"
to = "bin"

[[directives]]
kind = "symlink"
from = "bin/gcc"
to = "gcc"

[[directives]]
kind = "env"
name = "GCC_HOME"
value = "${install_dir}"
"#;

    fn write_manifest(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_full_manifest() {
        let f = write_manifest(GCC_MANIFEST);
        let m = PackageManifest::from_file(f.path()).unwrap();

        assert_eq!(m.package.name, "gcc");
        assert_eq!(m.package.version.as_str(), "15.1.0");
        assert_eq!(m.artifact.sha256, "abc123");
        assert_eq!(m.deps.len(), 2);
        assert_eq!(m.directives.len(), 3);
        assert_eq!(
            m.directives[2],
            InstallDirective::Env {
                name: "GCC_HOME".to_string(),
                value: "${install_dir}".to_string(),
            }
        );
    }

    #[test]
    fn platform_filtering() {
        let f = write_manifest(GCC_MANIFEST);
        let m = PackageManifest::from_file(f.path()).unwrap();

        let linux: Vec<_> = m.deps_for_platform("linux").map(|d| d.name.as_str()).collect();
        assert_eq!(linux, vec!["glibc", "binutils"]);

        // glibc is linux-only; binutils has no predicate and matches everywhere
        let windows: Vec<_> = m
            .deps_for_platform("windows")
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(windows, vec!["binutils"]);
    }

    #[test]
    fn malformed_manifest_is_parse_error() {
        let f = write_manifest("this is [not toml");
        let err = PackageManifest::from_file(f.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn missing_name_is_invalid() {
        let f = write_manifest("[package]\nname = \"\"\nversion = \"1.0\"\n");
        let err = PackageManifest::from_file(f.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Invalid { .. }));
    }

    #[test]
    fn expand_placeholder() {
        assert_eq!(
            expand_install_dir("${install_dir}/bin", "/opt/gcc/15.1.0"),
            "/opt/gcc/15.1.0/bin"
        );
        assert_eq!(expand_install_dir("no_placeholder", "/x"), "no_placeholder");
    }
}
