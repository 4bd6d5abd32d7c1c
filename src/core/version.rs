//! Version parsing and fuzzy matching.
//!
//! This is the single implementation of "most specific prefix match, highest
//! version wins" used by both the index store and the version registry, so
//! the two can never drift apart.
//!
//! Supports:
//! - Latest: `gcc` or `gcc@latest`
//! - Exact: `gcc@15.1.0`
//! - Prefix: `gcc@15` resolves to the highest 15.x.y

use std::cmp::Ordering;

use anyhow::{bail, Result};

/// Parsed package specifier with optional version.
#[derive(Debug, Clone)]
pub struct PackageSpec {
    pub name: String,
    pub version: Option<String>,
}

impl PackageSpec {
    /// Parse a package specifier like `gcc` or `gcc@15.1.0`.
    pub fn parse(spec: &str) -> Result<Self> {
        if let Some((name, version)) = spec.split_once('@') {
            if name.is_empty() {
                bail!("Invalid package specifier '{spec}': missing package name");
            }
            if version.is_empty() {
                bail!("Invalid package specifier '{spec}': missing version after @");
            }

            // Treat "latest" as no version (get latest)
            let version = if version == "latest" {
                None
            } else {
                Some(version.to_string())
            };

            Ok(Self {
                name: name.to_string(),
                version,
            })
        } else {
            Ok(Self {
                name: spec.to_string(),
                version: None,
            })
        }
    }

    /// Check if this specifier requests a specific version.
    pub fn is_pinned(&self) -> bool {
        self.version.is_some()
    }
}

/// Compare two version strings by numeric dot-segments.
///
/// Non-numeric segments are skipped; when all shared segments are equal, the
/// version with more segments orders higher (`1.2.1 > 1.2`).
pub fn cmp_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> { v.split('.').filter_map(|s| s.parse().ok()).collect() };

    let a_parts = parse(a);
    let b_parts = parse(b);

    for (a_part, b_part) in a_parts.iter().zip(b_parts.iter()) {
        match a_part.cmp(b_part) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    a_parts.len().cmp(&b_parts.len())
}

/// Whether `version` starts with `query` as a dot-segment prefix.
///
/// `"15"` matches `15.1.0` but not `150.1`; `"14.1"` matches `14.1.0`.
pub fn is_segment_prefix(query: &str, version: &str) -> bool {
    let query_parts: Vec<&str> = query.split('.').collect();
    let version_parts: Vec<&str> = version.split('.').collect();

    if query_parts.len() > version_parts.len() {
        return false;
    }

    query_parts
        .iter()
        .zip(version_parts.iter())
        .all(|(q, v)| q == v)
}

/// Fuzzy version selection over a candidate set.
///
/// Exact match wins; otherwise the highest version (per [`cmp_versions`])
/// whose dot-segments start with `query`. Returns None when nothing matches.
pub fn match_version<'a, I>(candidates: I, query: &str) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<&str> = None;

    for candidate in candidates {
        if candidate == query {
            return Some(candidate.to_string());
        }
        if is_segment_prefix(query, candidate) {
            match best {
                Some(current) if cmp_versions(candidate, current) != Ordering::Greater => {}
                _ => best = Some(candidate),
            }
        }
    }

    best.map(str::to_string)
}

/// Highest version in a candidate set, or None when empty.
pub fn latest_version<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<&str> = None;
    for candidate in candidates {
        match best {
            Some(current) if cmp_versions(candidate, current) != Ordering::Greater => {}
            _ => best = Some(candidate),
        }
    }
    best.map(str::to_string)
}
