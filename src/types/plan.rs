//! Install-plan and downloader value types.
//!
//! A plan is the flat, topologically ordered output of the resolver: nodes
//! are referenced by position, never by pointer, so the dependency DAG needs
//! no back-references.

use std::path::PathBuf;
use std::time::Duration;

use crate::types::{PackageName, Version};

/// One resolved unit of work in an [`InstallPlan`].
#[derive(Debug, Clone)]
pub struct PlanNode {
    /// Package name.
    pub name: PackageName,
    /// Concrete resolved version.
    pub version: Version,
    /// Snapshot of the index's installed flag at resolution time.
    pub already_installed: bool,
    /// Resolved dependency keys (`name@version`), all of which appear
    /// earlier in the plan's node sequence.
    pub deps: Vec<String>,
}

impl PlanNode {
    /// The `name@version` key identifying this node.
    pub fn key(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// An ordered sequence of plan nodes plus accumulated resolution errors.
///
/// Invariants (when `errors` is empty):
/// - every node's dependencies appear strictly before it (topological order);
/// - each `(name, version)` pair appears at most once.
///
/// A plan with non-empty `errors` still carries the nodes that did resolve,
/// for diagnostics, but must be refused by the installer.
#[derive(Debug, Clone, Default)]
pub struct InstallPlan {
    pub nodes: Vec<PlanNode>,
    pub errors: Vec<String>,
}

impl InstallPlan {
    /// Whether any resolution error was recorded. An erroring plan is not
    /// executable.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of nodes that still need installation.
    pub fn pending_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.already_installed).count()
    }
}

/// One artifact fetch: transient, created per plan node and discarded after
/// the downloader returns.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    /// Display key for progress reporting (usually `name@version`).
    pub name: String,
    /// Source URL.
    pub url: String,
    /// Expected SHA-256 hex digest; empty means unverified.
    pub sha256: String,
    /// Staging root; the artifact lands in a per-task subdirectory named
    /// after `name`, since URL basenames are not unique across a batch.
    pub dest_dir: PathBuf,
}

/// Downloader tuning knobs.
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// Maximum simultaneous transfers.
    pub concurrency: usize,
    /// Retry attempts per task after the first transport failure.
    pub retries: u32,
    /// Optional mirror base URL; rewrites each task's scheme and authority.
    pub mirror: Option<String>,
    /// Per-task deadline.
    pub timeout: Duration,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            retries: 2,
            mirror: None,
            timeout: Duration::from_secs(300),
        }
    }
}
