//! Shared value types: package identifiers and install-plan structures.

mod package;
mod plan;

pub use package::{PackageName, Version};
pub use plan::{DownloadTask, DownloaderConfig, InstallPlan, PlanNode};
