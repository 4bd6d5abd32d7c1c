//! Install command

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use xim::ops::Installer;
use xim::types::DownloaderConfig;
use xim::ui::ConsoleReporter;
use xim::{resolve, xim_home};

pub struct InstallOpts {
    pub platform: Option<String>,
    pub jobs: Option<usize>,
    pub retries: Option<u32>,
    pub mirror: Option<String>,
    pub dry_run: bool,
}

/// Resolve the targets and execute the resulting plan.
pub async fn install(targets: &[String], opts: InstallOpts) -> Result<()> {
    let mut index = super::open_index()?;
    let mut registry = super::open_registry()?;
    super::sync_installed_flags(&mut index, &registry);

    let platform = opts
        .platform
        .unwrap_or_else(|| xim::detect_platform().to_string());

    let plan = resolve(&index, targets, &platform);
    if plan.has_errors() {
        for error in &plan.errors {
            eprintln!("error: {error}");
        }
        bail!("Resolution failed with {} error(s)", plan.errors.len());
    }

    if opts.dry_run {
        for node in &plan.nodes {
            let suffix = if node.already_installed {
                " (installed)"
            } else {
                ""
            };
            println!("  {}{suffix}", node.key());
        }
        println!("{} package(s) would be installed", plan.pending_count());
        return Ok(());
    }

    let defaults = DownloaderConfig::default();
    let config = DownloaderConfig {
        concurrency: opts.jobs.unwrap_or(defaults.concurrency),
        retries: opts.retries.unwrap_or(defaults.retries),
        mirror: opts.mirror,
        timeout: Duration::from_secs(300),
    };

    let home = xim_home();
    let mut installer = Installer::new(&mut index, &mut registry, &home);
    let report = installer
        .execute(&plan, &config, Arc::new(ConsoleReporter::new()))
        .await?;

    if !report.is_success() {
        bail!("{} package(s) failed to install", report.failed.len());
    }
    Ok(())
}
