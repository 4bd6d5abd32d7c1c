//! Uninstall command

use anyhow::{Context, Result};
use xim::ops::Installer;
use xim::xim_home;

/// Remove every installed version of a package. Dependents are left alone.
pub fn uninstall(name: &str) -> Result<()> {
    let mut index = super::open_index()?;
    let mut registry = super::open_registry()?;
    super::sync_installed_flags(&mut index, &registry);

    let home = xim_home();
    let mut installer = Installer::new(&mut index, &mut registry, &home);
    installer
        .uninstall(name)
        .with_context(|| format!("Failed to uninstall '{name}'"))?;

    println!("Uninstalled {name}");
    Ok(())
}
