//! List command

use anyhow::Result;

/// List installed packages, optionally filtered by a name substring.
pub fn list(filter: Option<&str>) -> Result<()> {
    let registry = super::open_registry()?;

    let mut names = registry.package_names();
    if let Some(filter) = filter {
        names.retain(|n| n.contains(filter));
    }

    if names.is_empty() {
        println!("No packages installed.");
        return Ok(());
    }

    for name in names {
        let versions = registry.versions_of(&name).join(", ");
        println!("  {name:<16} {versions}");
    }

    Ok(())
}
