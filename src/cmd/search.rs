//! Search command

use anyhow::Result;

/// Search package names in the local index. No hits is not an error.
pub fn search(query: &str) -> Result<()> {
    let index = super::open_index()?;
    let results = index.search(query);

    if results.is_empty() {
        println!("No packages found matching '{query}'");
        return Ok(());
    }

    for name in results {
        let latest = index.latest_version(&name).unwrap_or_default();
        let description = index
            .load_package(&name, &latest)
            .map(|m| m.package.description)
            .unwrap_or_default();
        println!("  {name:<16} {latest:<10} {description}");
    }

    Ok(())
}
