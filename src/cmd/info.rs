//! Info command

use anyhow::{bail, Result};
use xim::core::version::PackageSpec;

/// Show the manifest of a package. Unknown packages are an error (exit 1).
pub fn info(spec: &str) -> Result<()> {
    let spec = PackageSpec::parse(spec)?;
    let index = super::open_index()?;

    let version = match &spec.version {
        Some(query) => index.match_version(&spec.name, query),
        None => index.latest_version(&spec.name),
    };
    let Some(version) = version else {
        bail!("Unknown package: {}", spec.name);
    };

    let manifest = index.load_package(&spec.name, &version)?;
    println!("{} {}", manifest.package.name, manifest.package.version);
    if !manifest.package.description.is_empty() {
        println!("  {}", manifest.package.description);
    }
    if !manifest.package.homepage.is_empty() {
        println!("  homepage: {}", manifest.package.homepage);
    }
    if !manifest.package.license.is_empty() {
        println!("  license: {}", manifest.package.license);
    }
    println!("  artifact: {}", manifest.artifact.url);

    let versions = index.versions_of(&spec.name).unwrap_or_default();
    println!("  versions: {}", versions.join(", "));

    if !manifest.deps.is_empty() {
        println!("  deps:");
        for dep in &manifest.deps {
            let version = dep.version.as_deref().unwrap_or("latest");
            if dep.platforms.is_empty() {
                println!("    {} {version}", dep.name);
            } else {
                println!("    {} {version} [{}]", dep.name, dep.platforms.join(", "));
            }
        }
    }

    Ok(())
}
