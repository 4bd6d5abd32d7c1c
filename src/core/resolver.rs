//! Dependency resolver.
//!
//! Walks the dependency graph over the index store and produces a flat,
//! topologically ordered [`InstallPlan`]. Resolution errors are accumulated
//! rather than failing fast, so a single call surfaces every unresolvable
//! target, missing version, and cycle at once.

use std::collections::HashSet;

use tracing::debug;

use crate::core::index::IndexStore;
use crate::core::version::PackageSpec;
use crate::types::{InstallPlan, PackageName, PlanNode, Version};

/// Resolve `targets` (package specs like `gcc` or `gcc@15`) against the
/// index for `platform`, returning an ordered install plan.
///
/// Dependencies whose platform predicate does not match are ignored
/// entirely. A dependency reachable via multiple paths appears once, in
/// post-order (a node is emitted only after all of its dependencies).
pub fn resolve(index: &IndexStore, targets: &[String], platform: &str) -> InstallPlan {
    let mut walker = Walker {
        index,
        platform,
        nodes: Vec::new(),
        errors: Vec::new(),
        emitted: HashSet::new(),
        stack: Vec::new(),
    };

    for target in targets {
        let spec = match PackageSpec::parse(target) {
            Ok(spec) => spec,
            Err(e) => {
                walker.errors.push(e.to_string());
                continue;
            }
        };
        walker.visit_spec(&spec.name, spec.version.as_deref());
    }

    debug!(
        nodes = walker.nodes.len(),
        errors = walker.errors.len(),
        "resolution finished"
    );

    InstallPlan {
        nodes: walker.nodes,
        errors: walker.errors,
    }
}

struct Walker<'a> {
    index: &'a IndexStore,
    platform: &'a str,
    nodes: Vec<PlanNode>,
    errors: Vec<String>,
    /// Keys (`name@version`) already emitted into the plan.
    emitted: HashSet<String>,
    /// Keys currently on the recursion stack, innermost last.
    stack: Vec<String>,
}

impl Walker<'_> {
    /// Resolve a name plus optional version query to a concrete version and
    /// walk it. Returns the emitted node key, or None when resolution
    /// failed (the error has been recorded).
    fn visit_spec(&mut self, name: &str, version_query: Option<&str>) -> Option<String> {
        let resolved = match version_query {
            Some(query) => {
                let matched = self.index.match_version(name, query);
                if matched.is_none() {
                    self.errors.push(format!(
                        "no version of '{name}' matches '{query}'"
                    ));
                }
                matched
            }
            None => {
                let latest = self.index.latest_version(name);
                if latest.is_none() {
                    self.errors.push(format!("unknown package '{name}'"));
                }
                latest
            }
        }?;

        self.visit(name, &resolved)
    }

    /// Post-order walk of one concrete (name, version) node.
    fn visit(&mut self, name: &str, version: &str) -> Option<String> {
        let key = format!("{name}@{version}");

        if self.emitted.contains(&key) {
            return Some(key);
        }

        if self.stack.contains(&key) {
            // Name the whole cycle, from the first occurrence back to here
            let start = self.stack.iter().position(|k| *k == key).unwrap_or(0);
            let mut cycle: Vec<&str> = self.stack[start..].iter().map(String::as_str).collect();
            cycle.push(&key);
            self.errors
                .push(format!("cyclic dependency detected: {}", cycle.join(" -> ")));
            return None;
        }

        let manifest = match self.index.load_package(name, version) {
            Ok(m) => m,
            Err(e) => {
                self.errors.push(e.to_string());
                return None;
            }
        };

        self.stack.push(key.clone());

        let deps: Vec<_> = manifest
            .deps_for_platform(self.platform)
            .cloned()
            .collect();

        let mut dep_keys = Vec::with_capacity(deps.len());
        for dep in &deps {
            if let Some(dep_key) = self.visit_spec(&dep.name, dep.version.as_deref()) {
                dep_keys.push(dep_key);
            }
        }

        self.stack.pop();

        let already_installed = self
            .index
            .find_entry(name, version)
            .map(|e| e.installed)
            .unwrap_or(false);

        self.emitted.insert(key.clone());
        self.nodes.push(PlanNode {
            name: PackageName::new(name),
            version: Version::new(version),
            already_installed,
            deps: dep_keys,
        });

        Some(key)
    }
}
