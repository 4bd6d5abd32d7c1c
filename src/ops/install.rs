//! Plan execution and uninstall.
//!
//! Runs an [`InstallPlan`] in two phases: one concurrent download batch for
//! every pending node, then a sequential walk in plan order that extracts,
//! applies install directives, and commits each node to the version
//! registry. A node failure never aborts the walk; nodes depending on a
//! failed node are recorded failed and skipped, independent nodes proceed.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use reqwest::Client;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::core::index::IndexStore;
use crate::core::manifest::{expand_install_dir, InstallDirective, PackageManifest};
use crate::io::download;
use crate::io::extract;
use crate::ops::error::InstallError;
use crate::store::registry::{VData, VersionRegistry};
use crate::types::{DownloadTask, DownloaderConfig, InstallPlan, PlanNode};
use crate::ui::{Phase, ProgressEvent, Reporter};

/// Outcome of one plan execution.
#[derive(Debug, Default)]
pub struct ExecuteReport {
    /// Nodes installed and committed to the registry.
    pub installed: usize,
    /// Nodes skipped because they were already installed.
    pub skipped: usize,
    /// Failed node keys with the reason, in plan order.
    pub failed: Vec<(String, String)>,
}

impl ExecuteReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Executes install plans against an index, a registry, and the xim home
/// directory layout (`store/`, `cache/`, `bin/` under `home`).
pub struct Installer<'a> {
    index: &'a mut IndexStore,
    registry: &'a mut VersionRegistry,
    store_dir: PathBuf,
    cache_dir: PathBuf,
    bin_dir: PathBuf,
    cancel: Arc<AtomicBool>,
}

impl<'a> Installer<'a> {
    pub fn new(
        index: &'a mut IndexStore,
        registry: &'a mut VersionRegistry,
        home: &Path,
    ) -> Self {
        Self {
            index,
            registry,
            store_dir: home.join("store"),
            cache_dir: home.join("cache"),
            bin_dir: home.join("bin"),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for requesting cancellation of in-progress downloads.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    /// Execute a plan.
    ///
    /// A plan carrying resolution errors is refused outright; nothing is
    /// downloaded. Registry commits happen one node at a time, in plan
    /// order, so a crash mid-run leaves every already-committed node fully
    /// installed.
    pub async fn execute(
        &mut self,
        plan: &InstallPlan,
        config: &DownloaderConfig,
        reporter: Arc<dyn Reporter>,
    ) -> Result<ExecuteReport, InstallError> {
        if plan.has_errors() {
            return Err(InstallError::InvalidPlan(plan.errors.join("; ")));
        }

        let mut report = ExecuteReport::default();
        let mut failed_keys: HashSet<String> = HashSet::new();
        let mut fail = |report: &mut ExecuteReport,
                        failed_keys: &mut HashSet<String>,
                        key: String,
                        reason: String| {
            reporter.event(&ProgressEvent::failed(&key, &reason));
            failed_keys.insert(key.clone());
            report.failed.push((key, reason));
        };

        // Phase 1: load manifests and download every pending artifact
        let mut manifests: HashMap<String, PackageManifest> = HashMap::new();
        let mut tasks = Vec::new();
        for node in plan.nodes.iter().filter(|n| !n.already_installed) {
            let key = node.key();
            reporter.event(&ProgressEvent::new(&key, Phase::Pending));
            match self.index.load_package(&node.name, &node.version) {
                Ok(manifest) => {
                    tasks.push(DownloadTask {
                        name: key.clone(),
                        url: manifest.artifact.url.clone(),
                        sha256: manifest.artifact.sha256.clone(),
                        dest_dir: self.cache_dir.clone(),
                    });
                    manifests.insert(key, manifest);
                }
                Err(e) => fail(&mut report, &mut failed_keys, key, e.to_string()),
            }
        }

        let mut archives: HashMap<String, PathBuf> = HashMap::new();
        if !tasks.is_empty() {
            let client = Client::new();
            let (tx, mut rx) = mpsc::channel::<ProgressEvent>(256);

            // Single forwarder between download workers and the reporter
            let fwd_reporter = reporter.clone();
            let forwarder = tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    fwd_reporter.event(&event);
                }
            });

            let results =
                download::download_all(&client, tasks, config, tx, self.cancel.clone()).await;
            let _ = forwarder.await;

            for task_result in results {
                match task_result.result {
                    Ok(path) => {
                        archives.insert(task_result.name, path);
                    }
                    Err(e) => {
                        fail(&mut report, &mut failed_keys, task_result.name, e.to_string());
                    }
                }
            }
        }

        // Phase 2: sequential install in plan order
        for node in &plan.nodes {
            let key = node.key();
            if node.already_installed {
                debug!(node = %key, "already installed, skipping");
                report.skipped += 1;
                continue;
            }
            if failed_keys.contains(&key) {
                continue;
            }
            if let Some(dep) = node.deps.iter().find(|d| failed_keys.contains(*d)) {
                fail(
                    &mut report,
                    &mut failed_keys,
                    key,
                    format!("dependency failed: {dep}"),
                );
                continue;
            }
            // Every non-failed pending node has an archive by construction
            let Some(archive) = archives.get(&key) else {
                fail(
                    &mut report,
                    &mut failed_keys,
                    key,
                    "no downloaded artifact".to_string(),
                );
                continue;
            };
            let Some(manifest) = manifests.get(&key) else {
                fail(
                    &mut report,
                    &mut failed_keys,
                    key,
                    "no manifest for node".to_string(),
                );
                continue;
            };

            match self.install_node(node, manifest, archive, &reporter) {
                Ok(()) => {
                    reporter.event(&ProgressEvent::new(&key, Phase::Done));
                    info!(node = %key, "installed");
                    report.installed += 1;
                }
                Err(e) => fail(&mut report, &mut failed_keys, key, e.to_string()),
            }
        }

        reporter.summary(report.installed, report.skipped, report.failed.len());
        Ok(report)
    }

    /// Extract, apply directives, and commit one node. The registry is
    /// saved before the index flag flips, so the durable record leads.
    fn install_node(
        &mut self,
        node: &PlanNode,
        manifest: &PackageManifest,
        archive: &Path,
        reporter: &Arc<dyn Reporter>,
    ) -> Result<(), InstallError> {
        let key = node.key();
        let install_dir = self
            .store_dir
            .join(node.name.as_str())
            .join(node.version.as_str());

        reporter.event(&ProgressEvent::new(&key, Phase::Extracting));
        if install_dir.exists() {
            fs::remove_dir_all(&install_dir)?;
        }
        let result = (|| -> Result<BTreeMap<String, String>, InstallError> {
            extract::extract_archive(archive, &install_dir)?;
            strip_wrapper_dir(&install_dir, &node.name, &node.version)?;

            reporter.event(&ProgressEvent::new(&key, Phase::Installing));
            self.apply_directives(manifest, &install_dir)
        })();

        let envs = match result {
            Ok(envs) => envs,
            Err(e) => {
                // Leave no partial install behind
                fs::remove_dir_all(&install_dir).ok();
                return Err(e);
            }
        };

        self.registry.register(
            &node.name,
            &node.version,
            VData {
                path: Some(install_dir.display().to_string()),
                envs,
            },
        );
        self.registry.save()?;
        self.index.mark_installed(&node.name, &node.version, true)?;
        Ok(())
    }

    /// Interpret manifest directives relative to the node's install dir.
    /// Returns the environment bindings to persist with the version.
    fn apply_directives(
        &self,
        manifest: &PackageManifest,
        install_dir: &Path,
    ) -> Result<BTreeMap<String, String>, InstallError> {
        let install_dir_str = install_dir.display().to_string();
        let mut envs = BTreeMap::new();

        for directive in &manifest.directives {
            match directive {
                InstallDirective::Copy { from, to } => {
                    let src = install_dir.join(expand_install_dir(from, &install_dir_str));
                    let expanded = expand_install_dir(to, &install_dir_str);
                    let dst = if Path::new(&expanded).is_absolute() {
                        PathBuf::from(expanded)
                    } else {
                        install_dir.join(expanded)
                    };
                    if src == dst {
                        continue;
                    }
                    if let Some(parent) = dst.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    if src.is_dir() {
                        let mut options = fs_extra::dir::CopyOptions::new();
                        options.overwrite = true;
                        options.copy_inside = true;
                        fs_extra::dir::copy(&src, &dst, &options)
                            .map_err(|e| InstallError::Directive(e.to_string()))?;
                    } else {
                        fs::copy(&src, &dst)?;
                    }
                }
                InstallDirective::Symlink { from, to } => {
                    let target = install_dir.join(from);
                    fs::create_dir_all(&self.bin_dir)?;
                    let link = self.bin_dir.join(to);
                    if link.symlink_metadata().is_ok() {
                        fs::remove_file(&link)?;
                    }
                    #[cfg(unix)]
                    std::os::unix::fs::symlink(&target, &link)?;
                    #[cfg(windows)]
                    std::os::windows::fs::symlink_file(&target, &link)?;
                }
                InstallDirective::Env { name, value } => {
                    envs.insert(name.clone(), expand_install_dir(value, &install_dir_str));
                }
            }
        }

        Ok(envs)
    }

    /// Remove every installed version of `name`: artifact directories,
    /// dangling bin symlinks, registry entries, and index flags. Dependents
    /// are untouched (no cascade).
    pub fn uninstall(&mut self, name: &str) -> Result<(), InstallError> {
        let versions = self.registry.versions_of(name);
        if versions.is_empty() {
            return Err(InstallError::NotFound(name.to_string()));
        }

        let mut removed_roots = Vec::new();
        for version in &versions {
            if let Some(data) = self.registry.deregister(name, version) {
                if let Some(path) = data.path {
                    let root = PathBuf::from(path);
                    if root.exists() {
                        fs::remove_dir_all(&root)?;
                    }
                    removed_roots.push(root);
                }
            }
            // The index may no longer carry this entry; that is fine
            if self.index.mark_installed(name, version, false).is_err() {
                warn!(package = name, version, "version absent from index during uninstall");
            }
        }

        self.prune_dangling_links(&removed_roots)?;
        self.registry.save()?;
        info!(package = name, versions = versions.len(), "uninstalled");
        Ok(())
    }

    /// Drop bin symlinks whose targets lived under any removed root.
    fn prune_dangling_links(&self, roots: &[PathBuf]) -> Result<(), InstallError> {
        if !self.bin_dir.is_dir() {
            return Ok(());
        }
        for entry in walkdir::WalkDir::new(&self.bin_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.path_is_symlink() {
                continue;
            }
            let Ok(target) = fs::read_link(entry.path()) else {
                continue;
            };
            if roots.iter().any(|root| target.starts_with(root)) {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }
}

/// Collapse a lone top-level wrapper directory named after the package
/// (`<name>` or `<name>-<suffix>`, like `gcc-15.1.0/`), so install
/// directives address the archive's real layout. Anything else, such as a
/// lone `bin/` directory, is genuine content and is left in place.
fn strip_wrapper_dir(dir: &Path, name: &str, version: &str) -> Result<(), InstallError> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.filter_map(|e| e.ok()).collect();
    entries.retain(|e| !e.file_name().to_string_lossy().starts_with('.'));

    if entries.len() != 1 || !entries[0].file_type()?.is_dir() {
        return Ok(());
    }
    let top = entries[0].file_name().to_string_lossy().to_string();
    let is_wrapper = top == name
        || top == format!("{name}-{version}")
        || top.starts_with(&format!("{name}-"));
    if is_wrapper {
        extract::strip_components(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::resolve;
    use crate::ui::NullReporter;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use sha2::{Digest, Sha256};
    use std::io::Write;
    use tempfile::TempDir;

    fn tar_gz_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
        let enc = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(enc);
        for (name, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder.append_data(&mut header, name, *content).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    fn write_manifest(repo: &Path, name: &str, version: &str, body: &str) {
        let dir = repo.join(name);
        fs::create_dir_all(&dir).unwrap();
        let mut f = fs::File::create(dir.join(format!("{version}.toml"))).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    struct Fixture {
        home: TempDir,
        index: IndexStore,
        registry: VersionRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let home = TempDir::new().unwrap();
            fs::create_dir_all(home.path().join("index")).unwrap();
            let index = IndexStore::new(home.path().join("index"));
            let registry = VersionRegistry::load(home.path().join("versions.json")).unwrap();
            Self {
                home,
                index,
                registry,
            }
        }

        fn add_package(
            &self,
            name: &str,
            version: &str,
            url: &str,
            sha256: &str,
            extra: &str,
        ) {
            let body = format!(
                "[package]\nname = \"{name}\"\nversion = \"{version}\"\n\n[artifact]\nurl = \"{url}\"\nsha256 = \"{sha256}\"\n{extra}"
            );
            write_manifest(&self.home.path().join("index"), name, version, &body);
        }

        fn rebuild(&mut self) {
            self.index.rebuild().unwrap();
        }

        fn installer(&mut self) -> Installer<'_> {
            Installer::new(&mut self.index, &mut self.registry, self.home.path())
        }
    }

    fn reporter() -> Arc<dyn Reporter> {
        Arc::new(NullReporter)
    }

    #[tokio::test]
    async fn erroring_plan_is_refused_before_any_download() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/tool.tar.gz").expect(0).create_async().await;

        let mut fx = Fixture::new();
        fx.add_package(
            "tool",
            "1.0.0",
            &format!("{}/tool.tar.gz", server.url()),
            "",
            "",
        );
        fx.rebuild();

        let mut plan = resolve(&fx.index, &["tool".to_string()], "linux");
        plan.errors.push("unknown package 'ghost'".to_string());

        let err = fx
            .installer()
            .execute(&plan, &DownloaderConfig::default(), reporter())
            .await
            .unwrap_err();
        assert!(matches!(err, InstallError::InvalidPlan(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_plan_is_trivial_success() {
        let mut fx = Fixture::new();
        fx.add_package("tool", "1.0.0", "https://example.com/t.tar.gz", "", "");
        fx.rebuild();

        let report = fx
            .installer()
            .execute(
                &InstallPlan::default(),
                &DownloaderConfig::default(),
                reporter(),
            )
            .await
            .unwrap();
        assert!(report.is_success());
        assert_eq!(report.installed, 0);
    }

    #[tokio::test]
    async fn installs_extracts_and_commits() {
        let mut server = mockito::Server::new_async().await;
        let body = tar_gz_bytes(&[("bin/tool", b"#!/bin/sh\necho hi\n")]);
        let sha = hex::encode(Sha256::digest(&body));
        server
            .mock("GET", "/tool-1.0.0.tar.gz")
            .with_body(&body)
            .create_async()
            .await;

        let mut fx = Fixture::new();
        let directives = "\n[[directives]]\nkind = \"symlink\"\nfrom = \"bin/tool\"\nto = \"tool\"\n\n[[directives]]\nkind = \"env\"\nname = \"TOOL_HOME\"\nvalue = \"${install_dir}\"\n";
        fx.add_package(
            "tool",
            "1.0.0",
            &format!("{}/tool-1.0.0.tar.gz", server.url()),
            &sha,
            directives,
        );
        fx.rebuild();

        let plan = resolve(&fx.index, &["tool".to_string()], "linux");
        assert!(!plan.has_errors());

        let home = fx.home.path().to_path_buf();
        let report = fx
            .installer()
            .execute(&plan, &DownloaderConfig::default(), reporter())
            .await
            .unwrap();

        assert!(report.is_success(), "failed: {:?}", report.failed);
        assert_eq!(report.installed, 1);

        let install_dir = home.join("store/tool/1.0.0");
        assert!(install_dir.join("bin/tool").is_file());
        #[cfg(unix)]
        assert!(home.join("bin/tool").symlink_metadata().is_ok());

        let data = fx.registry.lookup("tool", "1.0.0").unwrap();
        assert_eq!(data.path.as_deref(), Some(install_dir.to_str().unwrap()));
        assert_eq!(
            data.envs.get("TOOL_HOME").map(String::as_str),
            install_dir.to_str()
        );
        assert!(fx.index.find_entry("tool", "1.0.0").unwrap().installed);
    }

    #[tokio::test]
    async fn content_directory_layout_survives_install() {
        let mut server = mockito::Server::new_async().await;
        // The single top-level dir is real content, not a wrapper
        let body = tar_gz_bytes(&[("bin/tool", b"#!/bin/sh\n")]);
        server
            .mock("GET", "/tool-1.0.0.tar.gz")
            .with_body(&body)
            .create_async()
            .await;

        let mut fx = Fixture::new();
        fx.add_package(
            "tool",
            "1.0.0",
            &format!("{}/tool-1.0.0.tar.gz", server.url()),
            "",
            "",
        );
        fx.rebuild();

        let plan = resolve(&fx.index, &["tool".to_string()], "linux");
        let home = fx.home.path().to_path_buf();
        let report = fx
            .installer()
            .execute(&plan, &DownloaderConfig::default(), reporter())
            .await
            .unwrap();

        assert!(report.is_success(), "failed: {:?}", report.failed);
        assert!(home.join("store/tool/1.0.0/bin/tool").is_file());
        assert!(!home.join("store/tool/1.0.0/tool").exists());
    }

    #[tokio::test]
    async fn wrapper_directory_is_stripped_before_directives() {
        let mut server = mockito::Server::new_async().await;
        let body = tar_gz_bytes(&[("tool-1.0.0/bin/tool", b"#!/bin/sh\n")]);
        server
            .mock("GET", "/tool-1.0.0.tar.gz")
            .with_body(&body)
            .create_async()
            .await;

        let mut fx = Fixture::new();
        fx.add_package(
            "tool",
            "1.0.0",
            &format!("{}/tool-1.0.0.tar.gz", server.url()),
            "",
            "\n[[directives]]\nkind = \"symlink\"\nfrom = \"bin/tool\"\nto = \"tool\"\n",
        );
        fx.rebuild();

        let plan = resolve(&fx.index, &["tool".to_string()], "linux");
        let home = fx.home.path().to_path_buf();
        let report = fx
            .installer()
            .execute(&plan, &DownloaderConfig::default(), reporter())
            .await
            .unwrap();

        assert!(report.is_success(), "failed: {:?}", report.failed);
        assert!(home.join("store/tool/1.0.0/bin/tool").is_file());
        assert!(!home.join("store/tool/1.0.0/tool-1.0.0").exists());
        #[cfg(unix)]
        {
            let target = std::fs::read_link(home.join("bin/tool")).unwrap();
            assert!(target.is_file(), "symlink target missing: {}", target.display());
        }
    }

    #[tokio::test]
    async fn failed_node_does_not_stop_independent_nodes() {
        let mut server = mockito::Server::new_async().await;
        let body = tar_gz_bytes(&[("ok.txt", b"fine")]);
        server
            .mock("GET", "/good-1.0.tar.gz")
            .with_body(&body)
            .create_async()
            .await;
        server
            .mock("GET", "/bad-1.0.tar.gz")
            .with_status(404)
            .create_async()
            .await;

        let mut fx = Fixture::new();
        fx.add_package(
            "good",
            "1.0",
            &format!("{}/good-1.0.tar.gz", server.url()),
            "",
            "",
        );
        fx.add_package(
            "bad",
            "1.0",
            &format!("{}/bad-1.0.tar.gz", server.url()),
            "",
            "",
        );
        fx.rebuild();

        let plan = resolve(
            &fx.index,
            &["good".to_string(), "bad".to_string()],
            "linux",
        );
        let config = DownloaderConfig {
            retries: 0,
            ..Default::default()
        };
        let report = fx
            .installer()
            .execute(&plan, &config, reporter())
            .await
            .unwrap();

        assert_eq!(report.installed, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "bad@1.0");
        assert!(fx.registry.has_version("good", "1.0"));
        assert!(!fx.registry.has_version("bad", "1.0"));
    }

    #[tokio::test]
    async fn dependent_is_skipped_when_dependency_fails() {
        let mut server = mockito::Server::new_async().await;
        let body = tar_gz_bytes(&[("pnpm.js", b"code")]);
        server
            .mock("GET", "/pnpm-9.1.0.tar.gz")
            .with_body(&body)
            .create_async()
            .await;
        server
            .mock("GET", "/nodejs-22.0.0.tar.gz")
            .with_status(500)
            .create_async()
            .await;

        let mut fx = Fixture::new();
        fx.add_package(
            "nodejs",
            "22.0.0",
            &format!("{}/nodejs-22.0.0.tar.gz", server.url()),
            "",
            "",
        );
        fx.add_package(
            "pnpm",
            "9.1.0",
            &format!("{}/pnpm-9.1.0.tar.gz", server.url()),
            "",
            "\n[[deps]]\nname = \"nodejs\"\n",
        );
        fx.rebuild();

        let plan = resolve(&fx.index, &["pnpm".to_string()], "linux");
        let config = DownloaderConfig {
            retries: 0,
            ..Default::default()
        };
        let report = fx
            .installer()
            .execute(&plan, &config, reporter())
            .await
            .unwrap();

        assert_eq!(report.installed, 0);
        assert_eq!(report.failed.len(), 2);
        let pnpm = report.failed.iter().find(|(k, _)| k == "pnpm@9.1.0").unwrap();
        assert!(pnpm.1.contains("dependency failed"));
    }

    #[tokio::test]
    async fn already_installed_nodes_are_skipped_without_download() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/tool-1.0.tar.gz").expect(0).create_async().await;

        let mut fx = Fixture::new();
        fx.add_package(
            "tool",
            "1.0",
            &format!("{}/tool-1.0.tar.gz", server.url()),
            "",
            "",
        );
        fx.rebuild();
        fx.index.mark_installed("tool", "1.0", true).unwrap();

        let plan = resolve(&fx.index, &["tool".to_string()], "linux");
        let report = fx
            .installer()
            .execute(&plan, &DownloaderConfig::default(), reporter())
            .await
            .unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(report.installed, 0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn uninstall_removes_artifacts_and_registry_entries() {
        let mut server = mockito::Server::new_async().await;
        let body = tar_gz_bytes(&[("bin/tool", b"bin")]);
        server
            .mock("GET", "/tool-1.0.tar.gz")
            .with_body(&body)
            .create_async()
            .await;

        let mut fx = Fixture::new();
        fx.add_package(
            "tool",
            "1.0",
            &format!("{}/tool-1.0.tar.gz", server.url()),
            "",
            "\n[[directives]]\nkind = \"symlink\"\nfrom = \"bin/tool\"\nto = \"tool\"\n",
        );
        fx.rebuild();

        let plan = resolve(&fx.index, &["tool".to_string()], "linux");
        let home = fx.home.path().to_path_buf();
        fx.installer()
            .execute(&plan, &DownloaderConfig::default(), reporter())
            .await
            .unwrap();
        assert!(fx.registry.has_version("tool", "1.0"));

        fx.installer().uninstall("tool").unwrap();

        assert!(!fx.registry.has_version("tool", "1.0"));
        assert!(!home.join("store/tool/1.0").exists());
        #[cfg(unix)]
        assert!(home.join("bin/tool").symlink_metadata().is_err());
        assert!(!fx.index.find_entry("tool", "1.0").unwrap().installed);
    }

    #[tokio::test]
    async fn uninstall_unknown_package_fails() {
        let mut fx = Fixture::new();
        fx.add_package("tool", "1.0", "https://example.com/t.tar.gz", "", "");
        fx.rebuild();

        let err = fx.installer().uninstall("ghost").unwrap_err();
        assert!(matches!(err, InstallError::NotFound(_)));
    }
}
