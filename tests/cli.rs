//! CLI smoke tests: spawn the built binary against a temporary xim home.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

struct TestContext {
    temp_dir: TempDir,
    xim_home: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let xim_home = temp_dir.path().join(".xim");
        fs::create_dir_all(xim_home.join("index")).expect("failed to create xim home");
        Self { temp_dir, xim_home }
    }

    fn add_manifest(&self, name: &str, version: &str) {
        let dir = self.xim_home.join("index").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{version}.toml")),
            format!(
                "[package]\nname = \"{name}\"\nversion = \"{version}\"\ndescription = \"test package\"\n\n[artifact]\nurl = \"https://example.com/{name}-{version}.tar.gz\"\n"
            ),
        )
        .unwrap();
    }

    fn xim_cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_xim"));
        cmd.env("HOME", self.temp_dir.path());
        cmd.env("XIM_HOME", &self.xim_home);
        cmd
    }
}

#[test]
fn help_works() {
    let ctx = TestContext::new();
    let output = ctx.xim_cmd().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("install"));
    assert!(stdout.contains("search"));
}

#[test]
fn search_hit_and_miss_both_exit_zero() {
    let ctx = TestContext::new();
    ctx.add_manifest("gcc", "15.1.0");

    let output = ctx.xim_cmd().args(["search", "gc"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("gcc"));

    let output = ctx.xim_cmd().args(["search", "zzz"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No packages found"));
}

#[test]
fn info_unknown_package_exits_nonzero() {
    let ctx = TestContext::new();
    ctx.add_manifest("gcc", "15.1.0");

    let output = ctx.xim_cmd().args(["info", "gcc"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("15.1.0"));

    let output = ctx.xim_cmd().args(["info", "ghost"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn list_empty_registry_exits_zero() {
    let ctx = TestContext::new();
    ctx.add_manifest("gcc", "15.1.0");

    let output = ctx.xim_cmd().arg("list").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No packages installed"));
}

#[test]
fn install_dry_run_prints_plan() {
    let ctx = TestContext::new();
    ctx.add_manifest("gcc", "15.1.0");
    ctx.add_manifest("gcc", "14.2.0");

    let output = ctx
        .xim_cmd()
        .args(["install", "gcc@14", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gcc@14.2.0"));

    let output = ctx
        .xim_cmd()
        .args(["install", "gcc@16", "--dry-run"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
