//! End-to-end tests for the bazeldnf binary.
//!
//! These tests exercise the compiled binary using assert_cmd against files
//! in temporary directories.

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const MANIFEST: &str = r#"files = ["/usr/bin/bash", "/etc/bashrc"]

[[packages]]
name = "bash"
version = { version = "5.1.8", release = "2.fc35" }
arch = "x86_64"
checksum = "aa11"
href = "Packages/b/bash-5.1.8-2.fc35.x86_64.rpm"
mirrors = ["https://a.example/fedora/", "https://b.example/fedora"]

[[packages]]
name = "acl"
checksum = "bb22"
href = "Packages/a/acl.rpm"
mirrors = ["https://a.example/fedora/"]
"#;

const WORKSPACE: &str = r#"workspace(name = "image")

load("@bazeldnf//:deps.bzl", "rpm")
"#;

fn bazeldnf() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bazeldnf"))
}

fn setup(dir: &Path) {
    fs::write(dir.join("packages.toml"), MANIFEST).unwrap();
    fs::write(dir.join("WORKSPACE"), WORKSPACE).unwrap();
    fs::write(dir.join("BUILD.bazel"), "").unwrap();
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help_lists_commands() {
    bazeldnf()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rpms"))
        .stdout(predicate::str::contains("rpmtree"));
}

#[test]
fn test_missing_subcommand_fails() {
    bazeldnf().assert().failure();
}

// ============================================================================
// rpms
// ============================================================================

#[test]
fn test_rpms_writes_workspace() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    bazeldnf()
        .current_dir(dir.path())
        .args(["rpms", "--manifest", "packages.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rpm rules"));

    assert_eq!(
        fs::read_to_string(dir.path().join("WORKSPACE")).unwrap(),
        r#"workspace(name = "image")

load("@bazeldnf//:deps.bzl", "rpm")

rpm(
    name = "acl",
    sha256 = "bb22",
    urls = ["https://a.example/fedora/Packages/a/acl.rpm"],
)

rpm(
    name = "bash-5.1.8-2.fc35.x86_64",
    sha256 = "aa11",
    urls = [
        "https://a.example/fedora/Packages/b/bash-5.1.8-2.fc35.x86_64.rpm",
        "https://b.example/fedora/Packages/b/bash-5.1.8-2.fc35.x86_64.rpm",
    ],
)
"#
    );
}

#[test]
fn test_rpms_twice_is_stable() {
    let dir = tempdir().unwrap();
    setup(dir.path());
    let workspace = dir.path().join("WORKSPACE");

    for _ in 0..2 {
        bazeldnf()
            .current_dir(dir.path())
            .args(["rpms", "--manifest", "packages.toml"])
            .assert()
            .success();
    }
    let first = fs::read_to_string(&workspace).unwrap();

    bazeldnf()
        .current_dir(dir.path())
        .args(["rpms", "--manifest", "packages.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 new"));
    assert_eq!(fs::read_to_string(&workspace).unwrap(), first);
}

#[test]
fn test_rpms_dry_run_prints_file() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    bazeldnf()
        .current_dir(dir.path())
        .args(["rpms", "--manifest", "packages.toml", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("workspace(name = \"image\")"))
        .stdout(predicate::str::contains("name = \"acl\","));

    assert_eq!(
        fs::read_to_string(dir.path().join("WORKSPACE")).unwrap(),
        WORKSPACE
    );
}

#[test]
fn test_rpms_diff_then_up_to_date() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    bazeldnf()
        .current_dir(dir.path())
        .args(["rpms", "--manifest", "packages.toml", "--diff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+rpm("));
    assert_eq!(
        fs::read_to_string(dir.path().join("WORKSPACE")).unwrap(),
        WORKSPACE
    );

    bazeldnf()
        .current_dir(dir.path())
        .args(["rpms", "--manifest", "packages.toml"])
        .assert()
        .success();
    bazeldnf()
        .current_dir(dir.path())
        .args(["rpms", "--manifest", "packages.toml", "--diff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is up to date"));
}

#[test]
fn test_rpms_with_json_manifest_from_env() {
    let dir = tempdir().unwrap();
    setup(dir.path());
    fs::write(
        dir.path().join("packages.json"),
        r#"{"packages": [{"name": "zlib", "checksum": "cc", "href": "zlib.rpm", "mirrors": ["http://m"]}]}"#,
    )
    .unwrap();

    bazeldnf()
        .current_dir(dir.path())
        .env("BAZELDNF_MANIFEST", "packages.json")
        .args(["rpms", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"http://m/zlib.rpm\""));
}

#[test]
fn test_rpms_missing_workspace_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("packages.toml"), MANIFEST).unwrap();

    bazeldnf()
        .current_dir(dir.path())
        .args(["rpms", "--manifest", "packages.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("WORKSPACE"));
}

#[test]
fn test_rpms_malformed_workspace_fails() {
    let dir = tempdir().unwrap();
    setup(dir.path());
    fs::write(dir.path().join("WORKSPACE"), "rpm(name = \"a\"\n").unwrap();

    bazeldnf()
        .current_dir(dir.path())
        .args(["rpms", "--manifest", "packages.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn test_rpms_empty_manifest_fails() {
    let dir = tempdir().unwrap();
    setup(dir.path());
    fs::write(dir.path().join("empty.toml"), "").unwrap();

    bazeldnf()
        .current_dir(dir.path())
        .args(["rpms", "--manifest", "empty.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lists no packages"));
}

// ============================================================================
// rpmtree
// ============================================================================

#[test]
fn test_rpmtree_uses_manifest_files() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    bazeldnf()
        .current_dir(dir.path())
        .args(["rpmtree", "--name", "sandbox", "--manifest", "packages.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 rpmtree rules"));

    assert_eq!(
        fs::read_to_string(dir.path().join("BUILD.bazel")).unwrap(),
        r#"rpmtree(
    name = "sandbox",
    rpms = [
        "@bash//rpm",
        "@acl//rpm",
    ],
    files = [
        "/etc/bashrc",
        "/usr/bin/bash",
    ],
)
"#
    );
}

#[test]
fn test_rpmtree_files_flag_overrides_manifest() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    bazeldnf()
        .current_dir(dir.path())
        .args([
            "rpmtree",
            "--name",
            "sandbox",
            "--manifest",
            "packages.toml",
            "--file",
            "/bin/sh",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("files = [\"/bin/sh\"],"))
        .stdout(predicate::str::contains("/etc/bashrc").not());
}

#[test]
fn test_rpmtree_missing_buildfile_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("packages.toml"), MANIFEST).unwrap();

    bazeldnf()
        .current_dir(dir.path())
        .args(["rpmtree", "--name", "sandbox", "--manifest", "packages.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BUILD.bazel"));
}
