// check_command.rs — Runs the `prlabel` binary offline against a temp config.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const RULES: &str = r#"
source:
- all:
  - changed-files: ['src/**']
documentation:
- any:
  - changed-files: ['docs/**', '*.md']
feature:
- pr-title: '^feat:'
bug:
- head-branch: '^fix/'
"#;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("labeler.yml");
    std::fs::write(&path, content).unwrap();
    path
}

fn prlabel(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_prlabel"))
        .arg(args[0])
        .arg("--config")
        .arg(config)
        .args(&args[1..])
        .env_remove("GITHUB_OUTPUT")
        .output()
        .unwrap()
}

#[test]
fn check_prints_matching_labels() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, RULES);

    let out = prlabel(
        &config,
        &[
            "check",
            "--file",
            "src/lib.rs",
            "--file",
            "docs/intro.md",
            "--title",
            "feat: Add new feature",
            "--head",
            "feature/x",
        ],
    );

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("new-labels=source,documentation,feature\n"));
    assert!(stdout.contains("all-labels=source,documentation,feature\n"));
}

#[test]
fn check_with_sync_drops_stale_label() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, RULES);

    let out = prlabel(
        &config,
        &[
            "check",
            "--file",
            "src/lib.rs",
            "--head",
            "feature/x",
            "--label",
            "bug",
            "--sync-labels",
        ],
    );

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("all-labels=source\n"));
}

#[test]
fn check_writes_github_output_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, RULES);
    let output_file = dir.path().join("github_output");

    let out = Command::new(env!("CARGO_BIN_EXE_prlabel"))
        .args(["check", "--file", "README.md", "--config"])
        .arg(&config)
        .env("GITHUB_OUTPUT", &output_file)
        .output()
        .unwrap();

    assert!(out.status.success());
    let written = std::fs::read_to_string(&output_file).unwrap();
    assert_eq!(written, "new-labels=documentation\nall-labels=documentation\n");
}

#[test]
fn validate_rejects_bad_regex() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "bug:\n- head-branch: '(fix'\n");

    let out = prlabel(&config, &["validate"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("bug"));
}

#[test]
fn validate_summarises_good_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, RULES);

    let out = prlabel(&config, &["validate"]);

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("4 labels\n"));
}

#[test]
fn run_without_pr_numbers_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, RULES);

    let out = prlabel(&config, &["run", "--repo", "octo/repo"]);

    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}
