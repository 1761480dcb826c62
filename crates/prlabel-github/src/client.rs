//! `gh api` wrapper implementing the snapshot provider and label mutator.

use std::io::Write;
use std::process::{Command, Stdio};

use prlabel_rules::adapter::{
    AdapterError, LabelMutator, PermissionScope, PrSnapshot, PrSnapshotProvider, Result,
};
use prlabel_rules::PrFeatures;

use crate::pulls::{parse_lines, parse_pull, set_labels_body};

/// Talks to one GitHub repository through the `gh` CLI.
///
/// Authentication is whatever `gh` is logged in with (or `GH_TOKEN`).
pub struct GhClient {
    /// `owner/name`.
    repo: String,
}

impl GhClient {
    pub fn new(repo: impl Into<String>) -> Self {
        Self { repo: repo.into() }
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Check if gh CLI is available
    pub fn has_gh_cli() -> bool {
        Command::new("gh")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Run `gh api` with the given arguments, optionally feeding `input` on
    /// stdin. Returns stdout on success.
    pub(crate) fn api(&self, args: &[&str], input: Option<&str>) -> Result<String> {
        tracing::debug!("gh api {}", args.join(" "));
        let mut child = Command::new("gh")
            .arg("api")
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let (Some(body), Some(mut stdin)) = (input, child.stdin.take()) {
            stdin.write_all(body.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(&stderr));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn changed_files(&self, pr: u64) -> Result<Vec<String>> {
        let path = format!("repos/{}/pulls/{}/files?per_page=100", self.repo, pr);
        let out = self.api(&["--paginate", &path, "--jq", ".[].filename"], None)?;
        Ok(parse_lines(&out))
    }
}

impl PrSnapshotProvider for GhClient {
    fn snapshot(&self, pr: u64) -> Result<PrSnapshot> {
        let path = format!("repos/{}/pulls/{}", self.repo, pr);
        let body = self.api(&[&path], None).map_err(|e| not_found(e, pr))?;
        let pull = parse_pull(&body)?;
        let files = self.changed_files(pr)?;
        tracing::debug!("PR #{pr}: {} changed files", files.len());

        Ok(PrSnapshot {
            number: pr,
            features: PrFeatures::new(files, pull.base.branch, pull.head.branch, pull.title),
            labels: pull.labels.into_iter().map(|l| l.name).collect(),
        })
    }

    fn current_labels(&self, pr: u64) -> Result<Vec<String>> {
        let path = format!("repos/{}/issues/{}/labels?per_page=100", self.repo, pr);
        let out = self
            .api(&["--paginate", &path, "--jq", ".[].name"], None)
            .map_err(|e| not_found(e, pr))?;
        Ok(parse_lines(&out))
    }
}

impl LabelMutator for GhClient {
    fn set_labels(&self, pr: u64, labels: &[String]) -> Result<()> {
        let path = format!("repos/{}/issues/{}/labels", self.repo, pr);
        let body = set_labels_body(labels)?;
        self.api(&["--method", "PUT", &path, "--input", "-"], Some(&body))?;
        tracing::info!("PR #{pr}: set {} labels", labels.len());
        Ok(())
    }
}

/// Map `gh api` stderr onto an adapter error.
///
/// GitHub answers a label write that would create a new label without
/// `issues: write` with a 403 mentioning "unauthorized"; a token that cannot
/// touch the pull request at all gets "Resource not accessible by
/// integration".
pub fn classify_failure(stderr: &str) -> AdapterError {
    let message = stderr.trim().to_string();
    let lower = message.to_lowercase();
    if lower.contains("resource not accessible by integration") {
        AdapterError::PermissionDenied {
            scope: PermissionScope::ModifyPullRequest,
            message,
        }
    } else if lower.contains("http 403") && lower.contains("unauthorized") {
        AdapterError::PermissionDenied {
            scope: PermissionScope::CreateLabel,
            message,
        }
    } else {
        AdapterError::Command(message)
    }
}

fn not_found(err: AdapterError, pr: u64) -> AdapterError {
    match err {
        AdapterError::Command(msg) if msg.contains("HTTP 404") => AdapterError::NotFound(pr),
        other => other,
    }
}
