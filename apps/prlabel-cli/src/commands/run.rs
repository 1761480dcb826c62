// run.rs — Label pull requests on GitHub.
//
// Pull requests are processed one after another; each gets its own
// snapshot and decision pass. Label configuration is read from the local
// checkout, or fetched from the repository when the file is not present.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use prlabel_github::GhClient;
use prlabel_rules::{
    load_label_configs, AdapterError, LabelConfigs, LabelDriver, LabelOptions, PermissionScope,
    RaceDelays,
};

use super::output::report;

#[derive(Args)]
pub struct RunArgs {
    /// Repository as OWNER/NAME.
    #[arg(long)]
    pub repo: String,

    /// Path to the label configuration file.
    #[arg(long, default_value = ".github/labeler.yml")]
    pub config: PathBuf,

    /// Git ref to fetch the configuration from when it is not present locally.
    #[arg(long = "ref")]
    pub git_ref: Option<String>,

    /// Remove configured labels whose rules no longer match.
    #[arg(long)]
    pub sync_labels: bool,

    /// Let `*` and `**` match path segments starting with a dot.
    #[arg(long)]
    pub dot: bool,

    /// Print each outcome as a JSON object.
    #[arg(long)]
    pub json: bool,

    /// Sleep before re-reading labels ahead of the write.
    #[arg(long, default_value_t = 0, hide = true)]
    pub debug_delay_before_fetch_ms: u64,

    /// Sleep between the re-read and the write.
    #[arg(long, default_value_t = 0, hide = true)]
    pub debug_delay_before_set_ms: u64,

    /// Sleep after the write.
    #[arg(long, default_value_t = 0, hide = true)]
    pub debug_delay_after_set_ms: u64,

    /// Pull request numbers to label.
    pub prs: Vec<u64>,
}

impl RunArgs {
    fn delays(&self) -> RaceDelays {
        RaceDelays {
            before_fetch: Duration::from_millis(self.debug_delay_before_fetch_ms),
            before_set: Duration::from_millis(self.debug_delay_before_set_ms),
            after_set: Duration::from_millis(self.debug_delay_after_set_ms),
        }
    }
}

pub fn execute(args: &RunArgs) -> anyhow::Result<()> {
    if args.prs.is_empty() {
        tracing::warn!("Could not get pull request number(s), exiting");
        return Ok(());
    }
    if !GhClient::has_gh_cli() {
        anyhow::bail!("gh CLI not found - install GitHub CLI to label pull requests");
    }

    let client = GhClient::new(&args.repo);
    let configs = load_configs(&client, &args.config, args.git_ref.as_deref())?;
    tracing::info!("Loaded rules for {} labels", configs.len());

    let options = LabelOptions {
        sync_labels: args.sync_labels,
        dot: args.dot,
    };
    let driver =
        LabelDriver::new(&configs, options, &client, &client).with_delays(args.delays());

    for &pr in &args.prs {
        let outcome = driver
            .run(pr)
            .map_err(|e| permission_hint(e, pr, &args.repo))?;
        report(&outcome, args.json)?;
    }
    Ok(())
}

fn load_configs(client: &GhClient, path: &Path, git_ref: Option<&str>) -> anyhow::Result<LabelConfigs> {
    if path.exists() {
        return load_label_configs(path)
            .with_context(|| format!("failed to load label configuration {}", path.display()));
    }

    tracing::info!(
        "{} not found locally, fetching from {}",
        path.display(),
        client.repo()
    );
    let remote_path = path.to_string_lossy();
    let content = client
        .fetch_content(&remote_path, git_ref)
        .with_context(|| format!("failed to fetch {remote_path} from {}", client.repo()))?;
    LabelConfigs::from_yaml(&content)
        .with_context(|| format!("failed to parse label configuration {remote_path}"))
}

/// Turn permission failures into actionable messages.
fn permission_hint(err: AdapterError, pr: u64, repo: &str) -> anyhow::Error {
    match err {
        AdapterError::PermissionDenied {
            scope: PermissionScope::CreateLabel,
            ..
        } => anyhow::anyhow!(
            "Failed to set labels for PR #{pr}. The token does not have permission to create labels. \
             Ensure the 'issues: write' permission is granted or manually create the missing labels \
             in {repo} before running again."
        ),
        AdapterError::PermissionDenied {
            scope: PermissionScope::ModifyPullRequest,
            message,
        } => {
            tracing::warn!(
                "Labeling requires 'issues: write' permission to create new labels or \
                 'pull-requests: write' permission to add existing labels to pull requests."
            );
            anyhow::anyhow!("{repo} is misconfigured for labeling PR #{pr}: {message}")
        }
        other => anyhow::Error::new(other).context(format!("failed to label PR #{pr}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_delay_flags_become_race_delays() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            run: RunArgs,
        }

        let parsed = Wrapper::parse_from([
            "prlabel",
            "--repo",
            "octo/repo",
            "--debug-delay-before-fetch-ms",
            "250",
            "--debug-delay-after-set-ms",
            "10",
            "12",
        ]);
        let delays = parsed.run.delays();
        assert_eq!(delays.before_fetch, Duration::from_millis(250));
        assert!(delays.before_set.is_zero());
        assert_eq!(delays.after_set, Duration::from_millis(10));
        assert_eq!(parsed.run.prs, vec![12]);
    }

    #[test]
    fn create_label_denial_mentions_issues_write() {
        let err = permission_hint(
            AdapterError::PermissionDenied {
                scope: PermissionScope::CreateLabel,
                message: "Unauthorized (HTTP 403)".to_string(),
            },
            5,
            "octo/repo",
        );
        let text = err.to_string();
        assert!(text.contains("PR #5"));
        assert!(text.contains("issues: write"));
    }

    #[test]
    fn modify_denial_carries_original_message() {
        let err = permission_hint(
            AdapterError::PermissionDenied {
                scope: PermissionScope::ModifyPullRequest,
                message: "Resource not accessible by integration".to_string(),
            },
            6,
            "octo/repo",
        );
        assert!(err.to_string().contains("Resource not accessible by integration"));
    }

    #[test]
    fn other_errors_keep_their_source() {
        let err = permission_hint(AdapterError::NotFound(8), 8, "octo/repo");
        assert_eq!(err.to_string(), "failed to label PR #8");
        assert!(format!("{err:#}").contains("pull request #8 not found"));
    }
}
