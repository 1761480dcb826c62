// check.rs — Evaluate rules offline against a pull request described by flags.
//
// Useful for trying out a configuration before wiring it into CI:
//
//   prlabel check --config .github/labeler.yml \
//       --file src/lib.rs --file docs/intro.md --head feature/x --title "feat: x"

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use prlabel_rules::{compute_labels, load_label_configs, LabelOptions, LabelOutcome, PrFeatures};

use super::output::report;

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the label configuration file.
    #[arg(long, default_value = ".github/labeler.yml")]
    pub config: PathBuf,

    /// Changed file path (repeatable).
    #[arg(long = "file")]
    pub files: Vec<String>,

    /// Base branch name.
    #[arg(long, default_value = "")]
    pub base: String,

    /// Head branch name.
    #[arg(long, default_value = "")]
    pub head: String,

    /// Pull request title.
    #[arg(long)]
    pub title: Option<String>,

    /// Label already on the pull request (repeatable).
    #[arg(long = "label")]
    pub labels: Vec<String>,

    #[arg(long)]
    pub sync_labels: bool,

    #[arg(long)]
    pub dot: bool,

    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: &CheckArgs) -> anyhow::Result<()> {
    let configs = load_label_configs(&args.config).with_context(|| {
        format!(
            "failed to load label configuration {}",
            args.config.display()
        )
    })?;
    let features = PrFeatures::new(
        args.files.iter().cloned(),
        args.base.as_str(),
        args.head.as_str(),
        args.title.clone(),
    );
    let options = LabelOptions {
        sync_labels: args.sync_labels,
        dot: args.dot,
    };

    let plan = compute_labels(&args.labels, &configs, &features, options);
    let new_labels = plan
        .labels_to_apply
        .iter()
        .filter(|l| !args.labels.contains(l))
        .cloned()
        .collect();
    let outcome = LabelOutcome {
        pr: 0,
        written: false,
        all_labels: plan.labels_to_apply,
        new_labels,
        excess: plan.excess,
    };
    report(&outcome, args.json)
}
