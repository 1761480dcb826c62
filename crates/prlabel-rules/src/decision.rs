// decision.rs — Turns rule results into the label set written back to a PR.
//
// Flow for one pull request:
//
// 1. Start from the labels present in the snapshot (deduplicated).
// 2. For each configured label: add it if its rules match; otherwise drop it
//    when sync mode is on, leave it alone when sync mode is off.
// 3. Cap the set at MAX_LABELS; anything past the cap is reported as excess.
// 4. If the result equals the snapshot, stop. Otherwise re-read the labels,
//    put labels a human added since the snapshot first, then the computed
//    set, cap again, and write.
//
// Step 4 narrows the window in which a concurrent edit can be lost; it does
// not close it. A label added between the re-read and the write is still
// overwritten. `RaceDelays` widens that window on purpose so reconciliation
// can be exercised by hand.

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapter::{LabelMutator, PrSnapshotProvider, Result};
use crate::config::LabelConfigs;
use crate::features::PrFeatures;
use crate::matcher::check_match_configs;

/// GitHub issues and pull requests cannot carry more than 100 labels.
pub const MAX_LABELS: usize = 100;

/// Global flags that apply to every label in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelOptions {
    /// Remove configured labels whose rules no longer match.
    pub sync_labels: bool,
    /// Let `*` and `**` match path segments that start with a dot.
    pub dot: bool,
}

/// Pauses inserted around the pre-write re-read and the write. All zero
/// outside of manual race testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RaceDelays {
    pub before_fetch: Duration,
    pub before_set: Duration,
    pub after_set: Duration,
}

fn pause(delay: Duration, step: &str) {
    if !delay.is_zero() {
        debug!("sleeping {}ms {step}", delay.as_millis());
        thread::sleep(delay);
    }
}

/// Result of evaluating the rules against one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPlan {
    /// At most MAX_LABELS labels, in working-set order.
    pub labels_to_apply: Vec<String>,
    /// Labels past the cap, in working-set order.
    pub excess: Vec<String>,
}

/// What happened to one pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelOutcome {
    pub pr: u64,
    /// The label set now on the pull request.
    pub all_labels: Vec<String>,
    /// Labels in `all_labels` that were not in the original snapshot.
    pub new_labels: Vec<String>,
    /// Labels that matched but did not fit under the cap.
    pub excess: Vec<String>,
    /// Whether a write was issued.
    pub written: bool,
}

/// Compute the working label set for one snapshot.
pub fn compute_labels(
    preexisting: &[String],
    configs: &LabelConfigs,
    features: &PrFeatures,
    options: LabelOptions,
) -> LabelPlan {
    let mut labels = dedup(preexisting.iter());

    for rule in configs.iter() {
        debug!("processing {}", rule.name);
        if check_match_configs(features, &rule.configs, options.dot) {
            if !labels.contains(&rule.name) {
                labels.push(rule.name.clone());
            }
        } else if options.sync_labels {
            labels.retain(|l| l != &rule.name);
        }
    }

    let excess = labels.split_off(labels.len().min(MAX_LABELS));
    LabelPlan {
        labels_to_apply: labels,
        excess,
    }
}

/// Merge a fresh read of the labels with the computed set.
///
/// Labels present in `latest` but not in `preexisting` were added by someone
/// else during the run. They always come first and survive the cap ahead of
/// computed labels.
pub fn reconcile(preexisting: &[String], latest: &[String], labels_to_apply: &[String]) -> Vec<String> {
    let manual = latest.iter().filter(|l| !preexisting.contains(l));
    let mut merged = dedup(manual.chain(labels_to_apply.iter()));
    merged.truncate(MAX_LABELS);
    merged
}

fn dedup<'a>(labels: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        if !out.contains(label) {
            out.push(label.clone());
        }
    }
    out
}

/// Runs the decision pass for a pull request against its collaborators.
pub struct LabelDriver<'a> {
    configs: &'a LabelConfigs,
    options: LabelOptions,
    provider: &'a dyn PrSnapshotProvider,
    mutator: &'a dyn LabelMutator,
    delays: RaceDelays,
}

impl<'a> LabelDriver<'a> {
    pub fn new(
        configs: &'a LabelConfigs,
        options: LabelOptions,
        provider: &'a dyn PrSnapshotProvider,
        mutator: &'a dyn LabelMutator,
    ) -> Self {
        Self {
            configs,
            options,
            provider,
            mutator,
            delays: RaceDelays::default(),
        }
    }

    pub fn with_delays(mut self, delays: RaceDelays) -> Self {
        self.delays = delays;
        self
    }

    /// Label one pull request. Provider and mutator errors are returned
    /// as-is.
    pub fn run(&self, pr: u64) -> Result<LabelOutcome> {
        let snapshot = self.provider.snapshot(pr)?;
        let preexisting = dedup(snapshot.labels.iter());
        let plan = compute_labels(&preexisting, self.configs, &snapshot.features, self.options);

        if plan.labels_to_apply == preexisting {
            info!("PR #{pr}: labels already up to date");
            return Ok(LabelOutcome {
                pr,
                all_labels: plan.labels_to_apply,
                new_labels: Vec::new(),
                excess: plan.excess,
                written: false,
            });
        }

        pause(self.delays.before_fetch, "before re-reading labels");
        let latest = self.provider.current_labels(pr)?;
        let final_labels = reconcile(&preexisting, &latest, &plan.labels_to_apply);
        pause(self.delays.before_set, "before writing labels");
        self.mutator.set_labels(pr, &final_labels)?;
        pause(self.delays.after_set, "after writing labels");

        let new_labels: Vec<String> = final_labels
            .iter()
            .filter(|l| !preexisting.contains(l))
            .cloned()
            .collect();
        // Computed labels pushed out by manual ones count as excess too.
        let mut excess = plan.excess;
        excess.extend(
            plan.labels_to_apply
                .iter()
                .filter(|l| !final_labels.contains(l))
                .cloned(),
        );

        info!(
            "PR #{pr}: wrote {} labels ({} new)",
            final_labels.len(),
            new_labels.len()
        );
        Ok(LabelOutcome {
            pr,
            all_labels: final_labels,
            new_labels,
            excess,
            written: true,
        })
    }
}
