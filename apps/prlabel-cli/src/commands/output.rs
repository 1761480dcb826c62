// output.rs — Reporting a labeling outcome.
//
// Results go to stdout as `key=value` lines. When running inside GitHub
// Actions ($GITHUB_OUTPUT is set) the same pairs are appended to the step
// output file so later steps can read `new-labels` and `all-labels`.

use std::fs::OpenOptions;
use std::io::Write;

use anyhow::Context;
use prlabel_rules::{LabelOutcome, MAX_LABELS};

/// Print the outcome and warn about labels that did not fit.
pub fn report(outcome: &LabelOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(outcome)?);
    } else {
        for (key, value) in output_pairs(outcome) {
            println!("{key}={value}");
        }
    }

    if let Ok(path) = std::env::var("GITHUB_OUTPUT") {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open GITHUB_OUTPUT file {path}"))?;
        for (key, value) in output_pairs(outcome) {
            writeln!(file, "{key}={value}")?;
        }
    }

    if let Some(warning) = excess_warning(&outcome.excess) {
        tracing::warn!("PR #{}: {}", outcome.pr, warning);
    }
    Ok(())
}

pub fn output_pairs(outcome: &LabelOutcome) -> [(&'static str, String); 2] {
    [
        ("new-labels", outcome.new_labels.join(",")),
        ("all-labels", outcome.all_labels.join(",")),
    ]
}

pub fn excess_warning(excess: &[String]) -> Option<String> {
    if excess.is_empty() {
        return None;
    }
    Some(format!(
        "Maximum of {MAX_LABELS} labels allowed. Excess labels: {}",
        excess.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> LabelOutcome {
        LabelOutcome {
            pr: 4,
            all_labels: vec!["triage".to_string(), "docs".to_string()],
            new_labels: vec!["docs".to_string()],
            excess: Vec::new(),
            written: true,
        }
    }

    #[test]
    fn pairs_are_comma_joined() {
        let pairs = output_pairs(&outcome());
        assert_eq!(pairs[0], ("new-labels", "docs".to_string()));
        assert_eq!(pairs[1], ("all-labels", "triage,docs".to_string()));
    }

    #[test]
    fn no_warning_without_excess() {
        assert!(excess_warning(&[]).is_none());
    }

    #[test]
    fn warning_lists_excess_labels() {
        let warning = excess_warning(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(warning, "Maximum of 100 labels allowed. Excess labels: a, b");
    }
}
