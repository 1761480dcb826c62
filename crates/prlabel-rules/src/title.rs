// title.rs — Pull request title rules.
//
// The title is optional: events without a pull request, or a pull request
// without a title, make every title rule report false.

use serde_yaml::Value;
use tracing::debug;

use crate::config::string_list;
use crate::error::RuleError;
use crate::features::PrFeatures;
use crate::pattern::RegexPattern;

/// The `pr-title` entry of a raw rule mapping.
#[derive(Debug, Clone, Default)]
pub struct PrTitleMatchConfig {
    /// `None` when the mapping has no `pr-title` key.
    pub pr_title: Option<Vec<RegexPattern>>,
}

impl PrTitleMatchConfig {
    /// Extract and compile `pr-title` from a rule mapping. A single string is
    /// treated as a one-element list; a missing key yields an empty config.
    pub fn from_value(value: &Value, label: &str) -> Result<Self, RuleError> {
        let Some(raw) = value.get("pr-title").filter(|v| !v.is_null()) else {
            return Ok(Self::default());
        };
        let patterns = string_list(raw, label, "pr-title")?
            .iter()
            .map(|p| RegexPattern::compile(p))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.for_label(label))?;
        Ok(Self {
            pr_title: Some(patterns),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pr_title.is_none()
    }
}

/// True if at least one pattern matches the title.
pub fn check_any_pr_title(features: &PrFeatures, patterns: &[RegexPattern]) -> bool {
    let Some((title, patterns)) = prepare(features, patterns) else {
        return false;
    };

    debug!("   checking \"pr-title\" patterns against \"{title}\"");
    let matched = patterns.iter().any(|p| p.matches(title));
    if matched {
        debug!("   \"pr-title\" patterns matched against \"{title}\"");
    } else {
        debug!("   \"pr-title\" patterns did not match against \"{title}\"");
    }
    matched
}

/// True if every pattern matches the title. An empty pattern list is false,
/// the same as for changed-files and branch rules.
pub fn check_all_pr_title(features: &PrFeatures, patterns: &[RegexPattern]) -> bool {
    let Some((title, patterns)) = prepare(features, patterns) else {
        return false;
    };

    debug!("   checking \"pr-title\" patterns against \"{title}\"");
    patterns.iter().all(|p| {
        let hit = p.matches(title);
        if !hit {
            debug!("    {} did not match \"{title}\"", p.as_str());
        }
        hit
    })
}

fn prepare<'a>(
    features: &'a PrFeatures,
    patterns: &'a [RegexPattern],
) -> Option<(&'a str, Vec<&'a RegexPattern>)> {
    let Some(title) = features.title() else {
        debug!("   no PR title");
        return None;
    };
    let patterns: Vec<&RegexPattern> = patterns.iter().filter(|p| !p.is_blank()).collect();
    if patterns.is_empty() {
        debug!("   no \"pr-title\" patterns to check");
        return None;
    }
    Some((title, patterns))
}
