// branch.rs — "any"/"all" evaluation of regexes against a branch name.

use tracing::debug;

use crate::features::{BranchKind, PrFeatures};
use crate::pattern::RegexPattern;

/// True if at least one pattern matches the selected branch name.
pub fn check_any_branch(features: &PrFeatures, patterns: &[RegexPattern], which: BranchKind) -> bool {
    let Some((branch, patterns)) = prepare(features, patterns, which) else {
        return false;
    };

    debug!("   checking \"{which}-branch\" patterns against {branch}");
    let matched = patterns.iter().any(|p| p.matches(branch));
    if matched {
        debug!("   \"{which}-branch\" patterns matched against {branch}");
    } else {
        debug!("   \"{which}-branch\" patterns did not match against {branch}");
    }
    matched
}

/// True if every pattern matches the selected branch name.
pub fn check_all_branch(features: &PrFeatures, patterns: &[RegexPattern], which: BranchKind) -> bool {
    let Some((branch, patterns)) = prepare(features, patterns, which) else {
        return false;
    };

    debug!("   checking \"{which}-branch\" patterns against {branch}");
    patterns.iter().all(|p| {
        let hit = p.matches(branch);
        if !hit {
            debug!("    {} did not match {branch}", p.as_str());
        }
        hit
    })
}

/// Returns `None` when there is nothing to test: no branch name or no
/// non-blank patterns.
fn prepare<'a>(
    features: &'a PrFeatures,
    patterns: &'a [RegexPattern],
    which: BranchKind,
) -> Option<(&'a str, Vec<&'a RegexPattern>)> {
    let branch = features.branch(which);
    if branch.is_empty() {
        debug!("   no {which} branch name available");
        return None;
    }
    let patterns: Vec<&RegexPattern> = patterns.iter().filter(|p| !p.is_blank()).collect();
    if patterns.is_empty() {
        debug!("   no \"{which}-branch\" patterns to check");
        return None;
    }
    Some((branch, patterns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regexes(patterns: &[&str]) -> Vec<RegexPattern> {
        patterns
            .iter()
            .map(|p| RegexPattern::compile(p).unwrap())
            .collect()
    }

    fn features() -> PrFeatures {
        PrFeatures::new(Vec::new(), "main", "feature/login-form", None)
    }

    #[test]
    fn empty_pattern_list_never_matches() {
        for which in [BranchKind::Base, BranchKind::Head] {
            assert!(!check_any_branch(&features(), &[], which));
            assert!(!check_all_branch(&features(), &[], which));
        }
    }

    #[test]
    fn any_branch_matches_one_of_many() {
        let patterns = regexes(&["^release/", "^feature/"]);
        assert!(check_any_branch(&features(), &patterns, BranchKind::Head));
        assert!(!check_any_branch(&features(), &patterns, BranchKind::Base));
    }

    #[test]
    fn all_branch_requires_every_pattern() {
        assert!(check_all_branch(
            &features(),
            &regexes(&["^feature/", "login"]),
            BranchKind::Head
        ));
        assert!(!check_all_branch(
            &features(),
            &regexes(&["^feature/", "signup"]),
            BranchKind::Head
        ));
    }

    #[test]
    fn which_selects_the_branch() {
        let patterns = regexes(&["^main$"]);
        assert!(check_all_branch(&features(), &patterns, BranchKind::Base));
        assert!(!check_all_branch(&features(), &patterns, BranchKind::Head));
    }

    #[test]
    fn missing_branch_name_never_matches() {
        let features = PrFeatures::new(Vec::new(), "", "", None);
        let patterns = regexes(&[".*"]);
        assert!(!check_any_branch(&features, &patterns, BranchKind::Base));
        assert!(!check_all_branch(&features, &patterns, BranchKind::Head));
    }
}
