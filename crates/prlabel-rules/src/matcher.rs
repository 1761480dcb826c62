// matcher.rs — Combines the per-signal evaluators into a label decision.
//
// A label matches when every MatchConfig in its list matches. A MatchConfig
// matches when it is non-empty, its "all" block (if present) passes, and its
// "any" block (if present) passes. Within a block, sub-rules are tried in
// order and evaluation stops at the first success ("any") or failure ("all").

use tracing::debug;

use crate::branch::{check_all_branch, check_any_branch};
use crate::changed_files::{check_all_changed_files, check_any_changed_files};
use crate::config::{BaseMatchConfig, MatchConfig};
use crate::features::{BranchKind, PrFeatures};
use crate::title::{check_all_pr_title, check_any_pr_title};

/// True only if every config in the list matches.
pub fn check_match_configs(features: &PrFeatures, configs: &[MatchConfig], dot: bool) -> bool {
    configs.iter().all(|config| {
        debug!(" checking config {:?}", config);
        check_match(features, config, dot)
    })
}

/// Evaluate a single MatchConfig. The "all" block is checked first.
pub fn check_match(features: &PrFeatures, config: &MatchConfig, dot: bool) -> bool {
    if config.is_empty() {
        debug!("  no \"any\" or \"all\" patterns to check");
        return false;
    }

    if let Some(all) = &config.all {
        if !check_all(features, all, dot) {
            return false;
        }
    }

    if let Some(any) = &config.any {
        if !check_any(features, any, dot) {
            return false;
        }
    }

    true
}

/// True if at least one sub-rule in the block passes its "any" check.
pub fn check_any(features: &PrFeatures, configs: &[BaseMatchConfig], dot: bool) -> bool {
    debug!("  checking \"any\" patterns");
    if configs.is_empty() {
        debug!("  no \"any\" patterns to check");
        return false;
    }

    let matched = configs.iter().any(|config| match config {
        BaseMatchConfig::ChangedFiles(p) => {
            check_any_changed_files(features.changed_files(), p, dot)
        }
        BaseMatchConfig::BaseBranch(p) => check_any_branch(features, p, BranchKind::Base),
        BaseMatchConfig::HeadBranch(p) => check_any_branch(features, p, BranchKind::Head),
        BaseMatchConfig::PrTitle(p) => check_any_pr_title(features, p),
    });

    if matched {
        debug!("  \"any\" patterns matched");
    } else {
        debug!("  \"any\" patterns did not match any configs");
    }
    matched
}

/// True if every sub-rule in the block passes its "all" check.
pub fn check_all(features: &PrFeatures, configs: &[BaseMatchConfig], dot: bool) -> bool {
    debug!("  checking \"all\" patterns");
    if configs.is_empty() {
        debug!("  no \"all\" patterns to check");
        return false;
    }

    let matched = configs.iter().all(|config| match config {
        BaseMatchConfig::ChangedFiles(p) => {
            check_all_changed_files(features.changed_files(), p, dot)
        }
        BaseMatchConfig::BaseBranch(p) => check_all_branch(features, p, BranchKind::Base),
        BaseMatchConfig::HeadBranch(p) => check_all_branch(features, p, BranchKind::Head),
        BaseMatchConfig::PrTitle(p) => check_all_pr_title(features, p),
    });

    if matched {
        debug!("  \"all\" patterns matched all configs");
    } else {
        debug!("  \"all\" patterns did not match");
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{GlobPattern, RegexPattern};

    fn files(patterns: &[&str]) -> BaseMatchConfig {
        BaseMatchConfig::ChangedFiles(
            patterns
                .iter()
                .map(|p| GlobPattern::compile(p).unwrap())
                .collect(),
        )
    }

    fn regexes(patterns: &[&str]) -> Vec<RegexPattern> {
        patterns
            .iter()
            .map(|p| RegexPattern::compile(p).unwrap())
            .collect()
    }

    fn features() -> PrFeatures {
        PrFeatures::new(
            vec!["src/a.ts".to_string(), "docs/readme.md".to_string()],
            "main",
            "feature/search",
            Some("feat: search box".to_string()),
        )
    }

    #[test]
    fn empty_config_never_matches() {
        assert!(!check_match(&features(), &MatchConfig::default(), false));
    }

    #[test]
    fn empty_blocks_never_match() {
        assert!(!check_match(&features(), &MatchConfig::any(Vec::new()), false));
        assert!(!check_match(&features(), &MatchConfig::all(Vec::new()), false));
    }

    #[test]
    fn all_block_over_changed_files() {
        let hit = MatchConfig::all(vec![files(&["src/**"])]);
        assert!(check_match(&features(), &hit, false));

        let miss = MatchConfig::all(vec![files(&["src/**", "test/**"])]);
        assert!(!check_match(&features(), &miss, false));
    }

    #[test]
    fn any_block_mixes_signal_kinds() {
        let config = MatchConfig::any(vec![
            files(&["test/**"]),
            BaseMatchConfig::BaseBranch(regexes(&["^release/"])),
            BaseMatchConfig::HeadBranch(regexes(&["^feature/"])),
        ]);
        assert!(check_match(&features(), &config, false));

        let none = MatchConfig::any(vec![
            files(&["test/**"]),
            BaseMatchConfig::PrTitle(regexes(&["^fix:"])),
        ]);
        assert!(!check_match(&features(), &none, false));
    }

    #[test]
    fn all_block_requires_every_signal_kind() {
        let config = MatchConfig::all(vec![
            files(&["docs/**"]),
            BaseMatchConfig::BaseBranch(regexes(&["^main$"])),
            BaseMatchConfig::PrTitle(regexes(&["^feat:"])),
        ]);
        assert!(check_match(&features(), &config, false));

        let config = MatchConfig::all(vec![
            files(&["docs/**"]),
            BaseMatchConfig::HeadBranch(regexes(&["^hotfix/"])),
        ]);
        assert!(!check_match(&features(), &config, false));
    }

    #[test]
    fn both_blocks_must_pass() {
        let config = MatchConfig {
            all: Some(vec![BaseMatchConfig::BaseBranch(regexes(&["^main$"]))]),
            any: Some(vec![files(&["test/**"])]),
        };
        assert!(!check_match(&features(), &config, false));

        let config = MatchConfig {
            all: Some(vec![BaseMatchConfig::BaseBranch(regexes(&["^main$"]))]),
            any: Some(vec![files(&["src/**"])]),
        };
        assert!(check_match(&features(), &config, false));
    }

    #[test]
    fn every_config_in_list_must_match() {
        let configs = vec![
            MatchConfig::any(vec![files(&["src/**"])]),
            MatchConfig::all(vec![BaseMatchConfig::HeadBranch(regexes(&["^feature/"]))]),
        ];
        assert!(check_match_configs(&features(), &configs, false));

        let configs = vec![
            MatchConfig::any(vec![files(&["src/**"])]),
            MatchConfig::default(),
        ];
        assert!(!check_match_configs(&features(), &configs, false));
    }

    #[test]
    fn all_changed_files_fails_without_files() {
        let features = PrFeatures::new(Vec::new(), "main", "dev", None);
        let config = MatchConfig::all(vec![files(&["**"])]);
        assert!(!check_match(&features, &config, false));
    }

    #[test]
    fn any_block_with_only_empty_subrules_never_matches() {
        let config = MatchConfig::any(vec![
            BaseMatchConfig::ChangedFiles(Vec::new()),
            BaseMatchConfig::HeadBranch(Vec::new()),
        ]);
        assert!(!check_match(&features(), &config, false));
        let config = MatchConfig::all(vec![BaseMatchConfig::PrTitle(Vec::new())]);
        assert!(!check_match(&features(), &config, false));
    }

    #[test]
    fn evaluation_order_does_not_change_outcome() {
        let forward = MatchConfig::any(vec![
            files(&["nothing/**"]),
            BaseMatchConfig::PrTitle(regexes(&["search"])),
        ]);
        let reverse = MatchConfig::any(vec![
            BaseMatchConfig::PrTitle(regexes(&["search"])),
            files(&["nothing/**"]),
        ]);
        assert_eq!(
            check_match(&features(), &forward, false),
            check_match(&features(), &reverse, false)
        );
    }
}
