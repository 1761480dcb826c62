// changed_files.rs — "any"/"all" evaluation of globs against changed files.

use tracing::debug;

use crate::pattern::GlobPattern;

/// True if at least one changed file matches at least one pattern.
///
/// An empty (or blank-only) pattern list never matches.
pub fn check_any_changed_files(files: &[String], patterns: &[GlobPattern], dot: bool) -> bool {
    let patterns = effective(patterns);
    if patterns.is_empty() {
        debug!("   no \"changed-files\" patterns to check");
        return false;
    }

    let matched = files.iter().any(|file| {
        patterns.iter().any(|pattern| {
            let hit = pattern.matches(file, dot);
            if hit {
                debug!("   {} matched {}", pattern.as_str(), file);
            }
            hit
        })
    });
    if !matched {
        debug!("   no changed file matched any \"changed-files\" pattern");
    }
    matched
}

/// True if every pattern matches at least one changed file.
///
/// Requires a non-empty file set: a pull request with no changed files never
/// satisfies an "all" rule.
pub fn check_all_changed_files(files: &[String], patterns: &[GlobPattern], dot: bool) -> bool {
    if files.is_empty() {
        debug!("   no files to check \"changed-files\" patterns against");
        return false;
    }
    let patterns = effective(patterns);
    if patterns.is_empty() {
        debug!("   no \"changed-files\" patterns to check");
        return false;
    }

    patterns.iter().all(|pattern| {
        let hit = files.iter().any(|file| pattern.matches(file, dot));
        if !hit {
            debug!("   {} did not match any changed file", pattern.as_str());
        }
        hit
    })
}

fn effective(patterns: &[GlobPattern]) -> Vec<&GlobPattern> {
    patterns.iter().filter(|p| !p.is_blank()).collect()
}
