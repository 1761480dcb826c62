// pattern.rs — Compiled glob and regex patterns.
//
// Changed-file rules use gitignore-style globs; branch and title rules use
// regular expressions. Both are compiled once when the configuration is
// loaded, so a malformed pattern is reported up front instead of quietly
// never matching.
//
// Glob semantics:
//   "*"       → any run of characters within one path segment
//   "**"      → any number of segments (including zero); when it is not a
//               whole segment ("**.md", "a**/b") it behaves like "*"
//   "?"       → a single non-separator character
//   "[a-z]"   → character class ("[!x]" and "[^x]" negate)
//   "{a,b}"   → alternation, expanded into separate patterns (nesting allowed)
//
// When `dot` is false, a segment starting with "." is only matched by a
// literal "." in the pattern.

use glob::{MatchOptions, Pattern};
use regex::Regex;

use crate::error::RuleError;

/// Upper bound on the number of alternatives a single brace pattern may
/// expand to. Keeps "{a,b}{c,d}{e,f}..." chains from exploding.
const MAX_BRACE_EXPANSION: usize = 1024;

/// A compiled changed-files glob.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    alternatives: Vec<Pattern>,
}

impl GlobPattern {
    /// Compile a glob, expanding brace alternation first.
    pub fn compile(source: &str) -> Result<Self, RuleError> {
        let alternatives = expand_braces(source)?
            .iter()
            .map(|alt| {
                let normalized = collapse_partial_double_star(&alt.replace("[^", "[!"));
                Pattern::new(&normalized).map_err(|e| RuleError::InvalidGlob {
                    pattern: source.to_string(),
                    reason: e.msg.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    /// Test a changed file path against this pattern.
    pub fn matches(&self, path: &str, dot: bool) -> bool {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: !dot,
        };
        self.alternatives
            .iter()
            .any(|p| p.matches_with(path, options))
    }

    /// The pattern as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Empty or whitespace-only patterns carry no rule.
    pub fn is_blank(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// A compiled branch or title regular expression.
///
/// Matching is an unanchored search; a pattern that wants to pin the start
/// or end of the string says so with `^` / `$`.
#[derive(Debug, Clone)]
pub struct RegexPattern {
    regex: Regex,
}

impl RegexPattern {
    pub fn compile(source: &str) -> Result<Self, RuleError> {
        Regex::new(source)
            .map(|regex| Self { regex })
            .map_err(|e| RuleError::InvalidRegex {
                pattern: source.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_blank(&self) -> bool {
        self.regex.as_str().trim().is_empty()
    }
}

/// Compile `pattern` and test it against `path` in one step.
pub fn match_glob(pattern: &str, path: &str, dot: bool) -> Result<bool, RuleError> {
    Ok(GlobPattern::compile(pattern)?.matches(path, dot))
}

/// Compile `pattern` and test it against `text` in one step.
pub fn match_regex(pattern: &str, text: &str) -> Result<bool, RuleError> {
    Ok(RegexPattern::compile(pattern)?.matches(text))
}

/// Rewrite every run of stars into `**` when it fills a whole path segment
/// and into `*` otherwise. `glob` only accepts `**` as a full segment.
fn collapse_partial_double_star(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '*' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i] == '*' {
            i += 1;
        }
        let run = i - start;
        let opens_segment = start == 0 || chars[start - 1] == '/';
        let closes_segment = i == chars.len() || chars[i] == '/';
        if run >= 2 && opens_segment && closes_segment {
            out.push_str("**");
        } else {
            out.push('*');
        }
    }
    out
}

/// Expand the first brace group that contains a top-level comma, then
/// recurse on each result until no alternation is left.
fn expand_braces(pattern: &str) -> Result<Vec<String>, RuleError> {
    let Some((open, close, commas)) = find_alternation(pattern) else {
        return Ok(vec![pattern.to_string()]);
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut expanded = Vec::new();
    let mut start = open + 1;
    for end in commas.into_iter().chain(std::iter::once(close)) {
        let alternative = format!("{}{}{}", prefix, &pattern[start..end], suffix);
        expanded.extend(expand_braces(&alternative)?);
        if expanded.len() > MAX_BRACE_EXPANSION {
            return Err(RuleError::InvalidGlob {
                pattern: pattern.to_string(),
                reason: format!("brace expansion exceeds {MAX_BRACE_EXPANSION} alternatives"),
            });
        }
        start = end + 1;
    }
    Ok(expanded)
}

/// Locate the first balanced `{...}` group with at least one comma at its
/// own nesting level. Returns (open, close, comma offsets).
fn find_alternation(pattern: &str) -> Option<(usize, usize, Vec<usize>)> {
    let bytes = pattern.as_bytes();
    for (open, &b) in bytes.iter().enumerate() {
        if b != b'{' {
            continue;
        }
        if let Some((close, commas)) = scan_group(bytes, open) {
            if !commas.is_empty() {
                return Some((open, close, commas));
            }
        }
    }
    None
}

fn scan_group(bytes: &[u8], open: usize) -> Option<(usize, Vec<usize>)> {
    let mut depth = 0usize;
    let mut commas = Vec::new();
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((i, commas));
                }
            }
            b',' if depth == 1 => commas.push(i),
            _ => {}
        }
    }
    None
}
