// pulls.rs — GitHub REST response shapes and request bodies.

use prlabel_rules::adapter::{AdapterError, Result};
use serde::{Deserialize, Serialize};

/// The subset of `GET /repos/{repo}/pulls/{n}` the labeler reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PullResponse {
    #[serde(default)]
    pub title: Option<String>,
    pub base: BranchRef,
    pub head: BranchRef,
    #[serde(default)]
    pub labels: Vec<LabelRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub branch: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelRef {
    pub name: String,
}

#[derive(Serialize)]
struct SetLabels<'a> {
    labels: &'a [String],
}

pub fn parse_pull(body: &str) -> Result<PullResponse> {
    serde_json::from_str(body).map_err(|e| AdapterError::Parse(e.to_string()))
}

/// Body for `PUT /repos/{repo}/issues/{n}/labels`.
pub fn set_labels_body(labels: &[String]) -> Result<String> {
    serde_json::to_string(&SetLabels { labels }).map_err(|e| AdapterError::Parse(e.to_string()))
}

/// Split `--jq` output into non-empty, deduplicated lines. Paginated
/// responses are already flattened by `gh --paginate`.
pub fn parse_lines(out: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in out.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !lines.iter().any(|l| l == line) {
            lines.push(line.to_string());
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pull_response() {
        let body = r#"{
            "number": 42,
            "title": "feat: search",
            "base": {"ref": "main", "sha": "abc"},
            "head": {"ref": "feature/search", "sha": "def"},
            "labels": [{"id": 1, "name": "triage"}, {"id": 2, "name": "ui"}]
        }"#;
        let pull = parse_pull(body).unwrap();
        assert_eq!(pull.title.as_deref(), Some("feat: search"));
        assert_eq!(pull.base.branch, "main");
        assert_eq!(pull.head.branch, "feature/search");
        let names: Vec<&str> = pull.labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["triage", "ui"]);
    }

    #[test]
    fn null_title_and_missing_labels_are_tolerated() {
        let body = r#"{"title": null, "base": {"ref": "main"}, "head": {"ref": "x"}}"#;
        let pull = parse_pull(body).unwrap();
        assert!(pull.title.is_none());
        assert!(pull.labels.is_empty());
    }

    #[test]
    fn malformed_body_is_parse_error() {
        assert!(matches!(parse_pull("not json"), Err(AdapterError::Parse(_))));
    }

    #[test]
    fn set_labels_body_shape() {
        let body = set_labels_body(&["a".to_string(), "b c".to_string()]).unwrap();
        assert_eq!(body, r#"{"labels":["a","b c"]}"#);
    }

    #[test]
    fn lines_are_flattened_and_deduplicated() {
        let out = "src/a.rs\nsrc/b.rs\n\nsrc/a.rs\n";
        assert_eq!(parse_lines(out), ["src/a.rs", "src/b.rs"]);
    }
}
