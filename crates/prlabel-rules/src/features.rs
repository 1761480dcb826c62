// features.rs — The observable facts about one pull request.
//
// A PrFeatures value is built once per decision pass and only read after
// that. Every evaluator takes it explicitly; nothing reads ambient state.

use serde::{Deserialize, Serialize};

/// Which branch name a branch rule is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchKind {
    /// The branch the pull request merges into.
    Base,
    /// The branch the pull request comes from.
    Head,
}

impl std::fmt::Display for BranchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchKind::Base => write!(f, "base"),
            BranchKind::Head => write!(f, "head"),
        }
    }
}

/// Read-only snapshot of a pull request's matchable features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrFeatures {
    changed_files: Vec<String>,
    pub base_branch: String,
    pub head_branch: String,
    /// `None` when the event carries no pull request title.
    pub title: Option<String>,
}

impl PrFeatures {
    /// Build a snapshot. Changed files are deduplicated, keeping the order
    /// in which they were first seen.
    pub fn new(
        changed_files: impl IntoIterator<Item = String>,
        base_branch: impl Into<String>,
        head_branch: impl Into<String>,
        title: Option<String>,
    ) -> Self {
        let mut files: Vec<String> = Vec::new();
        for file in changed_files {
            if !files.contains(&file) {
                files.push(file);
            }
        }
        Self {
            changed_files: files,
            base_branch: base_branch.into(),
            head_branch: head_branch.into(),
            title,
        }
    }

    pub fn changed_files(&self) -> &[String] {
        &self.changed_files
    }

    pub fn branch(&self, which: BranchKind) -> &str {
        match which {
            BranchKind::Base => &self.base_branch,
            BranchKind::Head => &self.head_branch,
        }
    }

    /// The title, treating an empty string the same as a missing one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}
