//! Collaborator traits for reading pull requests and writing labels.
//!
//! The engine never talks to a forge directly. A provider hands it a
//! [`PrSnapshot`]; a mutator persists the final label list. Errors from
//! either side are passed back to the caller untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::PrFeatures;

/// What the caller lacked permission to do when a label write was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionScope {
    /// The label does not exist yet and the token may not create labels.
    CreateLabel,
    /// The token may not modify the pull request at all.
    ModifyPullRequest,
}

impl std::fmt::Display for PermissionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionScope::CreateLabel => write!(f, "create labels"),
            PermissionScope::ModifyPullRequest => write!(f, "modify the pull request"),
        }
    }
}

/// Errors raised by providers and mutators.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("pull request #{0} not found")]
    NotFound(u64),

    #[error("insufficient permission to {scope}: {message}")]
    PermissionDenied {
        scope: PermissionScope,
        message: String,
    },

    #[error("remote command failed: {0}")]
    Command(String),

    #[error("failed to parse remote response: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AdapterError>;

/// Everything the engine needs to know about one pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrSnapshot {
    pub number: u64,
    pub features: PrFeatures,
    /// Label names on the pull request when the snapshot was taken.
    pub labels: Vec<String>,
}

/// Read-only source of pull request data.
///
/// Implementations flatten any pagination and hand back a deduplicated
/// changed-file list.
pub trait PrSnapshotProvider: Send + Sync {
    fn snapshot(&self, pr: u64) -> Result<PrSnapshot>;

    /// Re-read just the labels, immediately before a write.
    fn current_labels(&self, pr: u64) -> Result<Vec<String>>;
}

/// Persists a pull request's label list, replacing what was there.
pub trait LabelMutator: Send + Sync {
    fn set_labels(&self, pr: u64, labels: &[String]) -> Result<()>;
}
