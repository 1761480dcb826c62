//! # prlabel-rules
//!
//! Rule engine that decides which labels a pull request should carry.
//!
//! Label rules are loaded once into [`LabelConfigs`], with every glob and
//! regular expression compiled up front. A [`PrFeatures`] snapshot (changed
//! files, base/head branch, title) is then evaluated against each label's
//! rules, and the [`LabelDriver`] turns the results into the label set that
//! gets written back.
//!
//! ## Key invariants
//!
//! - **Compile, then evaluate**: malformed patterns fail at load time. All
//!   evaluation functions return plain `bool` and cannot fail.
//! - **Empty never matches**: an empty rule, an empty any/all block, or an
//!   empty pattern list is `false`, never vacuously `true`.
//! - **Manual labels win**: labels a human adds while a run is in flight are
//!   kept ahead of computed labels when the final set is written.

pub mod adapter;
pub mod branch;
pub mod changed_files;
pub mod config;
pub mod decision;
pub mod error;
pub mod features;
pub mod matcher;
pub mod pattern;
pub mod title;

pub use adapter::{AdapterError, LabelMutator, PermissionScope, PrSnapshot, PrSnapshotProvider};
pub use branch::{check_all_branch, check_any_branch};
pub use changed_files::{check_all_changed_files, check_any_changed_files};
pub use config::{load_label_configs, BaseMatchConfig, LabelConfigs, LabelRule, MatchConfig};
pub use decision::{
    compute_labels, reconcile, LabelDriver, LabelOptions, LabelOutcome, LabelPlan, RaceDelays,
    MAX_LABELS,
};
pub use error::RuleError;
pub use features::{BranchKind, PrFeatures};
pub use matcher::{check_all, check_any, check_match, check_match_configs};
pub use pattern::{match_glob, match_regex, GlobPattern, RegexPattern};
pub use title::{check_all_pr_title, check_any_pr_title, PrTitleMatchConfig};
