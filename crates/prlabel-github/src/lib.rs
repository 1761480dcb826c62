//! GitHub collaborators for prlabel.
//!
//! [`GhClient`] reads pull request snapshots and writes labels by shelling
//! out to the `gh` CLI, and can fetch the label configuration from the
//! repository when it is not checked out locally.

pub mod client;
pub mod content;
pub mod pulls;

pub use client::{classify_failure, GhClient};
pub use content::decode_content;
