// content.rs — Fetch the label configuration from the repository.
//
// Used when the configuration file is not present in the local checkout.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use prlabel_rules::adapter::{AdapterError, Result};
use serde::Deserialize;

use crate::client::GhClient;

#[derive(Debug, Deserialize)]
struct ContentResponse {
    content: String,
    encoding: String,
}

impl GhClient {
    /// Read a file from the repository at `git_ref` (branch, tag, or SHA).
    pub fn fetch_content(&self, path: &str, git_ref: Option<&str>) -> Result<String> {
        let endpoint = contents_endpoint(self.repo(), path, git_ref)?;
        let body = self.api(&[&endpoint], None)?;
        decode_content(&body)
    }
}

/// Build the contents API endpoint for a repository-relative path.
///
/// Leading `./` components are dropped; absolute paths have no meaning in
/// the repository and are rejected.
pub fn contents_endpoint(repo: &str, path: &str, git_ref: Option<&str>) -> Result<String> {
    if path.starts_with('/') || path.starts_with('\\') {
        return Err(AdapterError::Command(format!(
            "configuration path '{path}' must be relative to the repository root"
        )));
    }
    let mut relative = path;
    while let Some(rest) = relative.strip_prefix("./") {
        relative = rest;
    }
    let encoded: Vec<String> = relative
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    if encoded.is_empty() {
        return Err(AdapterError::Command(format!(
            "configuration path '{path}' names no file"
        )));
    }

    let mut endpoint = format!("repos/{}/contents/{}", repo, encoded.join("/"));
    if let Some(r) = git_ref {
        endpoint.push_str("?ref=");
        endpoint.push_str(&urlencoding::encode(r));
    }
    Ok(endpoint)
}

/// Decode a contents API response into the file's text.
pub fn decode_content(body: &str) -> Result<String> {
    let response: ContentResponse =
        serde_json::from_str(body).map_err(|e| AdapterError::Parse(e.to_string()))?;
    if response.encoding != "base64" {
        return Err(AdapterError::Parse(format!(
            "unsupported content encoding '{}'",
            response.encoding
        )));
    }
    // GitHub wraps base64 content at 60 columns.
    let compact: String = response
        .content
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| AdapterError::Parse(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AdapterError::Parse(e.to_string()))
}
