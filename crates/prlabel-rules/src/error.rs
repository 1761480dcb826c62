// error.rs — Error types for rule compilation and configuration loading.
//
// Evaluation never fails: every variant here is raised while turning raw
// configuration into compiled rules, before any pull request is inspected.

use thiserror::Error;

/// Errors that can occur while loading or compiling label rules.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A changed-files pattern could not be compiled as a glob.
    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    /// A branch or title pattern could not be compiled as a regular expression.
    #[error("invalid regular expression '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },

    /// The rule set for a label has an unexpected shape.
    #[error("invalid configuration for label '{label}': {reason}")]
    InvalidConfig { label: String, reason: String },

    /// The configuration document is not valid YAML.
    #[error("failed to parse label configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read label configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl RuleError {
    /// Attach a label name to a pattern error so the message points at the
    /// offending rule.
    pub(crate) fn for_label(self, label: &str) -> Self {
        match self {
            RuleError::InvalidGlob { .. } | RuleError::InvalidRegex { .. } => {
                RuleError::InvalidConfig {
                    label: label.to_string(),
                    reason: self.to_string(),
                }
            }
            other => other,
        }
    }
}
