// config.rs — Label rule configuration: typed model and the YAML parse step.
//
// The configuration file maps label names to a list of match configs:
//
//   documentation:
//   - any:
//     - changed-files: ['docs/**', '*.md']
//   - all:
//     - base-branch: '^main$'
//
//   feature:
//   - head-branch: ['^feature/', 'feat']     # shorthand, merged into "any"
//   - pr-title: '^feat:'
//
// Raw YAML is validated and every pattern compiled here, once, so the
// evaluators downstream work on well-formed input and cannot fail.

use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::info;

use crate::error::RuleError;
use crate::features::BranchKind;
use crate::pattern::{GlobPattern, RegexPattern};
use crate::title::PrTitleMatchConfig;

/// Signal keys accepted inside an any/all entry or at the top of a rule.
const SIGNAL_KEYS: &[&str] = &["changed-files", "base-branch", "head-branch", "pr-title"];

/// A single-signal sub-rule.
#[derive(Debug, Clone)]
pub enum BaseMatchConfig {
    ChangedFiles(Vec<GlobPattern>),
    BaseBranch(Vec<RegexPattern>),
    HeadBranch(Vec<RegexPattern>),
    PrTitle(Vec<RegexPattern>),
}

impl BaseMatchConfig {
    /// The configuration key this sub-rule was written under.
    pub fn key(&self) -> &'static str {
        match self {
            BaseMatchConfig::ChangedFiles(_) => "changed-files",
            BaseMatchConfig::BaseBranch(_) => "base-branch",
            BaseMatchConfig::HeadBranch(_) => "head-branch",
            BaseMatchConfig::PrTitle(_) => "pr-title",
        }
    }

    pub fn branch(which: BranchKind, patterns: Vec<RegexPattern>) -> Self {
        match which {
            BranchKind::Base => BaseMatchConfig::BaseBranch(patterns),
            BranchKind::Head => BaseMatchConfig::HeadBranch(patterns),
        }
    }

    /// Pattern sources, for logging and `validate` output.
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            BaseMatchConfig::ChangedFiles(p) => p.iter().map(GlobPattern::as_str).collect(),
            BaseMatchConfig::BaseBranch(p)
            | BaseMatchConfig::HeadBranch(p)
            | BaseMatchConfig::PrTitle(p) => p.iter().map(RegexPattern::as_str).collect(),
        }
    }

    /// Convert one raw any/all entry into its sub-rules.
    ///
    /// An entry may name several signals at once; each becomes its own
    /// sub-rule, in the fixed order changed-files, base-branch, head-branch,
    /// pr-title. Keys outside that set are logged and skipped.
    pub fn from_entry(entry: &Value, label: &str) -> Result<Vec<Self>, RuleError> {
        let mapping = entry.as_mapping().ok_or_else(|| RuleError::InvalidConfig {
            label: label.to_string(),
            reason: format!(
                "expected a mapping of {} inside any/all",
                SIGNAL_KEYS.join(", ")
            ),
        })?;

        for key in mapping.keys() {
            let name = key_name(key, label)?;
            if !SIGNAL_KEYS.contains(&name.as_str()) {
                info!("An unknown config option was under {label}: {name}");
            }
        }

        let mut configs = Vec::new();
        if let Some(raw) = present(entry, "changed-files") {
            let patterns = string_list(raw, label, "changed-files")?
                .iter()
                .map(|p| GlobPattern::compile(p))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| e.for_label(label))?;
            configs.push(BaseMatchConfig::ChangedFiles(patterns));
        }
        for (key, which) in [
            ("base-branch", BranchKind::Base),
            ("head-branch", BranchKind::Head),
        ] {
            if let Some(raw) = present(entry, key) {
                configs.push(BaseMatchConfig::branch(which, compile_regexes(raw, label, key)?));
            }
        }
        if let Some(patterns) = PrTitleMatchConfig::from_value(entry, label)?.pr_title {
            configs.push(BaseMatchConfig::PrTitle(patterns));
        }
        Ok(configs)
    }
}

/// One rule for a label: optional "any" and "all" blocks.
#[derive(Debug, Clone, Default)]
pub struct MatchConfig {
    pub any: Option<Vec<BaseMatchConfig>>,
    pub all: Option<Vec<BaseMatchConfig>>,
}

impl MatchConfig {
    pub fn any(configs: Vec<BaseMatchConfig>) -> Self {
        Self {
            any: Some(configs),
            all: None,
        }
    }

    pub fn all(configs: Vec<BaseMatchConfig>) -> Self {
        Self {
            any: None,
            all: Some(configs),
        }
    }

    /// A config with neither block never matches.
    pub fn is_empty(&self) -> bool {
        self.any.is_none() && self.all.is_none()
    }
}

/// All match configs attached to one label.
#[derive(Debug, Clone)]
pub struct LabelRule {
    pub name: String,
    pub configs: Vec<MatchConfig>,
}

/// Label name → rules, in configuration-file order. Names are unique.
#[derive(Debug, Clone, Default)]
pub struct LabelConfigs {
    rules: Vec<LabelRule>,
}

impl LabelConfigs {
    /// Build from already-typed rules. Later duplicates of a name are
    /// rejected.
    pub fn new(rules: Vec<LabelRule>) -> Result<Self, RuleError> {
        let mut configs = Self::default();
        for rule in rules {
            configs.push(rule)?;
        }
        Ok(configs)
    }

    /// Parse a YAML document. An empty document yields no rules.
    pub fn from_yaml(yaml: &str) -> Result<Self, RuleError> {
        let doc: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(&doc)
    }

    /// Validate a parsed YAML document into typed, compiled rules.
    pub fn from_value(doc: &Value) -> Result<Self, RuleError> {
        let mapping = match doc {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(m) => m,
            _ => {
                return Err(RuleError::InvalidConfig {
                    label: String::new(),
                    reason: "configuration must be a mapping of label names to rules".to_string(),
                })
            }
        };

        let mut configs = Self::default();
        for (key, value) in mapping {
            let label = key_name(key, "")?;
            let rules = parse_label(&label, value)?;
            if rules.is_empty() {
                info!("label '{label}' has no match configs and will be skipped");
                continue;
            }
            configs.push(LabelRule {
                name: label,
                configs: rules,
            })?;
        }
        Ok(configs)
    }

    fn push(&mut self, rule: LabelRule) -> Result<(), RuleError> {
        if self.get(&rule.name).is_some() {
            return Err(RuleError::InvalidConfig {
                label: rule.name,
                reason: "label is defined more than once".to_string(),
            });
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&LabelRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Read and parse a configuration file from disk.
pub fn load_label_configs(path: &Path) -> Result<LabelConfigs, RuleError> {
    let content = std::fs::read_to_string(path)?;
    LabelConfigs::from_yaml(&content)
}

/// Parse the list of match configs for one label.
fn parse_label(label: &str, value: &Value) -> Result<Vec<MatchConfig>, RuleError> {
    let entries = value.as_sequence().ok_or_else(|| RuleError::InvalidConfig {
        label: label.to_string(),
        reason: "found unexpected type (should be array of config options)".to_string(),
    })?;

    let mut configs: Vec<MatchConfig> = Vec::new();
    for entry in entries {
        let mapping = match entry {
            Value::Null => continue,
            Value::Mapping(m) => m,
            _ => {
                return Err(RuleError::InvalidConfig {
                    label: label.to_string(),
                    reason: "found unexpected type (should be array of config options)"
                        .to_string(),
                })
            }
        };
        parse_entry(label, mapping, &mut configs)?;
    }
    Ok(configs)
}

/// Fold one top-level entry into the label's configs. `any`/`all` become
/// their own config; bare signal keys join the first `any` block.
fn parse_entry(
    label: &str,
    mapping: &Mapping,
    configs: &mut Vec<MatchConfig>,
) -> Result<(), RuleError> {
    for (key, value) in mapping {
        let name = key_name(key, label)?;
        match name.as_str() {
            "any" | "all" => {
                let entries = value.as_sequence().ok_or_else(|| RuleError::InvalidConfig {
                    label: label.to_string(),
                    reason: format!("'{name}' must be a list of match options"),
                })?;
                let mut block = Vec::new();
                for entry in entries {
                    block.extend(BaseMatchConfig::from_entry(entry, label)?);
                }
                configs.push(if name == "any" {
                    MatchConfig::any(block)
                } else {
                    MatchConfig::all(block)
                });
            }
            signal if SIGNAL_KEYS.contains(&signal) => {
                let mut single = Mapping::new();
                single.insert(key.clone(), value.clone());
                let parsed = BaseMatchConfig::from_entry(&Value::Mapping(single), label)?;
                match configs.iter_mut().find_map(|c| c.any.as_mut()) {
                    Some(any) => any.extend(parsed),
                    None => configs.push(MatchConfig::any(parsed)),
                }
            }
            other => info!("An unknown config option was under {label}: {other}"),
        }
    }
    Ok(())
}

fn compile_regexes(raw: &Value, label: &str, key: &str) -> Result<Vec<RegexPattern>, RuleError> {
    string_list(raw, label, key)?
        .iter()
        .map(|p| RegexPattern::compile(p))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.for_label(label))
}

/// A key's value, treating an explicit `null` as absent.
fn present<'a>(mapping: &'a Value, key: &str) -> Option<&'a Value> {
    mapping.get(key).filter(|v| !v.is_null())
}

/// Normalise a string or list of strings into a list.
pub(crate) fn string_list(value: &Value, label: &str, key: &str) -> Result<Vec<String>, RuleError> {
    let invalid = || RuleError::InvalidConfig {
        label: label.to_string(),
        reason: format!("'{key}' must be a string or a list of strings"),
    };
    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Sequence(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
            .collect(),
        _ => Err(invalid()),
    }
}

/// Label names and option keys may be written as any YAML scalar.
fn key_name(key: &Value, label: &str) -> Result<String, RuleError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(RuleError::InvalidConfig {
            label: label.to_string(),
            reason: "keys must be strings".to_string(),
        }),
    }
}
