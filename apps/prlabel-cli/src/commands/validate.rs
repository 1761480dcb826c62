// validate.rs — Parse and compile a label configuration, then summarise it.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use prlabel_rules::{load_label_configs, BaseMatchConfig, LabelConfigs};

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the label configuration file.
    #[arg(long, default_value = ".github/labeler.yml")]
    pub config: PathBuf,
}

pub fn execute(args: &ValidateArgs) -> anyhow::Result<()> {
    let configs = load_label_configs(&args.config)
        .with_context(|| format!("invalid label configuration {}", args.config.display()))?;
    print!("{}", summarise(&configs));
    Ok(())
}

fn summarise(configs: &LabelConfigs) -> String {
    let mut out = format!("{} labels\n", configs.len());
    for rule in configs.iter() {
        out.push_str(&format!("  {}\n", rule.name));
        for config in &rule.configs {
            for (block, entries) in [("all", &config.all), ("any", &config.any)] {
                let Some(entries) = entries else { continue };
                out.push_str(&format!("    {block}:\n"));
                for entry in entries {
                    out.push_str(&format!("      {}: {}\n", entry.key(), describe(entry)));
                }
            }
        }
    }
    out
}

fn describe(entry: &BaseMatchConfig) -> String {
    let patterns = entry.patterns();
    if patterns.is_empty() {
        "(no patterns)".to_string()
    } else {
        patterns.join(", ")
    }
}
