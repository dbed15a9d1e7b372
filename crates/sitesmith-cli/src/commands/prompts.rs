//! `sitesmith prompts`: list every question the questionnaire can ask.

use serde::Serialize;

use sitesmith_core::domain::{PROMPTS, PromptCondition, PromptDef};

use crate::{
    cli::{PromptsArgs, PromptsFormat},
    error::CliResult,
    output::OutputManager,
};

/// One prompt as shown to users and scripts.
#[derive(Debug, Serialize)]
struct PromptRow {
    key: &'static str,
    message: &'static str,
    default: Option<&'static str>,
    choices: Option<String>,
    group: &'static str,
    asked_when: &'static str,
}

impl From<&PromptDef> for PromptRow {
    fn from(p: &PromptDef) -> Self {
        Self {
            key: p.key,
            message: p.message,
            default: p.default_answer(),
            choices: p.choices(),
            group: p.group.heading(),
            asked_when: condition_label(p.condition),
        }
    }
}

fn condition_label(condition: PromptCondition) -> &'static str {
    match condition {
        PromptCondition::Always => "always",
        PromptCondition::CssPreprocessorEnabled => "css preprocessor enabled",
        PromptCondition::JsPreprocessorEnabled => "js preprocessor enabled",
        PromptCondition::BoilerplateTemplate => "boilerplate template",
    }
}

pub fn execute(args: PromptsArgs, output: OutputManager) -> CliResult<()> {
    let rows: Vec<PromptRow> = PROMPTS.iter().map(PromptRow::from).collect();

    if args.format == PromptsFormat::Json || output.is_json() {
        output.json(&rows)?;
        return Ok(());
    }

    let width = rows.iter().map(|r| r.key.len()).max().unwrap_or(0);
    let mut group = "";
    for row in &rows {
        if row.group != group {
            output.print("")?;
            output.header(row.group)?;
            group = row.group;
        }
        let mut line = format!("  {:width$}  {}", row.key, row.message);
        if let Some(choices) = &row.choices {
            line.push_str(&format!(" ({choices})"));
        }
        if let Some(default) = row.default {
            line.push_str(&format!(" [{default}]"));
        }
        if row.asked_when != "always" {
            line.push_str(&format!(" - only if {}", row.asked_when));
        }
        output.print(&line)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitesmith_core::domain::registry::keys;

    fn row(key: &str) -> PromptRow {
        PROMPTS
            .iter()
            .find(|p| p.key == key)
            .map(PromptRow::from)
            .unwrap()
    }

    #[test]
    fn rows_carry_defaults_and_conditions() {
        let css = row(keys::CSS_DIR);
        assert_eq!(css.default, Some("css"));
        assert_eq!(css.asked_when, "always");

        let icons = row(keys::INCLUDE_ICONS);
        assert_eq!(icons.asked_when, "boilerplate template");
    }

    #[test]
    fn json_rows_name_every_field() {
        let value = serde_json::to_value(row(keys::TEMPLATE_TYPE)).unwrap();
        assert_eq!(value["key"], "template_type");
        assert!(value["choices"].as_str().unwrap().contains("h5"));
        assert!(value.get("asked_when").is_some());
    }
}
