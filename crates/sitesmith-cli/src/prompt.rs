//! Interactive questionnaire.
//!
//! Walks the prompt registry in order, skipping keys that already have an
//! answer and prompts whose condition does not hold. Answers are returned
//! raw; the core resolver validates them like any other input.

use sitesmith_core::domain::{PROMPTS, PromptDef, PromptKind, RawAnswers};

use crate::error::{CliError, CliResult};

/// The prompts still to ask, given what is known.
pub fn pending<'a>(known: &'a RawAnswers) -> impl Iterator<Item = &'static PromptDef> + 'a {
    PROMPTS
        .iter()
        .filter(move |p| !known.contains(p.key) && p.condition.holds(known))
}

/// Message shown for a prompt, with its choices.
pub fn label(prompt: &PromptDef) -> String {
    match prompt.choices() {
        Some(choices) => format!("{} ({choices})", prompt.message),
        None => prompt.message.to_string(),
    }
}

#[cfg(feature = "interactive")]
pub fn ask(known: &RawAnswers) -> CliResult<RawAnswers> {
    use dialoguer::{Confirm, Input, theme::ColorfulTheme};

    let theme = ColorfulTheme::default();
    let mut answers = known.clone();
    let mut group = None;

    // `pending` is re-evaluated after every answer so conditional prompts see
    // the choices just made.
    loop {
        let Some(prompt) = pending(&answers).next() else {
            break;
        };
        if group != Some(prompt.group) {
            eprintln!("\n{}", prompt.group.heading());
            group = Some(prompt.group);
        }

        let value = match prompt.kind {
            PromptKind::YesNo { default } => {
                let yes = Confirm::with_theme(&theme)
                    .with_prompt(label(prompt))
                    .default(default)
                    .interact()
                    .map_err(prompt_failed)?;
                if yes { "yes" } else { "no" }.to_string()
            }
            PromptKind::Directory { default } | PromptKind::Choice { default } => {
                Input::<String>::with_theme(&theme)
                    .with_prompt(label(prompt))
                    .default(default.to_string())
                    .interact_text()
                    .map_err(prompt_failed)?
            }
            PromptKind::Text | PromptKind::Count => Input::<String>::with_theme(&theme)
                .with_prompt(label(prompt))
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_failed)?,
        };
        answers = answers.with(prompt.key, value);
    }

    Ok(answers)
}

#[cfg(not(feature = "interactive"))]
pub fn ask(_known: &RawAnswers) -> CliResult<RawAnswers> {
    Err(CliError::InvalidInput {
        message: "this build has no interactive prompts; pass --answers FILE or --set KEY=VALUE"
            .into(),
    })
}

/// `[Y/n]` confirmation on stdin.
#[cfg(feature = "interactive")]
pub fn confirm(question: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(true)
        .interact()
        .map_err(prompt_failed)
}

#[cfg(not(feature = "interactive"))]
pub fn confirm(question: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    use sitesmith_core::domain::registry::{YesNo, match_yes_no};

    print!("{question} [Y/n] ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(matches!(match_yes_no(&input), YesNo::Yes | YesNo::Default))
}

#[cfg(feature = "interactive")]
fn prompt_failed(err: dialoguer::Error) -> CliError {
    CliError::IoError {
        message: "failed to read answer".into(),
        source: std::io::Error::other(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitesmith_core::domain::registry::keys;

    fn pending_keys(known: &RawAnswers) -> Vec<&'static str> {
        pending(known).map(|p| p.key).collect()
    }

    #[test]
    fn defaults_skip_conditional_prompts() {
        let asked = pending_keys(&RawAnswers::new());
        assert!(asked.contains(&keys::CSS_DIR));
        assert!(!asked.contains(&keys::CSS_PREPROCESSOR_DIR));
        assert!(!asked.contains(&keys::INCLUDE_ICONS));
    }

    #[test]
    fn answered_keys_are_not_asked_again() {
        let known = RawAnswers::new().with(keys::CSS_DIR, "styles");
        assert!(!pending_keys(&known).contains(&keys::CSS_DIR));
    }

    #[test]
    fn boilerplate_unlocks_toggles() {
        let known = RawAnswers::new().with(keys::TEMPLATE_TYPE, "h5");
        let asked = pending_keys(&known);
        assert!(asked.contains(&keys::INCLUDE_CSS));
        assert!(asked.contains(&keys::INCLUDE_ANALYTICS));
    }

    #[test]
    fn labels_list_choices() {
        let prompt = PROMPTS
            .iter()
            .find(|p| p.key == keys::CSS_PREPROCESSOR)
            .unwrap();
        assert_eq!(
            label(prompt),
            "Use a css preprocessor? (s: Sass, c: Sass & Compass, n: none)"
        );
    }
}
