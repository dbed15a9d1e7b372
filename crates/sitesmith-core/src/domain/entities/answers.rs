//! Raw answers and the structured settings input.
//!
//! Both front ends end up here: the interactive questionnaire produces
//! [`RawAnswers`] directly, and a TOML settings file deserializes into
//! [`SiteSettings`], which lowers into the same [`RawAnswers`] so a single
//! resolver validates every input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::registry::keys;

// ── RawAnswers ────────────────────────────────────────────────────────────────

/// Prompt key -> raw answer text. Empty strings mean "accept default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAnswers(BTreeMap<String, String>);

impl RawAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Later answers for the same key win.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Layer `other` on top of `self`; keys in `other` win.
    #[must_use]
    pub fn merged_with(mut self, other: &RawAnswers) -> Self {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawAnswers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ── SiteSettings ──────────────────────────────────────────────────────────────

/// A single value or a list of values.
///
/// Lists exist so a settings file can express (and be rejected for)
/// combining two preprocessors on one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn to_answer(&self) -> String {
        match self {
            Self::One(v) => v.clone(),
            Self::Many(vs) => vs.join(","),
        }
    }
}

/// `posts_per_page` may be written as a number or as `"all"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountSetting {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectorySettings {
    pub css: Option<String>,
    pub js: Option<String>,
    pub img: Option<String>,
    pub font: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreprocessorSettings {
    pub css: Option<OneOrMany>,
    pub css_dir: Option<String>,
    pub js: Option<OneOrMany>,
    pub js_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateSettings {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub include_css: Option<bool>,
    pub include_js: Option<bool>,
    pub include_icons: Option<bool>,
    pub include_docs: Option<bool>,
    pub include_analytics: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMetadataSettings {
    pub author: Option<String>,
    pub email: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub description: Option<String>,
    pub permalink: Option<String>,
    pub markdown: Option<String>,
    pub pygments: Option<bool>,
    pub posts_per_page: Option<CountSetting>,
}

/// Structured, non-interactive site settings.
///
/// ```toml
/// [directories]
/// css = "stylesheets"
///
/// [preprocessors]
/// css = "sass"
///
/// [template]
/// type = "boilerplate"
/// include_icons = true
///
/// [site]
/// author = "Ada"
/// posts_per_page = 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    pub directories: DirectorySettings,
    pub preprocessors: PreprocessorSettings,
    pub template: TemplateSettings,
    pub site: SiteMetadataSettings,
}

impl SiteSettings {
    /// Lower into raw answers. Absent settings stay absent so defaults and
    /// the "not asked" marker apply exactly as for prompted input.
    pub fn to_answers(&self) -> RawAnswers {
        fn yes_no(v: bool) -> String {
            if v { "yes".into() } else { "no".into() }
        }

        let mut pairs: Vec<(&'static str, String)> = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key, value));
            }
        };

        let d = &self.directories;
        push(keys::CSS_DIR, d.css.clone());
        push(keys::JS_DIR, d.js.clone());
        push(keys::IMG_DIR, d.img.clone());
        push(keys::FONT_DIR, d.font.clone());

        let p = &self.preprocessors;
        push(keys::CSS_PREPROCESSOR, p.css.as_ref().map(OneOrMany::to_answer));
        push(keys::CSS_PREPROCESSOR_DIR, p.css_dir.clone());
        push(keys::JS_PREPROCESSOR, p.js.as_ref().map(OneOrMany::to_answer));
        push(keys::JS_PREPROCESSOR_DIR, p.js_dir.clone());

        let t = &self.template;
        push(keys::TEMPLATE_TYPE, t.kind.clone());
        push(keys::INCLUDE_CSS, t.include_css.map(yes_no));
        push(keys::INCLUDE_JS, t.include_js.map(yes_no));
        push(keys::INCLUDE_ICONS, t.include_icons.map(yes_no));
        push(keys::INCLUDE_DOCS, t.include_docs.map(yes_no));
        push(keys::INCLUDE_ANALYTICS, t.include_analytics.map(yes_no));

        let s = &self.site;
        push(keys::AUTHOR, s.author.clone());
        push(keys::EMAIL, s.email.clone());
        push(keys::TWITTER, s.twitter.clone());
        push(keys::GITHUB, s.github.clone());
        push(keys::DESCRIPTION, s.description.clone());
        push(keys::PERMALINK, s.permalink.clone());
        push(keys::MARKDOWN, s.markdown.clone());
        push(keys::PYGMENTS, s.pygments.map(yes_no));
        push(
            keys::POSTS_PER_PAGE,
            s.posts_per_page.as_ref().map(|c| match c {
                CountSetting::Number(n) => n.to_string(),
                CountSetting::Text(t) => t.clone(),
            }),
        );

        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_answers_win_on_merge() {
        let base = RawAnswers::new().with("css_dir", "css").with("js_dir", "js");
        let top = RawAnswers::new().with("css_dir", "styles");
        let merged = base.merged_with(&top);
        assert_eq!(merged.get("css_dir"), Some("styles"));
        assert_eq!(merged.get("js_dir"), Some("js"));
    }

    #[test]
    fn settings_lower_to_prompt_keys() {
        let settings: SiteSettings = toml::from_str(
            r#"
            [directories]
            css = "stylesheets"

            [preprocessors]
            css = ["sass", "compass"]

            [template]
            type = "h5"
            include_icons = true

            [site]
            author = ""
            posts_per_page = 3
            "#,
        )
        .unwrap();

        let answers = settings.to_answers();
        assert_eq!(answers.get("css_dir"), Some("stylesheets"));
        assert_eq!(answers.get("css_preprocessor"), Some("sass,compass"));
        assert_eq!(answers.get("template_type"), Some("h5"));
        assert_eq!(answers.get("include_icons"), Some("yes"));
        assert_eq!(answers.get("author"), Some(""));
        assert_eq!(answers.get("posts_per_page"), Some("3"));
        assert!(!answers.contains("email"));
    }

    #[test]
    fn unknown_settings_are_rejected() {
        let parsed: Result<SiteSettings, _> = toml::from_str("[template]\ncolour = 'red'\n");
        assert!(parsed.is_err());
    }
}
