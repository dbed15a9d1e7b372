//! Raw answers -> [`ResolvedConfig`].
//!
//! Pure: no I/O, no logging. Every raw value is normalized through the
//! registry tables, so the result never carries a letter code or an
//! unresolved yes/no string.

use std::str::FromStr;

use crate::domain::{
    entities::{
        answers::RawAnswers,
        common::AssetDir,
        config::{AssetDirectories, BoilerplateToggles, JekyllOptions, ResolvedConfig, SiteMetadata},
    },
    error::DomainError,
    registry::{self, YesNo, keys},
    value_objects::{
        CssPreprocessor, JsPreprocessor, MarkdownEngine, PermalinkStyle, PostsPerPage, SiteField,
        TemplateType,
    },
};

/// Stateless resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigResolver;

impl ConfigResolver {
    pub fn resolve(answers: &RawAnswers) -> Result<ResolvedConfig, DomainError> {
        if let Some(key) = answers.keys().find(|k| registry::find_prompt(k).is_none()) {
            return Err(DomainError::UnknownPrompt {
                key: key.to_string(),
            });
        }

        let directories = AssetDirectories {
            css: directory(answers, keys::CSS_DIR)?,
            js: directory(answers, keys::JS_DIR)?,
            img: directory(answers, keys::IMG_DIR)?,
            font: directory(answers, keys::FONT_DIR)?,
        };

        let css_preprocessor: CssPreprocessor = single_choice(answers, keys::CSS_PREPROCESSOR)?;
        let js_preprocessor: JsPreprocessor = single_choice(answers, keys::JS_PREPROCESSOR)?;
        let template_type: TemplateType = single_choice(answers, keys::TEMPLATE_TYPE)?;

        let mut builder = ResolvedConfig::builder()
            .directories(directories)
            .css_preprocessor(css_preprocessor)
            .js_preprocessor(js_preprocessor)
            .template_type(template_type);

        if css_preprocessor.is_enabled() {
            builder = builder.css_preprocessor_dir(directory(answers, keys::CSS_PREPROCESSOR_DIR)?);
        }
        if js_preprocessor.is_enabled() {
            builder = builder.js_preprocessor_dir(directory(answers, keys::JS_PREPROCESSOR_DIR)?);
        }

        if template_type == TemplateType::Boilerplate {
            builder = builder.boilerplate(BoilerplateToggles {
                include_css: yes_no(answers, keys::INCLUDE_CSS)?,
                include_js: yes_no(answers, keys::INCLUDE_JS)?,
                include_icons: yes_no(answers, keys::INCLUDE_ICONS)?,
                include_docs: yes_no(answers, keys::INCLUDE_DOCS)?,
                include_analytics: yes_no(answers, keys::INCLUDE_ANALYTICS)?,
            });
        }

        let metadata = SiteMetadata {
            author: SiteField::from_answer(answers.get(keys::AUTHOR)),
            email: SiteField::from_answer(answers.get(keys::EMAIL)),
            twitter: SiteField::from_answer(answers.get(keys::TWITTER)),
            github: SiteField::from_answer(answers.get(keys::GITHUB)),
            description: SiteField::from_answer(answers.get(keys::DESCRIPTION)),
        };

        let jekyll = JekyllOptions {
            permalink: single_choice::<PermalinkStyle>(answers, keys::PERMALINK)?,
            markdown: single_choice::<MarkdownEngine>(answers, keys::MARKDOWN)?,
            pygments: yes_no(answers, keys::PYGMENTS)?,
            posts_per_page: answers
                .get(keys::POSTS_PER_PAGE)
                .unwrap_or("")
                .parse::<PostsPerPage>()?,
        };

        builder.metadata(metadata).jekyll(jekyll).build()
    }
}

/// The trimmed answer, or `None` when blank or absent.
fn answered<'a>(answers: &'a RawAnswers, key: &str) -> Option<&'a str> {
    answers.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn directory(answers: &RawAnswers, key: &'static str) -> Result<AssetDir, DomainError> {
    let raw = answered(answers, key).unwrap_or_else(|| registry::directory_default(key));
    AssetDir::parse(key, raw)
}

/// Resolve a coded multiple-choice answer, rejecting more than one distinct
/// value (`"s,c"`, `"sass compass"`).
fn single_choice<T>(answers: &RawAnswers, key: &'static str) -> Result<T, DomainError>
where
    T: FromStr<Err = DomainError> + PartialEq + Copy,
{
    let raw = answered(answers, key).unwrap_or_else(|| registry::choice_default(key));
    let parts: Vec<&str> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let mut distinct: Vec<T> = Vec::with_capacity(parts.len());
    for part in &parts {
        let value = part.parse::<T>()?;
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }

    match distinct.as_slice() {
        [single] => Ok(*single),
        [] => registry::choice_default(key).parse(),
        _ => Err(DomainError::MutuallyExclusive {
            field: key,
            values: parts.iter().map(|p| (*p).to_string()).collect(),
        }),
    }
}

fn yes_no(answers: &RawAnswers, key: &'static str) -> Result<bool, DomainError> {
    let raw = answers.get(key).unwrap_or("");
    match registry::match_yes_no(raw) {
        YesNo::Yes => Ok(true),
        YesNo::No => Ok(false),
        YesNo::Default => Ok(registry::yes_no_default(key)),
        YesNo::Unrecognized => Err(DomainError::InvalidYesNo {
            field: key,
            value: raw.trim().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::config::DirKey;

    fn resolve(pairs: &[(&str, &str)]) -> Result<ResolvedConfig, DomainError> {
        ConfigResolver::resolve(&pairs.iter().copied().collect())
    }

    #[test]
    fn empty_answers_resolve_to_defaults() {
        let config = resolve(&[]).unwrap();
        assert_eq!(config.css_dir().as_str(), "css");
        assert_eq!(config.js_dir().as_str(), "js");
        assert_eq!(config.css_preprocessor(), CssPreprocessor::None);
        assert_eq!(config.js_preprocessor(), JsPreprocessor::None);
        assert_eq!(config.template_type(), TemplateType::Default);
        assert_eq!(config.jekyll().markdown, MarkdownEngine::Maruku);
        assert_eq!(config.jekyll().posts_per_page, PostsPerPage::All);
        assert!(!config.jekyll().pygments);
        assert_eq!(config.metadata().author, SiteField::NotAsked);
    }

    #[test]
    fn letter_codes_become_canonical_values() {
        let config = resolve(&[
            ("css_preprocessor", "S"),
            ("js_preprocessor", "c"),
            ("template_type", "h5"),
            ("permalink", "p"),
            ("markdown", "rc"),
        ])
        .unwrap();
        assert_eq!(config.css_preprocessor(), CssPreprocessor::Sass);
        assert_eq!(config.js_preprocessor(), JsPreprocessor::CoffeeScript);
        assert_eq!(config.template_type(), TemplateType::Boilerplate);
        assert_eq!(config.jekyll().permalink, PermalinkStyle::Pretty);
        assert_eq!(config.jekyll().markdown, MarkdownEngine::Redcarpet);
        assert_eq!(config.dir(DirKey::CssPre).unwrap().as_str(), "_scss");
        assert_eq!(config.dir(DirKey::JsPre).unwrap().as_str(), "_coffee");
    }

    #[test]
    fn combined_preprocessors_are_rejected() {
        let err = resolve(&[("css_preprocessor", "s,c")]).unwrap_err();
        assert!(matches!(
            err,
            DomainError::MutuallyExclusive {
                field: "css_preprocessor",
                ..
            }
        ));
        assert!(resolve(&[("css_preprocessor", "sass compass")]).is_err());
    }

    #[test]
    fn repeated_identical_values_are_one_value() {
        let config = resolve(&[("css_preprocessor", "s, sass")]).unwrap();
        assert_eq!(config.css_preprocessor(), CssPreprocessor::Sass);
    }

    #[test]
    fn directories_are_normalized() {
        let config = resolve(&[("css_dir", " /assets\\css/ "), ("img_dir", "")]).unwrap();
        assert_eq!(config.css_dir().as_str(), "assets/css");
        assert_eq!(config.img_dir().as_str(), "image");
    }

    #[test]
    fn separator_only_directory_is_empty() {
        assert_eq!(
            resolve(&[("js_dir", "//")]).unwrap_err(),
            DomainError::EmptyDirectory { field: "js_dir" }
        );
    }

    #[test]
    fn yes_no_defaults_apply_per_field() {
        let config = resolve(&[
            ("template_type", "h5"),
            ("include_css", "Y/n"),
            ("include_js", ""),
            ("include_icons", "y/N"),
        ])
        .unwrap();
        let toggles = config.boilerplate().unwrap();
        assert!(toggles.include_css);
        assert!(toggles.include_js);
        assert!(!toggles.include_icons);
        assert!(!toggles.include_docs);
        assert!(!toggles.include_analytics);
    }

    #[test]
    fn unrecognized_yes_no_is_rejected() {
        let err = resolve(&[("pygments", "sometimes")]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidYesNo { field: "pygments", .. }));
    }

    #[test]
    fn toggles_ignored_for_default_template() {
        let config = resolve(&[("include_icons", "yes")]).unwrap();
        assert!(config.boilerplate().is_none());
    }

    #[test]
    fn blank_metadata_is_unset_not_empty() {
        let config = resolve(&[("author", "  "), ("email", "ada@example.com")]).unwrap();
        assert_eq!(config.metadata().author, SiteField::Unset);
        assert_eq!(
            config.metadata().email,
            SiteField::Set("ada@example.com".into())
        );
        assert_eq!(config.metadata().github, SiteField::NotAsked);
    }

    #[test]
    fn unknown_keys_and_codes_are_rejected() {
        assert!(matches!(
            resolve(&[("colour", "red")]).unwrap_err(),
            DomainError::UnknownPrompt { .. }
        ));
        assert!(matches!(
            resolve(&[("markdown", "x")]).unwrap_err(),
            DomainError::UnknownCode { field: "markdown", .. }
        ));
        assert!(matches!(
            resolve(&[("posts_per_page", "-1")]).unwrap_err(),
            DomainError::InvalidPostsPerPage { .. }
        ));
    }

    #[test]
    fn posts_per_page_count() {
        let config = resolve(&[("posts_per_page", " 5 ")]).unwrap();
        assert_eq!(config.jekyll().posts_per_page.to_string(), "5");
    }
}
