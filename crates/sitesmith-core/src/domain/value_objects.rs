//! Domain value objects: preprocessors, template family, Jekyll options.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Letter codes live in `registry.rs`; this file defines the canonical
//! enums, their string forms, and `FromStr` parsers that consult the code
//! tables.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm here
//! 3. Add a `CodeDef` row in `registry.rs`
//! 4. Done, resolution and prompts pick it up

use crate::domain::error::DomainError;
use crate::domain::registry::{self, CodeDef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Parse a canonical name or letter code through a code table.
fn parse_code<T: Copy + 'static>(
    table: &'static [CodeDef<T>],
    field: &'static str,
    raw: &str,
) -> Result<T, DomainError> {
    registry::lookup(table, raw).ok_or_else(|| DomainError::UnknownCode {
        field,
        value: raw.trim().to_string(),
        allowed: registry::allowed_codes(table),
    })
}

// ── CssPreprocessor ──────────────────────────────────────────────────────────

/// CSS source-to-asset compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssPreprocessor {
    None,
    Sass,
    Compass,
}

impl CssPreprocessor {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sass => "sass",
            Self::Compass => "compass",
        }
    }

    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for CssPreprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CssPreprocessor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(
            registry::CSS_PREPROCESSOR_CODES,
            registry::keys::CSS_PREPROCESSOR,
            s,
        )
    }
}

// ── JsPreprocessor ───────────────────────────────────────────────────────────

/// JavaScript source-to-asset compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsPreprocessor {
    None,
    CoffeeScript,
}

impl JsPreprocessor {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CoffeeScript => "coffeescript",
        }
    }

    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for JsPreprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JsPreprocessor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(
            registry::JS_PREPROCESSOR_CODES,
            registry::keys::JS_PREPROCESSOR,
            s,
        )
    }
}

// ── TemplateType ─────────────────────────────────────────────────────────────

/// Site template family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    /// Plain Jekyll layouts plus the baseline project's assets.
    Default,
    /// HTML5 Boilerplate layouts plus toggled remote asset groups.
    Boilerplate,
}

impl TemplateType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Boilerplate => "boilerplate",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(
            registry::TEMPLATE_TYPE_CODES,
            registry::keys::TEMPLATE_TYPE,
            s,
        )
    }
}

// ── PermalinkStyle ───────────────────────────────────────────────────────────

/// Jekyll post permalink style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermalinkStyle {
    Date,
    Pretty,
    None,
}

impl PermalinkStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Pretty => "pretty",
            Self::None => "none",
        }
    }
}

impl fmt::Display for PermalinkStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermalinkStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(registry::PERMALINK_CODES, registry::keys::PERMALINK, s)
    }
}

// ── MarkdownEngine ───────────────────────────────────────────────────────────

/// Markdown library Jekyll renders posts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkdownEngine {
    Maruku,
    Rdiscount,
    Kramdown,
    Redcarpet,
}

impl MarkdownEngine {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Maruku => "maruku",
            Self::Rdiscount => "rdiscount",
            Self::Kramdown => "kramdown",
            Self::Redcarpet => "redcarpet",
        }
    }

    /// Ruby gem that provides this engine, for the generated Gemfile.
    pub const fn gem(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for MarkdownEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkdownEngine {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(registry::MARKDOWN_CODES, registry::keys::MARKDOWN, s)
    }
}

// ── PostsPerPage ─────────────────────────────────────────────────────────────

/// How many posts the home page lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PostsPerPage {
    #[default]
    All,
    Count(NonZeroU32),
}

impl fmt::Display for PostsPerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for PostsPerPage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<NonZeroU32>()
            .map(Self::Count)
            .map_err(|_| DomainError::InvalidPostsPerPage {
                value: trimmed.to_string(),
            })
    }
}

// ── SiteField ────────────────────────────────────────────────────────────────

/// One optional metadata answer.
///
/// `Unset` (the user left it blank) and `NotAsked` (no answer was collected)
/// render differently: `false` versus `none` in templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteField {
    #[default]
    NotAsked,
    Unset,
    Set(String),
}

impl SiteField {
    /// Resolve an optional raw answer. Blank strings never become `Set("")`.
    pub fn from_answer(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None => Self::NotAsked,
            Some("") => Self::Unset,
            Some(value) => Self::Set(value.to_string()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Set(value) => Some(value),
            _ => None,
        }
    }
}
