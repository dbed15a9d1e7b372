//! Prompt and answer-code registry.
//!
//! Every multiple-choice answer is resolved through one static table of
//! [`CodeDef`] rows, and every question the front ends can ask is described
//! once by a [`PromptDef`] in [`PROMPTS`]. Resolution, interactive prompting,
//! `sitesmith prompts` and raw-key validation all read these tables.
//!
//! # Adding a New Choice
//!
//! 1. Add the variant to its enum in `value_objects.rs`
//! 2. Add one [`CodeDef`] row to the matching table below
//! 3. That's it, the prompt message is built from the table

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::answers::RawAnswers;
use crate::domain::value_objects::{
    CssPreprocessor, JsPreprocessor, MarkdownEngine, PermalinkStyle, TemplateType,
};

/// Raw answer keys.
pub mod keys {
    pub const CSS_DIR: &str = "css_dir";
    pub const JS_DIR: &str = "js_dir";
    pub const IMG_DIR: &str = "img_dir";
    pub const FONT_DIR: &str = "font_dir";
    pub const CSS_PREPROCESSOR: &str = "css_preprocessor";
    pub const CSS_PREPROCESSOR_DIR: &str = "css_preprocessor_dir";
    pub const JS_PREPROCESSOR: &str = "js_preprocessor";
    pub const JS_PREPROCESSOR_DIR: &str = "js_preprocessor_dir";
    pub const TEMPLATE_TYPE: &str = "template_type";
    pub const INCLUDE_CSS: &str = "include_css";
    pub const INCLUDE_JS: &str = "include_js";
    pub const INCLUDE_ICONS: &str = "include_icons";
    pub const INCLUDE_DOCS: &str = "include_docs";
    pub const INCLUDE_ANALYTICS: &str = "include_analytics";
    pub const AUTHOR: &str = "author";
    pub const EMAIL: &str = "email";
    pub const TWITTER: &str = "twitter";
    pub const GITHUB: &str = "github";
    pub const DESCRIPTION: &str = "description";
    pub const PERMALINK: &str = "permalink";
    pub const MARKDOWN: &str = "markdown";
    pub const PYGMENTS: &str = "pygments";
    pub const POSTS_PER_PAGE: &str = "posts_per_page";
}

// ── Code tables ──────────────────────────────────────────────────────────────

/// One accepted answer for a multiple-choice prompt.
#[derive(Debug, Clone, Copy)]
pub struct CodeDef<T: 'static> {
    /// Accepted spellings. The first is the short code shown in prompts.
    pub codes: &'static [&'static str],
    /// The canonical value the codes resolve to.
    pub value: T,
    /// Human label shown next to the code.
    pub label: &'static str,
}

pub static CSS_PREPROCESSOR_CODES: &[CodeDef<CssPreprocessor>] = &[
    CodeDef {
        codes: &["s", "sass", "scss"],
        value: CssPreprocessor::Sass,
        label: "Sass",
    },
    CodeDef {
        codes: &["c", "compass"],
        value: CssPreprocessor::Compass,
        label: "Sass & Compass",
    },
    CodeDef {
        codes: &["n", "none"],
        value: CssPreprocessor::None,
        label: "none",
    },
];

pub static JS_PREPROCESSOR_CODES: &[CodeDef<JsPreprocessor>] = &[
    CodeDef {
        codes: &["c", "coffeescript", "coffee"],
        value: JsPreprocessor::CoffeeScript,
        label: "CoffeeScript",
    },
    CodeDef {
        codes: &["n", "none"],
        value: JsPreprocessor::None,
        label: "none",
    },
];

pub static TEMPLATE_TYPE_CODES: &[CodeDef<TemplateType>] = &[
    CodeDef {
        codes: &["d", "default"],
        value: TemplateType::Default,
        label: "Default",
    },
    CodeDef {
        codes: &["h5", "boilerplate", "h5bp"],
        value: TemplateType::Boilerplate,
        label: "HTML5 Boilerplate",
    },
];

pub static PERMALINK_CODES: &[CodeDef<PermalinkStyle>] = &[
    CodeDef {
        codes: &["d", "date"],
        value: PermalinkStyle::Date,
        label: "date",
    },
    CodeDef {
        codes: &["p", "pretty"],
        value: PermalinkStyle::Pretty,
        label: "pretty",
    },
    CodeDef {
        codes: &["n", "none"],
        value: PermalinkStyle::None,
        label: "none",
    },
];

pub static MARKDOWN_CODES: &[CodeDef<MarkdownEngine>] = &[
    CodeDef {
        codes: &["m", "maruku"],
        value: MarkdownEngine::Maruku,
        label: "maruku",
    },
    CodeDef {
        codes: &["rd", "rdiscount"],
        value: MarkdownEngine::Rdiscount,
        label: "rdiscount",
    },
    CodeDef {
        codes: &["k", "kramdown"],
        value: MarkdownEngine::Kramdown,
        label: "kramdown",
    },
    CodeDef {
        codes: &["rc", "redcarpet"],
        value: MarkdownEngine::Redcarpet,
        label: "redcarpet",
    },
];

/// Find the canonical value for a raw code. Case-insensitive, trimmed.
pub fn lookup<T: Copy>(table: &[CodeDef<T>], raw: &str) -> Option<T> {
    let needle = raw.trim();
    table
        .iter()
        .find(|def| def.codes.iter().any(|code| code.eq_ignore_ascii_case(needle)))
        .map(|def| def.value)
}

/// Short codes accepted by a table, in display order.
pub fn allowed_codes<T>(table: &[CodeDef<T>]) -> Vec<&'static str> {
    table.iter().map(|def| def.codes[0]).collect()
}

/// `"s: Sass, c: Sass & Compass, n: none"`
pub fn describe_codes<T>(table: &[CodeDef<T>]) -> String {
    table
        .iter()
        .map(|def| format!("{}: {}", def.codes[0], def.label))
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Yes / no ─────────────────────────────────────────────────────────────────

static YES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(y|yes|true|on|1)\s*$").expect("valid yes regex"));

static NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(n|no|false|off|0)\s*$").expect("valid no regex"));

/// Matches blank answers and the `Y/n` / `y/N` default hints.
static DEFAULT_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(y/n)?\s*$").expect("valid hint regex"));

/// Outcome of matching a raw yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
    Default,
    Unrecognized,
}

pub fn match_yes_no(raw: &str) -> YesNo {
    if DEFAULT_HINT.is_match(raw) {
        YesNo::Default
    } else if YES.is_match(raw) {
        YesNo::Yes
    } else if NO.is_match(raw) {
        YesNo::No
    } else {
        YesNo::Unrecognized
    }
}

// ── Prompt table ─────────────────────────────────────────────────────────────

/// Which section of the questionnaire a prompt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptGroup {
    Directories,
    Tools,
    Template,
    Site,
}

impl PromptGroup {
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Directories => "Let's set up some directories.",
            Self::Tools => "Wire tools and preprocessors.",
            Self::Template => "Choose a template.",
            Self::Site => "And configure Jekyll.",
        }
    }
}

/// When a prompt is asked at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCondition {
    Always,
    CssPreprocessorEnabled,
    JsPreprocessorEnabled,
    BoilerplateTemplate,
}

impl PromptCondition {
    /// Whether a prompt with this condition is asked, given the answers so
    /// far. Absent or blank answers count as the prompt's default.
    pub fn holds(self, answers: &RawAnswers) -> bool {
        fn answer<'a>(answers: &'a RawAnswers, key: &'static str) -> &'a str {
            match answers.get(key).map(str::trim) {
                Some(raw) if !raw.is_empty() => raw,
                _ => find_prompt(key)
                    .and_then(PromptDef::default_answer)
                    .unwrap_or_default(),
            }
        }

        match self {
            Self::Always => true,
            Self::CssPreprocessorEnabled => {
                lookup(CSS_PREPROCESSOR_CODES, answer(answers, keys::CSS_PREPROCESSOR))
                    .is_some_and(CssPreprocessor::is_enabled)
            }
            Self::JsPreprocessorEnabled => {
                lookup(JS_PREPROCESSOR_CODES, answer(answers, keys::JS_PREPROCESSOR))
                    .is_some_and(JsPreprocessor::is_enabled)
            }
            Self::BoilerplateTemplate => {
                lookup(TEMPLATE_TYPE_CODES, answer(answers, keys::TEMPLATE_TYPE))
                    == Some(TemplateType::Boilerplate)
            }
        }
    }
}

/// The shape of answer a prompt expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Directory { default: &'static str },
    Choice { default: &'static str },
    YesNo { default: bool },
    Text,
    Count,
}

/// Describes one question exactly once.
#[derive(Debug, Clone, Copy)]
pub struct PromptDef {
    pub key: &'static str,
    pub message: &'static str,
    pub kind: PromptKind,
    pub group: PromptGroup,
    pub condition: PromptCondition,
}

impl PromptDef {
    /// The default as a raw answer string, if the prompt has one.
    pub fn default_answer(&self) -> Option<&'static str> {
        match self.kind {
            PromptKind::Directory { default } | PromptKind::Choice { default } => Some(default),
            PromptKind::YesNo { default: true } => Some("Y/n"),
            PromptKind::YesNo { default: false } => Some("y/N"),
            PromptKind::Text | PromptKind::Count => None,
        }
    }

    /// Choice descriptions for multiple-choice prompts.
    pub fn choices(&self) -> Option<String> {
        match self.key {
            keys::CSS_PREPROCESSOR => Some(describe_codes(CSS_PREPROCESSOR_CODES)),
            keys::JS_PREPROCESSOR => Some(describe_codes(JS_PREPROCESSOR_CODES)),
            keys::TEMPLATE_TYPE => Some(describe_codes(TEMPLATE_TYPE_CODES)),
            keys::PERMALINK => Some(describe_codes(PERMALINK_CODES)),
            keys::MARKDOWN => Some(describe_codes(MARKDOWN_CODES)),
            _ => None,
        }
    }
}

/// Every prompt, in questionnaire order.
pub static PROMPTS: &[PromptDef] = &[
    PromptDef {
        key: keys::CSS_DIR,
        message: "Choose a css directory",
        kind: PromptKind::Directory { default: "css" },
        group: PromptGroup::Directories,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::JS_DIR,
        message: "Choose a javascript directory",
        kind: PromptKind::Directory { default: "js" },
        group: PromptGroup::Directories,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::IMG_DIR,
        message: "Choose an image file directory",
        kind: PromptKind::Directory { default: "image" },
        group: PromptGroup::Directories,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::FONT_DIR,
        message: "Choose a webfont directory",
        kind: PromptKind::Directory { default: "fonts" },
        group: PromptGroup::Directories,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::CSS_PREPROCESSOR,
        message: "Use a css preprocessor?",
        kind: PromptKind::Choice { default: "n" },
        group: PromptGroup::Tools,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::CSS_PREPROCESSOR_DIR,
        message: "Choose a css preprocessor directory",
        kind: PromptKind::Directory { default: "_scss" },
        group: PromptGroup::Tools,
        condition: PromptCondition::CssPreprocessorEnabled,
    },
    PromptDef {
        key: keys::JS_PREPROCESSOR,
        message: "Use a javascript preprocessor?",
        kind: PromptKind::Choice { default: "n" },
        group: PromptGroup::Tools,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::JS_PREPROCESSOR_DIR,
        message: "Choose a javascript preprocessor directory",
        kind: PromptKind::Directory { default: "_coffee" },
        group: PromptGroup::Tools,
        condition: PromptCondition::JsPreprocessorEnabled,
    },
    PromptDef {
        key: keys::TEMPLATE_TYPE,
        message: "Choose a Jekyll site template",
        kind: PromptKind::Choice { default: "d" },
        group: PromptGroup::Template,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::INCLUDE_CSS,
        message: "Add H5BP css files?",
        kind: PromptKind::YesNo { default: true },
        group: PromptGroup::Template,
        condition: PromptCondition::BoilerplateTemplate,
    },
    PromptDef {
        key: keys::INCLUDE_JS,
        message: "Add H5BP javascript files?",
        kind: PromptKind::YesNo { default: true },
        group: PromptGroup::Template,
        condition: PromptCondition::BoilerplateTemplate,
    },
    PromptDef {
        key: keys::INCLUDE_ICONS,
        message: "Add H5BP favorite and touch icons?",
        kind: PromptKind::YesNo { default: false },
        group: PromptGroup::Template,
        condition: PromptCondition::BoilerplateTemplate,
    },
    PromptDef {
        key: keys::INCLUDE_DOCS,
        message: "Add H5BP documentation?",
        kind: PromptKind::YesNo { default: false },
        group: PromptGroup::Template,
        condition: PromptCondition::BoilerplateTemplate,
    },
    PromptDef {
        key: keys::INCLUDE_ANALYTICS,
        message: "Include Google Analytics?",
        kind: PromptKind::YesNo { default: false },
        group: PromptGroup::Template,
        condition: PromptCondition::BoilerplateTemplate,
    },
    PromptDef {
        key: keys::AUTHOR,
        message: "Your Name",
        kind: PromptKind::Text,
        group: PromptGroup::Site,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::EMAIL,
        message: "Your Email",
        kind: PromptKind::Text,
        group: PromptGroup::Site,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::TWITTER,
        message: "Your @Twitter Username",
        kind: PromptKind::Text,
        group: PromptGroup::Site,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::GITHUB,
        message: "Your GitHub Username",
        kind: PromptKind::Text,
        group: PromptGroup::Site,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::DESCRIPTION,
        message: "Site Description",
        kind: PromptKind::Text,
        group: PromptGroup::Site,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::PERMALINK,
        message: "Choose a post permalink style",
        kind: PromptKind::Choice { default: "d" },
        group: PromptGroup::Site,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::MARKDOWN,
        message: "Markdown library",
        kind: PromptKind::Choice { default: "m" },
        group: PromptGroup::Site,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::PYGMENTS,
        message: "Use the Pygments code highlighting library?",
        kind: PromptKind::YesNo { default: false },
        group: PromptGroup::Site,
        condition: PromptCondition::Always,
    },
    PromptDef {
        key: keys::POSTS_PER_PAGE,
        message: "How many posts should be shown on the home page? (blank for all)",
        kind: PromptKind::Count,
        group: PromptGroup::Site,
        condition: PromptCondition::Always,
    },
];

/// Look up a prompt by key.
pub fn find_prompt(key: &str) -> Option<&'static PromptDef> {
    PROMPTS.iter().find(|p| p.key == key)
}

/// Yes/no default for a key. Panics on a non yes/no key, which is a bug in
/// the caller rather than bad input.
pub(crate) fn yes_no_default(key: &'static str) -> bool {
    match find_prompt(key).map(|p| p.kind) {
        Some(PromptKind::YesNo { default }) => default,
        _ => unreachable!("{key} is not a yes/no prompt"),
    }
}

/// Directory default for a key.
pub(crate) fn directory_default(key: &'static str) -> &'static str {
    match find_prompt(key).map(|p| p.kind) {
        Some(PromptKind::Directory { default }) => default,
        _ => unreachable!("{key} is not a directory prompt"),
    }
}

/// Choice default for a key.
pub(crate) fn choice_default(key: &'static str) -> &'static str {
    match find_prompt(key).map(|p| p.kind) {
        Some(PromptKind::Choice { default }) => default,
        _ => unreachable!("{key} is not a choice prompt"),
    }
}
