//! The `ResolvedConfig` aggregate root and its builder.
//!
//! A `ResolvedConfig` is the canonical, typed description of the site to
//! scaffold. It is constructed once per run (by `ConfigResolver` or by the
//! builder directly), validated at `build()`, and then passed by reference
//! through every synthesis stage. It has no setters.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;

use crate::domain::{
    entities::common::AssetDir,
    error::DomainError,
    registry::{self, keys},
    value_objects::{
        CssPreprocessor, JsPreprocessor, MarkdownEngine, PermalinkStyle, PostsPerPage, SiteField,
        TemplateType,
    },
};

// ── Directory keys ────────────────────────────────────────────────────────────

/// Names a configurable directory. Build-graph globs refer to directories
/// through these keys so a glob can never point at an unconfigured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DirKey {
    Css,
    CssPre,
    Js,
    JsPre,
    Img,
    Fonts,
}

impl DirKey {
    pub const ALL: [DirKey; 6] = [
        Self::Css,
        Self::CssPre,
        Self::Js,
        Self::JsPre,
        Self::Img,
        Self::Fonts,
    ];

    /// Property name inside the generated Gruntfile's config object.
    pub const fn grunt_name(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::CssPre => "cssPre",
            Self::Js => "js",
            Self::JsPre => "jsPre",
            Self::Img => "img",
            Self::Fonts => "fonts",
        }
    }
}

impl fmt::Display for DirKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.grunt_name())
    }
}

// ── Grouped fields ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetDirectories {
    pub css: AssetDir,
    pub js: AssetDir,
    pub img: AssetDir,
    pub font: AssetDir,
}

impl Default for AssetDirectories {
    fn default() -> Self {
        let default_dir = |key: &'static str| {
            AssetDir::parse(key, registry::directory_default(key))
                .unwrap_or_else(|e| unreachable!("registry default for {key} is invalid: {e}"))
        };
        Self {
            css: default_dir(keys::CSS_DIR),
            js: default_dir(keys::JS_DIR),
            img: default_dir(keys::IMG_DIR),
            font: default_dir(keys::FONT_DIR),
        }
    }
}

/// Optional boilerplate asset groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoilerplateToggles {
    pub include_css: bool,
    pub include_js: bool,
    pub include_icons: bool,
    pub include_docs: bool,
    pub include_analytics: bool,
}

impl Default for BoilerplateToggles {
    fn default() -> Self {
        Self {
            include_css: registry::yes_no_default(keys::INCLUDE_CSS),
            include_js: registry::yes_no_default(keys::INCLUDE_JS),
            include_icons: registry::yes_no_default(keys::INCLUDE_ICONS),
            include_docs: registry::yes_no_default(keys::INCLUDE_DOCS),
            include_analytics: registry::yes_no_default(keys::INCLUDE_ANALYTICS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SiteMetadata {
    pub author: SiteField,
    pub email: SiteField,
    pub twitter: SiteField,
    pub github: SiteField,
    pub description: SiteField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JekyllOptions {
    pub permalink: PermalinkStyle,
    pub markdown: MarkdownEngine,
    pub pygments: bool,
    pub posts_per_page: PostsPerPage,
}

impl Default for JekyllOptions {
    fn default() -> Self {
        Self {
            permalink: PermalinkStyle::Date,
            markdown: MarkdownEngine::Maruku,
            pygments: registry::yes_no_default(keys::PYGMENTS),
            posts_per_page: PostsPerPage::All,
        }
    }
}

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A fully-resolved site configuration.
///
/// Guaranteed on construction:
/// - a preprocessor directory exists iff its preprocessor is enabled
/// - boilerplate toggles exist iff the template type is boilerplate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedConfig {
    directories: AssetDirectories,
    css_preprocessor: CssPreprocessor,
    css_preprocessor_dir: Option<AssetDir>,
    js_preprocessor: JsPreprocessor,
    js_preprocessor_dir: Option<AssetDir>,
    template_type: TemplateType,
    boilerplate: Option<BoilerplateToggles>,
    metadata: SiteMetadata,
    jekyll: JekyllOptions,
}

impl ResolvedConfig {
    /// Start building a `ResolvedConfig` from defaults.
    pub fn builder() -> ResolvedConfigBuilder {
        ResolvedConfigBuilder::new()
    }

    pub fn directories(&self) -> &AssetDirectories {
        &self.directories
    }
    pub fn css_dir(&self) -> &AssetDir {
        &self.directories.css
    }
    pub fn js_dir(&self) -> &AssetDir {
        &self.directories.js
    }
    pub fn img_dir(&self) -> &AssetDir {
        &self.directories.img
    }
    pub fn font_dir(&self) -> &AssetDir {
        &self.directories.font
    }
    pub const fn css_preprocessor(&self) -> CssPreprocessor {
        self.css_preprocessor
    }
    pub fn css_preprocessor_dir(&self) -> Option<&AssetDir> {
        self.css_preprocessor_dir.as_ref()
    }
    pub const fn js_preprocessor(&self) -> JsPreprocessor {
        self.js_preprocessor
    }
    pub fn js_preprocessor_dir(&self) -> Option<&AssetDir> {
        self.js_preprocessor_dir.as_ref()
    }
    pub const fn template_type(&self) -> TemplateType {
        self.template_type
    }
    pub const fn boilerplate(&self) -> Option<BoilerplateToggles> {
        self.boilerplate
    }
    pub fn metadata(&self) -> &SiteMetadata {
        &self.metadata
    }
    pub const fn jekyll(&self) -> JekyllOptions {
        self.jekyll
    }

    /// The directory configured for `key`, if any.
    pub fn dir(&self, key: DirKey) -> Option<&AssetDir> {
        match key {
            DirKey::Css => Some(&self.directories.css),
            DirKey::CssPre => self.css_preprocessor_dir.as_ref(),
            DirKey::Js => Some(&self.directories.js),
            DirKey::JsPre => self.js_preprocessor_dir.as_ref(),
            DirKey::Img => Some(&self.directories.img),
            DirKey::Fonts => Some(&self.directories.font),
        }
    }

    /// Validate internal consistency.
    ///
    /// Called by the builder. Available for re-validation by services.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.css_preprocessor.is_enabled() != self.css_preprocessor_dir.is_some() {
            return Err(DomainError::InvalidConfig(format!(
                "css preprocessor '{}' and its directory disagree",
                self.css_preprocessor
            )));
        }
        if self.js_preprocessor.is_enabled() != self.js_preprocessor_dir.is_some() {
            return Err(DomainError::InvalidConfig(format!(
                "js preprocessor '{}' and its directory disagree",
                self.js_preprocessor
            )));
        }
        if (self.template_type == TemplateType::Boilerplate) != self.boilerplate.is_some() {
            return Err(DomainError::InvalidConfig(format!(
                "boilerplate toggles do not match template type '{}'",
                self.template_type
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} template, css: {}, js: {}",
            self.template_type, self.css_preprocessor, self.js_preprocessor
        )
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`ResolvedConfig`].
///
/// Unset preprocessor directories and boilerplate toggles fall back to the
/// registry defaults when their feature is enabled, and are dropped when it
/// is not.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfigBuilder {
    directories: AssetDirectories,
    css_preprocessor: Option<CssPreprocessor>,
    css_preprocessor_dir: Option<AssetDir>,
    js_preprocessor: Option<JsPreprocessor>,
    js_preprocessor_dir: Option<AssetDir>,
    template_type: Option<TemplateType>,
    boilerplate: Option<BoilerplateToggles>,
    metadata: SiteMetadata,
    jekyll: JekyllOptions,
}

impl ResolvedConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directories(mut self, directories: AssetDirectories) -> Self {
        self.directories = directories;
        self
    }

    pub fn css_preprocessor(mut self, preprocessor: CssPreprocessor) -> Self {
        self.css_preprocessor = Some(preprocessor);
        self
    }

    pub fn css_preprocessor_dir(mut self, dir: AssetDir) -> Self {
        self.css_preprocessor_dir = Some(dir);
        self
    }

    pub fn js_preprocessor(mut self, preprocessor: JsPreprocessor) -> Self {
        self.js_preprocessor = Some(preprocessor);
        self
    }

    pub fn js_preprocessor_dir(mut self, dir: AssetDir) -> Self {
        self.js_preprocessor_dir = Some(dir);
        self
    }

    pub fn template_type(mut self, template_type: TemplateType) -> Self {
        self.template_type = Some(template_type);
        self
    }

    /// Set boilerplate toggles. Implies the boilerplate template type.
    pub fn boilerplate(mut self, toggles: BoilerplateToggles) -> Self {
        self.template_type = Some(TemplateType::Boilerplate);
        self.boilerplate = Some(toggles);
        self
    }

    pub fn metadata(mut self, metadata: SiteMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn jekyll(mut self, jekyll: JekyllOptions) -> Self {
        self.jekyll = jekyll;
        self
    }

    /// Consume the builder, producing a validated [`ResolvedConfig`].
    pub fn build(self) -> Result<ResolvedConfig, DomainError> {
        let css_preprocessor = self.css_preprocessor.unwrap_or(CssPreprocessor::None);
        let js_preprocessor = self.js_preprocessor.unwrap_or(JsPreprocessor::None);
        let template_type = self.template_type.unwrap_or(TemplateType::Default);

        let css_preprocessor_dir = if css_preprocessor.is_enabled() {
            Some(match self.css_preprocessor_dir {
                Some(dir) => dir,
                None => default_dir(keys::CSS_PREPROCESSOR_DIR)?,
            })
        } else {
            None
        };

        let js_preprocessor_dir = if js_preprocessor.is_enabled() {
            Some(match self.js_preprocessor_dir {
                Some(dir) => dir,
                None => default_dir(keys::JS_PREPROCESSOR_DIR)?,
            })
        } else {
            None
        };

        let boilerplate = match template_type {
            TemplateType::Boilerplate => Some(self.boilerplate.unwrap_or_default()),
            TemplateType::Default => None,
        };

        let config = ResolvedConfig {
            directories: self.directories,
            css_preprocessor,
            css_preprocessor_dir,
            js_preprocessor,
            js_preprocessor_dir,
            template_type,
            boilerplate,
            metadata: self.metadata,
            jekyll: self.jekyll,
        };

        config.validate()?;
        Ok(config)
    }
}

fn default_dir(key: &'static str) -> Result<AssetDir, DomainError> {
    AssetDir::parse(key, registry::directory_default(key))
}
