//! The data every bundled template renders against.
//!
//! Built once per run from the [`ResolvedConfig`], the fixed
//! [`DerivedContext`] and the [`BuildTaskGraph`]. Fields a configuration
//! does not have (a disabled preprocessor's directory, boilerplate toggles
//! on the default template) are left out entirely rather than set to null,
//! so a strict engine reports any unguarded use.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{
    build_graph::{BuildTaskGraph, TaskKind},
    config::ResolvedConfig,
};
use crate::domain::value_objects::{PostsPerPage, SiteField};

/// A template value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<ContextValue>),
    Map(BTreeMap<String, ContextValue>),
}

impl ContextValue {
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, ContextValue)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn list(items: impl IntoIterator<Item = impl Into<ContextValue>>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<bool> for ContextValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ContextValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for ContextValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&SiteField> for ContextValue {
    /// `Set` -> string, `Unset` -> `false`, `NotAsked` -> `none`.
    fn from(field: &SiteField) -> Self {
        match field {
            SiteField::Set(value) => Self::Str(value.clone()),
            SiteField::Unset => Self::Bool(false),
            SiteField::NotAsked => Self::Null,
        }
    }
}

/// Values fixed for a whole run. Capturing the date here keeps rendering a
/// pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedContext {
    pub app_name: String,
    pub date: NaiveDate,
    pub generator_name: String,
    pub generator_version: String,
    pub boilerplate_version: String,
}

impl DerivedContext {
    /// `YYYY-MM-DD`, as used in post file names.
    pub fn date_stamp(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Top-level template context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderContext(BTreeMap<String, ContextValue>);

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The full site context.
    pub fn for_site(
        config: &ResolvedConfig,
        derived: &DerivedContext,
        graph: &BuildTaskGraph,
    ) -> Self {
        let mut ctx = Self::new()
            .with_value("app_name", derived.app_name.as_str())
            .with_value("date", derived.date_stamp())
            .with_value(
                "generator",
                ContextValue::map([
                    ("name", ContextValue::from(derived.generator_name.as_str())),
                    ("version", derived.generator_version.as_str().into()),
                ]),
            )
            .with_value("css_dir", config.css_dir().as_str())
            .with_value("js_dir", config.js_dir().as_str())
            .with_value("img_dir", config.img_dir().as_str())
            .with_value("font_dir", config.font_dir().as_str())
            .with_value("css_preprocessor", config.css_preprocessor().as_str())
            .with_value("js_preprocessor", config.js_preprocessor().as_str())
            .with_value("template_type", config.template_type().as_str());

        if let Some(dir) = config.css_preprocessor_dir() {
            ctx = ctx.with_value("css_preprocessor_dir", dir.as_str());
        }
        if let Some(dir) = config.js_preprocessor_dir() {
            ctx = ctx.with_value("js_preprocessor_dir", dir.as_str());
        }
        if let Some(toggles) = config.boilerplate() {
            ctx = ctx
                .with_value("boilerplate_version", derived.boilerplate_version.as_str())
                .with_value(
                    "h5bp",
                    ContextValue::map([
                        ("css", ContextValue::from(toggles.include_css)),
                        ("js", toggles.include_js.into()),
                        ("icons", toggles.include_icons.into()),
                        ("docs", toggles.include_docs.into()),
                        ("analytics", toggles.include_analytics.into()),
                    ]),
                );
        }

        let meta = config.metadata();
        let jekyll = config.jekyll();
        ctx = ctx
            .with_value("author", &meta.author)
            .with_value("email", &meta.email)
            .with_value("twitter", &meta.twitter)
            .with_value("github", &meta.github)
            .with_value("description", &meta.description)
            .with_value("permalink", jekyll.permalink.as_str())
            .with_value("markdown", jekyll.markdown.as_str())
            .with_value("markdown_gem", jekyll.markdown.gem())
            .with_value("pygments", jekyll.pygments)
            .with_value(
                "posts_per_page",
                match jekyll.posts_per_page {
                    PostsPerPage::All => ContextValue::from("all"),
                    PostsPerPage::Count(n) => ContextValue::Int(i64::from(n.get())),
                },
            );

        ctx.with_value("pipeline", pipeline_value(graph))
    }
}

/// `pipeline.{watch, concurrent, aliases, packages}` for the Gruntfile and
/// `package.json` templates.
fn pipeline_value(graph: &BuildTaskGraph) -> ContextValue {
    let watch = graph.watches().iter().map(|w| {
        ContextValue::map([
            ("name", ContextValue::from(w.name.as_str())),
            ("files", ContextValue::list(w.globs.iter().map(|g| g.render()))),
            ("tasks", ContextValue::list(w.tasks.iter().map(String::as_str))),
            ("livereload", w.livereload.into()),
        ])
    });

    let named_lists = |kind: TaskKind| {
        graph
            .tasks()
            .iter()
            .filter(move |t| t.kind == kind)
            .map(|t| {
                let short = t.target().unwrap_or(t.name.as_str());
                ContextValue::map([
                    ("name", ContextValue::from(short)),
                    (
                        "tasks",
                        ContextValue::list(t.depends_on.iter().map(String::as_str)),
                    ),
                ])
            })
            .collect::<Vec<_>>()
    };

    let packages = graph.packages().into_iter().map(|(name, version)| {
        ContextValue::map([
            ("name", ContextValue::from(name)),
            ("version", version.into()),
        ])
    });

    ContextValue::map([
        ("watch", ContextValue::List(watch.collect())),
        ("concurrent", ContextValue::List(named_lists(TaskKind::Concurrent))),
        ("aliases", ContextValue::List(named_lists(TaskKind::Aggregate))),
        ("packages", ContextValue::List(packages.collect())),
        ("plugins", ContextValue::list(graph.plugins())),
    ])
}
