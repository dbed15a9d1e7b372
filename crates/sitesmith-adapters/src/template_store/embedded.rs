//! Templates compiled into the binary.

use sitesmith_core::{
    application::ports::TemplateSource, domain::FileCollection, error::SitesmithResult,
};

macro_rules! bundled {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $path)) as &[u8])),*]
    };
}

/// Every bundled file, keyed by its path under `templates/`.
static FILES: &[(&str, &[u8])] = bundled![
    "_config.yml",
    "_config.build.yml",
    "Gemfile",
    "package.json",
    "bower.json",
    "README.md",
    "Gruntfile.js",
    "gitignore",
    "gitattributes",
    "editorconfig",
    "jshintrc",
    "csslintrc",
    "bowerrc",
    "app/_posts/0000-00-00-yo-jekyll.md",
    "default/_layouts/default.html",
    "boilerplate/index.html",
    "boilerplate/humans.txt",
    "boilerplate/_layouts/default.html",
    "boilerplate/_layouts/post.html",
    "boilerplate/_includes/scripts.html",
    "boilerplate/_includes/googleanalytics.html",
    "boilerplate/_includes/icons.html",
    "coffee/app.coffee",
];

/// The built-in template set.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn new() -> Self {
        Self
    }

    pub fn collection() -> FileCollection {
        FILES
            .iter()
            .fold(FileCollection::new(), |c, (path, bytes)| c.with_file(path, *bytes))
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn load(&self) -> SitesmithResult<FileCollection> {
        Ok(Self::collection())
    }
}
