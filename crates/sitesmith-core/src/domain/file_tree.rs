//! Configuration + sources -> ordered, collision-free [`FilePlan`].
//!
//! Every destination is computed from the [`ResolvedConfig`]; nothing below
//! `app/` is spelled out independently of a configured directory except the
//! fixed Jekyll substructure.

use crate::domain::{
    boilerplate_merger::RemoteBoilerplateMerger,
    conflict_resolver::ConflictResolver,
    entities::{
        common::RelativePath,
        config::{BoilerplateToggles, ResolvedConfig},
        file_operation::{FileOperation, FilePlan, SourceId, SourceRef},
        render_context::DerivedContext,
        source::SourceSet,
    },
    error::DomainError,
    value_objects::TemplateType,
};

/// Paths inside the bundled template collection.
pub mod bundled {
    pub const ROOT_TEMPLATES: &[&str] = &[
        "_config.yml",
        "_config.build.yml",
        "Gemfile",
        "package.json",
        "bower.json",
        "README.md",
        "Gruntfile.js",
    ];
    /// Copied to `.<name>` at the project root.
    pub const DOTFILES: &[&str] = &[
        "gitignore",
        "gitattributes",
        "editorconfig",
        "jshintrc",
        "csslintrc",
        "bowerrc",
    ];
    pub const STARTER_POST: &str = "app/_posts/0000-00-00-yo-jekyll.md";
    pub const DEFAULT_LAYOUT: &str = "default/_layouts/default.html";
    pub const H5BP_INDEX: &str = "boilerplate/index.html";
    pub const H5BP_POST_LAYOUT: &str = "boilerplate/_layouts/post.html";
    pub const H5BP_DEFAULT_LAYOUT: &str = "boilerplate/_layouts/default.html";
    pub const H5BP_HUMANS: &str = "boilerplate/humans.txt";
    pub const H5BP_SCRIPTS: &str = "boilerplate/_includes/scripts.html";
    pub const H5BP_ANALYTICS: &str = "boilerplate/_includes/googleanalytics.html";
    pub const H5BP_ICONS: &str = "boilerplate/_includes/icons.html";
    pub const STARTER_COFFEE: &str = "coffee/app.coffee";
}

/// Paths inside the generated baseline Jekyll project.
pub mod baseline {
    pub const WELCOME_POST_SUFFIX: &str = "-welcome-to-jekyll.markdown";
    pub const INDEX: &str = "index.html";
    pub const POST_LAYOUT: &str = "_layouts/post.html";
    pub const SCREEN_CSS: &str = "css/screen.css";
    pub const SYNTAX_CSS: &str = "css/syntax.css";
    pub const RSS_IMAGE: &str = "images/rss.png";
}

const JEKYLL_DIRS: &[&str] = &["_layouts", "_posts", "_includes", "_plugins"];
const INCLUDE_SCRIPTS: &str = "_includes/scripts.html";
const INCLUDE_ANALYTICS: &str = "_includes/googleanalytics.html";
const INCLUDE_ICONS: &str = "_includes/icons.html";

#[derive(Debug, Clone, Copy, Default)]
pub struct FileTreeSynthesizer;

impl FileTreeSynthesizer {
    /// Plan every operation for `config`, prove each source path exists and
    /// that no two operations collide.
    pub fn plan(
        config: &ResolvedConfig,
        derived: &DerivedContext,
        sources: &SourceSet,
    ) -> Result<FilePlan, DomainError> {
        let mut planner = Planner {
            config,
            ops: Vec::new(),
        };

        planner.directories()?;
        planner.universal(derived, sources)?;

        match config.template_type() {
            TemplateType::Default => planner.default_family()?,
            TemplateType::Boilerplate => {
                let toggles = config.boilerplate().ok_or_else(|| {
                    DomainError::InvalidConfig("boilerplate template without toggles".into())
                })?;
                let release = sources
                    .boilerplate
                    .as_ref()
                    .ok_or(DomainError::SourceUnavailable {
                        origin: SourceId::Boilerplate.as_str(),
                    })?;
                let selection =
                    RemoteBoilerplateMerger::select(release, toggles, config.js_dir().as_str())?;
                planner.ops.extend(selection.operations);
                if toggles.include_css {
                    for source in selection.css_assets {
                        planner.css_asset(source)?;
                    }
                }
                planner.boilerplate_family(toggles)?;
            }
        }

        if config.jekyll().pygments {
            planner.css_asset(SourceRef::new(SourceId::Baseline, baseline::SYNTAX_CSS))?;
        }

        if let Some(dir) = config.js_preprocessor_dir() {
            let dest = app(dir.as_str())?.join("app.coffee")?;
            planner.push(FileOperation::copy(bundled_ref(bundled::STARTER_COFFEE), dest));
        }

        for op in &planner.ops {
            if let Some(source) = op.kind.source() {
                sources.check(source)?;
            }
        }

        let plan = FilePlan::from_operations(planner.ops);
        ConflictResolver::verify(&plan)?;
        Ok(plan)
    }
}

struct Planner<'a> {
    config: &'a ResolvedConfig,
    ops: Vec<FileOperation>,
}

impl Planner<'_> {
    fn push(&mut self, op: FileOperation) {
        self.ops.push(op);
    }

    fn directories(&mut self) -> Result<(), DomainError> {
        self.push(FileOperation::mkdir(RelativePath::new("app")));
        let config = self.config;
        let asset_dirs = [
            Some(config.css_dir()),
            Some(config.js_dir()),
            Some(config.img_dir()),
            Some(config.font_dir()),
            config.css_preprocessor_dir(),
            config.js_preprocessor_dir(),
        ];
        for dir in asset_dirs.into_iter().flatten() {
            self.push(FileOperation::mkdir(app(dir.as_str())?));
        }
        for dir in JEKYLL_DIRS {
            self.push(FileOperation::mkdir(app(dir)?));
        }
        Ok(())
    }

    fn universal(
        &mut self,
        derived: &DerivedContext,
        sources: &SourceSet,
    ) -> Result<(), DomainError> {
        for name in bundled::ROOT_TEMPLATES {
            self.push(FileOperation::template(
                bundled_ref(name),
                RelativePath::new(name),
            ));
        }
        for name in bundled::DOTFILES {
            self.push(FileOperation::copy(
                bundled_ref(name),
                RelativePath::try_new(format!(".{name}"))?,
            ));
        }

        let date = derived.date_stamp();
        let welcome = sources
            .baseline
            .find_by_suffix(baseline::WELCOME_POST_SUFFIX)
            .ok_or_else(|| DomainError::SourceMissing {
                origin: SourceId::Baseline.as_str(),
                path: format!("_posts/*{}", baseline::WELCOME_POST_SUFFIX),
            })?;
        self.push(FileOperation::copy(
            SourceRef::new(SourceId::Baseline, welcome.clone()),
            app(&format!("_posts/{date}-welcome-to-jekyll.md"))?,
        ));
        self.push(FileOperation::template(
            bundled_ref(bundled::STARTER_POST),
            app(&format!("_posts/{date}-yo-jekyll.md"))?,
        ));
        Ok(())
    }

    fn default_family(&mut self) -> Result<(), DomainError> {
        self.push(FileOperation::template(
            bundled_ref(bundled::DEFAULT_LAYOUT),
            app("_layouts/default.html")?,
        ));
        self.push(FileOperation::copy(
            baseline_ref(baseline::INDEX),
            app("index.html")?,
        ));
        self.push(FileOperation::copy(
            baseline_ref(baseline::POST_LAYOUT),
            app("_layouts/post.html")?,
        ));
        self.css_asset(baseline_ref(baseline::SCREEN_CSS))?;
        let rss = app(self.config.img_dir().as_str())?.join("rss.png")?;
        self.push(FileOperation::copy(baseline_ref(baseline::RSS_IMAGE), rss));
        Ok(())
    }

    fn boilerplate_family(&mut self, toggles: BoilerplateToggles) -> Result<(), DomainError> {
        self.push(FileOperation::copy(
            bundled_ref(bundled::H5BP_INDEX),
            app("index.html")?,
        ));
        self.push(FileOperation::copy(
            bundled_ref(bundled::H5BP_POST_LAYOUT),
            app("_layouts/post.html")?,
        ));
        self.push(FileOperation::template(
            bundled_ref(bundled::H5BP_DEFAULT_LAYOUT),
            app("_layouts/default.html")?,
        ));
        self.push(FileOperation::template(
            bundled_ref(bundled::H5BP_HUMANS),
            app("humans.txt")?,
        ));

        // Layout includes exist unconditionally; toggles replace them.
        for include in [INCLUDE_SCRIPTS, INCLUDE_ANALYTICS, INCLUDE_ICONS] {
            self.push(FileOperation::write(Vec::new(), app(include)?));
        }

        if toggles.include_js {
            self.push(
                FileOperation::template(bundled_ref(bundled::H5BP_SCRIPTS), app(INCLUDE_SCRIPTS)?)
                    .overriding(),
            );
        } else {
            let main = app(self.config.js_dir().as_str())?.join("main.js")?;
            self.push(FileOperation::write(Vec::new(), main));
        }

        if toggles.include_analytics {
            self.push(
                FileOperation::copy(bundled_ref(bundled::H5BP_ANALYTICS), app(INCLUDE_ANALYTICS)?)
                    .overriding(),
            );
        }

        if toggles.include_icons {
            self.push(
                FileOperation::copy(bundled_ref(bundled::H5BP_ICONS), app(INCLUDE_ICONS)?)
                    .overriding(),
            );
        }

        if !toggles.include_css {
            let dest = self.css_destination("main.css")?;
            self.push(FileOperation::write(Vec::new(), dest));
        }

        Ok(())
    }

    /// Copy a stylesheet into the CSS directory, or into the preprocessor
    /// directory as `<stem>.scss` when a CSS preprocessor is on.
    fn css_asset(&mut self, source: SourceRef) -> Result<(), DomainError> {
        let dest = self.css_destination(source.path.file_name())?;
        self.push(FileOperation::copy(source, dest));
        Ok(())
    }

    fn css_destination(&self, file_name: &str) -> Result<RelativePath, DomainError> {
        match self.config.css_preprocessor_dir() {
            Some(dir) => {
                let stem = file_name
                    .rsplit_once('.')
                    .map_or(file_name, |(stem, _)| stem);
                app(dir.as_str())?.join(format!("{stem}.scss"))
            }
            None => app(self.config.css_dir().as_str())?.join(file_name),
        }
    }
}

fn app(path: &str) -> Result<RelativePath, DomainError> {
    RelativePath::new("app").join(path)
}

fn bundled_ref(path: &str) -> SourceRef {
    SourceRef::new(SourceId::Bundled, path)
}

fn baseline_ref(path: &str) -> SourceRef {
    SourceRef::new(SourceId::Baseline, path)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{
        entities::{
            file_operation::{OperationKind, Phase},
            source::FileCollection,
        },
        value_objects::{CssPreprocessor, JsPreprocessor},
    };

    fn derived() -> DerivedContext {
        DerivedContext {
            app_name: "site".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            generator_name: "sitesmith".into(),
            generator_version: "0.1.0".into(),
            boilerplate_version: "4.3.0".into(),
        }
    }

    fn bundled_files() -> FileCollection {
        let mut c = FileCollection::new();
        for path in bundled::ROOT_TEMPLATES.iter().chain(bundled::DOTFILES) {
            c = c.with_file(path, "x");
        }
        for path in [
            bundled::STARTER_POST,
            bundled::DEFAULT_LAYOUT,
            bundled::H5BP_INDEX,
            bundled::H5BP_POST_LAYOUT,
            bundled::H5BP_DEFAULT_LAYOUT,
            bundled::H5BP_HUMANS,
            bundled::H5BP_SCRIPTS,
            bundled::H5BP_ANALYTICS,
            bundled::H5BP_ICONS,
            bundled::STARTER_COFFEE,
        ] {
            c = c.with_file(path, "x");
        }
        c
    }

    fn baseline_files() -> FileCollection {
        FileCollection::new()
            .with_file("_posts/2024-01-02-welcome-to-jekyll.markdown", "post")
            .with_file(baseline::INDEX, "index")
            .with_file(baseline::POST_LAYOUT, "layout")
            .with_file(baseline::SCREEN_CSS, "screen")
            .with_file(baseline::SYNTAX_CSS, "syntax")
            .with_file(baseline::RSS_IMAGE, "png")
    }

    fn h5bp_files() -> FileCollection {
        FileCollection::new()
            .with_file(".htaccess", "")
            .with_file("404.html", "")
            .with_file("crossdomain.xml", "")
            .with_file("robots.txt", "")
            .with_file("LICENSE.md", "")
            .with_file("css/main.css", "")
            .with_file("css/normalize.css", "")
            .with_file("js/main.js", "")
            .with_file("js/plugins.js", "")
            .with_file("favicon.ico", "")
            .with_file("apple-touch-icon-precomposed.png", "")
            .with_file("doc/TOC.md", "")
    }

    fn sources() -> SourceSet {
        SourceSet::new(bundled_files(), baseline_files()).with_boilerplate(h5bp_files())
    }

    fn dests(plan: &FilePlan) -> Vec<&str> {
        plan.iter().map(|op| op.destination.as_str()).collect()
    }

    #[test]
    fn default_plain_site() {
        let config = ResolvedConfig::builder().build().unwrap();
        let plan = FileTreeSynthesizer::plan(&config, &derived(), &sources()).unwrap();
        let d = dests(&plan);

        for dir in [
            "app",
            "app/css",
            "app/js",
            "app/image",
            "app/fonts",
            "app/_layouts",
            "app/_posts",
            "app/_includes",
            "app/_plugins",
        ] {
            assert!(plan.directories().any(|p| p.as_str() == dir), "missing {dir}");
        }
        assert!(!d.contains(&"app/_scss"));
        assert!(d.contains(&"app/css/screen.css"));
        assert!(d.contains(&"app/image/rss.png"));
        assert!(d.contains(&"app/_posts/2024-01-02-welcome-to-jekyll.md"));
        assert!(d.contains(&"app/_posts/2024-01-02-yo-jekyll.md"));
        assert!(d.contains(&".gitignore"));
        assert!(d.contains(&"Gruntfile.js"));
        assert!(!d.contains(&"app/css/syntax.css"));
    }

    #[test]
    fn phases_never_go_backwards() {
        let config = ResolvedConfig::builder()
            .boilerplate(BoilerplateToggles {
                include_icons: true,
                include_analytics: true,
                ..BoilerplateToggles::default()
            })
            .build()
            .unwrap();
        let plan = FileTreeSynthesizer::plan(&config, &derived(), &sources()).unwrap();
        let phases: Vec<Phase> = plan.iter().map(FileOperation::phase).collect();
        assert!(phases.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(phases.last(), Some(&Phase::Overrides));
    }

    #[test]
    fn sass_moves_css_assets_into_preprocessor_dir() {
        let config = ResolvedConfig::builder()
            .css_preprocessor(CssPreprocessor::Sass)
            .jekyll(crate::domain::entities::config::JekyllOptions {
                pygments: true,
                ..Default::default()
            })
            .build()
            .unwrap();
        let plan = FileTreeSynthesizer::plan(&config, &derived(), &sources()).unwrap();
        let d = dests(&plan);
        assert!(d.contains(&"app/_scss/screen.scss"));
        assert!(d.contains(&"app/_scss/syntax.scss"));
        assert!(!d.contains(&"app/css/screen.css"));
        assert!(!d.contains(&"app/css/syntax.css"));
        assert!(d.contains(&"app/css"));
    }

    #[test]
    fn boilerplate_without_icons_has_no_icon_files() {
        let config = ResolvedConfig::builder()
            .boilerplate(BoilerplateToggles::default())
            .build()
            .unwrap();
        let plan = FileTreeSynthesizer::plan(&config, &derived(), &sources()).unwrap();
        let d = dests(&plan);
        for file in ["app/.htaccess", "app/404.html", "app/crossdomain.xml", "app/robots.txt"] {
            assert!(d.contains(&file));
        }
        assert!(d.contains(&"app/_h5bp-docs/LICENSE.md"));
        assert!(!d.contains(&"app/favicon.ico"));
        assert!(!d.contains(&"app/apple-touch-icon-precomposed.png"));

        let icons: Vec<_> = plan.targeting("app/_includes/icons.html").collect();
        assert_eq!(icons.len(), 1);
        assert!(matches!(&icons[0].kind, OperationKind::Write { content } if content.is_empty()));
    }

    #[test]
    fn boilerplate_fallbacks_when_groups_off() {
        let config = ResolvedConfig::builder()
            .boilerplate(BoilerplateToggles {
                include_css: false,
                include_js: false,
                include_icons: false,
                include_docs: false,
                include_analytics: false,
            })
            .build()
            .unwrap();
        let plan = FileTreeSynthesizer::plan(&config, &derived(), &sources()).unwrap();
        assert!(plan.writes_to("app/css/main.css"));
        assert!(plan.writes_to("app/js/main.js"));
        assert!(plan.writes_to("app/_includes/scripts.html"));
        assert!(!plan.writes_to("app/css/normalize.css"));
        assert!(plan.iter().all(|op| !op.overridable));
    }

    #[test]
    fn coffee_starter_lands_in_preprocessor_dir() {
        let config = ResolvedConfig::builder()
            .js_preprocessor(JsPreprocessor::CoffeeScript)
            .build()
            .unwrap();
        let plan = FileTreeSynthesizer::plan(&config, &derived(), &sources()).unwrap();
        assert!(plan.writes_to("app/_coffee/app.coffee"));
    }

    #[test]
    fn missing_baseline_file_aborts_planning() {
        let mut baseline = FileCollection::new();
        for (path, bytes) in baseline_files().iter() {
            if path.as_str() != baseline::RSS_IMAGE {
                baseline.insert(path.clone(), bytes);
            }
        }
        let sources = SourceSet::new(bundled_files(), baseline);
        let config = ResolvedConfig::builder().build().unwrap();
        assert_eq!(
            FileTreeSynthesizer::plan(&config, &derived(), &sources).unwrap_err(),
            DomainError::SourceMissing {
                origin: "baseline",
                path: baseline::RSS_IMAGE.into()
            }
        );
    }

    #[test]
    fn boilerplate_without_release_is_unavailable() {
        let sources = SourceSet::new(bundled_files(), baseline_files());
        let config = ResolvedConfig::builder()
            .boilerplate(BoilerplateToggles::default())
            .build()
            .unwrap();
        assert!(matches!(
            FileTreeSynthesizer::plan(&config, &derived(), &sources),
            Err(DomainError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn shared_asset_directories_collide() {
        let config = ResolvedConfig::builder()
            .directories(crate::domain::entities::config::AssetDirectories {
                js: crate::domain::entities::common::AssetDir::parse("js_dir", "css").unwrap(),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert!(matches!(
            FileTreeSynthesizer::plan(&config, &derived(), &sources()),
            Err(DomainError::DestinationCollision { .. })
        ));
    }
}
