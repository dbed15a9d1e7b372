//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates one synthesis run:
//! 1. Re-validate the resolved configuration and the target directory
//! 2. Gather sources (bundled templates, baseline, boilerplate release)
//! 3. Synthesize and verify the build graph and the file plan
//! 4. Materialize every operation's bytes
//! 5. Write to the filesystem and install dependencies
//!
//! Steps 1 to 4 never touch the target, so a dry run is just [`ScaffoldService::plan`].

use std::path::{Path, PathBuf};
use std::thread;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    VERSION,
    application::{
        ApplicationError,
        ports::{
            BaselineGenerator, BoilerplateFetcher, DependencyInstaller, Filesystem,
            TemplateEngine, TemplateSource, WriteMode,
        },
        services::TemplateComposer,
    },
    domain::{
        BOILERPLATE_VERSION, BuildPipelineSynthesizer, BuildTaskGraph, DerivedContext,
        DomainValidator as validator, FileCollection, FilePlan, FileTreeSynthesizer,
        OperationKind, RelativePath, RenderContext, ResolvedConfig, SourceSet, TemplateType,
    },
    error::SitesmithResult,
};

/// Everything one run needs besides the ports.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub config: ResolvedConfig,
    /// Site name; lands in `package.json`, `_config.yml` and the README.
    pub app_name: String,
    /// Project root. Must be absent or an empty directory.
    pub target: PathBuf,
    /// Captured once by the caller; post file names and templates use it.
    pub date: NaiveDate,
    pub skip_install: bool,
}

/// Bytes ready to be written at one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Materialized {
    Directory,
    File { content: Vec<u8>, mode: WriteMode },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub destination: RelativePath,
    pub content: Materialized,
}

/// A fully materialized run, not yet written.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub target: PathBuf,
    pub template_type: TemplateType,
    pub graph: BuildTaskGraph,
    pub operations: FilePlan,
    pub entries: Vec<PlannedEntry>,
}

impl ScaffoldPlan {
    /// Report for a plan that was not written.
    pub fn summary(&self) -> ScaffoldReport {
        let mut report = ScaffoldReport {
            target: self.target.clone(),
            template_type: self.template_type.as_str().to_string(),
            directories: 0,
            files: 0,
            overrides: 0,
            tasks: self.graph.tasks().iter().map(|t| t.name.clone()).collect(),
            plugins: self.graph.plugins().into_iter().map(String::from).collect(),
            installed: false,
            dry_run: true,
        };
        for entry in &self.entries {
            match &entry.content {
                Materialized::Directory => report.directories += 1,
                Materialized::File {
                    mode: WriteMode::Overwrite,
                    ..
                } => report.overrides += 1,
                Materialized::File { .. } => report.files += 1,
            }
        }
        report
    }

    /// Destinations in write order.
    pub fn destinations(&self) -> impl Iterator<Item = &RelativePath> {
        self.entries.iter().map(|e| &e.destination)
    }
}

/// Outcome of a run, printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub target: PathBuf,
    pub template_type: String,
    pub directories: usize,
    /// Files written once.
    pub files: usize,
    /// Files written over an earlier placeholder.
    pub overrides: usize,
    pub tasks: Vec<String>,
    pub plugins: Vec<String>,
    pub installed: bool,
    pub dry_run: bool,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    engine: Box<dyn TemplateEngine>,
    templates: Box<dyn TemplateSource>,
    baseline: Box<dyn BaselineGenerator>,
    boilerplate: Box<dyn BoilerplateFetcher>,
    installer: Option<Box<dyn DependencyInstaller>>,
    boilerplate_version: String,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// No installer is attached; see [`with_installer`](Self::with_installer).
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        engine: Box<dyn TemplateEngine>,
        templates: Box<dyn TemplateSource>,
        baseline: Box<dyn BaselineGenerator>,
        boilerplate: Box<dyn BoilerplateFetcher>,
    ) -> Self {
        Self {
            filesystem,
            engine,
            templates,
            baseline,
            boilerplate,
            installer: None,
            boilerplate_version: BOILERPLATE_VERSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_installer(mut self, installer: Box<dyn DependencyInstaller>) -> Self {
        self.installer = Some(installer);
        self
    }

    /// Fetch a release other than the pinned one.
    #[must_use]
    pub fn with_boilerplate_version(mut self, version: impl Into<String>) -> Self {
        self.boilerplate_version = version.into();
        self
    }

    /// Scaffold a new site.
    #[instrument(
        skip_all,
        fields(
            app = %request.app_name,
            target = %request.target.display(),
            template = %request.config.template_type()
        )
    )]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> SitesmithResult<ScaffoldReport> {
        let plan = self.plan(request)?;

        self.write(&plan)?;
        info!(entries = plan.entries.len(), "Project tree written");

        let mut report = plan.summary();
        report.dry_run = false;

        if !request.skip_install {
            if let Some(installer) = &self.installer {
                info!("Installing dependencies");
                installer.install(&plan.target)?;
                report.installed = true;
            }
        }

        info!("Scaffold completed successfully");
        Ok(report)
    }

    /// Everything up to, but not including, the first write.
    #[instrument(skip_all, fields(app = %request.app_name))]
    pub fn plan(&self, request: &ScaffoldRequest) -> SitesmithResult<ScaffoldPlan> {
        let config = &request.config;

        // 1. Validate
        validator::validate_app_name(&request.app_name)?;
        validator::validate_config(config)?;
        self.check_target(&request.target)?;

        // 2. Sources
        let sources = self.gather_sources(config.template_type())?;

        // 3. Synthesize
        let graph = BuildPipelineSynthesizer::synthesize(config);
        validator::validate_graph(&graph, config)?;
        debug!(tasks = graph.tasks().len(), "Build graph verified");

        let derived = DerivedContext {
            app_name: request.app_name.clone(),
            date: request.date,
            generator_name: "sitesmith".into(),
            generator_version: VERSION.into(),
            boilerplate_version: self.boilerplate_version.clone(),
        };
        let operations = FileTreeSynthesizer::plan(config, &derived, &sources)?;
        info!(operations = operations.len(), "File plan verified");

        // 4. Materialize
        let context = RenderContext::for_site(config, &derived, &graph);
        let composer = TemplateComposer::new(self.engine.as_ref(), &context);
        let entries = materialize(&operations, &sources, &composer)?;

        Ok(ScaffoldPlan {
            target: request.target.clone(),
            template_type: config.template_type(),
            graph,
            operations,
            entries,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn check_target(&self, target: &Path) -> SitesmithResult<()> {
        if self.filesystem.exists(target) && !self.filesystem.is_empty_dir(target)? {
            return Err(ApplicationError::ProjectExists {
                path: target.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    /// The boilerplate fetch runs beside baseline generation and is joined
    /// before planning.
    fn gather_sources(&self, template: TemplateType) -> SitesmithResult<SourceSet> {
        let bundled = self.templates.load()?;
        debug!(files = bundled.len(), "Bundled templates loaded");

        let fetcher = self.boilerplate.as_ref();
        let version = self.boilerplate_version.as_str();

        let (baseline, release) = thread::scope(|scope| {
            let fetch = (template == TemplateType::Boilerplate).then(|| {
                info!(version, "Fetching HTML5 Boilerplate");
                scope.spawn(move || fetcher.fetch(version))
            });

            info!("Generating baseline Jekyll project");
            let baseline = self.baseline.generate();

            let release = fetch
                .map(|handle| {
                    handle.join().map_err(|_| ApplicationError::TaskPanicked {
                        task: "boilerplate fetch",
                    })
                })
                .transpose();
            (baseline, release)
        });

        let baseline: FileCollection = baseline?;
        debug!(files = baseline.len(), "Baseline generated");

        let mut sources = SourceSet::new(bundled, baseline);
        if let Some(release) = release?.transpose()? {
            debug!(files = release.len(), "Boilerplate fetched");
            sources = sources.with_boilerplate(release);
        }
        Ok(sources)
    }

    fn write(&self, plan: &ScaffoldPlan) -> SitesmithResult<()> {
        self.filesystem.create_dir_all(&plan.target)?;

        for entry in &plan.entries {
            let path = entry.destination.to_path_under(&plan.target);
            match &entry.content {
                Materialized::Directory => self.filesystem.create_dir_all(&path)?,
                Materialized::File { content, mode } => {
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    self.filesystem.write_file(&path, content, *mode)?;
                }
            }
        }

        Ok(())
    }
}

fn materialize(
    operations: &FilePlan,
    sources: &SourceSet,
    composer: &TemplateComposer<'_>,
) -> SitesmithResult<Vec<PlannedEntry>> {
    operations
        .iter()
        .map(|op| {
            let mode = if op.overridable {
                WriteMode::Overwrite
            } else {
                WriteMode::CreateNew
            };
            let content = match &op.kind {
                OperationKind::Mkdir => Materialized::Directory,
                OperationKind::Copy { source } => Materialized::File {
                    content: sources.require(source)?.to_vec(),
                    mode,
                },
                OperationKind::Template { source } => Materialized::File {
                    content: composer.render(source, sources.require(source)?)?,
                    mode,
                },
                OperationKind::Write { content } => Materialized::File {
                    content: content.clone(),
                    mode,
                },
            };
            Ok(PlannedEntry {
                destination: op.destination.clone(),
                content,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::output::{
            MockBaselineGenerator, MockBoilerplateFetcher, MockDependencyInstaller,
            MockFilesystem, MockTemplateEngine, MockTemplateSource,
        },
        domain::{
            BoilerplateToggles, DomainError,
            file_tree::{baseline, bundled},
        },
        error::{ErrorCategory, SitesmithError},
    };
    use mockall::predicate::eq;

    fn bundled_files() -> FileCollection {
        let mut c = FileCollection::new();
        for path in bundled::ROOT_TEMPLATES.iter().chain(bundled::DOTFILES) {
            c = c.with_file(path, "{{ app_name }}");
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
            c = c.with_file(path, "{{ app_name }}");
        }
        c
    }

    fn baseline_files() -> FileCollection {
        FileCollection::new()
            .with_file("_posts/2024-05-01-welcome-to-jekyll.markdown", "post")
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
    }

    fn request(config: ResolvedConfig) -> ScaffoldRequest {
        ScaffoldRequest {
            config,
            app_name: "blog".into(),
            target: PathBuf::from("/work/blog"),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            skip_install: false,
        }
    }

    fn echo_engine() -> MockTemplateEngine {
        let mut engine = MockTemplateEngine::new();
        engine
            .expect_render()
            .returning(|name, _, _| Ok(format!("rendered {name}")));
        engine
    }

    fn templates() -> MockTemplateSource {
        let mut templates = MockTemplateSource::new();
        templates.expect_load().returning(|| Ok(bundled_files()));
        templates
    }

    fn baseline_ok() -> MockBaselineGenerator {
        let mut baseline = MockBaselineGenerator::new();
        baseline.expect_generate().returning(|| Ok(baseline_files()));
        baseline
    }

    fn fresh_target() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs
    }

    fn service(
        fs: MockFilesystem,
        baseline: MockBaselineGenerator,
        fetcher: MockBoilerplateFetcher,
    ) -> ScaffoldService {
        ScaffoldService::new(
            Box::new(fs),
            Box::new(echo_engine()),
            Box::new(templates()),
            Box::new(baseline),
            Box::new(fetcher),
        )
    }

    #[test]
    fn plan_renders_templates_and_copies_sources() {
        let mut fetcher = MockBoilerplateFetcher::new();
        fetcher.expect_fetch().never();

        let svc = service(fresh_target(), baseline_ok(), fetcher);
        let plan = svc
            .plan(&request(ResolvedConfig::builder().build().unwrap()))
            .unwrap();

        let file = |dest: &str| {
            plan.entries
                .iter()
                .find(|e| e.destination.as_str() == dest)
                .map(|e| e.content.clone())
        };
        assert_eq!(
            file("Gemfile"),
            Some(Materialized::File {
                content: b"rendered bundled:Gemfile".to_vec(),
                mode: WriteMode::CreateNew
            })
        );
        assert_eq!(
            file("app/_posts/2024-05-01-welcome-to-jekyll.md"),
            Some(Materialized::File {
                content: b"post".to_vec(),
                mode: WriteMode::CreateNew
            })
        );
        assert_eq!(file("app"), Some(Materialized::Directory));

        let summary = plan.summary();
        assert!(summary.dry_run);
        assert_eq!(summary.overrides, 0);
        assert!(summary.tasks.iter().any(|t| t == "build"));
    }

    #[test]
    fn non_empty_target_is_rejected_before_sources_are_touched() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_is_empty_dir().returning(|_| Ok(false));

        let mut baseline = MockBaselineGenerator::new();
        baseline.expect_generate().never();

        let svc = service(fs, baseline, MockBoilerplateFetcher::new());
        let err = svc
            .plan(&request(ResolvedConfig::builder().build().unwrap()))
            .unwrap_err();
        assert!(matches!(
            err,
            SitesmithError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn baseline_failure_aborts_before_planning() {
        let mut baseline = MockBaselineGenerator::new();
        baseline.expect_generate().returning(|| {
            Err(ApplicationError::ExternalProcess {
                command: "jekyll new".into(),
                reason: "not found".into(),
            }
            .into())
        });

        let mut fs = fresh_target();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let svc = service(fs, baseline, MockBoilerplateFetcher::new());
        let err = svc
            .scaffold(&request(ResolvedConfig::builder().build().unwrap()))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ExternalProcess);
    }

    #[test]
    fn boilerplate_is_fetched_at_configured_version() {
        let mut fetcher = MockBoilerplateFetcher::new();
        fetcher
            .expect_fetch()
            .with(eq("4.3.0"))
            .times(1)
            .returning(|_| Ok(h5bp_files()));

        let config = ResolvedConfig::builder()
            .boilerplate(BoilerplateToggles::default())
            .build()
            .unwrap();
        let svc = service(fresh_target(), baseline_ok(), fetcher);
        let plan = svc.plan(&request(config)).unwrap();

        assert!(plan.destinations().any(|d| d.as_str() == "app/.htaccess"));
        // scripts.html placeholder plus its override
        assert_eq!(plan.summary().overrides, 1);
    }

    #[test]
    fn missing_boilerplate_path_writes_nothing() {
        let mut fetcher = MockBoilerplateFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|_| Ok(FileCollection::new().with_file("LICENSE.md", "")));

        let mut fs = fresh_target();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let config = ResolvedConfig::builder()
            .boilerplate(BoilerplateToggles::default())
            .build()
            .unwrap();
        let err = service(fs, baseline_ok(), fetcher)
            .scaffold(&request(config))
            .unwrap_err();
        assert!(matches!(
            err,
            SitesmithError::Domain(DomainError::RequiredPathMissing { .. })
        ));
    }

    #[test]
    fn scaffold_writes_in_plan_order_and_installs() {
        let mut fs = fresh_target();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|_, _, mode| *mode == WriteMode::CreateNew)
            .returning(|_, _, _| Ok(()));

        let mut installer = MockDependencyInstaller::new();
        installer
            .expect_install()
            .withf(|root| root == Path::new("/work/blog"))
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(fs, baseline_ok(), MockBoilerplateFetcher::new())
            .with_installer(Box::new(installer));
        let report = svc
            .scaffold(&request(ResolvedConfig::builder().build().unwrap()))
            .unwrap();

        assert!(report.installed);
        assert!(!report.dry_run);
        assert!(report.files > 0);
    }

    #[test]
    fn skip_install_leaves_installer_untouched() {
        let mut fs = fresh_target();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _, _| Ok(()));

        let mut installer = MockDependencyInstaller::new();
        installer.expect_install().never();

        let svc = service(fs, baseline_ok(), MockBoilerplateFetcher::new())
            .with_installer(Box::new(installer));
        let mut req = request(ResolvedConfig::builder().build().unwrap());
        req.skip_install = true;
        assert!(!svc.scaffold(&req).unwrap().installed);
    }

    #[test]
    fn invalid_app_name_is_a_validation_error() {
        let svc = service(
            MockFilesystem::new(),
            MockBaselineGenerator::new(),
            MockBoilerplateFetcher::new(),
        );
        let mut req = request(ResolvedConfig::builder().build().unwrap());
        req.app_name = "a/b".into();
        assert_eq!(
            svc.plan(&req).unwrap_err().category(),
            ErrorCategory::Validation
        );
    }
}
