//! Implementation of the `sitesmith new` command.
//!
//! Responsibility: gather raw answers from every front end, resolve them,
//! wire the adapters and call the core scaffold service. No synthesis logic
//! lives here.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, info_span, instrument};
use uuid::Uuid;

use sitesmith_adapters::{
    CommandInstaller, DirectoryBaseline, DirectoryBoilerplate, DirectoryTemplates,
    EmbeddedTemplates, HttpBoilerplateFetcher, JekyllBaseline, LocalFilesystem, MiniJinjaEngine,
};
use sitesmith_core::{
    application::{ScaffoldReport, ScaffoldRequest, ScaffoldService},
    domain::{ConfigResolver, RawAnswers, ResolvedConfig, SiteSettings},
    error::SitesmithError,
    prelude::{BaselineGenerator, BoilerplateFetcher, TemplateSource},
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt,
};

/// Execute the `sitesmith new` command.
///
/// 1. Work out the target directory and site name
/// 2. Layer answers: config defaults, `--answers`, `--set`, then prompts
/// 3. Resolve them into a `ResolvedConfig`
/// 4. Confirm unless `--yes`, `--quiet`, `--dry-run` or JSON output
/// 5. Plan (dry run) or scaffold via `ScaffoldService`
#[instrument(skip_all, fields(name = args.name.as_deref().unwrap_or(".")))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let cwd = std::env::current_dir()?;
    let (app_name, target) = resolve_target(&cwd, args.name.as_deref())?;

    let mut answers = gather_answers(&args, &config)?;
    if args.interactive {
        answers = prompt::ask(&answers)?;
    }
    debug!(answers = answers.len(), "Answers gathered");

    let resolved = ConfigResolver::resolve(&answers).map_err(SitesmithError::from)?;

    let unattended = args.yes || args.dry_run || global.quiet || output.is_json();
    if !unattended {
        show_configuration(&resolved, &app_name, &target, &output)?;
        if !prompt::confirm("Continue?")? {
            return Err(CliError::Cancelled);
        }
    }

    let service = build_service(&args, &config);
    let request = ScaffoldRequest {
        config: resolved,
        app_name: app_name.clone(),
        target: target.clone(),
        date: Local::now().date_naive(),
        skip_install: args.skip_install || !config.install.enabled,
    };

    let run_id = Uuid::new_v4();
    let _run = info_span!("run", %run_id).entered();

    if args.dry_run {
        let plan = service.plan(&request)?;
        let report = plan.summary();
        if output.is_json() {
            output.json(&report)?;
        } else {
            output.info(&format!(
                "Dry run: would create '{app_name}' at {}",
                target.display()
            ))?;
            for destination in plan.destinations() {
                output.print(&format!("  {destination}"))?;
            }
            print_report(&report, &output)?;
        }
        return Ok(());
    }

    output.header(&format!("Creating '{app_name}'..."))?;
    info!(app = %app_name, path = %target.display(), "Scaffold started");

    let spinner = output.spinner("Generating site");
    let result = service.scaffold(&request);
    spinner.finish_and_clear();
    let report = result?;

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    output.success(&format!("Site '{app_name}' created at {}", target.display()))?;
    print_report(&report, &output)?;
    output.print("")?;
    output.print("Next steps:")?;
    if args.name.is_some() {
        output.print(&format!("  cd {}", target.display()))?;
    }
    if !report.installed {
        output.print("  npm install && bower install")?;
    }
    output.print("  grunt serve")?;

    Ok(())
}

// ── Target ────────────────────────────────────────────────────────────────────

/// `(site name, project root)`.  Without a name the current directory is the
/// root and its file name is the site name.
pub fn resolve_target(cwd: &Path, name: Option<&str>) -> CliResult<(String, PathBuf)> {
    let target = match name {
        Some(name) => cwd.join(name),
        None => cwd.to_path_buf(),
    };

    let app_name = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidInput {
            message: format!("cannot derive a site name from '{}'", target.display()),
        })?
        .to_string();

    Ok((app_name, target))
}

// ── Answers ───────────────────────────────────────────────────────────────────

/// Config `defaults`, then the answers file, then `--set`.
fn gather_answers(args: &NewArgs, config: &AppConfig) -> CliResult<RawAnswers> {
    let mut answers = config.default_answers();

    if let Some(path) = &args.answers {
        let settings = read_settings(path)?;
        answers = answers.merged_with(&settings.to_answers());
    }

    let overrides: RawAnswers = args
        .set
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    Ok(answers.merged_with(&overrides))
}

fn read_settings(path: &Path) -> CliResult<SiteSettings> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::AnswersFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    toml::from_str(&text).map_err(|e| CliError::AnswersFile {
        path: path.to_path_buf(),
        reason: e.message().to_string(),
    })
}

// ── Wiring ────────────────────────────────────────────────────────────────────

/// Flags win over config-file paths; without either the real sources are
/// used (`jekyll new`, the boilerplate download, the bundled templates).
fn build_service(args: &NewArgs, config: &AppConfig) -> ScaffoldService {
    let baseline: Box<dyn BaselineGenerator> =
        match args.baseline_dir.as_ref().or(config.baseline.local_path.as_ref()) {
            Some(dir) => Box::new(DirectoryBaseline::new(dir)),
            None => Box::new(JekyllBaseline::new(
                config.baseline.command.clone(),
                config.baseline.args.clone(),
            )),
        };

    let boilerplate: Box<dyn BoilerplateFetcher> = match args
        .boilerplate_dir
        .as_ref()
        .or(config.boilerplate.local_path.as_ref())
    {
        Some(dir) => Box::new(DirectoryBoilerplate::new(dir)),
        None => Box::new(HttpBoilerplateFetcher::new(
            config.boilerplate.archive_url.clone(),
        )),
    };

    let templates: Box<dyn TemplateSource> =
        match args.templates_dir.as_ref().or(config.templates.local_path.as_ref()) {
            Some(dir) => Box::new(DirectoryTemplates::new(dir)),
            None => Box::new(EmbeddedTemplates::new()),
        };

    ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(MiniJinjaEngine::new()),
        templates,
        baseline,
        boilerplate,
    )
    .with_installer(Box::new(CommandInstaller::new(config.install.commands.clone())))
    .with_boilerplate_version(config.boilerplate.version.clone())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    config: &ResolvedConfig,
    name: &str,
    target: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Site:             {name}"))?;
    out.print(&format!("  Location:         {}", target.display()))?;
    out.print(&format!("  Template:         {}", config.template_type()))?;
    out.print(&format!(
        "  Directories:      css={} js={} img={} fonts={}",
        config.css_dir(),
        config.js_dir(),
        config.img_dir(),
        config.font_dir()
    ))?;
    out.print(&format!(
        "  CSS preprocessor: {}",
        describe(config.css_preprocessor().as_str(), config.css_preprocessor_dir())
    ))?;
    out.print(&format!(
        "  JS preprocessor:  {}",
        describe(config.js_preprocessor().as_str(), config.js_preprocessor_dir())
    ))?;
    out.print("")?;
    Ok(())
}

fn describe(name: &str, dir: Option<&impl std::fmt::Display>) -> String {
    match dir {
        Some(dir) => format!("{name} (app/{dir})"),
        None => name.to_string(),
    }
}

fn print_report(report: &ScaffoldReport, out: &OutputManager) -> CliResult<()> {
    out.print(&format!(
        "  {} directories, {} files, {} overrides",
        report.directories, report.files, report.overrides
    ))?;
    out.print(&format!("  Grunt plugins: {}", report.plugins.join(", ")))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
