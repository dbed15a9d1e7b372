//! Integration tests for the `sitesmith` binary.

use std::{fs, path::Path};

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// A workspace with a pre-generated Jekyll project under `baseline/`.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let baseline = dir.path().join("baseline");
        write(&baseline, "_config.yml", "name: baseline\n");
        write(&baseline, "index.html", "---\nlayout: default\n---\n<h1>Posts</h1>\n");
        write(&baseline, "_layouts/default.html", "<html>{{ content }}</html>\n");
        write(&baseline, "_layouts/post.html", "---\nlayout: default\n---\n{{ content }}\n");
        write(
            &baseline,
            "_posts/2013-11-20-welcome-to-jekyll.markdown",
            "---\ntitle: Welcome\n---\nHello\n",
        );
        write(&baseline, "css/screen.css", "body { margin: 0; }\n");
        write(&baseline, "css/syntax.css", ".highlight { color: red; }\n");
        write(&baseline, "images/rss.png", "png");
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `sitesmith` run inside the workspace, isolated from any user config.
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo::cargo_bin_cmd!("sitesmith");
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .env("HOME", self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    fn new_site(&self, name: &str) -> assert_cmd::Command {
        let mut cmd = self.cmd();
        cmd.args(["new", name, "--baseline-dir", "baseline", "--skip-install", "-y"]);
        cmd
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    Workspace::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("prompts"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    Workspace::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn new_help_mentions_answer_sources() {
    Workspace::new()
        .cmd()
        .args(["new", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--answers"))
        .stdout(predicate::str::contains("--set"))
        .stdout(predicate::str::contains("--dry-run"));
}

// ── prompts ───────────────────────────────────────────────────────────────────

#[test]
fn prompts_json_lists_keys() {
    let output = Workspace::new()
        .cmd()
        .args(["prompts", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let keys: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["key"].as_str())
        .collect();
    assert_eq!(keys.first(), Some(&"css_dir"));
    assert!(keys.contains(&"template_type"));
    assert!(keys.contains(&"posts_per_page"));
}

// ── new ───────────────────────────────────────────────────────────────────────

#[test]
fn dry_run_writes_nothing() {
    let ws = Workspace::new();
    ws.new_site("blog")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gruntfile.js"))
        .stdout(predicate::str::contains("app/css/screen.css"));

    assert!(!ws.path().join("blog").exists());
}

#[test]
fn dry_run_json_reports_plan() {
    let ws = Workspace::new();
    let output = ws
        .new_site("blog")
        .args(["--dry-run", "--output-format", "json", "--set", "css_preprocessor=s"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["template_type"], "default");
    assert!(
        report["plugins"]
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p == "sass")
    );
}

#[test]
fn new_writes_a_site() {
    let ws = Workspace::new();
    ws.new_site("blog")
        .args(["--set", "author=Ada", "--set", "js_preprocessor=c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    let site = ws.path().join("blog");
    assert!(site.join("Gruntfile.js").is_file());
    assert!(site.join("package.json").is_file());
    assert!(site.join("_config.yml").is_file());
    assert!(site.join("app/_coffee/app.coffee").is_file());

    let package = fs::read_to_string(site.join("package.json")).unwrap();
    assert!(package.contains("\"name\": \"blog\""));
}

#[test]
fn answers_file_is_applied() {
    let ws = Workspace::new();
    write(
        ws.path(),
        "site.toml",
        "[directories]\ncss = \"styles\"\n\n[site]\nposts_per_page = 4\n",
    );

    ws.new_site("blog")
        .args(["--answers", "site.toml"])
        .assert()
        .success();

    let site = ws.path().join("blog");
    assert!(site.join("app/styles/screen.css").is_file());
    let config = fs::read_to_string(site.join("_config.yml")).unwrap();
    assert!(config.contains("paginate: 4"));
}

#[test]
fn populated_target_is_refused() {
    let ws = Workspace::new();
    write(ws.path(), "blog/notes.txt", "keep me\n");

    ws.new_site("blog")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        fs::read_to_string(ws.path().join("blog/notes.txt")).unwrap(),
        "keep me\n"
    );
}

#[test]
fn unknown_answer_key_is_a_user_error() {
    Workspace::new()
        .new_site("blog")
        .args(["--set", "colour=red"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("colour"));
}

#[test]
fn missing_answers_file_is_a_user_error() {
    Workspace::new()
        .new_site("blog")
        .args(["--answers", "nope.toml"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("nope.toml"));
}

#[test]
fn missing_baseline_dir_fails() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["new", "blog", "--baseline-dir", "nowhere", "--skip-install", "-y"])
        .assert()
        .failure();
    assert!(!ws.path().join("blog/Gruntfile.js").exists());
}

// ── config / init / completions ───────────────────────────────────────────────

#[test]
fn init_then_config_get() {
    let ws = Workspace::new();
    let config = ws.path().join("sitesmith.toml");

    ws.cmd()
        .args(["--config", config.to_str().unwrap(), "init"])
        .assert()
        .success();
    assert!(config.is_file());

    ws.cmd()
        .args(["--config", config.to_str().unwrap(), "config", "get", "baseline.command"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jekyll"));
}

#[test]
fn explicit_missing_config_exits_four() {
    Workspace::new()
        .cmd()
        .args(["--config", "absent.toml", "prompts"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn environment_overrides_config() {
    Workspace::new()
        .cmd()
        .env("SITESMITH_BASELINE__COMMAND", "jekyll-nightly")
        .args(["config", "get", "baseline.command"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jekyll-nightly"));
}

#[test]
fn completions_bash() {
    Workspace::new()
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sitesmith"));
}

// ── NO_COLOR ──────────────────────────────────────────────────────────────────

#[test]
fn no_color_accepts_conventional_values() {
    for value in ["1", "yes", "anything", "0", ""] {
        Workspace::new()
            .cmd()
            .env("NO_COLOR", value)
            .args(["prompts", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("css_dir"));
    }
}

#[test]
fn no_color_output_has_no_escape_codes() {
    Workspace::new()
        .cmd()
        .env("NO_COLOR", "1")
        .args(["--output-format", "human", "prompts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}
