//! Configuration -> [`BuildTaskGraph`].
//!
//! The graph is a pure function of the [`ResolvedConfig`]. A disabled
//! preprocessor contributes no node, no watch target and no dependency
//! edge, so nothing can point at it.

use crate::domain::entities::{
    build_graph::{BuildTaskGraph, Glob, GlobBase, Task, WatchTarget},
    config::{DirKey, ResolvedConfig},
};
use crate::domain::value_objects::{CssPreprocessor, JsPreprocessor};

const IMAGE_GLOB: &str = "**/*.{gif,jpg,jpeg,png,svg,webp}";

/// Steps `build` runs after the concurrent compile/copy stage, in order.
const BUILD_TAIL: &[&str] = &[
    "useminPrepare",
    "concat",
    "cssmin",
    "uglify",
    "imagemin",
    "svgmin",
    "htmlmin",
    "rev",
    "usemin",
];

/// Stateless synthesizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildPipelineSynthesizer;

impl BuildPipelineSynthesizer {
    pub fn synthesize(config: &ResolvedConfig) -> BuildTaskGraph {
        let compilers = compilers(config);
        let compile = |target: &str| -> Vec<String> {
            compilers
                .iter()
                .map(|plugin| format!("{plugin}:{target}"))
                .collect()
        };

        let mut tasks: Vec<Task> = Vec::new();

        for name in [
            "clean:server",
            "clean:dist",
            "jekyll:server",
            "jekyll:dist",
            "copy:stageCss",
            "copy:stageJs",
            "copy:dist",
            "connect:livereload",
            "connect:dist",
            "open",
            "watch",
            "jshint:report",
            "csscss:report",
            "csslint:report",
        ] {
            tasks.push(Task::step(name));
        }
        tasks.extend(BUILD_TAIL.iter().map(|name| Task::step(*name)));
        for plugin in &compilers {
            tasks.push(Task::compile(format!("{plugin}:server")));
            tasks.push(Task::compile(format!("{plugin}:dist")));
        }

        let concurrent_server = [
            compile("server"),
            owned(&["copy:stageCss", "jekyll:server"]),
        ]
        .concat();
        let concurrent_dist = [
            compile("dist"),
            owned(&["copy:stageCss", "copy:stageJs", "copy:dist"]),
        ]
        .concat();
        tasks.push(Task::concurrent("concurrent:server", concurrent_server));
        tasks.push(Task::concurrent("concurrent:dist", concurrent_dist));

        tasks.push(Task::aggregate(
            "serve",
            owned(&[
                "clean:server",
                "concurrent:server",
                "connect:livereload",
                "open",
                "watch",
            ]),
        ));
        tasks.push(Task::aggregate(
            "build",
            [
                owned(&["clean:dist", "jekyll:dist", "concurrent:dist"]),
                owned(BUILD_TAIL),
            ]
            .concat(),
        ));
        tasks.push(Task::aggregate(
            "report",
            [
                owned(&["clean:server"]),
                compile("server"),
                owned(&["jshint:report", "csscss:report", "csslint:report"]),
            ]
            .concat(),
        ));
        tasks.push(Task::aggregate("default", owned(&["report", "build"])));

        BuildTaskGraph::new(tasks, watches(config))
    }
}

fn css_plugin(config: &ResolvedConfig) -> Option<&'static str> {
    match config.css_preprocessor() {
        CssPreprocessor::None => None,
        CssPreprocessor::Sass => Some("sass"),
        CssPreprocessor::Compass => Some("compass"),
    }
}

fn js_plugin(config: &ResolvedConfig) -> Option<&'static str> {
    match config.js_preprocessor() {
        JsPreprocessor::None => None,
        JsPreprocessor::CoffeeScript => Some("coffee"),
    }
}

/// Enabled compile plugins, css first.
fn compilers(config: &ResolvedConfig) -> Vec<&'static str> {
    css_plugin(config).into_iter().chain(js_plugin(config)).collect()
}

fn watches(config: &ResolvedConfig) -> Vec<WatchTarget> {
    let mut watches = Vec::new();

    if let Some(plugin) = css_plugin(config) {
        watches.push(WatchTarget {
            name: plugin.to_string(),
            globs: vec![Glob::new(
                GlobBase::App,
                Some(DirKey::CssPre),
                "**/*.{scss,sass}",
            )],
            tasks: vec![format!("{plugin}:server")],
            livereload: false,
        });
    }

    if let Some(plugin) = js_plugin(config) {
        watches.push(WatchTarget {
            name: plugin.to_string(),
            globs: vec![Glob::new(GlobBase::App, Some(DirKey::JsPre), "**/*.coffee")],
            tasks: vec![format!("{plugin}:server")],
            livereload: false,
        });
    }

    watches.push(WatchTarget {
        name: "stageCss".into(),
        globs: vec![Glob::new(GlobBase::App, Some(DirKey::Css), "**/*.css")],
        tasks: vec!["copy:stageCss".into()],
        livereload: false,
    });

    watches.push(WatchTarget {
        name: "jekyll".into(),
        globs: vec![
            Glob::new(GlobBase::App, None, "**/*.{html,yml,md,mkd,markdown}"),
            Glob::new(GlobBase::App, None, "bower_components").negated(),
        ],
        tasks: vec!["jekyll:server".into()],
        livereload: false,
    });

    watches.push(WatchTarget {
        name: "livereload".into(),
        globs: vec![
            Glob::new(GlobBase::Jekyll, None, "**/*.html"),
            Glob::new(GlobBase::AppOrTmp, Some(DirKey::Css), "**/*.css"),
            Glob::new(GlobBase::AppOrTmp, Some(DirKey::Js), "**/*.js"),
            Glob::new(GlobBase::App, Some(DirKey::Img), IMAGE_GLOB),
        ],
        tasks: Vec::new(),
        livereload: true,
    });

    watches
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::build_graph::TaskKind;

    fn config(css: CssPreprocessor, js: JsPreprocessor) -> ResolvedConfig {
        ResolvedConfig::builder()
            .css_preprocessor(css)
            .js_preprocessor(js)
            .build()
            .unwrap()
    }

    fn mentions(graph: &BuildTaskGraph, needle: &str) -> bool {
        graph
            .tasks()
            .iter()
            .any(|t| t.name.contains(needle) || t.depends_on.iter().any(|d| d.contains(needle)))
            || graph.watches().iter().any(|w| {
                w.name.contains(needle) || w.tasks.iter().any(|t| t.contains(needle))
            })
    }

    #[test]
    fn plain_site_has_no_compile_nodes() {
        let cfg = config(CssPreprocessor::None, JsPreprocessor::None);
        let graph = BuildPipelineSynthesizer::synthesize(&cfg);
        graph.verify(&cfg).unwrap();
        for plugin in ["sass", "compass", "coffee"] {
            assert!(!mentions(&graph, plugin), "{plugin} leaked into the graph");
        }
        assert!(graph.tasks().iter().all(|t| t.kind != TaskKind::Compile));
    }

    #[test]
    fn sass_joins_serve_build_and_watch() {
        let cfg = config(CssPreprocessor::Sass, JsPreprocessor::None);
        let graph = BuildPipelineSynthesizer::synthesize(&cfg);
        graph.verify(&cfg).unwrap();
        assert!(graph.expand("serve").contains(&"sass:server"));
        assert!(graph.expand("build").contains(&"sass:dist"));
        let watch = graph.watches().iter().find(|w| w.name == "sass").unwrap();
        assert_eq!(watch.tasks, ["sass:server"]);
        assert!(!mentions(&graph, "compass"));
    }

    #[test]
    fn coffee_joins_serve_and_build() {
        let cfg = config(CssPreprocessor::Compass, JsPreprocessor::CoffeeScript);
        let graph = BuildPipelineSynthesizer::synthesize(&cfg);
        graph.verify(&cfg).unwrap();
        let serve = graph.expand("serve");
        assert!(serve.contains(&"compass:server"));
        assert!(serve.contains(&"coffee:server"));
        assert!(graph.expand("build").contains(&"coffee:dist"));
        assert!(graph.plugins().contains("coffee"));
    }

    #[test]
    fn build_order_is_fixed() {
        let cfg = config(CssPreprocessor::Sass, JsPreprocessor::CoffeeScript);
        let graph = BuildPipelineSynthesizer::synthesize(&cfg);
        let build = graph.expand("build");
        let pos = |name: &str| build.iter().position(|s| *s == name).unwrap();
        assert_eq!(build[0], "clean:dist");
        assert_eq!(build[1], "jekyll:dist");
        assert!(pos("sass:dist") < pos("copy:dist"));
        assert!(pos("coffee:dist") < pos("copy:dist"));
        assert!(pos("copy:dist") < pos("cssmin"));
        assert!(pos("htmlmin") < pos("rev"));
        assert_eq!(*build.last().unwrap(), "usemin");
    }

    #[test]
    fn default_runs_report_then_build() {
        let cfg = config(CssPreprocessor::None, JsPreprocessor::None);
        let graph = BuildPipelineSynthesizer::synthesize(&cfg);
        let all = graph.expand("default");
        assert_eq!(all[0], "clean:server");
        assert!(all.contains(&"csslint:report"));
        assert!(all.ends_with(&["rev", "usemin"]));
    }
}
