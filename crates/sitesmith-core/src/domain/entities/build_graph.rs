//! The build-task graph behind the generated `Gruntfile.js`.
//!
//! Nodes are named grunt tasks (`plugin:target` or a registered alias),
//! each with an ordered dependency list. Watch targets pair glob sets
//! with the tasks they trigger. Globs name directories through [`DirKey`]
//! rather than literal paths, so [`BuildTaskGraph::verify`] can prove that
//! none points at a directory the configuration does not have.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use super::config::{DirKey, ResolvedConfig};
use crate::domain::error::DomainError;

// ── Tasks ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// A single plugin target such as `clean:dist` or `usemin`.
    Step,
    /// A preprocessor compile target (`sass:*`, `compass:*`, `coffee:*`).
    Compile,
    /// A `grunt-concurrent` target; its dependencies run in parallel.
    Concurrent,
    /// A registered alias (`build`, `serve`); dependencies run in order.
    Aggregate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub kind: TaskKind,
    pub depends_on: Vec<String>,
}

impl Task {
    pub fn step(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TaskKind::Step,
            depends_on: Vec::new(),
        }
    }

    pub fn compile(name: impl Into<String>) -> Self {
        Self {
            kind: TaskKind::Compile,
            ..Self::step(name)
        }
    }

    pub fn concurrent(name: impl Into<String>, depends_on: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: TaskKind::Concurrent,
            depends_on,
        }
    }

    pub fn aggregate(name: impl Into<String>, depends_on: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: TaskKind::Aggregate,
            depends_on,
        }
    }

    /// Grunt plugin providing this task, if any. Registered aliases have none.
    pub fn plugin(&self) -> Option<&str> {
        match self.kind {
            TaskKind::Aggregate => None,
            TaskKind::Concurrent => Some("concurrent"),
            TaskKind::Step | TaskKind::Compile => self.name.split(':').next(),
        }
    }

    /// Target part of `plugin:target`.
    pub fn target(&self) -> Option<&str> {
        self.name.split_once(':').map(|(_, target)| target)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, TaskKind::Step | TaskKind::Compile)
    }
}

// ── Globs ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobBase {
    /// `<%= yeoman.app %>`
    App,
    /// `.tmp`
    Tmp,
    /// `.jekyll`
    Jekyll,
    /// `{.tmp,<%= yeoman.app %>}`
    AppOrTmp,
}

impl GlobBase {
    const fn grunt(self) -> &'static str {
        match self {
            Self::App => "<%= yeoman.app %>",
            Self::Tmp => ".tmp",
            Self::Jekyll => ".jekyll",
            Self::AppOrTmp => "{.tmp,<%= yeoman.app %>}",
        }
    }

    const fn literal(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Tmp => ".tmp",
            Self::Jekyll => ".jekyll",
            Self::AppOrTmp => "{.tmp,app}",
        }
    }
}

/// A watch glob rooted at a base and an optional configured directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Glob {
    pub base: GlobBase,
    pub dir: Option<DirKey>,
    pub pattern: &'static str,
    pub negated: bool,
}

impl Glob {
    pub const fn new(base: GlobBase, dir: Option<DirKey>, pattern: &'static str) -> Self {
        Self {
            base,
            dir,
            pattern,
            negated: false,
        }
    }

    #[must_use]
    pub const fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    /// Render with grunt template placeholders, as written into the Gruntfile.
    pub fn render(&self) -> String {
        let dir = self
            .dir
            .map(|key| format!("/<%= yeoman.{} %>", key.grunt_name()));
        self.join(self.base.grunt(), dir.as_deref())
    }

    /// Render with the configured directory names substituted.
    pub fn resolve(&self, config: &ResolvedConfig) -> Option<String> {
        let dir = match self.dir {
            Some(key) => Some(format!("/{}", config.dir(key)?)),
            None => None,
        };
        Some(self.join(self.base.literal(), dir.as_deref()))
    }

    fn join(&self, base: &str, dir: Option<&str>) -> String {
        let bang = if self.negated { "!" } else { "" };
        let dir = dir.unwrap_or("");
        if self.pattern.is_empty() {
            format!("{bang}{base}{dir}")
        } else {
            format!("{bang}{base}{dir}/{}", self.pattern)
        }
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub name: String,
    pub globs: Vec<Glob>,
    /// Tasks run when a glob matches. Empty for the live-reload target.
    pub tasks: Vec<String>,
    pub livereload: bool,
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Ordered task nodes plus watch targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildTaskGraph {
    tasks: Vec<Task>,
    watches: Vec<WatchTarget>,
}

impl BuildTaskGraph {
    pub fn new(tasks: Vec<Task>, watches: Vec<WatchTarget>) -> Self {
        Self { tasks, watches }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn watches(&self) -> &[WatchTarget] {
        &self.watches
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.task(name).is_some()
    }

    /// Prove every dependency and watch trigger names a node, and every glob
    /// resolves against `config`.
    pub fn verify(&self, config: &ResolvedConfig) -> Result<(), DomainError> {
        let names: HashSet<&str> = self.tasks.iter().map(|t| t.name.as_str()).collect();

        for task in &self.tasks {
            if let Some(missing) = task.depends_on.iter().find(|d| !names.contains(d.as_str())) {
                return Err(DomainError::OrphanReference {
                    task: task.name.clone(),
                    reference: missing.clone(),
                });
            }
        }

        for watch in &self.watches {
            let owner = format!("watch:{}", watch.name);
            if let Some(missing) = watch.tasks.iter().find(|d| !names.contains(d.as_str())) {
                return Err(DomainError::OrphanReference {
                    task: owner,
                    reference: missing.clone(),
                });
            }
            if let Some(glob) = watch.globs.iter().find(|g| g.resolve(config).is_none()) {
                return Err(DomainError::OrphanReference {
                    task: owner,
                    reference: glob.render(),
                });
            }
        }

        Ok(())
    }

    /// Flatten a task into the leaf steps it runs, in order.
    ///
    /// Unknown names expand to nothing; `verify` is what rejects them.
    pub fn expand(&self, name: &str) -> Vec<&str> {
        let mut out = Vec::new();
        let mut visiting = HashSet::new();
        self.expand_into(name, &mut out, &mut visiting);
        out
    }

    fn expand_into<'a>(
        &'a self,
        name: &str,
        out: &mut Vec<&'a str>,
        visiting: &mut HashSet<&'a str>,
    ) {
        let Some(task) = self.task(name) else {
            return;
        };
        if task.is_leaf() {
            out.push(task.name.as_str());
            return;
        }
        if !visiting.insert(task.name.as_str()) {
            return;
        }
        for dep in &task.depends_on {
            self.expand_into(dep, out, visiting);
        }
        visiting.remove(task.name.as_str());
    }

    /// Every grunt plugin the graph needs, sorted.
    pub fn plugins(&self) -> BTreeSet<&str> {
        self.tasks.iter().filter_map(Task::plugin).collect()
    }

    /// npm packages for the plugin set, plus the runtime grunt itself.
    pub fn packages(&self) -> Vec<(&'static str, &'static str)> {
        let plugins = self.plugins();
        let mut packages: BTreeSet<(&'static str, &'static str)> =
            BASE_PACKAGES.iter().copied().collect();
        for def in PLUGIN_PACKAGES {
            if plugins.contains(def.plugin) {
                packages.insert((def.package, def.version));
            }
        }
        packages.into_iter().collect()
    }
}

// ── npm package table ─────────────────────────────────────────────────────────

struct PluginPackage {
    plugin: &'static str,
    package: &'static str,
    version: &'static str,
}

const BASE_PACKAGES: &[(&str, &str)] = &[
    ("grunt", "~0.4.1"),
    ("matchdep", "~0.1.2"),
    ("connect-livereload", "~0.2.0"),
];

static PLUGIN_PACKAGES: &[PluginPackage] = &[
    PluginPackage {
        plugin: "clean",
        package: "grunt-contrib-clean",
        version: "~0.5.0",
    },
    PluginPackage {
        plugin: "coffee",
        package: "grunt-contrib-coffee",
        version: "~0.7.0",
    },
    PluginPackage {
        plugin: "compass",
        package: "grunt-contrib-compass",
        version: "~0.5.0",
    },
    PluginPackage {
        plugin: "concat",
        package: "grunt-contrib-concat",
        version: "~0.3.0",
    },
    PluginPackage {
        plugin: "concurrent",
        package: "grunt-concurrent",
        version: "~0.3.0",
    },
    PluginPackage {
        plugin: "connect",
        package: "grunt-contrib-connect",
        version: "~0.5.0",
    },
    PluginPackage {
        plugin: "copy",
        package: "grunt-contrib-copy",
        version: "~0.4.1",
    },
    PluginPackage {
        plugin: "csscss",
        package: "grunt-csscss",
        version: "~0.5.0",
    },
    PluginPackage {
        plugin: "csslint",
        package: "grunt-contrib-csslint",
        version: "~0.1.2",
    },
    PluginPackage {
        plugin: "cssmin",
        package: "grunt-contrib-cssmin",
        version: "~0.6.1",
    },
    PluginPackage {
        plugin: "htmlmin",
        package: "grunt-contrib-htmlmin",
        version: "~0.1.3",
    },
    PluginPackage {
        plugin: "imagemin",
        package: "grunt-contrib-imagemin",
        version: "~0.2.0",
    },
    PluginPackage {
        plugin: "jekyll",
        package: "grunt-jekyll",
        version: "~0.3.8",
    },
    PluginPackage {
        plugin: "jshint",
        package: "grunt-contrib-jshint",
        version: "~0.6.3",
    },
    PluginPackage {
        plugin: "open",
        package: "grunt-open",
        version: "~0.2.2",
    },
    PluginPackage {
        plugin: "rev",
        package: "grunt-rev",
        version: "~0.1.0",
    },
    PluginPackage {
        plugin: "sass",
        package: "grunt-contrib-sass",
        version: "~0.4.1",
    },
    PluginPackage {
        plugin: "svgmin",
        package: "grunt-svgmin",
        version: "~0.2.0",
    },
    PluginPackage {
        plugin: "uglify",
        package: "grunt-contrib-uglify",
        version: "~0.2.2",
    },
    PluginPackage {
        plugin: "usemin",
        package: "grunt-usemin",
        version: "~0.1.12",
    },
    PluginPackage {
        plugin: "useminPrepare",
        package: "grunt-usemin",
        version: "~0.1.12",
    },
    PluginPackage {
        plugin: "watch",
        package: "grunt-contrib-watch",
        version: "~0.5.2",
    },
];
