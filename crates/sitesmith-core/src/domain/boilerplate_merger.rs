//! Selects files out of an HTML5 Boilerplate release per toggle set.
//!
//! The release is an opaque [`FileCollection`]; only the paths named by the
//! group table below are touched, and extra files are ignored.

use crate::domain::{
    entities::{
        common::RelativePath,
        config::BoilerplateToggles,
        file_operation::{FileOperation, SourceId, SourceRef},
        source::FileCollection,
    },
    error::DomainError,
};

/// Pinned HTML5 Boilerplate release.
pub const BOILERPLATE_VERSION: &str = "4.3.0";

/// Where boilerplate docs land inside the site.
pub const DOCS_DIR: &str = "app/_h5bp-docs";

const UNIVERSAL_FILES: &[&str] = &[".htaccess", "404.html", "crossdomain.xml", "robots.txt"];
const LICENSE: &str = "LICENSE.md";
const CSS_FILES: &[&str] = &["css/main.css", "css/normalize.css"];
const JS_REQUIRED: &[&str] = &["js/main.js", "js/plugins.js"];
const ICON_FILES: &[&str] = &["favicon.ico", "apple-touch-icon-precomposed.png"];
const DOCS_REQUIRED: &[&str] = &["doc/TOC.md"];

/// Copy operations for a boilerplate release.
///
/// CSS files come back as bare source references: where they land depends
/// on the CSS preprocessor, which the file-tree synthesizer decides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoilerplateSelection {
    pub operations: Vec<FileOperation>,
    pub css_assets: Vec<SourceRef>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteBoilerplateMerger;

impl RemoteBoilerplateMerger {
    /// Select the universal group plus every toggled group.
    ///
    /// `js_dir` is the configured script directory, relative to `app/`.
    pub fn select(
        release: &FileCollection,
        toggles: BoilerplateToggles,
        js_dir: &str,
    ) -> Result<BoilerplateSelection, DomainError> {
        let mut selection = BoilerplateSelection::default();

        require_all(release, UNIVERSAL_FILES, "universal")?;
        require_all(release, &[LICENSE], "universal")?;
        for file in UNIVERSAL_FILES {
            selection
                .operations
                .push(copy(file, RelativePath::new("app").join(file)?));
        }
        selection.operations.push(copy(
            LICENSE,
            RelativePath::new(DOCS_DIR).join(LICENSE)?,
        ));

        if toggles.include_css {
            require_all(release, CSS_FILES, "css")?;
            selection
                .css_assets
                .extend(CSS_FILES.iter().map(|f| boilerplate_ref(f)));
        }

        if toggles.include_js {
            require_all(release, JS_REQUIRED, "js")?;
            let target = RelativePath::new("app").join(js_dir)?;
            for path in release.under("js") {
                let rest = path.strip_prefix("js").unwrap_or(path.as_str());
                selection
                    .operations
                    .push(copy(path.as_str(), target.join(rest)?));
            }
        }

        if toggles.include_icons {
            require_all(release, ICON_FILES, "icons")?;
            for file in ICON_FILES {
                selection
                    .operations
                    .push(copy(file, RelativePath::new("app").join(file)?));
            }
        }

        if toggles.include_docs {
            require_all(release, DOCS_REQUIRED, "docs")?;
            let target = RelativePath::new(DOCS_DIR);
            for path in release.under("doc") {
                let rest = path.strip_prefix("doc").unwrap_or(path.as_str());
                // already placed by the universal group
                if rest == LICENSE {
                    continue;
                }
                selection
                    .operations
                    .push(copy(path.as_str(), target.join(rest)?));
            }
        }

        Ok(selection)
    }
}

fn boilerplate_ref(path: &str) -> SourceRef {
    SourceRef::new(SourceId::Boilerplate, path)
}

fn copy(path: &str, destination: RelativePath) -> FileOperation {
    FileOperation::copy(boilerplate_ref(path), destination)
}

fn require_all(
    release: &FileCollection,
    paths: &[&str],
    group: &'static str,
) -> Result<(), DomainError> {
    match paths.iter().find(|p| !release.contains(p)) {
        Some(missing) => Err(DomainError::RequiredPathMissing {
            origin: SourceId::Boilerplate.as_str(),
            path: (*missing).to_string(),
            group,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release() -> FileCollection {
        FileCollection::new()
            .with_file(".htaccess", "ht")
            .with_file("404.html", "404")
            .with_file("crossdomain.xml", "xml")
            .with_file("robots.txt", "robots")
            .with_file("LICENSE.md", "mit")
            .with_file("humans.txt", "extra")
            .with_file("css/main.css", "main")
            .with_file("css/normalize.css", "normalize")
            .with_file("js/main.js", "")
            .with_file("js/plugins.js", "")
            .with_file("js/vendor/modernizr-2.6.2.min.js", "")
            .with_file("favicon.ico", "ico")
            .with_file("apple-touch-icon-precomposed.png", "png")
            .with_file("doc/TOC.md", "toc")
            .with_file("doc/usage.md", "usage")
    }

    fn destinations(selection: &BoilerplateSelection) -> Vec<&str> {
        selection
            .operations
            .iter()
            .map(|op| op.destination.as_str())
            .collect()
    }

    fn none() -> BoilerplateToggles {
        BoilerplateToggles {
            include_css: false,
            include_js: false,
            include_icons: false,
            include_docs: false,
            include_analytics: false,
        }
    }

    #[test]
    fn universal_group_only() {
        let selection = RemoteBoilerplateMerger::select(&release(), none(), "js").unwrap();
        assert_eq!(
            destinations(&selection),
            [
                "app/.htaccess",
                "app/404.html",
                "app/crossdomain.xml",
                "app/robots.txt",
                "app/_h5bp-docs/LICENSE.md"
            ]
        );
        assert!(selection.css_assets.is_empty());
    }

    #[test]
    fn js_tree_lands_in_configured_dir() {
        let toggles = BoilerplateToggles {
            include_js: true,
            ..none()
        };
        let selection = RemoteBoilerplateMerger::select(&release(), toggles, "scripts").unwrap();
        let dests = destinations(&selection);
        assert!(dests.contains(&"app/scripts/main.js"));
        assert!(dests.contains(&"app/scripts/vendor/modernizr-2.6.2.min.js"));
    }

    #[test]
    fn icons_and_docs_when_toggled() {
        let toggles = BoilerplateToggles {
            include_icons: true,
            include_docs: true,
            ..none()
        };
        let selection = RemoteBoilerplateMerger::select(&release(), toggles, "js").unwrap();
        let dests = destinations(&selection);
        assert!(dests.contains(&"app/favicon.ico"));
        assert!(dests.contains(&"app/_h5bp-docs/TOC.md"));
        assert!(dests.contains(&"app/_h5bp-docs/usage.md"));
        assert_eq!(
            dests.iter().filter(|d| d.ends_with("LICENSE.md")).count(),
            1
        );
    }

    #[test]
    fn css_is_handed_back_as_assets() {
        let toggles = BoilerplateToggles {
            include_css: true,
            ..none()
        };
        let selection = RemoteBoilerplateMerger::select(&release(), toggles, "js").unwrap();
        let paths: Vec<_> = selection.css_assets.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, ["css/main.css", "css/normalize.css"]);
    }

    #[test]
    fn missing_required_path_names_group() {
        let mut partial = FileCollection::new();
        for (path, bytes) in release().iter() {
            if path.as_str() != "js/plugins.js" {
                partial.insert(path.clone(), bytes);
            }
        }
        let toggles = BoilerplateToggles {
            include_js: true,
            ..none()
        };
        assert_eq!(
            RemoteBoilerplateMerger::select(&partial, toggles, "js").unwrap_err(),
            DomainError::RequiredPathMissing {
                origin: "boilerplate",
                path: "js/plugins.js".into(),
                group: "js"
            }
        );
    }

    #[test]
    fn missing_universal_file_fails_even_with_no_toggles() {
        let partial = FileCollection::new().with_file("LICENSE.md", "");
        assert!(matches!(
            RemoteBoilerplateMerger::select(&partial, none(), "js"),
            Err(DomainError::RequiredPathMissing { group: "universal", .. })
        ));
    }
}
