//! HTML5 Boilerplate release sources.

use std::io::Read;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::{debug, info, instrument};

use sitesmith_core::{
    application::{ApplicationError, ports::BoilerplateFetcher},
    domain::{DomainError, FileCollection, RelativePath},
    error::SitesmithResult,
};

use crate::collection::read_tree;

/// GitHub tag archive; `{version}` is substituted.
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://github.com/h5bp/html5-boilerplate/archive/v{version}.tar.gz";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("archive unreadable: {0}")]
    Archive(#[from] std::io::Error),

    #[error("archive entry has an unusable path: {0}")]
    Path(#[from] DomainError),

    #[error("archive contains no files")]
    Empty,
}

/// Downloads a release tarball and unpacks it in memory.
#[derive(Debug, Clone)]
pub struct HttpBoilerplateFetcher {
    url_template: String,
}

impl HttpBoilerplateFetcher {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
        }
    }

    pub fn url_for(&self, version: &str) -> String {
        self.url_template.replace("{version}", version)
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("sitesmith/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let response = client.get(url).send()?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(response.bytes()?.to_vec())
    }
}

impl Default for HttpBoilerplateFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHIVE_URL)
    }
}

impl BoilerplateFetcher for HttpBoilerplateFetcher {
    #[instrument(skip(self))]
    fn fetch(&self, version: &str) -> SitesmithResult<FileCollection> {
        let url = self.url_for(version);
        info!(%url, "Downloading boilerplate release");

        let fetched = self
            .download(&url)
            .and_then(|bytes| unpack_release(&bytes));
        fetched.map_err(|e| {
            ApplicationError::BoilerplateFetch {
                version: version.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Unpack a gzipped release tarball, dropping the archive's top-level
/// directory (`html5-boilerplate-4.3.0/`).
pub fn unpack_release(gzipped: &[u8]) -> Result<FileCollection, FetchError> {
    let mut archive = tar::Archive::new(GzDecoder::new(gzipped));
    let mut files = FileCollection::new();

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let Some(key) = strip_top_level(&entry.path()?) else {
            continue;
        };
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        files.insert(RelativePath::try_new(&key)?, bytes);
    }

    if files.is_empty() {
        return Err(FetchError::Empty);
    }
    debug!(files = files.len(), "Unpacked boilerplate release");
    Ok(files)
}

fn strip_top_level(path: &Path) -> Option<String> {
    let parts: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .skip(1)
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

/// An already unpacked release on disk.
#[derive(Debug, Clone)]
pub struct DirectoryBoilerplate {
    root: PathBuf,
}

impl DirectoryBoilerplate {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BoilerplateFetcher for DirectoryBoilerplate {
    #[instrument(skip(self), fields(dir = %self.root.display()))]
    fn fetch(&self, version: &str) -> SitesmithResult<FileCollection> {
        debug!(version, "Using local boilerplate release");
        read_tree(&self.root, &[".git"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{Compression, write::GzEncoder};

    fn tarball(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        for (path, body) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(body.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, path, body.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn unpack_strips_release_directory() {
        let bytes = tarball(&[
            ("html5-boilerplate-4.3.0/404.html", "nope"),
            ("html5-boilerplate-4.3.0/css/main.css", "body{}"),
        ]);
        let files = unpack_release(&bytes).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(
            files.get(&RelativePath::new("css/main.css")),
            Some(&b"body{}"[..])
        );
    }

    #[test]
    fn empty_archive_is_an_error() {
        let bytes = tarball(&[]);
        assert!(matches!(unpack_release(&bytes), Err(FetchError::Empty)));
    }

    #[test]
    fn garbage_is_an_archive_error() {
        assert!(matches!(
            unpack_release(b"not a tarball"),
            Err(FetchError::Archive(_))
        ));
    }

    #[test]
    fn url_template_takes_version() {
        assert_eq!(
            HttpBoilerplateFetcher::default().url_for("4.3.0"),
            "https://github.com/h5bp/html5-boilerplate/archive/v4.3.0.tar.gz"
        );
    }
}
