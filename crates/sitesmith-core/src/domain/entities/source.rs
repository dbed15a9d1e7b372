//! File collections and the set of sources one run plans from.

use std::collections::BTreeMap;

use super::{
    common::RelativePath,
    file_operation::{SourceId, SourceRef},
};
use crate::domain::error::DomainError;

/// An opaque keyed set of files: relative path -> bytes.
///
/// Keys are normalized forward-slash paths, so lookups are stable across
/// platforms and iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCollection {
    files: BTreeMap<RelativePath, Vec<u8>>,
}

impl FileCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: RelativePath, content: impl Into<Vec<u8>>) {
        self.files.insert(path, content.into());
    }

    /// Builder-style insert; handy in tests and for embedded collections.
    #[must_use]
    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(RelativePath::new(path), content);
        self
    }

    pub fn get(&self, path: &RelativePath) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        RelativePath::try_new(path)
            .map(|p| self.files.contains_key(&p))
            .unwrap_or(false)
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.files.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RelativePath, &[u8])> {
        self.files.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// First path (in sorted order) ending with `suffix`.
    pub fn find_by_suffix(&self, suffix: &str) -> Option<&RelativePath> {
        self.files.keys().find(|p| p.as_str().ends_with(suffix))
    }

    /// Every path strictly below `prefix`.
    pub fn under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a RelativePath> + 'a {
        self.files
            .keys()
            .filter(move |p| p.strip_prefix(prefix).is_some_and(|rest| !rest.is_empty()))
    }
}

impl FromIterator<(RelativePath, Vec<u8>)> for FileCollection {
    fn from_iter<I: IntoIterator<Item = (RelativePath, Vec<u8>)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// The collections available to one synthesis run.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    pub bundled: FileCollection,
    pub baseline: FileCollection,
    /// Present only when the boilerplate template was chosen.
    pub boilerplate: Option<FileCollection>,
}

impl SourceSet {
    pub fn new(bundled: FileCollection, baseline: FileCollection) -> Self {
        Self {
            bundled,
            baseline,
            boilerplate: None,
        }
    }

    #[must_use]
    pub fn with_boilerplate(mut self, boilerplate: FileCollection) -> Self {
        self.boilerplate = Some(boilerplate);
        self
    }

    pub fn collection(&self, id: SourceId) -> Option<&FileCollection> {
        match id {
            SourceId::Bundled => Some(&self.bundled),
            SourceId::Baseline => Some(&self.baseline),
            SourceId::Boilerplate => self.boilerplate.as_ref(),
        }
    }

    /// Bytes behind a source reference, or `SourceMissing`.
    pub fn require(&self, source: &SourceRef) -> Result<&[u8], DomainError> {
        let collection =
            self.collection(source.source)
                .ok_or(DomainError::SourceUnavailable {
                    origin: source.source.as_str(),
                })?;
        collection
            .get(&source.path)
            .ok_or_else(|| DomainError::SourceMissing {
                origin: source.source.as_str(),
                path: source.path.to_string(),
            })
    }

    /// Like [`require`](Self::require), discarding the bytes.
    pub fn check(&self, source: &SourceRef) -> Result<(), DomainError> {
        self.require(source).map(|_| ())
    }
}
