//! Planned file operations.
//!
//! A [`FilePlan`] is computed in full before anything touches the
//! filesystem. Operations name their source by [`SourceRef`] and their
//! destination by a project-relative [`RelativePath`]; bytes are looked up
//! and rendered later by the application layer.

use std::fmt;

use super::common::RelativePath;

// ── Sources ───────────────────────────────────────────────────────────────────

/// Where an operation's input comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceId {
    /// Templates and dotfiles shipped with the tool.
    Bundled,
    /// The freshly generated baseline Jekyll project.
    Baseline,
    /// The remote HTML5 Boilerplate release.
    Boilerplate,
}

impl SourceId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bundled => "bundled",
            Self::Baseline => "baseline",
            Self::Boilerplate => "boilerplate",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef {
    pub source: SourceId,
    pub path: RelativePath,
}

impl SourceRef {
    pub fn new(source: SourceId, path: impl Into<RelativePath>) -> Self {
        Self {
            source,
            path: path.into(),
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.path)
    }
}

// ── Operations ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationKind {
    Mkdir,
    Copy { source: SourceRef },
    Template { source: SourceRef },
    Write { content: Vec<u8> },
}

impl OperationKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mkdir => "mkdir",
            Self::Copy { .. } => "copy",
            Self::Template { .. } => "template",
            Self::Write { .. } => "write",
        }
    }

    pub fn source(&self) -> Option<&SourceRef> {
        match self {
            Self::Copy { source } | Self::Template { source } => Some(source),
            Self::Mkdir | Self::Write { .. } => None,
        }
    }
}

/// One planned filesystem effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOperation {
    pub kind: OperationKind,
    pub destination: RelativePath,
    /// May replace exactly one earlier operation on the same destination.
    pub overridable: bool,
}

impl FileOperation {
    pub fn mkdir(destination: RelativePath) -> Self {
        Self {
            kind: OperationKind::Mkdir,
            destination,
            overridable: false,
        }
    }

    pub fn copy(source: SourceRef, destination: RelativePath) -> Self {
        Self {
            kind: OperationKind::Copy { source },
            destination,
            overridable: false,
        }
    }

    pub fn template(source: SourceRef, destination: RelativePath) -> Self {
        Self {
            kind: OperationKind::Template { source },
            destination,
            overridable: false,
        }
    }

    pub fn write(content: impl Into<Vec<u8>>, destination: RelativePath) -> Self {
        Self {
            kind: OperationKind::Write {
                content: content.into(),
            },
            destination,
            overridable: false,
        }
    }

    /// Mark as an override of an earlier placeholder.
    #[must_use]
    pub fn overriding(mut self) -> Self {
        self.overridable = true;
        self
    }

    pub fn phase(&self) -> Phase {
        if self.overridable {
            return Phase::Overrides;
        }
        match self.kind {
            OperationKind::Mkdir => Phase::Directories,
            OperationKind::Copy { .. } | OperationKind::Write { .. } => Phase::Copies,
            OperationKind::Template { .. } => Phase::Templates,
        }
    }

    pub fn is_mkdir(&self) -> bool {
        matches!(self.kind, OperationKind::Mkdir)
    }
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.source() {
            Some(source) => write!(f, "{} {} -> {}", self.kind.name(), source, self.destination),
            None => write!(f, "{} {}", self.kind.name(), self.destination),
        }?;
        if self.overridable {
            f.write_str(" (override)")?;
        }
        Ok(())
    }
}

/// Fixed execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Directories,
    Copies,
    Templates,
    Overrides,
}

// ── Plan ──────────────────────────────────────────────────────────────────────

/// An ordered, phase-sorted list of operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePlan {
    operations: Vec<FileOperation>,
}

impl FilePlan {
    /// Sort into phase order. Relative order within a phase is preserved.
    pub fn from_operations(mut operations: Vec<FileOperation>) -> Self {
        operations.sort_by_key(FileOperation::phase);
        Self { operations }
    }

    pub fn operations(&self) -> &[FileOperation] {
        &self.operations
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileOperation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn directories(&self) -> impl Iterator<Item = &RelativePath> {
        self.operations
            .iter()
            .filter(|op| op.is_mkdir())
            .map(|op| &op.destination)
    }

    /// Operations targeting `destination`, in plan order.
    pub fn targeting<'a>(
        &'a self,
        destination: &'a str,
    ) -> impl Iterator<Item = &'a FileOperation> + 'a {
        self.operations
            .iter()
            .filter(move |op| op.destination.as_str() == destination)
    }

    pub fn writes_to(&self, destination: &str) -> bool {
        self.targeting(destination).next().is_some()
    }
}

impl<'a> IntoIterator for &'a FilePlan {
    type Item = &'a FileOperation;
    type IntoIter = std::slice::Iter<'a, FileOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_orders_by_phase_stably() {
        let plan = FilePlan::from_operations(vec![
            FileOperation::write("", "app/_includes/icons.html".into()).overriding(),
            FileOperation::template(
                SourceRef::new(SourceId::Bundled, "Gemfile"),
                "Gemfile".into(),
            ),
            FileOperation::copy(SourceRef::new(SourceId::Bundled, "a"), "a".into()),
            FileOperation::mkdir("app".into()),
            FileOperation::copy(SourceRef::new(SourceId::Bundled, "b"), "b".into()),
        ]);

        let order: Vec<_> = plan.iter().map(|op| op.destination.as_str()).collect();
        assert_eq!(
            order,
            ["app", "a", "b", "Gemfile", "app/_includes/icons.html"]
        );
    }

    #[test]
    fn display_names_kind_source_and_override() {
        let op = FileOperation::copy(
            SourceRef::new(SourceId::Boilerplate, "robots.txt"),
            "app/robots.txt".into(),
        )
        .overriding();
        assert_eq!(
            op.to_string(),
            "copy boilerplate:robots.txt -> app/robots.txt (override)"
        );
    }
}
