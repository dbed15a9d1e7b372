use super::DomainError;
use std::fmt;
use std::path::{Path, PathBuf};

/// A forward-slash path guaranteed to be relative and normalized.
///
/// Invariant: never absolute, no empty, `.` or `..` segments. Stored as a
/// string so plans compare and sort the same on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the path is absolute or escapes its root (use `try_new` for
    /// fallible construction).
    pub fn new(path: impl AsRef<str>) -> Self {
        match Self::try_new(path.as_ref()) {
            Ok(p) => p,
            Err(e) => panic!("invalid RelativePath: {e}"),
        }
    }

    /// Fallible constructor.
    pub fn try_new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = path.as_ref();
        let unified = raw.replace('\\', "/");
        if unified.starts_with('/') || has_drive_prefix(&unified) {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: raw.to_string(),
            });
        }

        let mut segments = Vec::new();
        for segment in unified.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    return Err(DomainError::AbsolutePathNotAllowed {
                        path: raw.to_string(),
                    });
                }
                other => segments.push(other),
            }
        }
        Ok(Self(segments.join("/")))
    }

    /// Join a relative segment, maintaining the invariant.
    pub fn join(&self, segment: impl AsRef<str>) -> Result<Self, DomainError> {
        let tail = Self::try_new(segment)?;
        if self.0.is_empty() {
            return Ok(tail);
        }
        if tail.0.is_empty() {
            return Ok(self.clone());
        }
        Ok(Self(format!("{}/{}", self.0, tail.0)))
    }

    /// Last segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// Path with `prefix/` removed, if it starts with that prefix.
    pub fn strip_prefix(&self, prefix: &str) -> Option<&str> {
        let rest = self.0.strip_prefix(prefix)?;
        rest.strip_prefix('/')
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against a filesystem root.
    pub fn to_path_under(&self, root: &Path) -> PathBuf {
        self.0
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(root.to_path_buf(), |acc, s| acc.join(s))
    }
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── AssetDir ──────────────────────────────────────────────────────────────────

/// A normalized, non-empty directory name taken from an answer.
///
/// Separators are trimmed from both ends, `\` becomes `/`, runs of
/// separators collapse. Empty results and `..` segments are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetDir(String);

impl AssetDir {
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.replace('\\', "/").split('/').any(|s| s.trim() == "..") {
            return Err(DomainError::InvalidDirectory {
                field,
                value: raw.to_string(),
                reason: "must not leave the project directory",
            });
        }
        if has_drive_prefix(trimmed) {
            return Err(DomainError::InvalidDirectory {
                field,
                value: raw.to_string(),
                reason: "must be relative",
            });
        }

        let normalized = trimmed
            .replace('\\', "/")
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != ".")
            .collect::<Vec<_>>()
            .join("/");

        if normalized.is_empty() {
            return Err(DomainError::EmptyDirectory { field });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
