use crate::domain::error::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to stay below its root.
///
/// Invariant: never absolute and never contains `..`. Enforced at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        Self::check(&path)?;
        Ok(Self(path))
    }

    fn check(path: &Path) -> Result<(), DomainError> {
        let display = path.display().to_string();
        for component in path.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => {
                    return Err(DomainError::InvalidPathSegment {
                        path: display,
                        segment: "..".into(),
                    });
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(DomainError::AbsolutePathNotAllowed { path: display });
                }
            }
        }
        Ok(())
    }

    /// Join a segment, maintaining the invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// File mode requested when materialising a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissions {
    #[default]
    Regular,
    Executable,
}

impl Permissions {
    pub const fn is_executable(&self) -> bool {
        matches!(self, Self::Executable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_accepted() {
        assert!(RelativePath::try_new("demo/src/App.jsx").is_ok());
        assert!(RelativePath::try_new("./demo").is_ok());
    }

    #[test]
    fn absolute_paths_are_rejected() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn parent_segments_are_rejected() {
        let base = RelativePath::try_new("demo").unwrap();
        assert!(matches!(
            base.join("../escape"),
            Err(DomainError::InvalidPathSegment { .. })
        ));
    }
}
