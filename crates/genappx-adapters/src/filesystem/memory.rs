//! In-memory filesystem adapter for tests and dry runs.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use genappx_core::{
    application::{ApplicationError, ports::Filesystem},
    error::GenappxResult,
};

const RESOURCE: &str = "memory filesystem";

/// In-memory filesystem. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    executables: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> GenappxResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned { resource: RESOURCE }.into())
    }

    fn write(&self) -> GenappxResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned { resource: RESOURCE }.into())
    }

    /// A file's content, if present.
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read().ok()?.files.get(path).cloned()
    }

    pub fn is_executable(&self, path: &Path) -> bool {
        self.read().is_ok_and(|inner| inner.executables.contains(path))
    }

    /// Every file path, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> GenappxResult<()> {
        let mut inner = self.write()?;
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> GenappxResult<()> {
        let mut inner = self.write()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> GenappxResult<()> {
        let mut inner = self.write()?;
        if !inner.files.contains_key(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into());
        }
        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .is_ok_and(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
    }

    fn remove_dir_all(&self, path: &Path) -> GenappxResult<()> {
        let mut inner = self.write()?;
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.executables.retain(|p| !p.starts_with(path));
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> GenappxResult<()> {
        let mut inner = self.write()?;
        let present = inner.files.contains_key(from) || inner.directories.contains(from);
        if !present || inner.files.contains_key(to) || inner.directories.contains(to) {
            return Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "Cannot move: source missing or target exists".into(),
            }
            .into());
        }

        let moved = |p: &PathBuf| match p.strip_prefix(from) {
            Ok(rest) if rest.as_os_str().is_empty() => to.to_path_buf(),
            Ok(rest) => to.join(rest),
            Err(_) => p.clone(),
        };
        inner.files = std::mem::take(&mut inner.files)
            .into_iter()
            .map(|(p, content)| (moved(&p), content))
            .collect();
        inner.directories = std::mem::take(&mut inner.directories).iter().map(moved).collect();
        inner.executables = std::mem::take(&mut inner.executables).iter().map(moved).collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_contents() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        fs.create_dir_all(Path::new("/out/demo")).unwrap();
        fs.write_file(Path::new("/out/demo/a.txt"), "a").unwrap();
        assert_eq!(other.read_file(Path::new("/out/demo/a.txt")).as_deref(), Some("a"));
        assert!(other.exists(Path::new("/out")));
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/missing/a.txt"), "a").is_err());
    }

    #[test]
    fn rename_moves_nested_entries() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/out/demo/src")).unwrap();
        fs.write_file(Path::new("/out/demo/src/x.js"), "x").unwrap();
        fs.set_permissions(Path::new("/out/demo/src/x.js"), true).unwrap();

        fs.rename(Path::new("/out/demo"), Path::new("/out/.demo.old")).unwrap();
        assert!(!fs.exists(Path::new("/out/demo")));
        assert_eq!(fs.read_file(Path::new("/out/.demo.old/src/x.js")).as_deref(), Some("x"));
        assert!(fs.is_executable(Path::new("/out/.demo.old/src/x.js")));
        assert!(fs.rename(Path::new("/out/demo"), Path::new("/out/other")).is_err());
    }

    #[test]
    fn remove_drops_nested_entries() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/out/demo/src")).unwrap();
        fs.write_file(Path::new("/out/demo/src/x.js"), "").unwrap();
        fs.set_permissions(Path::new("/out/demo/src/x.js"), true).unwrap();

        fs.remove_dir_all(Path::new("/out/demo")).unwrap();
        assert!(!fs.exists(Path::new("/out/demo/src")));
        assert!(!fs.is_executable(Path::new("/out/demo/src/x.js")));
        assert!(fs.exists(Path::new("/out")));
        assert!(fs.list_files().is_empty());
    }
}
