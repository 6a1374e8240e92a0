//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `genappx-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Permissions, VirtualFileTree};
use crate::error::GenappxResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `genappx_adapters::filesystem::LocalFilesystem` (production)
/// - `genappx_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GenappxResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> GenappxResult<()>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> GenappxResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> GenappxResult<()>;

    /// Move a file or directory. `to` must not exist.
    fn rename(&self, from: &Path, to: &Path) -> GenappxResult<()>;
}

/// A file written next to the project directory in an export archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidecar {
    pub name: String,
    pub content: String,
    pub permissions: Permissions,
}

/// Everything an exporter writes: the tree under its project name, plus
/// sidecars at the archive root.
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub tree: VirtualFileTree,
    pub sidecars: Vec<Sidecar>,
}

impl ExportBundle {
    pub fn sidecar(&self, name: &str) -> Option<&Sidecar> {
        self.sidecars.iter().find(|s| s.name == name)
    }
}

/// Port for writing export bundles.
///
/// Implemented by:
/// - `genappx_adapters::export::ZipExporter`
#[cfg_attr(test, mockall::automock)]
pub trait ProjectExporter: Send + Sync {
    /// Write `bundle` to `dest`.
    fn export(&self, bundle: &ExportBundle, dest: &Path) -> GenappxResult<()>;
}
