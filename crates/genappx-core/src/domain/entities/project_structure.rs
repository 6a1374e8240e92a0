use std::collections::HashSet;
use std::path::PathBuf;

use crate::domain::entities::common::{Permissions, RelativePath};
use crate::domain::entities::file_tree::{Node, VirtualFileTree};
use crate::domain::error::DomainError;

/// A flat, validated write plan for one project.
///
/// Built from a [`VirtualFileTree`]; every entry path is relative to
/// `root`, which is the project directory itself.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    /// Plan the tree under `output_dir/<project name>`.
    pub fn from_tree(tree: &VirtualFileTree, output_dir: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let mut structure = Self::new(output_dir.into().join(tree.name().as_str()));
        for (path, node) in tree.root().walk() {
            let path = RelativePath::try_new(path)?;
            match node {
                Node::Directory(_) => structure.add_directory(path),
                Node::File(content) => structure.add_file(path, content.clone(), Permissions::Regular),
            }
        }
        structure.validate()?;
        Ok(structure)
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn add_file(&mut self, path: RelativePath, content: String, permissions: Permissions) {
        self.entries.push(FsEntry::File(FileToWrite {
            path,
            content,
            permissions,
        }));
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.entries.push(FsEntry::Directory(DirectoryToCreate { path }));
    }

    pub fn with_file(mut self, path: RelativePath, content: String, permissions: Permissions) -> Self {
        self.add_file(path, content, permissions);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path().to_string();
            if !seen.insert(path.clone()) {
                return Err(DomainError::DuplicatePath { path });
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            FsEntry::Directory(_) => None,
        })
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
    pub permissions: Permissions,
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}
