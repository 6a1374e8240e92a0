//! In-memory project tree.
//!
//! Directories keep insertion order ([`IndexMap`]); display and export both
//! rely on it. Paths use `/` separators and never carry a trailing slash
//! inside the tree; the trailing slash only appears in flattened output.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::value_objects::ProjectName;

/// A tree node: file content or a nested directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File(String),
    Directory(Directory),
}

impl Node {
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    pub fn as_file(&self) -> Option<&str> {
        match self {
            Self::File(content) => Some(content),
            Self::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            Self::Directory(dir) => Some(dir),
            Self::File(_) => None,
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::File(content) => serializer.serialize_str(content),
            Self::Directory(dir) => dir.serialize(serializer),
        }
    }
}

/// An ordered name → node map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: IndexMap<String, Node>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert a direct child. An existing key keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) {
        self.entries.insert(name.into(), node);
    }

    /// Insert a child directory unless it is empty.
    pub fn insert_dir_if_any(&mut self, name: impl Into<String>, dir: Directory) {
        if !dir.is_empty() {
            self.insert(name, Node::Directory(dir));
        }
    }

    /// Look up a node by `/`-separated relative path.
    pub fn get(&self, path: &str) -> Option<&Node> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = segments.next()?;
        let mut node = self.entries.get(first)?;
        for segment in segments {
            node = node.as_directory()?.entries.get(segment)?;
        }
        Some(node)
    }

    pub fn file(&self, path: &str) -> Option<&str> {
        self.get(path)?.as_file()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn dir(&self, path: &str) -> Option<&Directory> {
        self.get(path)?.as_directory()
    }

    /// Walk to `path`, creating directories as needed.
    ///
    /// A file sitting where a directory is required is replaced.
    pub fn dir_mut(&mut self, path: &str) -> &mut Directory {
        let mut current = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let slot = current
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| Node::Directory(Directory::new()));
            if slot.is_file() {
                *slot = Node::Directory(Directory::new());
            }
            current = match slot {
                Node::Directory(dir) => dir,
                Node::File(_) => unreachable!("replaced above"),
            };
        }
        current
    }

    fn split_parent(path: &str) -> (&str, &str) {
        match path.rsplit_once('/') {
            Some((parent, name)) => (parent, name),
            None => ("", path),
        }
    }

    /// Create or replace the file at `path`, creating parent directories.
    pub fn put_file(&mut self, path: &str, content: impl Into<String>) {
        let (parent, name) = Self::split_parent(path);
        self.dir_mut(parent).insert(name, Node::File(content.into()));
    }

    pub fn file_mut(&mut self, path: &str) -> Option<&mut String> {
        let (parent, name) = Self::split_parent(path);
        let mut current = self;
        for segment in parent.split('/').filter(|s| !s.is_empty()) {
            current = match current.entries.get_mut(segment)? {
                Node::Directory(dir) => dir,
                Node::File(_) => return None,
            };
        }
        match current.entries.get_mut(name)? {
            Node::File(content) => Some(content),
            Node::Directory(_) => None,
        }
    }

    /// Append `text` to an existing file unless `marker` is already present.
    ///
    /// Returns true if the file changed. Missing files are left alone.
    pub fn append_once(&mut self, path: &str, marker: &str, text: &str) -> bool {
        match self.file_mut(path) {
            Some(content) if !content.contains(marker) => {
                content.push_str(text);
                true
            }
            _ => false,
        }
    }

    /// Replace the first occurrence of `from` in an existing file.
    pub fn replace_in(&mut self, path: &str, from: &str, to: &str) -> bool {
        match self.file_mut(path) {
            Some(content) if content.contains(from) => {
                *content = content.replacen(from, to, 1);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, path: &str) -> Option<Node> {
        let (parent, name) = Self::split_parent(path);
        let mut current = self;
        for segment in parent.split('/').filter(|s| !s.is_empty()) {
            current = match current.entries.get_mut(segment)? {
                Node::Directory(dir) => dir,
                Node::File(_) => return None,
            };
        }
        current.entries.shift_remove(name)
    }

    /// Every entry depth-first in insertion order, with paths relative to
    /// this directory.
    pub fn walk(&self) -> Vec<(String, &Node)> {
        let mut out = Vec::new();
        self.walk_into("", &mut out);
        out
    }

    fn walk_into<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a Node)>) {
        for (name, node) in &self.entries {
            let path = format!("{prefix}{name}");
            out.push((path.clone(), node));
            if let Node::Directory(dir) = node {
                dir.walk_into(&format!("{path}/"), out);
            }
        }
    }

    /// Flattened listing; directories end in `/` and precede their contents.
    pub fn flatten(&self, prefix: &str) -> Vec<String> {
        let mut out = Vec::new();
        for (name, node) in &self.entries {
            let path = format!("{prefix}{name}");
            match node {
                Node::File(_) => out.push(path),
                Node::Directory(dir) => {
                    out.push(format!("{path}/"));
                    out.extend(dir.flatten(&format!("{path}/")));
                }
            }
        }
        out
    }
}

impl Serialize for Directory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, node) in &self.entries {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

/// The generated project: a single root directory named after the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFileTree {
    name: ProjectName,
    root: Directory,
}

impl VirtualFileTree {
    pub fn new(name: ProjectName, root: Directory) -> Self {
        Self { name, root }
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Contents of the project directory.
    pub fn root(&self) -> &Directory {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Directory {
        &mut self.root
    }

    /// Look up a path that starts with the project name
    /// (`"demo/src/App.jsx"`). The bare project name resolves to `None`;
    /// use [`root`](Self::root) for the root directory.
    pub fn get(&self, path: &str) -> Option<&Node> {
        let rest = path.strip_prefix(self.name.as_str())?;
        self.root.get(rest.strip_prefix('/')?)
    }

    /// Path of every file relative to the project directory, with content.
    pub fn files(&self) -> impl Iterator<Item = (String, &str)> {
        self.root
            .walk()
            .into_iter()
            .filter_map(|(path, node)| node.as_file().map(|c| (path, c)))
    }
}

impl Serialize for VirtualFileTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.name.as_str(), &self.root)?;
        map.end()
    }
}

/// Flatten a tree into display paths, the project directory first.
pub fn flatten_structure(tree: &VirtualFileTree, prefix: &str) -> Vec<String> {
    let root = format!("{prefix}{}/", tree.name());
    let mut out = vec![root.clone()];
    out.extend(tree.root().flatten(&root));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> VirtualFileTree {
        let mut root = Directory::new();
        root.put_file("README.md", "# x");
        root.put_file("src/App.jsx", "app");
        root.put_file("src/components/Chat.jsx", "chat");
        root.put_file(".env", "NODE_ENV=development");
        VirtualFileTree::new(ProjectName::new("x").unwrap(), root)
    }

    #[test]
    fn flatten_emits_directories_before_their_contents() {
        assert_eq!(
            flatten_structure(&tree(), ""),
            vec![
                "x/",
                "x/README.md",
                "x/src/",
                "x/src/App.jsx",
                "x/src/components/",
                "x/src/components/Chat.jsx",
                "x/.env",
            ]
        );
    }

    #[test]
    fn flatten_honours_prefix() {
        let paths = flatten_structure(&tree(), "out/");
        assert_eq!(paths[0], "out/x/");
        assert_eq!(paths[1], "out/x/README.md");
    }

    #[test]
    fn insertion_order_is_kept_on_replace() {
        let mut dir = Directory::new();
        dir.put_file("a", "1");
        dir.put_file("b", "2");
        dir.put_file("a", "3");
        assert_eq!(dir.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(dir.file("a"), Some("3"));
    }

    #[test]
    fn append_once_is_idempotent() {
        let mut dir = Directory::new();
        dir.put_file("README.md", "# x\n");
        assert!(dir.append_once("README.md", "## Notes", "\n## Notes\nhi\n"));
        assert!(!dir.append_once("README.md", "## Notes", "\n## Notes\nhi\n"));
        assert_eq!(dir.file("README.md"), Some("# x\n\n## Notes\nhi\n"));
    }

    #[test]
    fn append_to_missing_file_is_a_no_op() {
        let mut dir = Directory::new();
        assert!(!dir.append_once("api/main.py", "x", "y"));
        assert!(dir.is_empty());
    }

    #[test]
    fn tree_lookup_requires_project_prefix() {
        let t = tree();
        assert!(t.get("x/src").unwrap().is_directory());
        assert_eq!(t.get("x/src/App.jsx").and_then(Node::as_file), Some("app"));
        assert!(t.get("y/src").is_none());
        assert!(t.get("xsrc").is_none());
    }

    #[test]
    fn serializes_as_nested_object() {
        let json = serde_json::to_value(tree()).unwrap();
        assert_eq!(json["x"]["src"]["components"]["Chat.jsx"], "chat");
    }

    #[test]
    fn remove_and_files() {
        let mut t = tree();
        t.root_mut().remove("src/components");
        let files: Vec<_> = t.files().map(|(p, _)| p).collect();
        assert_eq!(files, ["README.md", "src/App.jsx", ".env"]);
    }
}
