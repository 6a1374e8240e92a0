//! Structure generation.
//!
//! A [`Scaffold`] is the in-progress project. It is pushed through an ordered
//! list of stages ([`PIPELINE`]); each stage is total and leaves the scaffold
//! unchanged when re-applied to its own output. [`Scaffold::into_tree`] then
//! lays the parts out in their final order.
//!
//! ```text
//! manifest → frontend → backend → database → agents
//!          → enhancements → support files → dev:full fix-up
//! ```

mod agents;
mod backend;
mod database;
mod enhancements;
mod frontend;
pub mod packages;
pub mod readme;
mod support;

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::domain::catalog::Catalog;
use crate::domain::entities::configuration::Configuration;
use crate::domain::entities::file_tree::{Directory, Node, VirtualFileTree};
use crate::domain::entities::selection::Selection;
use crate::domain::env;
use crate::domain::value_objects::Category;

pub use packages::PackageManifest;

/// Vector databases that switch templates onto their full code path.
pub const VECTOR_DATABASES: &[&str] = &["pinecone", "chroma", "weaviate", "qdrant"];

/// Top-level source directories, in output order.
const SOURCE_DIRS: &[&str] = &["src", "server", "api", "database", "agents"];

/// Flags derived once from a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Flags {
    pub react: bool,
    pub vue: bool,
    pub next: bool,
    pub express: bool,
    pub fastapi: bool,
    pub typescript: bool,
    pub any_provider: bool,
    pub openai: bool,
    /// First selected vector database, in catalog order.
    pub vector_db: Option<&'static str>,
    /// FastAPI + LangChain + OpenAI: emit the `/rag` retriever stub.
    pub want_rag: bool,
}

impl Flags {
    fn derive(selection: &Selection<'_>) -> Self {
        let fe = |id| selection.has(Category::Frontend, id);
        let be = |id| selection.has(Category::Backend, id);
        let openai = selection.has(Category::LlmProviders, "openai");
        let fastapi = be("fastapi");
        Self {
            react: fe("react"),
            vue: fe("vue"),
            next: fe("nextjs"),
            express: be("express"),
            fastapi,
            typescript: selection.has(Category::Tools, "typescript"),
            any_provider: selection.has_any(Category::LlmProviders),
            openai,
            vector_db: VECTOR_DATABASES
                .iter()
                .copied()
                .find(|db| selection.has(Category::Database, db)),
            want_rag: fastapi && selection.has(Category::AiFrameworks, "langchain") && openai,
        }
    }

    pub fn any_backend(&self) -> bool {
        self.express || self.fastapi
    }

    /// Full vector path: a vector database plus OpenAI for embeddings.
    pub fn full_vector_path(&self) -> bool {
        self.vector_db.is_some() && self.openai
    }

    /// Extension for React sources.
    pub fn jsx(&self) -> &'static str {
        if self.typescript { "tsx" } else { "jsx" }
    }
}

/// The project under construction.
#[derive(Debug)]
pub struct Scaffold<'s, 'c> {
    pub(crate) selection: &'s Selection<'c>,
    pub(crate) flags: Flags,
    pub(crate) readme: String,
    pub(crate) manifest: PackageManifest,
    /// Root-level config files, in output order.
    pub(crate) support: Directory,
    /// `src/`, `server/`, `api/`, `database/`, `agents/`.
    pub(crate) sources: Directory,
    pub(crate) python: BTreeSet<String>,
}

type Stage = fn(&mut Scaffold<'_, '_>);

/// Ordered generation stages.
const PIPELINE: &[(&str, Stage)] = &[
    ("manifest", packages::assemble),
    ("frontend", frontend::emit),
    ("backend", backend::emit),
    ("database", database::emit),
    ("agents", agents::emit),
    ("enhancements", enhancements::apply),
    ("support", support::emit),
    ("dev-full", packages::add_dev_full),
];

impl<'s, 'c> Scaffold<'s, 'c> {
    pub fn new(selection: &'s Selection<'c>) -> Self {
        Self {
            selection,
            flags: Flags::derive(selection),
            readme: readme::readme_for(selection),
            manifest: PackageManifest::new(selection.project_name().as_str()),
            support: Directory::new(),
            sources: Directory::new(),
            python: BTreeSet::new(),
        }
    }

    /// Run every stage in order.
    pub fn run(mut self) -> Self {
        for (name, stage) in PIPELINE {
            trace!(stage = name, "running stage");
            stage(&mut self);
        }
        debug!(
            files = self.sources.walk().len(),
            python = self.python.len(),
            "structure generated"
        );
        self
    }

    pub(crate) fn has(&self, category: Category, id: &str) -> bool {
        self.selection.has(category, id)
    }

    /// Append a README section once, keyed by its heading.
    pub(crate) fn readme_section(&mut self, heading: &str, body: &str) {
        if !self.readme.contains(heading) {
            self.readme.push('\n');
            self.readme.push_str(heading);
            self.readme.push('\n');
            self.readme.push_str(body);
        }
    }

    /// Lay out the final tree.
    pub fn into_tree(self) -> VirtualFileTree {
        let mut root = Directory::new();
        root.insert("README.md", Node::File(self.readme));
        root.insert(".env", Node::File(env::env_lines(self.selection).join("\n")));
        root.insert("package.json", Node::File(self.manifest.to_json()));
        for (name, node) in self.support.iter() {
            root.insert(name, node.clone());
        }

        let mut sources = self.sources;
        for dir in SOURCE_DIRS {
            if let Some(Node::Directory(d)) = sources.remove(dir) {
                root.insert_dir_if_any(*dir, d);
            }
        }
        for (name, node) in sources.iter() {
            root.insert(name, node.clone());
        }

        VirtualFileTree::new(self.selection.project_name().clone(), root)
    }
}

/// Generate the project tree for a configuration.
pub fn generate_structure(catalog: &Catalog, config: &Configuration) -> VirtualFileTree {
    let selection = catalog.resolve(config);
    generate_for(&selection)
}

/// Generate the project tree for a resolved selection.
pub fn generate_for(selection: &Selection<'_>) -> VirtualFileTree {
    Scaffold::new(selection).run().into_tree()
}

/// Node and python packages a selection implies, after every stage ran.
pub fn package_sets(selection: &Selection<'_>) -> (Vec<String>, Vec<String>) {
    let scaffold = Scaffold::new(selection).run();
    let node = scaffold.manifest.all_packages();
    let python = scaffold.python.into_iter().collect();
    (node, python)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::file_tree::flatten_structure;
    use crate::domain::value_objects::ProjectName;

    fn cfg(name: &str) -> Configuration {
        Configuration::new(ProjectName::new(name).unwrap())
    }

    fn full() -> Configuration {
        cfg("full")
            .with(Category::Frontend, ["react"])
            .with(Category::Backend, ["express", "fastapi"])
            .with(Category::Database, ["postgresql", "chroma"])
            .with(Category::Tools, ["docker", "eslint", "typescript"])
            .with(Category::AiFrameworks, ["langchain", "crewai"])
            .with(Category::LlmProviders, ["openai", "ollama"])
            .with(Category::Protocols, ["mcp"])
            .with_template("ai-chatbot")
            .with_template("rag-service")
            .with_template("pdf-chat")
    }

    #[test]
    fn empty_configuration_yields_three_root_files() {
        let tree = generate_structure(&Catalog::builtin(), &cfg("empty"));
        assert_eq!(
            tree.root().names().collect::<Vec<_>>(),
            ["README.md", ".env", "package.json"]
        );
    }

    #[test]
    fn generation_is_deterministic() {
        let catalog = Catalog::builtin();
        let a = generate_structure(&catalog, &full());
        let b = generate_structure(&catalog, &full());
        assert_eq!(a, b);
    }

    #[test]
    fn root_layout_order() {
        let tree = generate_structure(&Catalog::builtin(), &full());
        let names: Vec<_> = tree.root().names().collect();
        assert_eq!(&names[..3], ["README.md", ".env", "package.json"]);
        let src = names.iter().position(|n| *n == "src").unwrap();
        let agents = names.iter().position(|n| *n == "agents").unwrap();
        assert!(names.iter().position(|n| *n == "requirements.txt").unwrap() < src);
        assert!(src < agents);
        assert_eq!(*names.last().unwrap(), "agents");
    }

    #[test]
    fn flattened_paths_match_node_kinds() {
        let tree = generate_structure(&Catalog::builtin(), &full());
        let paths = flatten_structure(&tree, "");
        assert_eq!(paths[0], "full/");
        for path in &paths[1..] {
            let node = tree.get(path.trim_end_matches('/')).unwrap();
            assert_eq!(path.ends_with('/'), node.is_directory(), "{path}");
        }
    }

    #[test]
    fn no_empty_directories_are_emitted() {
        let tree = generate_structure(&Catalog::builtin(), &full());
        for (path, node) in tree.root().walk() {
            if let Node::Directory(d) = node {
                assert!(!d.is_empty(), "{path} is empty");
            }
        }
    }

    #[test]
    fn rerunning_stages_is_idempotent() {
        let catalog = Catalog::builtin();
        let config = full();
        let selection = catalog.resolve(&config);
        let once = Scaffold::new(&selection).run();
        let readme = once.readme.clone();
        let sources = once.sources.clone();
        let manifest = once.manifest.clone();
        let twice = once.run();
        assert_eq!(twice.readme, readme);
        assert_eq!(twice.sources, sources);
        assert_eq!(twice.manifest, manifest);
    }

    #[test]
    fn reduced_catalog_generates_only_known_parts() {
        use crate::domain::catalog::TechOption;
        let catalog = Catalog::empty().with_option(Category::Frontend, TechOption::new("vue", "Vue"));
        let config = cfg("small")
            .with(Category::Frontend, ["vue", "react"])
            .with(Category::Backend, ["express"]);
        let tree = generate_structure(&catalog, &config);
        assert!(tree.root().contains("src/main.js"));
        assert!(!tree.root().contains("server"));
        assert!(!tree.root().contains("src/App.jsx"));
    }
}
