//! Package manifest assembly.
//!
//! Node packages come from a fixed id → package table rather than from
//! the catalog's install command strings; python packages are collected by
//! the stages that emit python files. The setup script reads both sets from
//! the same pipeline, so the two outputs cannot drift apart.

use indexmap::IndexMap;
use serde_json::{Value, json};

use super::Scaffold;
use crate::domain::value_objects::Category;

/// Version written for every dependency.
const LATEST: &str = "latest";

/// (category, id) → runtime node packages.
static NODE_PACKAGES: &[(Category, &str, &[&str])] = &[
    (Category::Frontend, "react", &["react", "react-dom", "vite"]),
    (Category::Frontend, "vue", &["vue", "vite"]),
    (Category::Frontend, "nextjs", &["next", "react", "react-dom"]),
    (Category::Backend, "express", &["express", "cors", "helmet"]),
    (Category::Database, "postgresql", &["pg"]),
    (Category::Database, "mongodb", &["mongoose"]),
    (Category::Database, "redis", &["ioredis"]),
    (Category::Protocols, "mcp", &["@modelcontextprotocol/sdk"]),
];

/// (category, id) → python packages for the option's own files.
static PYTHON_PACKAGES: &[(Category, &str, &[&str])] = &[
    (Category::Backend, "fastapi", &["fastapi", "uvicorn"]),
    (Category::Database, "pinecone", &["pinecone-client"]),
    (Category::Database, "chroma", &["chromadb"]),
    (Category::Database, "weaviate", &["weaviate-client>=3.26,<4"]),
    (Category::Database, "qdrant", &["qdrant-client"]),
    (Category::AiFrameworks, "langchain", &["langchain"]),
    (Category::AiFrameworks, "crewai", &["crewai"]),
    (Category::AiFrameworks, "langgraph", &["langgraph"]),
    (Category::AiFrameworks, "semantic-kernel", &["semantic-kernel"]),
    (Category::AiFrameworks, "autogen", &["pyautogen"]),
    (Category::LlmProviders, "openai", &["openai"]),
    (Category::LlmProviders, "anthropic", &["anthropic"]),
    (Category::LlmProviders, "gemini", &["google-generativeai"]),
    (Category::LlmProviders, "xai", &["groq"]),
    (Category::LlmProviders, "ollama", &["requests"]),
];

fn lookup(table: &'static [(Category, &str, &'static [&'static str])], category: Category, id: &str) -> &'static [&'static str] {
    table
        .iter()
        .find(|(c, i, _)| *c == category && *i == id)
        .map(|(_, _, pkgs)| *pkgs)
        .unwrap_or(&[])
}

/// Python packages an option's own files import.
pub fn python_packages_for(category: Category, id: &str) -> &'static [&'static str] {
    lookup(PYTHON_PACKAGES, category, id)
}

/// `package.json` in the making.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    name: String,
    scripts: IndexMap<String, String>,
    dependencies: IndexMap<String, String>,
    dev_dependencies: IndexMap<String, String>,
}

impl PackageManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scripts: IndexMap::new(),
            dependencies: IndexMap::new(),
            dev_dependencies: IndexMap::new(),
        }
    }

    pub fn add_dep(&mut self, name: &str) {
        self.dependencies.insert(name.to_string(), LATEST.to_string());
    }

    pub fn add_dev_dep(&mut self, name: &str) {
        self.dev_dependencies.insert(name.to_string(), LATEST.to_string());
    }

    pub fn set_script(&mut self, name: &str, command: &str) {
        self.scripts.insert(name.to_string(), command.to_string());
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts.get(name).map(String::as_str)
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    pub fn dev_dependencies(&self) -> impl Iterator<Item = &str> {
        self.dev_dependencies.keys().map(String::as_str)
    }

    /// Runtime then dev packages, without duplicates.
    pub fn all_packages(&self) -> Vec<String> {
        let mut all: Vec<String> = Vec::new();
        for name in self.dependencies().chain(self.dev_dependencies()) {
            if !all.iter().any(|n| n == name) {
                all.push(name.to_string());
            }
        }
        all
    }

    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "private": true,
            "type": "module",
            "scripts": self.scripts,
            "dependencies": self.dependencies,
            "devDependencies": self.dev_dependencies,
        })
    }

    /// Two-space indented JSON.
    pub fn to_json(&self) -> String {
        format!("{:#}", self.to_value())
    }
}

/// Scripts and dependencies from the selection.
pub(super) fn assemble(s: &mut Scaffold<'_, '_>) {
    let f = s.flags;

    if f.react || f.vue {
        s.manifest.set_script("dev", "vite");
        s.manifest.set_script("build", "vite build");
        s.manifest.set_script("preview", "vite preview");
    }
    if f.next {
        s.manifest.set_script("dev", "next dev");
        s.manifest.set_script("build", "next build");
        s.manifest.set_script("start", "next start");
    }
    if f.express {
        s.manifest.set_script("server", "node server/server.js");
    }
    if f.fastapi {
        s.manifest.set_script("api", "uvicorn api.main:app --reload");
    }

    for category in [Category::Frontend, Category::Backend] {
        for id in s.selection.ids(category) {
            for pkg in lookup(NODE_PACKAGES, category, id) {
                s.manifest.add_dep(pkg);
            }
        }
    }
    // The chat route calls the OpenAI SDK directly.
    if f.openai && f.express && f.react {
        s.manifest.add_dep("openai");
    }
    for category in [Category::Database, Category::Protocols] {
        for id in s.selection.ids(category) {
            for pkg in lookup(NODE_PACKAGES, category, id) {
                s.manifest.add_dep(pkg);
            }
        }
    }

    if s.has(Category::Tools, "eslint") {
        s.manifest.add_dev_dep("eslint");
    }
    if f.typescript {
        s.manifest.add_dev_dep("typescript");
        s.manifest.add_dev_dep("@types/node");
        if f.express {
            s.manifest.add_dev_dep("@types/express");
        }
        if f.react {
            s.manifest.add_dev_dep("@types/react");
            s.manifest.add_dev_dep("@types/react-dom");
        }
    }
}

/// `dev:full` when both a server and a dev script exist.
pub(super) fn add_dev_full(s: &mut Scaffold<'_, '_>) {
    if s.manifest.script("server").is_none() || s.manifest.script("dev").is_none() {
        return;
    }
    s.manifest.add_dev_dep("concurrently");
    s.manifest
        .set_script("dev:full", r#"concurrently "npm run server" "npm run dev""#);
    s.readme_section(
        "### Full-stack Dev",
        "Use `npm run dev:full` to start both server and frontend (requires concurrently).\n",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;
    use crate::domain::entities::configuration::Configuration;
    use crate::domain::value_objects::ProjectName;

    fn manifest_for(config: &Configuration) -> PackageManifest {
        let catalog = Catalog::builtin();
        let selection = catalog.resolve(config);
        Scaffold::new(&selection).run().manifest
    }

    fn cfg() -> Configuration {
        Configuration::new(ProjectName::new("app").unwrap())
    }

    #[test]
    fn empty_manifest_shape() {
        let m = PackageManifest::new("app");
        assert_eq!(
            m.to_json(),
            "{\n  \"name\": \"app\",\n  \"private\": true,\n  \"type\": \"module\",\n  \"scripts\": {},\n  \"dependencies\": {},\n  \"devDependencies\": {}\n}"
        );
    }

    #[test]
    fn next_overrides_vite_dev_script() {
        let m = manifest_for(&cfg().with(Category::Frontend, ["react", "nextjs"]));
        assert_eq!(m.script("dev"), Some("next dev"));
        assert_eq!(m.script("preview"), Some("vite preview"));
        assert_eq!(m.dependencies().collect::<Vec<_>>(), ["react", "react-dom", "vite", "next"]);
    }

    #[test]
    fn openai_sdk_only_for_react_express_chat() {
        let with_chat = cfg()
            .with(Category::Frontend, ["react"])
            .with(Category::Backend, ["express"])
            .with(Category::LlmProviders, ["openai"]);
        assert!(manifest_for(&with_chat).dependencies().any(|d| d == "openai"));

        let without_front = cfg()
            .with(Category::Backend, ["express"])
            .with(Category::LlmProviders, ["openai"]);
        assert!(!manifest_for(&without_front).dependencies().any(|d| d == "openai"));
    }

    #[test]
    fn typescript_dev_dependencies() {
        let m = manifest_for(
            &cfg()
                .with(Category::Frontend, ["react"])
                .with(Category::Backend, ["express"])
                .with(Category::Tools, ["typescript", "eslint"]),
        );
        assert_eq!(
            m.dev_dependencies().collect::<Vec<_>>(),
            [
                "eslint",
                "typescript",
                "@types/node",
                "@types/express",
                "@types/react",
                "@types/react-dom",
                "concurrently"
            ]
        );
    }

    #[test]
    fn dev_full_needs_server_and_dev() {
        let m = manifest_for(
            &cfg()
                .with(Category::Frontend, ["vue"])
                .with(Category::Backend, ["express"]),
        );
        assert_eq!(
            m.script("dev:full"),
            Some(r#"concurrently "npm run server" "npm run dev""#)
        );

        let api_only = manifest_for(&cfg().with(Category::Backend, ["express"]));
        assert!(api_only.script("dev:full").is_none());
        assert!(!api_only.dev_dependencies().any(|d| d == "concurrently"));
    }

    #[test]
    fn all_packages_deduplicates() {
        let mut m = PackageManifest::new("x");
        m.add_dep("react");
        m.add_dev_dep("react");
        m.add_dev_dep("eslint");
        assert_eq!(m.all_packages(), ["react", "eslint"]);
    }
}
