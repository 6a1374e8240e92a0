//! `.env` builder.
//!
//! Variable names here are the single source for every generated file that
//! reads the environment; generators reference them through [`var`] rather
//! than retyping them.

use crate::domain::catalog::Catalog;
use crate::domain::entities::configuration::Configuration;
use crate::domain::entities::selection::Selection;
use crate::domain::value_objects::Category;

/// One `KEY=default` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvVar {
    pub key: &'static str,
    pub default: &'static str,
}

const fn v(key: &'static str, default: &'static str) -> EnvVar {
    EnvVar { key, default }
}

/// (category, option id) → variables it needs, in emission order.
static ENV_REGISTRY: &[(Category, &str, &[EnvVar])] = &[
    (Category::LlmProviders, "openai", &[v("OPENAI_API_KEY", "")]),
    (Category::LlmProviders, "anthropic", &[v("ANTHROPIC_API_KEY", "")]),
    (Category::LlmProviders, "gemini", &[v("GEMINI_API_KEY", "")]),
    (Category::LlmProviders, "xai", &[v("XAI_API_KEY", "")]),
    (Category::LlmProviders, "ollama", &[v("OLLAMA_HOST", "localhost")]),
    (
        Category::Database,
        "pinecone",
        &[v("PINECONE_API_KEY", ""), v("PINECONE_ENVIRONMENT", "us-east-1-aws")],
    ),
    (Category::Database, "chroma", &[v("CHROMA_DB_PATH", "./chroma_db")]),
    (
        Category::Database,
        "weaviate",
        &[v("WEAVIATE_URL", "http://localhost:8080"), v("WEAVIATE_API_KEY", "")],
    ),
    (
        Category::Database,
        "qdrant",
        &[v("QDRANT_URL", "http://localhost:6333"), v("QDRANT_API_KEY", "")],
    ),
];

/// Always emitted, always last.
pub const NODE_ENV: EnvVar = v("NODE_ENV", "development");

/// Variables declared for one option (empty if it needs none).
pub fn vars_for(category: Category, id: &str) -> &'static [EnvVar] {
    ENV_REGISTRY
        .iter()
        .find(|(c, i, _)| *c == category && *i == id)
        .map(|(_, _, vars)| *vars)
        .unwrap_or(&[])
}

/// Name of the `index`-th variable of an option.
///
/// Generators use this to embed variable names in source text. Falls back
/// to an empty string for an unregistered option, which the registry test
/// rules out for every option a generator references.
pub fn var(category: Category, id: &str, index: usize) -> &'static str {
    vars_for(category, id).get(index).map(|v| v.key).unwrap_or_default()
}

/// `.env` content for a configuration.
pub fn generate_env(catalog: &Catalog, config: &Configuration) -> String {
    env_lines(&catalog.resolve(config)).join("\n")
}

/// `.env` lines for a resolved selection.
///
/// Providers precede databases; within each group the catalog's declaration
/// order applies. `NODE_ENV` closes the list.
pub fn env_lines(selection: &Selection<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    for category in [Category::LlmProviders, Category::Database] {
        for option in selection.in_catalog_order(category) {
            for var in vars_for(category, &option.id) {
                lines.push(format!("{}={}", var.key, var.default));
            }
        }
    }
    lines.push(format!("{}={}", NODE_ENV.key, NODE_ENV.default));
    lines
}

/// Every variable name a selection declares, `NODE_ENV` included.
pub fn declared_keys(selection: &Selection<'_>) -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = [Category::LlmProviders, Category::Database]
        .into_iter()
        .flat_map(|c| selection.in_catalog_order(c).flat_map(move |o| vars_for(c, &o.id)))
        .map(|v| v.key)
        .collect();
    keys.push(NODE_ENV.key);
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ProjectName;

    fn cfg() -> Configuration {
        Configuration::new(ProjectName::new("x").unwrap())
    }

    #[test]
    fn empty_selection_only_sets_node_env() {
        assert_eq!(generate_env(&Catalog::builtin(), &cfg()), "NODE_ENV=development");
    }

    #[test]
    fn providers_precede_databases_in_catalog_order() {
        let c = cfg()
            .with(Category::Database, ["qdrant", "pinecone"])
            .with(Category::LlmProviders, ["ollama", "openai"]);
        assert_eq!(
            generate_env(&Catalog::builtin(), &c),
            [
                "OPENAI_API_KEY=",
                "OLLAMA_HOST=localhost",
                "PINECONE_API_KEY=",
                "PINECONE_ENVIRONMENT=us-east-1-aws",
                "QDRANT_URL=http://localhost:6333",
                "QDRANT_API_KEY=",
                "NODE_ENV=development",
            ]
            .join("\n")
        );
    }

    #[test]
    fn relational_databases_declare_nothing() {
        let c = cfg().with(Category::Database, ["postgresql", "redis", "chroma"]);
        assert_eq!(
            generate_env(&Catalog::builtin(), &c),
            "CHROMA_DB_PATH=./chroma_db\nNODE_ENV=development"
        );
    }

    #[test]
    fn registry_only_names_catalog_options() {
        let catalog = Catalog::builtin();
        for (category, id, vars) in ENV_REGISTRY {
            assert!(catalog.option(*category, id).is_some(), "{category}/{id}");
            assert!(!vars.is_empty());
        }
    }

    #[test]
    fn var_lookup() {
        assert_eq!(var(Category::Database, "weaviate", 1), "WEAVIATE_API_KEY");
        assert_eq!(var(Category::Database, "redis", 0), "");
    }
}
