//! Integration tests for genappx-core.
//!
//! Each test pins one observable property of the generators, driven through
//! the public API only.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use genappx_core::domain::{
    Catalog, Category, Configuration, MCP_ADVISORY, Node, ProjectName, TechOption,
    check_compatibility, declared_keys, flatten_structure, generate_env, generate_script_on,
    generate_structure,
};

fn config(name: &str) -> Configuration {
    Configuration::new(ProjectName::new(name).unwrap())
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
}

fn rich_configurations(catalog: &Catalog) -> Vec<Configuration> {
    let mut out = Vec::new();
    for template in catalog.templates() {
        for database in ["chroma", "pinecone", "weaviate", "qdrant", "postgresql"] {
            let mut cfg = config("rich")
                .with(Category::Frontend, ["react"])
                .with(Category::Backend, ["express", "fastapi"])
                .with(Category::Database, [database])
                .with(Category::Tools, ["docker", "typescript", "eslint"])
                .with(Category::AiFrameworks, ["langchain", "crewai", "semantic-kernel"])
                .with(Category::LlmProviders, ["openai", "anthropic", "gemini", "ollama"])
                .with(Category::Protocols, ["mcp"]);
            catalog.apply_template(&mut cfg, &template.id).unwrap();
            out.push(cfg);
        }
        let mut bare = config("bare");
        catalog.apply_template(&mut bare, &template.id).unwrap();
        out.push(bare);
    }
    out
}

#[test]
fn structure_is_deterministic() {
    let catalog = Catalog::builtin();
    for cfg in rich_configurations(&catalog) {
        let first = generate_structure(&catalog, &cfg);
        let second = generate_structure(&catalog, &cfg);
        assert_eq!(first, second);
        assert_eq!(
            generate_script_on(&catalog, &cfg, date()),
            generate_script_on(&catalog, &cfg, date())
        );
    }
}

#[test]
fn flattened_paths_match_node_kinds() {
    let catalog = Catalog::builtin();
    for cfg in rich_configurations(&catalog) {
        let tree = generate_structure(&catalog, &cfg);
        let prefix = format!("{}/", tree.name());
        for path in flatten_structure(&tree, "") {
            let inner = path.strip_prefix(&prefix).unwrap_or("");
            if inner.is_empty() {
                assert_eq!(path, prefix);
                continue;
            }
            match inner.strip_suffix('/') {
                Some(dir) => assert!(
                    matches!(tree.root().get(dir), Some(Node::Directory(_))),
                    "{path} should be a directory"
                ),
                None => assert!(
                    matches!(tree.root().get(inner), Some(Node::File(_))),
                    "{path} should be a file"
                ),
            }
        }
    }
}

#[test]
fn compatibility_is_symmetric() {
    let catalog = Catalog::empty()
        .with_option(Category::Frontend, TechOption::new("a", "A"))
        .with_option(Category::Frontend, TechOption::new("z", "Z").compatible_with(["*"]))
        .with_option(Category::Backend, TechOption::new("b", "B").compatible_with(["a"]))
        .with_option(Category::Backend, TechOption::new("c", "C"));

    let forward = config("p")
        .with(Category::Frontend, ["a", "z"])
        .with(Category::Backend, ["b", "c"]);
    let reverse = config("p")
        .with(Category::Frontend, ["z", "a"])
        .with(Category::Backend, ["c", "b"]);

    let set = |cfg: &Configuration| -> BTreeSet<String> {
        check_compatibility(&catalog, cfg).conflicts.into_iter().collect()
    };
    assert_eq!(set(&forward), set(&reverse));
    assert_eq!(set(&forward).into_iter().collect::<Vec<_>>(), ["A may not pair cleanly with C"]);
}

/// Names read through `process.env.X` or `os.getenv('X'...)`.
fn env_reads(source: &str) -> BTreeSet<String> {
    let ident = |rest: &str| -> String {
        rest.chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect()
    };
    let mut names = BTreeSet::new();
    for (needle, skip) in [("process.env.", 0), ("os.getenv(", 1), ("os.environ.get(", 1)] {
        for (at, _) in source.match_indices(needle) {
            let rest = &source[at + needle.len() + skip..];
            let name = ident(rest);
            if !name.is_empty() {
                names.insert(name);
            }
        }
    }
    names
}

#[test]
fn generated_code_reads_only_declared_variables() {
    let catalog = Catalog::builtin();
    for cfg in rich_configurations(&catalog) {
        let declared = declared_keys(&catalog.resolve(&cfg));
        let env = generate_env(&catalog, &cfg);
        let written: Vec<&str> = env.lines().filter_map(|l| l.split('=').next()).collect();
        assert_eq!(written, declared);

        let tree = generate_structure(&catalog, &cfg);
        for (path, content) in tree.files() {
            for name in env_reads(content) {
                assert!(
                    name == "PORT" || declared.contains(&name.as_str()),
                    "{path} reads undeclared {name} (templates: {:?})",
                    cfg.templates
                );
            }
        }
    }
}

#[test]
fn env_reader_finds_both_syntaxes() {
    let names = env_reads("const k = process.env.OPENAI_API_KEY;\nx = os.getenv('QDRANT_URL', 'y')");
    assert_eq!(names.into_iter().collect::<Vec<_>>(), ["OPENAI_API_KEY", "QDRANT_URL"]);
}

#[test]
fn chatbot_template_alone_installs_its_preset() {
    let catalog = Catalog::builtin();
    let script = generate_script_on(&catalog, &config("x").with_template("ai-chatbot"), date());
    for package in ["react", "express", "openai"] {
        assert!(
            script.lines().any(|l| l.starts_with("npm install") && l.split(' ').any(|p| p == package)),
            "missing {package}"
        );
    }
    assert!(script.contains("pip install langchain"));
}

#[test]
fn repeated_ids_in_saved_configuration_keep_the_preset() {
    let catalog = Catalog::builtin();
    let cfg: Configuration = serde_json::from_str(
        r#"{"projectName":"x","frontend":["react","react"],"templates":["ai-chatbot","ai-chatbot"]}"#,
    )
    .unwrap();

    let script = generate_script_on(&catalog, &cfg, date());
    assert!(script.contains("express"));
    assert!(script.contains("pip install langchain"));

    let tree = generate_structure(&catalog, &cfg);
    let readme = tree.root().get("README.md").and_then(Node::as_file).unwrap();
    assert!(!readme.contains("react, react"));
    assert!(!readme.contains("ai-chatbot, ai-chatbot"));
}

#[test]
fn empty_configuration_yields_minimal_tree() {
    let catalog = Catalog::builtin();
    let tree = generate_structure(&catalog, &config("empty"));
    let names: Vec<_> = tree.root().names().collect();
    assert_eq!(names, ["README.md", ".env", "package.json"]);
    assert_eq!(
        flatten_structure(&tree, ""),
        ["empty/", "empty/README.md", "empty/.env", "empty/package.json"]
    );
}

#[test]
fn empty_script_still_installs_something() {
    let script = generate_script_on(&Catalog::builtin(), &config("empty"), date());
    let install = script.lines().find(|l| l.starts_with("npm install ")).unwrap();
    assert!(install.len() > "npm install ".len());
}

#[test]
fn mcp_without_tool_calling_provider_warns() {
    let cfg = config("p")
        .with(Category::Protocols, ["mcp"])
        .with(Category::LlmProviders, ["gemini"]);
    let report = check_compatibility(&Catalog::builtin(), &cfg);
    assert!(report.warnings.iter().any(|w| w == MCP_ADVISORY));

    let ok = cfg.with(Category::LlmProviders, ["anthropic"]);
    assert!(!check_compatibility(&Catalog::builtin(), &ok).warnings.contains(&MCP_ADVISORY.to_string()));
}

#[test]
fn unknown_ids_contribute_nothing() {
    let catalog = Catalog::builtin();
    let plain = config("p").with(Category::Frontend, ["react"]);
    let noisy = plain
        .clone()
        .with(Category::Frontend, ["svelte"])
        .with(Category::Database, ["cassandra"])
        .with_template("ghost");
    assert_eq!(generate_env(&catalog, &plain), generate_env(&catalog, &noisy));
    assert_eq!(
        flatten_structure(&generate_structure(&catalog, &plain), ""),
        flatten_structure(&generate_structure(&catalog, &noisy), "")
    );
}
