//! Setup script generation.
//!
//! The script installs exactly the packages the structure generator's
//! pipeline implies, so the two never disagree. Every interpolated value is
//! shell-quoted; the date comment is the only varying line.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::domain::catalog::Catalog;
use crate::domain::entities::configuration::Configuration;
use crate::domain::env;
use crate::domain::generator::package_sets;
use crate::domain::value_objects::Category;

/// Installed when nothing else is.
pub const FALLBACK_NODE_PACKAGE: &str = "react";

/// Setup script for a configuration, dated today.
pub fn generate_script(catalog: &Catalog, config: &Configuration) -> String {
    generate_script_on(catalog, config, Local::now().date_naive())
}

/// Setup script with an explicit date.
pub fn generate_script_on(catalog: &Catalog, config: &Configuration, date: NaiveDate) -> String {
    let effective = effective_configuration(catalog, config);
    let selection = catalog.resolve(&effective);
    let (node, python) = package_sets(&selection);
    debug!(node = node.len(), python = python.len(), "script packages aggregated");

    let name = selection.project_name().as_str();
    let mut lines = vec![
        "#!/usr/bin/env bash".to_string(),
        "# Generated by GenAppXpress".to_string(),
        format!("# Date: {}", date.format("%Y-%m-%d")),
        "set -e".to_string(),
        String::new(),
        format!("echo {}", shell_quote(&format!("[INFO] Creating project {name}"))),
        format!("mkdir -p {}", shell_quote(name)),
        format!("cd {}", shell_quote(name)),
        "echo \"[INFO] Installing Node dependencies\"".to_string(),
    ];

    let node_args = if node.is_empty() {
        FALLBACK_NODE_PACKAGE.to_string()
    } else {
        install_args(&node)
    };
    lines.push(format!("npm install {node_args}"));

    if !python.is_empty() {
        lines.push("echo \"[INFO] Setting up Python virtual environment\"".to_string());
        lines.push("python3 -m venv .venv || python -m venv .venv".to_string());
        lines.push("source .venv/bin/activate".to_string());
        lines.push(format!("pip install {}", install_args(&python)));
    }

    let env_content = env::env_lines(&selection).join("\n");
    lines.push("echo \"[INFO] Writing .env\"".to_string());
    lines.push(format!("printf '{}\\n' > .env", printf_escape(&env_content)));

    let has = |c, id| selection.has(c, id);
    if has(Category::Backend, "fastapi") {
        lines.push(
            "echo \"[INFO] To run FastAPI: source .venv/bin/activate && uvicorn api.main:app --reload\"".to_string(),
        );
    }
    if has(Category::Backend, "express") {
        lines.push("echo \"[INFO] To run Express: npm run server\"".to_string());
    }
    if has(Category::Frontend, "react") || has(Category::Frontend, "vue") {
        lines.push("echo \"[INFO] To run Frontend: npm run dev\"".to_string());
    }
    if has(Category::Frontend, "nextjs") {
        lines.push("echo \"[INFO] To run Next.js: npm run dev\"".to_string());
    }
    lines.push("echo \"[DONE] Scaffold complete\"".to_string());

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

/// The configuration a script aggregates from.
///
/// With exactly one active template, that template's preset is overlaid on
/// the user's own picks; otherwise the configuration is used as is.
pub fn effective_configuration(catalog: &Catalog, config: &Configuration) -> Configuration {
    match config.templates.as_slice() {
        [only] => match catalog.template(only) {
            Some(template) => config.overlaid_with(&template.preset),
            None => config.clone(),
        },
        _ => config.clone(),
    }
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "@/._=:+,-".contains(c)
}

/// Single-quote `value` for POSIX shells.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Space-separated package list; tokens outside the safe set are quoted.
fn install_args(packages: &[String]) -> String {
    packages
        .iter()
        .map(|p| {
            if !p.is_empty() && p.chars().all(is_shell_safe) {
                p.clone()
            } else {
                shell_quote(p)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for a single-quoted `printf` format string.
fn printf_escape(text: &str) -> String {
    text.replace('\\', r"\\")
        .replace('%', "%%")
        .replace('\'', r"'\''")
        .replace('\n', r"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ProjectName;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn cfg(name: &str) -> Configuration {
        Configuration::new(ProjectName::new(name).unwrap())
    }

    fn script(config: &Configuration) -> String {
        generate_script_on(&Catalog::builtin(), config, date())
    }

    #[test]
    fn empty_configuration_installs_fallback() {
        let s = script(&cfg("empty"));
        assert_eq!(
            s,
            [
                "#!/usr/bin/env bash",
                "# Generated by GenAppXpress",
                "# Date: 2024-05-17",
                "set -e",
                "",
                "echo '[INFO] Creating project empty'",
                "mkdir -p 'empty'",
                "cd 'empty'",
                "echo \"[INFO] Installing Node dependencies\"",
                "npm install react",
                "echo \"[INFO] Writing .env\"",
                "printf 'NODE_ENV=development\\n' > .env",
                "echo \"[DONE] Scaffold complete\"",
                "",
            ]
            .join("\n")
        );
    }

    #[test]
    fn single_template_preset_is_overlaid() {
        let s = script(&cfg("x").with_template("ai-chatbot"));
        assert!(s.contains("npm install react react-dom vite express cors helmet openai concurrently\n"));
        assert!(s.contains("pip install langchain langchain-openai openai\n"));
        assert!(s.contains("printf 'OPENAI_API_KEY=\\nNODE_ENV=development\\n' > .env"));
        assert!(s.contains("To run Express: npm run server"));
        assert!(s.contains("To run Frontend: npm run dev"));
    }

    #[test]
    fn two_templates_use_raw_configuration() {
        let config = cfg("x").with_template("ai-chatbot").with_template("rag-service");
        assert!(script(&config).contains("npm install react\n"));
    }

    #[test]
    fn user_extras_survive_the_overlay() {
        let config = cfg("x")
            .with(Category::Tools, ["eslint"])
            .with(Category::Frontend, ["vue"])
            .with_template("ai-chatbot");
        let effective = effective_configuration(&Catalog::builtin(), &config);
        assert_eq!(effective.frontend, ["react", "vue"]);
        assert_eq!(effective.tools, ["eslint"]);
    }

    #[test]
    fn structure_and_script_agree_on_python_packages() {
        let config = cfg("x")
            .with(Category::Backend, ["fastapi"])
            .with(Category::Database, ["weaviate"])
            .with_template("pdf-chat");
        let s = script(&config);
        assert!(s.contains("'weaviate-client>=3.26,<4'"));
        assert!(s.contains("PyPDF2"));
        assert!(s.contains("python-multipart"));
    }

    #[test]
    fn quoting_helpers() {
        assert_eq!(shell_quote("a'b"), r"'a'\''b'");
        assert_eq!(printf_escape("50%\\x\ny'"), r"50%%\\x\ny'\''");
        assert_eq!(
            install_args(&["@types/node".into(), "a b".into()]),
            "@types/node 'a b'"
        );
    }
}
