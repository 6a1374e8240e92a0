//! Root-level tool and build configuration.

use serde_json::json;

use super::{Flags, Scaffold};
use crate::domain::value_objects::Category;

pub(super) fn emit(s: &mut Scaffold<'_, '_>) {
    let f = s.flags;

    if s.has(Category::Tools, "eslint") {
        s.support.put_file(".eslintrc.cjs", eslint(&f));
    }
    if f.typescript {
        s.support.put_file("tsconfig.json", tsconfig());
    }
    if f.react || f.vue {
        s.support.put_file("vite.config.js", vite_config(&f));
    }
    if f.next {
        s.support.put_file(
            "next.config.js",
            "/** @type {import('next').NextConfig} */\nconst nextConfig = {};\nexport default nextConfig;\n",
        );
    }
    if s.has(Category::Tools, "docker") {
        s.support.put_file("Dockerfile", DOCKERFILE);
        let compose = docker_compose(s.has(Category::Database, "postgresql"));
        s.support.put_file("docker-compose.yml", compose);
    }
    if f.react || f.vue {
        let name = s.selection.project_name().as_str();
        s.support.put_file("index.html", index_html(name, &f));
    }
    if !s.python.is_empty() {
        let mut requirements = s.python.iter().cloned().collect::<Vec<_>>().join("\n");
        requirements.push('\n');
        s.support.put_file("requirements.txt", requirements);
    }
}

fn eslint(f: &Flags) -> String {
    let react = if f.react { ", 'plugin:react/recommended'" } else { "" };
    format!(
        "module.exports = {{\n  \
         env: {{ browser: true, es2021: true, node: true }},\n  \
         extends: ['eslint:recommended'{react}],\n  \
         parserOptions: {{ ecmaVersion: 12, sourceType: 'module' }},\n  \
         rules: {{}},\n\
         }};\n"
    )
}

fn tsconfig() -> String {
    let config = json!({
        "compilerOptions": {
            "target": "ES2020",
            "module": "ESNext",
            "jsx": "react-jsx",
            "moduleResolution": "Node",
            "esModuleInterop": true,
            "strict": true,
            "skipLibCheck": true,
        },
        "include": ["src"],
    });
    format!("{config:#}\n")
}

/// Dev server config; proxies `/api` to whichever backend serves it.
fn vite_config(f: &Flags) -> String {
    let port = if f.express {
        Some(3001)
    } else if f.fastapi {
        Some(8000)
    } else {
        None
    };
    let server = port
        .map(|p| format!("  server: {{\n    proxy: {{\n      '/api': 'http://localhost:{p}',\n    }},\n  }},\n"))
        .unwrap_or_default();
    // Vue templates are compiled at runtime from the string in main.js.
    let resolve = if f.vue {
        "  resolve: {\n    alias: { vue: 'vue/dist/vue.esm-bundler.js' },\n  },\n"
    } else {
        ""
    };
    format!("import {{ defineConfig }} from 'vite';\n\nexport default defineConfig({{\n{resolve}{server}}});\n")
}

const DOCKERFILE: &str = "# Simple build for Node + optional frontend\n\
FROM node:20-alpine AS base\n\
WORKDIR /app\n\
COPY package*.json ./\n\
RUN npm install\n\
COPY . .\n\
CMD [\"npm\", \"run\", \"dev\"]\n";

fn docker_compose(postgres: bool) -> String {
    let db = if postgres {
        "  db:\n    \
         image: postgres:16\n    \
         environment:\n      \
         - POSTGRES_PASSWORD=postgres\n    \
         ports:\n      \
         - '5432:5432'\n"
    } else {
        ""
    };
    format!(
        "version: '3.9'\n\
         services:\n  \
         app:\n    \
         build: .\n    \
         ports:\n      \
         - '5173:5173'\n      \
         - '3001:3001'\n    \
         environment:\n      \
         - NODE_ENV=development\n\
         {db}"
    )
}

fn index_html(name: &str, f: &Flags) -> String {
    let entry = if f.react { format!("/src/main.{}", f.jsx()) } else { "/src/main.js".to_string() };
    format!(
        "<!DOCTYPE html>\n\
         <html>\n  \
         <head>\n    \
         <meta charset=\"UTF-8\" />\n    \
         <title>{name}</title>\n  \
         </head>\n  \
         <body>\n    \
         <div id=\"root\"></div>\n    \
         <script type=\"module\" src=\"{entry}\"></script>\n  \
         </body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;
    use crate::domain::entities::configuration::Configuration;
    use crate::domain::generator::generate_structure;
    use crate::domain::value_objects::ProjectName;

    fn cfg() -> Configuration {
        Configuration::new(ProjectName::new("sup").unwrap())
    }

    #[test]
    fn compose_adds_db_service_for_postgres_only() {
        assert!(docker_compose(true).contains("image: postgres:16"));
        assert!(!docker_compose(false).contains("db:"));
    }

    #[test]
    fn support_files_follow_fixed_order() {
        let config = cfg()
            .with(Category::Frontend, ["react"])
            .with(Category::Backend, ["fastapi"])
            .with(Category::Tools, ["docker", "typescript", "eslint"]);
        let tree = generate_structure(&Catalog::builtin(), &config);
        let names: Vec<_> = tree.root().names().collect();
        assert_eq!(
            names,
            [
                "README.md",
                ".env",
                "package.json",
                ".eslintrc.cjs",
                "tsconfig.json",
                "vite.config.js",
                "Dockerfile",
                "docker-compose.yml",
                "index.html",
                "requirements.txt",
                "src",
                "api",
            ]
        );
        let vite = tree.root().file("vite.config.js").unwrap();
        assert!(vite.contains("'/api': 'http://localhost:8000'"));
        let html = tree.root().file("index.html").unwrap();
        assert!(html.contains("src=\"/src/main.tsx\""));
        assert!(html.contains("<title>sup</title>"));
    }

    #[test]
    fn tsconfig_is_pretty_json() {
        let ts = tsconfig();
        assert!(ts.starts_with("{\n  \"compilerOptions\": {\n    \"target\": \"ES2020\","));
        assert!(ts.ends_with("\"include\": [\n    \"src\"\n  ]\n}\n"));
    }

    #[test]
    fn vue_gets_runtime_compiler_alias() {
        let tree = generate_structure(&Catalog::builtin(), &cfg().with(Category::Frontend, ["vue"]));
        let vite = tree.root().file("vite.config.js").unwrap();
        assert!(vite.contains("vue.esm-bundler.js"));
        assert!(!vite.contains("proxy"));
    }
}
