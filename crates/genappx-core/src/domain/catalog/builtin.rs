//! Built-in technology and template registry.
//!
//! Every selectable technology is described exactly once by an
//! [`OptionDef`] in its category table, and every template by one
//! [`TemplateDef`]. [`Catalog::builtin`](super::Catalog::builtin) turns these
//! tables into owned catalog data.
//!
//! # Adding a technology
//!
//! 1. Add one [`OptionDef`] to the matching category table
//! 2. Register its files in `generator/` and its packages in
//!    `generator/packages.rs`

use crate::domain::value_objects::Category;

/// Static description of one technology option.
#[derive(Debug, Clone, Copy)]
pub struct OptionDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Ids this option declares compatible; `"*"` is a wildcard.
    pub compatible: &'static [&'static str],
    pub commands: &'static [&'static str],
    pub config_files: &'static [&'static str],
}

/// Static description of one template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateDef {
    pub id: &'static str,
    pub name: &'static str,
    /// Display grouping, not a [`Category`].
    pub group: &'static str,
    pub description: &'static str,
    pub preset: &'static [(Category, &'static [&'static str])],
}

// ── Options ──────────────────────────────────────────────────────────────────

pub static FRONTEND: &[OptionDef] = &[
    OptionDef {
        id: "react",
        name: "React",
        description: "UI library",
        compatible: &["vite", "webpack", "typescript", "tailwind", "jest", "express", "fastapi"],
        commands: &["npm install react react-dom"],
        config_files: &["src/App.jsx"],
    },
    OptionDef {
        id: "vue",
        name: "Vue.js",
        description: "Progressive framework",
        compatible: &["vite", "webpack", "typescript"],
        commands: &["npm install vue"],
        config_files: &["src/main.js"],
    },
    OptionDef {
        id: "nextjs",
        name: "Next.js",
        description: "SSR React framework",
        compatible: &["typescript", "tailwind"],
        commands: &["npx create-next-app@latest"],
        config_files: &["next.config.js"],
    },
];

pub static BACKEND: &[OptionDef] = &[
    OptionDef {
        id: "express",
        name: "Express.js",
        description: "Fast Node.js web framework",
        compatible: &[
            "react", "vue", "nextjs", "postgresql", "mysql", "mongodb", "sqlite", "redis",
            "langchain", "openai",
        ],
        commands: &["npm install express cors helmet"],
        config_files: &["server/server.js"],
    },
    OptionDef {
        id: "fastapi",
        name: "FastAPI",
        description: "Python high-performance API",
        compatible: &[
            "postgresql", "mysql", "sqlite", "langchain", "openai", "anthropic", "gemini",
        ],
        commands: &["pip install fastapi uvicorn"],
        config_files: &["api/main.py"],
    },
];

pub static DATABASE: &[OptionDef] = &[
    OptionDef {
        id: "postgresql",
        name: "PostgreSQL",
        description: "Advanced RDBMS",
        compatible: &["express", "fastapi", "langchain", "mcp"],
        commands: &["npm install pg"],
        config_files: &["database/schema.sql"],
    },
    OptionDef {
        id: "mongodb",
        name: "MongoDB",
        description: "Document database",
        compatible: &["express"],
        commands: &["npm install mongoose"],
        config_files: &["database/models/index.js"],
    },
    OptionDef {
        id: "redis",
        name: "Redis",
        description: "In-memory cache & store",
        compatible: &["express", "fastapi", "langchain"],
        commands: &["npm install ioredis"],
        config_files: &["database/redis.js"],
    },
    OptionDef {
        id: "pinecone",
        name: "Pinecone",
        description: "Managed vector database",
        compatible: &["langchain", "openai", "anthropic", "gemini", "fastapi", "express"],
        commands: &["pip install pinecone-client"],
        config_files: &["database/vector/pinecone_client.py"],
    },
    OptionDef {
        id: "chroma",
        name: "ChromaDB",
        description: "Open-source vector database",
        compatible: &["langchain", "openai", "anthropic", "gemini", "fastapi", "express"],
        commands: &["pip install chromadb"],
        config_files: &["database/vector/chroma_client.py"],
    },
    OptionDef {
        id: "weaviate",
        name: "Weaviate",
        description: "Vector search engine",
        compatible: &["langchain", "openai", "anthropic", "gemini", "fastapi", "express"],
        commands: &["pip install weaviate-client"],
        config_files: &["database/vector/weaviate_client.py"],
    },
    OptionDef {
        id: "qdrant",
        name: "Qdrant",
        description: "Vector similarity search",
        compatible: &["langchain", "openai", "anthropic", "gemini", "fastapi", "express"],
        commands: &["pip install qdrant-client"],
        config_files: &["database/vector/qdrant_client.py"],
    },
];

pub static TOOLS: &[OptionDef] = &[
    OptionDef {
        id: "docker",
        name: "Docker",
        description: "Containers & compose",
        compatible: &["*"],
        commands: &["docker --version"],
        config_files: &["Dockerfile", "docker-compose.yml"],
    },
    OptionDef {
        id: "eslint",
        name: "ESLint",
        description: "Linting",
        compatible: &["react", "vue", "express"],
        commands: &["npm install -D eslint"],
        config_files: &[".eslintrc.cjs"],
    },
    OptionDef {
        id: "typescript",
        name: "TypeScript",
        description: "Static typing",
        compatible: &["react", "vue", "nextjs", "express"],
        commands: &["npm install -D typescript @types/node"],
        config_files: &["tsconfig.json"],
    },
];

pub static AI_FRAMEWORKS: &[OptionDef] = &[
    OptionDef {
        id: "langchain",
        name: "LangChain",
        description: "Chaining & agents",
        compatible: &["openai", "anthropic", "gemini", "xai", "ollama", "mcp", "fastapi", "express"],
        commands: &["pip install langchain"],
        config_files: &["agents/agent_langchain.py"],
    },
    OptionDef {
        id: "crewai",
        name: "CrewAI",
        description: "Role-based multi-agent",
        compatible: &["openai", "anthropic", "gemini", "xai", "ollama"],
        commands: &["pip install crewai"],
        config_files: &["agents/agent_crewai.py"],
    },
    OptionDef {
        id: "langgraph",
        name: "LangGraph",
        description: "Graph orchestration",
        compatible: &["openai", "anthropic", "gemini"],
        commands: &["pip install langgraph"],
        config_files: &["agents/agent_langgraph.py"],
    },
    OptionDef {
        id: "semantic-kernel",
        name: "Semantic Kernel",
        description: "Model-agnostic orchestration",
        compatible: &["openai", "anthropic", "gemini", "xai"],
        commands: &["pip install semantic-kernel"],
        config_files: &["agents/agent_sk.py"],
    },
    OptionDef {
        id: "autogen",
        name: "Microsoft AutoGen",
        description: "Multi-agent orchestration",
        compatible: &["openai", "anthropic", "gemini"],
        commands: &["pip install pyautogen"],
        config_files: &["agents/agent_autogen.py"],
    },
];

pub static LLM_PROVIDERS: &[OptionDef] = &[
    OptionDef {
        id: "openai",
        name: "OpenAI",
        description: "Agents + GPT models",
        compatible: &["langchain", "crewai", "langgraph", "semantic-kernel", "autogen"],
        commands: &["pip install openai"],
        config_files: &["agents/providers/openai_client.py"],
    },
    OptionDef {
        id: "anthropic",
        name: "Anthropic",
        description: "Claude models",
        compatible: &["langchain", "crewai", "langgraph", "semantic-kernel"],
        commands: &["pip install anthropic"],
        config_files: &["agents/providers/anthropic_client.py"],
    },
    OptionDef {
        id: "gemini",
        name: "Google Gemini",
        description: "Multimodal models",
        compatible: &["langchain", "crewai", "langgraph"],
        commands: &["pip install google-generativeai"],
        config_files: &["agents/providers/gemini_client.py"],
    },
    OptionDef {
        id: "xai",
        name: "xAI Grok",
        description: "Grok models",
        compatible: &["langchain", "crewai"],
        commands: &["pip install groq"],
        config_files: &["agents/providers/xai_client.py"],
    },
    OptionDef {
        id: "ollama",
        name: "Ollama",
        description: "Local models runtime",
        compatible: &["langchain", "crewai", "semantic-kernel"],
        commands: &[],
        config_files: &["agents/providers/ollama_client.py"],
    },
];

pub static PROTOCOLS: &[OptionDef] = &[
    OptionDef {
        id: "mcp",
        name: "MCP",
        description: "Model Context Protocol integration",
        compatible: &["openai", "anthropic", "langchain", "postgresql"],
        commands: &["npm install mcp-sdk"],
        config_files: &[],
    },
    OptionDef {
        id: "swarm",
        name: "Swarm",
        description: "Lightweight agent protocol concept",
        compatible: &["openai", "anthropic"],
        commands: &[],
        config_files: &[],
    },
];

/// Category → option table. Indexed by [`Category::index`].
pub static OPTION_REGISTRY: [(Category, &[OptionDef]); 7] = [
    (Category::Frontend, FRONTEND),
    (Category::Backend, BACKEND),
    (Category::Database, DATABASE),
    (Category::Tools, TOOLS),
    (Category::AiFrameworks, AI_FRAMEWORKS),
    (Category::LlmProviders, LLM_PROVIDERS),
    (Category::Protocols, PROTOCOLS),
];

// ── Templates ────────────────────────────────────────────────────────────────

use Category::{AiFrameworks as AF, Backend as BE, Database as DB, Frontend as FE};
use Category::{LlmProviders as LLM, Protocols as PROTO};

pub static TEMPLATES: &[TemplateDef] = &[
    TemplateDef {
        id: "ai-chatbot",
        name: "AI Chatbot",
        group: "Conversational",
        description: "Streaming chat UI + provider adapter",
        preset: &[(FE, &["react"]), (BE, &["express"]), (AF, &["langchain"]), (LLM, &["openai"])],
    },
    TemplateDef {
        id: "support-triage",
        name: "Support Triage Bot",
        group: "Conversational",
        description: "Classify & respond to support tickets",
        preset: &[(FE, &["react"]), (BE, &["express"]), (AF, &["langchain"]), (LLM, &["anthropic"])],
    },
    TemplateDef {
        id: "slack-bot",
        name: "Slack Bot",
        group: "Conversational",
        description: "Slack events + agent replies",
        preset: &[(BE, &["express"]), (AF, &["crewai"]), (LLM, &["openai"])],
    },
    TemplateDef {
        id: "rag-service",
        name: "RAG Service",
        group: "RAG / Retrieval",
        description: "Embedding + vector search API",
        preset: &[(BE, &["fastapi"]), (DB, &["chroma"]), (AF, &["langchain"]), (LLM, &["openai"])],
    },
    TemplateDef {
        id: "pdf-chat",
        name: "PDF Chat",
        group: "RAG / Retrieval",
        description: "Upload PDFs and chat over content",
        preset: &[
            (FE, &["react"]),
            (BE, &["fastapi"]),
            (DB, &["chroma"]),
            (AF, &["langchain"]),
            (LLM, &["openai"]),
        ],
    },
    TemplateDef {
        id: "vector-ingest",
        name: "Vector Ingest Pipeline",
        group: "RAG / Retrieval",
        description: "Chunking + embedding loader service",
        preset: &[(BE, &["fastapi"]), (DB, &["pinecone"]), (AF, &["langchain"]), (LLM, &["openai"])],
    },
    TemplateDef {
        id: "web-research",
        name: "Web Research Agent",
        group: "Research / Automation",
        description: "Planning + browsing tools",
        preset: &[
            (FE, &["react"]),
            (BE, &["express"]),
            (AF, &["crewai"]),
            (LLM, &["openai"]),
            (PROTO, &["mcp"]),
        ],
    },
    TemplateDef {
        id: "process-automator",
        name: "Process Automator",
        group: "Research / Automation",
        description: "Role agents for workflows",
        preset: &[(BE, &["fastapi"]), (AF, &["crewai"]), (LLM, &["anthropic"])],
    },
    TemplateDef {
        id: "cron-agent",
        name: "Scheduled Cron Agent",
        group: "Research / Automation",
        description: "Time / cron triggered background tasks",
        preset: &[(BE, &["fastapi"]), (AF, &["langchain"]), (LLM, &["openai"])],
    },
    TemplateDef {
        id: "workflow-designer",
        name: "Workflow Designer",
        group: "Orchestration",
        description: "Visual multi-agent flow editor",
        preset: &[(FE, &["react"]), (BE, &["express"]), (AF, &["crewai"]), (LLM, &["openai"])],
    },
    TemplateDef {
        id: "agent-orchestrator",
        name: "Agent Orchestrator",
        group: "Orchestration",
        description: "Router + tool registry service",
        preset: &[(BE, &["fastapi"]), (AF, &["langgraph"]), (LLM, &["openai"]), (PROTO, &["mcp"])],
    },
    TemplateDef {
        id: "code-assistant-mcp",
        name: "Code Assistant + MCP",
        group: "Dev Tools",
        description: "Dev agent w/ repo tools",
        preset: &[
            (FE, &["react"]),
            (BE, &["express"]),
            (AF, &["langchain"]),
            (LLM, &["anthropic"]),
            (PROTO, &["mcp"]),
        ],
    },
    TemplateDef {
        id: "evaluation-suite",
        name: "Evaluation Suite",
        group: "Dev Tools",
        description: "Prompt & agent eval harness",
        preset: &[(BE, &["fastapi"]), (AF, &["langchain"]), (LLM, &["openai"])],
    },
    TemplateDef {
        id: "analytics-dashboard",
        name: "Analytics Dashboard",
        group: "Observability",
        description: "Usage metrics + tracing UI",
        preset: &[(FE, &["react"]), (BE, &["express"]), (AF, &["langchain"]), (LLM, &["openai"])],
    },
    TemplateDef {
        id: "multimodal-assistant",
        name: "Multimodal Assistant",
        group: "Multimodal",
        description: "Image + text reasoning",
        preset: &[(FE, &["react"]), (BE, &["fastapi"]), (AF, &["langchain"]), (LLM, &["gemini"])],
    },
    TemplateDef {
        id: "multimodal-search",
        name: "Multimodal Search",
        group: "Multimodal",
        description: "Blend text & image search over corpus",
        preset: &[(BE, &["fastapi"]), (AF, &["langchain"]), (LLM, &["gemini"])],
    },
    TemplateDef {
        id: "local-first",
        name: "Local-first App",
        group: "Local & Edge",
        description: "Offline dev w/ Ollama",
        preset: &[(FE, &["react"]), (BE, &["express"]), (AF, &["langchain"]), (LLM, &["ollama"])],
    },
    TemplateDef {
        id: "edge-functions",
        name: "Edge Functions Starter",
        group: "Local & Edge",
        description: "Geo-distributed serverless agents",
        preset: &[(FE, &["react"]), (BE, &["express"]), (AF, &["langchain"]), (LLM, &["openai"])],
    },
    TemplateDef {
        id: "email-assistant",
        name: "Email Assistant",
        group: "Integrations",
        description: "Summarize & draft replies",
        preset: &[(BE, &["fastapi"]), (AF, &["langchain"]), (LLM, &["anthropic"])],
    },
    TemplateDef {
        id: "jira-helper",
        name: "Jira Helper",
        group: "Integrations",
        description: "Ticket summarization & action suggestions",
        preset: &[(BE, &["express"]), (AF, &["langchain"]), (LLM, &["openai"])],
    },
    TemplateDef {
        id: "knowledge-base",
        name: "Knowledge Base Portal",
        group: "Knowledge",
        description: "Docs site + semantic search",
        preset: &[
            (FE, &["react"]),
            (BE, &["fastapi"]),
            (DB, &["weaviate"]),
            (AF, &["langchain"]),
            (LLM, &["openai"]),
        ],
    },
];

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registries are internally consistent.
///
/// Panics with a clear message on any violation.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    for (i, (category, table)) in OPTION_REGISTRY.iter().enumerate() {
        assert_eq!(
            category.index(),
            i,
            "OPTION_REGISTRY entry {i} is out of Category order"
        );
        for (j, def) in table.iter().enumerate() {
            assert!(
                table[..j].iter().all(|other| other.id != def.id),
                "duplicate id '{}' in {category}",
                def.id
            );
        }
    }

    for (i, template) in TEMPLATES.iter().enumerate() {
        assert!(
            TEMPLATES[..i].iter().all(|other| other.id != template.id),
            "duplicate template id '{}'",
            template.id
        );
        for (category, ids) in template.preset {
            let table = OPTION_REGISTRY[category.index()].1;
            for id in *ids {
                assert!(
                    table.iter().any(|def| def.id == *id),
                    "template '{}' presets unknown {category} id '{id}'",
                    template.id
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_internally_consistent() {
        assert_registry_integrity();
    }

    #[test]
    fn catalog_carries_all_templates() {
        assert_eq!(TEMPLATES.len(), 21);
    }

    #[test]
    fn docker_is_wildcard_compatible() {
        let docker = TOOLS.iter().find(|d| d.id == "docker").unwrap();
        assert_eq!(docker.compatible, &["*"]);
    }
}
