//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use genappx_core::domain::Category;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "genappx",
    bin_name = "genappx",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Technology-stack project scaffolding",
    long_about = "GenAppXpress turns a technology selection (frontend, backend, \
                  databases, AI frameworks, LLM providers, protocols) and optional \
                  templates into a ready-to-run project tree, .env file and setup script.",
    after_help = "EXAMPLES:\n\
        \x20 genappx new my-app --frontend react --backend express --llm-provider openai\n\
        \x20 genappx new bot --template ai-chatbot --yes\n\
        \x20 genappx tree rag --template rag-service\n\
        \x20 genappx list templates --format json\n\
        \x20 genappx completions bash > /usr/share/bash-completion/completions/genappx",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a project and write it to disk.
    #[command(
        visible_alias = "n",
        after_help = "EXAMPLES:\n\
            \x20 genappx new my-app --frontend react --backend fastapi --database chroma\n\
            \x20 genappx new bot --template ai-chatbot --output ~/code --script --yes\n\
            \x20 genappx new again --from project.json --yes"
    )]
    New(NewArgs),

    /// Print the flattened project tree.
    #[command(visible_alias = "t")]
    Tree(PreviewArgs),

    /// Print the setup shell script.
    Script(PreviewArgs),

    /// Print the .env file.
    Env(PreviewArgs),

    /// Report compatibility conflicts and warnings.
    Check(CheckArgs),

    /// Write a zip archive with the project, project.json, README and setup script.
    #[command(after_help = "EXAMPLES:\n\
            \x20 genappx export bot --template ai-chatbot --archive bot.zip")]
    Export(ExportArgs),

    /// List catalog options or templates.
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n\
            \x20 genappx list\n\
            \x20 genappx list options --category llm-providers\n\
            \x20 genappx list templates --format csv"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(after_help = "EXAMPLES:\n\
            \x20 genappx init           # platform config dir\n\
            \x20 genappx init --local   # .genappx.toml in CWD")]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(after_help = "EXAMPLES:\n\
            \x20 genappx completions bash > ~/.local/share/bash-completion/completions/genappx\n\
            \x20 genappx completions zsh  > ~/.zfunc/_genappx\n\
            \x20 genappx completions fish > ~/.config/fish/completions/genappx.fish")]
    Completions(CompletionsArgs),

    /// Inspect the configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

// ── selection ─────────────────────────────────────────────────────────────────

/// Technology picks. Every list flag repeats and accepts comma-separated ids.
#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    #[arg(long, value_name = "ID", value_delimiter = ',', help = "Frontend ids (react, vue, nextjs)")]
    pub frontend: Vec<String>,

    #[arg(long, value_name = "ID", value_delimiter = ',', help = "Backend ids (express, fastapi)")]
    pub backend: Vec<String>,

    #[arg(long, value_name = "ID", value_delimiter = ',', help = "Database ids")]
    pub database: Vec<String>,

    #[arg(long = "tool", value_name = "ID", value_delimiter = ',', help = "Dev tool ids")]
    pub tools: Vec<String>,

    #[arg(long = "ai-framework", value_name = "ID", value_delimiter = ',', help = "AI framework ids")]
    pub ai_frameworks: Vec<String>,

    #[arg(long = "llm-provider", value_name = "ID", value_delimiter = ',', help = "LLM provider ids")]
    pub llm_providers: Vec<String>,

    #[arg(long = "protocol", value_name = "ID", value_delimiter = ',', help = "Protocol ids")]
    pub protocols: Vec<String>,

    /// Templates whose presets are merged into the selection.
    #[arg(short = 't', long = "template", value_name = "ID", value_delimiter = ',')]
    pub templates: Vec<String>,

    /// Start from a saved configuration (an exported project.json).
    #[arg(long = "from", value_name = "FILE")]
    pub from: Option<PathBuf>,
}

impl SelectionArgs {
    /// Category flags paired with their category.
    pub fn by_category(&self) -> [(Category, &[String]); 7] {
        [
            (Category::Frontend, self.frontend.as_slice()),
            (Category::Backend, self.backend.as_slice()),
            (Category::Database, self.database.as_slice()),
            (Category::Tools, self.tools.as_slice()),
            (Category::AiFrameworks, self.ai_frameworks.as_slice()),
            (Category::LlmProviders, self.llm_providers.as_slice()),
            (Category::Protocols, self.protocols.as_slice()),
        ]
    }
}

// ── new ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name; falls back to `defaults.project_name`.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Parent directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    #[arg(long = "script", help = "Also write <name>-setup.sh next to the project")]
    pub script: bool,

    #[arg(short = 'y', long = "yes", help = "Skip confirmation and create immediately")]
    pub yes: bool,

    #[arg(long = "force", help = "Overwrite existing directory")]
    pub force: bool,

    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── tree / script / env / check ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Project name; falls back to `defaults.project_name`.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub preview: PreviewArgs,

    #[arg(long = "strict", help = "Fail when any conflict is reported")]
    pub strict: bool,
}

// ── export ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Project name; falls back to `defaults.project_name`.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[arg(
        short = 'a',
        long = "archive",
        value_name = "FILE",
        help = "Archive path (default: <name>.zip)"
    )]
    pub archive: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// What to list.
    #[arg(value_enum, default_value = "templates")]
    pub what: ListTarget,

    /// Only options of this category (e.g. `backend`, `llm-providers`).
    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: Option<String>,

    #[arg(long = "format", value_enum, default_value = "table", help = "Output format")]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListTarget {
    Options,
    Templates,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `.genappx.toml` in the current directory.
    #[arg(long = "local", help = "Create local configuration in current directory")]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.tools`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
