//! Domain value objects: Category and ProjectName.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! `Category` is a closed enum: every generator switches over the same set,
//! so adding a category is one variant plus one registry edit in
//! `catalog/builtin.rs`.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Category ──────────────────────────────────────────────────────────────────

/// A technology category. Each one is an independent id namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Frontend,
    Backend,
    Database,
    Tools,
    AiFrameworks,
    LlmProviders,
    Protocols,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 7] = [
        Self::Frontend,
        Self::Backend,
        Self::Database,
        Self::Tools,
        Self::AiFrameworks,
        Self::LlmProviders,
        Self::Protocols,
    ];

    /// Key used in serialized configurations (`aiFrameworks`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Database => "database",
            Self::Tools => "tools",
            Self::AiFrameworks => "aiFrameworks",
            Self::LlmProviders => "llmProviders",
            Self::Protocols => "protocols",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Database => "Database",
            Self::Tools => "Dev Tools",
            Self::AiFrameworks => "AI Frameworks",
            Self::LlmProviders => "LLM Providers",
            Self::Protocols => "Protocols",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            "database" | "db" => Ok(Self::Database),
            "tools" | "tool" | "devtools" => Ok(Self::Tools),
            "aiframeworks" | "aiframework" | "frameworks" => Ok(Self::AiFrameworks),
            "llmproviders" | "llmprovider" | "providers" => Ok(Self::LlmProviders),
            "protocols" | "protocol" => Ok(Self::Protocols),
            _ => Err(DomainError::UnknownCategory(s.to_string())),
        }
    }
}

// ── ProjectName ───────────────────────────────────────────────────────────────

/// A project name that is safe to use as a directory name and inside a shell
/// line.
///
/// Invariant: non-empty, at most [`ProjectName::MAX_LEN`] bytes, only
/// `[A-Za-z0-9._-]`, never `.`/`..`, never starts with `.` or `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    pub const MAX_LEN: usize = 214;

    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        Self::check(&name).map_err(|reason| DomainError::InvalidProjectName {
            name: name.clone(),
            reason,
        })?;
        Ok(Self(name))
    }

    fn check(name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("name cannot be empty".into());
        }
        if name.len() > Self::MAX_LEN {
            return Err(format!("name is longer than {} characters", Self::MAX_LEN));
        }
        if name.starts_with('.') {
            return Err("name cannot start with '.'".into());
        }
        if name.starts_with('-') {
            return Err("name cannot start with '-'".into());
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(format!(
                "character {bad:?} is not allowed (use letters, digits, '.', '_' or '-')"
            ));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectName> for String {
    fn from(name: ProjectName) -> Self {
        name.0
    }
}

impl FromStr for ProjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
