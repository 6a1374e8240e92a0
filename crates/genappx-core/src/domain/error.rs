// ============================================================================
// domain/error.rs - boundary validation errors
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// The generators themselves never fail. These errors come from the edges
/// of the domain: parsing user-facing values and materialising a tree.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Duplicate path in file tree: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("invalid path segment '{segment}' in {path}")]
    InvalidPathSegment { path: String, segment: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("unknown {category} option '{id}'")]
    UnknownOption { category: String, id: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Use only letters, digits, '.', '_' and '-'".into(),
                "Do not start the name with '.' or '-'".into(),
                "Example: genappx new my-agent-app".into(),
            ],
            Self::UnknownCategory(_) => vec![
                "Valid categories: frontend, backend, database, tools, aiFrameworks, llmProviders, protocols".into(),
            ],
            Self::UnknownTemplate(id) => vec![
                format!("No template with id '{id}'"),
                "Try: genappx list templates".into(),
            ],
            Self::UnknownOption { category, .. } => vec![
                format!("Try: genappx list options --category {category}"),
            ],
            Self::DuplicatePath { path } | Self::AbsolutePathNotAllowed { path } => vec![
                format!("The generated tree contains an unusable path: {path}"),
                "Please report this issue".into(),
            ],
            Self::InvalidPathSegment { .. } => vec!["Please report this issue".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::UnknownCategory(_) => ErrorCategory::Validation,
            Self::UnknownTemplate(_) | Self::UnknownOption { .. } => ErrorCategory::NotFound,
            Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::InvalidPathSegment { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
