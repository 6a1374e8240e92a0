//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Input errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// Writing the export bundle failed.
    #[error("Export to {path} failed: {reason}")]
    ExportFailed { path: PathBuf, reason: String },

    /// Serializing the configuration failed.
    #[error("Could not serialize configuration: {reason}")]
    SerializationFailed { reason: String },

    /// A shared lock was poisoned by a panicking writer.
    #[error("Lock poisoned: {resource}")]
    LockPoisoned { resource: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different project name or --output directory".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("A partial project may remain at: {}", path.display()),
                "Remove it manually before retrying".into(),
            ],
            Self::ExportFailed { path, .. } => vec![
                format!("Could not write archive: {}", path.display()),
                "Check that the destination directory exists and is writable".into(),
            ],
            Self::LockPoisoned { .. } => vec!["Try again in a moment".into()],
            Self::SerializationFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. }
            | Self::RollbackFailed { .. }
            | Self::ExportFailed { .. }
            | Self::SerializationFailed { .. }
            | Self::LockPoisoned { .. } => ErrorCategory::Internal,
        }
    }
}
