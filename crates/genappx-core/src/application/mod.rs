//! Application layer for GenAppXpress.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, CatalogService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! generation logic itself. All generation rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{CatalogService, ScaffoldOptions, ScaffoldService, TemplateGroup};

pub use ports::{ExportBundle, Filesystem, ProjectExporter, Sidecar};

pub use error::ApplicationError;
