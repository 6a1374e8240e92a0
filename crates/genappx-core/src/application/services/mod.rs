//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "list templates".

pub mod catalog_service;
pub mod scaffold_service;

pub use catalog_service::{CatalogService, TemplateGroup};
pub use scaffold_service::{ScaffoldOptions, ScaffoldService};
