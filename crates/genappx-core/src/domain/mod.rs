//! Core domain layer for GenAppXpress.
//!
//! Pure generation logic. Every generator takes the read-only [`Catalog`]
//! and a [`Configuration`] and returns plain data; nothing here touches the
//! filesystem, the network or a clock (the script date is passed in by
//! [`script::generate_script`]'s caller or read once at its edge).
//!
//! ## Generators
//!
//! - [`compatibility::check_compatibility`]: conflicts and warnings
//! - [`env::generate_env`]: `.env` content
//! - [`generator::generate_structure`]: the project tree
//! - [`script::generate_script`]: the setup shell script
//! - [`flatten_structure`]: display paths for a tree

pub mod catalog;
pub mod compatibility;
pub mod entities;
pub mod env;
pub mod error;
pub mod generator;
pub mod script;
pub mod value_objects;

pub use catalog::{Catalog, TechOption, Template, WILDCARD};
pub use compatibility::{CompatibilityReport, MCP_ADVISORY, check_compatibility};
pub use entities::{
    common::{Permissions, RelativePath},
    configuration::Configuration,
    file_tree::{Directory, Node, VirtualFileTree, flatten_structure},
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    selection::Selection,
};
pub use env::{declared_keys, generate_env};
pub use error::{DomainError, ErrorCategory};
pub use generator::{PackageManifest, generate_structure, readme::generate_readme};
pub use script::{generate_script, generate_script_on};
pub use value_objects::{Category, ProjectName};
