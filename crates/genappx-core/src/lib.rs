//! GenAppXpress Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the GenAppXpress
//! structure generation engine, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           genappx-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ScaffoldService, CatalogService)     │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Filesystem, Exporter)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   genappx-adapters (Infrastructure)     │
//! │ (LocalFilesystem, ZipExporter, etc)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Catalog, Configuration, generators)    │
//! │         No I/O                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use genappx_core::prelude::*;
//!
//! let catalog = Catalog::builtin();
//! let mut config = Configuration::new(ProjectName::new("my-app").unwrap());
//! catalog.apply_template(&mut config, "ai-chatbot").unwrap();
//!
//! let tree = generate_structure(&catalog, &config);
//! assert!(tree.root().contains("server/routes/chat.js"));
//! assert!(check_compatibility(&catalog, &config).is_clean());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CatalogService, ScaffoldService,
        ports::{Filesystem, ProjectExporter},
    };
    pub use crate::domain::{
        Catalog, Category, CompatibilityReport, Configuration, ProjectName, VirtualFileTree,
        check_compatibility, flatten_structure, generate_env, generate_readme, generate_script,
        generate_structure,
    };
    pub use crate::error::{GenappxError, GenappxResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
