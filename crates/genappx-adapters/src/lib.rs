//! Infrastructure adapters for GenAppXpress.
//!
//! This crate implements the ports defined in `genappx-core::application::ports`.
//! It contains all I/O: writing trees to disk and packing export archives.

pub mod export;
pub mod filesystem;

pub use export::ZipExporter;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
