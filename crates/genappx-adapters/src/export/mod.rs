//! Export adapters.

mod zip_exporter;

pub use zip_exporter::ZipExporter;
