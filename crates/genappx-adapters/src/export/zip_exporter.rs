//! Zip archive exporter.
//!
//! Archive layout: the project tree under `<name>/`, sidecars at the root.

use std::io::{Cursor, Write};
use std::path::Path;

use genappx_core::{
    application::{
        ApplicationError,
        ports::{ExportBundle, ProjectExporter},
    },
    domain::Node,
    error::{GenappxError, GenappxResult},
};
use tracing::{debug, info};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Writes export bundles as deflated zip archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExporter;

impl ZipExporter {
    pub fn new() -> Self {
        Self
    }

    /// Build the archive in memory.
    pub fn to_bytes(&self, bundle: &ExportBundle) -> GenappxResult<Vec<u8>> {
        let root = bundle.tree.name().as_str();
        let fail = |reason: String| -> GenappxError {
            ApplicationError::ExportFailed {
                path: root.into(),
                reason,
            }
            .into()
        };

        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(0o644);
            let executable = options.unix_permissions(0o755);

            zip.add_directory(format!("{root}/"), options)
                .map_err(|e| fail(e.to_string()))?;
            for (path, node) in bundle.tree.root().walk() {
                let name = format!("{root}/{path}");
                match node {
                    Node::Directory(_) => zip.add_directory(format!("{name}/"), options),
                    Node::File(content) => zip
                        .start_file(name.as_str(), options)
                        .and_then(|()| zip.write_all(content.as_bytes()).map_err(Into::into)),
                }
                .map_err(|e| fail(format!("{name}: {e}")))?;
            }

            for sidecar in &bundle.sidecars {
                let options = if sidecar.permissions.is_executable() {
                    executable
                } else {
                    options
                };
                zip.start_file(sidecar.name.as_str(), options)
                    .and_then(|()| zip.write_all(sidecar.content.as_bytes()).map_err(Into::into))
                    .map_err(|e| fail(format!("{}: {e}", sidecar.name)))?;
            }

            zip.finish().map_err(|e| fail(e.to_string()))?;
        }
        debug!(bytes = buffer.len(), "archive built");
        Ok(buffer)
    }
}

impl ProjectExporter for ZipExporter {
    fn export(&self, bundle: &ExportBundle, dest: &Path) -> GenappxResult<()> {
        let bytes = self.to_bytes(bundle)?;
        std::fs::write(dest, &bytes).map_err(|e| ApplicationError::ExportFailed {
            path: dest.to_path_buf(),
            reason: e.to_string(),
        })?;
        info!(path = %dest.display(), bytes = bytes.len(), "archive written");
        Ok(())
    }
}
