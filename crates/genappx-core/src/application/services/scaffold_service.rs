//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the generation workflows:
//! 1. Resolve the configuration against the catalog
//! 2. Run the generators
//! 3. Write the result to the filesystem or an export archive

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ExportBundle, Filesystem, ProjectExporter, Sidecar},
    },
    domain::{
        Catalog, CompatibilityReport, Configuration, FsEntry, Permissions, ProjectStructure,
        VirtualFileTree, check_compatibility, flatten_structure, generate_env, generate_script,
        generate_structure,
    },
    error::GenappxResult,
};

pub const PROJECT_JSON: &str = "project.json";
pub const EXPORT_README: &str = "README.export.md";
pub const SETUP_SCRIPT: &str = "setup.sh";

/// Knobs for [`ScaffoldService::scaffold`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Also write `<name>-setup.sh` next to the project directory.
    pub with_script: bool,
    /// Replace an existing project directory.
    pub force: bool,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    catalog: Arc<Catalog>,
    filesystem: Box<dyn Filesystem>,
    exporter: Box<dyn ProjectExporter>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use genappx_core::prelude::*;
    ///
    /// let service = ScaffoldService::new(
    ///     Arc::new(Catalog::builtin()),
    ///     Box::new(filesystem), // impl Filesystem
    ///     Box::new(exporter),   // impl ProjectExporter
    /// );
    /// ```
    pub fn new(
        catalog: Arc<Catalog>,
        filesystem: Box<dyn Filesystem>,
        exporter: Box<dyn ProjectExporter>,
    ) -> Self {
        Self {
            catalog,
            filesystem,
            exporter,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tree(&self, config: &Configuration) -> VirtualFileTree {
        self.warn_unknown(config);
        generate_structure(&self.catalog, config)
    }

    pub fn report(&self, config: &Configuration) -> CompatibilityReport {
        self.warn_unknown(config);
        check_compatibility(&self.catalog, config)
    }

    pub fn env(&self, config: &Configuration) -> String {
        self.warn_unknown(config);
        generate_env(&self.catalog, config)
    }

    pub fn script(&self, config: &Configuration) -> String {
        self.warn_unknown(config);
        generate_script(&self.catalog, config)
    }

    /// Write the project tree under `output_dir/<project name>`.
    ///
    /// Refuses an existing directory unless `options.force` is set. A
    /// replaced directory is moved aside first and only removed once the new
    /// tree is written; a failed write removes whatever was created and puts
    /// the old directory back.
    #[instrument(
        skip_all,
        fields(
            project = %config.project_name,
            output_dir = %output_dir.as_ref().display()
        )
    )]
    pub fn scaffold(
        &self,
        config: &Configuration,
        output_dir: impl AsRef<Path>,
        options: ScaffoldOptions,
    ) -> GenappxResult<ProjectStructure> {
        let output_dir = output_dir.as_ref();
        let tree = self.tree(config);
        let structure = ProjectStructure::from_tree(&tree, output_dir)?;
        info!(files = structure.file_count(), "Project planned");

        let root = structure.root();
        let backup = if self.filesystem.exists(root) {
            if !options.force {
                return Err(ApplicationError::ProjectExists { path: root.clone() }.into());
            }
            let backup = backup_path(root);
            warn!(path = %root.display(), "Replacing existing project directory");
            self.filesystem.remove_dir_all(&backup)?;
            self.filesystem.rename(root, &backup)?;
            debug!(backup = %backup.display(), "Existing project moved aside");
            Some(backup)
        } else {
            None
        };

        let written = self.write_all(&structure).and_then(|()| {
            if options.with_script {
                self.write_script(&script_path(output_dir, config), config)
            } else {
                Ok(())
            }
        });
        if let Err(e) = written {
            warn!("Write failed, attempting rollback");
            return Err(self.rollback(root, backup.as_deref(), e));
        }

        if let Some(backup) = backup {
            if let Err(e) = self.filesystem.remove_dir_all(&backup) {
                warn!(error = %e, path = %backup.display(), "Could not remove replaced project");
            }
        }

        info!("Scaffold completed successfully");
        Ok(structure)
    }

    /// Assemble the export bundle: the tree plus `project.json`,
    /// `README.export.md` and `setup.sh`.
    pub fn bundle(&self, config: &Configuration) -> GenappxResult<ExportBundle> {
        let tree = self.tree(config);
        let mut project_json = serde_json::to_string_pretty(config).map_err(|e| {
            ApplicationError::SerializationFailed {
                reason: e.to_string(),
            }
        })?;
        project_json.push('\n');

        let sidecars = vec![
            Sidecar {
                name: PROJECT_JSON.to_string(),
                content: project_json,
                permissions: Permissions::Regular,
            },
            Sidecar {
                name: EXPORT_README.to_string(),
                content: export_readme(&tree),
                permissions: Permissions::Regular,
            },
            Sidecar {
                name: SETUP_SCRIPT.to_string(),
                content: generate_script(&self.catalog, config),
                permissions: Permissions::Executable,
            },
        ];
        Ok(ExportBundle { tree, sidecars })
    }

    /// Write the export bundle to `dest` through the exporter port.
    #[instrument(
        skip_all,
        fields(project = %config.project_name, dest = %dest.as_ref().display())
    )]
    pub fn export(&self, config: &Configuration, dest: impl AsRef<Path>) -> GenappxResult<ExportBundle> {
        let bundle = self.bundle(config)?;
        self.exporter.export(&bundle, dest.as_ref())?;
        info!(sidecars = bundle.sidecars.len(), "Export completed");
        Ok(bundle)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn warn_unknown(&self, config: &Configuration) {
        for (category, id) in self.catalog.unknown_ids(config) {
            let category = category.map_or("templates", |c| c.as_str());
            warn!(category, id = %id, "Unknown id skipped");
        }
    }

    /// Write all entries in the structure.
    fn write_all(&self, structure: &ProjectStructure) -> GenappxResult<()> {
        self.filesystem.create_dir_all(structure.root())?;

        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    let path = structure.root().join(&dir.path);
                    self.filesystem.create_dir_all(&path)?;
                }
                FsEntry::File(file) => {
                    let path = structure.root().join(&file.path);

                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }

                    self.filesystem.write_file(&path, &file.content)?;

                    if file.permissions.is_executable() {
                        self.filesystem.set_permissions(&path, true)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn write_script(&self, path: &Path, config: &Configuration) -> GenappxResult<()> {
        let script = generate_script(&self.catalog, config);
        self.filesystem.write_file(path, &script)?;
        self.filesystem.set_permissions(path, true)
    }

    /// Best-effort rollback; returns the error to report.
    ///
    /// Removes the partial tree, then moves `backup` (the replaced project)
    /// back to `root`.
    fn rollback(
        &self,
        root: &Path,
        backup: Option<&Path>,
        cause: crate::error::GenappxError,
    ) -> crate::error::GenappxError {
        let restored = self.filesystem.remove_dir_all(root).and_then(|()| match backup {
            Some(backup) => self.filesystem.rename(backup, root),
            None => Ok(()),
        });
        match restored {
            Ok(()) => {
                info!(restored = backup.is_some(), "Rollback successful");
                cause
            }
            Err(e) => {
                warn!(error = %e, path = %root.display(), "Rollback failed");
                let kept = backup
                    .map(|b| format!("; previous project kept at {}", b.display()))
                    .unwrap_or_default();
                ApplicationError::RollbackFailed {
                    path: root.to_path_buf(),
                    reason: format!("{cause}; cleanup: {e}{kept}"),
                }
                .into()
            }
        }
    }
}

/// Hidden sibling holding a project that `force` is replacing.
fn backup_path(root: &Path) -> PathBuf {
    let name = root.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    root.with_file_name(format!(".{name}.genappx-old"))
}

fn script_path(output_dir: &Path, config: &Configuration) -> PathBuf {
    output_dir.join(format!("{}-{SETUP_SCRIPT}", config.project_name))
}

fn export_readme(tree: &VirtualFileTree) -> String {
    let name = tree.name();
    let mut out = format!(
        "# {name} (export)\n\n\
         Exported from GenAppXpress.\n\n\
         ## Contents\n\
         - `{name}/`: the generated project\n\
         - `{PROJECT_JSON}`: the selection, reusable with `genappx new {name} --from {PROJECT_JSON}`\n\
         - `{SETUP_SCRIPT}`: installs dependencies and writes `.env`\n\n\
         ## Files\n"
    );
    for path in flatten_structure(tree, "") {
        out.push_str(&format!("- {path}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{MockFilesystem, MockProjectExporter};
    use crate::domain::{Category, ProjectName};
    use crate::error::GenappxError;
    use mockall::Sequence;

    fn config() -> Configuration {
        Configuration::new(ProjectName::new("demo").unwrap())
    }

    fn service(fs: MockFilesystem, exporter: MockProjectExporter) -> ScaffoldService {
        ScaffoldService::new(Arc::new(Catalog::builtin()), Box::new(fs), Box::new(exporter))
    }

    fn io_error(path: &Path) -> GenappxError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "disk full".into(),
        }
        .into()
    }

    #[test]
    fn refuses_existing_project() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_write_file().never();

        let err = service(fs, MockProjectExporter::new())
            .scaffold(&config(), "/out", ScaffoldOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            GenappxError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn writes_every_file_of_the_tree() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, _| path.starts_with("/out/demo"))
            .times(3)
            .returning(|_, _| Ok(()));
        fs.expect_set_permissions().never();
        fs.expect_remove_dir_all().never();

        let structure = service(fs, MockProjectExporter::new())
            .scaffold(&config(), "/out", ScaffoldOptions::default())
            .unwrap();
        assert_eq!(structure.file_count(), 3);
        assert_eq!(structure.root(), Path::new("/out/demo"));
    }

    #[test]
    fn failed_write_rolls_back() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| Err(io_error(path)));
        fs.expect_remove_dir_all()
            .withf(|path| path == Path::new("/out/demo"))
            .times(1)
            .returning(|_| Ok(()));

        let err = service(fs, MockProjectExporter::new())
            .scaffold(&config(), "/out", ScaffoldOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            GenappxError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn failed_rollback_is_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|path| Err(io_error(path)));
        fs.expect_remove_dir_all().returning(|path| Err(io_error(path)));

        let err = service(fs, MockProjectExporter::new())
            .scaffold(&config(), "/out", ScaffoldOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            GenappxError::Application(ApplicationError::RollbackFailed { .. })
        ));
    }

    fn force() -> ScaffoldOptions {
        ScaffoldOptions {
            force: true,
            ..Default::default()
        }
    }

    #[test]
    fn force_replaces_existing_directory() {
        let mut seq = Sequence::new();
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_remove_dir_all()
            .withf(|path| path == Path::new("/out/.demo.genappx-old"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_rename()
            .withf(|from, to| from == Path::new("/out/demo") && to == Path::new("/out/.demo.genappx-old"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_remove_dir_all()
            .withf(|path| path == Path::new("/out/.demo.genappx-old"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        assert!(service(fs, MockProjectExporter::new()).scaffold(&config(), "/out", force()).is_ok());
    }

    #[test]
    fn failed_forced_write_restores_previous_project() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| Err(io_error(path)));
        fs.expect_remove_dir_all().returning(|_| Ok(()));
        fs.expect_rename()
            .withf(|from, to| from == Path::new("/out/demo") && to == Path::new("/out/.demo.genappx-old"))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_rename()
            .withf(|from, to| from == Path::new("/out/.demo.genappx-old") && to == Path::new("/out/demo"))
            .times(1)
            .returning(|_, _| Ok(()));

        let err = service(fs, MockProjectExporter::new())
            .scaffold(&config(), "/out", force())
            .unwrap_err();
        assert!(matches!(
            err,
            GenappxError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn failed_restore_names_the_kept_copy() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_remove_dir_all().returning(|_| Ok(()));
        fs.expect_create_dir_all().returning(|path| Err(io_error(path)));
        fs.expect_rename()
            .withf(|from, _| from == Path::new("/out/demo"))
            .returning(|_, _| Ok(()));
        fs.expect_rename()
            .withf(|from, _| from == Path::new("/out/.demo.genappx-old"))
            .returning(|from, _| Err(io_error(from)));

        let err = service(fs, MockProjectExporter::new())
            .scaffold(&config(), "/out", force())
            .unwrap_err();
        assert!(err.to_string().contains(".demo.genappx-old"));
    }

    #[test]
    fn script_is_written_executable_beside_project() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_set_permissions()
            .withf(|path, executable| path == Path::new("/out/demo-setup.sh") && *executable)
            .times(1)
            .returning(|_, _| Ok(()));

        let options = ScaffoldOptions {
            with_script: true,
            ..Default::default()
        };
        assert!(service(fs, MockProjectExporter::new()).scaffold(&config(), "/out", options).is_ok());
    }

    #[test]
    fn export_hands_bundle_to_exporter() {
        let mut exporter = MockProjectExporter::new();
        exporter
            .expect_export()
            .withf(|bundle, dest| {
                dest == Path::new("demo.zip")
                    && bundle.tree.name().as_str() == "demo"
                    && bundle.sidecars.len() == 3
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let config = config().with(Category::Backend, ["fastapi"]);
        let bundle = service(MockFilesystem::new(), exporter)
            .export(&config, "demo.zip")
            .unwrap();

        let json = &bundle.sidecar(PROJECT_JSON).unwrap().content;
        let back: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(back, config);

        let script = bundle.sidecar(SETUP_SCRIPT).unwrap();
        assert!(script.permissions.is_executable());
        assert!(script.content.starts_with("#!/usr/bin/env bash\n"));

        let readme = &bundle.sidecar(EXPORT_README).unwrap().content;
        assert!(readme.contains("- demo/api/main.py\n"));
    }

    #[test]
    fn exporter_failure_propagates() {
        let mut exporter = MockProjectExporter::new();
        exporter.expect_export().returning(|_, dest| {
            Err(ApplicationError::ExportFailed {
                path: dest.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });
        assert!(service(MockFilesystem::new(), exporter).export(&config(), "x.zip").is_err());
    }
}
