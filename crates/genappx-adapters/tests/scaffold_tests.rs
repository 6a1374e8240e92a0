//! End-to-end: core services writing through the real adapters.

use std::sync::Arc;

use genappx_adapters::{LocalFilesystem, MemoryFilesystem, ZipExporter};
use genappx_core::application::{ApplicationError, ScaffoldOptions, ScaffoldService};
use genappx_core::domain::{Catalog, Configuration, ProjectName};
use genappx_core::error::GenappxError;
use tempfile::TempDir;

fn chatbot() -> Configuration {
    let mut config = Configuration::new(ProjectName::new("chat").unwrap());
    Catalog::builtin().apply_template(&mut config, "ai-chatbot").unwrap();
    config
}

fn local_service() -> ScaffoldService {
    ScaffoldService::new(
        Arc::new(Catalog::builtin()),
        Box::new(LocalFilesystem::new()),
        Box::new(ZipExporter::new()),
    )
}

#[test]
fn scaffold_materialises_every_tree_file() {
    let dir = TempDir::new().unwrap();
    let service = local_service();
    let config = chatbot();

    service.scaffold(&config, dir.path(), ScaffoldOptions::default()).unwrap();

    let tree = service.tree(&config);
    for (path, content) in tree.files() {
        let on_disk = std::fs::read_to_string(dir.path().join("chat").join(&path)).unwrap();
        assert_eq!(on_disk, content, "{path}");
    }
}

#[test]
fn second_scaffold_is_refused_then_forced() {
    let dir = TempDir::new().unwrap();
    let service = local_service();
    let config = chatbot();
    service.scaffold(&config, dir.path(), ScaffoldOptions::default()).unwrap();
    std::fs::write(dir.path().join("chat/stale.txt"), "old").unwrap();

    let err = service
        .scaffold(&config, dir.path(), ScaffoldOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        GenappxError::Application(ApplicationError::ProjectExists { .. })
    ));

    let forced = ScaffoldOptions {
        force: true,
        with_script: true,
    };
    service.scaffold(&config, dir.path(), forced).unwrap();
    assert!(!dir.path().join("chat/stale.txt").exists());
    assert!(!dir.path().join(".chat.genappx-old").exists());
    assert!(dir.path().join("chat-setup.sh").exists());
}

#[test]
fn memory_filesystem_records_the_plan() {
    let fs = MemoryFilesystem::new();
    let service = ScaffoldService::new(
        Arc::new(Catalog::builtin()),
        Box::new(fs.clone()),
        Box::new(ZipExporter::new()),
    );
    let options = ScaffoldOptions {
        with_script: true,
        ..Default::default()
    };
    let structure = service.scaffold(&chatbot(), "/out", options).unwrap();

    assert_eq!(fs.list_files().len(), structure.file_count() + 1);
    assert!(fs.is_executable("/out/chat-setup.sh".as_ref()));
    let route = fs.read_file("/out/chat/server/routes/chat.js".as_ref()).unwrap();
    assert!(route.contains("process.env.OPENAI_API_KEY"));
}

#[test]
fn export_writes_a_readable_archive() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("chat.zip");
    let bundle = local_service().export(&chatbot(), &dest).unwrap();

    let file = std::fs::File::open(&dest).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    let names: Vec<_> = archive.file_names().collect();
    assert!(names.contains(&"project.json"));
    assert!(names.contains(&"chat/package.json"));
    assert_eq!(bundle.sidecars.len(), 3);
}
