//! Command handlers.
//!
//! Each handler turns parsed arguments into calls on the core services and
//! renders the result. Selection building is shared here because every
//! generating command accepts the same flags.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use genappx_adapters::{LocalFilesystem, ZipExporter};
use genappx_core::{
    application::{CatalogService, ScaffoldService},
    domain::{Catalog, Category, Configuration, DomainError, ProjectName},
};

use crate::{
    cli::SelectionArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub mod completions;
pub mod config;
pub mod export;
pub mod init;
pub mod list;
pub mod new;
pub mod preview;

/// Both services over one shared builtin catalog, wired to the real adapters.
pub fn services() -> (CatalogService, ScaffoldService) {
    let catalog = Arc::new(Catalog::builtin());
    let scaffold = ScaffoldService::new(
        Arc::clone(&catalog),
        Box::new(LocalFilesystem::new()),
        Box::new(ZipExporter::new()),
    );
    (CatalogService::new(catalog), scaffold)
}

/// Build a [`Configuration`] from command-line input.
///
/// Layering: `--from` file, then the project name, then category flags,
/// then `defaults.tools`, then templates. Later layers only add ids.
#[instrument(skip_all, fields(name = name.unwrap_or("")))]
pub fn build_configuration(
    name: Option<&str>,
    selection: &SelectionArgs,
    app_config: &AppConfig,
    catalog: &CatalogService,
) -> CliResult<Configuration> {
    let mut config = match &selection.from {
        Some(path) => load_configuration(path)?,
        None => Configuration::new(parse_name(&app_config.defaults.project_name)?),
    };

    if let Some(name) = name {
        config.project_name = parse_name(name)?;
    }

    for (category, ids) in selection.by_category() {
        for id in ids {
            config.select(category, id);
        }
    }
    for id in &app_config.defaults.tools {
        config.select(Category::Tools, id);
    }
    for id in &selection.templates {
        catalog.apply_template(&mut config, id)?;
    }

    debug!(project = %config.project_name, templates = ?config.templates, "Configuration built");
    Ok(config)
}

/// Read a saved `project.json`.
pub fn load_configuration(path: &Path) -> CliResult<Configuration> {
    let text = std::fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_cli_context(|| format!("'{}' is not a valid project configuration", path.display()))
}

fn parse_name(name: &str) -> CliResult<ProjectName> {
    ProjectName::new(name).map_err(|e| match e {
        DomainError::InvalidProjectName { name, reason } => CliError::InvalidProjectName { name, reason },
        other => CliError::Core(other.into()),
    })
}

/// Tell the user about ids the catalog will ignore.
pub fn warn_unknown(catalog: &CatalogService, config: &Configuration, output: &OutputManager) -> CliResult<()> {
    for (category, id) in catalog.unknown_ids(config) {
        let category = category.map_or("template", |c| c.as_str());
        output.warning(&format!("Unknown {category} id '{id}' ignored"))?;
    }
    Ok(())
}
