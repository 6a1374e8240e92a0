//! `genappx export`: write the project as a zip archive.

use std::path::PathBuf;

use tracing::{info, instrument};

use crate::{
    cli::ExportArgs,
    commands::{build_configuration, services, warn_unknown},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: ExportArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (catalog, scaffold) = services();
    let project = build_configuration(args.name.as_deref(), &args.selection, &config, &catalog)?;
    warn_unknown(&catalog, &project, &output)?;

    let archive = args
        .archive
        .unwrap_or_else(|| PathBuf::from(format!("{}.zip", project.project_name)));

    info!(archive = %archive.display(), "Export started");
    let bundle = scaffold.export(&project, &archive)?;

    if output.is_json() {
        let sidecars: Vec<&str> = bundle.sidecars.iter().map(|s| s.name.as_str()).collect();
        output.json(&serde_json::json!({
            "archive": archive.display().to_string(),
            "project": project.project_name.as_str(),
            "files": bundle.tree.files().count(),
            "sidecars": sidecars,
        }))?;
        return Ok(());
    }

    output.success(&format!("Exported '{}' to {}", project.project_name, archive.display()))?;
    Ok(())
}
