//! Implementation of the `genappx new` command.
//!
//! Responsibility: translate CLI arguments into a `Configuration`, call the
//! core scaffold service, and display results. No business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use genappx_core::{
    application::{ScaffoldOptions, ScaffoldService},
    domain::{Category, Configuration, flatten_structure},
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    commands::{build_configuration, services, warn_unknown},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `genappx new` command.
///
/// Dispatch sequence:
/// 1. Build the configuration from flags, `--from` and config defaults
/// 2. Report unknown ids and compatibility findings
/// 3. Confirm with user unless `--yes` or `--quiet`
/// 4. Early-exit if `--dry-run`
/// 5. Execute scaffolding via `ScaffoldService`
/// 6. Print next-steps guidance
#[instrument(skip_all, fields(project = args.name.as_deref().unwrap_or("")))]
pub fn execute(args: NewArgs, global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (catalog, scaffold) = services();
    let project = build_configuration(args.name.as_deref(), &args.selection, &config, &catalog)?;
    warn_unknown(&catalog, &project, &output)?;

    let report = scaffold.report(&project);
    if !report.is_clean() {
        output.report(&report)?;
    }

    let output_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let project_path = output_dir.join(project.project_name.as_str());
    let options = ScaffoldOptions {
        with_script: args.script || config.export.include_script,
        force: args.force,
    };

    if !global.quiet && !args.yes && !args.dry_run && !output.is_json() {
        show_configuration(&project, &project_path, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    if args.dry_run {
        return dry_run(&scaffold, &project, &project_path, &output);
    }

    output.header(&format!("Creating '{}'...", project.project_name))?;
    info!(project = %project.project_name, path = %project_path.display(), "Scaffold started");

    let structure = scaffold.scaffold(&project, &output_dir, options)?;

    info!(project = %project.project_name, files = structure.file_count(), "Scaffold completed");

    if output.is_json() {
        output.json(&serde_json::json!({
            "project": project.project_name.as_str(),
            "path": structure.root().display().to_string(),
            "files": structure.file_count(),
            "script": options.with_script,
        }))?;
        return Ok(());
    }

    output.success(&format!(
        "Project '{}' created with {} files",
        project.project_name,
        structure.file_count()
    ))?;
    print_next_steps(&project, &output, options.with_script)?;

    Ok(())
}

fn dry_run(
    scaffold: &ScaffoldService,
    project: &Configuration,
    project_path: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let tree = scaffold.tree(project);
    let paths = flatten_structure(&tree, "");

    if output.is_json() {
        output.json(&paths)?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would create '{}' at {}",
        project.project_name,
        project_path.display()
    ))?;
    if project_path.exists() {
        output.warning("Target directory already exists; use --force to replace it")?;
    }
    for path in paths {
        output.print(&format!("  {path}"))?;
    }
    Ok(())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(project: &Configuration, path: &Path, out: &OutputManager) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  {:<14}{}", "Project:", project.project_name))?;
    for category in Category::ALL {
        let ids = project.ids(category);
        if !ids.is_empty() {
            out.print(&format!("  {:<14}{}", format!("{}:", category.label()), ids.join(", ")))?;
        }
    }
    if !project.templates.is_empty() {
        out.print(&format!("  {:<14}{}", "Templates:", project.templates.join(", ")))?;
    }
    out.print(&format!("  {:<14}{}", "Location:", path.display()))?;
    out.print("")?;
    Ok(())
}

fn print_next_steps(project: &Configuration, out: &OutputManager, with_script: bool) -> CliResult<()> {
    let name = project.project_name.as_str();
    out.print("")?;
    out.print("Next steps:")?;
    if with_script {
        out.print(&format!("  bash {name}-setup.sh"))?;
    } else {
        out.print(&format!("  cd {name}"))?;
    }
    if !project.frontend.is_empty() || project.backend.iter().any(|b| b == "express") {
        out.print("  npm install && npm run dev")?;
    }
    if project.backend.iter().any(|b| b == "fastapi") {
        out.print("  pip install -r requirements.txt && uvicorn api.main:app --reload")?;
    }
    out.print("  # Fill in .env before starting")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return confirm_line();
    }
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    confirm_line()
}

/// `[Y/n]` prompt on plain stdin; an empty answer means yes.
fn confirm_line() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_ascii_lowercase();
    input.is_empty() || input == "y" || input == "yes"
}

// ── Tests ─────────────────────────────────────────────────────────────────────
