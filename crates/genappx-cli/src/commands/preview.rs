//! `genappx tree`, `script`, `env` and `check`: render one generator's
//! output without touching the filesystem.

use tracing::instrument;

use genappx_core::domain::flatten_structure;

use crate::{
    cli::{CheckArgs, PreviewArgs},
    commands::{build_configuration, services, warn_unknown},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// What a preview command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Tree,
    Script,
    Env,
}

#[instrument(skip_all, fields(kind = ?kind))]
pub fn execute(kind: PreviewKind, args: PreviewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (catalog, scaffold) = services();
    let project = build_configuration(args.name.as_deref(), &args.selection, &config, &catalog)?;
    warn_unknown(&catalog, &project, &output)?;

    match kind {
        PreviewKind::Tree => {
            let paths = flatten_structure(&scaffold.tree(&project), "");
            if output.is_json() {
                output.json(&paths)?;
            } else {
                output.data(&paths.join("\n"))?;
            }
        }
        PreviewKind::Script => {
            let script = scaffold.script(&project);
            if output.is_json() {
                output.json(&serde_json::json!({ "script": script }))?;
            } else {
                output.data(&script)?;
            }
        }
        PreviewKind::Env => {
            let env = scaffold.env(&project);
            if output.is_json() {
                output.json(&serde_json::json!({ "env": env }))?;
            } else {
                output.data(&env)?;
            }
        }
    }
    Ok(())
}

/// `genappx check`: print the compatibility report.
#[instrument(skip_all, fields(strict = args.strict))]
pub fn check(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (catalog, scaffold) = services();
    let preview = args.preview;
    let project = build_configuration(preview.name.as_deref(), &preview.selection, &config, &catalog)?;
    warn_unknown(&catalog, &project, &output)?;

    let report = scaffold.report(&project);
    if output.is_json() {
        output.json(&report)?;
    } else {
        output.report(&report)?;
    }

    if args.strict && !report.conflicts.is_empty() {
        return Err(CliError::Incompatible {
            conflicts: report.conflicts,
        });
    }
    Ok(())
}
