//! Implementation of the `genappx list` command.

use std::str::FromStr;

use serde::Serialize;

use genappx_core::{application::CatalogService, domain::Category, error::GenappxError};

use crate::{
    cli::{ListArgs, ListFormat, ListTarget},
    commands::services,
    error::CliResult,
    output::OutputManager,
};

/// One printable catalog entry.
#[derive(Debug, Serialize)]
struct Row<'a> {
    /// Category key for options, group label for templates.
    section: &'a str,
    id: &'a str,
    name: &'a str,
    description: &'a str,
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let (catalog, _) = services();

    let rows = match args.what {
        ListTarget::Options => {
            let categories = match &args.category {
                Some(raw) => vec![Category::from_str(raw).map_err(GenappxError::from)?],
                None => Category::ALL.to_vec(),
            };
            option_rows(&catalog, &categories)
        }
        ListTarget::Templates => template_rows(&catalog),
    };

    let format = if output.is_json() { ListFormat::Json } else { args.format };
    match format {
        ListFormat::Table => {
            let title = match args.what {
                ListTarget::Options => "Available Options",
                ListTarget::Templates => "Available Templates",
            };
            output.header(&format!("{title}:"))?;
            let width = rows.iter().map(|r| r.id.len()).max().unwrap_or(0);
            let mut section = "";
            for row in &rows {
                if row.section != section {
                    section = row.section;
                    output.data(&format!("\n{section}"))?;
                }
                output.data(&format!("  {:<width$}  {}  {}", row.id, row.name, row.description))?;
            }
        }
        ListFormat::List => {
            for row in &rows {
                output.data(row.id)?;
            }
        }
        ListFormat::Json => output.json(&rows)?,
        ListFormat::Csv => {
            output.data("section,id,name,description")?;
            for row in &rows {
                output.data(&format!(
                    "{},{},{},{}",
                    csv_field(row.section),
                    csv_field(row.id),
                    csv_field(row.name),
                    csv_field(row.description)
                ))?;
            }
        }
    }

    Ok(())
}

fn option_rows<'a>(catalog: &'a CatalogService, categories: &[Category]) -> Vec<Row<'a>> {
    categories
        .iter()
        .flat_map(|category| {
            catalog.options(*category).iter().map(move |option| Row {
                section: category.as_str(),
                id: &option.id,
                name: &option.name,
                description: &option.description,
            })
        })
        .collect()
}

fn template_rows(catalog: &CatalogService) -> Vec<Row<'_>> {
    catalog
        .templates_by_group()
        .into_iter()
        .flat_map(|group| {
            group.templates.into_iter().map(move |template| Row {
                section: group.group,
                id: &template.id,
                name: &template.name,
                description: &template.description,
            })
        })
        .collect()
}

/// Quote a CSV field when it contains a separator, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
