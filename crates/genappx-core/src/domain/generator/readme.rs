//! Base README stage: stack summary and run instructions.

use crate::domain::catalog::Catalog;
use crate::domain::entities::configuration::Configuration;
use crate::domain::entities::selection::Selection;
use crate::domain::value_objects::Category;

/// Base README for a configuration.
pub fn generate_readme(catalog: &Catalog, config: &Configuration) -> String {
    readme_for(&catalog.resolve(config))
}

pub(crate) fn readme_for(selection: &Selection<'_>) -> String {
    let stack = Category::ALL
        .iter()
        .filter(|c| selection.has_any(**c))
        .map(|c| {
            let ids: Vec<_> = selection.ids(*c).collect();
            format!("- **{}:** {}", c.label(), ids.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n");

    let templates = if selection.templates().is_empty() {
        String::new()
    } else {
        let ids: Vec<_> = selection.templates().iter().map(|t| t.id.as_str()).collect();
        format!("\n## Templates\n- {}", ids.join(", "))
    };

    format!(
        "# {name}\n\nGenerated with **GenAppXpress**.{templates}\n\n## Selected Stack\n{stack}\n\n\
         ## Getting Started\nRun the generated setup script or follow manual steps.\n\n\
         ## AI Notes\nIf using AI providers set the API keys in .env before running agent scripts.\n",
        name = selection.project_name(),
    )
}
