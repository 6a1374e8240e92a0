use tracing::debug;

use crate::domain::catalog::{Catalog, TechOption, Template};
use crate::domain::entities::configuration::Configuration;
use crate::domain::value_objects::{Category, ProjectName};

/// A [`Configuration`] resolved against a [`Catalog`].
///
/// Only ids the catalog knows survive resolution. Per-category order is the
/// user's selection order.
#[derive(Debug, Clone)]
pub struct Selection<'c> {
    catalog: &'c Catalog,
    project_name: ProjectName,
    chosen: [Vec<&'c TechOption>; 7],
    templates: Vec<&'c Template>,
}

impl<'c> Selection<'c> {
    pub(crate) fn resolve(catalog: &'c Catalog, config: &Configuration) -> Self {
        let mut chosen: [Vec<&'c TechOption>; 7] = Default::default();
        for category in Category::ALL {
            for id in config.ids(category) {
                match catalog.option(category, id) {
                    Some(option) => chosen[category.index()].push(option),
                    None => debug!(%category, id = %id, "skipping unknown id"),
                }
            }
        }

        let templates = config
            .templates
            .iter()
            .filter_map(|id| {
                let found = catalog.template(id);
                if found.is_none() {
                    debug!(template = %id, "skipping unknown template");
                }
                found
            })
            .collect();

        Self {
            catalog,
            project_name: config.project_name.clone(),
            chosen,
            templates,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    /// Selected options of one category, in selection order.
    pub fn options(&self, category: Category) -> &[&'c TechOption] {
        &self.chosen[category.index()]
    }

    pub fn ids(&self, category: Category) -> impl Iterator<Item = &'c str> + '_ {
        self.options(category).iter().copied().map(|o| o.id.as_str())
    }

    pub fn has(&self, category: Category, id: &str) -> bool {
        self.options(category).iter().any(|o| o.id == id)
    }

    pub fn has_any(&self, category: Category) -> bool {
        !self.options(category).is_empty()
    }

    pub fn templates(&self) -> &[&'c Template] {
        &self.templates
    }

    pub fn has_template(&self, id: &str) -> bool {
        self.templates.iter().any(|t| t.id == id)
    }

    /// Selected options of `category` in catalog declaration order.
    pub fn in_catalog_order(&self, category: Category) -> impl Iterator<Item = &'c TechOption> + '_ {
        self.catalog
            .options(category)
            .iter()
            .filter(move |o| self.has(category, &o.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_contribute_nothing() {
        let catalog = Catalog::builtin();
        let config = Configuration::new(ProjectName::new("x").unwrap())
            .with(Category::Frontend, ["svelte", "react"])
            .with(Category::LlmProviders, ["skynet"])
            .with_template("not-a-template");

        let selection = catalog.resolve(&config);
        assert_eq!(selection.ids(Category::Frontend).collect::<Vec<_>>(), ["react"]);
        assert!(!selection.has_any(Category::LlmProviders));
        assert!(selection.templates().is_empty());
    }

    #[test]
    fn catalog_order_differs_from_selection_order() {
        let catalog = Catalog::builtin();
        let config = Configuration::new(ProjectName::new("x").unwrap())
            .with(Category::LlmProviders, ["ollama", "openai"]);
        let selection = catalog.resolve(&config);

        assert_eq!(
            selection.ids(Category::LlmProviders).collect::<Vec<_>>(),
            ["ollama", "openai"]
        );
        let ordered: Vec<_> = selection
            .in_catalog_order(Category::LlmProviders)
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ordered, ["openai", "ollama"]);
    }
}
