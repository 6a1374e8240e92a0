//! Catalog Service - catalog queries and template presets.
//!
//! Separated from ScaffoldService for single responsibility: nothing here
//! generates files.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    domain::{Catalog, Category, Configuration, DomainError, TechOption, Template},
    error::GenappxResult,
};

/// Templates sharing one display group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateGroup<'a> {
    pub group: &'a str,
    pub templates: Vec<&'a Template>,
}

/// Service for catalog operations.
pub struct CatalogService {
    catalog: Arc<Catalog>,
}

impl CatalogService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Options of one category, in catalog order.
    pub fn options(&self, category: Category) -> &[TechOption] {
        self.catalog.options(category)
    }

    pub fn option(&self, category: Category, id: &str) -> GenappxResult<&TechOption> {
        self.catalog.option(category, id).ok_or_else(|| {
            DomainError::UnknownOption {
                category: category.as_str().to_string(),
                id: id.to_string(),
            }
            .into()
        })
    }

    pub fn templates(&self) -> &[Template] {
        self.catalog.templates()
    }

    pub fn template(&self, id: &str) -> GenappxResult<&Template> {
        self.catalog
            .template(id)
            .ok_or_else(|| DomainError::UnknownTemplate(id.to_string()).into())
    }

    /// Templates grouped by display group. Groups are sorted by name;
    /// templates keep catalog order inside a group.
    pub fn templates_by_group(&self) -> Vec<TemplateGroup<'_>> {
        let mut groups: Vec<TemplateGroup<'_>> = Vec::new();
        for template in self.catalog.templates() {
            match groups.iter_mut().find(|g| g.group == template.group) {
                Some(group) => group.templates.push(template),
                None => groups.push(TemplateGroup {
                    group: &template.group,
                    templates: vec![template],
                }),
            }
        }
        groups.sort_by(|a, b| a.group.cmp(b.group));
        groups
    }

    /// Ids in `config` the catalog does not know. Each one is logged.
    pub fn unknown_ids(&self, config: &Configuration) -> Vec<(Option<Category>, String)> {
        let unknown = self.catalog.unknown_ids(config);
        for (category, id) in &unknown {
            let category = category.map_or("templates", |c| c.as_str());
            warn!(category, id = %id, "Unknown id skipped");
        }
        unknown
    }

    /// Merge a template's preset into `config` and activate it.
    pub fn apply_template(&self, config: &mut Configuration, id: &str) -> GenappxResult<()> {
        self.catalog.apply_template(config, id)?;
        debug!(template = id, "Template preset applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectName;
    use crate::error::{ErrorCategory, GenappxError};

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(Catalog::builtin()))
    }

    #[test]
    fn groups_are_sorted_and_cover_every_template() {
        let service = service();
        let groups = service.templates_by_group();
        let names: Vec<_> = groups.iter().map(|g| g.group).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let total: usize = groups.iter().map(|g| g.templates.len()).sum();
        assert_eq!(total, service.templates().len());
    }

    #[test]
    fn groups_keep_catalog_order() {
        let catalog = Catalog::empty()
            .with_template(Template::new("b", "B", "Zeta"))
            .with_template(Template::new("a", "A", "Alpha"))
            .with_template(Template::new("c", "C", "Zeta"));
        let service = CatalogService::new(Arc::new(catalog));
        let groups = service.templates_by_group();
        assert_eq!(groups[0].group, "Alpha");
        let zeta: Vec<_> = groups[1].templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(zeta, ["b", "c"]);
    }

    #[test]
    fn unknown_template_is_not_found() {
        let err = service().template("ghost").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn unknown_option_is_not_found() {
        let err = service().option(Category::Frontend, "svelte").unwrap_err();
        assert!(matches!(err, GenappxError::Domain(DomainError::UnknownOption { .. })));
    }

    #[test]
    fn apply_template_selects_preset() {
        let mut config = Configuration::new(ProjectName::new("p").unwrap());
        service().apply_template(&mut config, "rag-service").unwrap();
        assert_eq!(config.templates, ["rag-service"]);
        assert!(config.backend.iter().any(|b| b == "fastapi"));
    }
}
