//! The technology catalog.
//!
//! A [`Catalog`] is read-only data: per-category [`TechOption`] lists plus
//! the [`Template`] presets. Generators never reach for a global table; they
//! receive a `&Catalog`, so tests can pass a reduced one.

pub mod builtin;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::debug;

use crate::domain::entities::configuration::Configuration;
use crate::domain::entities::selection::Selection;
use crate::domain::error::DomainError;
use crate::domain::value_objects::Category;

/// Wildcard accepted in [`TechOption::compatible`].
pub const WILDCARD: &str = "*";

/// One selectable technology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechOption {
    pub id: String,
    pub name: String,
    pub description: String,
    pub compatible: IndexSet<String>,
    pub install_commands: Vec<String>,
    pub config_files: Vec<String>,
}

impl TechOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            compatible: IndexSet::new(),
            install_commands: Vec::new(),
            config_files: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn compatible_with<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compatible.extend(ids.into_iter().map(Into::into));
        self
    }

    /// True if `id` is declared compatible, directly or via the wildcard.
    pub fn accepts(&self, id: &str) -> bool {
        self.compatible.contains(id) || self.compatible.contains(WILDCARD)
    }

    /// True only for an explicit declaration; the wildcard does not count.
    pub fn declares(&self, id: &str) -> bool {
        self.compatible.contains(id)
    }

    fn from_def(def: &builtin::OptionDef) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            compatible: def.compatible.iter().map(|s| s.to_string()).collect(),
            install_commands: def.commands.iter().map(|s| s.to_string()).collect(),
            config_files: def.config_files.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A curated preset: a default sub-selection across categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    /// Display grouping label (e.g. "RAG / Retrieval").
    pub group: String,
    pub description: String,
    pub preset: Vec<(Category, Vec<String>)>,
}

impl Template {
    pub fn new(id: impl Into<String>, name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group: group.into(),
            description: String::new(),
            preset: Vec::new(),
        }
    }

    pub fn with_preset<I, S>(mut self, category: Category, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preset
            .push((category, ids.into_iter().map(Into::into).collect()));
        self
    }

    /// Preset ids for one category (empty if the preset omits it).
    pub fn preset_ids(&self, category: Category) -> &[String] {
        self.preset
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, ids)| ids.as_slice())
            .unwrap_or(&[])
    }

    fn from_def(def: &builtin::TemplateDef) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            group: def.group.to_string(),
            description: def.description.to_string(),
            preset: def
                .preset
                .iter()
                .map(|(c, ids)| (*c, ids.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }
}

/// Read-only registry of technologies and templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    options: [Vec<TechOption>; 7],
    templates: Vec<Template>,
}

impl Catalog {
    /// An empty catalog, for building test doubles.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The full built-in catalog.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for (category, table) in builtin::OPTION_REGISTRY.iter() {
            catalog.options[category.index()] = table.iter().map(TechOption::from_def).collect();
        }
        catalog.templates = builtin::TEMPLATES.iter().map(Template::from_def).collect();
        catalog
    }

    pub fn with_option(mut self, category: Category, option: TechOption) -> Self {
        self.options[category.index()].push(option);
        self
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.push(template);
        self
    }

    /// Options of one category, in declaration order.
    pub fn options(&self, category: Category) -> &[TechOption] {
        &self.options[category.index()]
    }

    /// Find-or-none lookup.
    pub fn option(&self, category: Category, id: &str) -> Option<&TechOption> {
        self.options(category).iter().find(|o| o.id == id)
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Copy a template's preset ids into `config` and mark it active.
    ///
    /// Ids already selected are left in place; new ones are appended.
    pub fn apply_template(&self, config: &mut Configuration, id: &str) -> Result<(), DomainError> {
        let template = self
            .template(id)
            .ok_or_else(|| DomainError::UnknownTemplate(id.to_string()))?;

        for (category, ids) in &template.preset {
            for option_id in ids {
                config.select(*category, option_id);
            }
        }
        config.activate_template(&template.id);
        debug!(template = %template.id, "template preset applied");
        Ok(())
    }

    /// Resolve a configuration against this catalog.
    ///
    /// Unknown ids and unknown templates are dropped here, so everything
    /// downstream only ever sees known entries.
    pub fn resolve<'c>(&'c self, config: &Configuration) -> Selection<'c> {
        Selection::resolve(self, config)
    }

    /// Ids in `config` that this catalog does not know, per category.
    ///
    /// Template ids are reported under `None`.
    pub fn unknown_ids(&self, config: &Configuration) -> Vec<(Option<Category>, String)> {
        let mut unknown = Vec::new();
        for category in Category::ALL {
            for id in config.ids(category) {
                if self.option(category, id).is_none() {
                    unknown.push((Some(category), id.clone()));
                }
            }
        }
        for id in &config.templates {
            if self.template(id).is_none() {
                unknown.push((None, id.clone()));
            }
        }
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ProjectName;

    fn config() -> Configuration {
        Configuration::new(ProjectName::new("demo").unwrap())
    }

    #[test]
    fn builtin_catalog_has_every_category() {
        let catalog = Catalog::builtin();
        for category in Category::ALL {
            assert!(!catalog.options(category).is_empty(), "{category} is empty");
        }
        assert_eq!(catalog.options(Category::Frontend)[0].id, "react");
    }

    #[test]
    fn lookup_is_find_or_none() {
        let catalog = Catalog::builtin();
        assert!(catalog.option(Category::Backend, "express").is_some());
        assert!(catalog.option(Category::Backend, "react").is_none());
        assert!(catalog.option(Category::Backend, "rails").is_none());
    }

    #[test]
    fn wildcard_accepts_everything_but_does_not_declare() {
        let docker = TechOption::new("docker", "Docker").compatible_with(["*"]);
        assert!(docker.accepts("anything"));
        assert!(!docker.declares("anything"));
    }

    #[test]
    fn apply_template_copies_preset_and_activates() {
        let catalog = Catalog::builtin();
        let mut cfg = config();
        cfg.select(Category::Tools, "docker");
        catalog.apply_template(&mut cfg, "rag-service").unwrap();

        assert_eq!(cfg.backend, vec!["fastapi"]);
        assert_eq!(cfg.database, vec!["chroma"]);
        assert_eq!(cfg.tools, vec!["docker"]);
        assert_eq!(cfg.templates, vec!["rag-service"]);
    }

    #[test]
    fn apply_template_twice_does_not_duplicate() {
        let catalog = Catalog::builtin();
        let mut cfg = config();
        catalog.apply_template(&mut cfg, "ai-chatbot").unwrap();
        catalog.apply_template(&mut cfg, "ai-chatbot").unwrap();
        assert_eq!(cfg.frontend, vec!["react"]);
        assert_eq!(cfg.templates, vec!["ai-chatbot"]);
    }

    #[test]
    fn apply_unknown_template_is_an_error() {
        let catalog = Catalog::builtin();
        let mut cfg = config();
        assert_eq!(
            catalog.apply_template(&mut cfg, "nope"),
            Err(DomainError::UnknownTemplate("nope".into()))
        );
    }

    #[test]
    fn unknown_ids_are_reported_per_category() {
        let catalog = Catalog::builtin();
        let mut cfg = config();
        cfg.select(Category::Frontend, "svelte");
        cfg.select(Category::Frontend, "react");
        cfg.activate_template("ghost");

        let unknown = catalog.unknown_ids(&cfg);
        assert_eq!(
            unknown,
            vec![
                (Some(Category::Frontend), "svelte".to_string()),
                (None, "ghost".to_string())
            ]
        );
    }

    #[test]
    fn reduced_catalog_for_tests() {
        let catalog = Catalog::empty()
            .with_option(Category::Frontend, TechOption::new("react", "React"))
            .with_template(Template::new("t", "T", "G").with_preset(Category::Frontend, ["react"]));
        assert_eq!(catalog.options(Category::Frontend).len(), 1);
        assert!(catalog.options(Category::Backend).is_empty());
        assert_eq!(catalog.template("t").unwrap().preset_ids(Category::Frontend), ["react"]);
    }
}
