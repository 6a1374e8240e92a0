use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Category, ProjectName};

/// The user's selection: the sole input of every generator.
///
/// Category lists hold option ids in selection order and never contain
/// duplicates. Serialises to the `project.json` shape
/// (`projectName`, `frontend`, ..., `aiFrameworks`, `templates`); loading
/// goes through [`select`](Self::select) so repeated ids collapse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredConfiguration")]
pub struct Configuration {
    pub project_name: ProjectName,
    pub frontend: Vec<String>,
    pub backend: Vec<String>,
    pub database: Vec<String>,
    pub tools: Vec<String>,
    pub ai_frameworks: Vec<String>,
    pub llm_providers: Vec<String>,
    pub protocols: Vec<String>,
    /// Active template ids, in activation order.
    pub templates: Vec<String>,
}

/// `project.json` as written on disk, before duplicates are dropped.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredConfiguration {
    project_name: ProjectName,
    #[serde(default)]
    frontend: Vec<String>,
    #[serde(default)]
    backend: Vec<String>,
    #[serde(default)]
    database: Vec<String>,
    #[serde(default)]
    tools: Vec<String>,
    #[serde(default)]
    ai_frameworks: Vec<String>,
    #[serde(default)]
    llm_providers: Vec<String>,
    #[serde(default)]
    protocols: Vec<String>,
    #[serde(default)]
    templates: Vec<String>,
}

impl From<StoredConfiguration> for Configuration {
    fn from(stored: StoredConfiguration) -> Self {
        let mut config = Self::new(stored.project_name)
            .with(Category::Frontend, stored.frontend)
            .with(Category::Backend, stored.backend)
            .with(Category::Database, stored.database)
            .with(Category::Tools, stored.tools)
            .with(Category::AiFrameworks, stored.ai_frameworks)
            .with(Category::LlmProviders, stored.llm_providers)
            .with(Category::Protocols, stored.protocols);
        for id in &stored.templates {
            config.activate_template(id);
        }
        config
    }
}

impl Configuration {
    /// An empty selection.
    pub fn new(project_name: ProjectName) -> Self {
        Self {
            project_name,
            frontend: Vec::new(),
            backend: Vec::new(),
            database: Vec::new(),
            tools: Vec::new(),
            ai_frameworks: Vec::new(),
            llm_providers: Vec::new(),
            protocols: Vec::new(),
            templates: Vec::new(),
        }
    }

    pub fn ids(&self, category: Category) -> &[String] {
        match category {
            Category::Frontend => &self.frontend,
            Category::Backend => &self.backend,
            Category::Database => &self.database,
            Category::Tools => &self.tools,
            Category::AiFrameworks => &self.ai_frameworks,
            Category::LlmProviders => &self.llm_providers,
            Category::Protocols => &self.protocols,
        }
    }

    fn ids_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Frontend => &mut self.frontend,
            Category::Backend => &mut self.backend,
            Category::Database => &mut self.database,
            Category::Tools => &mut self.tools,
            Category::AiFrameworks => &mut self.ai_frameworks,
            Category::LlmProviders => &mut self.llm_providers,
            Category::Protocols => &mut self.protocols,
        }
    }

    pub fn is_selected(&self, category: Category, id: &str) -> bool {
        self.ids(category).iter().any(|s| s == id)
    }

    /// Select `id` if not already selected. Returns true if it was added.
    pub fn select(&mut self, category: Category, id: &str) -> bool {
        if self.is_selected(category, id) {
            return false;
        }
        self.ids_mut(category).push(id.to_string());
        true
    }

    /// Flip selection of `id`. Returns the new state.
    pub fn toggle(&mut self, category: Category, id: &str) -> bool {
        let ids = self.ids_mut(category);
        if let Some(pos) = ids.iter().position(|s| s == id) {
            ids.remove(pos);
            false
        } else {
            ids.push(id.to_string());
            true
        }
    }

    /// Builder-style multi-select.
    pub fn with<I, S>(mut self, category: Category, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.select(category, id.as_ref());
        }
        self
    }

    pub fn with_template(mut self, id: impl AsRef<str>) -> Self {
        self.activate_template(id.as_ref());
        self
    }

    pub fn activate_template(&mut self, id: &str) {
        if !self.templates.iter().any(|t| t == id) {
            self.templates.push(id.to_string());
        }
    }

    /// True when no category and no template is populated.
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.ids(*c).is_empty()) && self.templates.is_empty()
    }

    /// Union of a preset with this selection.
    ///
    /// Per category the preset ids come first, followed by any ids the user
    /// selected on top. Nothing the user picked is dropped.
    pub fn overlaid_with(&self, preset: &[(Category, Vec<String>)]) -> Self {
        let mut merged = Self::new(self.project_name.clone());
        merged.templates = self.templates.clone();
        for category in Category::ALL {
            let preset_ids = preset
                .iter()
                .filter(|(c, _)| *c == category)
                .flat_map(|(_, ids)| ids.iter());
            for id in preset_ids.chain(self.ids(category)) {
                merged.select(category, id);
            }
        }
        merged
    }
}
