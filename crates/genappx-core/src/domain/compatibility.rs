//! Pairing checks over a selection.

use serde::Serialize;

use crate::domain::catalog::Catalog;
use crate::domain::entities::configuration::Configuration;
use crate::domain::entities::selection::Selection;
use crate::domain::value_objects::Category;

/// Advisory emitted when MCP is selected without a tool-calling provider.
pub const MCP_ADVISORY: &str = "MCP usually paired with OpenAI or Anthropic for richer tool calling.";

/// Providers that satisfy the MCP advisory.
const MCP_PROVIDERS: &[&str] = &["openai", "anthropic"];

/// Result of a compatibility check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompatibilityReport {
    pub conflicts: Vec<String>,
    pub warnings: Vec<String>,
}

impl CompatibilityReport {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty() && self.warnings.is_empty()
    }
}

/// Check a configuration against `catalog`.
pub fn check_compatibility(catalog: &Catalog, config: &Configuration) -> CompatibilityReport {
    check_selection(&catalog.resolve(config))
}

/// Check an already resolved selection.
///
/// A frontend/backend conflict requires that *neither* side declares the
/// other (or the wildcard). Framework/provider warnings name the provider
/// by id.
pub fn check_selection(selection: &Selection<'_>) -> CompatibilityReport {
    let mut report = CompatibilityReport::default();

    for front in selection.options(Category::Frontend) {
        for back in selection.options(Category::Backend) {
            if !front.accepts(&back.id) && !back.accepts(&front.id) {
                report
                    .conflicts
                    .push(format!("{} may not pair cleanly with {}", front.name, back.name));
            }
        }
    }

    // Resolved ids only: an unknown provider is skipped, not warned about.
    for framework in selection.options(Category::AiFrameworks) {
        for provider in selection.ids(Category::LlmProviders) {
            if !framework.declares(provider) {
                report.warnings.push(format!(
                    "{} not validated for provider {provider} \u{2013} check docs.",
                    framework.name
                ));
            }
        }
    }

    if selection.has(Category::Protocols, "mcp")
        && !MCP_PROVIDERS
            .iter()
            .any(|p| selection.has(Category::LlmProviders, p))
    {
        report.warnings.push(MCP_ADVISORY.to_string());
    }

    report
}
