use std::sync::Arc;

use crate::diagnostics::Diagnostics;

use super::catalog::Catalog;
use super::header;
use super::store::RuleStore;
use super::{Rule, RuleError};

const COMPONENT: &str = "resolver";

/// Document holding the primary workflow guide.
pub const MAIN_GUIDE_DOCUMENT: &str = "050-workflow.mdc";

/// Resolves `(category, topic)` pairs to fully loaded [`Rule`]s.
pub struct RuleResolver<S> {
    catalog: Catalog,
    store: S,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<S: RuleStore> RuleResolver<S> {
    pub fn new(catalog: Catalog, store: S, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            catalog,
            store,
            diagnostics,
        }
    }

    /// Fetch the workflow guide. Metadata is fixed; the header is not parsed.
    pub async fn fetch_main_guide(&self) -> Result<Rule, RuleError> {
        self.diagnostics.info(COMPONENT, "Fetching main workflow guide");
        let content = self.store.read(MAIN_GUIDE_DOCUMENT).await?;

        Ok(Rule {
            category: "core".into(),
            topic: "workflow".into(),
            title: "Development Workflow - Plan/Implement/Review".into(),
            description: "Core workflow philosophy with Golden Rules for AI agents".into(),
            priority: 50,
            content,
        })
    }

    /// Fetch a rule and extract metadata from its header block.
    ///
    /// Missing or malformed header fields fall back to defaults; only an
    /// unknown pair or a failed read is an error. The header stays in
    /// `content`.
    pub async fn fetch_rule(&self, category: &str, topic: &str) -> Result<Rule, RuleError> {
        self.diagnostics.info(
            COMPONENT,
            &format!("Fetching rule: category=\"{category}\", topic=\"{topic}\""),
        );

        let document = self.catalog.resolve_document(category, topic)?;
        let content = self.store.read(document).await?;
        let header = header::parse(&content).into_header();

        Ok(Rule {
            category: category.to_string(),
            topic: topic.to_string(),
            title: header.title.unwrap_or_else(|| format!("{category}: {topic}")),
            description: header.description.unwrap_or_default(),
            priority: header.priority.unwrap_or(0),
            content,
        })
    }

    /// Metadata-only listing straight from the catalog. No I/O.
    pub fn list_available_rules(&self) -> Vec<Rule> {
        self.diagnostics.info(COMPONENT, "Listing all available rules");
        let rules = self.catalog.list_all();
        self.diagnostics
            .info(COMPONENT, &format!("Listing complete ({} rules found)", rules.len()));
        rules
    }
}
