//! Rule catalog, document store, and resolution.
//!
//! A [`Rule`] is a transient value built fresh for every fetch. Nothing in
//! this module caches documents between calls.

pub mod catalog;
pub mod header;
pub mod resolver;
pub mod store;

use serde::Serialize;

pub use catalog::{Catalog, CatalogEntry, Category};
pub use header::{HeaderParse, RuleHeader};
pub use resolver::RuleResolver;
pub use store::{DirectoryStore, RuleStore, StoreError};

/// A single categorized documentation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub category: String,
    pub topic: String,
    pub title: String,
    pub description: String,
    pub priority: u64,
    /// Full document text. Empty for entries produced by the listing.
    pub content: String,
}

/// Failures raised while resolving or loading a rule.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Unknown rule: {category}/{topic}")]
    UnknownRule { category: String, topic: String },
    #[error(transparent)]
    DocumentRead(#[from] StoreError),
}
