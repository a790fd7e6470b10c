//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use engineering_rules_mcp::diagnostics::{Diagnostics, NullDiagnostics};
use engineering_rules_mcp::handlers::RuleTools;
use engineering_rules_mcp::rules::{Catalog, DirectoryStore, RuleResolver};

/// Records every diagnostic line as `"{level} {component}: {message}"`.
#[derive(Default)]
pub struct RecordingDiagnostics {
    lines: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn info(&self, component: &'static str, message: &str) {
        self.lines.lock().unwrap().push(format!("INFO {component}: {message}"));
    }

    fn warn(&self, component: &'static str, message: &str) {
        self.lines.lock().unwrap().push(format!("WARN {component}: {message}"));
    }
}

/// Write one document per catalog entry, each without a header block.
pub fn populate_catalog(root: &Path) {
    fs::create_dir_all(root).unwrap();
    for entry in Catalog::default().entries() {
        fs::write(
            root.join(entry.document),
            format!("# {} guidance\n\nBody for {}/{}.\n", entry.title, entry.category, entry.topic),
        )
        .unwrap();
    }
}

pub fn write_document(root: &Path, document: &str, content: &str) {
    fs::create_dir_all(root).unwrap();
    fs::write(root.join(document), content).unwrap();
}

pub fn resolver(root: &Path) -> RuleResolver<DirectoryStore> {
    RuleResolver::new(
        Catalog::default(),
        DirectoryStore::new(root),
        Arc::new(NullDiagnostics),
    )
}

pub fn tools(root: &Path) -> RuleTools<DirectoryStore> {
    RuleTools::new(resolver(root), Arc::new(NullDiagnostics))
}

pub fn tools_with(root: &Path, diagnostics: Arc<dyn Diagnostics>) -> RuleTools<DirectoryStore> {
    let resolver = RuleResolver::new(Catalog::default(), DirectoryStore::new(root), diagnostics.clone());
    RuleTools::new(resolver, diagnostics)
}
