use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Failures reading a document from a [`RuleStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Rule document not found: {0}")]
    NotFound(String),
    #[error("Permission denied reading rule document: {0}")]
    PermissionDenied(String),
    #[error("Invalid rule document identifier: {0}")]
    InvalidIdentifier(String),
    #[error("Rule document is empty: {0}")]
    Empty(String),
    #[error("Cannot read rule document {document}: {source}")]
    Io {
        document: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only document backend keyed by plain relative filename.
pub trait RuleStore: Send + Sync {
    /// Read the full text of `document`.
    fn read(&self, document: &str) -> impl Future<Output = Result<String, StoreError>> + Send;
}

/// Store backed by a flat directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Join a document identifier onto the root, rejecting anything that
    /// is not a plain relative filename.
    fn document_path(&self, document: &str) -> Result<PathBuf, StoreError> {
        if document.is_empty()
            || document.contains("..")
            || document.starts_with('/')
            || document.starts_with('\\')
            || Path::new(document).is_absolute()
        {
            return Err(StoreError::InvalidIdentifier(document.to_string()));
        }
        Ok(self.root.join(document))
    }
}

impl RuleStore for DirectoryStore {
    async fn read(&self, document: &str) -> Result<String, StoreError> {
        let path = self.document_path(document)?;

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(document.to_string()),
            ErrorKind::PermissionDenied => StoreError::PermissionDenied(document.to_string()),
            _ => StoreError::Io {
                document: document.to_string(),
                source: e,
            },
        })?;

        if content.is_empty() {
            return Err(StoreError::Empty(document.to_string()));
        }
        Ok(content)
    }
}
