//! Spec collection loading.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::document::OpenApiDocument;

/// Error loading an OpenAPI document.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// File exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File is not a parseable OpenAPI document.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Parsed OpenAPI documents keyed by spec identifier.
#[derive(Debug, Default)]
pub struct SpecCollection {
    specs: IndexMap<String, OpenApiDocument>,
}

impl SpecCollection {
    /// Load the given spec identifiers, resolved relative to `base_dir`.
    ///
    /// Files that do not exist are skipped; an empty collection is not an
    /// error. Endpoints pointing at a skipped spec resolve as not found.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] if an existing file cannot be read or parsed.
    pub fn load(base_dir: &Path, files: &[String]) -> Result<Self, SpecError> {
        let mut collection = Self::default();

        for file in files {
            let path = base_dir.join(file);
            if !path.exists() {
                debug!("Spec {} not found, skipping", path.display());
                continue;
            }

            let content = std::fs::read_to_string(&path).map_err(|source| SpecError::Io {
                path: path.clone(),
                source,
            })?;
            let document = OpenApiDocument::from_yaml(&content)
                .map_err(|source| SpecError::Parse { path, source })?;

            info!("Loaded spec {} ({} paths)", file, document.paths.len());
            collection.insert(file.clone(), document);
        }

        Ok(collection)
    }

    /// Add a parsed document under an identifier.
    pub fn insert(&mut self, id: impl Into<String>, document: OpenApiDocument) {
        self.specs.insert(id.into(), document);
    }

    /// Document by identifier.
    pub fn get(&self, id: &str) -> Option<&OpenApiDocument> {
        self.specs.get(id)
    }

    /// Number of loaded documents.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True if no document was loaded.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
