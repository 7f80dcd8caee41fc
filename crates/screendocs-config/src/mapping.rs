//! Screen-to-endpoint mapping.
//!
//! The mapping file (`screen-api-mapping.json`) lists every documented screen
//! with the backend endpoints it calls:
//!
//! ```json
//! {
//!   "screens": {
//!     "Login": {
//!       "description": "Sign-in screen",
//!       "endpoints": [
//!         { "source": "api/openapi.yaml", "path": "/login", "method": "POST" }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Screens and endpoints keep the order in which they appear in the file.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

/// Default mapping filename.
pub const MAPPING_FILENAME: &str = "screen-api-mapping.json";

/// Parsed screen mapping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Mapping {
    /// Screens keyed by unique screen name, in file order.
    #[serde(default)]
    pub screens: IndexMap<String, ScreenConfig>,
}

/// A single screen and the endpoints it uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenConfig {
    /// Free-text description rendered under the page heading.
    #[serde(default)]
    pub description: String,
    /// Endpoint declarations in display order.
    #[serde(default)]
    pub endpoints: Vec<EndpointDecl>,
}

/// Endpoint declaration within a screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndpointDecl {
    /// Spec identifier, e.g. `api/openapi.yaml`.
    pub source: String,
    /// HTTP path as written in the spec, e.g. `/users/{id}`.
    pub path: String,
    /// HTTP method in any case.
    pub method: String,
    /// Deployment status.
    #[serde(default)]
    pub status: EndpointStatus,
}

impl EndpointDecl {
    /// Whether the endpoint is declared but not deployed yet.
    pub fn is_planned(&self) -> bool {
        self.status == EndpointStatus::Planned
    }
}

/// Deployment status of an endpoint.
///
/// Anything other than `"planned"` (including `"active"`) is treated as deployed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
    /// Declared but not yet available in any spec.
    Planned,
    /// Deployed; details are looked up in the spec.
    #[default]
    #[serde(other)]
    Deployed,
}

/// Mapping loading error.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// Mapping file does not exist.
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),
    /// I/O error while reading the file.
    #[error("I/O error reading mapping: {0}")]
    Io(#[from] std::io::Error),
    /// File is not valid mapping JSON.
    #[error("invalid mapping JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Mapping {
    /// Load the mapping from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NotFound`] if the file is missing, or a parse
    /// error if it is not valid mapping JSON.
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        if !path.exists() {
            return Err(MappingError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mapping = Self::from_json(&content)?;
        info!(
            "Loaded {} screens from {}",
            mapping.screens.len(),
            path.display()
        );
        Ok(mapping)
    }

    /// Parse mapping JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Parse`] on malformed JSON.
    pub fn from_json(content: &str) -> Result<Self, MappingError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Look up a screen by name.
    pub fn screen(&self, name: &str) -> Option<&ScreenConfig> {
        self.screens.get(name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"{
        "screens": {
            "Settings": {
                "description": "User settings",
                "endpoints": [
                    { "source": "api/openapi.yaml", "path": "/me", "method": "GET" },
                    { "source": "api/openapi.yaml", "path": "/me", "method": "patch", "status": "planned" }
                ]
            },
            "Login": {
                "description": "Sign in",
                "endpoints": [
                    { "source": "api/openapi.yaml", "path": "/login", "method": "POST", "status": "active" }
                ]
            },
            "Empty": {}
        }
    }"#;

    #[test]
    fn test_screens_keep_file_order() {
        let mapping = Mapping::from_json(SAMPLE).unwrap();
        let names: Vec<_> = mapping.screens.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Settings", "Login", "Empty"]);
    }

    #[test]
    fn test_endpoint_status() {
        let mapping = Mapping::from_json(SAMPLE).unwrap();
        let settings = mapping.screen("Settings").unwrap();
        assert_eq!(settings.endpoints[0].status, EndpointStatus::Deployed);
        assert!(settings.endpoints[1].is_planned());

        let login = mapping.screen("Login").unwrap();
        assert_eq!(login.endpoints[0].status, EndpointStatus::Deployed);
        assert_eq!(login.endpoints[0].method, "POST");
    }

    #[test]
    fn test_missing_fields_default() {
        let mapping = Mapping::from_json(SAMPLE).unwrap();
        let empty = mapping.screen("Empty").unwrap();
        assert_eq!(empty.description, "");
        assert!(empty.endpoints.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MAPPING_FILENAME);
        let err = Mapping::load(&path).unwrap_err();
        assert!(matches!(err, MappingError::NotFound(_)));
        assert!(err.to_string().contains("screen-api-mapping.json not found"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MAPPING_FILENAME);
        std::fs::write(&path, SAMPLE).unwrap();

        let mapping = Mapping::load(&path).unwrap();
        assert_eq!(mapping.screens.len(), 3);
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MAPPING_FILENAME);
        std::fs::write(&path, "{ \"screens\": [").unwrap();

        let err = Mapping::load(&path).unwrap_err();
        assert!(matches!(err, MappingError::Parse(_)));
    }
}
