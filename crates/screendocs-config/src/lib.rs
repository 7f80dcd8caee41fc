//! Configuration management for screendocs.
//!
//! Two inputs are handled here:
//!
//! - the screen mapping ([`Mapping`]), the source of truth for which
//!   endpoints belong to which screen;
//! - optional tool settings from `screendocs.toml`, auto-discovered in the
//!   current directory and its parents.
//!
//! ## Environment Variable Expansion
//!
//! Notion settings support `${VAR}` and `${VAR:-default}` expansion. By default
//! the credentials come from `NOTION_API_KEY` and `NOTION_DATABASE_ID`.
//! Expansion is deferred to [`Config::require_notion`] so that commands which
//! never contact Notion work without credentials.

mod expand;
pub mod mapping;

pub use mapping::{EndpointDecl, EndpointStatus, Mapping, MappingError, ScreenConfig};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "screendocs.toml";

/// Default OpenAPI documents, relative to the project directory.
const DEFAULT_SPEC_FILES: [&str; 3] = [
    "api/openapi.yaml",
    "in-game/openapi.yaml",
    "steam/openapi.yaml",
];

/// Callout text placed at the top of every page unless overridden.
const DEFAULT_CALLOUT: &str = "Auto-synced from mentoroid-docs GitHub repository. \
                               Edit screen-api-mapping.json to update endpoint mappings.";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override mapping file path.
    pub mapping_path: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mapping file location (relative string from TOML).
    mapping: MappingConfigRaw,
    /// OpenAPI documents to load.
    pub specs: SpecsConfig,
    /// Notion connection settings (unexpanded).
    pub notion: NotionConfig,
    /// Defaults for pages created in the database.
    pub page: PageConfig,

    /// Resolved absolute mapping path (set after loading).
    #[serde(skip)]
    pub mapping_path: PathBuf,
    /// Directory spec identifiers are resolved against (set after loading).
    #[serde(skip)]
    pub project_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw mapping configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct MappingConfigRaw {
    path: Option<String>,
}

/// OpenAPI documents to load.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SpecsConfig {
    /// Spec identifiers, also used as paths relative to the project directory.
    pub files: Vec<String>,
}

impl Default for SpecsConfig {
    fn default() -> Self {
        Self {
            files: DEFAULT_SPEC_FILES.iter().map(|&f| f.to_owned()).collect(),
        }
    }
}

/// Notion connection settings, before environment expansion.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    /// Integration token.
    pub api_key: String,
    /// Target database ID.
    pub database_id: String,
    /// API base URL.
    pub base_url: String,
    /// Value of the `Notion-Version` header.
    pub version: String,
    /// HTTP timeout in seconds.
    pub timeout: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_key: "${NOTION_API_KEY}".to_owned(),
            database_id: "${NOTION_DATABASE_ID}".to_owned(),
            base_url: "https://api.notion.com".to_owned(),
            version: "2022-06-28".to_owned(),
            timeout: 30,
        }
    }
}

/// Expanded and validated Notion settings.
#[derive(Debug, Clone)]
pub struct NotionCredentials {
    /// Integration token.
    pub api_key: String,
    /// Target database ID.
    pub database_id: String,
    /// API base URL.
    pub base_url: String,
    /// Value of the `Notion-Version` header.
    pub version: String,
    /// HTTP timeout in seconds.
    pub timeout: u64,
}

/// Defaults for documentation pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Substring identifying the API page among pages sharing a screen tag.
    pub title_marker: String,
    /// Appended to the screen name to form a new page's title.
    pub title_suffix: String,
    /// `Status` select value for new pages.
    pub status: String,
    /// `API Endpoint` URL for new pages.
    pub docs_url: String,
    /// Text of the callout placed at the top of every page.
    pub callout: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title_marker: "API".to_owned(),
            title_suffix: " - API Specification".to_owned(),
            status: "Approved".to_owned(),
            docs_url: "https://docs.mentoroid.ai".to_owned(),
            callout: DEFAULT_CALLOUT.to_owned(),
        }
    }
}

impl PageConfig {
    /// Title for a newly created page.
    pub fn title_for(&self, screen: &str) -> String {
        format!("{screen}{}", self.title_suffix)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("{message} (required by {field})")]
    EnvVar {
        /// Config field path (e.g., "`notion.api_key`").
        field: String,
        /// Error message (e.g., "`NOTION_API_KEY` is not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `screendocs.toml` in current directory and parents,
    /// falling back to defaults rooted at the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(mapping_path) = &settings.mapping_path {
            self.mapping_path.clone_from(mapping_path);
        }
    }

    /// Expand and validate the Notion settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvVar` if a referenced variable (by default
    /// `NOTION_API_KEY` or `NOTION_DATABASE_ID`) is unset, or
    /// `ConfigError::Validation` if a value is invalid.
    pub fn require_notion(&self) -> Result<NotionCredentials, ConfigError> {
        let notion = &self.notion;
        let credentials = NotionCredentials {
            api_key: expand::expand_env(&notion.api_key, "notion.api_key")?,
            database_id: expand::expand_env(&notion.database_id, "notion.database_id")?,
            base_url: expand::expand_env(&notion.base_url, "notion.base_url")?,
            version: expand::expand_env(&notion.version, "notion.version")?,
            timeout: notion.timeout,
        };

        require_non_empty(&credentials.api_key, "notion.api_key")?;
        require_non_empty(&credentials.database_id, "notion.database_id")?;
        require_http_url(&credentials.base_url, "notion.base_url")?;
        require_non_empty(&credentials.version, "notion.version")?;
        if credentials.timeout == 0 {
            return Err(ConfigError::Validation(
                "notion.timeout must be greater than 0".to_owned(),
            ));
        }

        Ok(credentials)
    }

    /// Absolute path of a spec identifier.
    pub fn spec_path(&self, file: &str) -> PathBuf {
        self.project_dir.join(file)
    }

    /// File name of the mapping, as shown in the page footer.
    pub fn mapping_file_name(&self) -> String {
        self.mapping_path
            .file_name()
            .map_or_else(
                || mapping::MAPPING_FILENAME.to_owned(),
                |name| name.to_string_lossy().into_owned(),
            )
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            mapping: MappingConfigRaw::default(),
            specs: SpecsConfig::default(),
            notion: NotionConfig::default(),
            page: PageConfig::default(),
            mapping_path: base.join(mapping::MAPPING_FILENAME),
            project_dir: base.to_path_buf(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values that do not depend on the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for file in &self.specs.files {
            require_non_empty(file, "specs.files")?;
        }
        require_non_empty(&self.page.title_marker, "page.title_marker")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.project_dir = config_dir.to_path_buf();
        self.mapping_path = config_dir.join(
            self.mapping
                .path
                .as_deref()
                .unwrap_or(mapping::MAPPING_FILENAME),
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/repo"));
        assert_eq!(
            config.mapping_path,
            PathBuf::from("/repo/screen-api-mapping.json")
        );
        assert_eq!(config.project_dir, PathBuf::from("/repo"));
        assert_eq!(
            config.specs.files,
            vec![
                "api/openapi.yaml".to_owned(),
                "in-game/openapi.yaml".to_owned(),
                "steam/openapi.yaml".to_owned(),
            ]
        );
        assert_eq!(config.notion.api_key, "${NOTION_API_KEY}");
        assert_eq!(config.notion.database_id, "${NOTION_DATABASE_ID}");
        assert_eq!(config.page.title_marker, "API");
        assert_eq!(config.page.status, "Approved");
        assert_eq!(
            config.page.callout,
            "Auto-synced from mentoroid-docs GitHub repository. \
             Edit screen-api-mapping.json to update endpoint mappings."
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.notion.base_url, "https://api.notion.com");
        assert_eq!(config.notion.version, "2022-06-28");
        assert_eq!(config.notion.timeout, 30);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[mapping]
path = "docs/mapping.json"

[specs]
files = ["backend/openapi.yaml"]

[notion]
api_key = "secret_123"
database_id = "db-1"
timeout = 10

[page]
title_marker = "Endpoints"
status = "Draft"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.mapping_path,
            PathBuf::from("/project/docs/mapping.json")
        );
        assert_eq!(config.specs.files, vec!["backend/openapi.yaml".to_owned()]);
        assert_eq!(
            config.spec_path("backend/openapi.yaml"),
            PathBuf::from("/project/backend/openapi.yaml")
        );
        assert_eq!(config.notion.timeout, 10);
        assert_eq!(config.page.title_marker, "Endpoints");
        assert_eq!(config.page.status, "Draft");
        assert_eq!(config.page.title_suffix, " - API Specification");
        assert_eq!(config.mapping_file_name(), "mapping.json");
    }

    #[test]
    fn test_require_notion_literal_values() {
        let mut config = Config::default_with_base(Path::new("/repo"));
        config.notion.api_key = "secret_abc".to_owned();
        config.notion.database_id = "db-123".to_owned();

        let credentials = config.require_notion().unwrap();
        assert_eq!(credentials.api_key, "secret_abc");
        assert_eq!(credentials.database_id, "db-123");
        assert_eq!(credentials.base_url, "https://api.notion.com");
    }

    #[test]
    fn test_require_notion_missing_variable() {
        let mut config = Config::default_with_base(Path::new("/repo"));
        config.notion.api_key = "${SCREENDOCS_TEST_NO_SUCH_KEY}".to_owned();
        config.notion.database_id = "db-123".to_owned();

        let err = config.require_notion().unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("SCREENDOCS_TEST_NO_SUCH_KEY is not set"));
    }

    #[test]
    fn test_require_notion_rejects_bad_url() {
        let mut config = Config::default_with_base(Path::new("/repo"));
        config.notion.api_key = "secret_abc".to_owned();
        config.notion.database_id = "db-123".to_owned();
        config.notion.base_url = "api.notion.com".to_owned();

        let err = config.require_notion().unwrap_err();
        assert!(err.to_string().contains("notion.base_url"));
    }

    #[test]
    fn test_require_notion_rejects_zero_timeout() {
        let mut config = Config::default_with_base(Path::new("/repo"));
        config.notion.api_key = "secret_abc".to_owned();
        config.notion.database_id = "db-123".to_owned();
        config.notion.timeout = 0;

        assert!(matches!(
            config.require_notion(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_apply_cli_mapping_path() {
        let mut config = Config::default_with_base(Path::new("/repo"));
        config.apply_cli_settings(&CliSettings {
            mapping_path: Some(PathBuf::from("/elsewhere/screens.json")),
        });
        assert_eq!(
            config.mapping_path,
            PathBuf::from("/elsewhere/screens.json")
        );
        assert_eq!(config.mapping_file_name(), "screens.json");
    }

    #[test]
    fn test_page_title_for() {
        let page = PageConfig::default();
        assert_eq!(page.title_for("Login"), "Login - API Specification");
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/screendocs.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[mapping]\npath = \"screens.json\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.mapping_path, dir.path().join("screens.json"));
        assert_eq!(config.project_dir, dir.path());
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_rejects_empty_spec_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[specs]\nfiles = [\"\"]\n").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
