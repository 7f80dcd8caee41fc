//! CLI error types.

use screendocs_config::{ConfigError, MappingError};
use screendocs_notion::SyncError;
use screendocs_openapi::SpecError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Mapping(#[from] MappingError),

    #[error("{0}")]
    Spec(#[from] SpecError),

    #[error("{0}")]
    Sync(#[from] SyncError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),
}
