//! CLI command implementations.

mod render;
mod sync;

use std::path::PathBuf;

use clap::Args;
use screendocs_config::{CliSettings, Config, Mapping};
use screendocs_openapi::SpecCollection;
use tracing::debug;

use crate::error::CliError;

pub(crate) use render::RenderArgs;
pub(crate) use sync::SyncArgs;

/// Options locating the mapping and settings, shared by all commands.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover screendocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the screen mapping file (overrides config).
    #[arg(short, long)]
    mapping: Option<PathBuf>,
}

impl SourceArgs {
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            mapping_path: self.mapping.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Read the mapping and every spec file that exists.
fn load_inputs(config: &Config) -> Result<(Mapping, SpecCollection), CliError> {
    debug!(path = %config.mapping_path.display(), "Loading mapping");
    let mapping = Mapping::load(&config.mapping_path)?;
    let specs = SpecCollection::load(&config.project_dir, &config.specs.files)?;
    Ok((mapping, specs))
}
