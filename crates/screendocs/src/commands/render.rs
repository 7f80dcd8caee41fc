//! `screendocs render` command implementation.

use clap::Args;
use console::Term;
use screendocs_renderer::DocumentRenderer;

use super::{SourceArgs, load_inputs};
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Screen name as written in the mapping.
    screen: String,

    #[command(flatten)]
    source: SourceArgs,
}

impl RenderArgs {
    /// Print the screen's document to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if inputs cannot be read or the screen is not mapped.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.source.load_config()?;
        let (mapping, specs) = load_inputs(&config)?;

        let screen = mapping.screen(&self.screen).ok_or_else(|| {
            CliError::Validation(format!(
                "screen '{}' not found in {}",
                self.screen,
                config.mapping_path.display()
            ))
        })?;

        let markdown = DocumentRenderer::new()
            .source_name(config.mapping_file_name())
            .render(&self.screen, screen, &specs);
        Term::stdout().write_str(&markdown)?;
        Ok(())
    }
}
