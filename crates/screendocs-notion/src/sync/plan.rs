//! Rendering a screen into the blocks that will be written.

use screendocs_config::ScreenConfig;
use screendocs_openapi::SpecCollection;
use screendocs_renderer::{Block, DocumentRenderer, markdown_to_blocks};

use super::{APPEND_BATCH_SIZE, SyncConfig};

/// Rendered content for one screen, before any remote call.
#[derive(Debug, Clone)]
pub struct ScreenPlan {
    /// Rendered markdown document.
    pub markdown: String,
    /// Blocks translated from the document, callout first.
    pub blocks: Vec<Block>,
}

impl ScreenPlan {
    /// Render a screen's document and translate it into blocks.
    pub fn build(
        config: &SyncConfig,
        screen_name: &str,
        screen: &ScreenConfig,
        specs: &SpecCollection,
    ) -> Self {
        let markdown = DocumentRenderer::new()
            .source_name(config.source_name.clone())
            .synced_at(config.synced_at)
            .render(screen_name, screen, specs);
        let blocks = markdown_to_blocks(&markdown, &config.page.callout);
        Self { markdown, blocks }
    }

    /// Number of append requests needed for the blocks.
    pub fn batches(&self) -> usize {
        batch_count(self.blocks.len())
    }
}

/// Number of append requests needed for `blocks` blocks.
pub fn batch_count(blocks: usize) -> usize {
    blocks.div_ceil(APPEND_BATCH_SIZE)
}
