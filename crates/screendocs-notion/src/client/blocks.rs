//! Block operations for Notion API.

use serde_json::{Value, json};
use tracing::{debug, info};

use super::{NotionClient, read_json};
use crate::error::NotionError;
use crate::types::BlockList;

impl NotionClient {
    /// List children of a block (first page only).
    pub(crate) fn get_children(&self, block_id: &str, page_size: usize) -> Result<BlockList, NotionError> {
        let url = format!(
            "{}/blocks/{}/children?page_size={}",
            self.api_url(),
            block_id,
            page_size
        );

        info!("Listing children of block {}", block_id);

        let response = self.authorize(self.agent.get(&url)).call()?;
        let children: BlockList = read_json(response)?;
        debug!("Block {} has {} children", block_id, children.results.len());
        Ok(children)
    }

    /// Delete a single block.
    pub(crate) fn delete(&self, block_id: &str) -> Result<(), NotionError> {
        let url = format!("{}/blocks/{}", self.api_url(), block_id);

        debug!("Deleting block {}", block_id);

        let response = self.authorize(self.agent.delete(&url)).call()?;
        let _: Value = read_json(response)?;
        Ok(())
    }

    /// Append children to a block.
    pub(crate) fn patch_children(&self, block_id: &str, children: &[Value]) -> Result<(), NotionError> {
        let url = format!("{}/blocks/{}/children", self.api_url(), block_id);

        info!("Appending {} blocks to {}", children.len(), block_id);

        let payload = json!({ "children": children });
        let _: Value = self.send_json(self.agent.patch(&url), &payload)?;
        Ok(())
    }
}
