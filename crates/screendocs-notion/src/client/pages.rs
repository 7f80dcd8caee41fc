//! Page operations for Notion API.

use serde_json::{Value, json};
use tracing::info;

use super::NotionClient;
use crate::error::NotionError;
use crate::types::Page;

impl NotionClient {
    /// Create a page as a row of a database.
    pub(crate) fn post_page(&self, database_id: &str, properties: &Value) -> Result<Page, NotionError> {
        let url = format!("{}/pages", self.api_url());

        let payload = json!({
            "parent": { "database_id": database_id },
            "properties": properties,
        });

        info!("Creating page in database {}", database_id);

        let page: Page = self.send_json(self.agent.post(&url), &payload)?;
        info!("Created page {}", page.id);
        Ok(page)
    }

    /// Update properties of an existing page.
    pub(crate) fn patch_page(&self, page_id: &str, properties: &Value) -> Result<Page, NotionError> {
        let url = format!("{}/pages/{}", self.api_url(), page_id);

        info!("Updating properties of page {}", page_id);

        let payload = json!({ "properties": properties });
        self.send_json(self.agent.patch(&url), &payload)
    }
}
