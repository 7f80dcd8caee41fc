//! Notion operations used by the sync workflow.

use serde_json::Value;

use crate::error::NotionError;
use crate::types::{BlockList, Page, QueryResponse};

/// Notion REST operations needed to sync documentation pages.
///
/// Implemented by [`NotionClient`](crate::NotionClient) over HTTP and, with the
/// `mock` feature, by an in-memory [`MockNotion`](crate::mock::MockNotion).
pub trait NotionApi {
    /// Query a database with a filter object. Returns the first result page.
    fn query_database(&self, database_id: &str, filter: &Value) -> Result<QueryResponse, NotionError>;

    /// Create a page in a database.
    fn create_page(&self, database_id: &str, properties: &Value) -> Result<Page, NotionError>;

    /// Update page properties.
    fn update_page_properties(&self, page_id: &str, properties: &Value) -> Result<Page, NotionError>;

    /// List the first `page_size` children of a block.
    fn list_block_children(&self, block_id: &str, page_size: usize) -> Result<BlockList, NotionError>;

    /// Delete (archive) a block.
    fn delete_block(&self, block_id: &str) -> Result<(), NotionError>;

    /// Append children to a block, in order.
    fn append_block_children(&self, block_id: &str, children: &[Value]) -> Result<(), NotionError>;
}
