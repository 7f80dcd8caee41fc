//! Database operations for Notion API.

use serde_json::{Value, json};
use tracing::info;

use super::NotionClient;
use crate::error::NotionError;
use crate::types::QueryResponse;

impl NotionClient {
    /// Query a database, returning the first page of results.
    pub(crate) fn query(
        &self,
        database_id: &str,
        filter: &Value,
    ) -> Result<QueryResponse, NotionError> {
        let url = format!("{}/databases/{}/query", self.api_url(), database_id);

        info!("Querying database {}", database_id);

        let payload = json!({ "filter": filter });
        let response: QueryResponse = self.send_json(self.agent.post(&url), &payload)?;
        info!(
            "Database {} returned {} pages",
            database_id,
            response.results.len()
        );
        Ok(response)
    }
}
