//! Notion REST API client.
//!
//! Blocking HTTP client for the public Notion API with bearer token
//! authentication.

mod blocks;
mod databases;
mod pages;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use ureq::typestate::WithBody;
use ureq::{Agent, RequestBuilder};

use crate::api::NotionApi;
use crate::error::NotionError;
use crate::types::{BlockList, Page, QueryResponse};

/// Notion REST API client.
pub struct NotionClient {
    agent: Agent,
    base_url: String,
    api_key: String,
    version: String,
}

impl NotionClient {
    /// Create client from config values.
    ///
    /// # Arguments
    /// * `base_url` - API base URL (`https://api.notion.com`)
    /// * `api_key` - Integration token
    /// * `version` - Value of the `Notion-Version` header
    /// * `timeout` - Global request timeout
    pub fn new(base_url: &str, api_key: &str, version: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            version: version.to_owned(),
        }
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/v1", self.base_url)
    }

    /// Add authentication and version headers.
    fn authorize<B>(&self, request: RequestBuilder<B>) -> RequestBuilder<B> {
        request
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Notion-Version", &self.version)
            .header("Accept", "application/json")
    }

    /// Send a JSON payload and decode the JSON response.
    fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder<WithBody>,
        payload: &Value,
    ) -> Result<T, NotionError> {
        let payload_bytes = serde_json::to_vec(payload)?;
        let response = self
            .authorize(request)
            .header("Content-Type", "application/json")
            .send(&payload_bytes[..])?;
        read_json(response)
    }
}

impl NotionApi for NotionClient {
    fn query_database(&self, database_id: &str, filter: &Value) -> Result<QueryResponse, NotionError> {
        self.query(database_id, filter)
    }

    fn create_page(&self, database_id: &str, properties: &Value) -> Result<Page, NotionError> {
        self.post_page(database_id, properties)
    }

    fn update_page_properties(&self, page_id: &str, properties: &Value) -> Result<Page, NotionError> {
        self.patch_page(page_id, properties)
    }

    fn list_block_children(&self, block_id: &str, page_size: usize) -> Result<BlockList, NotionError> {
        self.get_children(block_id, page_size)
    }

    fn delete_block(&self, block_id: &str) -> Result<(), NotionError> {
        self.delete(block_id)
    }

    fn append_block_children(&self, block_id: &str, children: &[Value]) -> Result<(), NotionError> {
        self.patch_children(block_id, children)
    }
}

/// Decode a JSON response, mapping error statuses to [`NotionError::HttpResponse`].
fn read_json<T: DeserializeOwned>(
    response: ureq::http::Response<ureq::Body>,
) -> Result<T, NotionError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(NotionError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body_reader.read_json()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let client = NotionClient::new(
            "https://api.notion.com/",
            "secret",
            "2022-06-28",
            Duration::from_secs(5),
        );
        assert_eq!(client.api_url(), "https://api.notion.com/v1");
    }
}
