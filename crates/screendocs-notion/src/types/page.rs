//! Notion page types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Notion page (database row).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Raw property values keyed by property name.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Page {
    /// Plain text of the first fragment of the `Name` title property.
    ///
    /// Empty if the property is missing or has no text.
    pub fn title(&self) -> &str {
        self.properties
            .get("Name")
            .and_then(|name| name.get("title"))
            .and_then(|title| title.get(0))
            .and_then(|fragment| fragment.get("plain_text"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

/// Database query response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryResponse {
    /// Matching pages (first result page only).
    pub results: Vec<Page>,
    /// Whether more results are available.
    #[serde(default)]
    pub has_more: bool,
}
