//! Notion block types.

use serde::{Deserialize, Serialize};

/// Existing block as returned by the children listing.
///
/// Only the identity is kept; block content is never read back.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockRef {
    /// Block ID.
    pub id: String,
}

/// Block children listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockList {
    /// Child blocks (first result page only).
    pub results: Vec<BlockRef>,
    /// Whether more children are available.
    #[serde(default)]
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_block_list_keeps_ids_only() {
        let list: BlockList = serde_json::from_value(json!({
            "object": "list",
            "results": [
                { "object": "block", "id": "b1", "type": "paragraph", "paragraph": {} },
                { "object": "block", "id": "b2", "type": "divider", "divider": {} }
            ],
            "has_more": true,
            "next_cursor": "b3"
        }))
        .unwrap();
        let ids: Vec<&str> = list.results.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2"]);
        assert!(list.has_more);
    }
}
