//! Notion JSON shapes for blocks, properties and filters.

use chrono::NaiveDate;
use screendocs_config::PageConfig;
use screendocs_renderer::Block;
use serde_json::{Value, json};

/// Title property holding the page name.
pub const NAME_PROPERTY: &str = "Name";
/// Select property tagging a page with its screen.
pub const SCREEN_PROPERTY: &str = "Screen";
/// Select property with the review status.
pub const STATUS_PROPERTY: &str = "Status";
/// URL property pointing at the external API docs.
pub const DOCS_URL_PROPERTY: &str = "API Endpoint";
/// Date property stamped after each sync.
pub const LAST_SYNCED_PROPERTY: &str = "Last Synced";

const CALLOUT_EMOJI: &str = "🔄";
const CALLOUT_COLOR: &str = "blue_background";

/// Convert a block to a Notion block object.
pub fn block_to_json(block: &Block) -> Value {
    match block {
        Block::Callout(text) => json!({
            "object": "block",
            "type": "callout",
            "callout": {
                "rich_text": [rich_text(text)],
                "icon": { "emoji": CALLOUT_EMOJI },
                "color": CALLOUT_COLOR,
            },
        }),
        Block::Heading1(text) => text_block("heading_1", rich_text(text)),
        Block::Heading2(text) => text_block("heading_2", rich_text(text)),
        Block::Heading3(text) => text_block("heading_3", rich_text(text)),
        Block::BulletedListItem(text) => text_block("bulleted_list_item", rich_text(text)),
        Block::Divider => json!({
            "object": "block",
            "type": "divider",
            "divider": {},
        }),
        Block::Italic(text) => {
            let mut fragment = rich_text(text);
            fragment["annotations"] = json!({ "italic": true });
            text_block("paragraph", fragment)
        }
        Block::Paragraph(text) => text_block("paragraph", rich_text(text)),
    }
}

fn text_block(kind: &str, fragment: Value) -> Value {
    json!({
        "object": "block",
        "type": kind,
        kind: { "rich_text": [fragment] },
    })
}

fn rich_text(content: &str) -> Value {
    json!({ "type": "text", "text": { "content": content } })
}

/// Filter matching pages tagged with a screen.
pub fn screen_filter(screen: &str) -> Value {
    json!({
        "property": SCREEN_PROPERTY,
        "select": { "equals": screen },
    })
}

/// Properties of a newly created documentation page.
pub fn new_page_properties(screen: &str, title: &str, page: &PageConfig) -> Value {
    json!({
        NAME_PROPERTY: { "title": [{ "text": { "content": title } }] },
        SCREEN_PROPERTY: { "select": { "name": screen } },
        STATUS_PROPERTY: { "select": { "name": page.status } },
        DOCS_URL_PROPERTY: { "url": page.docs_url },
    })
}

/// Properties stamping the sync date.
pub fn last_synced_properties(date: NaiveDate) -> Value {
    json!({
        LAST_SYNCED_PROPERTY: { "date": { "start": date.format("%Y-%m-%d").to_string() } },
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_heading_block() {
        assert_eq!(
            block_to_json(&Block::Heading2("POST `/login`".to_owned())),
            json!({
                "object": "block",
                "type": "heading_2",
                "heading_2": {
                    "rich_text": [{ "type": "text", "text": { "content": "POST `/login`" } }]
                }
            })
        );
    }

    #[test]
    fn test_italic_block() {
        assert_eq!(
            block_to_json(&Block::Italic("Endpoint not found in spec".to_owned())),
            json!({
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [{
                        "type": "text",
                        "text": { "content": "Endpoint not found in spec" },
                        "annotations": { "italic": true }
                    }]
                }
            })
        );
    }

    #[test]
    fn test_callout_and_divider() {
        let callout = block_to_json(&Block::Callout("Auto-synced".to_owned()));
        assert_eq!(callout["type"], "callout");
        assert_eq!(callout["callout"]["icon"]["emoji"], "🔄");
        assert_eq!(callout["callout"]["color"], "blue_background");
        assert_eq!(
            callout["callout"]["rich_text"][0]["text"]["content"],
            "Auto-synced"
        );

        assert_eq!(
            block_to_json(&Block::Divider),
            json!({ "object": "block", "type": "divider", "divider": {} })
        );
    }

    #[test]
    fn test_bullet_block_type() {
        let bullet = block_to_json(&Block::BulletedListItem("**200**: OK".to_owned()));
        assert_eq!(bullet["type"], "bulleted_list_item");
        assert_eq!(
            bullet["bulleted_list_item"]["rich_text"][0]["text"]["content"],
            "**200**: OK"
        );
    }

    #[test]
    fn test_new_page_properties() {
        let props = new_page_properties("Login", "Login - API Specification", &PageConfig::default());
        assert_eq!(
            props,
            json!({
                "Name": { "title": [{ "text": { "content": "Login - API Specification" } }] },
                "Screen": { "select": { "name": "Login" } },
                "Status": { "select": { "name": "Approved" } },
                "API Endpoint": { "url": "https://docs.mentoroid.ai" }
            })
        );
    }

    #[test]
    fn test_last_synced_properties() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(
            last_synced_properties(date),
            json!({ "Last Synced": { "date": { "start": "2026-10-16" } } })
        );
    }

    #[test]
    fn test_screen_filter() {
        assert_eq!(
            screen_filter("Login"),
            json!({ "property": "Screen", "select": { "equals": "Login" } })
        );
    }
}
