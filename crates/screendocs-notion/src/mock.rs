//! Mock Notion API for testing.
//!
//! Provides [`MockNotion`] for exercising the sync workflow without network
//! access. Every call is recorded so tests can assert on the exact sequence.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use serde_json::{Value, json};

use crate::api::NotionApi;
use crate::error::NotionError;
use crate::types::{BlockList, BlockRef, Page, QueryResponse};

/// A recorded API call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// `query_database` with the filter's select value.
    Query { screen: String },
    /// `create_page` with its properties.
    CreatePage { properties: Value },
    /// `update_page_properties`.
    UpdatePage { page_id: String, properties: Value },
    /// `list_block_children`.
    ListChildren { block_id: String },
    /// `delete_block`.
    DeleteBlock { block_id: String },
    /// `append_block_children` with the batch.
    Append { block_id: String, children: Vec<Value> },
}

/// Operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Query,
    CreatePage,
    UpdatePage,
    ListChildren,
    Append,
}

#[derive(Debug, Clone)]
struct MockPage {
    id: String,
    screen: String,
    title: String,
}

/// In-memory Notion database.
///
/// # Example
///
/// ```ignore
/// use screendocs_notion::mock::MockNotion;
///
/// let notion = MockNotion::new()
///     .with_page("page-1", "Login", "Login - API Specification")
///     .with_children("page-1", 3);
/// ```
#[derive(Debug, Default)]
pub struct MockNotion {
    pages: RwLock<Vec<MockPage>>,
    children: RwLock<HashMap<String, Vec<String>>>,
    failing_deletes: RwLock<HashSet<String>>,
    failures: RwLock<HashSet<Operation>>,
    calls: RwLock<Vec<Call>>,
    next_id: RwLock<usize>,
}

impl MockNotion {
    /// Create an empty mock database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, id: &str, screen: &str, title: &str) -> Self {
        self.pages.write().unwrap().push(MockPage {
            id: id.to_owned(),
            screen: screen.to_owned(),
            title: title.to_owned(),
        });
        self
    }

    /// Give a block `count` existing children with IDs `<block_id>-child-<n>`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_children(self, block_id: &str, count: usize) -> Self {
        let ids = (0..count).map(|n| format!("{block_id}-child-{n}")).collect();
        self.children
            .write()
            .unwrap()
            .insert(block_id.to_owned(), ids);
        self
    }

    /// Make deleting a specific block fail.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failing_delete(self, block_id: &str) -> Self {
        self.failing_deletes
            .write()
            .unwrap()
            .insert(block_id.to_owned());
        self
    }

    /// Make every call of an operation fail with HTTP 500.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, operation: Operation) -> Self {
        self.failures.write().unwrap().insert(operation);
        self
    }

    /// All calls made so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.read().unwrap().clone()
    }

    /// Current child block IDs of a block.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn children_of(&self, block_id: &str) -> Vec<String> {
        self.children
            .read()
            .unwrap()
            .get(block_id)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.write().unwrap().push(call);
    }

    fn check(&self, operation: Operation) -> Result<(), NotionError> {
        if self.failures.read().unwrap().contains(&operation) {
            return Err(server_error());
        }
        Ok(())
    }

    fn allocate_id(&self, prefix: &str) -> String {
        let mut next = self.next_id.write().unwrap();
        *next += 1;
        format!("{prefix}-{next}")
    }
}

fn server_error() -> NotionError {
    NotionError::HttpResponse {
        status: 500,
        body: r#"{"object":"error","code":"internal_server_error"}"#.to_owned(),
    }
}

fn page_json(page: &MockPage) -> Page {
    Page {
        id: page.id.clone(),
        properties: json!({
            "Name": { "title": [{ "plain_text": page.title }] },
            "Screen": { "select": { "name": page.screen } },
        })
        .as_object()
        .cloned()
        .unwrap_or_default(),
    }
}

fn text_at<'a>(value: &'a Value, pointer: &str) -> &'a str {
    value.pointer(pointer).and_then(Value::as_str).unwrap_or("")
}

impl NotionApi for MockNotion {
    fn query_database(&self, _database_id: &str, filter: &Value) -> Result<QueryResponse, NotionError> {
        let screen = text_at(filter, "/select/equals").to_owned();
        self.record(Call::Query {
            screen: screen.clone(),
        });
        self.check(Operation::Query)?;

        let results = self
            .pages
            .read()
            .unwrap()
            .iter()
            .filter(|page| page.screen == screen)
            .map(page_json)
            .collect();
        Ok(QueryResponse {
            results,
            has_more: false,
        })
    }

    fn create_page(&self, _database_id: &str, properties: &Value) -> Result<Page, NotionError> {
        self.record(Call::CreatePage {
            properties: properties.clone(),
        });
        self.check(Operation::CreatePage)?;

        let page = MockPage {
            id: self.allocate_id("page"),
            screen: text_at(properties, "/Screen/select/name").to_owned(),
            title: text_at(properties, "/Name/title/0/text/content").to_owned(),
        };
        let created = page_json(&page);
        self.pages.write().unwrap().push(page);
        Ok(created)
    }

    fn update_page_properties(&self, page_id: &str, properties: &Value) -> Result<Page, NotionError> {
        self.record(Call::UpdatePage {
            page_id: page_id.to_owned(),
            properties: properties.clone(),
        });
        self.check(Operation::UpdatePage)?;

        Ok(Page {
            id: page_id.to_owned(),
            properties: properties.as_object().cloned().unwrap_or_default(),
        })
    }

    fn list_block_children(&self, block_id: &str, page_size: usize) -> Result<BlockList, NotionError> {
        self.record(Call::ListChildren {
            block_id: block_id.to_owned(),
        });
        self.check(Operation::ListChildren)?;

        let ids = self.children_of(block_id);
        Ok(BlockList {
            has_more: ids.len() > page_size,
            results: ids
                .into_iter()
                .take(page_size)
                .map(|id| BlockRef { id })
                .collect(),
        })
    }

    fn delete_block(&self, block_id: &str) -> Result<(), NotionError> {
        self.record(Call::DeleteBlock {
            block_id: block_id.to_owned(),
        });
        if self.failing_deletes.read().unwrap().contains(block_id) {
            return Err(NotionError::HttpResponse {
                status: 409,
                body: r#"{"object":"error","code":"conflict_error"}"#.to_owned(),
            });
        }

        for ids in self.children.write().unwrap().values_mut() {
            ids.retain(|id| id != block_id);
        }
        Ok(())
    }

    fn append_block_children(&self, block_id: &str, children: &[Value]) -> Result<(), NotionError> {
        self.record(Call::Append {
            block_id: block_id.to_owned(),
            children: children.to_vec(),
        });
        self.check(Operation::Append)?;

        let mut all = self.children.write().unwrap();
        let existing = all.entry(block_id.to_owned()).or_default();
        for _ in children {
            existing.push(self.allocate_id("block"));
        }
        Ok(())
    }
}
