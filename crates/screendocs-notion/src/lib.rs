//! Notion integration for screendocs.
//!
//! This crate provides:
//! - [`NotionClient`]: blocking REST client for the Notion API
//! - [`NotionApi`]: the operations the sync workflow needs, so the client can
//!   be swapped for [`mock::MockNotion`] in tests
//! - [`PageSyncer`]: locates or creates each screen's page and replaces its
//!   content
//! - [`schema`]: mapping of rendered blocks and page properties to Notion JSON

mod api;
mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod schema;
mod sync;
mod types;

pub use api::NotionApi;
pub use client::NotionClient;
pub use error::{NotionError, SyncError};
pub use sync::{
    APPEND_BATCH_SIZE, ClearReport, ContentReport, LIST_PAGE_SIZE, PageSyncer, ScreenPlan,
    ScreenReport, SyncConfig, SyncEvent, batch_count,
};
pub use types::{BlockList, BlockRef, Page, QueryResponse};
