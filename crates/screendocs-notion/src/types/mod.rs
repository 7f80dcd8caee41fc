//! Notion API response types.

mod block;
mod page;

pub use block::{BlockList, BlockRef};
pub use page::{Page, QueryResponse};
