//! Screen documentation sync.
//!
//! [`PageSyncer`] runs the whole workflow for each screen of a mapping:
//!
//! 1. Find the screen's documentation page, or create it
//! 2. Render the screen's document and translate it into blocks
//! 3. Delete the page's existing blocks (best effort)
//! 4. Append the new blocks in batches
//! 5. Stamp the `Last Synced` date
//!
//! Screens are synced strictly in mapping order. The first failing remote
//! call aborts the run.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use std::time::Duration;
//! use screendocs_config::{Mapping, PageConfig};
//! use screendocs_notion::{NotionClient, PageSyncer, SyncConfig};
//! use screendocs_openapi::SpecCollection;
//!
//! let client = NotionClient::new(
//!     "https://api.notion.com",
//!     "secret_token",
//!     "2022-06-28",
//!     Duration::from_secs(30),
//! );
//! let syncer = PageSyncer::new(&client, "database-id", SyncConfig::new(PageConfig::default()));
//!
//! let mapping = Mapping::load(Path::new("screen-api-mapping.json"))?;
//! let specs = SpecCollection::default();
//! let reports = syncer.sync_all(&mapping, &specs, |_| {})?;
//! # Ok(())
//! # }
//! ```

mod executor;
mod plan;
mod result;

pub use executor::PageSyncer;
pub use plan::{ScreenPlan, batch_count};
pub use result::{ClearReport, ContentReport, ScreenReport, SyncEvent};

use chrono::{DateTime, Utc};
use screendocs_config::PageConfig;
use screendocs_config::mapping::MAPPING_FILENAME;

/// Blocks appended per request.
pub const APPEND_BATCH_SIZE: usize = 100;

/// Children listed per request when clearing a page.
pub const LIST_PAGE_SIZE: usize = 100;

/// Settings shared by every screen in a run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Page defaults (title marker, new page properties, callout).
    pub page: PageConfig,
    /// Mapping file named in the document footer.
    pub source_name: String,
    /// Time of the run; the footer timestamp and `Last Synced` date.
    pub synced_at: DateTime<Utc>,
}

impl SyncConfig {
    /// Config stamped with the current time.
    #[must_use]
    pub fn new(page: PageConfig) -> Self {
        Self {
            page,
            source_name: MAPPING_FILENAME.to_owned(),
            synced_at: Utc::now(),
        }
    }

    /// Set the mapping file name shown in the footer.
    #[must_use]
    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Set the run time.
    #[must_use]
    pub fn synced_at(mut self, at: DateTime<Utc>) -> Self {
        self.synced_at = at;
        self
    }
}
