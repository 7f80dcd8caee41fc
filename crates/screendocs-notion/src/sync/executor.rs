//! Page syncer implementation.

use screendocs_config::{Mapping, ScreenConfig};
use screendocs_openapi::SpecCollection;
use screendocs_renderer::Block;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::NotionApi;
use crate::error::{NotionError, SyncError};
use crate::schema;

use super::plan::ScreenPlan;
use super::result::{ClearReport, ContentReport, ScreenReport, SyncEvent};
use super::{APPEND_BATCH_SIZE, LIST_PAGE_SIZE, SyncConfig};

/// Syncs screen documentation into a Notion database.
pub struct PageSyncer<'a, A: NotionApi + ?Sized> {
    api: &'a A,
    database_id: String,
    config: SyncConfig,
}

impl<'a, A: NotionApi + ?Sized> PageSyncer<'a, A> {
    /// Create a new page syncer for a database.
    #[must_use]
    pub fn new(api: &'a A, database_id: &str, config: SyncConfig) -> Self {
        Self {
            api,
            database_id: database_id.to_owned(),
            config,
        }
    }

    /// Find the documentation page of a screen.
    ///
    /// Among pages tagged with the screen, returns the first whose title
    /// contains the title marker. Only the first page of query results is
    /// considered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_page_by_screen(&self, screen: &str) -> Result<Option<String>, NotionError> {
        info!(screen, "Querying documentation page");

        let response = self
            .api
            .query_database(&self.database_id, &schema::screen_filter(screen))?;
        if response.has_more {
            warn!(
                screen,
                "Query returned more than one page of results; only the first was searched"
            );
        }

        let marker = &self.config.page.title_marker;
        let page = response
            .results
            .into_iter()
            .find(|page| page.title().contains(marker.as_str()));
        Ok(page.map(|page| page.id))
    }

    /// Create the documentation page of a screen and return its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if page creation fails.
    pub fn create_page(&self, screen: &str) -> Result<String, NotionError> {
        let title = self.config.page.title_for(screen);
        info!(screen, title = %title, "Creating documentation page");

        let properties = schema::new_page_properties(screen, &title, &self.config.page);
        let page = self.api.create_page(&self.database_id, &properties)?;
        Ok(page.id)
    }

    /// Delete the existing blocks of a page.
    ///
    /// Individual deletion failures are logged and counted rather than
    /// propagated. Only the first [`LIST_PAGE_SIZE`] blocks are listed.
    ///
    /// # Errors
    ///
    /// Returns an error if listing the blocks fails.
    pub fn clear_page_content(&self, page_id: &str) -> Result<ClearReport, NotionError> {
        let children = self.api.list_block_children(page_id, LIST_PAGE_SIZE)?;
        if children.has_more {
            warn!(
                page_id,
                "Page has more than {LIST_PAGE_SIZE} blocks; older blocks remain"
            );
        }

        let mut report = ClearReport::default();
        for block in &children.results {
            match self.api.delete_block(&block.id) {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    warn!(block_id = %block.id, error = %e, "Failed to delete block");
                    report.failed += 1;
                }
            }
        }

        debug!(
            page_id,
            deleted = report.deleted,
            failed = report.failed,
            "Cleared page content"
        );
        Ok(report)
    }

    /// Replace a page's content with the given blocks.
    ///
    /// Blocks are appended in order, at most [`APPEND_BATCH_SIZE`] per request.
    ///
    /// # Errors
    ///
    /// Returns an error if listing old blocks or appending new ones fails.
    pub fn update_page_content(
        &self,
        page_id: &str,
        blocks: &[Block],
    ) -> Result<ContentReport, NotionError> {
        let cleared = self.clear_page_content(page_id)?;

        let children: Vec<Value> = blocks.iter().map(schema::block_to_json).collect();
        let mut batches = 0;
        for batch in children.chunks(APPEND_BATCH_SIZE) {
            self.api.append_block_children(page_id, batch)?;
            batches += 1;
        }

        info!(page_id, blocks = children.len(), batches, "Updated page content");
        Ok(ContentReport {
            cleared,
            blocks: children.len(),
            batches,
        })
    }

    /// Set the `Last Synced` date of a page to the run date.
    ///
    /// # Errors
    ///
    /// Returns an error if the property update fails.
    pub fn update_last_synced(&self, page_id: &str) -> Result<(), NotionError> {
        let date = self.config.synced_at.date_naive();
        debug!(page_id, %date, "Stamping sync date");

        self.api
            .update_page_properties(page_id, &schema::last_synced_properties(date))?;
        Ok(())
    }

    /// Sync one screen: locate or create its page, then replace its content.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Screen`] on the first failed remote call. The page
    /// may be left cleared but not repopulated.
    pub fn sync_screen<F>(
        &self,
        screen_name: &str,
        screen: &ScreenConfig,
        specs: &SpecCollection,
        on_event: &mut F,
    ) -> Result<ScreenReport, SyncError>
    where
        F: FnMut(SyncEvent<'_>),
    {
        on_event(SyncEvent::ScreenStarted {
            screen: screen_name,
        });

        let report = self
            .sync_screen_inner(screen_name, screen, specs, on_event)
            .map_err(|source| SyncError::Screen {
                screen: screen_name.to_owned(),
                source,
            })?;

        on_event(SyncEvent::ScreenFinished(&report));
        Ok(report)
    }

    fn sync_screen_inner<F>(
        &self,
        screen_name: &str,
        screen: &ScreenConfig,
        specs: &SpecCollection,
        on_event: &mut F,
    ) -> Result<ScreenReport, NotionError>
    where
        F: FnMut(SyncEvent<'_>),
    {
        let (page_id, created) = match self.find_page_by_screen(screen_name)? {
            Some(id) => (id, false),
            None => {
                on_event(SyncEvent::CreatingPage {
                    screen: screen_name,
                });
                (self.create_page(screen_name)?, true)
            }
        };

        let plan = ScreenPlan::build(&self.config, screen_name, screen, specs);

        on_event(SyncEvent::UpdatingContent {
            screen: screen_name,
            page_id: &page_id,
        });
        let content = self.update_page_content(&page_id, &plan.blocks)?;
        self.update_last_synced(&page_id)?;

        Ok(ScreenReport {
            screen: screen_name.to_owned(),
            page_id,
            created,
            content,
        })
    }

    /// Sync every screen of the mapping, in mapping order.
    ///
    /// # Errors
    ///
    /// Stops at the first screen that fails and returns its error. Screens
    /// synced before it keep their new content.
    pub fn sync_all<F>(
        &self,
        mapping: &Mapping,
        specs: &SpecCollection,
        mut on_event: F,
    ) -> Result<Vec<ScreenReport>, SyncError>
    where
        F: FnMut(SyncEvent<'_>),
    {
        let mut reports = Vec::with_capacity(mapping.screens.len());
        for (name, screen) in &mapping.screens {
            reports.push(self.sync_screen(name, screen, specs, &mut on_event)?);
        }
        Ok(reports)
    }
}
