//! Sync result types.

/// Outcome of clearing a page's existing blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Blocks deleted.
    pub deleted: usize,
    /// Blocks whose deletion failed and were left in place.
    pub failed: usize,
}

/// Outcome of replacing a page's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentReport {
    /// Result of clearing the old blocks.
    pub cleared: ClearReport,
    /// Blocks appended.
    pub blocks: usize,
    /// Append requests made.
    pub batches: usize,
}

/// Outcome of syncing one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenReport {
    /// Screen name.
    pub screen: String,
    /// Documentation page ID.
    pub page_id: String,
    /// Whether the page was created during this run.
    pub created: bool,
    /// Content replacement details.
    pub content: ContentReport,
}

/// Progress notification emitted while syncing.
#[derive(Debug, Clone, Copy)]
pub enum SyncEvent<'a> {
    /// Sync of a screen begins.
    ScreenStarted {
        /// Screen name.
        screen: &'a str,
    },
    /// No page matched; a new one is being created.
    CreatingPage {
        /// Screen name.
        screen: &'a str,
    },
    /// Old blocks are being replaced.
    UpdatingContent {
        /// Screen name.
        screen: &'a str,
        /// Target page ID.
        page_id: &'a str,
    },
    /// Screen synced.
    ScreenFinished(&'a ScreenReport),
}
