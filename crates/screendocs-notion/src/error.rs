//! Error types for Notion integration.

/// Error from Notion API operations.
#[derive(Debug, thiserror::Error)]
pub enum NotionError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (Notion returns a JSON error object).
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error while syncing a screen.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A Notion call failed; the page may be left partially updated.
    #[error("failed to sync screen '{screen}': {source}")]
    Screen {
        /// Screen being synced.
        screen: String,
        /// Underlying API error.
        #[source]
        source: NotionError,
    },
}
