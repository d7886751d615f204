//! RSS data structures
//!
//! RSS entries come from a separate store than the scraped titles but share
//! the same envelope and validation discipline at the facade.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry from an RSS feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RssEntry {
    /// Stable entry id (feed-scoped)
    pub id: String,
    /// Owning feed id (e.g. "hacker-news")
    pub feed_id: String,
    /// Entry title
    pub title: String,
    /// Entry URL
    pub url: String,
    /// Publication time
    pub published_at: DateTime<Utc>,
    /// Entry summary, omitted from responses unless requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl RssEntry {
    /// Copy of this entry with the summary dropped
    pub fn without_summary(&self) -> Self {
        Self {
            summary: None,
            ..self.clone()
        }
    }
}

/// Ingestion status of one RSS feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedStatus {
    pub feed_id: String,
    /// Number of entries currently stored
    pub entry_count: usize,
    /// Publication time of the newest stored entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_published: Option<DateTime<Utc>>,
}
