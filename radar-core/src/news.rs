//! Scraped news data structures and their per-request projections

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single scraped title with its rank history for one date
///
/// `ranks` holds the position the title held in each polling snapshot it
/// appeared in, in chronological order. It is never empty once a record
/// exists; a length of 1 means the title has been seen in exactly one
/// snapshot so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleRecord {
    /// Title text as scraped
    pub title: String,
    /// Owning platform id (stable key, e.g. "zhihu")
    pub platform_id: String,
    /// Rank per snapshot, chronological
    pub ranks: Vec<u32>,
    /// Article URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Mobile article URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_url: Option<String>,
}

impl TitleRecord {
    /// Rank from the first snapshot the title appeared in, 0 if absent
    pub fn first_rank(&self) -> u32 {
        self.ranks.first().copied().unwrap_or(0)
    }

    /// A title is new when it has appeared in exactly one snapshot
    pub fn is_new(&self) -> bool {
        self.ranks.len() == 1
    }
}

/// A platform the scraper covers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformRecord {
    /// Stable platform id
    pub id: String,
    /// Human-readable display name
    pub name: String,
}

/// Consumer-facing projection of a [`TitleRecord`]
///
/// URLs are populated only when the caller asked for them; everything else
/// is derived from the record at projection time. The engine never mutates
/// store output, it only projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    /// Display name of the owning platform
    pub source_name: String,
    /// Rank in the first snapshot the title appeared in
    pub rank: u32,
    /// True iff the title has been observed in exactly one snapshot
    pub is_new: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_url: Option<String>,
}

impl NewsItem {
    /// Project a title record for output
    pub fn project(record: &TitleRecord, source_name: &str, include_url: bool) -> Self {
        Self {
            title: record.title.clone(),
            source_name: source_name.to_string(),
            rank: record.first_rank(),
            is_new: record.is_new(),
            url: if include_url { record.url.clone() } else { None },
            mobile_url: if include_url {
                record.mobile_url.clone()
            } else {
                None
            },
        }
    }
}

/// One ordered, capped result bucket
///
/// `key` is a matched keyword term or a platform id depending on the
/// grouping mode. `count` is the pre-truncation member count so callers can
/// distinguish "shown" from "total".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsGroup {
    pub key: String,
    pub count: usize,
    pub items: Vec<NewsItem>,
}

/// Everything the title store yields for one date (or one batch)
///
/// Platform iteration order is the order the store encountered them, which
/// downstream grouping relies on for deterministic tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct DailySnapshot {
    /// Title records keyed by platform id, insertion-ordered
    pub titles_by_platform: IndexMap<String, Vec<TitleRecord>>,
    /// Platform id to display name
    pub platform_names: HashMap<String, String>,
    /// Capture time of each snapshot that contributed, chronological
    pub snapshot_times: Vec<DateTime<Utc>>,
}

impl DailySnapshot {
    /// True when no platform contributed any title
    pub fn is_empty(&self) -> bool {
        self.titles_by_platform.values().all(|t| t.is_empty())
    }

    /// Total number of title records across all platforms
    pub fn title_count(&self) -> usize {
        self.titles_by_platform.values().map(|t| t.len()).sum()
    }

    /// Display name for a platform, falling back to the raw id
    pub fn platform_name<'a>(&'a self, platform_id: &'a str) -> &'a str {
        self.platform_names
            .get(platform_id)
            .map(String::as_str)
            .unwrap_or(platform_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, ranks: &[u32]) -> TitleRecord {
        TitleRecord {
            title: title.to_string(),
            platform_id: "p1".to_string(),
            ranks: ranks.to_vec(),
            url: Some("https://example.com/a".to_string()),
            mobile_url: None,
        }
    }

    #[test]
    fn is_new_iff_single_snapshot() {
        assert!(record("a", &[3]).is_new());
        assert!(!record("a", &[3, 1]).is_new());
    }

    #[test]
    fn projection_uses_first_rank() {
        let item = NewsItem::project(&record("a", &[7, 2, 1]), "Zhihu", false);
        assert_eq!(item.rank, 7);
        assert!(!item.is_new);
        assert_eq!(item.source_name, "Zhihu");
    }

    #[test]
    fn projection_omits_urls_unless_requested() {
        let rec = record("a", &[1]);
        assert!(NewsItem::project(&rec, "Zhihu", false).url.is_none());
        assert_eq!(
            NewsItem::project(&rec, "Zhihu", true).url.as_deref(),
            Some("https://example.com/a")
        );
    }

    #[test]
    fn snapshot_name_falls_back_to_id() {
        let snapshot = DailySnapshot::default();
        assert_eq!(snapshot.platform_name("weibo"), "weibo");
        assert!(snapshot.is_empty());
    }
}
