//! RSS store: ingested feed entries, separate from the scraped titles

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use radar_core::{FeedStatus, RadarError, RadarResult, RssEntry};

/// Read access to ingested RSS entries
pub trait RssStore: Send + Sync {
    /// Newest entries first, optionally restricted to `feeds`, capped at `limit`
    fn latest_entries(&self, feeds: Option<&[String]>, limit: usize)
        -> RadarResult<Vec<RssEntry>>;

    /// All entries published at or after `cutoff`, newest first
    fn entries_since(
        &self,
        feeds: Option<&[String]>,
        cutoff: DateTime<Utc>,
    ) -> RadarResult<Vec<RssEntry>>;

    /// Per-feed ingestion status
    fn feeds_status(&self) -> RadarResult<Vec<FeedStatus>>;
}

/// On-disk entry, feed id implied by the containing file
#[derive(Debug, Clone, Deserialize)]
struct StoredEntry {
    id: String,
    title: String,
    url: String,
    published_at: DateTime<Utc>,
    #[serde(default)]
    summary: Option<String>,
}

/// File-backed RSS store reading `<root>/rss/<feed-id>.json`
///
/// Each file holds a JSON array of entries for that feed.
pub struct FileRssStore {
    rss_dir: PathBuf,
}

impl FileRssStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            rss_dir: root.as_ref().join("rss"),
        }
    }

    /// Every stored entry, newest first, feed files in name order
    fn read_entries(&self, feeds: Option<&[String]>) -> RadarResult<Vec<RssEntry>> {
        if !self.rss_dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut feed_files: Vec<PathBuf> = fs::read_dir(&self.rss_dir)
            .map_err(|e| RadarError::store(format!("cannot list {}: {e}", self.rss_dir.display())))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        feed_files.sort();

        let mut entries = Vec::new();
        for path in feed_files {
            let Some(feed_id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(wanted) = feeds {
                if !wanted.iter().any(|f| f == feed_id) {
                    continue;
                }
            }
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("skipping unreadable feed file {}: {e}", path.display());
                    continue;
                }
            };
            match serde_json::from_slice::<Vec<StoredEntry>>(&bytes) {
                Ok(stored) => {
                    debug!("loaded {} entries from feed {feed_id}", stored.len());
                    entries.extend(stored.into_iter().map(|e| RssEntry {
                        id: e.id,
                        feed_id: feed_id.to_string(),
                        title: e.title,
                        url: e.url,
                        published_at: e.published_at,
                        summary: e.summary,
                    }));
                }
                Err(e) => warn!("skipping malformed feed file {}: {e}", path.display()),
            }
        }
        entries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(entries)
    }
}

impl RssStore for FileRssStore {
    fn latest_entries(
        &self,
        feeds: Option<&[String]>,
        limit: usize,
    ) -> RadarResult<Vec<RssEntry>> {
        let mut entries = self.read_entries(feeds)?;
        entries.truncate(limit);
        Ok(entries)
    }

    fn entries_since(
        &self,
        feeds: Option<&[String]>,
        cutoff: DateTime<Utc>,
    ) -> RadarResult<Vec<RssEntry>> {
        let mut entries = self.read_entries(feeds)?;
        entries.retain(|e| e.published_at >= cutoff);
        Ok(entries)
    }

    fn feeds_status(&self) -> RadarResult<Vec<FeedStatus>> {
        let entries = self.read_entries(None)?;
        let mut statuses: indexmap::IndexMap<String, FeedStatus> = indexmap::IndexMap::new();
        for entry in entries {
            let status = statuses
                .entry(entry.feed_id.clone())
                .or_insert_with(|| FeedStatus {
                    feed_id: entry.feed_id.clone(),
                    entry_count: 0,
                    latest_published: None,
                });
            status.entry_count += 1;
            if status
                .latest_published
                .is_none_or(|latest| entry.published_at > latest)
            {
                status.latest_published = Some(entry.published_at);
            }
        }
        Ok(statuses.into_values().collect())
    }
}

/// In-memory RSS store for tests and embedding
#[derive(Default)]
pub struct MemoryRssStore {
    entries: Vec<RssEntry>,
}

impl MemoryRssStore {
    pub fn new(mut entries: Vec<RssEntry>) -> Self {
        entries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Self { entries }
    }

    fn filtered(&self, feeds: Option<&[String]>) -> Vec<RssEntry> {
        self.entries
            .iter()
            .filter(|e| feeds.is_none_or(|wanted| wanted.contains(&e.feed_id)))
            .cloned()
            .collect()
    }
}

impl RssStore for MemoryRssStore {
    fn latest_entries(
        &self,
        feeds: Option<&[String]>,
        limit: usize,
    ) -> RadarResult<Vec<RssEntry>> {
        let mut entries = self.filtered(feeds);
        entries.truncate(limit);
        Ok(entries)
    }

    fn entries_since(
        &self,
        feeds: Option<&[String]>,
        cutoff: DateTime<Utc>,
    ) -> RadarResult<Vec<RssEntry>> {
        let mut entries = self.filtered(feeds);
        entries.retain(|e| e.published_at >= cutoff);
        Ok(entries)
    }

    fn feeds_status(&self) -> RadarResult<Vec<FeedStatus>> {
        let mut statuses: indexmap::IndexMap<String, FeedStatus> = indexmap::IndexMap::new();
        for entry in &self.entries {
            let status = statuses
                .entry(entry.feed_id.clone())
                .or_insert_with(|| FeedStatus {
                    feed_id: entry.feed_id.clone(),
                    entry_count: 0,
                    latest_published: None,
                });
            status.entry_count += 1;
            if status
                .latest_published
                .is_none_or(|latest| entry.published_at > latest)
            {
                status.latest_published = Some(entry.published_at);
            }
        }
        Ok(statuses.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(feed: &str, id: &str, day: u32) -> RssEntry {
        RssEntry {
            id: id.to_string(),
            feed_id: feed.to_string(),
            title: format!("entry {id}"),
            url: format!("https://example.com/{id}"),
            published_at: Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap(),
            summary: Some("summary".to_string()),
        }
    }

    #[test]
    fn file_store_reads_newest_first() {
        let root = tempfile::tempdir().unwrap();
        let rss_dir = root.path().join("rss");
        fs::create_dir_all(&rss_dir).unwrap();
        fs::write(
            rss_dir.join("hacker-news.json"),
            r#"[
                {"id": "a", "title": "old", "url": "https://example.com/a",
                 "published_at": "2025-01-01T09:00:00Z"},
                {"id": "b", "title": "new", "url": "https://example.com/b",
                 "published_at": "2025-01-03T09:00:00Z", "summary": "s"}
            ]"#,
        )
        .unwrap();

        let store = FileRssStore::new(root.path());
        let entries = store.latest_entries(None, 10).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "new");
        assert_eq!(entries[0].feed_id, "hacker-news");
    }

    #[test]
    fn entries_since_cuts_off_old_entries() {
        let store = MemoryRssStore::new(vec![entry("hn", "a", 1), entry("hn", "b", 10)]);
        let cutoff = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
        let recent = store.entries_since(None, cutoff).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, "b");
    }

    #[test]
    fn feed_filter_applies() {
        let store = MemoryRssStore::new(vec![entry("hn", "a", 1), entry("36kr", "b", 2)]);
        let feeds = vec!["36kr".to_string()];
        let entries = store.latest_entries(Some(&feeds), 10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].feed_id, "36kr");
    }

    #[test]
    fn status_reports_count_and_latest() {
        let store = MemoryRssStore::new(vec![entry("hn", "a", 1), entry("hn", "b", 10)]);
        let statuses = store.feeds_status().unwrap();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].entry_count, 2);
        assert_eq!(
            statuses[0].latest_published,
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap())
        );
    }
}
