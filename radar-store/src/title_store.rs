//! Title store: per-date snapshots of scraped platform titles
//!
//! The scraper writes one JSON file per polling snapshot under
//! `<root>/news/<YYYY-MM-DD>/<HHMMSS>.json`. A daily read merges every
//! snapshot of the date in filename order, appending each re-observed
//! title's rank to its history. The length of that history is the novelty
//! signal downstream.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use radar_core::{DailySnapshot, RadarError, RadarResult, TitleRecord};

/// Read access to scraped title snapshots
///
/// Every call reads an independent snapshot; a concurrently appending
/// scraper may yield a partial view for the date, which is accepted.
pub trait TitleStore: Send + Sync {
    /// Union of all snapshots for `date` (the `daily` window)
    fn read_all_titles_for_date(
        &self,
        date: NaiveDate,
        platform_ids: Option<&[String]>,
    ) -> RadarResult<DailySnapshot>;

    /// The latest single snapshot only (the `current` window)
    fn read_latest_batch(&self, platform_ids: Option<&[String]>) -> RadarResult<DailySnapshot>;
}

/// On-disk snapshot file, one per scraper poll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub captured_at: DateTime<Utc>,
    pub platforms: Vec<PlatformSection>,
}

/// One platform's block inside a snapshot file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSection {
    pub id: String,
    pub name: String,
    pub titles: Vec<SnapshotTitle>,
}

/// One title as observed in a single snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotTitle {
    pub title: String,
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_url: Option<String>,
}

/// Accumulates snapshot files into a [`DailySnapshot`]
#[derive(Default)]
struct SnapshotMerger {
    platforms: IndexMap<String, IndexMap<String, TitleRecord>>,
    names: std::collections::HashMap<String, String>,
    times: Vec<DateTime<Utc>>,
}

impl SnapshotMerger {
    fn absorb(&mut self, file: SnapshotFile, platform_ids: Option<&[String]>) {
        self.times.push(file.captured_at);
        for section in file.platforms {
            if let Some(wanted) = platform_ids {
                if !wanted.contains(&section.id) {
                    continue;
                }
            }
            self.names.insert(section.id.clone(), section.name.clone());
            let titles = self.platforms.entry(section.id.clone()).or_default();
            for observed in section.titles {
                match titles.get_mut(&observed.title) {
                    Some(record) => {
                        record.ranks.push(observed.rank);
                        if record.url.is_none() {
                            record.url = observed.url;
                        }
                        if record.mobile_url.is_none() {
                            record.mobile_url = observed.mobile_url;
                        }
                    }
                    None => {
                        titles.insert(
                            observed.title.clone(),
                            TitleRecord {
                                title: observed.title,
                                platform_id: section.id.clone(),
                                ranks: vec![observed.rank],
                                url: observed.url,
                                mobile_url: observed.mobile_url,
                            },
                        );
                    }
                }
            }
        }
    }

    fn finish(self) -> DailySnapshot {
        DailySnapshot {
            titles_by_platform: self
                .platforms
                .into_iter()
                .map(|(id, titles)| (id, titles.into_values().collect()))
                .collect(),
            platform_names: self.names,
            snapshot_times: self.times,
        }
    }
}

/// File-backed title store reading the scraper's JSON output
pub struct FileTitleStore {
    news_dir: PathBuf,
}

impl FileTitleStore {
    /// Create a store rooted at the scraper's output directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            news_dir: root.as_ref().join("news"),
        }
    }

    /// Snapshot files of one date, sorted by filename (chronological)
    fn snapshot_paths(&self, date: NaiveDate) -> RadarResult<Vec<PathBuf>> {
        let day_dir = self.news_dir.join(date.format("%Y-%m-%d").to_string());
        if !day_dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut paths: Vec<PathBuf> = fs::read_dir(&day_dir)
            .map_err(|e| RadarError::store(format!("cannot list {}: {e}", day_dir.display())))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// All dates with at least one snapshot directory, ascending
    fn known_dates(&self) -> RadarResult<Vec<NaiveDate>> {
        if !self.news_dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut dates: Vec<NaiveDate> = fs::read_dir(&self.news_dir)
            .map_err(|e| {
                RadarError::store(format!("cannot list {}: {e}", self.news_dir.display()))
            })?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(|name| NaiveDate::parse_from_str(name, "%Y-%m-%d").ok())
            })
            .collect();
        dates.sort();
        Ok(dates)
    }

    fn load_snapshot(path: &Path) -> Option<SnapshotFile> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("skipping unreadable snapshot {}: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(file) => Some(file),
            Err(e) => {
                // A file the scraper is mid-way through writing is not an error
                // for the whole call.
                warn!("skipping malformed snapshot {}: {e}", path.display());
                None
            }
        }
    }
}

impl TitleStore for FileTitleStore {
    fn read_all_titles_for_date(
        &self,
        date: NaiveDate,
        platform_ids: Option<&[String]>,
    ) -> RadarResult<DailySnapshot> {
        let mut merger = SnapshotMerger::default();
        let paths = self.snapshot_paths(date)?;
        debug!("merging {} snapshot files for {date}", paths.len());
        for path in paths {
            if let Some(file) = Self::load_snapshot(&path) {
                merger.absorb(file, platform_ids);
            }
        }
        Ok(merger.finish())
    }

    fn read_latest_batch(&self, platform_ids: Option<&[String]>) -> RadarResult<DailySnapshot> {
        let latest_date = self.known_dates()?.pop().ok_or_else(no_snapshots_error)?;
        let path = self
            .snapshot_paths(latest_date)?
            .pop()
            .ok_or_else(no_snapshots_error)?;
        debug!("reading latest batch from {}", path.display());
        let file = Self::load_snapshot(&path).ok_or_else(no_snapshots_error)?;
        let mut merger = SnapshotMerger::default();
        merger.absorb(file, platform_ids);
        Ok(merger.finish())
    }
}

fn no_snapshots_error() -> RadarError {
    RadarError::not_found_with(
        "no scraped snapshots found",
        "verify the scraper has run and produced output",
    )
}

/// In-memory title store for tests and embedding
#[derive(Default)]
pub struct MemoryTitleStore {
    days: BTreeMap<NaiveDate, DailySnapshot>,
    latest: Option<DailySnapshot>,
}

impl MemoryTitleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the daily union for a date
    pub fn with_day(mut self, date: NaiveDate, snapshot: DailySnapshot) -> Self {
        self.days.insert(date, snapshot);
        self
    }

    /// Register the latest single batch
    pub fn with_latest(mut self, snapshot: DailySnapshot) -> Self {
        self.latest = Some(snapshot);
        self
    }
}

impl TitleStore for MemoryTitleStore {
    fn read_all_titles_for_date(
        &self,
        date: NaiveDate,
        platform_ids: Option<&[String]>,
    ) -> RadarResult<DailySnapshot> {
        Ok(self
            .days
            .get(&date)
            .map(|snapshot| filter_platforms(snapshot, platform_ids))
            .unwrap_or_default())
    }

    fn read_latest_batch(&self, platform_ids: Option<&[String]>) -> RadarResult<DailySnapshot> {
        // No fallback to a registered day: the current and daily windows
        // must stay distinguishable in fixtures.
        self.latest
            .as_ref()
            .map(|snapshot| filter_platforms(snapshot, platform_ids))
            .ok_or_else(no_snapshots_error)
    }
}

/// Restrict a snapshot to the requested platforms, preserving order
fn filter_platforms(snapshot: &DailySnapshot, platform_ids: Option<&[String]>) -> DailySnapshot {
    let Some(wanted) = platform_ids else {
        return snapshot.clone();
    };
    DailySnapshot {
        titles_by_platform: snapshot
            .titles_by_platform
            .iter()
            .filter(|(id, _)| wanted.contains(id))
            .map(|(id, titles)| (id.clone(), titles.clone()))
            .collect(),
        platform_names: snapshot.platform_names.clone(),
        snapshot_times: snapshot.snapshot_times.clone(),
    }
}
