//! Query facade
//!
//! One boundary for every consumer-facing operation. Each public method
//! validates its inputs, drives the stores and engines, and returns a
//! `serde_json::Value` envelope: `{"success": true, ...payload}` or
//! `{"success": false, "error": {code, message, suggestion?}}`.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use radar_core::{DateRange, NewsGroup, NewsItem, RadarError, RadarResult, RssEntry};
use radar_query::{
    build_summary_prompt, group_for_summary, resolve_date_range, trending_topics, DateExpr,
    ExtractMode, GroupBy, GroupingOptions, Segmenter, TrendingTopic, WordSegmenter,
};
use radar_store::{RssStore, TaxonomyLoader, TitleStore};

use crate::validators;

/// Facade configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Default item limit for listing operations
    pub default_limit: usize,
    /// Hard cap on any caller-supplied limit
    pub max_limit: usize,
    /// Default trending top-N
    pub default_top_n: usize,
    /// Hard cap on trending top-N
    pub max_top_n: usize,
    /// Default per-group item cap for summary grouping
    pub default_max_per_group: usize,
    /// Platform id whitelist; empty accepts any id
    pub allowed_platforms: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 500,
            default_top_n: 10,
            max_top_n: 100,
            default_max_per_group: 10,
            allowed_platforms: Vec::new(),
        }
    }
}

/// Parameters for the summary-grouping operation
#[derive(Debug, Clone, Default)]
pub struct SummaryQuery {
    /// Date expression, defaults to "today"
    pub date_range: Option<DateExpr>,
    /// "daily" | "current" | "incremental"
    pub mode: Option<String>,
    /// "keyword" | "platform"
    pub group_by: Option<String>,
    /// Per-group item cap, defaults to 10
    pub max_news_per_keyword: Option<usize>,
    pub include_url: bool,
}

/// The consumer-facing query boundary
pub struct QueryService {
    titles: Arc<dyn TitleStore>,
    rss: Arc<dyn RssStore>,
    taxonomy: Arc<dyn TaxonomyLoader>,
    segmenter: Arc<dyn Segmenter>,
    config: ServiceConfig,
}

impl QueryService {
    pub fn new(
        titles: Arc<dyn TitleStore>,
        rss: Arc<dyn RssStore>,
        taxonomy: Arc<dyn TaxonomyLoader>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            titles,
            rss,
            taxonomy,
            segmenter: Arc::new(WordSegmenter::new()),
            config,
        }
    }

    /// Swap in a different auto-extract segmenter
    pub fn with_segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Resolve an optional date expression, defaulting to today
    fn resolve_range(&self, date_range: Option<&DateExpr>) -> RadarResult<DateRange> {
        match date_range {
            Some(expr) => resolve_date_range(expr, self.today()),
            None => Ok(DateRange::single(self.today())),
        }
    }

    // ========================================================================
    // News operations
    // ========================================================================

    /// Latest batch of scraped news
    pub fn get_latest_news(
        &self,
        platforms: Option<Vec<String>>,
        limit: Option<usize>,
        include_url: bool,
    ) -> Value {
        envelope(self.latest_news_impl(platforms, limit, include_url))
    }

    fn latest_news_impl(
        &self,
        platforms: Option<Vec<String>>,
        limit: Option<usize>,
        include_url: bool,
    ) -> RadarResult<LatestNewsPayload> {
        let platforms = validators::validate_platforms(platforms, &self.config.allowed_platforms)?;
        let limit =
            validators::validate_limit(limit, self.config.default_limit, self.config.max_limit);

        let snapshot = self.titles.read_latest_batch(platforms.as_deref())?;
        if snapshot.is_empty() {
            return Err(no_data_error("the latest batch"));
        }

        let mut news = flatten_snapshot(&snapshot, include_url);
        news.truncate(limit);
        info!("latest news: returning {} items", news.len());
        Ok(LatestNewsPayload {
            total: news.len(),
            news,
            platforms,
        })
    }

    /// Keyword search over a date range
    pub fn search_news_by_keyword(
        &self,
        keyword: &str,
        date_range: Option<DateExpr>,
        platforms: Option<Vec<String>>,
        limit: Option<usize>,
    ) -> Value {
        envelope(self.search_news_impl(keyword, date_range, platforms, limit))
    }

    fn search_news_impl(
        &self,
        keyword: &str,
        date_range: Option<DateExpr>,
        platforms: Option<Vec<String>>,
        limit: Option<usize>,
    ) -> RadarResult<SearchNewsPayload> {
        let keyword = validators::validate_keyword(keyword)?;
        let platforms = validators::validate_platforms(platforms, &self.config.allowed_platforms)?;
        let range = self.resolve_range(date_range.as_ref())?;
        let needle = keyword.to_lowercase();

        let mut news = Vec::new();
        let mut any_data = false;
        for day in range.iter_days() {
            let snapshot = self
                .titles
                .read_all_titles_for_date(day, platforms.as_deref())?;
            if snapshot.is_empty() {
                continue;
            }
            any_data = true;
            for (platform_id, records) in &snapshot.titles_by_platform {
                let source_name = snapshot.platform_name(platform_id);
                for record in records {
                    if record.title.to_lowercase().contains(&needle) {
                        news.push(NewsItem::project(record, source_name, false));
                    }
                }
            }
        }

        if !any_data {
            return Err(no_data_error(&format!(
                "{} .. {}",
                range.start, range.end
            )));
        }

        if let Some(limit) = limit {
            let limit =
                validators::validate_limit(Some(limit), self.config.default_limit, self.config.max_limit);
            news.truncate(limit);
        }

        debug!("keyword search {keyword:?}: {} hits", news.len());
        Ok(SearchNewsPayload {
            total: news.len(),
            news,
            keyword,
            date_range: range,
            platforms,
        })
    }

    /// Top-N topic frequency statistics
    pub fn get_trending_topics(
        &self,
        top_n: Option<usize>,
        mode: Option<&str>,
        extract_mode: Option<&str>,
    ) -> Value {
        envelope(self.trending_impl(top_n, mode, extract_mode))
    }

    fn trending_impl(
        &self,
        top_n: Option<usize>,
        mode: Option<&str>,
        extract_mode: Option<&str>,
    ) -> RadarResult<TrendingPayload> {
        let top_n =
            validators::validate_top_n(top_n, self.config.default_top_n, self.config.max_top_n);
        let mode = validators::validate_mode(mode, &["daily", "current"], "current")?;
        let extract_mode =
            validators::validate_mode(extract_mode, &["keywords", "auto_extract"], "keywords")?;

        let snapshot = match mode {
            "daily" => self.titles.read_all_titles_for_date(self.today(), None)?,
            _ => self.titles.read_latest_batch(None)?,
        };
        if snapshot.is_empty() {
            return Err(no_data_error(mode));
        }

        // Reloaded on every call so keyword edits apply immediately.
        let taxonomy = if extract_mode == "keywords" {
            self.taxonomy.parse_frequency_words()?
        } else {
            Vec::new()
        };

        let extraction = if extract_mode == "keywords" {
            ExtractMode::Keywords
        } else {
            ExtractMode::AutoExtract
        };
        let topics = trending_topics(
            &snapshot,
            &taxonomy,
            self.segmenter.as_ref(),
            top_n,
            extraction,
        );

        Ok(TrendingPayload {
            total: topics.len(),
            topics,
            mode: mode.to_string(),
            extract_mode: extract_mode.to_string(),
        })
    }

    /// News listing scoped to a resolved date
    pub fn get_news_by_date(
        &self,
        date_range: Option<DateExpr>,
        platforms: Option<Vec<String>>,
        limit: Option<usize>,
        include_url: bool,
    ) -> Value {
        envelope(self.news_by_date_impl(date_range, platforms, limit, include_url))
    }

    fn news_by_date_impl(
        &self,
        date_range: Option<DateExpr>,
        platforms: Option<Vec<String>>,
        limit: Option<usize>,
        include_url: bool,
    ) -> RadarResult<NewsByDatePayload> {
        let platforms = validators::validate_platforms(platforms, &self.config.allowed_platforms)?;
        let limit =
            validators::validate_limit(limit, self.config.default_limit, self.config.max_limit);
        // Single-date operations use the range's start.
        let date = self.resolve_range(date_range.as_ref())?.start;

        let snapshot = self
            .titles
            .read_all_titles_for_date(date, platforms.as_deref())?;
        if snapshot.is_empty() {
            return Err(no_data_error(&date.to_string()));
        }

        let mut news = flatten_snapshot(&snapshot, include_url);
        news.truncate(limit);
        Ok(NewsByDatePayload {
            total: news.len(),
            news,
            date: date.format("%Y-%m-%d").to_string(),
            platforms,
        })
    }

    /// Grouped news for AI summarization, the grouping engine entry point
    pub fn get_news_for_summary(&self, query: SummaryQuery) -> Value {
        envelope(self.summary_impl(query))
    }

    fn summary_impl(&self, query: SummaryQuery) -> RadarResult<SummaryPayload> {
        let mode = validators::validate_mode(
            query.mode.as_deref(),
            &["daily", "current", "incremental"],
            "daily",
        )?;
        let group_by = validators::validate_mode(
            query.group_by.as_deref(),
            &["keyword", "platform"],
            "keyword",
        )?;
        let max_per_group = match query.max_news_per_keyword {
            None | Some(0) => self.config.default_max_per_group,
            Some(n) => n,
        };
        let date = self.resolve_range(query.date_range.as_ref())?.start;

        let snapshot = self.titles.read_all_titles_for_date(date, None)?;
        if snapshot.is_empty() {
            return Err(RadarError::not_found_with(
                format!("no news data found for {date}"),
                "verify the scraper has run and produced data for this date",
            ));
        }

        // Reloaded on every call so keyword edits apply immediately.
        let taxonomy = self.taxonomy.parse_frequency_words()?;

        let options = GroupingOptions {
            group_by: if group_by == "platform" {
                GroupBy::Platform
            } else {
                GroupBy::Keyword
            },
            max_per_group,
            include_url: query.include_url,
        };
        let grouping = group_for_summary(&snapshot, &taxonomy, &options);
        let selected = grouping.selected(options.group_by);
        let total_news: usize = selected.iter().map(|g| g.count).sum();

        info!(
            "summary grouping for {date}: {} groups, {} member slots",
            selected.len(),
            total_news
        );

        Ok(match options.group_by {
            GroupBy::Keyword => SummaryPayload::Keyword {
                date: date.format("%Y-%m-%d").to_string(),
                mode: mode.to_string(),
                group_by: group_by.to_string(),
                total_keywords: selected.len(),
                total_news,
                keyword_groups: selected
                    .iter()
                    .map(|group| KeywordGroupView {
                        keyword: group.key.clone(),
                        count: group.count,
                        news: group.items.clone(),
                    })
                    .collect(),
            },
            GroupBy::Platform => SummaryPayload::Platform {
                date: date.format("%Y-%m-%d").to_string(),
                mode: mode.to_string(),
                group_by: group_by.to_string(),
                total_platforms: selected.len(),
                total_news,
                platform_groups: selected
                    .iter()
                    .map(|group| PlatformGroupView {
                        platform: group.key.clone(),
                        platform_name: snapshot.platform_name(&group.key).to_string(),
                        count: group.count,
                        news: group.items.clone(),
                    })
                    .collect(),
            },
        })
    }

    /// Render the AI digest prompt for a date's keyword groups
    pub fn get_summary_prompt(&self, query: SummaryQuery) -> Value {
        envelope(self.summary_prompt_impl(query))
    }

    fn summary_prompt_impl(&self, query: SummaryQuery) -> RadarResult<PromptPayload> {
        let payload = self.summary_impl(SummaryQuery {
            group_by: Some("keyword".to_string()),
            include_url: true,
            ..query
        })?;
        let SummaryPayload::Keyword {
            date,
            keyword_groups,
            ..
        } = payload
        else {
            return Err(RadarError::internal("summary grouping produced wrong axis"));
        };
        let groups: Vec<NewsGroup> = keyword_groups
            .into_iter()
            .map(|view| NewsGroup {
                key: view.keyword,
                count: view.count,
                items: view.news,
            })
            .collect();
        Ok(PromptPayload {
            prompt: build_summary_prompt(&groups, Utc::now()),
            date,
        })
    }

    // ========================================================================
    // RSS operations
    // ========================================================================

    /// Latest ingested RSS entries
    pub fn get_latest_rss(
        &self,
        feeds: Option<Vec<String>>,
        limit: Option<usize>,
        include_summary: bool,
    ) -> Value {
        envelope(self.latest_rss_impl(feeds, limit, include_summary))
    }

    fn latest_rss_impl(
        &self,
        feeds: Option<Vec<String>>,
        limit: Option<usize>,
        include_summary: bool,
    ) -> RadarResult<RssPayload> {
        let limit =
            validators::validate_limit(limit, self.config.default_limit, self.config.max_limit);
        let entries = self.rss.latest_entries(feeds.as_deref(), limit)?;
        Ok(RssPayload {
            total: entries.len(),
            rss: strip_summaries(entries, include_summary),
            feeds,
        })
    }

    /// Keyword search over recent RSS entries
    pub fn search_rss(
        &self,
        keyword: &str,
        feeds: Option<Vec<String>>,
        days: Option<i64>,
        limit: Option<usize>,
        include_summary: bool,
    ) -> Value {
        envelope(self.search_rss_impl(keyword, feeds, days, limit, include_summary))
    }

    fn search_rss_impl(
        &self,
        keyword: &str,
        feeds: Option<Vec<String>>,
        days: Option<i64>,
        limit: Option<usize>,
        include_summary: bool,
    ) -> RadarResult<SearchRssPayload> {
        let keyword = validators::validate_keyword(keyword)?;
        let days = validators::clamp_days(days);
        let limit =
            validators::validate_limit(limit, self.config.default_limit, self.config.max_limit);

        let cutoff = Utc::now() - Duration::days(days);
        let needle = keyword.to_lowercase();
        let mut entries = self.rss.entries_since(feeds.as_deref(), cutoff)?;
        entries.retain(|entry| {
            entry.title.to_lowercase().contains(&needle)
                || entry
                    .summary
                    .as_ref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
        });
        entries.truncate(limit);

        debug!("rss search {keyword:?} over {days} days: {} hits", entries.len());
        Ok(SearchRssPayload {
            total: entries.len(),
            rss: strip_summaries(entries, include_summary),
            keyword,
            feeds,
            days,
        })
    }

    /// Ingestion status per RSS feed
    pub fn get_rss_feeds_status(&self) -> Value {
        envelope(self.rss_status_impl())
    }

    fn rss_status_impl(&self) -> RadarResult<FeedsStatusPayload> {
        let feeds = self.rss.feeds_status()?;
        Ok(FeedsStatusPayload {
            total: feeds.len(),
            feeds,
        })
    }
}

// ============================================================================
// Payloads and envelope
// ============================================================================

#[derive(Debug, Serialize)]
struct LatestNewsPayload {
    news: Vec<NewsItem>,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    platforms: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct SearchNewsPayload {
    news: Vec<NewsItem>,
    total: usize,
    keyword: String,
    date_range: DateRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    platforms: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct TrendingPayload {
    topics: Vec<TrendingTopic>,
    total: usize,
    mode: String,
    extract_mode: String,
}

#[derive(Debug, Serialize)]
struct NewsByDatePayload {
    news: Vec<NewsItem>,
    total: usize,
    date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    platforms: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct KeywordGroupView {
    keyword: String,
    count: usize,
    news: Vec<NewsItem>,
}

#[derive(Debug, Serialize)]
struct PlatformGroupView {
    platform: String,
    platform_name: String,
    count: usize,
    news: Vec<NewsItem>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum SummaryPayload {
    Keyword {
        date: String,
        mode: String,
        group_by: String,
        total_keywords: usize,
        total_news: usize,
        keyword_groups: Vec<KeywordGroupView>,
    },
    Platform {
        date: String,
        mode: String,
        group_by: String,
        total_platforms: usize,
        total_news: usize,
        platform_groups: Vec<PlatformGroupView>,
    },
}

#[derive(Debug, Serialize)]
struct PromptPayload {
    prompt: String,
    date: String,
}

#[derive(Debug, Serialize)]
struct RssPayload {
    rss: Vec<RssEntry>,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    feeds: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct SearchRssPayload {
    rss: Vec<RssEntry>,
    total: usize,
    keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    feeds: Option<Vec<String>>,
    days: i64,
}

#[derive(Debug, Serialize)]
struct FeedsStatusPayload {
    feeds: Vec<radar_core::FeedStatus>,
    total: usize,
}

/// Flatten a snapshot into items, platform scan order preserved
fn flatten_snapshot(snapshot: &radar_core::DailySnapshot, include_url: bool) -> Vec<NewsItem> {
    let mut news = Vec::with_capacity(snapshot.title_count());
    for (platform_id, records) in &snapshot.titles_by_platform {
        let source_name = snapshot.platform_name(platform_id);
        for record in records {
            news.push(NewsItem::project(record, source_name, include_url));
        }
    }
    news
}

fn strip_summaries(entries: Vec<RssEntry>, include_summary: bool) -> Vec<RssEntry> {
    if include_summary {
        entries
    } else {
        entries.iter().map(RssEntry::without_summary).collect()
    }
}

fn no_data_error(scope: &str) -> RadarError {
    RadarError::not_found_with(
        format!("no news data found for {scope}"),
        "verify the scraper has run and produced data",
    )
}

/// Fold a result into the uniform response envelope
fn envelope<T: Serialize>(result: RadarResult<T>) -> Value {
    match result {
        Ok(payload) => match serde_json::to_value(payload) {
            Ok(Value::Object(mut map)) => {
                map.insert("success".to_string(), Value::Bool(true));
                Value::Object(map)
            }
            Ok(other) => json!({ "success": true, "data": other }),
            Err(e) => error_envelope(&RadarError::internal(e.to_string())),
        },
        Err(error) => error_envelope(&error),
    }
}

fn error_envelope(error: &RadarError) -> Value {
    let mut body = serde_json::Map::new();
    body.insert("code".to_string(), json!(error.code()));
    body.insert("message".to_string(), json!(error.to_string()));
    if let Some(suggestion) = error.suggestion() {
        body.insert("suggestion".to_string(), json!(suggestion));
    }
    json!({ "success": false, "error": body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::{DailySnapshot, KeywordGroup, Term, TitleRecord};
    use radar_store::{MemoryRssStore, MemoryTitleStore, StaticTaxonomy};
    use chrono::TimeZone;

    fn record(platform: &str, title: &str, ranks: &[u32]) -> TitleRecord {
        TitleRecord {
            title: title.to_string(),
            platform_id: platform.to_string(),
            ranks: ranks.to_vec(),
            url: Some("https://example.com/a".to_string()),
            mobile_url: None,
        }
    }

    fn snapshot(platforms: &[(&str, &str, &[(&str, &[u32])])]) -> DailySnapshot {
        let mut snap = DailySnapshot::default();
        for (id, name, titles) in platforms {
            snap.platform_names.insert(id.to_string(), name.to_string());
            snap.titles_by_platform.insert(
                id.to_string(),
                titles
                    .iter()
                    .map(|(title, ranks)| record(id, title, ranks))
                    .collect(),
            );
        }
        snap
    }

    fn taxonomy(terms: &[&str]) -> StaticTaxonomy {
        StaticTaxonomy(vec![KeywordGroup {
            required: Vec::new(),
            normal: terms.iter().map(|term| Term::new(*term)).collect(),
        }])
    }

    fn rss_entry(feed: &str, id: &str, day: u32, title: &str) -> RssEntry {
        RssEntry {
            id: id.to_string(),
            feed_id: feed.to_string(),
            title: title.to_string(),
            url: format!("https://example.com/{id}"),
            published_at: Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap(),
            summary: Some("summary text".to_string()),
        }
    }

    fn service(titles: MemoryTitleStore, taxonomy: StaticTaxonomy) -> QueryService {
        QueryService::new(
            Arc::new(titles),
            Arc::new(MemoryRssStore::default()),
            Arc::new(taxonomy),
            ServiceConfig::default(),
        )
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn missing_date_yields_data_not_found_envelope() {
        let svc = service(MemoryTitleStore::new(), taxonomy(&["AI"]));
        let response = svc.get_news_for_summary(SummaryQuery {
            date_range: Some(DateExpr::text("2030-01-01")),
            ..Default::default()
        });
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "DATA_NOT_FOUND");
        assert!(response["error"]["suggestion"].is_string());
    }

    #[test]
    fn empty_keyword_yields_invalid_parameter_envelope() {
        let svc = service(MemoryTitleStore::new(), taxonomy(&[]));
        let response = svc.search_news_by_keyword("   ", None, None, None);
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "INVALID_PARAMETER");
    }

    #[test]
    fn unparsable_date_yields_invalid_parameter_envelope() {
        let svc = service(MemoryTitleStore::new(), taxonomy(&[]));
        let response = svc.get_news_by_date(Some(DateExpr::text("someday")), None, None, false);
        assert_eq!(response["error"]["code"], "INVALID_PARAMETER");
    }

    #[test]
    fn summary_groups_by_keyword_with_counts() {
        let day = date("2025-01-15");
        let store = MemoryTitleStore::new().with_day(
            day,
            snapshot(&[(
                "zhihu",
                "Zhihu",
                &[("AI breakthrough", &[2][..]), ("New AI chip", &[1][..])],
            )]),
        );
        let svc = service(store, taxonomy(&["AI"]));
        let response = svc.get_news_for_summary(SummaryQuery {
            date_range: Some(DateExpr::text("2025-01-15")),
            ..Default::default()
        });

        assert_eq!(response["success"], true);
        assert_eq!(response["total_keywords"], 1);
        assert_eq!(response["total_news"], 2);
        let group = &response["keyword_groups"][0];
        assert_eq!(group["keyword"], "AI");
        assert_eq!(group["count"], 2);
        // Ascending rank.
        assert_eq!(group["news"][0]["title"], "New AI chip");
        assert_eq!(group["news"][1]["title"], "AI breakthrough");
        // URLs off by default.
        assert!(group["news"][0].get("url").is_none());
    }

    #[test]
    fn summary_groups_by_platform_in_size_order() {
        let day = date("2025-01-15");
        let store = MemoryTitleStore::new().with_day(
            day,
            snapshot(&[
                ("p2", "Two", &[("only story", &[1][..])]),
                (
                    "p1",
                    "One",
                    &[("a", &[1][..]), ("b", &[2][..]), ("c", &[3][..])],
                ),
            ]),
        );
        let svc = service(store, taxonomy(&[]));
        let response = svc.get_news_for_summary(SummaryQuery {
            date_range: Some(DateExpr::text("2025-01-15")),
            group_by: Some("platform".to_string()),
            ..Default::default()
        });

        assert_eq!(response["success"], true);
        assert_eq!(response["total_platforms"], 2);
        assert_eq!(response["platform_groups"][0]["platform"], "p1");
        assert_eq!(response["platform_groups"][0]["count"], 3);
        assert_eq!(response["platform_groups"][0]["platform_name"], "One");
        assert_eq!(response["platform_groups"][1]["platform"], "p2");
        assert_eq!(response["platform_groups"][1]["count"], 1);
    }

    #[test]
    fn summary_cap_reports_pre_truncation_count() {
        let day = date("2025-01-15");
        let store = MemoryTitleStore::new().with_day(
            day,
            snapshot(&[(
                "p1",
                "One",
                &[("AI a", &[1][..]), ("AI b", &[2][..]), ("AI c", &[3][..])],
            )]),
        );
        let svc = service(store, taxonomy(&["AI"]));
        let response = svc.get_news_for_summary(SummaryQuery {
            date_range: Some(DateExpr::text("2025-01-15")),
            max_news_per_keyword: Some(2),
            ..Default::default()
        });
        let group = &response["keyword_groups"][0];
        assert_eq!(group["count"], 3);
        assert_eq!(group["news"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn double_encoded_range_matches_structured_range() {
        let day = date("2025-01-01");
        let store = MemoryTitleStore::new().with_day(
            day,
            snapshot(&[("p1", "One", &[("AI story", &[1][..])])]),
        );
        let svc = service(store, taxonomy(&["AI"]));

        let encoded = svc.search_news_by_keyword(
            "AI",
            Some(DateExpr::text(r#"{"start":"2025-01-01","end":"2025-01-02"}"#)),
            None,
            None,
        );
        let structured: DateExpr =
            serde_json::from_value(json!({"start": "2025-01-01", "end": "2025-01-02"})).unwrap();
        let object = svc.search_news_by_keyword("AI", Some(structured), None, None);

        assert_eq!(encoded, object);
        assert_eq!(encoded["total"], 1);
    }

    #[test]
    fn invalid_summary_mode_is_rejected() {
        let svc = service(MemoryTitleStore::new(), taxonomy(&[]));
        let response = svc.get_news_for_summary(SummaryQuery {
            mode: Some("hourly".to_string()),
            ..Default::default()
        });
        assert_eq!(response["error"]["code"], "INVALID_PARAMETER");
        assert!(response["error"]["suggestion"]
            .as_str()
            .unwrap()
            .contains("incremental"));
    }

    #[test]
    fn unknown_platform_rejected_when_whitelisted() {
        let config = ServiceConfig {
            allowed_platforms: vec!["zhihu".to_string()],
            ..Default::default()
        };
        let svc = QueryService::new(
            Arc::new(MemoryTitleStore::new()),
            Arc::new(MemoryRssStore::default()),
            Arc::new(taxonomy(&[])),
            config,
        );
        let response = svc.get_latest_news(Some(vec!["weibo".to_string()]), None, false);
        assert_eq!(response["error"]["code"], "INVALID_PARAMETER");
    }

    #[test]
    fn latest_news_flattens_and_limits() {
        let store = MemoryTitleStore::new().with_latest(snapshot(&[(
            "p1",
            "One",
            &[("a", &[1][..]), ("b", &[2][..]), ("c", &[3][..])],
        )]));
        let svc = service(store, taxonomy(&[]));
        let response = svc.get_latest_news(None, Some(2), false);
        assert_eq!(response["success"], true);
        assert_eq!(response["total"], 2);
        assert_eq!(response["news"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn trending_daily_counts_curated_terms() {
        let today = Utc::now().date_naive();
        let store = MemoryTitleStore::new().with_day(
            today,
            snapshot(&[(
                "p1",
                "One",
                &[("AI wins", &[1][..]), ("AI chip", &[2][..]), ("other", &[3][..])],
            )]),
        );
        let svc = service(store, taxonomy(&["AI"]));
        let response = svc.get_trending_topics(Some(5), Some("daily"), None);
        assert_eq!(response["success"], true);
        assert_eq!(response["topics"][0]["term"], "AI");
        assert_eq!(response["topics"][0]["count"], 2);
        assert_eq!(response["mode"], "daily");
        assert_eq!(response["extract_mode"], "keywords");
    }

    #[test]
    fn rss_search_filters_and_echoes_days() {
        let now = Utc::now();
        let fresh = RssEntry {
            published_at: now - Duration::days(1),
            ..rss_entry("hn", "a", 1, "Rust 2.0 released")
        };
        let stale = RssEntry {
            published_at: now - Duration::days(25),
            ..rss_entry("hn", "b", 1, "Rust 1.0 retrospective")
        };
        let svc = QueryService::new(
            Arc::new(MemoryTitleStore::new()),
            Arc::new(MemoryRssStore::new(vec![fresh, stale])),
            Arc::new(taxonomy(&[])),
            ServiceConfig::default(),
        );
        let response = svc.search_rss("rust", None, Some(90), None, false);
        assert_eq!(response["success"], true);
        // 90 clamps to 30, so both entries qualify.
        assert_eq!(response["days"], 30);
        assert_eq!(response["total"], 2);
        // Summaries stripped unless requested.
        assert!(response["rss"][0].get("summary").is_none());
    }

    #[test]
    fn rss_status_reports_per_feed() {
        let svc = QueryService::new(
            Arc::new(MemoryTitleStore::new()),
            Arc::new(MemoryRssStore::new(vec![
                rss_entry("hn", "a", 1, "one"),
                rss_entry("hn", "b", 3, "two"),
                rss_entry("36kr", "c", 2, "three"),
            ])),
            Arc::new(taxonomy(&[])),
            ServiceConfig::default(),
        );
        let response = svc.get_rss_feeds_status();
        assert_eq!(response["success"], true);
        assert_eq!(response["total"], 2);
    }

    #[test]
    fn summary_prompt_renders_keyword_groups() {
        let day = date("2025-01-15");
        let store = MemoryTitleStore::new().with_day(
            day,
            snapshot(&[("zhihu", "Zhihu", &[("AI breakthrough", &[1][..])])]),
        );
        let svc = service(store, taxonomy(&["AI"]));
        let response = svc.get_summary_prompt(SummaryQuery {
            date_range: Some(DateExpr::text("2025-01-15")),
            ..Default::default()
        });
        assert_eq!(response["success"], true);
        let prompt = response["prompt"].as_str().unwrap();
        assert!(prompt.contains("## AI (1 items)"));
        assert!(prompt.contains("AI breakthrough (Zhihu)"));
    }
}
