//! Grouping engine
//!
//! Matches scraped titles against the keyword taxonomy and against platform
//! identity, producing the ordered, capped groups that feed AI
//! summarization.
//!
//! Buckets are keyed by the individual matched term, not by the group it
//! came from: a title matching two terms of the same group appears in two
//! buckets. Downstream summarization depends on this, so it is preserved
//! deliberately.

use indexmap::IndexMap;
use tracing::debug;

use radar_core::{DailySnapshot, KeywordGroup, NewsGroup, NewsItem};

/// Target grouping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Keyword,
    Platform,
}

/// Knobs for one grouping run
#[derive(Debug, Clone)]
pub struct GroupingOptions {
    pub group_by: GroupBy,
    /// Per-group item cap; the reported count stays pre-cap
    pub max_per_group: usize,
    pub include_url: bool,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            group_by: GroupBy::Keyword,
            max_per_group: 10,
            include_url: false,
        }
    }
}

/// Both grouping axes for one snapshot
///
/// Platform groups are always populated regardless of the requested mode;
/// keyword groups are empty when the taxonomy is.
#[derive(Debug, Clone)]
pub struct SummaryGrouping {
    pub keyword_groups: Vec<NewsGroup>,
    pub platform_groups: Vec<NewsGroup>,
}

impl SummaryGrouping {
    /// The axis the caller asked for
    pub fn selected(&self, group_by: GroupBy) -> &[NewsGroup] {
        match group_by {
            GroupBy::Keyword => &self.keyword_groups,
            GroupBy::Platform => &self.platform_groups,
        }
    }
}

/// Group one day's titles by matched keyword term and by platform
///
/// Titles are scanned in platform insertion order, then record order; that
/// encounter order is the tie-break everywhere, which keeps the output
/// deterministic without re-sorting on insertion time.
pub fn group_for_summary(
    snapshot: &DailySnapshot,
    taxonomy: &[KeywordGroup],
    options: &GroupingOptions,
) -> SummaryGrouping {
    let mut keyword_buckets: IndexMap<String, Vec<NewsItem>> = IndexMap::new();
    let mut platform_buckets: IndexMap<String, Vec<NewsItem>> = IndexMap::new();

    for (platform_id, records) in &snapshot.titles_by_platform {
        let source_name = snapshot.platform_name(platform_id);
        for record in records {
            let item = NewsItem::project(record, source_name, options.include_url);

            platform_buckets
                .entry(platform_id.clone())
                .or_default()
                .push(item.clone());

            for group in taxonomy {
                for term in group.candidate_terms() {
                    // Case-sensitive containment, not word-boundary matching.
                    if !term.is_empty() && record.title.contains(term.as_str()) {
                        keyword_buckets
                            .entry(term.as_str().to_string())
                            .or_default()
                            .push(item.clone());
                    }
                }
            }
        }
    }

    debug!(
        "grouped {} titles into {} keyword buckets, {} platform buckets",
        snapshot.title_count(),
        keyword_buckets.len(),
        platform_buckets.len()
    );

    SummaryGrouping {
        keyword_groups: finalize(keyword_buckets, options.max_per_group),
        platform_groups: finalize(platform_buckets, options.max_per_group),
    }
}

/// Order buckets by descending size, order members by ascending rank, and
/// truncate to the cap. All sorts are stable so encounter order breaks
/// ties.
fn finalize(buckets: IndexMap<String, Vec<NewsItem>>, cap: usize) -> Vec<NewsGroup> {
    let mut groups: Vec<NewsGroup> = buckets
        .into_iter()
        .map(|(key, mut items)| {
            items.sort_by_key(|item| item.rank);
            let count = items.len();
            items.truncate(cap);
            NewsGroup { key, count, items }
        })
        .collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}
