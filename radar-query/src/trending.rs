//! Trending topic aggregation
//!
//! Computes top-N term frequency statistics over a snapshot. The time
//! window (`current` vs `daily`) is decided by which snapshot the caller
//! read; this module only sees titles. Extraction is either restricted to
//! curated taxonomy terms or delegated to a [`Segmenter`].

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use radar_core::{DailySnapshot, KeywordGroup};

use crate::segment::Segmenter;

/// How candidate terms are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Count occurrences of curated taxonomy terms only
    Keywords,
    /// Derive candidate terms from title text via the segmenter
    AutoExtract,
}

/// One trending term with its frequency and a few contributing titles
#[derive(Debug, Clone, Serialize)]
pub struct TrendingTopic {
    pub term: String,
    pub count: usize,
    pub sample_titles: Vec<String>,
}

const MAX_SAMPLE_TITLES: usize = 3;

/// Top-N terms by descending frequency, ties by first occurrence
pub fn trending_topics(
    snapshot: &DailySnapshot,
    taxonomy: &[KeywordGroup],
    segmenter: &dyn Segmenter,
    top_n: usize,
    extract_mode: ExtractMode,
) -> Vec<TrendingTopic> {
    let titles: Vec<&str> = snapshot
        .titles_by_platform
        .values()
        .flatten()
        .map(|record| record.title.as_str())
        .collect();

    let mut topics = match extract_mode {
        ExtractMode::Keywords => count_curated_terms(&titles, taxonomy),
        ExtractMode::AutoExtract => count_extracted_terms(&titles, segmenter),
    };

    debug!(
        "{} candidate terms over {} titles, returning top {top_n}",
        topics.len(),
        titles.len()
    );

    // Stable sort: equal counts keep first-occurrence order.
    topics.sort_by(|a, b| b.count.cmp(&a.count));
    topics.truncate(top_n);
    topics
}

/// Count titles containing each curated term, scanning titles in order so
/// bucket creation follows first occurrence
fn count_curated_terms(titles: &[&str], taxonomy: &[KeywordGroup]) -> Vec<TrendingTopic> {
    let mut terms: Vec<&str> = Vec::new();
    for group in taxonomy {
        for term in group.candidate_terms() {
            if !term.is_empty() && !terms.contains(&term.as_str()) {
                terms.push(term.as_str());
            }
        }
    }

    let mut topics: IndexMap<&str, TrendingTopic> = IndexMap::new();
    for title in titles {
        for term in &terms {
            if title.contains(term) {
                let topic = topics.entry(term).or_insert_with(|| TrendingTopic {
                    term: term.to_string(),
                    count: 0,
                    sample_titles: Vec::new(),
                });
                topic.count += 1;
                if topic.sample_titles.len() < MAX_SAMPLE_TITLES {
                    topic.sample_titles.push(title.to_string());
                }
            }
        }
    }
    topics.into_values().collect()
}

fn count_extracted_terms(titles: &[&str], segmenter: &dyn Segmenter) -> Vec<TrendingTopic> {
    segmenter
        .extract_terms(titles)
        .into_iter()
        .map(|(term, count)| {
            let sample_titles = titles
                .iter()
                .filter(|title| title.to_lowercase().contains(&term))
                .take(MAX_SAMPLE_TITLES)
                .map(|title| title.to_string())
                .collect();
            TrendingTopic {
                term,
                count,
                sample_titles,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::WordSegmenter;
    use radar_core::{Term, TitleRecord};

    fn snapshot(titles: &[&str]) -> DailySnapshot {
        let mut snap = DailySnapshot::default();
        snap.titles_by_platform.insert(
            "p1".to_string(),
            titles
                .iter()
                .enumerate()
                .map(|(i, title)| TitleRecord {
                    title: title.to_string(),
                    platform_id: "p1".to_string(),
                    ranks: vec![i as u32 + 1],
                    url: None,
                    mobile_url: None,
                })
                .collect(),
        );
        snap
    }

    fn taxonomy(terms: &[&str]) -> Vec<KeywordGroup> {
        vec![KeywordGroup {
            required: Vec::new(),
            normal: terms.iter().map(|term| Term::new(*term)).collect(),
        }]
    }

    #[test]
    fn curated_terms_are_counted_and_ranked() {
        let snap = snapshot(&["AI wins", "AI stumbles", "rocket lands"]);
        let topics = trending_topics(
            &snap,
            &taxonomy(&["AI", "rocket"]),
            &WordSegmenter::new(),
            10,
            ExtractMode::Keywords,
        );
        assert_eq!(topics[0].term, "AI");
        assert_eq!(topics[0].count, 2);
        assert_eq!(topics[1].term, "rocket");
        assert_eq!(topics[1].count, 1);
    }

    #[test]
    fn ties_break_by_first_occurrence() {
        let snap = snapshot(&["rocket lands", "AI wins"]);
        let topics = trending_topics(
            &snap,
            &taxonomy(&["AI", "rocket"]),
            &WordSegmenter::new(),
            10,
            ExtractMode::Keywords,
        );
        // Both count 1; "rocket" matched the earlier title.
        assert_eq!(topics[0].term, "rocket");
        assert_eq!(topics[1].term, "AI");
    }

    #[test]
    fn top_n_truncates() {
        let snap = snapshot(&["AI rocket chip"]);
        let topics = trending_topics(
            &snap,
            &taxonomy(&["AI", "rocket", "chip"]),
            &WordSegmenter::new(),
            2,
            ExtractMode::Keywords,
        );
        assert_eq!(topics.len(), 2);
    }

    #[test]
    fn samples_are_capped() {
        let snap = snapshot(&["AI a", "AI b", "AI c", "AI d"]);
        let topics = trending_topics(
            &snap,
            &taxonomy(&["AI"]),
            &WordSegmenter::new(),
            10,
            ExtractMode::Keywords,
        );
        assert_eq!(topics[0].count, 4);
        assert_eq!(topics[0].sample_titles.len(), 3);
    }

    #[test]
    fn auto_extract_uses_the_segmenter() {
        let snap = snapshot(&["quantum leap announced", "quantum funding grows"]);
        let topics = trending_topics(
            &snap,
            &[],
            &WordSegmenter::new(),
            5,
            ExtractMode::AutoExtract,
        );
        assert_eq!(topics[0].term, "quantum");
        assert_eq!(topics[0].count, 2);
        assert!(!topics[0].sample_titles.is_empty());
    }

    #[test]
    fn duplicate_terms_across_groups_count_once() {
        let snap = snapshot(&["AI wins"]);
        let mut groups = taxonomy(&["AI"]);
        groups.extend(taxonomy(&["AI"]));
        let topics = trending_topics(
            &snap,
            &groups,
            &WordSegmenter::new(),
            10,
            ExtractMode::Keywords,
        );
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].count, 1);
    }
}
