//! Term segmentation for auto-extracted trending topics
//!
//! The trending aggregator's `auto_extract` mode delegates candidate term
//! derivation to a [`Segmenter`] so a heavier tokenizer can be plugged in
//! without touching the aggregation logic.

use std::collections::HashSet;

use indexmap::IndexMap;
use regex::Regex;

/// Derives candidate high-frequency terms from raw title text
pub trait Segmenter: Send + Sync {
    /// Returns `(term, document_frequency)` pairs in first-occurrence order
    ///
    /// Document frequency counts titles containing the term, not total
    /// occurrences.
    fn extract_terms(&self, titles: &[&str]) -> Vec<(String, usize)>;
}

/// Default regex-based segmenter
///
/// Splits titles into lowercase word tokens, drops short tokens and
/// stopwords, and counts per-title document frequency.
pub struct WordSegmenter {
    token_pattern: Regex,
    stopwords: HashSet<&'static str>,
    min_token_len: usize,
}

impl WordSegmenter {
    pub fn new() -> Self {
        let stopwords: HashSet<&'static str> = [
            "the", "and", "for", "that", "this", "with", "from", "says", "said", "will", "would",
            "could", "should", "about", "after", "before", "into", "over", "under", "more", "most",
            "than", "been", "being", "have", "has", "had", "were", "was", "are", "what", "when",
            "where", "which", "who", "why", "how", "their", "there", "these", "those", "some",
            "just", "also", "not", "but", "his", "her", "its", "our", "your", "they", "them",
            "amid", "against", "between", "during", "while", "because", "since", "until", "then",
            "here", "now", "new", "news", "report", "reports", "update", "breaking", "live",
            "watch", "today", "first", "last", "year", "years", "day", "days", "out", "off",
            "may", "can", "all", "one", "two", "you", "get", "gets", "got", "back", "top", "big",
        ]
        .into_iter()
        .collect();

        Self {
            // Latin words plus runs of CJK characters; scraped titles mix both.
            token_pattern: Regex::new(r"[A-Za-z][A-Za-z0-9']*|[\p{Han}]{2,}")
                .expect("static token pattern compiles"),
            stopwords,
            min_token_len: 2,
        }
    }
}

impl Default for WordSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter for WordSegmenter {
    fn extract_terms(&self, titles: &[&str]) -> Vec<(String, usize)> {
        let mut frequencies: IndexMap<String, usize> = IndexMap::new();

        for title in titles {
            let mut seen_in_title: HashSet<String> = HashSet::new();
            for token in self.token_pattern.find_iter(title) {
                let term = token.as_str().to_lowercase();
                if term.chars().count() < self.min_token_len
                    || self.stopwords.contains(term.as_str())
                {
                    continue;
                }
                if seen_in_title.insert(term.clone()) {
                    *frequencies.entry(term).or_insert(0) += 1;
                }
            }
        }

        frequencies.into_iter().collect()
    }
}
