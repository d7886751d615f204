//! Query algorithms for NewsRadar
//!
//! This crate holds the pieces between the stores and the facade:
//! - date expression resolution into canonical ranges
//! - the keyword/platform grouping engine feeding AI summarization
//! - the trending topic aggregator and its term segmenter
//! - the summary prompt builder

pub mod date;
pub mod grouping;
pub mod prompt;
pub mod segment;
pub mod trending;

pub use date::{resolve_date_range, DateExpr};
pub use grouping::{group_for_summary, GroupBy, GroupingOptions, SummaryGrouping};
pub use prompt::build_summary_prompt;
pub use segment::{Segmenter, WordSegmenter};
pub use trending::{trending_topics, ExtractMode, TrendingTopic};
