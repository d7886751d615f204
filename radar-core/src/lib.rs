//! Core types for the NewsRadar query engine
//!
//! This crate defines the shared data structures used across the radar
//! workspace: scraped title records, their per-request projections, keyword
//! taxonomy types, RSS entries, and the error taxonomy.

pub mod dates;
pub mod error;
pub mod news;
pub mod rss;
pub mod taxonomy;

pub use dates::DateRange;
pub use error::{RadarError, RadarResult};
pub use news::{DailySnapshot, NewsGroup, NewsItem, PlatformRecord, TitleRecord};
pub use rss::{FeedStatus, RssEntry};
pub use taxonomy::{KeywordGroup, Term};
