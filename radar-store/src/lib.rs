//! Storage collaborators for NewsRadar
//!
//! Defines the contracts the query layer consumes (the title store, the
//! taxonomy loader and the RSS store) plus file-backed implementations
//! that read the scraper's JSON output and in-memory implementations for
//! tests and embedding.

pub mod rss_store;
pub mod taxonomy_loader;
pub mod title_store;

pub use rss_store::{FileRssStore, MemoryRssStore, RssStore};
pub use taxonomy_loader::{FileTaxonomyLoader, StaticTaxonomy, TaxonomyLoader};
pub use title_store::{FileTitleStore, MemoryTitleStore, TitleStore};
