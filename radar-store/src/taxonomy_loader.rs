//! Keyword taxonomy loader
//!
//! The taxonomy is deliberately re-read on every invocation so edits to the
//! keyword configuration take effect immediately. Reintroducing a cache
//! would need an explicit invalidation signal, not a TTL.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use radar_core::{KeywordGroup, RadarError, RadarResult};

/// Source of the ordered keyword group list
pub trait TaxonomyLoader: Send + Sync {
    /// Parse the current keyword configuration, freshly, in file order
    fn parse_frequency_words(&self) -> RadarResult<Vec<KeywordGroup>>;
}

/// Loads keyword groups from a JSON file
///
/// The file is an array of `{"required": [...], "normal": [...]}` objects
/// where each element is either a bare string or `{"word": "..."}`.
pub struct FileTaxonomyLoader {
    path: PathBuf,
}

impl FileTaxonomyLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TaxonomyLoader for FileTaxonomyLoader {
    fn parse_frequency_words(&self) -> RadarResult<Vec<KeywordGroup>> {
        if !self.path.is_file() {
            // A missing taxonomy means no curated keywords, not a failure.
            debug!("taxonomy file {} missing, using empty taxonomy", self.path.display());
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path)
            .map_err(|e| RadarError::store(format!("cannot read {}: {e}", self.path.display())))?;
        let groups: Vec<KeywordGroup> = serde_json::from_slice(&bytes).map_err(|e| {
            RadarError::store(format!("malformed taxonomy {}: {e}", self.path.display()))
        })?;
        debug!("loaded {} keyword groups", groups.len());
        Ok(groups)
    }
}

/// Fixed in-memory taxonomy for tests and embedding
pub struct StaticTaxonomy(pub Vec<KeywordGroup>);

impl TaxonomyLoader for StaticTaxonomy {
    fn parse_frequency_words(&self) -> RadarResult<Vec<KeywordGroup>> {
        Ok(self.0.clone())
    }
}
