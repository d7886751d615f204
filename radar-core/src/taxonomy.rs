//! Keyword taxonomy types
//!
//! The taxonomy file is partially structured: a term can be either a bare
//! string or a `{"word": "..."}` object. Both shapes are normalized into
//! [`Term`] at ingestion so nothing downstream ever branches on shape.

use serde::de::{Deserialize, Deserializer};
use serde::Serialize;

/// A single curated keyword term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Term(String);

impl Term {
    pub fn new(word: impl Into<String>) -> Self {
        Term(word.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accepts "ai" and {"word": "ai"} interchangeably.
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum TermSpec {
            Plain(String),
            Worded { word: String },
        }

        let spec = TermSpec::deserialize(deserializer)?;
        Ok(match spec {
            TermSpec::Plain(word) | TermSpec::Worded { word } => Term(word),
        })
    }
}

/// A label-less bucket of curated terms
///
/// For matching purposes the `required` and `normal` sets are flattened
/// into one candidate list via [`KeywordGroup::candidate_terms`].
#[derive(Debug, Clone, Default, Serialize, serde::Deserialize)]
pub struct KeywordGroup {
    #[serde(default)]
    pub required: Vec<Term>,
    #[serde(default)]
    pub normal: Vec<Term>,
}

impl KeywordGroup {
    /// All candidate terms in order: required first, then normal
    pub fn candidate_terms(&self) -> impl Iterator<Item = &Term> {
        self.required.iter().chain(self.normal.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_deserializes_from_both_shapes() {
        let plain: Term = serde_json::from_str(r#""AI""#).unwrap();
        let worded: Term = serde_json::from_str(r#"{"word": "AI"}"#).unwrap();
        assert_eq!(plain, worded);
        assert_eq!(plain.as_str(), "AI");
    }

    #[test]
    fn group_flattens_required_then_normal() {
        let group: KeywordGroup = serde_json::from_str(
            r#"{"required": [{"word": "chip"}], "normal": ["AI", "model"]}"#,
        )
        .unwrap();
        let terms: Vec<&str> = group.candidate_terms().map(Term::as_str).collect();
        assert_eq!(terms, vec!["chip", "AI", "model"]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let group: KeywordGroup = serde_json::from_str(r#"{"normal": ["AI"]}"#).unwrap();
        assert!(group.required.is_empty());
        assert_eq!(group.candidate_terms().count(), 1);
    }
}
