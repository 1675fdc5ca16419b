//! Search input handling

use serde::Serialize;

/// What a change of the search phrase asks the search service to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum SearchQuery {
    /// Input emptied: clear popover results
    Clear,
    /// Run a popover search
    Search { phrase: String, page_size: u32 },
}

impl SearchQuery {
    /// Map an input value to a query.
    ///
    /// Returns `None` for phrases shorter than `min_len` characters, which
    /// leave the current results untouched.
    #[must_use]
    pub fn from_phrase(phrase: &str, min_len: usize, page_size: u32) -> Option<Self> {
        if phrase.is_empty() {
            return Some(Self::Clear);
        }
        if phrase.chars().count() < min_len {
            return None;
        }
        Some(Self::Search {
            phrase: phrase.to_string(),
            page_size,
        })
    }
}
