//! Recent search queries.

use serde::{Deserialize, Serialize};

/// Maximum number of remembered queries.
pub const MAX_ENTRIES: usize = 10;

/// Most-recent-first list of search queries.
///
/// Queries are compared case-insensitively; searching again for a known query
/// moves it to the front with the newest spelling. Serializes as the JSON
/// array kept in device storage; decoding normalizes like
/// [`SearchHistory::from_entries`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    /// Build from stored entries, applying the same dedup and cap as
    /// [`SearchHistory::record`].
    #[must_use]
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut history = Self::default();
        for entry in entries.into_iter().rev() {
            history.record(&entry);
        }
        history
    }

    /// Remember a query. Blank queries are ignored. Returns whether the
    /// history changed.
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        if self.entries.first().is_some_and(|e| e == query) {
            return false;
        }
        self.remove(query);
        self.entries.insert(0, query.to_owned());
        self.entries.truncate(MAX_ENTRIES);
        true
    }

    /// Forget a query (case-insensitive). Returns whether anything was removed.
    pub fn remove(&mut self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        let before = self.entries.len();
        self.entries.retain(|e| e.to_lowercase() != needle);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl From<Vec<String>> for SearchHistory {
    fn from(entries: Vec<String>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<SearchHistory> for Vec<String> {
    fn from(history: SearchHistory) -> Self {
        history.entries
    }
}
