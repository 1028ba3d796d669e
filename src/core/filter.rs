// LogLens - core/filter.rs
//
// Category selection over parsed entries.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::level::{self, LogLevel};
use crate::core::model::Entry;
use std::collections::HashSet;

/// Entry selection: categories, levels and a content search term.
///
/// Each part is optional; an empty part does not constrain. All non-empty
/// parts must match for an entry to pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Selected category names. Empty means "all categories".
    pub selected: HashSet<String>,

    /// Selected levels. Empty means "any level, including none".
    /// When non-empty, entries with no detectable level are excluded.
    pub levels: HashSet<LogLevel>,

    /// Lowercased search term, matched as a substring of lowercased content.
    pub search: Option<String>,
}

impl CategoryFilter {
    /// Build a filter from any collection of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Restrict to the given levels.
    pub fn with_levels<I>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = LogLevel>,
    {
        self.levels = levels.into_iter().collect();
        self
    }

    /// Restrict to entries whose content contains `term`, ignoring case.
    /// A blank term is ignored.
    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = if term.is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        };
        self
    }

    /// Returns true if nothing is constrained (the filter passes everything).
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.levels.is_empty() && self.search.is_none()
    }

    /// Check whether a single entry passes the filter.
    pub fn matches(&self, entry: &Entry) -> bool {
        if !self.selected.is_empty() && !self.selected.contains(&entry.category) {
            return false;
        }

        if !self.levels.is_empty() {
            match level::detect(&entry.content) {
                Some(found) if self.levels.contains(&found) => {}
                _ => return false,
            }
        }

        match &self.search {
            Some(term) => entry.content.to_lowercase().contains(term.as_str()),
            None => true,
        }
    }
}

/// Keep only the entries that pass the filter, in original order.
///
/// Entries are moved, never cloned or modified.
pub fn filter_entries(entries: Vec<Entry>, filter: &CategoryFilter) -> Vec<Entry> {
    if filter.is_empty() {
        return entries;
    }
    entries.into_iter().filter(|e| filter.matches(e)).collect()
}
