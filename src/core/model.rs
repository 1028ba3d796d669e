// LogLens - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// JSON field names (`type`, `content`, `log_types`) match what the browser
// front-end has always consumed, so the Rust names and the wire names differ.

use crate::core::level::LevelCounts;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Raw input
// =============================================================================

/// One line of the source file and its 1-based position in it.
///
/// Borrowed from the decoded file content; never modified after splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    /// 1-based line number in the source file.
    pub number: u64,

    /// Line text without the trailing newline.
    pub text: &'a str,
}

impl<'a> LogLine<'a> {
    pub fn new(number: u64, text: &'a str) -> Self {
        Self { number, text }
    }
}

// =============================================================================
// Parsed output
// =============================================================================

/// A successfully categorised log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Category tag, e.g. `LogTemp`. Never empty, never contains whitespace.
    #[serde(rename = "type")]
    pub category: String,

    /// Message text following the category delimiter, trimmed.
    pub content: String,

    /// Line number of the source line this entry came from.
    #[serde(rename = "line")]
    pub line_number: u64,
}

/// Number of entries seen for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    #[serde(rename = "type")]
    pub category: String,

    /// Always at least 1; categories with no entries are not reported.
    pub count: usize,
}

// =============================================================================
// Categoriser mode
// =============================================================================

/// Which categorisation policy a deployment runs with.
///
/// Chosen once at startup from config or CLI; never per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CategorizerMode {
    /// Only names in the compiled-in vocabulary are categories.
    #[default]
    ClosedVocabulary,

    /// Any `Log<word>` token before the first colon is a category.
    PatternFallback,
}

impl CategorizerMode {
    /// All modes, in documentation order.
    pub fn all() -> &'static [CategorizerMode] {
        &[
            CategorizerMode::ClosedVocabulary,
            CategorizerMode::PatternFallback,
        ]
    }

    /// Config/CLI spelling of the mode.
    pub fn label(&self) -> &'static str {
        match self {
            CategorizerMode::ClosedVocabulary => "closed-vocabulary",
            CategorizerMode::PatternFallback => "pattern-fallback",
        }
    }
}

impl fmt::Display for CategorizerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategorizerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.label() == wanted)
            .ok_or_else(|| {
                format!("unknown mode \"{s}\"; expected \"closed-vocabulary\" or \"pattern-fallback\"")
            })
    }
}

// =============================================================================
// Request results
// =============================================================================

/// Result of ingesting a whole uploaded file.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    /// Sanitised name the upload is stored under; pass it back to filter.
    pub filename: String,

    /// Every categorised entry in file order.
    pub entries: Vec<Entry>,

    /// Per-category counts, ascending by category name.
    pub log_types: Vec<CategoryCount>,

    /// Entries per detected level across the whole file.
    pub log_levels: LevelCounts,

    /// Number of physical lines read, including dropped ones.
    pub lines_processed: u64,

    pub uploaded_at: DateTime<Utc>,
}

/// Result of re-parsing a stored upload and selecting categories from it.
#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    pub entries: Vec<Entry>,

    /// Entries per detected level among the kept entries.
    pub log_levels: LevelCounts,
}
