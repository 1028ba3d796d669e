// LogLens - core/parser.rs
//
// Whole-file parsing: decode bytes, split into lines, categorise each line.
// Core layer: accepts already-read content, never touches the filesystem.

use crate::core::categorizer::Categorizer;
use crate::core::model::{Entry, LogLine};
use crate::util::logging::preview;

/// Result of parsing one file's content.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Categorised entries in line order.
    pub entries: Vec<Entry>,
    /// Total lines processed.
    pub lines_processed: u64,
    /// Lines that produced no entry (blank, no delimiter, or no category).
    pub lines_skipped: u64,
}

/// Decode raw upload bytes as text.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected, so a
/// single corrupt byte never costs the whole file.
pub fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Split text into numbered lines.
///
/// `\n`, `\r\n` and a bare `\r` all end a line, so old Mac-style files and
/// mixed endings number the same way a text-mode reader would. A trailing
/// terminator does not produce an extra empty line.
pub fn split_lines(content: &str) -> Vec<LogLine<'_>> {
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        let (text, next) = match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(idx) => {
                let width = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                (&rest[..idx], &rest[idx + width..])
            }
            None => (rest, ""),
        };
        lines.push(LogLine::new(lines.len() as u64 + 1, text));
        rest = next;
    }

    lines
}

/// Categorise every line of `content` in a single pass.
pub fn parse_content(content: &str, categorizer: &Categorizer) -> ParseResult {
    let mut result = ParseResult::default();

    for line in split_lines(content) {
        result.lines_processed += 1;
        match categorizer.parse_line(&line) {
            Some(entry) => result.entries.push(entry),
            None => {
                result.lines_skipped += 1;
                tracing::trace!(
                    line = line.number,
                    text = preview(line.text),
                    "Line not categorised"
                );
            }
        }
    }

    tracing::debug!(
        mode = %categorizer.mode(),
        entries = result.entries.len(),
        skipped = result.lines_skipped,
        lines = result.lines_processed,
        "Parsing complete"
    );

    result
}

/// Decode and parse raw bytes in one step.
pub fn parse_bytes(bytes: &[u8], categorizer: &Categorizer) -> ParseResult {
    parse_content(&decode(bytes), categorizer)
}
