// LogLens - core/categorizer.rs
//
// Per-line categorisation. Decides whether a line is a categorised log entry
// and, if so, splits it into (category, content).
// Core layer: pure logic, no I/O.

use crate::core::categories;
use crate::core::model::{CategorizerMode, Entry, LogLine};
use crate::util::constants::{CATEGORY_DELIMITER, CATEGORY_PREFIX_MARKER};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Set of category names accepted in closed-vocabulary mode.
#[derive(Debug, Clone)]
pub enum Vocabulary {
    /// The compiled-in list in `core::categories`.
    Builtin,
    /// An explicit set, for alternate deployments and tests.
    Custom(HashSet<String>),
}

impl Vocabulary {
    /// Exact, case-sensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Vocabulary::Builtin => categories::is_known(name),
            Vocabulary::Custom(names) => names.contains(name),
        }
    }
}

/// Categorisation strategy, fixed when the categoriser is built.
#[derive(Debug, Clone)]
pub enum Categorizer {
    /// Category is the whole trimmed pre-colon text, if it is a known name.
    ClosedVocabulary { vocabulary: Vocabulary },

    /// Category is the first `Log<word>` run inside the pre-colon text.
    PatternFallback,
}

impl Categorizer {
    /// Build the categoriser for a configured mode.
    pub fn new(mode: CategorizerMode) -> Self {
        match mode {
            CategorizerMode::ClosedVocabulary => Self::closed_vocabulary(),
            CategorizerMode::PatternFallback => Self::pattern_fallback(),
        }
    }

    /// Closed-vocabulary categoriser over the compiled-in category list.
    pub fn closed_vocabulary() -> Self {
        Self::ClosedVocabulary {
            vocabulary: Vocabulary::Builtin,
        }
    }

    /// Closed-vocabulary categoriser over an explicit name set.
    pub fn with_vocabulary<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ClosedVocabulary {
            vocabulary: Vocabulary::Custom(names.into_iter().map(Into::into).collect()),
        }
    }

    pub fn pattern_fallback() -> Self {
        Self::PatternFallback
    }

    /// The mode this categoriser implements.
    pub fn mode(&self) -> CategorizerMode {
        match self {
            Self::ClosedVocabulary { .. } => CategorizerMode::ClosedVocabulary,
            Self::PatternFallback => CategorizerMode::PatternFallback,
        }
    }

    /// Categorise a single line.
    ///
    /// Returns `None` for blank lines, lines without a delimiter, and lines
    /// whose pre-delimiter text does not satisfy the active policy. None of
    /// these are errors.
    pub fn parse_line(&self, line: &LogLine<'_>) -> Option<Entry> {
        let text = line.text;
        if text.trim().is_empty() {
            return None;
        }

        // Only the first delimiter splits; later colons belong to the content.
        let (raw_head, _) = text.split_once(CATEGORY_DELIMITER)?;
        let head = raw_head.trim();

        // `skip` is a character count into the ORIGINAL line, not into `head`.
        // Leading whitespace trimmed off `head` is therefore not accounted for,
        // and content extraction can start short of the real delimiter. Deployed
        // output depends on this, so it is kept as-is.
        let (category, skip) = match self {
            Self::ClosedVocabulary { vocabulary } => {
                if !vocabulary.contains(head) {
                    return None;
                }
                (head, head.chars().count() + 1)
            }
            Self::PatternFallback => {
                let found = prefix_pattern().find(head)?;
                // Offset = position of the token in `head` + token length + 1.
                // Any text between the token and the colon stays in the content,
                // and text before the token is dropped from both fields.
                let before = head[..found.start()].chars().count();
                (found.as_str(), before + found.as_str().chars().count() + 1)
            }
        };

        Some(Entry {
            category: category.to_string(),
            content: skip_chars(text, skip).trim().to_string(),
            line_number: line.number,
        })
    }
}

/// `<marker><word chars>+`, compiled once.
fn prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let pattern = format!(r"{}\w+", regex::escape(CATEGORY_PREFIX_MARKER));
        // The marker is a compile-time constant; an invalid pattern is a
        // programming error caught by the unit tests below.
        Regex::new(&pattern).expect("category prefix pattern must compile")
    })
}

/// Suffix of `text` after its first `n` characters (empty if shorter).
fn skip_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> LogLine<'_> {
        LogLine::new(1, text)
    }

    fn parsed(categorizer: &Categorizer, text: &str) -> Option<(String, String)> {
        categorizer
            .parse_line(&line(text))
            .map(|e| (e.category, e.content))
    }

    fn pair(category: &str, content: &str) -> Option<(String, String)> {
        Some((category.to_string(), content.to_string()))
    }

    // -------------------------------------------------------------------------
    // Shared rejection rules
    // -------------------------------------------------------------------------

    #[test]
    fn test_lines_without_delimiter_are_dropped_in_both_modes() {
        for categorizer in [Categorizer::closed_vocabulary(), Categorizer::pattern_fallback()] {
            assert_eq!(parsed(&categorizer, "LogTemp Player spawned"), None);
            assert_eq!(parsed(&categorizer, "LogNet"), None);
            assert_eq!(parsed(&categorizer, ""), None);
            assert_eq!(parsed(&categorizer, "   \t "), None);
        }
    }

    #[test]
    fn test_line_number_is_carried_through() {
        let entry = Categorizer::closed_vocabulary()
            .parse_line(&LogLine::new(42, "LogInit: Build: ++UE5+Release-5.3"))
            .unwrap();
        assert_eq!(entry.line_number, 42);
    }

    #[test]
    fn test_new_selects_strategy_by_mode() {
        for mode in CategorizerMode::all() {
            assert_eq!(Categorizer::new(*mode).mode(), *mode);
        }
    }

    // -------------------------------------------------------------------------
    // Closed vocabulary
    // -------------------------------------------------------------------------

    #[test]
    fn test_closed_known_category() {
        let c = Categorizer::closed_vocabulary();
        assert_eq!(
            parsed(&c, "LogTemp: Player spawned"),
            pair("LogTemp", "Player spawned")
        );
    }

    #[test]
    fn test_closed_unknown_category_dropped() {
        let c = Categorizer::closed_vocabulary();
        assert_eq!(parsed(&c, "NotARealCategory: test"), None);
    }

    #[test]
    fn test_closed_is_case_sensitive() {
        let c = Categorizer::closed_vocabulary();
        assert_eq!(parsed(&c, "logtemp: lower"), None);
    }

    #[test]
    fn test_closed_pattern_like_head_not_in_set_is_dropped() {
        let c = Categorizer::closed_vocabulary();
        assert_eq!(parsed(&c, "LogMadeUpSubsystem: hello"), None);
        assert_eq!(parsed(&c, "Foo LogTemp: hello"), None);
    }

    #[test]
    fn test_closed_splits_only_at_first_colon() {
        let c = Categorizer::closed_vocabulary();
        assert_eq!(
            parsed(&c, "LogNet: Browse: 127.0.0.1:7777/Game/Maps/Lobby"),
            pair("LogNet", "Browse: 127.0.0.1:7777/Game/Maps/Lobby")
        );
    }

    #[test]
    fn test_closed_trailing_space_before_colon() {
        // head is trimmed for the lookup; content starts one char past its length
        let c = Categorizer::closed_vocabulary();
        assert_eq!(parsed(&c, "LogTemp : spaced"), pair("LogTemp", ": spaced"));
    }

    #[test]
    fn test_closed_leading_whitespace_offset_is_relative_to_line() {
        let c = Categorizer::closed_vocabulary();
        // head "LogTemp" is 7 chars; skipping 8 chars of "  LogTemp: x" leaves "p: x".
        assert_eq!(parsed(&c, "  LogTemp: x"), pair("LogTemp", "p: x"));
    }

    #[test]
    fn test_closed_empty_content() {
        let c = Categorizer::closed_vocabulary();
        assert_eq!(parsed(&c, "LogExit:"), pair("LogExit", ""));
        assert_eq!(parsed(&c, "LogExit:   "), pair("LogExit", ""));
    }

    #[test]
    fn test_closed_custom_vocabulary() {
        let c = Categorizer::with_vocabulary(["Net", "AI"]);
        assert_eq!(parsed(&c, "AI: thinking"), pair("AI", "thinking"));
        assert_eq!(parsed(&c, "LogTemp: builtin not included"), None);
    }

    #[test]
    fn test_closed_non_ascii_content() {
        let c = Categorizer::closed_vocabulary();
        assert_eq!(
            parsed(&c, "LogTemp: Spieler größer ✓"),
            pair("LogTemp", "Spieler größer ✓")
        );
    }

    // -------------------------------------------------------------------------
    // Pattern fallback
    // -------------------------------------------------------------------------

    #[test]
    fn test_fallback_discards_text_before_token() {
        let c = Categorizer::pattern_fallback();
        assert_eq!(
            parsed(&c, "Foo LogTemp: Hello world"),
            pair("LogTemp", "Hello world")
        );
    }

    #[test]
    fn test_fallback_accepts_names_outside_vocabulary() {
        let c = Categorizer::pattern_fallback();
        assert_eq!(
            parsed(&c, "LogMyGameplay: combo x3"),
            pair("LogMyGameplay", "combo x3")
        );
    }

    #[test]
    fn test_fallback_timestamped_engine_line() {
        let c = Categorizer::pattern_fallback();
        assert_eq!(
            parsed(&c, "[2024.01.15-14.30.22:123][  0]LogInit: Display: Running engine"),
            None,
            "first colon is inside the timestamp, so head has no Log token"
        );
        assert_eq!(
            parsed(&c, "[2024.01.15-14.30.22][  0]LogInit: Running engine"),
            pair("LogInit", "Running engine")
        );
    }

    #[test]
    fn test_fallback_requires_word_char_after_marker() {
        let c = Categorizer::pattern_fallback();
        assert_eq!(parsed(&c, "Log: bare marker"), None);
        assert_eq!(parsed(&c, "PacketHandlerLog: tail marker"), None);
        assert_eq!(parsed(&c, "Display: no marker"), None);
    }

    #[test]
    fn test_fallback_marker_is_case_sensitive() {
        let c = Categorizer::pattern_fallback();
        assert_eq!(parsed(&c, "logtemp: lower"), None);
    }

    #[test]
    fn test_fallback_takes_first_match_greedily() {
        let c = Categorizer::pattern_fallback();
        assert_eq!(
            parsed(&c, "LogNet_2 LogTemp: msg"),
            // token "LogNet_2" ends at 8; content starts at char 9 of the line
            pair("LogNet_2", "LogTemp: msg")
        );
    }

    #[test]
    fn test_fallback_text_after_token_stays_in_content() {
        let c = Categorizer::pattern_fallback();
        assert_eq!(
            parsed(&c, "LogTemp Warning: low memory"),
            pair("LogTemp", "Warning: low memory")
        );
    }

    #[test]
    fn test_fallback_token_embedded_in_word() {
        let c = Categorizer::pattern_fallback();
        assert_eq!(parsed(&c, "MyLogger: started"), pair("Logger", "started"));
    }

    #[test]
    fn test_fallback_multibyte_head_uses_char_offsets() {
        let c = Categorizer::pattern_fallback();
        assert_eq!(parsed(&c, "é LogTemp: ok"), pair("LogTemp", "ok"));
    }

    #[test]
    fn test_skip_chars_past_end_is_empty() {
        assert_eq!(skip_chars("abc", 3), "");
        assert_eq!(skip_chars("abc", 10), "");
        assert_eq!(skip_chars("abc", 1), "bc");
    }
}
