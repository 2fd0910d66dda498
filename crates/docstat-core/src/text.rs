//! Text processing utilities.
//!
//! Provides word tokenization, sentence fragment splitting, and punctuation
//! scanning for use by the analysis strategies.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for word tokens: maximal runs of word characters.
///
/// `\w` is Unicode-aware, so letters from any script count, as do digits
/// and underscores.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Regex for runs of sentence-terminal punctuation.
static TERMINATOR_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Extract case-folded word tokens from text.
///
/// Punctuation and whitespace both act as separators, so `"don't"` yields
/// `["don", "t"]`.
pub fn extract_tokens(text: &str) -> Vec<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Split text on runs of `.`, `!` and `?`, dropping blank fragments.
///
/// Returned fragments are trimmed.
pub fn sentence_fragments(text: &str) -> Vec<&str> {
    TERMINATOR_RUN_PATTERN
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Whether the text contains at least one sentence terminator.
pub fn has_sentence_terminator(text: &str) -> bool {
    text.chars().any(is_sentence_terminator)
}

/// Count punctuation marks, each character counted on its own.
pub fn count_punctuation(text: &str) -> usize {
    text.chars().filter(|&ch| is_punctuation_mark(ch)).count()
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Comma, period, exclamation, question mark, semicolon, colon, em-dash.
pub const fn is_punctuation_mark(ch: char) -> bool {
    matches!(ch, ',' | '.' | '!' | '?' | ';' | ':' | '\u{2014}')
}
