//! Sentence counting.

use crate::text;

use super::AnalysisKind;
use super::reports::{AnalysisReport, Metric};

/// Count sentences as non-blank fragments between terminator runs.
///
/// Text without any `.`, `!` or `?` has no sentences.
pub fn count_sentences(input: &str) -> usize {
    if !text::has_sentence_terminator(input) {
        return 0;
    }
    text::sentence_fragments(input).len()
}

/// Build the sentence-count report for `input`.
#[tracing::instrument(skip_all, fields(text_len = input.len()))]
pub fn analyze_sentence_count(input: &str) -> AnalysisReport {
    let count = count_sentences(input);
    AnalysisReport {
        kind: AnalysisKind::SentenceCount,
        word: None,
        metric: Metric::Count(count),
        message: format!("Number of sentences: {count}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_terminators() {
        assert_eq!(count_sentences("One. Two! Three?"), 3);
    }

    #[test]
    fn empty_input() {
        assert_eq!(count_sentences(""), 0);
        assert_eq!(count_sentences("   \n "), 0);
    }

    #[test]
    fn no_terminators() {
        assert_eq!(count_sentences("No terminators here"), 0);
    }

    #[test]
    fn terminator_runs_count_once() {
        assert_eq!(count_sentences("Really?!? Yes... Fine."), 3);
    }

    #[test]
    fn trailing_fragment_counts_once_text_is_punctuated() {
        assert_eq!(count_sentences("First one. And a tail"), 2);
    }

    #[test]
    fn bare_punctuation_has_no_sentences() {
        assert_eq!(count_sentences("... !!! ??"), 0);
    }

    #[test]
    fn report_message() {
        let report = analyze_sentence_count("One. Two! Three?");
        assert_eq!(report.message, "Number of sentences: 3");
        assert_eq!(report.metric, Metric::Count(3));
        assert!(report.word.is_none());
    }
}
