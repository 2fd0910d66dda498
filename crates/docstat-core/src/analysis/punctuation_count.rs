//! Punctuation counting.

use crate::text;

use super::AnalysisKind;
use super::reports::{AnalysisReport, Metric};

/// Build the punctuation-count report for `input`.
#[tracing::instrument(skip_all, fields(text_len = input.len()))]
pub fn analyze_punctuation_count(input: &str) -> AnalysisReport {
    let count = text::count_punctuation(input);
    AnalysisReport {
        kind: AnalysisKind::PunctuationCount,
        word: None,
        metric: Metric::Count(count),
        message: format!("Number of punctuation marks: {count}"),
    }
}
