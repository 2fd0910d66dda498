//! Relative word frequency.

use std::collections::HashMap;

use crate::text;

use super::AnalysisKind;
use super::reports::{AnalysisReport, Metric};

/// Relative frequency of one target word among all word tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFrequency {
    word: String,
}

impl WordFrequency {
    /// Create the strategy for `word`.
    ///
    /// The word is trimmed and case-folded here, once, so every later
    /// comparison is against lowercase tokens.
    pub fn new(word: &str) -> Self {
        Self {
            word: word.trim().to_lowercase(),
        }
    }

    /// The case-folded target word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Compute `count(word) / total_tokens`, or `0.0` for token-free text.
    #[allow(clippy::cast_precision_loss)]
    pub fn frequency(&self, input: &str) -> f64 {
        let tokens = text::extract_tokens(input);
        if tokens.is_empty() {
            return 0.0;
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in &tokens {
            *counts.entry(token.as_str()).or_default() += 1;
        }

        let hits = counts.get(self.word.as_str()).copied().unwrap_or(0);
        hits as f64 / tokens.len() as f64
    }

    /// Build the full report for `input`.
    #[tracing::instrument(skip_all, fields(word = %self.word, text_len = input.len()))]
    pub fn evaluate(&self, input: &str) -> AnalysisReport {
        let frequency = self.frequency(input);
        AnalysisReport {
            kind: AnalysisKind::WordFrequency,
            word: Some(self.word.clone()),
            metric: Metric::Ratio(frequency),
            message: format!("Relative frequency of '{}': {frequency:.4}", self.word),
        }
    }
}
