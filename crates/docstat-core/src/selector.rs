//! Strategy selection.
//!
//! Turns a selection key plus an optional word into a concrete
//! [`Strategy`] and runs it. No selection is not an error: it produces a
//! prompt and leaves the log alone.

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisKind, AnalysisReport, Strategy};
use crate::log::AnalysisLog;

/// Message shown when no analysis kind has been chosen.
pub const CHOOSE_STRATEGY_PROMPT: &str = "Choose an analysis strategy";

/// What the user asked for: a kind (maybe) and a target word (maybe).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Selected analysis kind, if any.
    pub kind: Option<AnalysisKind>,
    /// Target word for word frequency.
    pub word: Option<String>,
}

impl AnalysisRequest {
    /// A request for `kind` with no word.
    pub const fn new(kind: AnalysisKind) -> Self {
        Self {
            kind: Some(kind),
            word: None,
        }
    }

    /// Build a request from a free-form label.
    ///
    /// Unrecognized labels produce a request with no kind.
    pub fn from_label(label: &str, word: Option<String>) -> Self {
        Self {
            kind: AnalysisKind::from_label(label),
            word,
        }
    }

    /// Set the target word.
    #[must_use]
    pub fn with_word(mut self, word: impl Into<String>) -> Self {
        self.word = Some(word.into());
        self
    }

    /// Construct the requested strategy, or `None` when nothing is selected.
    pub fn strategy(&self) -> Option<Strategy> {
        Strategy::select(self)
    }
}

/// Result of handling an analysis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A strategy ran and produced a report.
    Analyzed(AnalysisReport),
    /// No strategy was selected.
    NoStrategy {
        /// Prompt asking the user to pick one.
        prompt: &'static str,
    },
}

impl Outcome {
    /// The text to show the user.
    pub fn message(&self) -> &str {
        match self {
            Self::Analyzed(report) => &report.message,
            Self::NoStrategy { prompt } => prompt,
        }
    }

    /// The report, when a strategy ran.
    pub const fn report(&self) -> Option<&AnalysisReport> {
        match self {
            Self::Analyzed(report) => Some(report),
            Self::NoStrategy { .. } => None,
        }
    }
}

/// Run the requested analysis over `text`.
///
/// Appends exactly one log entry when a strategy runs and none otherwise.
#[tracing::instrument(skip(text, log), fields(text_len = text.len()))]
pub fn run_analysis(text: &str, request: &AnalysisRequest, log: &mut AnalysisLog) -> Outcome {
    match request.strategy() {
        Some(strategy) => Outcome::Analyzed(strategy.run(text, log)),
        None => {
            tracing::debug!("no analysis strategy selected");
            Outcome::NoStrategy {
                prompt: CHOOSE_STRATEGY_PROMPT,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Metric;

    #[test]
    fn no_selection_prompts_without_logging() {
        let mut log = AnalysisLog::new();
        let outcome = run_analysis("Some text.", &AnalysisRequest::default(), &mut log);
        assert_eq!(outcome.message(), CHOOSE_STRATEGY_PROMPT);
        assert!(outcome.report().is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn unknown_label_prompts() {
        let mut log = AnalysisLog::new();
        let request = AnalysisRequest::from_label("vowel-count", None);
        let outcome = run_analysis("Some text.", &request, &mut log);
        assert!(matches!(outcome, Outcome::NoStrategy { .. }));
        assert!(log.is_empty());
    }

    #[test]
    fn word_frequency_request() {
        let mut log = AnalysisLog::new();
        let request = AnalysisRequest::new(AnalysisKind::WordFrequency).with_word("HELLO");
        let outcome = run_analysis("Hello world. Hello!", &request, &mut log);
        assert_eq!(outcome.message(), "Relative frequency of 'hello': 0.6667");
        assert_eq!(log.entries(), ["Relative frequency of 'hello': 0.6667"]);
    }

    #[test]
    fn sentence_count_request_by_label() {
        let mut log = AnalysisLog::new();
        let request = AnalysisRequest::from_label("sentence-count", None);
        let outcome = run_analysis("One. Two! Three?", &request, &mut log);
        let report = outcome.report().unwrap();
        assert_eq!(report.metric, Metric::Count(3));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn word_frequency_without_word_is_zero() {
        let mut log = AnalysisLog::new();
        let request = AnalysisRequest::new(AnalysisKind::WordFrequency);
        let outcome = run_analysis("Plenty of words here.", &request, &mut log);
        assert_eq!(outcome.report().unwrap().metric, Metric::Ratio(0.0));
    }

    #[test]
    fn outcome_serializes_with_status() {
        let mut log = AnalysisLog::new();
        let outcome = run_analysis("", &AnalysisRequest::default(), &mut log);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "no_strategy");
        assert_eq!(json["prompt"], CHOOSE_STRATEGY_PROMPT);

        let outcome = run_analysis(
            "a, b",
            &AnalysisRequest::new(AnalysisKind::PunctuationCount),
            &mut log,
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "analyzed");
        assert_eq!(json["kind"], "punctuation-count");
        assert_eq!(json["metric"]["value"], 1);
    }
}
