//! Text analysis strategies.
//!
//! A closed family of three stateless analyses, each a pure function in its
//! own module. [`Strategy`] ties them together behind one `analyze`
//! capability; [`crate::selector`] picks one at runtime.

pub mod punctuation_count;
pub mod reports;
pub mod sentence_count;
pub mod word_frequency;

use serde::{Deserialize, Serialize};

pub use reports::{AnalysisReport, Metric};
pub use word_frequency::WordFrequency;

use crate::log::AnalysisLog;
use crate::selector::AnalysisRequest;

/// The kinds of analysis a user can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    /// Relative frequency of a target word.
    WordFrequency,
    /// Number of sentences.
    SentenceCount,
    /// Number of punctuation marks.
    PunctuationCount,
}

impl AnalysisKind {
    /// Every kind, in menu order.
    pub const ALL: [Self; 3] = [
        Self::WordFrequency,
        Self::SentenceCount,
        Self::PunctuationCount,
    ];

    /// Returns the selection label for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WordFrequency => "word-frequency",
            Self::SentenceCount => "sentence-count",
            Self::PunctuationCount => "punctuation-count",
        }
    }

    /// Look up a kind by its label.
    ///
    /// Matching ignores case and surrounding whitespace, and accepts `_` in
    /// place of `-`. Unknown labels return `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
    }

    /// Whether this kind uses the target word parameter.
    pub const fn takes_word(&self) -> bool {
        matches!(self, Self::WordFrequency)
    }
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constructed, ready-to-run analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Relative frequency of a target word.
    WordFrequency(WordFrequency),
    /// Number of sentences.
    SentenceCount,
    /// Number of punctuation marks.
    PunctuationCount,
}

impl Strategy {
    /// Construct the strategy for `kind`.
    ///
    /// `word` is only consulted for [`AnalysisKind::WordFrequency`]; a
    /// missing word becomes an empty target that never matches.
    pub fn new(kind: AnalysisKind, word: Option<&str>) -> Self {
        match kind {
            AnalysisKind::WordFrequency => {
                Self::WordFrequency(WordFrequency::new(word.unwrap_or_default()))
            }
            AnalysisKind::SentenceCount => Self::SentenceCount,
            AnalysisKind::PunctuationCount => Self::PunctuationCount,
        }
    }

    /// The strategy `request` selects, or `None` when it selects nothing.
    pub fn select(request: &AnalysisRequest) -> Option<Self> {
        request
            .kind
            .map(|kind| Self::new(kind, request.word.as_deref()))
    }

    /// The kind this strategy implements.
    pub const fn kind(&self) -> AnalysisKind {
        match self {
            Self::WordFrequency(_) => AnalysisKind::WordFrequency,
            Self::SentenceCount => AnalysisKind::SentenceCount,
            Self::PunctuationCount => AnalysisKind::PunctuationCount,
        }
    }

    /// Compute the report without touching the log.
    pub fn evaluate(&self, text: &str) -> AnalysisReport {
        match self {
            Self::WordFrequency(strategy) => strategy.evaluate(text),
            Self::SentenceCount => sentence_count::analyze_sentence_count(text),
            Self::PunctuationCount => punctuation_count::analyze_punctuation_count(text),
        }
    }

    /// Run the analysis, record its message in `log`, and return the report.
    pub fn run(&self, text: &str, log: &mut AnalysisLog) -> AnalysisReport {
        let report = self.evaluate(text);
        log.append(report.message.clone());
        report
    }

    /// Run the analysis and return only its message.
    pub fn analyze(&self, text: &str, log: &mut AnalysisLog) -> String {
        self.run(text, log).message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for kind in AnalysisKind::ALL {
            assert_eq!(AnalysisKind::from_label(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn labels_are_forgiving() {
        assert_eq!(
            AnalysisKind::from_label(" Sentence_Count "),
            Some(AnalysisKind::SentenceCount)
        );
        assert_eq!(AnalysisKind::from_label("frequency"), None);
        assert_eq!(AnalysisKind::from_label(""), None);
    }

    #[test]
    fn only_word_frequency_takes_word() {
        assert!(AnalysisKind::WordFrequency.takes_word());
        assert!(!AnalysisKind::SentenceCount.takes_word());
        assert!(!AnalysisKind::PunctuationCount.takes_word());
    }

    #[test]
    fn kind_deserializes_from_kebab_case() {
        let kind: AnalysisKind = serde_json::from_str("\"punctuation-count\"").unwrap();
        assert_eq!(kind, AnalysisKind::PunctuationCount);
    }

    #[test]
    fn strategy_reports_its_kind() {
        for kind in AnalysisKind::ALL {
            assert_eq!(Strategy::new(kind, Some("x")).kind(), kind);
        }
    }

    #[test]
    fn select_follows_request() {
        assert_eq!(Strategy::select(&AnalysisRequest::default()), None);
        let request = AnalysisRequest::new(AnalysisKind::WordFrequency).with_word(" Cat ");
        assert_eq!(
            Strategy::select(&request),
            Some(Strategy::WordFrequency(WordFrequency::new("cat")))
        );
    }

    #[test]
    fn word_is_ignored_for_counts() {
        let strategy = Strategy::new(AnalysisKind::SentenceCount, Some("ignored"));
        assert_eq!(strategy, Strategy::SentenceCount);
    }

    #[test]
    fn analyze_appends_to_log() {
        let mut log = AnalysisLog::new();
        let strategy = Strategy::new(AnalysisKind::PunctuationCount, None);
        let message = strategy.analyze("Hi, there! How are you?", &mut log);
        assert_eq!(message, "Number of punctuation marks: 3");
        assert_eq!(log.entries(), [message.as_str()]);
    }

    #[test]
    fn repeated_runs_are_identical_but_logged_each_time() {
        let mut log = AnalysisLog::new();
        let strategy = Strategy::new(AnalysisKind::WordFrequency, Some("Hello"));
        let text = "Hello world. Hello!";
        let first = strategy.analyze(text, &mut log);
        let second = strategy.analyze(text, &mut log);
        assert_eq!(first, second);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn empty_text_is_well_formed_for_every_kind() {
        let mut log = AnalysisLog::new();
        for kind in AnalysisKind::ALL {
            let report = Strategy::new(kind, Some("word")).run("", &mut log);
            assert_eq!(report.metric.as_f64(), 0.0);
        }
        assert_eq!(log.len(), 3);
    }
}
