//! Report types produced by the analysis strategies.
//!
//! Reports are plain values: created once per invocation and handed to the
//! caller. They derive `Serialize` for the CLI's JSON output.

use serde::{Deserialize, Serialize};

use super::AnalysisKind;

/// Outcome of running one strategy over a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Which strategy produced this report.
    pub kind: AnalysisKind,
    /// Case-folded target word (word frequency only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    /// The computed value.
    pub metric: Metric,
    /// Human-readable message embedding the value.
    pub message: String,
}

/// Numeric result of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Metric {
    /// A ratio in `0.0..=1.0`.
    Ratio(f64),
    /// A plain count.
    Count(usize),
}

impl Metric {
    /// The value as a float, whatever its variant.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Ratio(r) => r,
            Self::Count(c) => c as f64,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ratio(r) => write!(f, "{r:.4}"),
            Self::Count(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_displays_four_decimals() {
        assert_eq!(Metric::Ratio(2.0 / 3.0).to_string(), "0.6667");
        assert_eq!(Metric::Ratio(0.0).to_string(), "0.0000");
    }

    #[test]
    fn count_displays_integer() {
        assert_eq!(Metric::Count(3).to_string(), "3");
    }

    #[test]
    fn metric_serializes_tagged() {
        let json = serde_json::to_value(Metric::Count(4)).unwrap();
        assert_eq!(json["type"], "count");
        assert_eq!(json["value"], 4);
    }
}
