//! Append-only analysis log.
//!
//! One [`AnalysisLog`] is created per process by the entry point and handed
//! by `&mut` to everything that records events: analysis results, opened
//! files, saved files. Entries are never removed.

use serde::Serialize;

/// Ordered, append-only record of user-visible events.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AnalysisLog {
    entries: Vec<String>,
}

impl AnalysisLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append one entry.
    ///
    /// The entry is also emitted as a `tracing` event so it reaches the
    /// configured log sinks.
    pub fn append(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "docstat::log", entry = self.entries.len(), "{message}");
        self.entries.push(message);
    }

    /// All entries recorded so far, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries recorded so far.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
