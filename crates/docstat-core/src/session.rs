//! Editing session.
//!
//! A [`Session`] holds what the editor window held: the text buffer and the
//! analysis log. Its methods are the handlers for the three user actions
//! (open, analyze, save). Each runs to completion before returning, and a
//! failed open or save leaves the session exactly as it was.

use camino::Utf8Path;

use crate::buffer::TextBuffer;
use crate::document::{self, DEFAULT_MAX_INPUT_BYTES};
use crate::error::DocumentResult;
use crate::log::AnalysisLog;
use crate::selector::{self, AnalysisRequest, Outcome};

/// Buffer, log, and input limit for one run of the program.
#[derive(Debug, Clone)]
pub struct Session {
    buffer: TextBuffer,
    log: AnalysisLog,
    max_input_bytes: Option<usize>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with an empty buffer and the default input limit.
    pub const fn new() -> Self {
        Self {
            buffer: TextBuffer::new(),
            log: AnalysisLog::new(),
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
        }
    }

    /// Set the maximum document size accepted by [`Session::open`].
    ///
    /// `None` disables the check.
    #[must_use]
    pub const fn with_input_limit(mut self, max_input_bytes: Option<usize>) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    /// Load the document at `path` into the buffer.
    ///
    /// Returns the number of paragraphs read.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn open(&mut self, path: &Utf8Path) -> DocumentResult<usize> {
        document::check_input_size(path, self.max_input_bytes)?;
        let paragraphs = document::for_path(path).open(path)?;
        self.buffer.load_paragraphs(&paragraphs);
        self.log.append(format!("Opened file: {path}"));
        Ok(paragraphs.len())
    }

    /// Run the requested analysis over the buffer's current text.
    pub fn analyze(&mut self, request: &AnalysisRequest) -> Outcome {
        selector::run_analysis(self.buffer.current_text(), request, &mut self.log)
    }

    /// Save the buffer's content to `path`, one paragraph per line.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn save(&mut self, path: &Utf8Path) -> DocumentResult<()> {
        document::for_path(path).save(path, &self.buffer.lines())?;
        self.log.append(format!("Saved file: {path}"));
        Ok(())
    }

    /// The buffer.
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The buffer, for editing.
    pub const fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    /// The log.
    pub const fn log(&self) -> &AnalysisLog {
        &self.log
    }
}
