//! The editable text buffer.

/// Editable text content of the current document.
///
/// Readers see the content with surrounding whitespace trimmed, so the
/// trailing newline added after the last paragraph never reaches analysis
/// or a saved document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            content: String::new(),
        }
    }

    /// The current content, trimmed.
    pub fn current_text(&self) -> &str {
        self.content.trim()
    }

    /// Replace the content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = text.into();
    }

    /// Replace the content with `paragraphs`, each followed by a newline.
    pub fn load_paragraphs(&mut self, paragraphs: &[String]) {
        self.content.clear();
        for paragraph in paragraphs {
            self.content.push_str(paragraph);
            self.content.push('\n');
        }
    }

    /// Split the trimmed content into lines for saving.
    ///
    /// An empty buffer yields a single empty line.
    pub fn lines(&self) -> Vec<String> {
        self.current_text()
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect()
    }

    /// Whether the trimmed content is empty.
    pub fn is_empty(&self) -> bool {
        self.current_text().is_empty()
    }
}
