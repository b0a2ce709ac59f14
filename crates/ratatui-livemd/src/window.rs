use std::ops::Range;

use crate::error::WindowError;

/// Immutable snapshot of the visible slice of a document.
///
/// `start`/`end` are absolute UTF-8 byte offsets into the full document and `text` is exactly
/// `document[start..end]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextWindow {
    start: usize,
    end: usize,
    text: String,
}

impl TextWindow {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Result<Self, WindowError> {
        let text = text.into();
        if end < start {
            return Err(WindowError::Inverted { start, end });
        }
        if end - start != text.len() {
            return Err(WindowError::LengthMismatch {
                start,
                end,
                span: end - start,
                text_len: text.len(),
            });
        }
        Ok(Self { start, end, text })
    }

    /// A window starting at `start` that covers all of `text`.
    pub fn at(start: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            start,
            end: start + text.len(),
            text,
        }
    }

    /// The whole of `text`, starting at offset zero.
    pub fn whole(text: impl Into<String>) -> Self {
        Self::at(0, text)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn contains_span(&self, start: usize, end: usize) -> bool {
        self.start <= start && start <= end && end <= self.end
    }

    /// Text of the absolute span `start..end`, if it lies inside the window on char boundaries.
    pub fn slice(&self, start: usize, end: usize) -> Option<&str> {
        if !self.contains_span(start, end) {
            return None;
        }
        self.text.get(start - self.start..end - self.start)
    }
}
