//! Document model - the text buffer plus its injected-language regions

use std::borrow::Cow;
use std::ops::Range;

use ropey::Rope;

use crate::engine::LayoutError;
use crate::injection::{ContentType, Injection, InjectionError, InjectionSet};

/// Which lines an edit touched, used for targeted cache invalidation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditEffect {
    /// First buffer line affected by the edit
    pub first_line: usize,
    /// Newlines added by an insertion (lines split below `first_line`)
    pub lines_inserted: usize,
    /// Newlines removed by a deletion (lines joined into `first_line`)
    pub lines_removed: usize,
}

/// Document state - the text buffer, its content type, and injections
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer
    buffer: Rope,
    /// Content type of the enclosing file
    content_type: ContentType,
    /// Injected-language regions (non-overlapping, contained)
    injections: InjectionSet,
    /// Revision counter (incremented on each edit)
    revision: u64,
}

impl Document {
    /// Create a plain-text document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from_str(text),
            content_type: ContentType::PlainText,
            injections: InjectionSet::default(),
            revision: 0,
        }
    }

    /// Create a document with an explicit content type
    pub fn with_content_type(text: &str, content_type: ContentType) -> Self {
        Self {
            content_type,
            ..Self::with_text(text)
        }
    }

    /// Create a document with injected regions.
    ///
    /// Fails if any injection range is inverted, extends past the document,
    /// or overlaps another.
    pub fn with_injections(
        text: &str,
        content_type: ContentType,
        injections: Vec<Injection>,
    ) -> Result<Self, InjectionError> {
        let buffer = Rope::from_str(text);
        let injections = InjectionSet::new(injections, buffer.len_chars())?;
        Ok(Self {
            buffer,
            content_type,
            injections,
            revision: 0,
        })
    }

    /// Get the number of lines in the document
    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Total length in characters
    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    /// Char offset of the start of a line
    pub fn line_to_char(&self, line: usize) -> usize {
        if line >= self.buffer.len_lines() {
            return self.buffer.len_chars();
        }
        self.buffer.line_to_char(line)
    }

    /// Line containing a char offset (clamped to the document)
    pub fn char_to_line(&self, offset: usize) -> usize {
        self.buffer.char_to_line(offset.min(self.buffer.len_chars()))
    }

    /// Get line content without its trailing newline, avoiding allocation
    /// when the line is stored contiguously.
    pub fn line_text(&self, line: usize) -> Option<Cow<'_, str>> {
        if line >= self.buffer.len_lines() {
            return None;
        }

        let slice = self.buffer.line(line);
        let len = slice.len_chars();

        let trim_len = if len > 0 && slice.char(len - 1) == '\n' {
            if len > 1 && slice.char(len - 2) == '\r' {
                2 // CRLF
            } else {
                1 // LF
            }
        } else {
            0
        };

        let trimmed = slice.slice(..len - trim_len);
        if let Some(s) = trimmed.as_str() {
            Some(Cow::Borrowed(s))
        } else {
            Some(Cow::Owned(trimmed.to_string()))
        }
    }

    /// Get full content as String (may be expensive for large buffers)
    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    /// Content type active at a char offset: the innermost injection's
    /// language, or the host file's content type outside any injection.
    pub fn content_type_at(&self, offset: usize) -> ContentType {
        self.injections
            .content_type_at(offset)
            .unwrap_or(self.content_type)
    }

    /// The injected regions, ordered by start offset
    pub fn injections(&self) -> &InjectionSet {
        &self.injections
    }

    /// Revision counter, bumped on every edit
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Insert text at a char offset.
    ///
    /// Out-of-range offsets are a bounds error; the document is not touched.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<EditEffect, LayoutError> {
        let len = self.buffer.len_chars();
        if offset > len {
            return Err(LayoutError::OffsetOutOfBounds { offset, len });
        }

        let first_line = self.buffer.char_to_line(offset);
        self.buffer.insert(offset, text);
        self.injections
            .shift_for_insert(offset, text.chars().count());
        self.revision = self.revision.wrapping_add(1);

        Ok(EditEffect {
            first_line,
            lines_inserted: text.matches('\n').count(),
            lines_removed: 0,
        })
    }

    /// Insert a single character at a char offset
    pub fn insert_char(&mut self, offset: usize, ch: char) -> Result<EditEffect, LayoutError> {
        let mut buf = [0u8; 4];
        self.insert(offset, ch.encode_utf8(&mut buf))
    }

    /// Remove a char range.
    ///
    /// Out-of-range or inverted ranges are a bounds error with no partial
    /// mutation applied.
    pub fn remove(&mut self, range: Range<usize>) -> Result<EditEffect, LayoutError> {
        let len = self.buffer.len_chars();
        if range.start > range.end || range.end > len {
            return Err(LayoutError::OffsetOutOfBounds {
                offset: range.end,
                len,
            });
        }

        let first_line = self.buffer.char_to_line(range.start);
        let lines_removed = self
            .buffer
            .slice(range.clone())
            .chars()
            .filter(|&c| c == '\n')
            .count();

        self.buffer.remove(range.clone());
        self.injections.shift_for_remove(range);
        self.revision = self.revision.wrapping_add(1);

        Ok(EditEffect {
            first_line,
            lines_inserted: 0,
            lines_removed,
        })
    }
}
