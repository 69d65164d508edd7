use xi_rope::Rope;

use crate::position::DocumentPosition;

/// Byte range `[start, end)` of one line in a [`TextBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Length in bytes; zero when `end` is before `start`.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// The text of one document, held in an xi-rope buffer.
///
/// Positions handed out by the buffer are zero-based lines and columns
/// counted in chars, matching what [`crate::links::scan_links`] produces.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
        }
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len() == 0
    }

    /// Number of lines, counting the (possibly empty) line after a trailing newline.
    pub fn line_count(&self) -> usize {
        self.rope.line_of_offset(self.rope.len()) + 1
    }

    pub fn text(&self) -> String {
        self.rope.slice_to_cow(0..self.rope.len()).into_owned()
    }

    /// Byte span of `line`, excluding its line terminator.
    pub fn line_span(&self, line: usize) -> Option<Span> {
        if line >= self.line_count() {
            return None;
        }
        let start = self.rope.offset_of_line(line);
        let next = self.rope.offset_of_line(line + 1);
        let raw = self.rope.slice_to_cow(start..next);
        let trimmed = raw.trim_end_matches(['\n', '\r']);
        Some(Span {
            start,
            end: start + trimmed.len(),
        })
    }

    /// Text of `line` without its line terminator.
    pub fn line_text(&self, line: usize) -> Option<String> {
        let span = self.line_span(line)?;
        Some(self.slice(span))
    }

    pub fn slice(&self, span: Span) -> String {
        self.rope.slice_to_cow(span.start..span.end).into_owned()
    }

    /// Converts a byte offset into a line/column position.
    ///
    /// Offsets inside a multi-byte char land on the column after it. Offsets past
    /// the end of the buffer have no position.
    pub fn offset_to_position(&self, offset: usize) -> Option<DocumentPosition> {
        if offset > self.rope.len() {
            return None;
        }
        let line = self.rope.line_of_offset(offset);
        let line_start = self.rope.offset_of_line(line);
        let local = offset - line_start;
        let text = self.line_text(line).unwrap_or_default();
        let column = text
            .char_indices()
            .take_while(|(index, _)| *index < local)
            .count();
        Some(DocumentPosition { line, column })
    }

    /// Converts a line/column position into a byte offset.
    ///
    /// The column may point one past the last char of the line (end of line).
    pub fn position_to_offset(&self, position: DocumentPosition) -> Option<usize> {
        let span = self.line_span(position.line)?;
        let text = self.slice(span);
        if position.column == text.chars().count() {
            return Some(span.end);
        }
        text.char_indices()
            .nth(position.column)
            .map(|(index, _)| span.start + index)
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> DocumentPosition {
        DocumentPosition { line, column }
    }

    #[test]
    fn span_len_and_empty() {
        assert_eq!(Span { start: 3, end: 7 }.len(), 4);
        assert!(Span { start: 5, end: 5 }.is_empty());
        assert_eq!(Span { start: 9, end: 2 }.len(), 0);
    }

    #[test]
    fn line_count_includes_trailing_empty_line() {
        assert_eq!(TextBuffer::new("").line_count(), 1);
        assert_eq!(TextBuffer::new("one").line_count(), 1);
        assert_eq!(TextBuffer::new("one\ntwo").line_count(), 2);
        assert_eq!(TextBuffer::new("one\n").line_count(), 2);
    }

    #[test]
    fn line_text_strips_terminators() {
        let buffer = TextBuffer::new("first\r\nsecond\nthird");
        assert_eq!(buffer.line_text(0).as_deref(), Some("first"));
        assert_eq!(buffer.line_text(1).as_deref(), Some("second"));
        assert_eq!(buffer.line_text(2).as_deref(), Some("third"));
        assert_eq!(buffer.line_text(3), None);
    }

    #[test]
    fn offset_to_position_across_lines() {
        let buffer = TextBuffer::new("abc\ndefg\n");
        assert_eq!(buffer.offset_to_position(0), Some(pos(0, 0)));
        assert_eq!(buffer.offset_to_position(3), Some(pos(0, 3)));
        assert_eq!(buffer.offset_to_position(4), Some(pos(1, 0)));
        assert_eq!(buffer.offset_to_position(6), Some(pos(1, 2)));
        assert_eq!(buffer.offset_to_position(9), Some(pos(2, 0)));
        assert_eq!(buffer.offset_to_position(10), None);
    }

    #[test]
    fn columns_count_chars_not_bytes() {
        let buffer = TextBuffer::new("héllo [[x]]");
        // 'é' is two bytes, so byte 7 is the `[` at char column 6
        assert_eq!(buffer.offset_to_position(7), Some(pos(0, 6)));
        assert_eq!(buffer.position_to_offset(pos(0, 6)), Some(7));
    }

    #[test]
    fn position_to_offset_allows_end_of_line() {
        let buffer = TextBuffer::new("ab\ncd");
        assert_eq!(buffer.position_to_offset(pos(0, 2)), Some(2));
        assert_eq!(buffer.position_to_offset(pos(1, 1)), Some(4));
        assert_eq!(buffer.position_to_offset(pos(0, 3)), None);
        assert_eq!(buffer.position_to_offset(pos(5, 0)), None);
    }

    #[test]
    fn text_round_trips() {
        let text = "# Title\n\nSome [[link]] here\n";
        assert_eq!(TextBuffer::new(text).text(), text);
    }
}
