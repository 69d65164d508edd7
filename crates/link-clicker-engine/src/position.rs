use std::fmt;

use crate::buffer::TextBuffer;

/// A zero-based line/column position in a document's text buffer.
///
/// Columns are counted in chars. Ordering is by line, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DocumentPosition {
    pub line: usize,
    pub column: usize,
}

impl DocumentPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for DocumentPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A pointer coordinate relative to the host's viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Optional editor capability: mapping a viewport coordinate to a buffer offset.
///
/// Views that cannot do this simply do not expose a mapper, and every click in
/// them passes through untouched.
pub trait CoordinateMapper {
    /// Byte offset under `point`, or `None` when the point is not over text.
    fn offset_at(&self, point: ScreenPoint) -> Option<usize>;
}

/// Conversion from buffer offsets to line/column positions.
pub trait LineColumns {
    fn offset_to_position(&self, offset: usize) -> Option<DocumentPosition>;
}

impl LineColumns for TextBuffer {
    fn offset_to_position(&self, offset: usize) -> Option<DocumentPosition> {
        TextBuffer::offset_to_position(self, offset)
    }
}

/// Resolves a pointer coordinate to a position in the active document.
///
/// `None` means "not a text click"; the caller should still try embed
/// detection on the element under the pointer.
pub fn resolve<L: LineColumns + ?Sized>(
    mapper: &dyn CoordinateMapper,
    lines: &L,
    point: ScreenPoint,
) -> Option<DocumentPosition> {
    let offset = mapper.offset_at(point)?;
    lines.offset_to_position(offset)
}
