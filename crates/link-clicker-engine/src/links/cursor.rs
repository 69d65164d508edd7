/// Byte cursor over a document's text used by the link scanner.
#[derive(Clone)]
pub struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Current byte offset into the text.
    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes().get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes, stopping at the end of input.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Text between two byte offsets previously returned by [`Cursor::pos`].
    pub fn text(&self, start: usize, end: usize) -> &'a str {
        &self.s[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert_eq!(cur.pos(), 0);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn starts_with_pattern_longer_than_remaining() {
        let mut cur = Cursor::new("ab");
        assert!(!cur.starts_with(b"abcdef"));
        cur.bump();
        assert!(!cur.starts_with(b"bc"));
        assert!(cur.starts_with(b"b"));
    }

    #[test]
    fn bump_n_stops_at_end() {
        let mut cur = Cursor::new("hi");
        cur.bump_n(10);
        assert!(cur.eof());
        assert_eq!(cur.pos(), 2);
        assert_eq!(cur.peek(), None);
        assert!(cur.starts_with(b""));
    }

    #[test]
    fn text_slices_between_offsets() {
        let mut cur = Cursor::new("[[link]]");
        cur.bump_n(2);
        let start = cur.pos();
        cur.bump_n(4);
        assert_eq!(cur.text(start, cur.pos()), "link");
    }
}
