//! Delimiters of the inline constructs the scanner knows about.
//!
//! The scanner never hardcodes `[[` or `` ` ``; it asks these types.

pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';
}

pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const ALIAS: char = '|';
    pub const ANCHOR: char = '#';
}

pub struct Embed;

impl Embed {
    /// Prefix turning a wikilink into an embed: `![[target]]`.
    pub const MARKER: u8 = b'!';
    /// Length of `![[`, the text before the embed target.
    pub const PREFIX_LEN: usize = 3;
}
