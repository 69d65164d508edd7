use crate::buffer::TextBuffer;

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Embed, WikiLink},
    span::{DocumentLinks, LinkKind, LinkSpan},
};

/// Builds the link and embed spans of a markdown text.
///
/// Recognises `[[target]]` and `![[target]]`. Spans start at the first
/// delimiter char and end one past `]]`. Backtick code spans are raw zones,
/// and a link never crosses a line break.
pub fn scan_links(text: &str) -> DocumentLinks {
    scan_buffer(&TextBuffer::new(text))
}

/// Same as [`scan_links`] for text already held in a buffer.
pub fn scan_buffer(buffer: &TextBuffer) -> DocumentLinks {
    let text = buffer.text();
    let mut cur = Cursor::new(&text);
    let mut out = DocumentLinks::default();

    while !cur.eof() {
        if skip_code_span(&mut cur) {
            continue;
        }
        if let Some(raw) = try_parse_wikilink(&mut cur) {
            let (Some(start), Some(end)) = (
                buffer.offset_to_position(raw.start),
                buffer.offset_to_position(raw.end),
            ) else {
                continue;
            };
            let span = LinkSpan {
                start,
                end,
                target: raw.target.to_string(),
                kind: raw.kind,
            };
            match raw.kind {
                LinkKind::Link => out.links.push(span),
                LinkKind::Embed => out.embeds.push(span),
            }
            continue;
        }
        cur.bump();
    }

    out
}

struct RawLink<'a> {
    kind: LinkKind,
    start: usize,
    end: usize,
    target: &'a str,
}

/// Steps over a closed code span. Unclosed backticks are left alone.
fn skip_code_span(cur: &mut Cursor<'_>) -> bool {
    if cur.peek() != Some(CodeSpan::TICK) {
        return false;
    }

    let saved = cur.clone();
    cur.bump();
    while !cur.eof() && cur.peek() != Some(CodeSpan::TICK) {
        cur.bump();
    }
    if cur.peek() != Some(CodeSpan::TICK) {
        *cur = saved;
        return false;
    }
    cur.bump();
    true
}

/// Attempts to parse `[[target]]` or `![[target]]` at the cursor.
///
/// On failure the cursor is restored.
fn try_parse_wikilink<'a>(cur: &mut Cursor<'a>) -> Option<RawLink<'a>> {
    let saved = cur.clone();
    let start = cur.pos();

    let kind = if cur.peek() == Some(Embed::MARKER) {
        cur.bump();
        LinkKind::Embed
    } else {
        LinkKind::Link
    };

    if !cur.starts_with(WikiLink::OPEN) {
        *cur = saved;
        return None;
    }
    cur.bump_n(WikiLink::OPEN.len());
    let target_start = cur.pos();

    while !cur.eof() && !cur.starts_with(WikiLink::CLOSE) {
        if cur.peek() == Some(b'\n') {
            break;
        }
        cur.bump();
    }
    let target_end = cur.pos();

    if !cur.starts_with(WikiLink::CLOSE) || target_end == target_start {
        *cur = saved;
        return None;
    }
    cur.bump_n(WikiLink::CLOSE.len());

    Some(RawLink {
        kind,
        start,
        end: cur.pos(),
        target: cur.text(target_start, target_end),
    })
}
