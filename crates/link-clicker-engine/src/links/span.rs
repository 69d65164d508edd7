use crate::classify::LinkTarget;
use crate::position::DocumentPosition;

/// Whether a span is a plain link or a transcluded embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// `[[target]]`
    Link,
    /// `![[target]]`
    Embed,
}

/// One link or embed occurrence in a document, as reported by the link index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    pub start: DocumentPosition,
    /// One past the closing delimiter.
    pub end: DocumentPosition,
    /// Raw target text, possibly with `|alias` and `#anchor` parts.
    pub target: String,
    pub kind: LinkKind,
}

impl LinkSpan {
    pub fn link(start: DocumentPosition, end: DocumentPosition, target: impl Into<String>) -> Self {
        Self {
            start,
            end,
            target: target.into(),
            kind: LinkKind::Link,
        }
    }

    pub fn embed(start: DocumentPosition, end: DocumentPosition, target: impl Into<String>) -> Self {
        Self {
            start,
            end,
            target: target.into(),
            kind: LinkKind::Embed,
        }
    }

    pub fn is_embed(&self) -> bool {
        self.kind == LinkKind::Embed
    }

    /// Whether a click at `position` lands on this span.
    ///
    /// Two cases match: the line lies strictly between the start and end
    /// lines, or the span sits on a single line and the column is within
    /// `start.column..=end.column` (both ends inclusive). A click on the first
    /// or last line of a multi-line span never matches.
    pub fn contains(&self, position: DocumentPosition) -> bool {
        let strictly_between = position.line > self.start.line && position.line < self.end.line;
        let on_single_line = position.line == self.start.line
            && position.line == self.end.line
            && position.column >= self.start.column
            && position.column <= self.end.column;
        strictly_between || on_single_line
    }
}

/// All link and embed spans of one document, each in index order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentLinks {
    pub links: Vec<LinkSpan>,
    pub embeds: Vec<LinkSpan>,
}

impl DocumentLinks {
    pub fn new(links: Vec<LinkSpan>, embeds: Vec<LinkSpan>) -> Self {
        Self { links, embeds }
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.embeds.is_empty()
    }

    /// Links first, then embeds, each in index order.
    pub fn iter(&self) -> impl Iterator<Item = &LinkSpan> {
        self.links.iter().chain(self.embeds.iter())
    }

    /// First embed whose normalized target equals `target`.
    pub fn first_embed_to(&self, target: &LinkTarget) -> Option<&LinkSpan> {
        self.embeds
            .iter()
            .find(|embed| LinkTarget::normalize(&embed.target) == *target)
    }
}
