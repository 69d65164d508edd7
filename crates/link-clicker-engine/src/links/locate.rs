use crate::event::ElementInfo;
use crate::position::DocumentPosition;

use super::span::{DocumentLinks, LinkSpan};

/// The link a click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedLink {
    /// Raw target, still carrying any alias or anchor.
    pub target: String,
    pub is_embed: bool,
    /// The matched span; `None` when the link came from a rendered embed element.
    pub span: Option<LinkSpan>,
}

/// First span containing `position`: links in index order, then embeds.
///
/// First match wins, even when a later span is narrower.
pub fn locate(position: DocumentPosition, links: &DocumentLinks) -> Option<&LinkSpan> {
    links.iter().find(|span| span.contains(position))
}

/// Finds the link under a click.
///
/// Text positions are checked against the spans first. When nothing matches,
/// a rendered embed element under the pointer supplies its `src` instead.
pub fn locate_click(
    position: Option<DocumentPosition>,
    links: &DocumentLinks,
    element: Option<&ElementInfo>,
) -> Option<LocatedLink> {
    if let Some(span) = position.and_then(|position| locate(position, links)) {
        return Some(LocatedLink {
            target: span.target.clone(),
            is_embed: span.is_embed(),
            span: Some(span.clone()),
        });
    }

    let src = element?.embed_src()?;
    Some(LocatedLink {
        target: src.to_string(),
        is_embed: true,
        span: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pos(line: usize, column: usize) -> DocumentPosition {
        DocumentPosition::new(line, column)
    }

    fn sample() -> DocumentLinks {
        DocumentLinks::new(
            vec![
                LinkSpan::link(pos(0, 4), pos(0, 12), "First"),
                LinkSpan::link(pos(2, 0), pos(2, 20), "Wide"),
                LinkSpan::link(pos(2, 5), pos(2, 10), "Narrow"),
            ],
            vec![LinkSpan::embed(pos(0, 4), pos(0, 14), "Image.png")],
        )
    }

    #[test]
    fn links_are_checked_before_embeds() {
        let links = sample();
        let found = locate(pos(0, 8), &links).map(|span| span.target.as_str());
        assert_eq!(found, Some("First"));
    }

    #[test]
    fn embed_matches_where_no_link_does() {
        let links = sample();
        let found = locate(pos(0, 13), &links).map(|span| span.target.as_str());
        assert_eq!(found, Some("Image.png"));
    }

    #[test]
    fn first_match_wins_over_narrowest() {
        let links = sample();
        let found = locate(pos(2, 7), &links).map(|span| span.target.as_str());
        assert_eq!(found, Some("Wide"));
    }

    #[test]
    fn no_span_and_no_element_is_no_match() {
        assert_eq!(locate_click(Some(pos(5, 0)), &sample(), None), None);
        assert_eq!(locate_click(None, &sample(), None), None);
    }

    #[test]
    fn span_match_reports_kind() {
        let located = locate_click(Some(pos(0, 13)), &sample(), None).unwrap();
        assert_eq!(located.target, "Image.png");
        assert!(located.is_embed);
        assert_eq!(located.span.map(|span| span.start), Some(pos(0, 4)));
    }

    #[test]
    fn embed_element_is_the_fallback() {
        let element = ElementInfo::embed("Diagram#Part");
        let located = locate_click(Some(pos(5, 0)), &sample(), Some(&element)).unwrap();
        assert_eq!(
            located,
            LocatedLink {
                target: "Diagram#Part".to_string(),
                is_embed: true,
                span: None,
            }
        );
    }

    #[test]
    fn embed_element_is_used_when_position_is_unknown() {
        let element = ElementInfo::embed("Diagram");
        let located = locate_click(None, &DocumentLinks::default(), Some(&element));
        assert_eq!(located.map(|link| link.target), Some("Diagram".to_string()));
    }

    #[test]
    fn span_match_beats_embed_element() {
        let element = ElementInfo::embed("Diagram");
        let located = locate_click(Some(pos(0, 5)), &sample(), Some(&element)).unwrap();
        assert_eq!(located.target, "First");
    }

    #[test]
    fn element_without_marker_is_ignored() {
        let element = ElementInfo {
            classes: vec!["image-embed".to_string()],
            src: Some("Diagram".to_string()),
        };
        assert_eq!(locate_click(None, &sample(), Some(&element)), None);
    }
}
