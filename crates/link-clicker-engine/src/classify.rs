use relative_path::RelativePath;
use std::fmt;

use crate::file::FileHandle;
use crate::links::kinds::WikiLink;

/// A link target with alias and anchor removed: the key used for resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkTarget(String);

impl LinkTarget {
    /// Keeps the text before the first `|`, then the text before the first `#`.
    pub fn normalize(raw: &str) -> Self {
        let without_alias = raw.split(WikiLink::ALIAS).next().unwrap_or_default();
        let without_anchor = without_alias
            .split(WikiLink::ANCHOR)
            .next()
            .unwrap_or_default();
        Self(without_anchor.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw link text minus its display alias: `Note#Section|Shown` becomes `Note#Section`.
///
/// This is what gets handed to the host for navigation, so anchors survive.
pub fn link_text(raw: &str) -> &str {
    raw.split(WikiLink::ALIAS).next().unwrap_or_default()
}

/// The anchor part of a raw link (`Section` in `Note#Section|Shown`), if any.
pub fn anchor(raw: &str) -> Option<&str> {
    link_text(raw)
        .split_once(WikiLink::ANCHOR)
        .map(|(_, anchor)| anchor)
        .filter(|anchor| !anchor.is_empty())
}

/// Whether a link target names an existing document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(FileHandle),
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Host link resolution: which file a link target points at when written in `from`.
///
/// Matching rules (shortest path, same folder first, ...) belong to the host.
pub trait LinkResolver {
    fn resolve_link_path(&self, target: &str, from: &RelativePath) -> Option<FileHandle>;
}

/// Result of classifying a raw link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub target: LinkTarget,
    pub resolution: Resolution,
}

/// Normalizes `raw` and resolves it relative to the document at `source`.
///
/// Not finding the target is an ordinary outcome, reported as `Unresolved`.
pub fn classify<R: LinkResolver + ?Sized>(
    raw: &str,
    source: &RelativePath,
    resolver: &R,
) -> Classification {
    let target = LinkTarget::normalize(raw);
    let resolution = match resolver.resolve_link_path(target.as_str(), source) {
        Some(file) => Resolution::Resolved(file),
        None => Resolution::Unresolved,
    };
    Classification { target, resolution }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Note Name|Display#Section", "Note Name")]
    #[case("Note Name#Section|Display", "Note Name")]
    #[case("Note", "Note")]
    #[case("folder/Note#^block", "folder/Note")]
    #[case("#Heading", "")]
    #[case("|alias only", "")]
    #[case("", "")]
    fn normalize_strips_alias_then_anchor(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(LinkTarget::normalize(raw).as_str(), expected);
    }

    #[rstest]
    #[case("Note#Section|Shown", "Note#Section", Some("Section"))]
    #[case("Note|Shown#Not anchor", "Note", None)]
    #[case("Note#", "Note#", None)]
    #[case("Note", "Note", None)]
    fn link_text_and_anchor(
        #[case] raw: &str,
        #[case] text: &str,
        #[case] expected_anchor: Option<&str>,
    ) {
        assert_eq!(link_text(raw), text);
        assert_eq!(anchor(raw), expected_anchor);
    }

    struct Known(&'static [&'static str]);

    impl LinkResolver for Known {
        fn resolve_link_path(&self, target: &str, _from: &RelativePath) -> Option<FileHandle> {
            self.0
                .iter()
                .find(|name| **name == target)
                .map(|name| FileHandle::from(format!("{name}.md").as_str()))
        }
    }

    #[test]
    fn existing_target_is_resolved() {
        let classification = classify("Plan|the plan", RelativePath::new("a.md"), &Known(&["Plan"]));
        assert_eq!(classification.target.as_str(), "Plan");
        assert_eq!(
            classification.resolution,
            Resolution::Resolved(FileHandle::from("Plan.md"))
        );
    }

    #[test]
    fn missing_target_is_unresolved() {
        let classification = classify("Ideas#Later", RelativePath::new("a.md"), &Known(&["Plan"]));
        assert_eq!(classification.target.as_str(), "Ideas");
        assert!(!classification.resolution.is_resolved());
    }
}
