use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};

use crate::classify::LinkTarget;
use crate::file::MARKDOWN_EXTENSION;

/// User preferences for link clicks. Read-only while a click is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Jump only while the primary modifier is held. When off, a plain click
    /// jumps and the modifier suppresses the jump instead.
    pub jump_only_with_modifier: bool,
    /// Offer to create the target of an unresolved link.
    pub confirm_create_file: bool,
    /// Open followed links in a new tab.
    pub open_at_new_tab: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            jump_only_with_modifier: true,
            confirm_create_file: true,
            open_at_new_tab: false,
        }
    }
}

/// Where new notes created from unresolved links are placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "location", rename_all = "lowercase")]
pub enum NewFileLocation {
    /// The vault root.
    #[default]
    Root,
    /// The folder of the note containing the link.
    Current,
    /// A fixed folder.
    Folder { path: RelativePathBuf },
}

impl NewFileLocation {
    /// Folder a note created from a link in `source` goes into.
    pub fn folder_for<'a>(&'a self, source: &'a RelativePath) -> &'a RelativePath {
        match self {
            NewFileLocation::Root => RelativePath::new(""),
            NewFileLocation::Current => source.parent().unwrap_or(RelativePath::new("")),
            NewFileLocation::Folder { path } => path.as_relative_path(),
        }
    }

    /// Path of the note to create for `target`: `<folder>/<target>.md`.
    pub fn creation_path(&self, target: &LinkTarget, source: &RelativePath) -> RelativePathBuf {
        let file_name = format!("{}.{MARKDOWN_EXTENSION}", target.as_str());
        self.folder_for(source).join_normalized(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_require_modifier_and_confirm_creation() {
        let settings = Settings::default();
        assert!(settings.jump_only_with_modifier);
        assert!(settings.confirm_create_file);
        assert!(!settings.open_at_new_tab);
    }

    #[rstest]
    #[case(NewFileLocation::Root, "folder/a.md", "target.md")]
    #[case(NewFileLocation::Current, "folder/a.md", "folder/target.md")]
    #[case(NewFileLocation::Current, "a.md", "target.md")]
    #[case(NewFileLocation::Current, "deep/er/a.md", "deep/er/target.md")]
    #[case(
        NewFileLocation::Folder { path: RelativePathBuf::from("inbox") },
        "folder/a.md",
        "inbox/target.md"
    )]
    fn creation_path_is_anchored_by_location(
        #[case] location: NewFileLocation,
        #[case] source: &str,
        #[case] expected: &str,
    ) {
        let path = location.creation_path(&LinkTarget::normalize("target"), RelativePath::new(source));
        assert_eq!(path.as_str(), expected);
    }

    #[test]
    fn target_with_folder_keeps_its_folder() {
        let path = NewFileLocation::Current.creation_path(
            &LinkTarget::normalize("sub/New Idea#x"),
            RelativePath::new("notes/a.md"),
        );
        assert_eq!(path.as_str(), "notes/sub/New Idea.md");
    }
}
