use relative_path::{RelativePath, RelativePathBuf};
use std::fmt;

pub const MARKDOWN_EXTENSION: &str = "md";

/// A document in the vault, identified by its vault-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileHandle {
    path: RelativePathBuf,
}

impl FileHandle {
    pub fn new(path: RelativePathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    /// File name without the `.md` extension, as used in link text.
    pub fn basename(&self) -> &str {
        self.path
            .file_name()
            .map(|name| name.strip_suffix(".md").unwrap_or(name))
            .unwrap_or("Untitled")
    }

    /// Vault-relative path without the `.md` extension.
    pub fn link_path(&self) -> &str {
        let path = self.path.as_str();
        path.strip_suffix(".md").unwrap_or(path)
    }

    /// Folder containing the file; empty for files at the vault root.
    pub fn folder(&self) -> &RelativePath {
        self.path.parent().unwrap_or(RelativePath::new(""))
    }
}

impl From<RelativePathBuf> for FileHandle {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for FileHandle {
    fn from(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_strips_extension() {
        let file = FileHandle::from("projects/Plan Alpha.md");
        assert_eq!(file.basename(), "Plan Alpha");
        assert_eq!(file.link_path(), "projects/Plan Alpha");
    }

    #[test]
    fn basename_keeps_other_extensions() {
        assert_eq!(FileHandle::from("assets/chart.png").basename(), "chart.png");
    }

    #[test]
    fn folder_of_root_file_is_empty() {
        assert_eq!(FileHandle::from("a.md").folder(), RelativePath::new(""));
        assert_eq!(
            FileHandle::from("folder/sub/a.md").folder(),
            RelativePath::new("folder/sub")
        );
    }
}
