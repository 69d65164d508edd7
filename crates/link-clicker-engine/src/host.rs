//! Interfaces the engine consumes from the editor host.
//!
//! A host implements the individual traits; anything implementing all of
//! them is a [`Host`] and can be handed to
//! [`LinkClicker::on_click`](crate::plugin::LinkClicker::on_click).

use relative_path::{RelativePath, RelativePathBuf};

use crate::classify::LinkResolver;
use crate::file::FileHandle;
use crate::links::DocumentLinks;
use crate::position::{CoordinateMapper, DocumentPosition, LineColumns};
use crate::settings::NewFileLocation;

/// How the active markdown view presents its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Editable with syntax partially hidden and embeds rendered inline.
    #[default]
    LivePreview,
    /// Editable with all markdown syntax shown.
    Source,
    /// Rendered, not editable.
    Reading,
}

impl ViewMode {
    pub fn is_live_preview(self) -> bool {
        self == ViewMode::LivePreview
    }

    /// The next mode in the live preview, source, reading cycle.
    pub fn next(self) -> Self {
        match self {
            ViewMode::LivePreview => ViewMode::Source,
            ViewMode::Source => ViewMode::Reading,
            ViewMode::Reading => ViewMode::LivePreview,
        }
    }
}

/// Where a file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneKind {
    Current,
    Tab,
}

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("File already exists: {0}")]
    AlreadyExists(RelativePathBuf),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The active markdown editor view.
pub trait EditorView: LineColumns {
    /// Vault path of the document in the active markdown view, if any.
    fn active_path(&self) -> Option<RelativePathBuf>;

    /// Coordinate-to-offset mapping, when the editor supports it.
    ///
    /// Hosts probe for the capability when the view is created and return the
    /// cached result here.
    fn coordinate_mapper(&self) -> Option<&dyn CoordinateMapper>;

    fn view_mode(&self) -> ViewMode;

    fn set_cursor(&mut self, position: DocumentPosition);

    fn focus_editor(&mut self);
}

/// Read-only per-document link index.
pub trait LinkIndex {
    fn document_links(&self, path: &RelativePath) -> Option<DocumentLinks>;
}

/// Navigation.
pub trait Workspace {
    /// Opens `link` as written in the document at `from`, anchors included.
    fn open_link(&mut self, link: &str, from: &RelativePath, new_tab: bool) -> Result<(), HostError>;

    fn open_file(&mut self, file: &FileHandle, pane: PaneKind) -> Result<(), HostError>;
}

/// Document storage.
pub trait Vault {
    fn create_file(&mut self, path: &RelativePath, contents: &str) -> Result<FileHandle, HostError>;

    /// Where notes created from links should go.
    fn new_file_location(&self) -> NewFileLocation;
}

/// Asks the user whether to create a note.
///
/// On acceptance the host calls
/// [`accept_creation`](crate::plugin::accept_creation).
pub trait CreationConfirmer {
    fn confirm_creation(&mut self, path: &RelativePath);
}

/// Everything the click pipeline needs from its host.
pub trait Host: EditorView + LinkIndex + LinkResolver + Workspace + Vault + CreationConfirmer {}

impl<T> Host for T where T: EditorView + LinkIndex + LinkResolver + Workspace + Vault + CreationConfirmer
{}
