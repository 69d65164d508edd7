// Shared by several integration test binaries; each uses a different subset.
#![allow(dead_code)]

use link_clicker_engine::{
    CoordinateMapper, CreationConfirmer, DocumentLinks, DocumentPosition, EditorView, FileHandle,
    HostError, LineColumns, LinkIndex, LinkResolver, Modifiers, NewFileLocation, PaneKind,
    PointerEvent, ScreenPoint, TextBuffer, Vault, ViewMode, Workspace, links::scan_links,
};
use relative_path::{RelativePath, RelativePathBuf};

/// Maps `x` to a char column and `y` to a line of the buffer.
pub struct GridMapper {
    buffer: TextBuffer,
}

impl CoordinateMapper for GridMapper {
    fn offset_at(&self, point: ScreenPoint) -> Option<usize> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let position = DocumentPosition::new(point.y as usize, point.x as usize);
        self.buffer.position_to_offset(position)
    }
}

/// Everything the engine asked the host to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    OpenLink {
        link: String,
        from: RelativePathBuf,
        new_tab: bool,
    },
    OpenFile(RelativePathBuf, PaneKind),
    ConfirmCreation(RelativePathBuf),
    CreateFile(RelativePathBuf),
    SetCursor(DocumentPosition),
    FocusEditor,
}

/// A single open note plus a list of known files, all in memory.
pub struct MemoryHost {
    pub active: Option<RelativePathBuf>,
    pub buffer: TextBuffer,
    pub mapper: Option<GridMapper>,
    pub links: DocumentLinks,
    pub view_mode: ViewMode,
    pub files: Vec<FileHandle>,
    pub location: NewFileLocation,
    pub fail_create: bool,
    pub calls: Vec<HostCall>,
}

impl MemoryHost {
    /// Host with `path` open showing `text`, whose links come from the scanner.
    pub fn new(path: &str, text: &str) -> Self {
        let buffer = TextBuffer::new(text);
        Self {
            active: Some(RelativePathBuf::from(path)),
            mapper: Some(GridMapper {
                buffer: buffer.clone(),
            }),
            links: scan_links(text),
            buffer,
            view_mode: ViewMode::LivePreview,
            files: vec![FileHandle::from(path)],
            location: NewFileLocation::Root,
            fail_create: false,
            calls: Vec::new(),
        }
    }

    pub fn with_files(mut self, paths: &[&str]) -> Self {
        self.files.extend(paths.iter().map(|path| FileHandle::from(*path)));
        self
    }

    pub fn without_mapper(mut self) -> Self {
        self.mapper = None;
        self
    }
}

impl LineColumns for MemoryHost {
    fn offset_to_position(&self, offset: usize) -> Option<DocumentPosition> {
        self.buffer.offset_to_position(offset)
    }
}

impl EditorView for MemoryHost {
    fn active_path(&self) -> Option<RelativePathBuf> {
        self.active.clone()
    }

    fn coordinate_mapper(&self) -> Option<&dyn CoordinateMapper> {
        self.mapper.as_ref().map(|mapper| mapper as &dyn CoordinateMapper)
    }

    fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    fn set_cursor(&mut self, position: DocumentPosition) {
        self.calls.push(HostCall::SetCursor(position));
    }

    fn focus_editor(&mut self) {
        self.calls.push(HostCall::FocusEditor);
    }
}

impl LinkIndex for MemoryHost {
    fn document_links(&self, path: &RelativePath) -> Option<DocumentLinks> {
        (self.active.as_deref() == Some(path)).then(|| self.links.clone())
    }
}

impl LinkResolver for MemoryHost {
    fn resolve_link_path(&self, target: &str, from: &RelativePath) -> Option<FileHandle> {
        if target.is_empty() {
            return self.files.iter().find(|file| file.path() == from).cloned();
        }
        self.files
            .iter()
            .find(|file| file.link_path() == target || file.basename() == target)
            .cloned()
    }
}

impl Workspace for MemoryHost {
    fn open_link(&mut self, link: &str, from: &RelativePath, new_tab: bool) -> Result<(), HostError> {
        self.calls.push(HostCall::OpenLink {
            link: link.to_string(),
            from: from.to_relative_path_buf(),
            new_tab,
        });
        Ok(())
    }

    fn open_file(&mut self, file: &FileHandle, pane: PaneKind) -> Result<(), HostError> {
        self.calls
            .push(HostCall::OpenFile(file.path().to_relative_path_buf(), pane));
        Ok(())
    }
}

impl Vault for MemoryHost {
    fn create_file(&mut self, path: &RelativePath, _contents: &str) -> Result<FileHandle, HostError> {
        if self.fail_create || self.files.iter().any(|file| file.path() == path) {
            return Err(HostError::AlreadyExists(path.to_relative_path_buf()));
        }
        self.calls.push(HostCall::CreateFile(path.to_relative_path_buf()));
        let file = FileHandle::new(path.to_relative_path_buf());
        self.files.push(file.clone());
        Ok(file)
    }

    fn new_file_location(&self) -> NewFileLocation {
        self.location.clone()
    }
}

impl CreationConfirmer for MemoryHost {
    fn confirm_creation(&mut self, path: &RelativePath) {
        self.calls
            .push(HostCall::ConfirmCreation(path.to_relative_path_buf()));
    }
}

/// A click on `line`/`column` of the open note.
pub fn click_at(line: usize, column: usize, modifiers: Modifiers) -> PointerEvent {
    PointerEvent::new(ScreenPoint::new(column as f64, line as f64), modifiers)
}
