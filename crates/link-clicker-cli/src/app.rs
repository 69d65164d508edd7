use std::path::PathBuf;

use link_clicker_config::Config;
use link_clicker_engine::{
    ClickDecision, ClickRegistry, CoordinateMapper, CreationConfirmer, DocumentLinks,
    DocumentPosition, EditorView, FileHandle, HandlerId, HostError, LineColumns, LinkClicker,
    LinkIndex, LinkResolver, LinkTarget, Modifiers, NewFileLocation, NoteVault, PaneKind,
    PointerEvent, ScreenPoint, Settings, TextBuffer, Vault, ViewMode, Workspace, accept_creation,
    classify::anchor, links::scan_buffer,
};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;
use relative_path::{RelativePath, RelativePathBuf};
use unicode_width::UnicodeWidthChar;

/// Where a note's text is drawn: the inner screen area and the first visible line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub area: Rect,
    pub scroll: usize,
}

/// One open note.
pub struct NoteTab {
    pub file: FileHandle,
    pub buffer: TextBuffer,
    pub links: DocumentLinks,
    pub cursor: DocumentPosition,
    pub viewport: Viewport,
}

impl NoteTab {
    fn load(vault: &NoteVault, file: FileHandle) -> Result<Self, HostError> {
        let text = vault
            .read(file.path())
            .map_err(|err| HostError::NotFound(err.to_string()))?;
        let buffer = TextBuffer::new(&text);
        Ok(Self {
            links: scan_buffer(&buffer),
            file,
            buffer,
            cursor: DocumentPosition::default(),
            viewport: Viewport::default(),
        })
    }

    /// Buffer position drawn at a terminal cell.
    ///
    /// Lines are not wrapped and chars take their display width, so CJK and
    /// emoji cover two cells and control chars none. Cells past the end of a
    /// line clamp to the line end; cells below the last line have no position.
    pub fn position_at(&self, column: u16, row: u16) -> Option<DocumentPosition> {
        let area = self.viewport.area;
        if column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
            return None;
        }
        let line = usize::from(row - area.y) + self.viewport.scroll;
        let text = self.buffer.line_text(line)?;
        let column = column_at_cell(&text, usize::from(column - area.x));
        Some(DocumentPosition::new(line, column))
    }

    /// Terminal cell the cursor is drawn at, if it is on screen.
    pub fn cursor_cell(&self) -> Option<Position> {
        let area = self.viewport.area;
        let row = self.cursor.line.checked_sub(self.viewport.scroll)?;
        if row >= usize::from(area.height) {
            return None;
        }
        let text = self.buffer.line_text(self.cursor.line)?;
        let x = usize::from(area.x) + cells_before(&text, self.cursor.column);
        if x >= usize::from(area.right()) {
            return None;
        }
        Some(Position::new(
            u16::try_from(x).ok()?,
            area.y + u16::try_from(row).ok()?,
        ))
    }

    /// Scrolls just enough for the cursor line to be visible.
    pub fn scroll_to_cursor(&mut self) {
        let height = usize::from(self.viewport.area.height).max(1);
        let line = self.cursor.line;
        if line < self.viewport.scroll {
            self.viewport.scroll = line;
        } else if line >= self.viewport.scroll + height {
            self.viewport.scroll = line + 1 - height;
        }
    }
}

impl CoordinateMapper for NoteTab {
    fn offset_at(&self, point: ScreenPoint) -> Option<usize> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let position = self.position_at(point.x as u16, point.y as u16)?;
        self.buffer.position_to_offset(position)
    }
}

fn cell_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Char column drawn at `cell`; cells past the text give the line length.
fn column_at_cell(text: &str, cell: usize) -> usize {
    let mut start = 0;
    for (column, c) in text.chars().enumerate() {
        let width = cell_width(c);
        if cell < start + width {
            return column;
        }
        start += width;
    }
    text.chars().count()
}

/// Cells taken by the first `column` chars of `text`.
fn cells_before(text: &str, column: usize) -> usize {
    text.chars().take(column).map(cell_width).sum()
}

/// Line holding the heading (`## Title`) or block id (`^id`) an anchor names.
///
/// For nested heading anchors (`Top#Sub`) the last heading is used.
pub fn anchor_line(buffer: &TextBuffer, anchor: &str) -> Option<usize> {
    let block_id = anchor.strip_prefix('^');
    let heading = anchor.rsplit('#').next().unwrap_or(anchor).trim();

    (0..buffer.line_count()).find(|&line| {
        let Some(text) = buffer.line_text(line) else {
            return false;
        };
        match block_id {
            Some(id) => text.trim_end().ends_with(&format!("^{id}")),
            None => {
                let trimmed = text.trim_start();
                trimmed.starts_with('#')
                    && trimmed.trim_start_matches('#').trim().eq_ignore_ascii_case(heading)
            }
        }
    })
}

/// The editor side of the terminal app: vault, tabs and view state.
///
/// This is the host the click pipeline runs against.
pub struct Editor {
    pub vault: NoteVault,
    pub tabs: Vec<NoteTab>,
    pub active: usize,
    pub view_mode: ViewMode,
    pub location: NewFileLocation,
    pub pending_creation: Option<RelativePathBuf>,
    pub editor_focused: bool,
}

impl Editor {
    pub fn new(vault: NoteVault, location: NewFileLocation) -> Self {
        Self {
            vault,
            tabs: Vec::new(),
            active: 0,
            view_mode: ViewMode::default(),
            location,
            pending_creation: None,
            editor_focused: false,
        }
    }

    pub fn active_tab(&self) -> Option<&NoteTab> {
        self.tabs.get(self.active)
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut NoteTab> {
        self.tabs.get_mut(self.active)
    }

    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active = (self.active + 1) % self.tabs.len();
        }
    }

    pub fn close_tab(&mut self) {
        if self.active < self.tabs.len() {
            self.tabs.remove(self.active);
            self.active = self.active.min(self.tabs.len().saturating_sub(1));
        }
    }

    fn jump_to_anchor(&mut self, anchor: &str) {
        let Some(tab) = self.active_tab_mut() else {
            return;
        };
        match anchor_line(&tab.buffer, anchor) {
            Some(line) => {
                tab.cursor = DocumentPosition::new(line, 0);
                tab.scroll_to_cursor();
            }
            None => log::warn!("no heading or block for #{anchor} in {}", tab.file),
        }
    }
}

impl LineColumns for Editor {
    fn offset_to_position(&self, offset: usize) -> Option<DocumentPosition> {
        self.active_tab()?.buffer.offset_to_position(offset)
    }
}

impl EditorView for Editor {
    fn active_path(&self) -> Option<RelativePathBuf> {
        self.active_tab()
            .map(|tab| tab.file.path().to_relative_path_buf())
    }

    fn coordinate_mapper(&self) -> Option<&dyn CoordinateMapper> {
        self.active_tab().map(|tab| tab as &dyn CoordinateMapper)
    }

    fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    fn set_cursor(&mut self, position: DocumentPosition) {
        if let Some(tab) = self.active_tab_mut() {
            tab.cursor = position;
            tab.scroll_to_cursor();
        }
    }

    fn focus_editor(&mut self) {
        self.editor_focused = true;
    }
}

impl LinkIndex for Editor {
    /// Open notes answer from their buffer, others from disk.
    fn document_links(&self, path: &RelativePath) -> Option<DocumentLinks> {
        match self.tabs.iter().find(|tab| tab.file.path() == path) {
            Some(tab) => Some(tab.links.clone()),
            None => self.vault.document_links(path),
        }
    }
}

impl LinkResolver for Editor {
    fn resolve_link_path(&self, target: &str, from: &RelativePath) -> Option<FileHandle> {
        self.vault.resolve(target, from)
    }
}

impl Workspace for Editor {
    fn open_link(&mut self, link: &str, from: &RelativePath, new_tab: bool) -> Result<(), HostError> {
        let target = LinkTarget::normalize(link);
        let file = self
            .vault
            .resolve(target.as_str(), from)
            .ok_or_else(|| HostError::NotFound(link.to_string()))?;

        let already_active = self.active_tab().is_some_and(|tab| tab.file == file);
        if new_tab || !already_active {
            let pane = if new_tab {
                PaneKind::Tab
            } else {
                PaneKind::Current
            };
            self.open_file(&file, pane)?;
        }
        if let Some(anchor) = anchor(link) {
            self.jump_to_anchor(anchor);
        }
        Ok(())
    }

    fn open_file(&mut self, file: &FileHandle, pane: PaneKind) -> Result<(), HostError> {
        let mut tab = NoteTab::load(&self.vault, file.clone())?;
        if let Some(current) = self.active_tab() {
            tab.viewport.area = current.viewport.area;
        }
        if pane == PaneKind::Current && self.active < self.tabs.len() {
            self.tabs[self.active] = tab;
        } else {
            self.tabs.push(tab);
            self.active = self.tabs.len() - 1;
        }
        log::info!("opened {file} ({pane:?})");
        Ok(())
    }
}

impl Vault for Editor {
    fn create_file(&mut self, path: &RelativePath, contents: &str) -> Result<FileHandle, HostError> {
        self.vault.create(path, contents)
    }

    fn new_file_location(&self) -> NewFileLocation {
        self.location.clone()
    }
}

impl CreationConfirmer for Editor {
    fn confirm_creation(&mut self, path: &RelativePath) {
        self.pending_creation = Some(path.to_relative_path_buf());
    }
}

/// Mouse click handlers registered with the terminal event loop.
#[derive(Debug, Default)]
pub struct ClickHandlers {
    next_id: u64,
    registered: Vec<HandlerId>,
}

impl ClickHandlers {
    pub fn is_active(&self) -> bool {
        !self.registered.is_empty()
    }
}

impl ClickRegistry for ClickHandlers {
    fn register_click_handler(&mut self) -> HandlerId {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        self.registered.push(id);
        id
    }

    fn unregister_click_handler(&mut self, id: HandlerId) {
        self.registered.retain(|registered| *registered != id);
    }
}

pub struct App {
    pub editor: Editor,
    pub clicker: LinkClicker,
    handlers: ClickHandlers,
    pub config: Config,
    config_path: PathBuf,
    pub file_list_state: ListState,
    pub status: String,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf) -> anyhow::Result<Self> {
        let vault = NoteVault::open(&config.vault_path)?;
        let mut app = Self {
            editor: Editor::new(vault, config.new_file_location.clone()),
            clicker: LinkClicker::new(config.clicks),
            handlers: ClickHandlers::default(),
            config,
            config_path,
            file_list_state: ListState::default(),
            status: String::new(),
        };
        app.clicker.load(&mut app.handlers);

        if app.editor.vault.notes().next().is_some() {
            app.file_list_state.select(Some(0));
            app.open_selected();
        }
        Ok(app)
    }

    pub fn notes(&self) -> Vec<FileHandle> {
        self.editor.vault.notes().cloned().collect()
    }

    pub fn next_file(&mut self) {
        let count = self.notes().len();
        if count == 0 {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.file_list_state.select(Some(i));
    }

    pub fn previous_file(&mut self) {
        let count = self.notes().len();
        if count == 0 {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.file_list_state.select(Some(i));
    }

    /// Opens the file selected in the list in the current tab.
    pub fn open_selected(&mut self) {
        let Some(file) = self
            .file_list_state
            .selected()
            .and_then(|index| self.notes().into_iter().nth(index))
        else {
            return;
        };
        if let Err(err) = self.editor.open_file(&file, PaneKind::Current) {
            log::error!("failed to open {file}: {err}");
            self.status = format!("Error opening {file}: {err}");
        }
    }

    /// A left click on a terminal cell, handed to the link clicker first.
    ///
    /// Unless the click was taken over, it just moves the cursor there.
    pub fn click(&mut self, column: u16, row: u16, modifiers: Modifiers) {
        let mut event = PointerEvent::new(
            ScreenPoint::new(f64::from(column), f64::from(row)),
            modifiers,
        );
        let decision = if self.handlers.is_active() {
            self.clicker.on_click(&mut self.editor, &mut event)
        } else {
            ClickDecision::PassThrough
        };

        if !event.default_prevented()
            && self.editor.view_mode != ViewMode::Reading
            && let Some(tab) = self.editor.active_tab_mut()
            && let Some(position) = tab.position_at(column, row)
        {
            tab.cursor = position;
        }
        self.status = describe(&decision);
    }

    pub fn confirm_pending(&mut self) {
        let Some(path) = self.editor.pending_creation.take() else {
            return;
        };
        self.status = match accept_creation(&mut self.editor, &path) {
            Some(file) => format!("Created {file}"),
            None => format!("Could not create {path}"),
        };
    }

    pub fn cancel_pending(&mut self) {
        if let Some(path) = self.editor.pending_creation.take() {
            self.status = format!("Did not create {path}");
        }
    }

    pub fn cycle_view_mode(&mut self) {
        self.editor.view_mode = self.editor.view_mode.next();
        self.status = format!("View mode: {:?}", self.editor.view_mode);
    }

    /// Flips click setting 1, 2 or 3 and saves the config.
    pub fn toggle_setting(&mut self, number: u8) {
        let mut settings = *self.clicker.settings();
        let (name, value) = match number {
            1 => {
                settings.jump_only_with_modifier = !settings.jump_only_with_modifier;
                ("jump only with modifier", settings.jump_only_with_modifier)
            }
            2 => {
                settings.confirm_create_file = !settings.confirm_create_file;
                ("confirm file creation", settings.confirm_create_file)
            }
            3 => {
                settings.open_at_new_tab = !settings.open_at_new_tab;
                ("open in new tab", settings.open_at_new_tab)
            }
            _ => return,
        };
        self.apply_settings(settings);
        self.status = format!("{name}: {}", if value { "on" } else { "off" });
    }

    fn apply_settings(&mut self, settings: Settings) {
        self.clicker.set_settings(settings);
        self.config.clicks = settings;
        if let Err(err) = self.config.save_to_path(&self.config_path) {
            log::error!("failed to save config to {}: {err}", self.config_path.display());
            self.status = format!("Error saving config: {err}");
        }
    }

    pub fn shutdown(&mut self) {
        self.clicker.unload(&mut self.handlers);
    }
}

fn describe(decision: &ClickDecision) -> String {
    match decision {
        ClickDecision::Navigate { link, new_tab: true } => format!("Opened {link} in a new tab"),
        ClickDecision::Navigate { link, .. } => format!("Opened {link}"),
        ClickDecision::OfferCreation { path } => format!("Create {path}?"),
        ClickDecision::RepositionCursor(position) => format!("Cursor moved to {position}"),
        ClickDecision::Suppress => "Hold the modifier to follow links".to_string(),
        ClickDecision::PassThrough => String::new(),
    }
}
