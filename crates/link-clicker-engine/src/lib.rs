pub mod buffer;
pub mod classify;
pub mod dispatch;
pub mod event;
pub mod file;
pub mod host;
pub mod links;
pub mod plugin;
pub mod position;
pub mod settings;
pub mod vault;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use buffer::TextBuffer;
pub use classify::{Classification, LinkResolver, LinkTarget, Resolution, classify};
pub use dispatch::{ClickDecision, ClickInput, can_jump, decide};
pub use event::{ElementInfo, INTERNAL_EMBED_CLASS, Modifiers, Platform, PointerEvent};
pub use file::FileHandle;
pub use host::{
    CreationConfirmer, EditorView, Host, HostError, LinkIndex, PaneKind, Vault, ViewMode,
    Workspace,
};
pub use links::{DocumentLinks, LinkKind, LinkSpan, LocatedLink};
pub use plugin::{ClickError, ClickRegistry, HandlerId, LinkClicker, accept_creation, create_and_open};
pub use position::{CoordinateMapper, DocumentPosition, LineColumns, ScreenPoint};
pub use settings::{NewFileLocation, Settings};
pub use vault::{NoteVault, VaultError};
