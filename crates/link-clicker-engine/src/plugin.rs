use std::cell::RefCell;

use relative_path::{RelativePath, RelativePathBuf};

use crate::classify::classify;
use crate::dispatch::{ClickDecision, ClickInput, decide};
use crate::event::{Platform, PointerEvent};
use crate::file::FileHandle;
use crate::host::{Host, HostError, PaneKind, Vault, Workspace};
use crate::links::locate_click;
use crate::position;
use crate::settings::Settings;

#[derive(Debug, thiserror::Error)]
pub enum ClickError {
    #[error("Error creating or opening note at path: {path}: {source}")]
    Creation {
        path: RelativePathBuf,
        source: HostError,
    },
    #[error("Error opening link {link} from {from}: {source}")]
    Navigation {
        link: String,
        from: RelativePathBuf,
        source: HostError,
    },
}

/// Registration token for a document-level click handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u64);

/// Host facility for intercepting clicks before default handling.
pub trait ClickRegistry {
    fn register_click_handler(&mut self) -> HandlerId;
    fn unregister_click_handler(&mut self, id: HandlerId);
}

/// The link click plugin: settings plus the click pipeline.
///
/// Clicks run one at a time to completion. Settings are only read while a
/// click is handled.
#[derive(Debug)]
pub struct LinkClicker {
    settings: Settings,
    platform: Platform,
    registration: Option<HandlerId>,
    /// Last view found without a coordinate mapper.
    unmapped_view: RefCell<Option<RelativePathBuf>>,
}

impl LinkClicker {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            platform: Platform::current(),
            registration: None,
            unmapped_view: RefCell::new(None),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn is_loaded(&self) -> bool {
        self.registration.is_some()
    }

    /// Registers the click handler. Loading twice keeps the first registration.
    pub fn load<R: ClickRegistry + ?Sized>(&mut self, registry: &mut R) {
        if self.registration.is_some() {
            return;
        }
        self.registration = Some(registry.register_click_handler());
        log::info!("link clicker loaded");
    }

    pub fn unload<R: ClickRegistry + ?Sized>(&mut self, registry: &mut R) {
        if let Some(id) = self.registration.take() {
            registry.unregister_click_handler(id);
            log::info!("link clicker unloaded");
        }
    }

    /// Handles a click: decides, cancels the default action unless passing
    /// through, then carries the decision out.
    ///
    /// Nothing fails out of here; host errors are logged.
    pub fn on_click<H: Host + ?Sized>(
        &self,
        host: &mut H,
        event: &mut PointerEvent,
    ) -> ClickDecision {
        let Some((source, decision)) = self.resolve_click(&*host, event) else {
            return ClickDecision::PassThrough;
        };
        if decision.cancels_default() {
            event.prevent_default();
        }
        execute(host, &source, &decision);
        decision
    }

    /// The decision for a click, without acting on it.
    pub fn decide_click<H: Host + ?Sized>(&self, host: &H, event: &PointerEvent) -> ClickDecision {
        self.resolve_click(host, event)
            .map(|(_, decision)| decision)
            .unwrap_or(ClickDecision::PassThrough)
    }

    fn resolve_click<H: Host + ?Sized>(
        &self,
        host: &H,
        event: &PointerEvent,
    ) -> Option<(RelativePathBuf, ClickDecision)> {
        let source = host.active_path()?;
        let Some(mapper) = host.coordinate_mapper() else {
            self.note_unmapped_view(&source);
            return None;
        };
        self.unmapped_view.replace(None);

        let position = position::resolve(mapper, host, event.point);
        let links = host.document_links(&source).unwrap_or_default();
        let located = locate_click(position, &links, event.target.as_ref())?;

        let classification = classify(&located.target, &source, host);
        let embed_start = if located.is_embed {
            located
                .span
                .as_ref()
                .or_else(|| links.first_embed_to(&classification.target))
                .map(|span| span.start)
        } else {
            None
        };

        let new_file_location = host.new_file_location();
        let input = ClickInput {
            raw_link: &located.target,
            classification: &classification,
            is_embed: located.is_embed,
            embed_start,
            modifier_held: event.modifiers.primary(self.platform),
            view_mode: host.view_mode(),
            source: &source,
            new_file_location: &new_file_location,
        };
        let decision = decide(&input, &self.settings);
        log::debug!(
            "click in {source} on {:?} (embed: {}, resolved: {}) -> {decision:?}",
            located.target,
            located.is_embed,
            classification.resolution.is_resolved(),
        );
        Some((source, decision))
    }

    /// Warns the first time a view turns out to have no coordinate mapper.
    /// Returns whether it warned.
    fn note_unmapped_view(&self, source: &RelativePath) -> bool {
        let mut last = self.unmapped_view.borrow_mut();
        if last.as_deref() == Some(source) {
            log::debug!("passing click in {source} through");
            return false;
        }
        log::warn!("view of {source} cannot map coordinates; passing clicks through");
        *last = Some(source.to_relative_path_buf());
        true
    }
}

impl Default for LinkClicker {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

fn execute<H: Host + ?Sized>(host: &mut H, source: &RelativePath, decision: &ClickDecision) {
    match decision {
        ClickDecision::Navigate { link, new_tab } => {
            if let Err(source_err) = host.open_link(link, source, *new_tab) {
                let err = ClickError::Navigation {
                    link: link.clone(),
                    from: source.to_relative_path_buf(),
                    source: source_err,
                };
                log::error!("{err}");
            }
        }
        ClickDecision::OfferCreation { path } => host.confirm_creation(path),
        ClickDecision::RepositionCursor(position) => {
            host.set_cursor(*position);
            host.focus_editor();
        }
        ClickDecision::Suppress | ClickDecision::PassThrough => {}
    }
}

/// Creates an empty note at `path` and opens it in a new tab.
pub fn create_and_open<H: Vault + Workspace + ?Sized>(
    host: &mut H,
    path: &RelativePath,
) -> Result<FileHandle, ClickError> {
    let creation_error = |source| ClickError::Creation {
        path: path.to_relative_path_buf(),
        source,
    };
    let file = host.create_file(path, "").map_err(creation_error)?;
    host.open_file(&file, PaneKind::Tab).map_err(creation_error)?;
    Ok(file)
}

/// Runs [`create_and_open`] after the user accepted a creation offer.
///
/// Failures are logged and end here; there is no retry.
pub fn accept_creation<H: Vault + Workspace + ?Sized>(
    host: &mut H,
    path: &RelativePath,
) -> Option<FileHandle> {
    match create_and_open(host, path) {
        Ok(file) => {
            log::info!("created {file}");
            Some(file)
        }
        Err(err) => {
            log::error!("{err}");
            None
        }
    }
}
