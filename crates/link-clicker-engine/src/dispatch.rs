use relative_path::{RelativePath, RelativePathBuf};

use crate::classify::{Classification, Resolution, link_text};
use crate::host::ViewMode;
use crate::links::kinds::Embed;
use crate::position::DocumentPosition;
use crate::settings::{NewFileLocation, Settings};

/// What to do about one click. Computing it has no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickDecision {
    /// Follow the link. `link` keeps its anchor but not its alias.
    Navigate { link: String, new_tab: bool },
    /// Ask whether to create the missing note at `path`.
    OfferCreation { path: RelativePathBuf },
    /// Put the cursor inside the embed's source text.
    RepositionCursor(DocumentPosition),
    /// Swallow the click without doing anything else.
    Suppress,
    /// Leave the click to the host.
    PassThrough,
}

impl ClickDecision {
    /// Whether the host's default click behavior must be cancelled.
    pub fn cancels_default(&self) -> bool {
        !matches!(self, ClickDecision::PassThrough)
    }
}

/// Whether a click may jump to (or create) its target.
///
/// With `jump_only_with_modifier` set, jumping needs the primary modifier.
/// With it cleared the toggle inverts: a plain click jumps and holding the
/// modifier is what stops the jump. So the answer is "the setting and the
/// modifier agree", not "the modifier is held".
pub fn can_jump(jump_only_with_modifier: bool, modifier_held: bool) -> bool {
    jump_only_with_modifier == modifier_held
}

/// Everything known about a located and classified link click.
#[derive(Debug, Clone, Copy)]
pub struct ClickInput<'a> {
    /// Raw link text, alias and anchor included.
    pub raw_link: &'a str,
    pub classification: &'a Classification,
    pub is_embed: bool,
    /// Start of the embed's source text, when the document has one for this target.
    pub embed_start: Option<DocumentPosition>,
    pub modifier_held: bool,
    pub view_mode: ViewMode,
    /// Document the click happened in.
    pub source: &'a RelativePath,
    pub new_file_location: &'a NewFileLocation,
}

/// Picks the action for a click on a link.
///
/// | resolution | can jump | embed | decision |
/// |---|---|---|---|
/// | unresolved | yes | any | offer creation, if enabled |
/// | unresolved | no  | yes | cursor after `![[`, in live preview only |
/// | unresolved | no  | no  | pass through |
/// | resolved   | yes | any | navigate |
/// | resolved   | no  | any | suppress |
pub fn decide(input: &ClickInput<'_>, settings: &Settings) -> ClickDecision {
    let jump = can_jump(settings.jump_only_with_modifier, input.modifier_held);

    match (&input.classification.resolution, jump) {
        (Resolution::Unresolved, true) => {
            let target = &input.classification.target;
            if !settings.confirm_create_file || target.is_empty() {
                return ClickDecision::PassThrough;
            }
            ClickDecision::OfferCreation {
                path: input.new_file_location.creation_path(target, input.source),
            }
        }
        (Resolution::Unresolved, false) => {
            if !input.is_embed || !input.view_mode.is_live_preview() {
                return ClickDecision::PassThrough;
            }
            match input.embed_start {
                Some(start) => ClickDecision::RepositionCursor(DocumentPosition::new(
                    start.line,
                    start.column + Embed::PREFIX_LEN,
                )),
                None => ClickDecision::PassThrough,
            }
        }
        (Resolution::Resolved(_), true) => ClickDecision::Navigate {
            link: link_text(input.raw_link).to_string(),
            new_tab: settings.open_at_new_tab,
        },
        (Resolution::Resolved(_), false) => ClickDecision::Suppress,
    }
}
