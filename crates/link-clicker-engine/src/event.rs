use crate::position::ScreenPoint;

/// CSS class hosts put on rendered embed elements.
pub const INTERNAL_EMBED_CLASS: &str = "internal-embed";

/// Which key counts as the primary modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Cmd is the primary modifier.
    MacOs,
    /// Ctrl is the primary modifier.
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Cmd on macOS, the Windows/Super key elsewhere.
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Self::NONE
        }
    }

    /// Whether the platform's primary modifier is held.
    pub fn primary(&self, platform: Platform) -> bool {
        match platform {
            Platform::MacOs => self.meta,
            Platform::Other => self.ctrl,
        }
    }
}

/// What the host knows about the element under the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementInfo {
    pub classes: Vec<String>,
    pub src: Option<String>,
}

impl ElementInfo {
    /// A rendered embed element pointing at `src`.
    pub fn embed(src: impl Into<String>) -> Self {
        Self {
            classes: vec![INTERNAL_EMBED_CLASS.to_string()],
            src: Some(src.into()),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The embed source, if this is a rendered embed carrying a non-empty `src`.
    pub fn embed_src(&self) -> Option<&str> {
        if !self.has_class(INTERNAL_EMBED_CLASS) {
            return None;
        }
        self.src.as_deref().filter(|src| !src.is_empty())
    }
}

/// A pointer click as delivered by the host, before default handling.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub point: ScreenPoint,
    pub modifiers: Modifiers,
    pub target: Option<ElementInfo>,
    default_prevented: bool,
}

impl PointerEvent {
    pub fn new(point: ScreenPoint, modifiers: Modifiers) -> Self {
        Self {
            point,
            modifiers,
            target: None,
            default_prevented: false,
        }
    }

    pub fn with_target(mut self, target: ElementInfo) -> Self {
        self.target = Some(target);
        self
    }

    /// Stops the host from running its own click behavior for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Platform::MacOs, Modifiers::meta(), true)]
    #[case(Platform::MacOs, Modifiers::ctrl(), false)]
    #[case(Platform::Other, Modifiers::ctrl(), true)]
    #[case(Platform::Other, Modifiers::meta(), false)]
    #[case(Platform::Other, Modifiers::NONE, false)]
    fn primary_modifier_depends_on_platform(
        #[case] platform: Platform,
        #[case] modifiers: Modifiers,
        #[case] expected: bool,
    ) {
        assert_eq!(modifiers.primary(platform), expected);
    }

    #[test]
    fn embed_src_requires_marker_class() {
        let plain = ElementInfo {
            classes: vec!["cm-line".to_string()],
            src: Some("Note".to_string()),
        };
        assert_eq!(plain.embed_src(), None);
        assert_eq!(ElementInfo::embed("Note").embed_src(), Some("Note"));
    }

    #[test]
    fn embed_without_src_is_ignored() {
        let element = ElementInfo {
            classes: vec![INTERNAL_EMBED_CLASS.to_string()],
            src: Some(String::new()),
        };
        assert_eq!(element.embed_src(), None);
    }

    #[test]
    fn prevent_default_is_sticky() {
        let mut event = PointerEvent::new(ScreenPoint::default(), Modifiers::NONE);
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
