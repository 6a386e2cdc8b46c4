//! Input events and event subscriptions.
//!
//! Hosts translate their native events into [`InputEvent`] and listen only
//! where controllers asked them to via [`Subscription`].

use crate::document::ElementId;

/// Keyboard key, as far as page behaviors care.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Any other key, by its DOM key name.
    Other(String),
}

impl Key {
    /// Parses a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A discrete input event delivered to controllers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer entered the element (does not bubble).
    PointerEnter(ElementId),
    /// Pointer left the element (does not bubble).
    PointerLeave(ElementId),
    /// Primary click; `target` is the innermost element clicked.
    Click {
        /// Innermost element under the pointer.
        target: ElementId,
    },
    /// Key pressed anywhere in the document.
    KeyPress(Key),
}

impl InputEvent {
    /// Returns the kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::PointerEnter(_) => EventKind::PointerEnter,
            Self::PointerLeave(_) => EventKind::PointerLeave,
            Self::Click { .. } => EventKind::Click,
            Self::KeyPress(_) => EventKind::KeyPress,
        }
    }
}

/// Event kinds a controller can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// `mouseenter`.
    PointerEnter,
    /// `mouseleave`.
    PointerLeave,
    /// `click`.
    Click,
    /// `keydown`.
    KeyPress,
}

impl EventKind {
    /// Returns the DOM event type name.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::PointerEnter => "mouseenter",
            Self::PointerLeave => "mouseleave",
            Self::Click => "click",
            Self::KeyPress => "keydown",
        }
    }
}

/// Where a listener is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventSource {
    /// The document itself.
    Document,
    /// A specific element.
    Element(ElementId),
}

/// A request to the host to deliver one kind of event from one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subscription {
    /// Listener location.
    pub source: EventSource,
    /// Event kind.
    pub kind: EventKind,
}

impl Subscription {
    /// Subscribes to `kind` on `element`.
    #[must_use]
    pub const fn element(element: ElementId, kind: EventKind) -> Self {
        Self {
            source: EventSource::Element(element),
            kind,
        }
    }

    /// Subscribes to `kind` on the document.
    #[must_use]
    pub const fn document(kind: EventKind) -> Self {
        Self {
            source: EventSource::Document,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_names() {
        assert_eq!(Key::from_dom_key("Escape"), Key::Escape);
        assert_eq!(Key::from_dom_key("Esc"), Key::Escape);
        assert_eq!(Key::from_dom_key("Enter"), Key::Other("Enter".to_string()));
        assert_eq!(Key::from_dom_key("q"), Key::Other("q".to_string()));
    }

    #[test]
    fn test_event_kind() {
        let id = ElementId::new(3);

        assert_eq!(InputEvent::PointerEnter(id).kind(), EventKind::PointerEnter);
        assert_eq!(InputEvent::Click { target: id }.kind(), EventKind::Click);
        assert_eq!(InputEvent::KeyPress(Key::Escape).kind().dom_name(), "keydown");
    }
}
