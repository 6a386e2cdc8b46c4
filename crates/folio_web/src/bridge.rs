//! Host-neutral glue between browser objects and folio identities.
//!
//! Kept free of `web-sys` so it builds and tests on every target.

use folio_core::{ElementId, EventKind, InputEvent, Key};

/// Hands out stable [`ElementId`]s for host nodes.
///
/// Interning the same node twice returns the same ID. IDs start at 1 and
/// are never reused.
#[derive(Debug)]
pub struct ElementRegistry<T> {
    nodes: Vec<T>,
}

impl<T> Default for ElementRegistry<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T: PartialEq> ElementRegistry<T> {
    /// Returns the ID of `node`, registering it on first sight.
    pub fn intern(&mut self, node: T) -> ElementId {
        if let Some(index) = self.nodes.iter().position(|known| *known == node) {
            return Self::id_at(index);
        }
        self.nodes.push(node);
        Self::id_at(self.nodes.len() - 1)
    }

    /// Returns the ID of `node` if it was registered.
    #[must_use]
    pub fn lookup(&self, node: &T) -> Option<ElementId> {
        self.nodes.iter().position(|known| known == node).map(Self::id_at)
    }
}

impl<T> ElementRegistry<T> {
    /// Returns the node registered under `id`.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&T> {
        let index = usize::try_from(id.raw()).ok()?.checked_sub(1)?;
        self.nodes.get(index)
    }

    /// Returns the number of registered nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn id_at(index: usize) -> ElementId {
        ElementId::new(index as u64 + 1)
    }
}

/// Raw facts a host extracted from one DOM event.
#[derive(Debug, Clone, Default)]
pub struct RawEvent<'a> {
    /// Element the listener was installed on, if not the document.
    pub listener: Option<ElementId>,
    /// Element the event originated from.
    pub target: Option<ElementId>,
    /// DOM key name for keyboard events.
    pub key: Option<&'a str>,
}

/// Turns a DOM event of `kind` into an [`InputEvent`].
///
/// Pointer events report the element the listener sits on, since
/// `mouseenter` and `mouseleave` do not bubble. Clicks report the original
/// target and fall back to the listener. Returns `None` when the event
/// lacks what its kind needs.
#[must_use]
pub fn translate(kind: EventKind, raw: &RawEvent<'_>) -> Option<InputEvent> {
    match kind {
        EventKind::PointerEnter => raw.listener.map(InputEvent::PointerEnter),
        EventKind::PointerLeave => raw.listener.map(InputEvent::PointerLeave),
        EventKind::Click => raw
            .target
            .or(raw.listener)
            .map(|target| InputEvent::Click { target }),
        EventKind::KeyPress => raw.key.map(|name| InputEvent::KeyPress(Key::from_dom_key(name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_stable() {
        let mut registry = ElementRegistry::default();
        let a = registry.intern("body");
        let b = registry.intern("div");

        assert_eq!(a, ElementId::new(1));
        assert_eq!(b, ElementId::new(2));
        assert_eq!(registry.intern("body"), a);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(b), Some(&"div"));
        assert_eq!(registry.lookup(&"div"), Some(b));
        assert_eq!(registry.lookup(&"span"), None);
    }

    #[test]
    fn test_get_rejects_unknown_ids() {
        let mut registry = ElementRegistry::default();
        registry.intern(7u8);

        assert_eq!(registry.get(ElementId::new(0)), None);
        assert_eq!(registry.get(ElementId::new(2)), None);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_translate_pointer_uses_listener() {
        let raw = RawEvent {
            listener: Some(ElementId::new(4)),
            target: Some(ElementId::new(9)),
            key: None,
        };

        assert_eq!(
            translate(EventKind::PointerEnter, &raw),
            Some(InputEvent::PointerEnter(ElementId::new(4)))
        );
        assert_eq!(
            translate(EventKind::PointerLeave, &raw),
            Some(InputEvent::PointerLeave(ElementId::new(4)))
        );
    }

    #[test]
    fn test_translate_click_prefers_target() {
        let raw = RawEvent {
            listener: Some(ElementId::new(4)),
            target: Some(ElementId::new(9)),
            key: None,
        };
        assert_eq!(
            translate(EventKind::Click, &raw),
            Some(InputEvent::Click { target: ElementId::new(9) })
        );

        let no_target = RawEvent {
            target: None,
            ..raw
        };
        assert_eq!(
            translate(EventKind::Click, &no_target),
            Some(InputEvent::Click { target: ElementId::new(4) })
        );
    }

    #[test]
    fn test_translate_keys() {
        let raw = RawEvent {
            key: Some("Escape"),
            ..RawEvent::default()
        };
        assert_eq!(
            translate(EventKind::KeyPress, &raw),
            Some(InputEvent::KeyPress(Key::Escape))
        );
        assert_eq!(translate(EventKind::KeyPress, &RawEvent::default()), None);
        assert_eq!(translate(EventKind::PointerEnter, &RawEvent::default()), None);
    }
}
