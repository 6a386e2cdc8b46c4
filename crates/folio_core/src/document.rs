//! The document seam.
//!
//! Controllers never touch a concrete DOM. They read and write through
//! [`Document`], which the browser host implements over `web-sys` and
//! [`crate::MemoryDocument`] implements in memory.

use crate::error::FolioResult;
use crate::geometry::Rect;
use crate::selector::Selector;

/// Stable identity of an element within one document.
///
/// Identities are handed out by the host and stay valid for the lifetime of
/// the document. They are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Creates an element ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Read/write access to a live document.
///
/// Mutations are infallible from the caller's point of view except where a
/// host can genuinely refuse (element creation, insertion). Hosts that hit an
/// error on any other write degrade silently.
pub trait Document {
    /// Returns the body element.
    fn body(&self) -> ElementId;

    /// Returns every element matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Vec<ElementId>;

    /// Returns the first element matching `selector`, in document order.
    fn query_first(&self, selector: &Selector) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    /// Returns an attribute value, or `None` when the attribute is absent.
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Sets an attribute value.
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    /// Returns true if the element carries `class`.
    fn has_class(&self, element: ElementId, class: &str) -> bool;

    /// Adds `class` to the element (no-op if present).
    fn add_class(&mut self, element: ElementId, class: &str);

    /// Removes `class` from the element (no-op if absent).
    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Sets an inline style property. An empty value clears the property.
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// Creates a detached element.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FolioError::Host`] if the host cannot create it.
    fn create_element(&mut self, tag: &str) -> FolioResult<ElementId>;

    /// Replaces the element's text content.
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FolioError::Host`] if the host refuses the insertion.
    fn append_child(&mut self, parent: ElementId, child: ElementId) -> FolioResult<()>;

    /// Returns the next element sibling.
    fn next_sibling(&self, element: ElementId) -> Option<ElementId>;

    /// Returns true if `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    /// Returns the element's current bounding box in viewport coordinates.
    fn bounding_rect(&self, element: ElementId) -> Rect;

    /// Returns the viewport width.
    fn viewport_width(&self) -> f32;

    /// Returns true if the pointer is currently over the element.
    fn is_hovered(&self, element: ElementId) -> bool;
}
