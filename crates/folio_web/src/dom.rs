//! [`Document`] over the live browser DOM.

use std::cell::RefCell;

use folio_core::{Document, ElementId, FolioError, FolioResult, Rect, Selector};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, Node, Window};

use crate::bridge::ElementRegistry;

/// The page document as seen through `web-sys`.
///
/// Elements are interned on first sight; the registry keeps them alive for
/// the lifetime of the page.
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
    body: ElementId,
    registry: RefCell<ElementRegistry<Element>>,
}

impl WebDocument {
    /// Binds to the current window's document.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Host`] outside a window context or before the
    /// document has a body.
    pub fn from_window(window: Window) -> FolioResult<Self> {
        let document = window
            .document()
            .ok_or_else(|| FolioError::Host("window has no document".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| FolioError::Host("document has no body".to_string()))?;

        let mut registry = ElementRegistry::default();
        let body = registry.intern(Element::from(body));

        Ok(Self {
            window,
            document,
            body,
            registry: RefCell::new(registry),
        })
    }

    /// Returns the underlying `web-sys` document.
    #[must_use]
    pub fn raw(&self) -> &web_sys::Document {
        &self.document
    }

    /// Returns the ID of a live element, registering it on first sight.
    pub fn intern(&self, element: Element) -> ElementId {
        self.registry.borrow_mut().intern(element)
    }

    /// Returns the element registered under `id`.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.registry.borrow().get(id).cloned()
    }

    fn with_element<R>(&self, id: ElementId, f: impl FnOnce(&Element) -> R) -> Option<R> {
        let element = self.element(id);
        if element.is_none() {
            tracing::warn!(element = id.raw(), "unknown element id");
        }
        element.as_ref().map(f)
    }

    fn with_html<R>(&self, id: ElementId, f: impl FnOnce(&HtmlElement) -> R) -> Option<R> {
        self.with_element(id, |element| element.dyn_ref::<HtmlElement>().map(f))
            .flatten()
    }
}

/// Renders a JS exception for logs and errors.
fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn log_failure(operation: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::warn!(operation, error = %describe(&e), "dom write failed");
    }
}

impl Document for WebDocument {
    fn body(&self) -> ElementId {
        self.body
    }

    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        let list = match self.document.query_selector_all(selector.as_str()) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(selector = %selector, error = %describe(&e), "query failed");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(element))
            .collect()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.with_element(element, |e| e.get_attribute(name)).flatten()
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(result) = self.with_element(element, |e| e.set_attribute(name, value)) {
            log_failure("set_attribute", result);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.with_element(element, |e| e.class_list().contains(class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(result) = self.with_element(element, |e| e.class_list().add_1(class)) {
            log_failure("add_class", result);
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(result) = self.with_element(element, |e| e.class_list().remove_1(class)) {
            log_failure("remove_class", result);
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        let result = self.with_html(element, |html| {
            let style = html.style();
            if value.is_empty() {
                style.remove_property(property).map(|_| ())
            } else {
                style.set_property(property, value)
            }
        });
        if let Some(result) = result {
            log_failure("set_style", result);
        }
    }

    fn create_element(&mut self, tag: &str) -> FolioResult<ElementId> {
        let element = self
            .document
            .create_element(tag)
            .map_err(|e| FolioError::Host(format!("create_element({tag}): {}", describe(&e))))?;
        Ok(self.intern(element))
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        self.with_element(element, |e| e.set_text_content(Some(text)));
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> FolioResult<()> {
        let (Some(parent_element), Some(child_element)) = (self.element(parent), self.element(child))
        else {
            return Err(FolioError::Host(format!(
                "append_child: unknown element {} or {}",
                parent.raw(),
                child.raw()
            )));
        };
        parent_element
            .append_child(&child_element)
            .map(|_| ())
            .map_err(|e| FolioError::Host(format!("append_child: {}", describe(&e))))
    }

    fn next_sibling(&self, element: ElementId) -> Option<ElementId> {
        let sibling = self.with_element(element, Element::next_element_sibling)??;
        Some(self.intern(sibling))
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let (Some(ancestor), Some(node)) = (self.element(ancestor), self.element(node)) else {
            return false;
        };
        let node: &Node = &node;
        ancestor.contains(Some(node))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.with_element(element, |e| {
            let rect = e.get_bounding_client_rect();
            Rect::new(
                rect.x() as f32,
                rect.y() as f32,
                rect.width() as f32,
                rect.height() as f32,
            )
        })
        .unwrap_or(Rect::ZERO)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn viewport_width(&self) -> f32 {
        let inner = self.window.inner_width().ok().and_then(|w| w.as_f64());
        match inner {
            Some(width) => width as f32,
            None => self
                .document
                .document_element()
                .map_or(0.0, |root| root.client_width() as f32),
        }
    }

    fn is_hovered(&self, element: ElementId) -> bool {
        self.with_element(element, |e| e.matches(":hover").unwrap_or(false))
            .unwrap_or(false)
    }
}
