//! In-memory document.
//!
//! A minimal element tree implementing [`Document`]. Layout is not computed:
//! bounding boxes and hover state are whatever the caller set. Every write
//! through the [`Document`] trait bumps a mutation counter so callers can
//! assert that an operation left the document untouched.

use std::collections::{BTreeMap, HashMap};

use crate::document::{Document, ElementId};
use crate::error::{FolioError, FolioResult};
use crate::geometry::Rect;
use crate::selector::Selector;

/// One element of the tree.
#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    rect: Rect,
    hovered: bool,
}

/// Element tree held in memory.
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: HashMap<ElementId, Node>,
    root: ElementId,
    body: ElementId,
    next_id: u64,
    viewport_width: f32,
    mutations: u64,
}

impl MemoryDocument {
    /// Default viewport width.
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1024.0;

    /// Creates a document containing `<html><body></body></html>`.
    #[must_use]
    pub fn new() -> Self {
        let root = ElementId::new(1);
        let body = ElementId::new(2);

        let mut nodes = HashMap::with_capacity(64);
        nodes.insert(
            root,
            Node {
                tag: "html".to_string(),
                children: vec![body],
                ..Node::default()
            },
        );
        nodes.insert(
            body,
            Node {
                tag: "body".to_string(),
                parent: Some(root),
                ..Node::default()
            },
        );

        Self {
            nodes,
            root,
            body,
            next_id: 3,
            viewport_width: Self::DEFAULT_VIEWPORT_WIDTH,
            mutations: 0,
        }
    }

    /// Sets the viewport width.
    #[must_use]
    pub fn with_viewport_width(mut self, width: f32) -> Self {
        self.viewport_width = width;
        self
    }

    /// Returns the root (`html`) element.
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Creates an element with classes and appends it under `parent`.
    ///
    /// Unknown parents leave the element detached.
    pub fn add_element(&mut self, parent: ElementId, tag: &str, classes: &[&str]) -> ElementId {
        let id = self.allocate(tag);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.classes = classes.iter().map(|c| (*c).to_string()).collect();
        }
        if let Err(e) = self.append_child(parent, id) {
            tracing::debug!(parent = parent.raw(), error = %e, "element left detached");
        }
        id
    }

    /// Sets the element's bounding box.
    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.rect = rect;
        }
    }

    /// Marks the pointer as over (or not over) the element.
    pub fn set_hovered(&mut self, element: ElementId, hovered: bool) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.hovered = hovered;
        }
    }

    /// Sets the viewport width.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// Returns the number of writes made through [`Document`].
    #[must_use]
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    /// Returns the element's tag name.
    #[must_use]
    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(&element).map(|n| n.tag.as_str())
    }

    /// Returns the element's classes in insertion order.
    #[must_use]
    pub fn classes(&self, element: ElementId) -> &[String] {
        self.nodes
            .get(&element)
            .map(|n| n.classes.as_slice())
            .unwrap_or(&[])
    }

    /// Returns an inline style value.
    #[must_use]
    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.nodes
            .get(&element)
            .and_then(|n| n.styles.get(property))
            .map(String::as_str)
    }

    /// Returns the element's own text content.
    #[must_use]
    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(&element).map(|n| n.text.as_str())
    }

    /// Returns the element's parent.
    #[must_use]
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(&element).and_then(|n| n.parent)
    }

    /// Returns the element's children.
    #[must_use]
    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.nodes
            .get(&element)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Returns every attached element in document order.
    pub fn iter_dfs(&self) -> impl Iterator<Item = ElementId> + '_ {
        DfsIterator {
            document: self,
            stack: vec![self.root],
        }
    }

    fn allocate(&mut self, tag: &str) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                tag: tag.to_ascii_lowercase(),
                ..Node::default()
            },
        );
        id
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.mutations += 1;
        self.nodes.get_mut(&element)
    }

    fn detach(&mut self, element: ElementId) {
        let parent = self.nodes.get_mut(&element).and_then(|n| n.parent.take());
        if let Some(parent_node) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent_node.children.retain(|&c| c != element);
        }
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    fn body(&self) -> ElementId {
        self.body
    }

    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.iter_dfs()
            .filter(|&id| {
                selector.matches(
                    id,
                    |n| self.parent(n),
                    |compound, n| {
                        self.nodes.get(&n).is_some_and(|node| {
                            compound.matches(&node.tag, |class| node.classes.iter().any(|c| c == class))
                        })
                    },
                )
            })
            .collect()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.nodes
            .get(&element)
            .and_then(|n| n.attributes.get(name))
            .cloned()
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(&element)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            if value.is_empty() {
                node.styles.remove(property);
            } else {
                node.styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn create_element(&mut self, tag: &str) -> FolioResult<ElementId> {
        self.mutations += 1;
        Ok(self.allocate(tag))
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.node_mut(element) {
            node.text = text.to_string();
        }
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> FolioResult<()> {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return Err(FolioError::Host(format!(
                "cannot append {} to {}: unknown element",
                child.raw(),
                parent.raw()
            )));
        }
        if self.contains(child, parent) {
            return Err(FolioError::Host(format!(
                "cannot append {} inside its own subtree",
                child.raw()
            )));
        }

        self.mutations += 1;
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        Ok(())
    }

    fn next_sibling(&self, element: ElementId) -> Option<ElementId> {
        let siblings = self.children(self.parent(element)?);
        let index = siblings.iter().position(|&c| c == element)?;
        siblings.get(index + 1).copied()
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.nodes.get(&element).map_or(Rect::ZERO, |n| n.rect)
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    fn is_hovered(&self, element: ElementId) -> bool {
        self.nodes.get(&element).is_some_and(|n| n.hovered)
    }
}

/// Depth-first iterator over the document.
struct DfsIterator<'a> {
    document: &'a MemoryDocument,
    stack: Vec<ElementId>,
}

impl Iterator for DfsIterator<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.document.children(id).iter().rev().copied());
        Some(id)
    }
}
