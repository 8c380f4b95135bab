//! Document arena and tree queries

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, Key, SlotMap};

use crate::element::{el, Element, ElementBuilder};
use crate::error::{DomError, Result};

new_key_type! {
    /// Handle to an element in a [`Document`]
    pub struct NodeId;
}

impl NodeId {
    /// Convert to a raw u64 representation (for logging)
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
}

/// An element tree with an id index
///
/// Nodes are never removed; handles stay valid for the document's lifetime.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    ids: FxHashMap<String, NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with a `<body>` root
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            parent: None,
            children: Vec::new(),
            element: el("body").element,
        });
        Self {
            nodes,
            root,
            ids: FxHashMap::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of elements, including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build `builder` as the last child of `parent`
    ///
    /// Returns the node id of the subtree's top element. When an element id is
    /// already taken, the earlier element keeps it (document order wins) and a
    /// warning is logged.
    pub fn append(&mut self, parent: NodeId, builder: ElementBuilder) -> Result<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(DomError::StaleNode);
        }
        Ok(self.build_subtree(parent, builder))
    }

    fn build_subtree(&mut self, parent: NodeId, builder: ElementBuilder) -> NodeId {
        let ElementBuilder { element, children } = builder;
        let id_attr = element.id().map(str::to_string);

        let node = self.nodes.insert(Node {
            parent: Some(parent),
            children: Vec::new(),
            element,
        });
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(node);
        }

        if let Some(id) = id_attr {
            if self.ids.contains_key(&id) {
                tracing::warn!("Duplicate element ID '{}' ignored", id);
            } else {
                self.ids.insert(id, node);
            }
        }

        for child in children {
            self.build_subtree(node, child);
        }
        node
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Like [`get_element_by_id`](Self::get_element_by_id) but fails loudly
    pub fn require(&self, id: &str) -> Result<NodeId> {
        self.get_element_by_id(id)
            .ok_or_else(|| DomError::UnknownElement(id.to_string()))
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node).map(|n| &n.element)
    }

    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node).map(|n| &mut n.element)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// All descendants of `node` in document order (excluding `node`)
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// Descendants of `node` carrying `class`, in document order
    pub fn query_class(&self, node: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|&n| self.element(n).is_some_and(|e| e.has_class(class)))
            .collect()
    }

    /// First descendant of `node` (document order) matching `predicate`
    pub fn first_descendant<F>(&self, node: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(node)
            .into_iter()
            .find(|&n| self.element(n).is_some_and(&predicate))
    }

    /// Whether `node` lies within the subtree rooted at `ancestor` (inclusive)
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Nearest inclusive ancestor of `node` matching `predicate`
    pub fn closest<F>(&self, node: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.element(n).is_some_and(&predicate) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    pub fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.closest(node, |e| e.has_class(class))
    }

    // =========================================================================
    // Content and state
    // =========================================================================

    /// Concatenated text of `node` and its descendants, in document order
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        if let Some(element) = self.element(node) {
            text.push_str(element.own_text());
        }
        for n in self.descendants(node) {
            if let Some(element) = self.element(n) {
                text.push_str(element.own_text());
            }
        }
        text
    }

    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(Element::value)
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) -> Result<()> {
        let element = self.element_mut(node).ok_or(DomError::StaleNode)?;
        element.set_value(value);
        Ok(())
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(Element::is_hidden)
    }

    /// Whether `node` and all of its ancestors are shown
    pub fn is_rendered(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            match self.element(n) {
                Some(element) if !element.is_hidden() => current = self.parent(n),
                _ => return false,
            }
        }
        true
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if let Some(element) = self.element_mut(node) {
            element.set_hidden(hidden);
        }
    }

    /// Add or remove `class` on `node`; missing nodes are ignored
    pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        if let Some(element) = self.element_mut(node) {
            element.toggle_class(class, on);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_class(class))
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Top offset of `node` inside `container`'s content box
    ///
    /// Visible direct children of the container stack by height. A deeper node
    /// reports the box of the direct child that holds it. Returns `None` when
    /// `node` is not inside `container`.
    pub fn offset_top_within(&self, container: NodeId, node: NodeId) -> Option<f32> {
        let slot = self.direct_child_of(container, node)?;
        let mut top = 0.0;
        for &child in self.children(container) {
            if child == slot {
                return Some(top);
            }
            if !self.is_hidden(child) {
                top += self.element(child).map(Element::height).unwrap_or(0.0);
            }
        }
        None
    }

    fn direct_child_of(&self, container: NodeId, node: NodeId) -> Option<NodeId> {
        let mut current = node;
        loop {
            let parent = self.parent(current)?;
            if parent == container {
                return Some(current);
            }
            current = parent;
        }
    }

    /// Scroll `container` the minimum distance that shows all of `node`
    ///
    /// Returns true if the scroll offset changed.
    pub fn scroll_into_view_nearest(&mut self, container: NodeId, node: NodeId) -> bool {
        let Some(top) = self.offset_top_within(container, node) else {
            return false;
        };
        let slot_height = self
            .direct_child_of(container, node)
            .and_then(|slot| self.element(slot))
            .map(Element::height)
            .unwrap_or(0.0);
        let bottom = top + slot_height;

        let Some(view) = self.element_mut(container) else {
            return false;
        };
        let viewport = view.height();
        let scroll_top = view.scroll_top();

        let next = if top < scroll_top {
            top
        } else if bottom > scroll_top + viewport {
            bottom - viewport
        } else {
            return false;
        };

        view.set_scroll_top(next);
        tracing::trace!("scrolled container to {}", next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_doc() -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let root = doc.root();
        let list = doc
            .append(
                root,
                el("div")
                    .id("list")
                    .height(60.0)
                    .children((0..5).map(|i| {
                        el("div")
                            .id(format!("row-{}", i))
                            .class("row")
                            .height(20.0)
                            .child(el("span").text(format!("Row {}", i)))
                    })),
            )
            .unwrap();
        let rows = doc.query_class(list, "row");
        (doc, list, rows)
    }

    #[test]
    fn test_id_index_and_require() {
        let (doc, list, rows) = list_doc();
        assert_eq!(doc.get_element_by_id("list"), Some(list));
        assert_eq!(doc.get_element_by_id("row-3"), Some(rows[3]));
        assert_eq!(
            doc.require("nope"),
            Err(DomError::UnknownElement("nope".to_string()))
        );
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let mut doc = Document::new();
        let root = doc.root();
        let first = doc.append(root, el("div").id("dup")).unwrap();
        doc.append(root, el("div").id("dup")).unwrap();
        assert_eq!(doc.get_element_by_id("dup"), Some(first));
    }

    #[test]
    fn test_descendants_document_order() {
        let (doc, list, rows) = list_doc();
        let descendants = doc.descendants(list);
        assert_eq!(descendants.len(), 10);
        assert_eq!(descendants[0], rows[0]);
        assert_eq!(descendants[2], rows[1]);
    }

    #[test]
    fn test_contains_and_closest() {
        let (doc, list, rows) = list_doc();
        let span = doc.children(rows[2])[0];

        assert!(doc.contains(list, span));
        assert!(doc.contains(span, span));
        assert!(!doc.contains(rows[1], span));
        assert_eq!(doc.closest_with_class(span, "row"), Some(rows[2]));
        assert_eq!(doc.closest_with_class(span, "missing"), None);
    }

    #[test]
    fn test_text_content() {
        let (doc, _, rows) = list_doc();
        assert_eq!(doc.text_content(rows[4]), "Row 4");
        assert_eq!(doc.text_content(doc.root()), "Row 0Row 1Row 2Row 3Row 4");
    }

    #[test]
    fn test_rendered_follows_ancestors() {
        let (mut doc, list, rows) = list_doc();
        let span = doc.children(rows[1])[0];
        assert!(doc.is_rendered(span));

        doc.set_hidden(rows[1], true);
        assert!(!doc.is_rendered(span));
        assert!(!doc.is_rendered(rows[1]));
        assert!(doc.is_rendered(rows[2]));

        doc.set_hidden(rows[1], false);
        doc.set_hidden(list, true);
        assert!(!doc.is_rendered(span));
    }

    #[test]
    fn test_offsets_skip_hidden_rows() {
        let (mut doc, list, rows) = list_doc();
        assert_eq!(doc.offset_top_within(list, rows[3]), Some(60.0));

        doc.set_hidden(rows[0], true);
        assert_eq!(doc.offset_top_within(list, rows[3]), Some(40.0));

        let span = doc.children(rows[3])[0];
        assert_eq!(doc.offset_top_within(list, span), Some(40.0));
        assert_eq!(doc.offset_top_within(rows[0], rows[3]), None);
    }

    #[test]
    fn test_scroll_into_view_nearest() {
        let (mut doc, list, rows) = list_doc();

        // Already visible
        assert!(!doc.scroll_into_view_nearest(list, rows[1]));

        // Below the viewport: align bottom edge
        assert!(doc.scroll_into_view_nearest(list, rows[4]));
        assert_eq!(doc.element(list).unwrap().scroll_top(), 40.0);

        // Above the viewport: align top edge
        assert!(doc.scroll_into_view_nearest(list, rows[0]));
        assert_eq!(doc.element(list).unwrap().scroll_top(), 0.0);
    }
}
