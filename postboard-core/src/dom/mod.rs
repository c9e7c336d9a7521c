//! In-memory DOM
//!
//! An arena of nodes addressed by [`NodeId`]. Node ids are never reused:
//! once a subtree is released its ids stay dead, so a stale handle can only
//! miss, never alias a newer node.
//!
//! Only the surface the page needs is modelled: elements with attributes,
//! text, fragments, a small selector subset, click/change listeners with
//! bubbling, and HTML serialization.

mod builder;
mod event;
mod html;
mod selector;

pub use builder::{LabeledElement, build_labeled_element};
pub use event::{Event, EventType, Listener, ListenerId};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomError, DomResult};
use event::ListenerStore;

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Element data: tag, attributes and the two form-control properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag_name: String,
    attrs: BTreeMap<String, String>,
    disabled: bool,
    value: Option<String>,
}

impl Element {
    fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            disabled: false,
            value: None,
        }
    }

    /// Lowercase tag name.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Attributes in name order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    fn class_tokens(&self) -> Vec<String> {
        self.attr("class")
            .map(|value| value.split_whitespace().map(ToOwned::to_owned).collect())
            .unwrap_or_default()
    }

    fn set_class_tokens(&mut self, classes: &[String]) {
        if classes.is_empty() {
            self.attrs.remove("class");
        } else {
            self.attrs.insert("class".to_string(), classes.join(" "));
        }
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Fragment,
    Element(Element),
    Text(String),
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            kind,
        }
    }
}

/// The document tree plus its registered event listeners.
pub struct Document {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    listeners: ListenerStore,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("live_nodes", &self.live_node_count())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document containing only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::new(NodeKind::Document))],
            root: NodeId(0),
            listeners: ListenerStore::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    // ===== Node access =====

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(DomError::NodeNotFound(id))
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut Element> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).ok().map(|node| &node.kind)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id)? {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::tag_name)
    }

    /// Whether `id` refers to a node that has not been released.
    pub fn is_live(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Number of nodes not yet released, root included.
    pub fn live_node_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_some()).count()
    }

    // ===== Creation =====

    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(kind)));
        id
    }

    /// New detached element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.insert(NodeKind::Element(Element::new(tag_name)))
    }

    /// New detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.insert(NodeKind::Text(text.into()))
    }

    /// New empty fragment.
    pub fn create_fragment(&mut self) -> NodeId {
        self.insert(NodeKind::Fragment)
    }

    // ===== Tree structure =====

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok()?.parent
    }

    /// Direct children; empty for released nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Whether the node is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if node == self.root {
                return true;
            }
            cursor = self.parent(node);
        }
        false
    }

    /// Pre-order descendants of `scope`, excluding `scope` itself.
    pub(crate) fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Appending a fragment moves its children instead, in order, and leaves
    /// the fragment empty. Returns `child`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if matches!(self.node(parent)?.kind, NodeKind::Text(_)) {
            return Err(DomError::HierarchyRequest(format!(
                "{parent} cannot have children"
            )));
        }
        let is_fragment = matches!(self.node(child)?.kind, NodeKind::Fragment);
        if child == self.root || child == parent {
            return Err(DomError::HierarchyRequest(format!(
                "cannot append {child} to {parent}"
            )));
        }

        // Parent must not be inside child's subtree.
        let mut cursor = self.parent(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(DomError::HierarchyRequest(format!(
                    "appending {child} to {parent} would create a cycle"
                )));
            }
            cursor = self.parent(node);
        }

        if is_fragment {
            let moved = self.children(child).to_vec();
            for node in moved {
                self.append_child(parent, node)?;
            }
            return Ok(child);
        }

        self.detach(child);
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(child)
    }

    /// Append several nodes in order.
    pub fn append(&mut self, parent: NodeId, children: &[NodeId]) -> DomResult<()> {
        for child in children {
            self.append_child(parent, *child)?;
        }
        Ok(())
    }

    /// Detach `child` from `parent`. The subtree stays alive.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.node(parent)?;
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(child)
    }

    /// Detach `node` and free its whole subtree, dropping any listeners on it.
    ///
    /// Returns the number of nodes freed.
    pub fn release(&mut self, node: NodeId) -> DomResult<usize> {
        self.node(node)?;
        if node == self.root {
            return Err(DomError::HierarchyRequest(
                "the document root cannot be released".to_string(),
            ));
        }
        self.detach(node);

        let mut doomed = self.descendants(node);
        doomed.push(node);
        for id in &doomed {
            if let Some(slot) = self.nodes.get_mut(id.0) {
                *slot = None;
            }
            self.listeners.remove_node(*id);
        }
        Ok(doomed.len())
    }

    /// Remove every child of `parent`, last first, releasing each removed subtree.
    ///
    /// Returns `parent`.
    pub fn delete_child_elements(&mut self, parent: NodeId) -> DomResult<NodeId> {
        self.node(parent)?;
        while let Some(child) = self.last_child(parent) {
            self.remove_child(parent, child)?;
            self.release(child)?;
        }
        Ok(parent)
    }

    fn detach(&mut self, id: NodeId) {
        let Some(old_parent) = self.parent(id) else {
            return;
        };
        if let Ok(node) = self.node_mut(old_parent) {
            node.children.retain(|c| *c != id);
        }
        if let Ok(node) = self.node_mut(id) {
            node.parent = None;
        }
    }

    /// Link a freshly created, detached `child` under `parent` without checks.
    fn adopt(&mut self, parent: NodeId, child: NodeId) {
        if let Some(Some(node)) = self.nodes.get_mut(child.0) {
            node.parent = Some(parent);
        }
        if let Some(Some(node)) = self.nodes.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    // ===== Text =====

    /// Concatenated text of the node and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(NodeKind::Text(text)) = self.kind(id) {
            return text.clone();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|node| match self.kind(node) {
                Some(NodeKind::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace all children with a single text node (none for empty text).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        if let NodeKind::Text(existing) = &mut self.node_mut(id)?.kind {
            *existing = text.to_string();
            return Ok(());
        }
        self.delete_child_elements(id)?;
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.adopt(id, text_node);
        }
        Ok(())
    }

    // ===== Attributes =====

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self
            .element_mut(id)?
            .attrs
            .remove(&name.to_ascii_lowercase()))
    }

    /// `dataset` read: `postId` reads `data-post-id`.
    pub fn dataset_get(&self, id: NodeId, key: &str) -> Option<&str> {
        self.attr(id, &dataset_key_to_attr_name(key))
    }

    /// `dataset` write: `postId` writes `data-post-id`.
    pub fn dataset_set(&mut self, id: NodeId, key: &str, value: &str) -> DomResult<()> {
        self.set_attr(id, &dataset_key_to_attr_name(key), value)
    }

    pub fn class_contains(&self, id: NodeId, class_name: &str) -> bool {
        self.element(id)
            .is_some_and(|element| element.has_class(class_name))
    }

    pub fn class_add(&mut self, id: NodeId, class_name: &str) -> DomResult<()> {
        let element = self.element_mut(id)?;
        let mut classes = element.class_tokens();
        if !classes.iter().any(|c| c == class_name) {
            classes.push(class_name.to_string());
        }
        element.set_class_tokens(&classes);
        Ok(())
    }

    pub fn class_remove(&mut self, id: NodeId, class_name: &str) -> DomResult<()> {
        let element = self.element_mut(id)?;
        let mut classes = element.class_tokens();
        classes.retain(|c| c != class_name);
        element.set_class_tokens(&classes);
        Ok(())
    }

    /// Flip `class_name`; returns whether it is present afterwards.
    pub fn class_toggle(&mut self, id: NodeId, class_name: &str) -> DomResult<bool> {
        let element = self.element_mut(id)?;
        let mut classes = element.class_tokens();
        let present = if classes.iter().any(|c| c == class_name) {
            classes.retain(|c| c != class_name);
            false
        } else {
            classes.push(class_name.to_string());
            true
        };
        element.set_class_tokens(&classes);
        Ok(present)
    }

    // ===== Form control properties =====

    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) -> DomResult<()> {
        self.element_mut(id)?.disabled = disabled;
        Ok(())
    }

    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(Element::is_disabled)
    }

    /// Current value: the property if set, else the `value` attribute.
    pub fn value(&self, id: NodeId) -> Option<&str> {
        let element = self.element(id)?;
        element.value.as_deref().or_else(|| element.attr("value"))
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        self.element_mut(id)?.value = Some(value.to_string());
        Ok(())
    }

    // ===== Lookup =====

    /// First connected element whose `id` attribute equals `element_id`.
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|node| self.attr(*node, "id") == Some(element_id))
    }
}

fn dataset_key_to_attr_name(key: &str) -> String {
    let mut out = String::from("data-");
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
