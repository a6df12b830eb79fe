//! In-memory page document
//!
//! An arena of elements addressed by [`NodeId`]. The document owns every
//! element for the page lifetime; controllers only hold handles. Removed
//! elements stay in the arena (handles never dangle) but are detached and
//! no longer reachable from the root.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::selector::Selector;

/// Handle to an element in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single element
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub text: Option<String>,
    pub rect: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag: String = tag.into();
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        if name == "id" {
            return self.id.as_deref();
        }
        self.attrs.get(name).map(String::as_str)
    }

    pub fn matches(&self, selector: &Selector) -> bool {
        if let Some(tag) = &selector.tag {
            if &self.tag != tag {
                return false;
            }
        }
        if let Some(id) = &selector.id {
            if self.id.as_ref() != Some(id) {
                return false;
            }
        }
        if !selector.classes.iter().all(|c| self.has_class(c)) {
            return false;
        }
        selector.attrs.iter().all(|a| match (self.attr(&a.name), &a.value) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        })
    }
}

/// The page document
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with a `body` root
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    // ─────────────────────────────────────────────────────────
    // Tree
    // ─────────────────────────────────────────────────────────

    /// Create a detached element; attach it with [`Document::append_child`].
    pub fn create_element(&mut self, mut element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        element.parent = None;
        element.children.clear();
        self.nodes.push(element);
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        if child == self.root || self.ancestors(parent).any(|a| a == child) {
            return Err(Error::fixture(format!(
                "cannot append {} into its own subtree",
                child
            )));
        }

        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Detach an element (and its subtree) from the document
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        self.check(node)?;
        if node == self.root {
            return Err(Error::fixture("cannot remove the document root"));
        }
        self.detach(node);
        Ok(())
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    /// Whether the element is reachable from the root
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.ancestors(node).last() == Some(self.root)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|e| e.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// The element itself followed by its ancestors up to the root
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.nodes.get(node.0).map(|_| node);
        std::iter::successors(start, move |&n| self.nodes[n.0].parent)
    }

    /// Connected elements in document (pre-)order, starting at `from`
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.nodes.get(from.0).is_none() {
            return out;
        }
        let mut stack = vec![from];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.nodes[node.0].children.iter().rev());
        }
        out
    }

    // ─────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    pub fn try_element(&self, node: NodeId) -> Result<&Element> {
        self.nodes
            .get(node.0)
            .ok_or(Error::UnknownNode { id: node.0 })
    }

    fn check(&self, node: NodeId) -> Result<()> {
        self.try_element(node).map(|_| ())
    }

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.element(node).is_some_and(|e| e.matches(selector))
    }

    /// Nearest element (self included) matching the selector
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        self.ancestors(node).find(|&n| self.matches(n, selector))
    }

    pub fn query(&self, selector: &Selector) -> Option<NodeId> {
        self.query_within(self.root, selector).into_iter().next()
    }

    pub fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.query_within(self.root, selector)
    }

    /// Matching descendants of `scope` (scope excluded) in document order
    pub fn query_within(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| n != scope && self.matches(n, selector))
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.nodes[n.0].id.as_deref() == Some(id))
    }

    // ─────────────────────────────────────────────────────────
    // Classes / attributes / styles
    // ─────────────────────────────────────────────────────────

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_class(class))
    }

    /// Add a class; returns true when the class list changed
    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        match self.nodes.get_mut(node.0) {
            Some(e) if !e.has_class(class) => {
                e.classes.push(class.to_string());
                true
            }
            _ => false,
        }
    }

    /// Remove a class; returns true when the class list changed
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        match self.nodes.get_mut(node.0) {
            Some(e) if e.has_class(class) => {
                e.classes.retain(|c| c != class);
                true
            }
            _ => false,
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.attr(name))
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(e) = self.nodes.get_mut(node.0) {
            if name == "id" {
                e.id = Some(value.into());
            } else {
                e.attrs.insert(name.to_string(), value.into());
            }
        }
    }

    /// `data-*` attribute by its dataset key (`versionNumber` → `data-version-number`)
    pub fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        self.attr(node, &dataset_attr_name(key))
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node)
            .and_then(|e| e.style.get(property))
            .map(String::as_str)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: impl Into<String>) {
        if let Some(e) = self.nodes.get_mut(node.0) {
            e.style.insert(property.to_string(), value.into());
        }
    }

    pub fn rect(&self, node: NodeId) -> Rect {
        self.element(node).map(|e| e.rect).unwrap_or_default()
    }

    /// Total scrollable height: the lowest bottom edge of any connected element
    pub fn height(&self) -> f64 {
        self.descendants(self.root)
            .into_iter()
            .map(|n| self.nodes[n.0].rect.bottom())
            .fold(0.0, f64::max)
    }
}

fn dataset_attr_name(key: &str) -> String {
    let mut name = String::from("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str, classes: &[&str]) -> Element {
        let mut e = Element::new(tag);
        e.classes = classes.iter().map(|c| c.to_string()).collect();
        e
    }

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let nav = doc.create_element(element("nav", &["nav"]));
        let links = doc.create_element(element("ul", &["nav__links"]));
        let mut a = element("a", &["nav__link"]);
        a.attrs.insert("href".into(), "#section--1".into());
        let link = doc.create_element(a);
        doc.append_child(doc.root(), nav).unwrap();
        doc.append_child(nav, links).unwrap();
        doc.append_child(links, link).unwrap();
        (doc, nav, links, link)
    }

    #[test]
    fn test_closest_includes_self() {
        let (doc, nav, _, link) = sample();
        assert_eq!(doc.closest(link, &Selector::class("nav__link")), Some(link));
        assert_eq!(doc.closest(link, &Selector::class("nav")), Some(nav));
        assert_eq!(doc.closest(nav, &Selector::class("nav__link")), None);
    }

    #[test]
    fn test_query_all_document_order() {
        let mut doc = Document::new();
        let a = doc.create_element(element("section", &["section"]));
        let b = doc.create_element(element("section", &["section"]));
        let inner = doc.create_element(element("section", &["section"]));
        doc.append_child(doc.root(), a).unwrap();
        doc.append_child(a, inner).unwrap();
        doc.append_child(doc.root(), b).unwrap();

        assert_eq!(doc.query_all(&Selector::class("section")), vec![a, inner, b]);
    }

    #[test]
    fn test_class_ops_report_change() {
        let (mut doc, nav, _, _) = sample();
        assert!(doc.add_class(nav, "sticky"));
        assert!(!doc.add_class(nav, "sticky"));
        assert!(doc.has_class(nav, "sticky"));
        assert!(doc.remove_class(nav, "sticky"));
        assert!(!doc.remove_class(nav, "sticky"));
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let (mut doc, nav, _, link) = sample();
        doc.remove(nav).unwrap();
        assert!(!doc.is_connected(nav));
        assert!(!doc.is_connected(link));
        assert!(doc.query(&Selector::class("nav__link")).is_none());
        // the handle stays valid
        assert!(doc.element(link).is_some());
    }

    #[test]
    fn test_append_into_own_subtree_rejected() {
        let (mut doc, nav, _, link) = sample();
        assert!(doc.append_child(link, nav).is_err());
    }

    #[test]
    fn test_unknown_node() {
        let doc = Document::new();
        let err = doc.try_element(NodeId(99)).unwrap_err();
        assert!(matches!(err, Error::UnknownNode { id: 99 }));
    }

    #[test]
    fn test_dataset_name_conversion() {
        let mut doc = Document::new();
        let img = doc.create_element(Element::new("img"));
        doc.set_attr(img, "data-src", "img/digital.jpg");
        doc.set_attr(img, "data-version-number", "3.0");
        assert_eq!(doc.data(img, "src"), Some("img/digital.jpg"));
        assert_eq!(doc.data(img, "versionNumber"), Some("3.0"));
    }

    #[test]
    fn test_attr_selector_matching() {
        let mut doc = Document::new();
        let img = doc.create_element(Element::new("img"));
        doc.append_child(doc.root(), img).unwrap();
        let sel = Selector::parse("img[data-src]").unwrap();
        assert!(!doc.matches(img, &sel));
        doc.set_attr(img, "data-src", "x.jpg");
        assert!(doc.matches(img, &sel));
    }

    #[test]
    fn test_id_selector_and_by_id() {
        let mut doc = Document::new();
        let mut section = Element::new("section");
        section.id = Some("section--1".into());
        let s = doc.create_element(section);
        doc.append_child(doc.root(), s).unwrap();
        assert_eq!(doc.by_id("section--1"), Some(s));
        assert_eq!(doc.query(&Selector::parse("#section--1").unwrap()), Some(s));
    }

    #[test]
    fn test_height_is_lowest_bottom() {
        let mut doc = Document::new();
        let mut e = Element::new("section");
        e.rect = Rect::new(0.0, 800.0, 1200.0, 900.0);
        let s = doc.create_element(e);
        doc.append_child(doc.root(), s).unwrap();
        assert_eq!(doc.height(), 1700.0);
    }
}
