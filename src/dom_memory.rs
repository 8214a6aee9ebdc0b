//! In-memory document used by the controller tests.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Detached nodes
//! stay in the arena but are invisible to lookups, the same way a removed
//! element is invisible to `getElementById`.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::dom::{Dom, DragPayload};
use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    tag: String,
    id: String,
    classes: Vec<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        let body = Node { tag: "body".to_owned(), id: String::new(), classes: Vec::new(), parent: None, children: Vec::new() };
        Self { nodes: vec![body], root: NodeId(0) }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create an element under `parent`.
    pub fn element(&mut self, parent: NodeId, tag: &str, id: &str, classes: &[&str]) -> NodeId {
        let node = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: tag.to_owned(),
            id: id.to_owned(),
            classes: classes.iter().map(|c| (*c).to_owned()).collect(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(node);
        node
    }

    /// Add `div.column#column-<key>` with a header and an empty `div.tasks`.
    /// Returns `(column, task_list)`.
    pub fn column(&mut self, key: &str) -> (NodeId, NodeId) {
        let root = self.root;
        let column = self.element(root, "div", &format!("column-{key}"), &["column"]);
        self.element(column, "h2", "", &[]);
        let list = self.element(column, "div", "", &["tasks"]);
        (column, list)
    }

    /// Add `div.task#task-<key>` to a task list.
    pub fn task(&mut self, list: NodeId, key: &str) -> NodeId {
        self.element(list, "div", &format!("task-{key}"), &["task"])
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    /// Take `node` and its subtree out of the document.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    /// Element ids of `parent`'s children, in order.
    pub fn child_ids(&self, parent: NodeId) -> Vec<String> {
        self.nodes[parent.0]
            .children
            .iter()
            .map(|child| self.nodes[child.0].id.clone())
            .collect()
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        out
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == candidate {
                return true;
            }
            current = self.nodes[n.0].parent;
        }
        false
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    fn attach_fragment(&mut self, parent: NodeId, fragment: Vec<FragmentNode>) {
        for item in fragment {
            let classes: Vec<&str> = item.classes.iter().map(String::as_str).collect();
            let node = self.element(parent, &item.tag, &item.id, &classes);
            self.attach_fragment(node, item.children);
        }
    }
}

impl Dom for MemoryDom {
    type Element = NodeId;

    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|n| self.has_class(n, class))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.nodes[n.0].id == id)
    }

    fn id_of(&self, element: &NodeId) -> String {
        self.nodes[element.0].id.clone()
    }

    fn find_descendant(&self, root: &NodeId, class: &str) -> Option<NodeId> {
        self.descendants(*root)
            .into_iter()
            .find(|n| self.has_class(n, class))
    }

    fn children(&self, parent: &NodeId) -> Vec<NodeId> {
        self.nodes[parent.0].children.clone()
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), BoardError> {
        if self.is_ancestor_or_self(*child, *parent) {
            return Err(BoardError::Dom("cannot append a node into itself".to_owned()));
        }
        self.detach(*child);
        self.nodes[child.0].parent = Some(*parent);
        self.nodes[parent.0].children.push(*child);
        Ok(())
    }

    fn insert_html_end(&mut self, parent: &NodeId, html: &str) -> Result<(), BoardError> {
        let fragment = parse_fragment(html)?;
        self.attach_fragment(*parent, fragment);
        Ok(())
    }

    fn last_element_child(&self, parent: &NodeId) -> Option<NodeId> {
        self.nodes[parent.0].children.last().copied()
    }

    fn add_class(&mut self, element: &NodeId, class: &str) {
        let classes = &mut self.nodes[element.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, element: &NodeId, class: &str) {
        self.nodes[element.0].classes.retain(|c| c != class);
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.nodes[element.0].classes.iter().any(|c| c == class)
    }

    fn is_connected(&self, element: &NodeId) -> bool {
        self.is_ancestor_or_self(self.root, *element)
    }
}

// =============================================================
// Fragment parsing
// =============================================================

#[derive(Debug, Default)]
struct FragmentNode {
    tag: String,
    id: String,
    classes: Vec<String>,
    children: Vec<FragmentNode>,
}

fn malformed(html: &str) -> BoardError {
    BoardError::Dom(format!("malformed fragment: {html}"))
}

/// Parse the element structure of a small HTML fragment. Text is dropped;
/// only `id` and `class` attributes are kept.
fn parse_fragment(html: &str) -> Result<Vec<FragmentNode>, BoardError> {
    let mut stack = vec![FragmentNode::default()];
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let end = after.find('>').ok_or_else(|| malformed(html))?;
        let tag_src = after[..end].trim();
        rest = &after[end + 1..];

        if let Some(name) = tag_src.strip_prefix('/') {
            if stack.len() < 2 {
                return Err(malformed(html));
            }
            let closed = stack.pop().ok_or_else(|| malformed(html))?;
            if closed.tag != name.trim() {
                return Err(malformed(html));
            }
            stack.last_mut().ok_or_else(|| malformed(html))?.children.push(closed);
        } else if let Some(open) = tag_src.strip_suffix('/') {
            let node = parse_open_tag(open, html)?;
            stack.last_mut().ok_or_else(|| malformed(html))?.children.push(node);
        } else {
            stack.push(parse_open_tag(tag_src, html)?);
        }
    }

    if stack.len() != 1 {
        return Err(malformed(html));
    }
    Ok(stack.pop().map(|root| root.children).unwrap_or_default())
}

fn parse_open_tag(src: &str, html: &str) -> Result<FragmentNode, BoardError> {
    let src = src.trim();
    let name_end = src.find(char::is_whitespace).unwrap_or(src.len());
    let tag = &src[..name_end];
    if tag.is_empty() {
        return Err(malformed(html));
    }
    let mut node = FragmentNode { tag: tag.to_owned(), ..FragmentNode::default() };

    let mut attrs = src[name_end..].trim_start();
    while !attrs.is_empty() {
        let key_end = attrs
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(attrs.len());
        let key = &attrs[..key_end];
        if key.is_empty() {
            return Err(malformed(html));
        }
        attrs = attrs[key_end..].trim_start();

        let mut value = "";
        if let Some(after_eq) = attrs.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            match after_eq.chars().next() {
                Some(quote @ ('\'' | '"')) => {
                    let body = &after_eq[1..];
                    let close = body.find(quote).ok_or_else(|| malformed(html))?;
                    value = &body[..close];
                    attrs = &body[close + 1..];
                }
                _ => {
                    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                    value = &after_eq[..end];
                    attrs = &after_eq[end..];
                }
            }
        }
        attrs = attrs.trim_start();

        match key {
            "id" => value.clone_into(&mut node.id),
            "class" => node.classes = value.split_whitespace().map(str::to_owned).collect(),
            _ => {}
        }
    }
    Ok(node)
}

// =============================================================
// Drag payload
// =============================================================

/// Stand-in for the browser's `DataTransfer`.
#[derive(Debug, Default)]
pub struct MemoryPayload {
    data: RefCell<HashMap<String, String>>,
}

impl MemoryPayload {
    pub fn with_text(mime: &str, value: &str) -> Self {
        let payload = Self::default();
        payload.data.borrow_mut().insert(mime.to_owned(), value.to_owned());
        payload
    }
}

impl DragPayload for MemoryPayload {
    fn set_text(&self, mime: &str, value: &str) -> Result<(), BoardError> {
        self.data.borrow_mut().insert(mime.to_owned(), value.to_owned());
        Ok(())
    }

    fn text(&self, mime: &str) -> Option<String> {
        self.data
            .borrow()
            .get(mime)
            .filter(|v| !v.is_empty())
            .cloned()
    }
}
