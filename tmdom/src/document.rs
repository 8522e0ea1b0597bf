use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use unicode_width::UnicodeWidthStr;

use crate::error::DomError;
use crate::layout::{Metrics, Rect, Viewport};
use crate::markup::parse_fragment;
use crate::node::{InlineStyle, Node, NodeId, StyleProperty};
use crate::surface::{ClickHandler, Surface};

/// Width of one text column in the headless layout.
pub const CHAR_WIDTH: i32 = 8;
/// Height of a line of text in the headless layout.
pub const LINE_HEIGHT: i32 = 20;

/// In-memory page implementing [`Surface`].
///
/// Layout is deliberately simple: a node measures as its inline width, then
/// its explicit layout rectangle, then the widest of its text and children.
/// Heights stack children vertically. Hosts and tests pin geometry with
/// [`Document::set_layout`].
pub struct Document {
    inner: RwLock<DocumentInner>,
}

struct DocumentInner {
    nodes: HashMap<NodeId, Node>,
    listeners: HashMap<NodeId, Vec<ClickHandler>>,
    body: NodeId,
    viewport: Viewport,
    next_id: u64,
}

impl DocumentInner {
    fn allocate(&mut self, tag: &str) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, tag));
        id
    }

    fn get(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(&id).ok_or(DomError::UnknownNode(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(&id).ok_or(DomError::UnknownNode(id))
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == candidate {
                return true;
            }
            match self.nodes.get(&node).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, child: NodeId) {
        let parent = self.nodes.get_mut(&child).and_then(|n| n.parent.take());
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|c| *c != child);
        }
    }

    fn width(&self, id: NodeId) -> i32 {
        let Some(node) = self.nodes.get(&id) else {
            return 0;
        };
        if let Some(width) = node.style.width {
            return width;
        }
        if id == self.body {
            return self.viewport.width;
        }
        if let Some(layout) = node.layout {
            return layout.width;
        }
        let text = node.text.width() as i32 * CHAR_WIDTH;
        node.children
            .iter()
            .map(|c| self.width(*c))
            .fold(text, i32::max)
    }

    fn height(&self, id: NodeId) -> i32 {
        let Some(node) = self.nodes.get(&id) else {
            return 0;
        };
        if id == self.body {
            return self.viewport.height;
        }
        if let Some(layout) = node.layout {
            return layout.height;
        }
        let text = if node.text.is_empty() { 0 } else { LINE_HEIGHT };
        text + node.children.iter().map(|c| self.height(*c)).sum::<i32>()
    }

    fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                out.push(id);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }
}

impl Document {
    pub fn new(viewport: Viewport) -> Self {
        let mut inner = DocumentInner {
            nodes: HashMap::new(),
            listeners: HashMap::new(),
            body: NodeId::new(0),
            viewport,
            next_id: 0,
        };
        inner.body = inner.allocate("body");
        Self {
            inner: RwLock::new(inner),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, DocumentInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DocumentInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_node_mut(&self, id: NodeId, f: impl FnOnce(&mut Node)) {
        match self.write().get_mut(id) {
            Ok(node) => f(node),
            Err(e) => log::warn!("Ignoring update: {e}"),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.read().viewport
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.write().viewport = viewport;
    }

    /// Pin a node's offset (relative to its offset parent) and size.
    pub fn set_layout(&self, id: NodeId, rect: Rect) {
        self.with_node_mut(id, |node| node.layout = Some(rect));
    }

    /// Mark a node as a containing block for offset calculations.
    pub fn set_positioned(&self, id: NodeId, positioned: bool) {
        self.with_node_mut(id, |node| node.positioned = positioned);
    }

    pub fn set_border(&self, id: NodeId, border: i32) {
        self.with_node_mut(id, |node| node.border = border);
    }

    /// Snapshot of a node.
    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.read().nodes.get(&id).cloned()
    }

    /// Number of live nodes, including detached ones.
    pub fn len(&self) -> usize {
        self.read().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Connected nodes carrying `class`, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        let inner = self.read();
        inner
            .subtree(inner.body)
            .into_iter()
            .filter(|id| inner.nodes.get(id).is_some_and(|n| n.has_class(class)))
            .collect()
    }

    /// Dispatch a click at `target`, bubbling through its ancestors.
    ///
    /// The propagation path is fixed before any listener runs. Returns the
    /// number of listeners invoked.
    pub fn click(&self, target: NodeId) -> usize {
        let handlers: Vec<ClickHandler> = {
            let inner = self.read();
            let mut path = Vec::new();
            let mut current = Some(target);
            while let Some(id) = current {
                path.push(id);
                current = inner.nodes.get(&id).and_then(|n| n.parent);
            }
            path.iter()
                .filter_map(|id| inner.listeners.get(id))
                .flat_map(|list| list.iter().cloned())
                .collect()
        };

        log::trace!("click on {target}: {} listener(s)", handlers.len());
        for handler in &handlers {
            handler(self);
        }
        handlers.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("Document")
            .field("body", &inner.body)
            .field("viewport", &inner.viewport)
            .field("nodes", &inner.nodes.len())
            .finish()
    }
}

impl Surface for Document {
    fn body(&self) -> NodeId {
        self.read().body
    }

    fn create_element(&self, tag: &str) -> NodeId {
        self.write().allocate(tag)
    }

    fn parse_markup(&self, markup: &str) -> Result<NodeId, DomError> {
        let fragment = parse_fragment(markup)?;
        let mut inner = self.write();
        let id = inner.allocate(&fragment.tag);
        let node = inner.get_mut(id)?;
        node.attributes = fragment.attributes;
        node.markup = Some(markup.to_string());
        Ok(id)
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let mut inner = self.write();
        inner.get(parent)?;
        inner.get(child)?;
        if inner.is_ancestor_or_self(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        inner.detach(child);
        inner.get_mut(parent)?.children.push(child);
        inner.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let mut inner = self.write();
        if inner.get(child)?.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        inner.detach(child);
        Ok(())
    }

    fn replace_child(
        &self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> Result<(), DomError> {
        let mut inner = self.write();
        inner.get(new_child)?;
        if inner.get(old_child)?.parent != Some(parent) {
            return Err(DomError::NotAChild {
                parent,
                child: old_child,
            });
        }
        if new_child == old_child {
            return Ok(());
        }
        if inner.is_ancestor_or_self(new_child, parent) {
            return Err(DomError::HierarchyRequest {
                parent,
                child: new_child,
            });
        }
        inner.detach(new_child);
        let node = inner.get_mut(parent)?;
        let Some(index) = node.children.iter().position(|c| *c == old_child) else {
            return Err(DomError::NotAChild {
                parent,
                child: old_child,
            });
        };
        node.children[index] = new_child;
        inner.get_mut(new_child)?.parent = Some(parent);
        inner.get_mut(old_child)?.parent = None;
        Ok(())
    }

    fn dispose(&self, id: NodeId) {
        let mut inner = self.write();
        inner.detach(id);
        for node in inner.subtree(id) {
            inner.nodes.remove(&node);
            inner.listeners.remove(&node);
        }
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.read().nodes.get(&id).and_then(|n| n.parent)
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.read()
            .nodes
            .get(&id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn is_connected(&self, id: NodeId) -> bool {
        let inner = self.read();
        inner.nodes.contains_key(&id) && inner.is_ancestor_or_self(inner.body, id)
    }

    fn set_text(&self, id: NodeId, text: &str) {
        self.with_node_mut(id, |node| node.text = text.to_string());
    }

    fn text(&self, id: NodeId) -> String {
        self.read()
            .nodes
            .get(&id)
            .map(|n| n.text.clone())
            .unwrap_or_default()
    }

    fn add_class(&self, id: NodeId, class: &str) {
        self.with_node_mut(id, |node| {
            if !node.has_class(class) {
                node.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, id: NodeId, class: &str) {
        self.with_node_mut(id, |node| node.classes.retain(|c| c != class));
    }

    fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.read()
            .nodes
            .get(&id)
            .is_some_and(|n| n.has_class(class))
    }

    fn set_style(&self, id: NodeId, property: StyleProperty) {
        self.with_node_mut(id, |node| node.style.apply(property));
    }

    fn style(&self, id: NodeId) -> InlineStyle {
        self.read()
            .nodes
            .get(&id)
            .map(|n| n.style)
            .unwrap_or_default()
    }

    fn on_click(&self, id: NodeId, handler: ClickHandler) {
        let mut inner = self.write();
        if !inner.nodes.contains_key(&id) {
            log::warn!("Ignoring listener on {id}: unknown node");
            return;
        }
        inner.listeners.entry(id).or_default().push(handler);
    }

    fn metrics(&self, id: NodeId) -> Metrics {
        let inner = self.read();
        let Some(node) = inner.nodes.get(&id) else {
            return Metrics::default();
        };
        let layout = node.layout.unwrap_or_default();
        Metrics {
            offset_left: node.style.left.unwrap_or(layout.x),
            offset_top: node.style.top.unwrap_or(layout.y),
            client_top: node.border,
            client_width: inner.width(id),
            client_height: inner.height(id),
        }
    }

    fn offset_parent(&self, id: NodeId) -> Option<NodeId> {
        let inner = self.read();
        if id == inner.body || !inner.is_ancestor_or_self(inner.body, id) {
            return None;
        }
        let mut current = inner.nodes.get(&id)?.parent;
        while let Some(parent) = current {
            let node = inner.nodes.get(&parent)?;
            if node.positioned || parent == inner.body {
                return Some(parent);
            }
            current = node.parent;
        }
        None
    }

    fn viewport_width(&self) -> i32 {
        self.read().viewport.width
    }
}
