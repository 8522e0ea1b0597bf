use std::sync::Arc;

use crate::error::DomError;
use crate::layout::Metrics;
use crate::node::{InlineStyle, NodeId, StyleProperty};

/// Click listener. The dispatching surface is passed in so listeners never
/// need to own a handle to it.
pub type ClickHandler = Arc<dyn Fn(&dyn Surface) + Send + Sync>;

/// The capabilities widgets need from a page: build nodes, mutate them,
/// listen for clicks and read back layout.
///
/// Attribute setters on unknown nodes are ignored. Structural operations
/// report failures through [`DomError`].
pub trait Surface: Send + Sync {
    fn body(&self) -> NodeId;

    fn create_element(&self, tag: &str) -> NodeId;

    /// Build a node from a single-root markup fragment (e.g. an inline SVG).
    fn parse_markup(&self, markup: &str) -> Result<NodeId, DomError>;

    /// Append `child` to `parent`, detaching it from its current parent first.
    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError>;

    fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError>;

    /// Put `new_child` at the position of `old_child`, which becomes detached.
    fn replace_child(
        &self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> Result<(), DomError>;

    /// Free a node, its descendants and their listeners.
    fn dispose(&self, node: NodeId);

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Whether the node is reachable from the body.
    fn is_connected(&self, node: NodeId) -> bool;

    fn set_text(&self, node: NodeId, text: &str);

    fn text(&self, node: NodeId) -> String;

    fn add_class(&self, node: NodeId, class: &str);

    fn remove_class(&self, node: NodeId, class: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn set_style(&self, node: NodeId, property: StyleProperty);

    fn style(&self, node: NodeId) -> InlineStyle;

    fn on_click(&self, node: NodeId, handler: ClickHandler);

    fn metrics(&self, node: NodeId) -> Metrics;

    /// Nearest positioned ancestor, or the body for connected nodes.
    fn offset_parent(&self, node: NodeId) -> Option<NodeId>;

    /// Client width of the body.
    fn viewport_width(&self) -> i32;
}

/// Create an element carrying the given classes.
pub fn element(surface: &dyn Surface, tag: &str, classes: &[&str]) -> NodeId {
    let node = surface.create_element(tag);
    for class in classes {
        surface.add_class(node, class);
    }
    node
}

/// Wrap a closure as a [`ClickHandler`].
pub fn handler<F>(f: F) -> ClickHandler
where
    F: Fn(&dyn Surface) + Send + Sync + 'static,
{
    Arc::new(f)
}
