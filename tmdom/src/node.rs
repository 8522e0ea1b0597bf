use std::collections::BTreeMap;

use crate::layout::Rect;

/// Handle to a node owned by a [`Surface`](crate::Surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Inline style properties a widget may set on a node. Values are pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleProperty {
    Left(i32),
    Top(i32),
    Width(i32),
    ZIndex(i32),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub width: Option<i32>,
    pub z_index: Option<i32>,
}

impl InlineStyle {
    pub fn apply(&mut self, property: StyleProperty) {
        match property {
            StyleProperty::Left(v) => self.left = Some(v),
            StyleProperty::Top(v) => self.top = Some(v),
            StyleProperty::Width(v) => self.width = Some(v),
            StyleProperty::ZIndex(v) => self.z_index = Some(v),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    // Identity
    pub id: NodeId,
    pub tag: String,

    // Content
    pub text: String,
    /// Source markup for nodes created by [`Surface::parse_markup`](crate::Surface::parse_markup).
    pub markup: Option<String>,
    pub attributes: BTreeMap<String, String>,

    // Visual
    pub classes: Vec<String>,
    pub style: InlineStyle,

    // Tree
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    // Layout hints for the headless document
    pub layout: Option<Rect>,
    pub positioned: bool,
    pub border: i32,
}

impl Node {
    pub(crate) fn new(id: NodeId, tag: impl Into<String>) -> Self {
        Self {
            id,
            tag: tag.into(),
            text: String::new(),
            markup: None,
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            style: InlineStyle::default(),
            parent: None,
            children: Vec::new(),
            layout: None,
            positioned: false,
            border: 0,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space separated class list, like `Element.className`.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}
