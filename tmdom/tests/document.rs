use tmdom::{element, Document, DomError, Rect, StyleProperty, Surface, Viewport};

// ============================================================================
// Tree operations
// ============================================================================

#[test]
fn test_append_moves_node_between_parents() {
    let doc = Document::default();
    let first = doc.create_element("div");
    let second = doc.create_element("div");
    let item = doc.create_element("a");

    doc.append_child(first, item).unwrap();
    doc.append_child(second, item).unwrap();

    assert!(doc.children(first).is_empty());
    assert_eq!(doc.children(second), vec![item]);
    assert_eq!(doc.parent(item), Some(second));
}

#[test]
fn test_append_preserves_order() {
    let doc = Document::default();
    let list = doc.create_element("div");
    let items: Vec<_> = (0..4).map(|_| doc.create_element("a")).collect();
    for item in &items {
        doc.append_child(list, *item).unwrap();
    }
    assert_eq!(doc.children(list), items);
}

#[test]
fn test_append_rejects_cycles() {
    let doc = Document::default();
    let outer = doc.create_element("div");
    let inner = doc.create_element("div");
    doc.append_child(outer, inner).unwrap();

    assert_eq!(
        doc.append_child(inner, outer),
        Err(DomError::HierarchyRequest {
            parent: inner,
            child: outer
        })
    );
    assert!(doc.append_child(outer, outer).is_err());
}

#[test]
fn test_remove_child_requires_parent() {
    let doc = Document::default();
    let parent = doc.create_element("div");
    let stranger = doc.create_element("div");

    assert_eq!(
        doc.remove_child(parent, stranger),
        Err(DomError::NotAChild {
            parent,
            child: stranger
        })
    );
}

#[test]
fn test_replace_child_keeps_position() {
    let doc = Document::default();
    let parent = doc.create_element("a");
    let text = doc.create_element("span");
    let old = doc.create_element("svg");
    let new = doc.create_element("svg");
    doc.append_child(parent, text).unwrap();
    doc.append_child(parent, old).unwrap();

    doc.replace_child(parent, new, old).unwrap();

    assert_eq!(doc.children(parent), vec![text, new]);
    assert_eq!(doc.parent(old), None);
}

#[test]
fn test_dispose_frees_subtree_only() {
    let doc = Document::default();
    let backdrop = doc.create_element("div");
    let panel = doc.create_element("div");
    let kept = doc.create_element("a");
    doc.append_child(doc.body(), backdrop).unwrap();
    doc.append_child(backdrop, panel).unwrap();
    doc.append_child(panel, kept).unwrap();
    doc.remove_child(panel, kept).unwrap();

    let before = doc.len();
    doc.dispose(backdrop);

    assert_eq!(doc.len(), before - 2);
    assert!(doc.node(kept).is_some());
    assert!(doc.children(doc.body()).is_empty());
}

#[test]
fn test_connected_follows_body() {
    let doc = Document::default();
    let node = doc.create_element("div");
    assert!(!doc.is_connected(node));
    doc.append_child(doc.body(), node).unwrap();
    assert!(doc.is_connected(node));
}

#[test]
fn test_find_by_class_skips_detached() {
    let doc = Document::default();
    let attached = element(&doc, "div", &["backdrop"]);
    let _detached = element(&doc, "div", &["backdrop"]);
    doc.append_child(doc.body(), attached).unwrap();

    assert_eq!(doc.find_by_class("backdrop"), vec![attached]);
}

// ============================================================================
// Classes and style
// ============================================================================

#[test]
fn test_classes_are_a_set() {
    let doc = Document::default();
    let label = element(&doc, "label", &["inputLabel", "hiddenLabel"]);
    doc.add_class(label, "inputLabel");
    assert_eq!(doc.node(label).unwrap().class_name(), "inputLabel hiddenLabel");

    doc.remove_class(label, "hiddenLabel");
    assert!(!doc.has_class(label, "hiddenLabel"));
    assert!(doc.has_class(label, "inputLabel"));
}

#[test]
fn test_inline_style_overrides_layout() {
    let doc = Document::default();
    let panel = doc.create_element("div");
    doc.set_layout(panel, Rect::new(10, 20, 100, 50));
    doc.set_style(panel, StyleProperty::Left(42));
    doc.set_style(panel, StyleProperty::Width(300));

    let metrics = doc.metrics(panel);
    assert_eq!(metrics.offset_left, 42);
    assert_eq!(metrics.offset_top, 20);
    assert_eq!(metrics.client_width, 300);
    assert_eq!(metrics.client_height, 50);
}

#[test]
fn test_updates_on_unknown_node_are_ignored() {
    let doc = Document::default();
    let node = doc.create_element("div");
    doc.dispose(node);

    doc.set_text(node, "gone");
    doc.add_class(node, "x");
    assert_eq!(doc.text(node), "");
    assert!(!doc.has_class(node, "x"));
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_unsized_container_measures_children() {
    let doc = Document::default();
    let panel = doc.create_element("div");
    let a = doc.create_element("a");
    let b = doc.create_element("a");
    doc.set_layout(a, Rect::from_size(80, 20));
    doc.set_layout(b, Rect::from_size(120, 20));
    doc.append_child(panel, a).unwrap();
    doc.append_child(panel, b).unwrap();

    let metrics = doc.metrics(panel);
    assert_eq!(metrics.client_width, 120);
    assert_eq!(metrics.client_height, 40);
}

#[test]
fn test_text_measures_by_columns() {
    let doc = Document::default();
    let row = doc.create_element("a");
    doc.set_text(row, "English");
    assert_eq!(doc.metrics(row).client_width, 7 * tmdom::document::CHAR_WIDTH);
    assert_eq!(doc.metrics(row).client_height, tmdom::document::LINE_HEIGHT);
}

#[test]
fn test_offset_parent_is_nearest_positioned_ancestor() {
    let doc = Document::default();
    let dialog = doc.create_element("div");
    let content = doc.create_element("div");
    let header = doc.create_element("a");
    doc.append_child(doc.body(), dialog).unwrap();
    doc.append_child(dialog, content).unwrap();
    doc.append_child(content, header).unwrap();

    assert_eq!(doc.offset_parent(header), Some(doc.body()));

    doc.set_positioned(dialog, true);
    assert_eq!(doc.offset_parent(header), Some(dialog));
}

#[test]
fn test_offset_parent_of_detached_node() {
    let doc = Document::default();
    let node = doc.create_element("a");
    assert_eq!(doc.offset_parent(node), None);
    assert_eq!(doc.offset_parent(doc.body()), None);
}

#[test]
fn test_body_spans_viewport() {
    let doc = Document::new(Viewport::new(640, 480));
    assert_eq!(doc.viewport_width(), 640);
    assert_eq!(doc.metrics(doc.body()).client_width, 640);
}

// ============================================================================
// Markup
// ============================================================================

#[test]
fn test_parse_markup_keeps_source() {
    let doc = Document::default();
    let markup = r#"<svg width="12" height="7"><path d="M0 0Z" /></svg>"#;
    let svg = doc.parse_markup(markup).unwrap();

    let node = doc.node(svg).unwrap();
    assert_eq!(node.tag, "svg");
    assert_eq!(node.markup.as_deref(), Some(markup));
    assert_eq!(node.attributes.get("height").map(String::as_str), Some("7"));
}

#[test]
fn test_parse_markup_rejects_garbage() {
    let doc = Document::default();
    assert!(matches!(
        doc.parse_markup("not markup"),
        Err(DomError::InvalidMarkup(_))
    ));
}
