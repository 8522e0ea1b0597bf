mod common;

use std::sync::Arc;

use remotetm_ui::glyph::{DOWN, UP};
use remotetm_ui::{Dialog, DialogStack, FixedLayering, Select, SelectError, SelectOption};
use tmdom::{Document, NodeId, Rect, Surface, Viewport};

const LANGUAGES: [(&str, &str); 3] = [("en", "English"), ("es", "Spanish"), ("fr", "French")];

fn select_in(doc: &Arc<Document>, parent: NodeId) -> Select {
    let surface: Arc<dyn Surface> = doc.clone();
    Select::new(surface, parent, "Language", Arc::new(FixedLayering(0))).unwrap()
}

fn languages(doc: &Arc<Document>) -> Select {
    let select = select_in(doc, doc.body());
    select.set_options(LANGUAGES);
    select
}

fn glyph_markup(doc: &Document, select: &Select) -> Option<String> {
    doc.node(select.glyph())?.markup
}

// ============================================================================
// Initial state
// ============================================================================

#[test]
fn test_starts_with_placeholder() {
    let doc = common::document();
    let select = languages(&doc);

    assert_eq!(select.value(), None);
    assert_eq!(select.selected_text(), "Language");
    assert!(doc.has_class(select.selected_text_node(), "placeholder"));
    assert!(doc.has_class(select.label(), "hiddenLabel"));
    assert_eq!(doc.text(select.label()), "Language");
    assert_eq!(glyph_markup(&doc, &select).as_deref(), Some(DOWN));
}

#[test]
fn test_structure() {
    let doc = common::document();
    let select = languages(&doc);

    let header = select.header();
    let container = doc.parent(header).unwrap();
    assert!(doc.has_class(container, "inputContainer"));
    assert_eq!(doc.children(container), vec![select.label(), header]);
    assert!(doc.has_class(header, "row"));
    assert!(doc.has_class(header, "inputBox"));
    assert_eq!(
        doc.children(header),
        vec![select.selected_text_node(), select.glyph()]
    );
}

// ============================================================================
// Values
// ============================================================================

#[test]
fn test_set_value() {
    let doc = common::document();
    let select = languages(&doc);

    select.set_value("en").unwrap();

    assert_eq!(select.value().as_deref(), Some("en"));
    assert_eq!(select.selected_text(), "English");
    assert!(!doc.has_class(select.selected_text_node(), "placeholder"));
    assert!(!doc.has_class(select.label(), "hiddenLabel"));
}

#[test]
fn test_set_unknown_value() {
    let doc = common::document();
    let select = languages(&doc);
    select.set_value("es").unwrap();

    let err = select.set_value("de").unwrap_err();

    assert_eq!(err, SelectError::UnknownValue("de".to_string()));
    assert_eq!(select.value().as_deref(), Some("es"));
    assert_eq!(select.selected_text(), "Spanish");
}

#[test]
fn test_set_value_before_options() {
    let doc = common::document();
    let select = select_in(&doc, doc.body());

    assert!(select.set_value("en").is_err());
    assert!(select.is_empty());
    assert!(doc.has_class(select.selected_text_node(), "placeholder"));
}

#[test]
fn test_set_options_appends() {
    let doc = common::document();
    let select = languages(&doc);
    select.set_options([("de", "German")]);

    assert_eq!(select.len(), 4);
    let labels: Vec<String> = select.rows().iter().map(|row| doc.text(*row)).collect();
    assert_eq!(labels, ["English", "Spanish", "French", "German"]);
}

#[test]
fn test_duplicate_value_resolves_to_latest() {
    let doc = common::document();
    let select = select_in(&doc, doc.body());
    select.set_options([("en", "English")]);
    select.set_options([("en", "Inglés")]);

    assert_eq!(select.rows().len(), 2);
    assert_eq!(select.len(), 1);

    select.set_value("en").unwrap();
    assert_eq!(select.selected_text(), "Inglés");

    // Each row keeps the label it was created with.
    select.toggle_options().unwrap();
    doc.click(select.rows()[0]);
    assert_eq!(select.selected_text(), "English");
    assert_eq!(select.value().as_deref(), Some("en"));
}

#[test]
fn test_options_from_json() {
    let json = r#"[
        {"value": "en", "text": "English"},
        {"value": "es", "label": "Spanish"}
    ]"#;
    let options: Vec<SelectOption> = serde_json::from_str(json).unwrap();

    assert_eq!(options[0], SelectOption::new("en", "English"));
    assert_eq!(options[1].label, "Spanish");

    let doc = common::document();
    let select = select_in(&doc, doc.body());
    select.set_options(options);
    select.set_value("es").unwrap();
    assert_eq!(select.selected_text(), "Spanish");
}

// ============================================================================
// Opening and choosing
// ============================================================================

#[test]
fn test_toggle_alternates() {
    let doc = common::document();
    let select = languages(&doc);

    for i in 0..6 {
        let showing = select.toggle_options().unwrap();
        assert_eq!(showing, i % 2 == 0);
        assert_eq!(doc.find_by_class("backdrop").len(), usize::from(showing));
    }
}

#[test]
fn test_rows_in_panel() {
    let doc = common::document();
    let select = languages(&doc);

    select.toggle_options().unwrap();

    let panel = select.panel().unwrap();
    assert_eq!(doc.children(panel), select.rows());
    assert_eq!(doc.parent(panel), select.backdrop());
}

#[test]
fn test_row_click_chooses_and_closes() {
    let doc = common::document();
    let select = languages(&doc);

    doc.click(select.header());
    assert!(select.is_showing());

    let spanish = select.rows()[1];
    doc.click(spanish);

    assert_eq!(select.value().as_deref(), Some("es"));
    assert_eq!(select.selected_text(), "Spanish");
    assert!(!select.is_showing());
    assert_eq!(doc.parent(spanish), None);
}

#[test]
fn test_backdrop_click_keeps_value() {
    let doc = common::document();
    let select = languages(&doc);
    select.set_value("fr").unwrap();
    select.toggle_options().unwrap();

    doc.click(select.backdrop().unwrap());

    assert!(!select.is_showing());
    assert_eq!(select.value().as_deref(), Some("fr"));
}

#[test]
fn test_glyph_follows_state() {
    let doc = common::document();
    let select = languages(&doc);
    let header = select.header();
    let first = select.glyph();

    select.toggle_options().unwrap();
    assert_eq!(glyph_markup(&doc, &select).as_deref(), Some(UP));
    assert_eq!(doc.children(header).len(), 2);
    assert_eq!(doc.children(header)[1], select.glyph());
    assert!(doc.node(first).is_none());

    select.toggle_options().unwrap();
    assert_eq!(glyph_markup(&doc, &select).as_deref(), Some(DOWN));
    assert_eq!(doc.children(header).len(), 2);
}

// ============================================================================
// Layering and positioning
// ============================================================================

#[test]
fn test_overlay_above_fixed_layering() {
    let doc = common::document();
    let surface: Arc<dyn Surface> = doc.clone();
    let select = Select::new(surface, doc.body(), "Language", Arc::new(FixedLayering(3))).unwrap();

    select.toggle_options().unwrap();

    assert_eq!(doc.style(select.backdrop().unwrap()).z_index, Some(110));
}

#[test]
fn test_overlay_above_open_dialogs() {
    let doc = common::document();
    let surface: Arc<dyn Surface> = doc.clone();
    let stack = DialogStack::new();
    let select = Select::new(
        surface.clone(),
        doc.body(),
        "Language",
        Arc::new(stack.clone()),
    )
    .unwrap();

    select.toggle_options().unwrap();
    assert_eq!(doc.style(select.backdrop().unwrap()).z_index, Some(104));
    select.toggle_options().unwrap();

    let first = Dialog::new(surface.clone(), stack.clone(), 300).unwrap();
    let second = Dialog::new(surface, stack.clone(), 300).unwrap();
    first.open().unwrap();
    second.open().unwrap();

    select.toggle_options().unwrap();
    assert_eq!(doc.style(select.backdrop().unwrap()).z_index, Some(108));
    let second_z = doc.style(second.root()).z_index.unwrap();
    assert!(doc.style(select.backdrop().unwrap()).z_index.unwrap() > second_z);
}

#[test]
fn test_panel_relative_to_offset_parent() {
    let doc = common::document();
    let dialog = doc.create_element("div");
    doc.set_positioned(dialog, true);
    doc.set_layout(dialog, Rect::new(200, 100, 400, 300));
    doc.append_child(doc.body(), dialog).unwrap();
    let form = doc.create_element("form");
    doc.append_child(dialog, form).unwrap();

    let select = select_in(&doc, form);
    select.set_options(LANGUAGES);
    doc.set_layout(select.header(), Rect::new(20, 40, 150, 30));

    select.toggle_options().unwrap();

    let style = doc.style(select.panel().unwrap());
    assert_eq!(style.width, Some(150));
    assert_eq!(style.left, Some(220));
    assert_eq!(style.top, Some(100 + 40 + 30 + 4));
}

#[test]
fn test_panel_clamped_to_viewport() {
    let doc = Arc::new(Document::new(Viewport::new(300, 400)));
    let select = select_in(&doc, doc.body());
    doc.set_layout(select.header(), Rect::new(200, 40, 150, 30));

    select.toggle_options().unwrap();

    assert_eq!(doc.style(select.panel().unwrap()).left, Some(300 - 150 - 4));
}
