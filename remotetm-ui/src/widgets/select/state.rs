//! Select widget state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use tmdom::{ClickHandler, NodeId, StyleProperty, Surface, element, handler};

use super::SelectOption;
use crate::error::{SelectError, WidgetError};
use crate::glyph::Glyph;
use crate::layering::{Layering, overlay_z_index};
use crate::position::clamp_left;
use crate::widgets::{dismiss_overlay, lock, swap_glyph};

/// Vertical gap between the header and the options panel.
pub const PANEL_GAP: i32 = 4;

struct SelectState {
    label_text: String,
    label: NodeId,
    header: NodeId,
    selected_text: NodeId,
    glyph: NodeId,
    /// Clickable rows in display order, one per registered option.
    rows: Vec<NodeId>,
    options: HashMap<String, SelectOption>,
    value: Option<String>,
    /// `(backdrop, panel)` while showing.
    overlay: Option<(NodeId, NodeId)>,
    layering: Arc<dyn Layering>,
}

impl SelectState {
    fn choose(&mut self, surface: &dyn Surface, option: &SelectOption) {
        surface.set_text(self.selected_text, &option.label);
        self.value = Some(option.value.clone());
        surface.remove_class(self.selected_text, "placeholder");
        surface.remove_class(self.label, "hiddenLabel");
    }
}

/// A labeled select control that does not rely on a native `<select>`.
///
/// The floating label stays hidden and the header shows the label text as a
/// placeholder until a value is chosen, either by clicking a row or through
/// [`Select::set_value`].
///
/// The overlay is stacked above every open dialog (see
/// [`overlay_z_index`]) and the panel is placed relative to the header's
/// offset parent, so the control works inside dialogs.
///
/// # Example
///
/// ```ignore
/// let language = Select::new(surface.clone(), form, "Language", stack.clone())?;
/// language.set_options([("en", "English"), ("es", "Spanish")]);
/// language.set_value("en")?;
/// assert_eq!(language.value().as_deref(), Some("en"));
/// ```
#[derive(Clone)]
pub struct Select {
    surface: Arc<dyn Surface>,
    state: Arc<Mutex<SelectState>>,
}

impl Select {
    /// Create the control and append it to `parent`.
    pub fn new(
        surface: Arc<dyn Surface>,
        parent: NodeId,
        label: impl Into<String>,
        layering: Arc<dyn Layering>,
    ) -> Result<Self, WidgetError> {
        let label_text = label.into();
        let s = surface.as_ref();

        let container = element(s, "div", &["inputContainer"]);
        s.append_child(parent, container)?;

        let label = element(s, "label", &["inputLabel", "hiddenLabel"]);
        s.set_text(label, &label_text);
        s.append_child(container, label)?;

        let header = element(s, "a", &["row", "inputBox"]);
        let selected_text = element(s, "span", &["fullWidth", "placeholder"]);
        s.set_text(selected_text, &label_text);
        s.append_child(header, selected_text)?;

        let glyph = s.parse_markup(Glyph::Down.markup())?;
        s.append_child(header, glyph)?;
        s.append_child(container, header)?;

        let state = Arc::new(Mutex::new(SelectState {
            label_text,
            label,
            header,
            selected_text,
            glyph,
            rows: Vec::new(),
            options: HashMap::new(),
            value: None,
            overlay: None,
            layering,
        }));
        s.on_click(header, toggle_handler(Arc::downgrade(&state)));

        Ok(Self { surface, state })
    }

    /// Register options, appending rows after any existing ones.
    ///
    /// A value registered twice keeps both rows; lookups by value resolve to
    /// the latest registration.
    pub fn set_options<I, O>(&self, options: I)
    where
        I: IntoIterator<Item = O>,
        O: Into<SelectOption>,
    {
        let surface = self.surface.as_ref();
        let mut state = lock(&self.state);
        for option in options {
            let option: SelectOption = option.into();
            let row = surface.create_element("a");
            surface.set_text(row, &option.label);
            surface.on_click(
                row,
                choose_handler(Arc::downgrade(&self.state), option.clone()),
            );

            state.rows.push(row);
            state.options.insert(option.value.clone(), option);
        }
    }

    /// Open if closed, close if open. Returns whether it is now showing.
    pub fn toggle_options(&self) -> Result<bool, WidgetError> {
        toggle(self.surface.as_ref(), &self.state)
    }

    /// The chosen value, `None` until one is picked.
    pub fn value(&self) -> Option<String> {
        lock(&self.state).value.clone()
    }

    /// Select the option registered under `value`.
    ///
    /// Fails with [`SelectError::UnknownValue`] if no option has that value;
    /// the control is left unchanged.
    pub fn set_value(&self, value: &str) -> Result<(), SelectError> {
        let mut state = lock(&self.state);
        let option = state
            .options
            .get(value)
            .cloned()
            .ok_or_else(|| SelectError::UnknownValue(value.to_string()))?;
        state.choose(self.surface.as_ref(), &option);
        Ok(())
    }

    pub fn is_showing(&self) -> bool {
        lock(&self.state).overlay.is_some()
    }

    pub fn label_text(&self) -> String {
        lock(&self.state).label_text.clone()
    }

    /// Text currently shown in the header.
    pub fn selected_text(&self) -> String {
        let node = lock(&self.state).selected_text;
        self.surface.text(node)
    }

    /// Registered options, looked up by value.
    pub fn option(&self, value: &str) -> Option<SelectOption> {
        lock(&self.state).options.get(value).cloned()
    }

    /// Number of distinct registered values.
    pub fn len(&self) -> usize {
        lock(&self.state).options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> Vec<NodeId> {
        lock(&self.state).rows.clone()
    }

    pub fn label(&self) -> NodeId {
        lock(&self.state).label
    }

    pub fn header(&self) -> NodeId {
        lock(&self.state).header
    }

    pub fn selected_text_node(&self) -> NodeId {
        lock(&self.state).selected_text
    }

    pub fn glyph(&self) -> NodeId {
        lock(&self.state).glyph
    }

    pub fn backdrop(&self) -> Option<NodeId> {
        lock(&self.state).overlay.map(|(backdrop, _)| backdrop)
    }

    pub fn panel(&self) -> Option<NodeId> {
        lock(&self.state).overlay.map(|(_, panel)| panel)
    }
}

fn choose_handler(state: Weak<Mutex<SelectState>>, option: SelectOption) -> ClickHandler {
    handler(move |surface| {
        if let Some(state) = state.upgrade() {
            lock(&state).choose(surface, &option);
        }
    })
}

fn toggle_handler(state: Weak<Mutex<SelectState>>) -> ClickHandler {
    handler(move |surface| {
        let Some(state) = state.upgrade() else {
            return;
        };
        if let Err(e) = toggle(surface, &state) {
            log::error!("Select toggle failed: {e}");
        }
    })
}

fn toggle(surface: &dyn Surface, state: &Arc<Mutex<SelectState>>) -> Result<bool, WidgetError> {
    let mut guard = lock(state);
    let glyph = match guard.overlay.take() {
        Some((backdrop, panel)) => {
            log::debug!("Closing select {:?}", guard.label_text);
            dismiss_overlay(surface, backdrop, panel, &guard.rows)?;
            Glyph::Down
        }
        None => {
            log::debug!("Opening select {:?}", guard.label_text);
            open(surface, &mut guard, Arc::downgrade(state))?;
            Glyph::Up
        }
    };
    // The replacement glyph is attached where the old one was.
    let (header, old) = (guard.header, guard.glyph);
    guard.glyph = swap_glyph(surface, header, Some(old), glyph)?;
    Ok(guard.overlay.is_some())
}

fn open(
    surface: &dyn Surface,
    state: &mut SelectState,
    weak: Weak<Mutex<SelectState>>,
) -> Result<(), WidgetError> {
    let backdrop = element(surface, "div", &["backdrop"]);
    surface.on_click(backdrop, toggle_handler(weak));
    surface.set_style(
        backdrop,
        StyleProperty::ZIndex(overlay_z_index(state.layering.open_dialogs())),
    );
    surface.append_child(surface.body(), backdrop)?;

    let header = surface.metrics(state.header);
    let panel = element(surface, "div", &["dropdownOptions", "shadow"]);
    surface.set_style(panel, StyleProperty::Width(header.client_width));
    state.overlay = Some((backdrop, panel));
    surface.append_child(backdrop, panel)?;

    for row in &state.rows {
        surface.append_child(panel, *row)?;
    }

    let parent = surface
        .offset_parent(state.header)
        .map(|p| surface.metrics(p))
        .unwrap_or_default();
    let width = surface.metrics(panel).client_width;
    let left = clamp_left(
        parent.offset_left + header.offset_left,
        width,
        surface.viewport_width(),
    );
    surface.set_style(panel, StyleProperty::Left(left));
    surface.set_style(
        panel,
        StyleProperty::Top(
            parent.offset_top + header.offset_top + header.client_height + PANEL_GAP,
        ),
    );
    Ok(())
}
