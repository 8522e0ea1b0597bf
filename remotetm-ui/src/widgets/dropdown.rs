//! DropDown widget - a header link revealing a floating menu.

use std::sync::{Arc, Mutex, Weak};

use tmdom::{NodeId, StyleProperty, Surface, element, handler};

use super::{dismiss_overlay, lock, swap_glyph};
use crate::error::WidgetError;
use crate::glyph::Glyph;
use crate::position::clamp_left;

#[derive(Debug)]
struct DropDownState {
    container: NodeId,
    header: NodeId,
    header_text: String,
    glyph: Option<NodeId>,
    /// Option nodes in insertion order. They are moved into the panel on open.
    options: Vec<NodeId>,
    /// `(backdrop, panel)` while showing.
    overlay: Option<(NodeId, NodeId)>,
}

/// An expandable menu attached under a header link.
///
/// Options are arbitrary nodes supplied by the caller. Opening moves them into
/// a panel floating over a full-page backdrop; clicking the header or the
/// backdrop closes it again.
///
/// # Example
///
/// ```ignore
/// let menu = DropDown::new(surface.clone(), toolbar)?;
/// menu.set_header_text("Memories")?;
/// menu.add_option(import_link);
/// menu.add_option(export_link);
/// ```
#[derive(Clone)]
pub struct DropDown {
    surface: Arc<dyn Surface>,
    state: Arc<Mutex<DropDownState>>,
}

impl DropDown {
    /// Create the widget and append it to `parent`.
    pub fn new(surface: Arc<dyn Surface>, parent: NodeId) -> Result<Self, WidgetError> {
        let container = element(surface.as_ref(), "div", &["dropdown"]);
        let header = surface.create_element("a");

        let state = Arc::new(Mutex::new(DropDownState {
            container,
            header,
            header_text: String::new(),
            glyph: None,
            options: Vec::new(),
            overlay: None,
        }));

        surface.on_click(header, toggle_handler(Arc::downgrade(&state)));
        surface.append_child(container, header)?;
        surface.append_child(parent, container)?;

        Ok(Self { surface, state })
    }

    /// Set the header label. The direction glyph follows the label.
    pub fn set_header_text(&self, text: impl Into<String>) -> Result<(), WidgetError> {
        let mut state = lock(&self.state);
        state.header_text = text.into();
        render_header(self.surface.as_ref(), &mut state)
    }

    /// Append a node to the menu. Takes effect the next time it opens.
    pub fn add_option(&self, option: NodeId) {
        lock(&self.state).options.push(option);
    }

    /// Open if closed, close if open. Returns whether it is now showing.
    pub fn toggle_options(&self) -> Result<bool, WidgetError> {
        toggle(self.surface.as_ref(), &self.state)
    }

    pub fn is_showing(&self) -> bool {
        lock(&self.state).overlay.is_some()
    }

    pub fn container(&self) -> NodeId {
        lock(&self.state).container
    }

    pub fn header(&self) -> NodeId {
        lock(&self.state).header
    }

    pub fn header_text(&self) -> String {
        lock(&self.state).header_text.clone()
    }

    pub fn options(&self) -> Vec<NodeId> {
        lock(&self.state).options.clone()
    }

    pub fn backdrop(&self) -> Option<NodeId> {
        lock(&self.state).overlay.map(|(backdrop, _)| backdrop)
    }

    pub fn panel(&self) -> Option<NodeId> {
        lock(&self.state).overlay.map(|(_, panel)| panel)
    }
}

fn toggle_handler(state: Weak<Mutex<DropDownState>>) -> tmdom::ClickHandler {
    handler(move |surface| {
        let Some(state) = state.upgrade() else {
            return;
        };
        if let Err(e) = toggle(surface, &state) {
            log::error!("Dropdown toggle failed: {e}");
        }
    })
}

fn toggle(surface: &dyn Surface, state: &Arc<Mutex<DropDownState>>) -> Result<bool, WidgetError> {
    let mut guard = lock(state);
    match guard.overlay.take() {
        Some((backdrop, panel)) => {
            log::debug!("Closing dropdown {}", guard.header);
            dismiss_overlay(surface, backdrop, panel, &guard.options)?;
        }
        None => {
            log::debug!("Opening dropdown {}", guard.header);
            open(surface, &mut guard, Arc::downgrade(state))?;
        }
    }
    render_header(surface, &mut guard)?;
    Ok(guard.overlay.is_some())
}

fn open(
    surface: &dyn Surface,
    state: &mut DropDownState,
    weak: Weak<Mutex<DropDownState>>,
) -> Result<(), WidgetError> {
    let backdrop = element(surface, "div", &["backdrop"]);
    surface.on_click(backdrop, toggle_handler(weak));
    surface.append_child(surface.body(), backdrop)?;

    let panel = element(surface, "div", &["dropdownOptions", "shadow"]);
    state.overlay = Some((backdrop, panel));
    surface.append_child(backdrop, panel)?;

    for option in &state.options {
        surface.append_child(panel, *option)?;
    }

    let header = surface.metrics(state.header);
    let width = surface.metrics(panel).client_width;
    let left = clamp_left(header.offset_left, width, surface.viewport_width());
    surface.set_style(panel, StyleProperty::Left(left));
    surface.set_style(
        panel,
        StyleProperty::Top(header.client_top + header.client_height),
    );
    Ok(())
}

fn render_header(surface: &dyn Surface, state: &mut DropDownState) -> Result<(), WidgetError> {
    surface.set_text(state.header, &format!("{}\u{a0}", state.header_text));
    let glyph = Glyph::for_state(state.overlay.is_some());
    state.glyph = Some(swap_glyph(surface, state.header, state.glyph, glyph)?);
    Ok(())
}
