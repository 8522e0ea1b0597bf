//! Modal dialog shell.

use std::sync::{Arc, Mutex};

use tmdom::{NodeId, StyleProperty, Surface, element};

use super::lock;
use crate::error::WidgetError;
use crate::layering::{DialogStack, dialog_z_index};

#[derive(Debug)]
struct DialogState {
    root: NodeId,
    title: NodeId,
    content: NodeId,
    buttons: NodeId,
    open: bool,
    /// Bumped on every open and close.
    generation: u64,
}

/// A modal dialog with a title bar, a content area and a button row.
///
/// The dialog's nodes are built once and attached to the body only while
/// open. Opening registers the dialog in the shared [`DialogStack`] so popups
/// can stack above it.
#[derive(Clone)]
pub struct Dialog {
    surface: Arc<dyn Surface>,
    stack: DialogStack,
    state: Arc<Mutex<DialogState>>,
}

impl Dialog {
    pub fn new(
        surface: Arc<dyn Surface>,
        stack: DialogStack,
        width: i32,
    ) -> Result<Self, WidgetError> {
        let s = surface.as_ref();

        let root = element(s, "div", &["dialog", "shadow"]);
        s.set_style(root, StyleProperty::Width(width));

        let title_bar = element(s, "div", &["dialogHeader"]);
        let title = element(s, "span", &["dialogTitle"]);
        s.append_child(title_bar, title)?;
        s.append_child(root, title_bar)?;

        let content = element(s, "div", &["dialogContent"]);
        s.append_child(root, content)?;

        let buttons = element(s, "div", &["dialogButtons"]);
        s.append_child(root, buttons)?;

        Ok(Self {
            surface,
            stack,
            state: Arc::new(Mutex::new(DialogState {
                root,
                title,
                content,
                buttons,
                open: false,
                generation: 0,
            })),
        })
    }

    pub fn set_title(&self, title: &str) {
        let node = lock(&self.state).title;
        self.surface.set_text(node, title);
    }

    pub fn title(&self) -> String {
        let node = lock(&self.state).title;
        self.surface.text(node)
    }

    /// Node that callers fill with the dialog's body.
    pub fn content_area(&self) -> NodeId {
        lock(&self.state).content
    }

    pub fn add_button(&self, button: NodeId) -> Result<(), WidgetError> {
        let buttons = lock(&self.state).buttons;
        self.surface.append_child(buttons, button)?;
        Ok(())
    }

    pub fn buttons(&self) -> Vec<NodeId> {
        let buttons = lock(&self.state).buttons;
        self.surface.children(buttons)
    }

    /// Show the dialog on top of any open ones. No-op if already open.
    pub fn open(&self) -> Result<(), WidgetError> {
        let mut state = lock(&self.state);
        if state.open {
            return Ok(());
        }
        self.surface.append_child(self.surface.body(), state.root)?;
        let depth = self.stack.push(state.root);
        let z_index = dialog_z_index(depth);
        self.surface.set_style(state.root, StyleProperty::ZIndex(z_index));
        state.open = true;
        state.generation += 1;
        log::debug!(
            "Opened dialog {:?} at depth {depth}",
            self.surface.text(state.title)
        );
        Ok(())
    }

    /// Hide the dialog. No-op if already closed.
    pub fn close(&self) -> Result<(), WidgetError> {
        let mut state = lock(&self.state);
        if state.open {
            self.hide(&mut state)?;
        }
        Ok(())
    }

    /// Close the dialog only if it is still in the open period identified by
    /// `generation`. Returns whether it was closed.
    pub fn close_if_generation(&self, generation: u64) -> Result<bool, WidgetError> {
        let mut state = lock(&self.state);
        if !state.open || state.generation != generation {
            return Ok(false);
        }
        self.hide(&mut state)?;
        Ok(true)
    }

    pub fn is_open(&self) -> bool {
        lock(&self.state).open
    }

    /// Whether the dialog is open and still in the period `generation`.
    pub fn is_current(&self, generation: u64) -> bool {
        let state = lock(&self.state);
        state.open && state.generation == generation
    }

    /// Counter identifying the current open/closed period. Work started while
    /// the dialog was open is stale once this changes.
    pub fn generation(&self) -> u64 {
        lock(&self.state).generation
    }

    pub fn root(&self) -> NodeId {
        lock(&self.state).root
    }

    fn hide(&self, state: &mut DialogState) -> Result<(), WidgetError> {
        if let Some(parent) = self.surface.parent(state.root) {
            self.surface.remove_child(parent, state.root)?;
        }
        self.stack.remove(state.root);
        state.open = false;
        state.generation += 1;
        log::debug!("Closed dialog {:?}", self.surface.text(state.title));
        Ok(())
    }
}
