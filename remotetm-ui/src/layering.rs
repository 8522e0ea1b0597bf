//! Stacking order of dialogs and popups.
//!
//! Each open dialog occupies two z-index slots (its backdrop and itself), so
//! a popup opened from inside the topmost dialog must sit above
//! `BASE_Z_INDEX + Z_INDEX_STEP * open_dialogs`.

use std::sync::{Arc, Mutex};

use tmdom::NodeId;

use crate::widgets::lock;

/// z-index of a select overlay when no dialog is open.
pub const BASE_Z_INDEX: i32 = 104;
/// z-index of the first dialog layer's base.
pub const DIALOG_BASE_Z_INDEX: i32 = 100;
/// z-index slots used per open dialog.
pub const Z_INDEX_STEP: i32 = 2;

/// Reports how many modal dialogs are currently open.
pub trait Layering: Send + Sync {
    fn open_dialogs(&self) -> usize;
}

/// z-index for a popup overlay above `open_dialogs` dialogs.
pub fn overlay_z_index(open_dialogs: usize) -> i32 {
    BASE_Z_INDEX + Z_INDEX_STEP * open_dialogs as i32
}

/// z-index for the dialog at 1-based `depth` in the stack.
pub fn dialog_z_index(depth: usize) -> i32 {
    DIALOG_BASE_Z_INDEX + Z_INDEX_STEP * depth as i32
}

/// Shared registry of open dialogs. Clones share the same stack.
#[derive(Debug, Clone, Default)]
pub struct DialogStack {
    open: Arc<Mutex<Vec<NodeId>>>,
}

impl DialogStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dialog and return its 1-based depth.
    pub fn push(&self, dialog: NodeId) -> usize {
        let mut open = lock(&self.open);
        if let Some(index) = open.iter().position(|d| *d == dialog) {
            return index + 1;
        }
        open.push(dialog);
        open.len()
    }

    pub fn remove(&self, dialog: NodeId) {
        lock(&self.open).retain(|d| *d != dialog);
    }

    pub fn top(&self) -> Option<NodeId> {
        lock(&self.open).last().copied()
    }

    pub fn len(&self) -> usize {
        lock(&self.open).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Layering for DialogStack {
    fn open_dialogs(&self) -> usize {
        self.len()
    }
}

/// A constant dialog count.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLayering(pub usize);

impl Layering for FixedLayering {
    fn open_dialogs(&self) -> usize {
        self.0
    }
}
