//! Console widgets.

mod dialog;
mod drop_zone;
mod dropdown;
mod import_tmx;
pub mod select;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tmdom::{NodeId, Surface};

pub use dialog::Dialog;
pub use drop_zone::{DROP_HINT, DropZone};
pub use dropdown::DropDown;
pub use import_tmx::{IMPORT_DIALOG_WIDTH, ImportOutcome, ImportTmx, NO_FILE_MESSAGE};
pub use select::{Select, SelectOption};

use crate::error::WidgetError;
use crate::glyph::Glyph;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Swap the glyph child of `header` for one pointing in `glyph`'s direction.
/// Returns the new glyph node.
pub(crate) fn swap_glyph(
    surface: &dyn Surface,
    header: NodeId,
    old: Option<NodeId>,
    glyph: Glyph,
) -> Result<NodeId, WidgetError> {
    let new = surface.parse_markup(glyph.markup())?;
    match old {
        Some(old) if surface.parent(old) == Some(header) => {
            surface.replace_child(header, new, old)?;
            surface.dispose(old);
        }
        _ => surface.append_child(header, new)?,
    }
    Ok(new)
}

/// Detach `items` from `panel`, then remove and free the overlay.
pub(crate) fn dismiss_overlay(
    surface: &dyn Surface,
    backdrop: NodeId,
    panel: NodeId,
    items: &[NodeId],
) -> Result<(), WidgetError> {
    for item in items {
        if surface.parent(*item) == Some(panel) {
            surface.remove_child(panel, *item)?;
        }
    }
    if let Some(parent) = surface.parent(backdrop) {
        surface.remove_child(parent, backdrop)?;
    }
    surface.dispose(backdrop);
    Ok(())
}
