//! Select widget - a labeled pseudo-select with a value→option map.

mod item;
mod state;

pub use item::SelectOption;
pub use state::{PANEL_GAP, Select};
