//! Widgets for the RemoteTM web console.
//!
//! Every widget renders into a [`tmdom::Surface`], so the same code drives a
//! browser bridge or the headless [`tmdom::Document`].

pub mod error;
pub mod glyph;
pub mod layering;
pub mod position;
pub mod toast;
pub mod widgets;

pub use error::{ImportError, SelectError, WidgetError};
pub use layering::{DialogStack, FixedLayering, Layering};
pub use toast::{Messenger, Toast, ToastMessenger};
pub use widgets::{Dialog, DropDown, DropZone, ImportOutcome, ImportTmx, Select, SelectOption};
