//! Retained node tree and the surface abstraction widgets render into.

pub mod document;
pub mod error;
pub mod layout;
pub mod markup;
pub mod node;
pub mod surface;

pub use document::Document;
pub use error::DomError;
pub use layout::{Metrics, Rect, Viewport};
pub use node::{InlineStyle, Node, NodeId, StyleProperty};
pub use surface::{element, handler, ClickHandler, Surface};
