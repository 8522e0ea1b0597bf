//! Widget error types.

use tmdom::DomError;

/// Failure while building or updating a widget's nodes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Errors returned by [`Select`](crate::widgets::Select).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// `set_value` was given a value no option was registered for.
    #[error("Unknown select value: {0:?}")]
    UnknownValue(String),
}

/// Errors returned by [`ImportTmx::import_tmx`](crate::widgets::ImportTmx::import_tmx).
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Widget(#[from] WidgetError),

    /// The request never produced a status object.
    #[error("Upload failed: {0}")]
    Upload(#[from] remotetm_lib::error::Error),
}
