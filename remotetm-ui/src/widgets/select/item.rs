use serde::{Deserialize, Serialize};

/// One entry of a [`Select`](super::Select): the submitted value and the
/// visible label.
///
/// Deserializes from `{"value": "en", "label": "English"}`; `text` is
/// accepted as an alias for `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    #[serde(alias = "text")]
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl<V: Into<String>, L: Into<String>> From<(V, L)> for SelectOption {
    fn from((value, label): (V, L)) -> Self {
        Self::new(value, label)
    }
}
