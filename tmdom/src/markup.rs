//! Minimal parsing of single-root markup fragments.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::DomError;

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*<([A-Za-z][\w:-]*)((?:\s+[^>]*?)?)\s*(/?)>").expect("valid regex")
});

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z_:][\w:.-]*)\s*=\s*"([^"]*)""#).expect("valid regex"));

/// Root tag and attributes of a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
}

/// Read the root element of `markup`.
///
/// The fragment must start with an opening tag and either be self-closing or
/// end with the matching closing tag.
pub fn parse_fragment(markup: &str) -> Result<Fragment, DomError> {
    let captures = OPEN_TAG
        .captures(markup)
        .ok_or_else(|| DomError::InvalidMarkup(truncate(markup)))?;

    let tag = captures[1].to_string();
    let self_closing = !captures[3].is_empty();

    let rest = markup[captures[0].len()..].trim_end();
    let closed = if self_closing {
        rest.is_empty()
    } else {
        rest.ends_with(&format!("</{tag}>"))
    };
    if !closed {
        return Err(DomError::InvalidMarkup(truncate(markup)));
    }

    let attributes = ATTRIBUTE
        .captures_iter(&captures[2])
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect();

    Ok(Fragment { tag, attributes })
}

fn truncate(markup: &str) -> String {
    markup.chars().take(40).collect()
}
