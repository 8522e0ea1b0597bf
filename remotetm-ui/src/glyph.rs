//! Direction indicators shown next to dropdown headers.

pub const DOWN: &str = r#"<svg width="12" height="7" viewBox="0 0 12 7" xmlns="http://www.w3.org/2000/svg"><path d="M1.41 0L6 4.32659L10.59 0L12 1.33198L6 7L0 1.33198L1.41 0Z" /></svg>"#;

pub const UP: &str = r#"<svg width="12" height="7" viewBox="0 0 12 7" xmlns="http://www.w3.org/2000/svg"><path d="M10.59 7L6 2.67341L1.41 7L0 5.66802L6 0L12 5.66802L10.59 7Z" /></svg>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Down,
    Up,
}

impl Glyph {
    /// Down while closed, up while open.
    pub fn for_state(showing: bool) -> Self {
        if showing { Self::Up } else { Self::Down }
    }

    pub fn markup(self) -> &'static str {
        match self {
            Self::Down => DOWN,
            Self::Up => UP,
        }
    }
}
