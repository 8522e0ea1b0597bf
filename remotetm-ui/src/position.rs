//! Popup placement.

/// Gap kept between a clamped panel and the right edge of the viewport.
pub const PANEL_MARGIN: i32 = 4;

/// Horizontal position of a panel anchored at `left`.
///
/// A panel that would overflow the viewport's right edge is shifted left so
/// it ends [`PANEL_MARGIN`] pixels before the edge.
pub fn clamp_left(left: i32, panel_width: i32, viewport_width: i32) -> i32 {
    if left + panel_width > viewport_width {
        viewport_width - panel_width - PANEL_MARGIN
    } else {
        left
    }
}
