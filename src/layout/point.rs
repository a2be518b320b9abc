//! Point: A logical cell coordinate.
//!
//! Used by widgets for selection, cursor, and viewport-origin state. These
//! are indices into a widget's own content (table cells, document lines), not
//! screen positions, so they are `usize` rather than the `u16` used by
//! [`Rect`](super::Rect).

/// A 2-D coordinate in a widget's logical content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column (or selected-cell x, or cursor column).
    pub x: usize,
    /// Row (or selected-cell y, or cursor line).
    pub y: usize,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    pub const ORIGIN: Self = Self::new(0, 0);
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
