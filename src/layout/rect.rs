//! Rect: A rectangle primitive for widget layout and clipping.

/// A rectangle defined by position and size.
///
/// Widgets never mutate their rectangle in place; layout changes (including
/// terminal resizes) replace it wholesale via [`Rect::resized_by`] or a new
/// value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Column of the left edge.
    pub left: u16,
    /// Row of the top edge.
    pub top: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(left: u16, top: u16, width: u16, height: u16) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle covering a full terminal of the given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.left.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Grow or shrink the rectangle by a signed delta, keeping its origin.
    ///
    /// Each dimension is floored at zero: shrinking the terminal below a
    /// usable size degrades the rectangle instead of failing.
    #[must_use]
    pub fn resized_by(&self, dw: i32, dh: i32) -> Self {
        let width = (i32::from(self.width) + dw).max(0) as u16;
        let height = (i32::from(self.height) + dh).max(0) as u16;
        Self::new(self.left, self.top, width, height)
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect({}, {} {}x{})",
            self.left, self.top, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(2, 3, 10, 5);
        assert_eq!(rect.right(), 12);
        assert_eq!(rect.bottom(), 8);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(2, 3, 10, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(11, 7));
        assert!(!rect.contains(12, 7));
        assert!(!rect.contains(11, 8));
        assert!(!rect.contains(1, 3));
    }

    #[test]
    fn test_rect_is_empty() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(5, 5, 0, 3).is_empty());
        assert!(!Rect::new(5, 5, 1, 1).is_empty());
    }

    #[test]
    fn test_resized_by_grows_and_shrinks() {
        let rect = Rect::new(0, 1, 80, 22);
        let grown = rect.resized_by(10, 2);
        assert_eq!(grown, Rect::new(0, 1, 90, 24));
        let shrunk = rect.resized_by(-20, -4);
        assert_eq!(shrunk, Rect::new(0, 1, 60, 18));
    }

    #[test]
    fn test_resized_by_floors_at_zero() {
        let rect = Rect::new(0, 1, 10, 5);
        let degenerate = rect.resized_by(-50, -50);
        assert_eq!(degenerate.width, 0);
        assert_eq!(degenerate.height, 0);
    }
}
