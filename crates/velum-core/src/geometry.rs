#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Overlay geometry lives in window client coordinates (pixels, origin at the
//! top-left of the client area). Origins are signed because a modal larger
//! than its window, or one sliding in from an edge, legitimately sits at a
//! negative coordinate; extents are unsigned.

/// A rectangle for overlay bounds, panel placement, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// The size of this rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (x as i64, y as i64);
        x >= self.x as i64 && x < self.right() && y >= self.y as i64 && y < self.bottom()
    }

    /// Translate the rectangle by an offset, keeping its size.
    #[inline]
    pub const fn translate(&self, offset: Offset) -> Rect {
        Rect::new(
            self.x.saturating_add(offset.dx),
            self.y.saturating_add(offset.dy),
            self.width,
            self.height,
        )
    }

    /// Create a new rectangle inside the current one with the given padding.
    pub fn inner(&self, padding: Sides) -> Rect {
        Rect {
            x: self.x.saturating_add_unsigned(padding.left),
            y: self.y.saturating_add_unsigned(padding.top),
            width: self.width.saturating_sub(padding.horizontal_sum()),
            height: self.height.saturating_sub(padding.vertical_sum()),
        }
    }

    /// Grow the rectangle outward by the given sides.
    pub fn outer(&self, sides: Sides) -> Rect {
        Rect {
            x: self.x.saturating_sub_unsigned(sides.left),
            y: self.y.saturating_sub_unsigned(sides.top),
            width: self.width.saturating_add(sides.horizontal_sum()),
            height: self.height.saturating_add(sides.vertical_sum()),
        }
    }
}

/// A 2D size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// A zero-sized extent.
    pub const ZERO: Size = Size::new(0, 0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Grow the size by the given sides.
    #[inline]
    pub const fn expand(&self, sides: Sides) -> Size {
        Size::new(
            self.width.saturating_add(sides.horizontal_sum()),
            self.height.saturating_add(sides.vertical_sum()),
        )
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// A signed displacement applied when compositing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    /// No displacement.
    pub const ZERO: Offset = Offset::new(0, 0);

    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Sides for padding/margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sides {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Sides {
    /// Create new sides with equal values.
    pub const fn all(val: u32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with specific values.
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal_sum(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical_sum(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

impl From<u32> for Sides {
    fn from(val: u32) -> Self {
        Self::all(val)
    }
}

#[cfg(test)]
mod tests {
    use super::{Offset, Rect, Sides, Size};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
    }

    #[test]
    fn rect_contains_with_negative_origin() {
        let rect = Rect::new(-10, -5, 20, 10);
        assert!(rect.contains(-10, -5));
        assert!(rect.contains(9, 4));
        assert!(!rect.contains(10, 0));
        assert!(!rect.contains(-11, 0));
    }

    #[test]
    fn rect_inner_reduces() {
        let rect = Rect::new(0, 0, 10, 10);
        let inner = rect.inner(Sides::new(1, 2, 3, 4));
        assert_eq!(inner, Rect::new(4, 1, 4, 6));
    }

    #[test]
    fn rect_inner_saturates_to_empty() {
        let rect = Rect::new(0, 0, 4, 4);
        let inner = rect.inner(Sides::all(5));
        assert!(inner.is_empty());
    }

    #[test]
    fn rect_outer_is_inverse_of_inner() {
        let rect = Rect::new(10, 10, 30, 20);
        let pad = Sides::all(5);
        assert_eq!(rect.inner(pad).outer(pad), rect);
    }

    #[test]
    fn rect_translate_keeps_size() {
        let rect = Rect::new(5, 5, 10, 10).translate(Offset::new(-8, 3));
        assert_eq!(rect, Rect::new(-3, 8, 10, 10));
    }

    #[test]
    fn size_expand_adds_both_sides() {
        let size = Size::new(300, 200).expand(Sides::all(20));
        assert_eq!(size, Size::new(340, 240));
    }

    #[test]
    fn sides_sums() {
        let sides = Sides::new(1, 2, 3, 4);
        assert_eq!(sides.horizontal_sum(), 6);
        assert_eq!(sides.vertical_sum(), 4);
        assert_eq!(Sides::from(3), Sides::all(3));
    }
}
