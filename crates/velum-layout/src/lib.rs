#![forbid(unsafe_code)]

//! Anchor-based placement of overlay content.
//!
//! # Role in Velum
//! `velum-layout` answers one question: given the size of an overlay surface
//! and the preferred size of a piece of content, where does the content go?
//! The answer depends only on its inputs, so callers re-run it on every
//! layout pass (resize, content size change) instead of caching it.
//!
//! # Placement rules
//!
//! | Anchor | x | y |
//! |---|---|---|
//! | `Start` (left / top) | `margin` | `margin` |
//! | `Center` | `(cw - w) / 2` | `(ch - h) / 2` |
//! | `End` (right / bottom) | `cw - w - margin` | `ch - h - margin` |
//!
//! Content larger than its container is not clamped; the origin simply goes
//! negative so the content stays anchored as requested. The centered origin
//! truncates toward zero, so an odd remainder puts the extra pixel on the
//! right (or bottom) when content fits and on the left (or top) when it
//! overflows.

use velum_core::geometry::{Rect, Size};

/// Horizontal anchor of the content within the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HorizontalAnchor {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical anchor of the content within the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VerticalAnchor {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Placement of one axis, shared by both anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisAnchor {
    Start,
    Center,
    End,
}

impl From<HorizontalAnchor> for AxisAnchor {
    fn from(anchor: HorizontalAnchor) -> Self {
        match anchor {
            HorizontalAnchor::Left => Self::Start,
            HorizontalAnchor::Center => Self::Center,
            HorizontalAnchor::Right => Self::End,
        }
    }
}

impl From<VerticalAnchor> for AxisAnchor {
    fn from(anchor: VerticalAnchor) -> Self {
        match anchor {
            VerticalAnchor::Top => Self::Start,
            VerticalAnchor::Center => Self::Center,
            VerticalAnchor::Bottom => Self::End,
        }
    }
}

impl AxisAnchor {
    fn resolve(self, container: u32, content: u32, margin: u32) -> i32 {
        let container = i64::from(container);
        let content = i64::from(content);
        let margin = i64::from(margin);
        let pos = match self {
            Self::Start => margin,
            Self::Center => (container - content) / 2,
            Self::End => container - content - margin,
        };
        pos.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}

/// Compute the content rectangle for an overlay of `container` size.
///
/// The returned rectangle always has exactly `content`'s size; only the
/// origin depends on the anchors and margin.
#[must_use]
pub fn compute_bounds(
    container: Size,
    content: Size,
    horizontal: HorizontalAnchor,
    vertical: VerticalAnchor,
    margin: u32,
) -> Rect {
    let x = AxisAnchor::from(horizontal).resolve(container.width, content.width, margin);
    let y = AxisAnchor::from(vertical).resolve(container.height, content.height, margin);
    Rect::new(x, y, content.width, content.height)
}

/// Anchor + margin placement, bundled for reuse across layout passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutStrategy {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
    pub margin: u32,
}

impl LayoutStrategy {
    /// Create a strategy from anchors and margin.
    pub const fn new(horizontal: HorizontalAnchor, vertical: VerticalAnchor, margin: u32) -> Self {
        Self {
            horizontal,
            vertical,
            margin,
        }
    }

    /// Place `content` inside a container of the given size.
    #[must_use]
    pub fn compute_bounds(&self, container: Size, content: Size) -> Rect {
        compute_bounds(container, content, self.horizontal, self.vertical, self.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Size = Size::new(800, 600);
    const CONTENT: Size = Size::new(300, 200);

    fn place(h: HorizontalAnchor, v: VerticalAnchor) -> Rect {
        compute_bounds(CONTAINER, CONTENT, h, v, 20)
    }

    #[test]
    fn center_center() {
        assert_eq!(
            place(HorizontalAnchor::Center, VerticalAnchor::Center),
            Rect::new(250, 200, 300, 200)
        );
    }

    #[test]
    fn left_top() {
        assert_eq!(
            place(HorizontalAnchor::Left, VerticalAnchor::Top),
            Rect::new(20, 20, 300, 200)
        );
    }

    #[test]
    fn right_bottom() {
        assert_eq!(
            place(HorizontalAnchor::Right, VerticalAnchor::Bottom),
            Rect::new(480, 380, 300, 200)
        );
    }

    #[test]
    fn center_ignores_margin() {
        let a = compute_bounds(CONTAINER, CONTENT, HorizontalAnchor::Center, VerticalAnchor::Center, 0);
        let b = compute_bounds(CONTAINER, CONTENT, HorizontalAnchor::Center, VerticalAnchor::Center, 90);
        assert_eq!(a, b);
    }

    #[test]
    fn oversized_content_goes_negative() {
        let rect = compute_bounds(
            Size::new(100, 100),
            Size::new(300, 200),
            HorizontalAnchor::Center,
            VerticalAnchor::Bottom,
            10,
        );
        assert_eq!(rect, Rect::new(-100, -110, 300, 200));
    }

    #[test]
    fn odd_remainder_rounds_toward_top_left() {
        let rect = compute_bounds(
            Size::new(11, 11),
            Size::new(2, 2),
            HorizontalAnchor::Center,
            VerticalAnchor::Center,
            0,
        );
        assert_eq!((rect.x, rect.y), (4, 4));
    }

    #[test]
    fn odd_overflow_rounds_toward_zero() {
        let rect = compute_bounds(
            Size::new(100, 100),
            Size::new(101, 103),
            HorizontalAnchor::Center,
            VerticalAnchor::Center,
            0,
        );
        assert_eq!((rect.x, rect.y), (0, -1));
    }

    #[test]
    fn strategy_matches_free_function() {
        let strategy = LayoutStrategy::new(HorizontalAnchor::Right, VerticalAnchor::Top, 12);
        assert_eq!(
            strategy.compute_bounds(CONTAINER, CONTENT),
            compute_bounds(CONTAINER, CONTENT, HorizontalAnchor::Right, VerticalAnchor::Top, 12)
        );
    }

    #[test]
    fn default_strategy_is_centered_without_margin() {
        let strategy = LayoutStrategy::default();
        assert_eq!(strategy.horizontal, HorizontalAnchor::Center);
        assert_eq!(strategy.vertical, VerticalAnchor::Center);
        assert_eq!(strategy.margin, 0);
    }
}
