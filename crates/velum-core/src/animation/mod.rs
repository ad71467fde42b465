#![forbid(unsafe_code)]

//! Easing curves and the tick-driven animation driver.
//!
//! Animations here never own a thread or a timer. The host's redraw source
//! calls [`AnimationDriver::advance`] with the elapsed frame time, and the
//! driver reports progress through a [`DriverListener`].
//!
//! # Invariants
//!
//! - Every [`Easing`] maps `[0.0, 1.0]` onto `[0.0, 1.0]`, is monotonic
//!   non-decreasing, and fixes both endpoints.
//! - Inputs outside `[0.0, 1.0]` are clamped before the curve is applied.

mod driver;

pub use driver::{AnimationDriver, DriverListener, PlaybackState};

/// Easing curve applied to normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Material "standard" curve, cubic-bezier(0.4, 0.0, 0.2, 1.0).
    #[default]
    Standard,
    /// Cubic ease-out (decelerating) - good for entrances.
    EaseOut,
    /// Cubic ease-in (accelerating) - good for exits.
    EaseIn,
    /// Cubic S-curve.
    EaseInOut,
    /// Custom cubic-bezier with control points `(x1, y1)` and `(x2, y2)`.
    ///
    /// `x1`/`x2` are clamped to `[0, 1]` so the curve stays a function of time.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0).
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let eased = match self {
            Self::Linear => t,
            Self::Standard => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseIn => t * t * t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
        };
        eased.clamp(0.0, 1.0)
    }
}

/// Evaluate a CSS-style cubic bezier at time `x`.
///
/// Solves `bx(s) = x` for the curve parameter `s` (Newton steps, bisection
/// fallback) and returns `by(s)`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);

    let bezier = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    let mut s = x;
    for _ in 0..8 {
        let err = bezier(x1, x2, s) - x;
        if err.abs() < 1e-7 {
            return bezier(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    s = x;
    for _ in 0..64 {
        let value = bezier(x1, x2, s);
        if (value - x).abs() < 1e-7 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier(y1, y2, s)
}
