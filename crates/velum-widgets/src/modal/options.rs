#![forbid(unsafe_code)]

//! Modal configuration value object.
//!
//! [`ModalOptions`] is plain data: every field is `Copy`, so [`copy`] (or
//! `clone`) yields a fully independent value. A container takes its own copy
//! when it is shown, so later edits to the caller's options never reach a
//! modal that is already on screen.
//!
//! # Loading from documents
//!
//! With the `options-config` feature, options can be read from TOML or JSON.
//! Missing fields take their defaults and the result is validated:
//!
//! ```toml
//! horizontal = "right"
//! vertical = "bottom"
//! margin = 24
//! opacity = 0.35
//! duration_ms = 180
//! direction = "bottom_to_top"
//! close_on_click_outside = false
//! ```
//!
//! [`copy`]: ModalOptions::copy

use std::time::Duration;

#[cfg(feature = "options-config")]
use std::path::Path;

use velum_core::animation::Easing;
use velum_core::color::Rgba;
use velum_layout::{HorizontalAnchor, LayoutStrategy, VerticalAnchor};

/// Side the panel enters from when opening (and leaves toward when closing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AnimationDirection {
    /// Travels left to right: enters from the left edge.
    LeftToRight,
    /// Travels right to left: enters from the right edge.
    #[default]
    RightToLeft,
    /// Travels downward: enters from the top edge.
    TopToBottom,
    /// Travels upward: enters from the bottom edge.
    BottomToTop,
    /// No motion, opacity only.
    Fade,
}

/// Placement, look, animation and dismissal settings for one modal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModalOptions {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
    /// Distance from the overlay edge for non-centered anchors.
    pub margin: u32,
    /// Space between the panel edge and the content.
    pub padding: u32,
    /// Panel corner radius.
    pub roundness: u32,
    /// Backdrop dim color. Its alpha is scaled by `opacity`.
    pub background: Rgba,
    /// Backdrop opacity when fully open, in `[0.0, 1.0]`.
    pub opacity: f32,
    pub animation_enabled: bool,
    /// Length of a full open or close animation.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "duration_ms", with = "duration_millis")
    )]
    pub duration: Duration,
    pub direction: AnimationDirection,
    pub easing: Easing,
    pub close_on_escape: bool,
    pub close_on_click_outside: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            horizontal: HorizontalAnchor::Center,
            vertical: VerticalAnchor::Center,
            margin: 20,
            padding: 20,
            roundness: 15,
            background: Rgba::BLACK,
            opacity: 0.5,
            animation_enabled: true,
            duration: Duration::from_millis(300),
            direction: AnimationDirection::RightToLeft,
            easing: Easing::Standard,
            close_on_escape: true,
            close_on_click_outside: true,
        }
    }
}

impl ModalOptions {
    /// Options with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Independent copy of these options.
    #[must_use]
    pub fn copy(&self) -> Self {
        *self
    }

    /// Set both anchors.
    #[must_use]
    pub fn anchor(mut self, horizontal: HorizontalAnchor, vertical: VerticalAnchor) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }

    #[must_use]
    pub fn horizontal(mut self, anchor: HorizontalAnchor) -> Self {
        self.horizontal = anchor;
        self
    }

    #[must_use]
    pub fn vertical(mut self, anchor: VerticalAnchor) -> Self {
        self.vertical = anchor;
        self
    }

    #[must_use]
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn roundness(mut self, roundness: u32) -> Self {
        self.roundness = roundness;
        self
    }

    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Set the backdrop opacity. Out-of-range values are rejected by
    /// [`validate`](Self::validate), not clamped.
    #[must_use]
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn animation_enabled(mut self, enabled: bool) -> Self {
        self.animation_enabled = enabled;
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: AnimationDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    #[must_use]
    pub fn close_on_click_outside(mut self, close: bool) -> Self {
        self.close_on_click_outside = close;
        self
    }

    pub fn set_anchor(&mut self, horizontal: HorizontalAnchor, vertical: VerticalAnchor) -> &mut Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }

    pub fn set_margin(&mut self, margin: u32) -> &mut Self {
        self.margin = margin;
        self
    }

    pub fn set_padding(&mut self, padding: u32) -> &mut Self {
        self.padding = padding;
        self
    }

    pub fn set_roundness(&mut self, roundness: u32) -> &mut Self {
        self.roundness = roundness;
        self
    }

    pub fn set_background(&mut self, color: Rgba) -> &mut Self {
        self.background = color;
        self
    }

    pub fn set_opacity(&mut self, opacity: f32) -> &mut Self {
        self.opacity = opacity;
        self
    }

    pub fn set_animation(&mut self, enabled: bool, duration: Duration) -> &mut Self {
        self.animation_enabled = enabled;
        self.duration = duration;
        self
    }

    pub fn set_direction(&mut self, direction: AnimationDirection) -> &mut Self {
        self.direction = direction;
        self
    }

    pub fn set_easing(&mut self, easing: Easing) -> &mut Self {
        self.easing = easing;
        self
    }

    pub fn set_dismiss(&mut self, on_escape: bool, on_click_outside: bool) -> &mut Self {
        self.close_on_escape = on_escape;
        self.close_on_click_outside = on_click_outside;
        self
    }

    /// Whether open/close transitions run through the animation driver.
    ///
    /// A zero duration behaves like disabled animation.
    #[inline]
    pub fn animates(&self) -> bool {
        self.animation_enabled && !self.duration.is_zero()
    }

    /// Anchor and margin as a layout strategy.
    pub fn layout_strategy(&self) -> LayoutStrategy {
        LayoutStrategy::new(self.horizontal, self.vertical, self.margin)
    }

    /// Validate all values are within their accepted ranges.
    ///
    /// Returns a list of problems. An empty list means the options are usable.
    pub fn validate(&self) -> Vec<String> {
        self.issues()
            .into_iter()
            .map(|(field, reason)| format!("{field} {reason}"))
            .collect()
    }

    /// Field name and reason for each invalid value.
    pub(crate) fn issues(&self) -> Vec<(&'static str, String)> {
        let mut issues = Vec::new();

        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            issues.push((
                "opacity",
                format!("must be in [0, 1], got {}", self.opacity),
            ));
        }

        if let Easing::CubicBezier { x1, y1, x2, y2 } = self.easing
            && ![x1, y1, x2, y2].iter().all(|v| v.is_finite())
        {
            issues.push((
                "easing",
                "cubic-bezier control points must be finite".to_owned(),
            ));
        }

        issues
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "options-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, OptionsConfigError> {
        let options: Self = toml::from_str(s).map_err(OptionsConfigError::Toml)?;
        options.checked()
    }

    /// Load from a TOML file on disk and validate.
    #[cfg(feature = "options-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, OptionsConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(OptionsConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "options-config")]
    pub fn from_json_str(s: &str) -> Result<Self, OptionsConfigError> {
        let options: Self = serde_json::from_str(s).map_err(OptionsConfigError::Json)?;
        options.checked()
    }

    /// Load from a JSON file on disk and validate.
    #[cfg(feature = "options-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OptionsConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(OptionsConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "options-config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    #[cfg(feature = "options-config")]
    fn checked(self) -> Result<Self, OptionsConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(OptionsConfigError::Validation(errors))
        }
    }
}

#[cfg(feature = "serde")]
mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Errors from loading [`ModalOptions`] documents.
#[derive(Debug)]
pub enum OptionsConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "options-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "options-config")]
    Json(serde_json::Error),
    /// The document parsed but holds out-of-range values.
    Validation(Vec<String>),
}

impl std::fmt::Display for OptionsConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "options-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "options-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation failed: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for OptionsConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "options-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "options-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
