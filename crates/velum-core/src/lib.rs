#![forbid(unsafe_code)]

//! Core: geometry, input events, colors, and animation for Velum overlays.
//!
//! # Role in Velum
//! `velum-core` holds the value types every other crate speaks in. It knows
//! nothing about modals; it supplies the rectangles they are placed in, the
//! events that dismiss them, the color they dim with, and the tick-driven
//! driver that animates them.
//!
//! # Primary responsibilities
//! - **Geometry**: signed-origin `Rect`, `Size`, `Offset`, `Sides`.
//! - **Event**: canonical key/pointer/resize events hosts translate into.
//! - **Rgba**: packed colors with opacity scaling.
//! - **Animation**: easing curves and `AnimationDriver`.

pub mod animation;
pub mod color;
pub mod event;
pub mod geometry;
