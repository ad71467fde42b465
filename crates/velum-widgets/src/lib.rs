#![forbid(unsafe_code)]

//! Overlay widgets for Velum hosts.
//!
//! The [`modal`] module is the overlay presentation engine: window-scoped
//! overlay surfaces, per-modal animation, anchored layout, z-order, and
//! dismiss gestures, independent of what the hosted content is.

pub mod modal;
