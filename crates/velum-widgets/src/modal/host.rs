#![forbid(unsafe_code)]

//! The seam between the engine and a concrete window system.
//!
//! The engine never touches native windows directly. A [`ModalHost`]
//! resolves owners to windows, reports client sizes, and carries the overlay
//! and gesture plumbing; an [`OverlayCanvas`] receives paint calls.

use velum_core::color::Rgba;
use velum_core::geometry::{Rect, Size};

use super::error::ModalError;
use super::id::ModalId;
use super::panel::PanelFrame;

/// Handle of a top-level window known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// Handle of a UI element that can own a modal.
///
/// The host maps it to the top-level window that contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub u64);

/// Dismiss gestures a layer can ask the host to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissGesture {
    /// Unmodified escape key press.
    Escape,
    /// Primary pointer press outside the topmost modal's bounds.
    ClickOutside,
}

/// A dismissal performed by [`ModalRegistry::dispatch_event`](super::ModalRegistry::dispatch_event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DismissAction {
    pub id: ModalId,
    pub gesture: DismissGesture,
}

/// Window-system services the engine relies on.
///
/// Gesture registration is reference counted by the engine: `register_gesture`
/// is called when the first open modal on a window wants a gesture and
/// `unregister_gesture` when the last one lets go, so hosts never see
/// duplicate or leaked registrations.
pub trait ModalHost {
    /// Top-level window containing `owner`, if it is attached to one.
    fn resolve_window(&self, owner: OwnerId) -> Option<WindowId>;

    /// Current client-area size of `window`.
    fn client_size(&self, window: WindowId) -> Size;

    /// Create the overlay surface for `window`. It starts hidden.
    fn install_overlay(&mut self, window: WindowId);

    /// Destroy the overlay surface of `window`.
    fn remove_overlay(&mut self, window: WindowId);

    fn set_overlay_visible(&mut self, window: WindowId, visible: bool);

    /// Start routing `gesture` events on `window` to the engine.
    fn register_gesture(&mut self, window: WindowId, gesture: DismissGesture);

    /// Stop routing `gesture` events on `window` to the engine.
    fn unregister_gesture(&mut self, window: WindowId, gesture: DismissGesture);

    /// The overlay of `window` needs repainting.
    fn request_redraw(&mut self, _window: WindowId) {}

    /// A failure that did not abort the current operation.
    fn report_error(&mut self, error: ModalError) {
        tracing::error!(kind = ?error.kind(), modal_id = ?error.modal_id(), %error, "modal error");
    }
}

/// Paint target for one overlay surface.
pub trait OverlayCanvas {
    /// Fill `rect` with `color`, blending by its alpha.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Draw the panel of modal `id` as described by `frame`.
    fn draw_panel(&mut self, id: &ModalId, frame: &PanelFrame);
}
