#![forbid(unsafe_code)]

//! Stacked, animated, dismissible modal overlays.
//!
//! # Structure
//!
//! - [`ModalRegistry`]: the application-owned entry point. Maps windows to
//!   their layer and routes show/close/query calls.
//! - [`ModalContainerLayer`]: one per top-level window. Owns the overlay
//!   surface and the z-ordered containers on it.
//! - [`ModalContainer`]: one modal's lifecycle (phase machine, driver,
//!   gestures, layout).
//! - [`ModalPanel`]: padding/rounding around the content and the per-frame
//!   compositing values.
//! - [`ModalOptions`]: the value object that configures all of the above.
//!
//! # Invariants
//!
//! - A [`ModalId`] is unique across every window of one registry until the
//!   modal is fully closed and removed.
//! - Progress is in `[0.0, 1.0]` and monotonic within one transition.
//! - A layer's overlay surface is visible iff it holds at least one container.
//! - Removing a container never reorders the others.
//!
//! # Example
//!
//! ```ignore
//! let mut modals = ModalRegistry::new(host);
//! let id = modals.show_modal(owner, form, None, Some("client-form".into()))?;
//!
//! // Each frame:
//! modals.tick(frame_delta);
//! modals.paint(window, &mut canvas);
//!
//! // Later:
//! modals.close_modal(&id);
//! ```

mod container;
mod content;
mod error;
mod host;
mod id;
mod layer;
mod options;
mod panel;
mod registry;
mod request;

pub use container::{ModalContainer, ModalPhase};
pub use content::ModalContent;
pub use error::{ErrorKind, HookError, ModalError};
pub use host::{DismissAction, DismissGesture, ModalHost, OverlayCanvas, OwnerId, WindowId};
pub use id::ModalId;
pub use layer::ModalContainerLayer;
pub use options::{AnimationDirection, ModalOptions, OptionsConfigError};
pub use panel::{ModalPanel, PanelFrame};
pub use registry::ModalRegistry;
pub use request::{DismissHandle, ModalProxy, ModalRequest};

pub use velum_core::animation::Easing;
pub use velum_layout::{HorizontalAnchor, VerticalAnchor};
