#![forbid(unsafe_code)]

//! Velum public facade crate.
//!
//! Velum presents stacked, animated, dismissible modal overlays on top of a
//! host's windows. This crate re-exports the types applications need from the
//! internal crates and offers a small prelude for day-to-day usage.
//!
//! # Example
//!
//! ```ignore
//! use velum::prelude::*;
//!
//! let mut modals = ModalRegistry::new(my_host);
//! let options = modals.create_options().direction(AnimationDirection::Fade);
//! let id = modals.show_modal(owner, ClientForm::new(), Some(options), Some("client-form".into()))?;
//!
//! // From the host's frame callback:
//! modals.tick_frame(Instant::now());
//! modals.paint(window, &mut canvas);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use velum_core::animation::{AnimationDriver, DriverListener, Easing, PlaybackState};
pub use velum_core::color::Rgba;
pub use velum_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use velum_core::geometry::{Offset, Rect, Sides, Size};

// --- Layout re-exports -----------------------------------------------------

pub use velum_layout::{HorizontalAnchor, LayoutStrategy, VerticalAnchor, compute_bounds};

// --- Modal re-exports ------------------------------------------------------

pub use velum_widgets::modal::{
    AnimationDirection, DismissAction, DismissGesture, DismissHandle, ErrorKind, HookError,
    ModalContainer, ModalContainerLayer, ModalContent, ModalError, ModalHost, ModalId,
    ModalOptions, ModalPanel, ModalPhase, ModalProxy, ModalRegistry, ModalRequest,
    OptionsConfigError, OverlayCanvas, OwnerId, PanelFrame, WindowId,
};

/// Clock used by [`ModalRegistry::tick_frame`].
pub use web_time::Instant;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Velum applications.
#[derive(Debug)]
pub enum Error {
    /// A modal operation was rejected.
    Modal(ModalError),
    /// Modal options could not be loaded.
    Options(OptionsConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modal(err) => write!(f, "{err}"),
            Self::Options(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Modal(err) => Some(err),
            Self::Options(err) => Some(err),
        }
    }
}

impl From<ModalError> for Error {
    fn from(err: ModalError) -> Self {
        Self::Modal(err)
    }
}

impl From<OptionsConfigError> for Error {
    fn from(err: OptionsConfigError) -> Self {
        Self::Options(err)
    }
}

/// Standard result type for Velum APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnimationDirection, DismissHandle, Easing, Error, Event, HorizontalAnchor, Instant,
        ModalContent, ModalError, ModalHost, ModalId, ModalOptions, ModalRegistry, OverlayCanvas,
        OwnerId, PanelFrame, Rect, Result, Rgba, Size, VerticalAnchor, WindowId,
    };

    pub use crate::{core, layout, widgets};
}

pub use velum_core as core;
pub use velum_layout as layout;
pub use velum_widgets as widgets;
