#![forbid(unsafe_code)]

//! One modal's lifecycle.
//!
//! # State machine
//!
//! ```text
//!          show                 driver completes
//! Closed ───────▶ Opening ─────────────────────────▶ Open
//!   ▲               │  ▲                              │
//!   │         close │  │ reopen                 close │
//!   │               ▼  │                              │
//!   └─────────── Closing ◀────────────────────────────┘
//!   driver completes
//! ```
//!
//! With animation disabled (or a zero duration) `show` lands in `Open` and
//! `close` lands in `Closed` inside the call. Reversals (`close` while
//! opening, `reopen` while closing) restart the driver from the current
//! progress, so the panel never jumps.
//!
//! The container has no reference to its layer. The layer calls in and acts
//! on the returned outcome (detach on `Closed`, flush hooks on `Opened`).

use std::time::Duration;

use velum_core::animation::AnimationDriver;
use velum_core::geometry::{Rect, Size};

use super::host::{DismissGesture, ModalHost, OverlayCanvas, OwnerId};
use super::id::ModalId;
use super::layer::GestureBindings;
use super::options::ModalOptions;
use super::panel::ModalPanel;

/// Current phase of a modal's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModalPhase {
    /// Not visible. Terminal once the container has been shown and closed.
    #[default]
    Closed,
    /// Animating in.
    Opening,
    /// Fully visible.
    Open,
    /// Animating out.
    Closing,
}

impl ModalPhase {
    /// Check if the modal should be painted.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Check if a transition is in flight.
    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    /// Opening or open: the modal accepts dismiss gestures.
    #[inline]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }
}

/// What the layer must do after [`ModalContainer::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloseOutcome {
    /// Closed synchronously; detach now.
    Detach,
    /// A close animation started; detach when it completes.
    Closing,
    /// Already closing or closed.
    Ignored,
}

/// Result of advancing a container by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    /// No run in flight.
    Idle,
    /// Progress moved; the run continues.
    Animating,
    /// The open run completed.
    Opened,
    /// The close run completed; detach now.
    Closed,
    /// A completion arrived for a container that was not transitioning.
    Spurious,
}

#[derive(Debug, Clone, Copy, Default)]
struct HeldGestures {
    escape: bool,
    click_outside: bool,
}

/// A single modal: options, panel, animation driver and layout bounds.
#[derive(Debug)]
pub struct ModalContainer {
    id: ModalId,
    generation: u64,
    owner: OwnerId,
    options: ModalOptions,
    panel: ModalPanel,
    driver: AnimationDriver,
    phase: ModalPhase,
    progress: f64,
    bounds: Rect,
    held: HeldGestures,
}

impl ModalContainer {
    pub(crate) fn new(
        id: ModalId,
        generation: u64,
        owner: OwnerId,
        panel: ModalPanel,
        options: ModalOptions,
    ) -> Self {
        Self {
            id,
            generation,
            owner,
            options,
            panel,
            driver: AnimationDriver::new(),
            phase: ModalPhase::Closed,
            progress: 0.0,
            bounds: Rect::default(),
            held: HeldGestures::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> &ModalId {
        &self.id
    }

    /// Instance number, unique per registry. Distinguishes this modal from
    /// later modals shown under the same id.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    #[inline]
    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    /// Current animation progress in `[0.0, 1.0]`.
    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Bounds computed by the last layout pass.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// This modal's private copy of its options.
    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    pub fn panel(&self) -> &ModalPanel {
        &self.panel
    }

    pub(crate) fn panel_mut(&mut self) -> &mut ModalPanel {
        &mut self.panel
    }

    pub fn is_animating(&self) -> bool {
        self.phase.is_animating()
    }

    /// Whether this modal currently holds a registration for `gesture`.
    pub fn holds_gesture(&self, gesture: DismissGesture) -> bool {
        match gesture {
            DismissGesture::Escape => self.held.escape,
            DismissGesture::ClickOutside => self.held.click_outside,
        }
    }

    /// Whether `(x, y)` lies inside the laid-out panel.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(x, y)
    }

    /// Start (or resume) the open transition.
    ///
    /// Returns `false` if the modal was already opening or open.
    pub(crate) fn show(&mut self, bindings: &mut GestureBindings, host: &mut dyn ModalHost) -> bool {
        match self.phase {
            ModalPhase::Closed => {
                self.acquire_gestures(bindings, host);
                if self.options.animates() {
                    self.phase = ModalPhase::Opening;
                    self.progress = 0.0;
                    self.driver
                        .start_from(self.options.duration, self.options.easing, 0.0, 1.0);
                    tracing::debug!(modal_id = %self.id, duration_ms = self.options.duration.as_millis() as u64, "modal opening");
                } else {
                    self.driver.reset(1.0);
                    self.progress = 1.0;
                    self.phase = ModalPhase::Open;
                    self.panel.opened();
                    tracing::debug!(modal_id = %self.id, "modal opened without animation");
                }
                true
            }
            ModalPhase::Closing => {
                self.acquire_gestures(bindings, host);
                self.phase = ModalPhase::Opening;
                self.driver
                    .start(self.options.duration, self.options.easing, 1.0);
                tracing::debug!(modal_id = %self.id, progress = self.progress, "modal close reversed");
                true
            }
            ModalPhase::Opening | ModalPhase::Open => false,
        }
    }

    /// Start the close transition.
    ///
    /// Gestures are released immediately, before any animation runs.
    pub(crate) fn close(&mut self, bindings: &mut GestureBindings, host: &mut dyn ModalHost) -> CloseOutcome {
        match self.phase {
            ModalPhase::Opening | ModalPhase::Open => {
                self.release_gestures(bindings, host);
                self.panel.cancel_opened();
                if self.options.animates() {
                    let interrupted = self.phase == ModalPhase::Opening;
                    self.phase = ModalPhase::Closing;
                    self.driver
                        .start(self.options.duration, self.options.easing, 0.0);
                    tracing::debug!(modal_id = %self.id, progress = self.progress, interrupted, "modal closing");
                    CloseOutcome::Closing
                } else {
                    self.driver.reset(0.0);
                    self.progress = 0.0;
                    self.phase = ModalPhase::Closed;
                    tracing::debug!(modal_id = %self.id, "modal closed without animation");
                    CloseOutcome::Detach
                }
            }
            ModalPhase::Closing | ModalPhase::Closed => CloseOutcome::Ignored,
        }
    }

    /// Close immediately, skipping any animation.
    pub(crate) fn dispose(&mut self, bindings: &mut GestureBindings, host: &mut dyn ModalHost) {
        self.driver.cancel();
        self.release_gestures(bindings, host);
        self.panel.cancel_opened();
        self.progress = 0.0;
        self.phase = ModalPhase::Closed;
    }

    /// Advance the in-flight transition by `delta`.
    pub(crate) fn advance(&mut self, delta: Duration) -> TickOutcome {
        if !self.driver.is_playing() {
            return TickOutcome::Idle;
        }
        let progress = &mut self.progress;
        let mut completions = 0_u32;
        self.driver
            .advance(delta, &mut (|p: f64| *progress = p, || completions += 1));
        tracing::trace!(modal_id = %self.id, progress = self.progress, "modal tick");

        if completions == 0 {
            return TickOutcome::Animating;
        }
        match self.phase {
            ModalPhase::Opening => {
                self.phase = ModalPhase::Open;
                self.panel.opened();
                tracing::debug!(modal_id = %self.id, "modal opened");
                TickOutcome::Opened
            }
            ModalPhase::Closing => {
                self.phase = ModalPhase::Closed;
                tracing::debug!(modal_id = %self.id, "modal closed");
                TickOutcome::Closed
            }
            ModalPhase::Open | ModalPhase::Closed => TickOutcome::Spurious,
        }
    }

    /// Recompute the panel bounds for an overlay of `surface` size.
    pub(crate) fn layout(&mut self, surface: Size) -> Rect {
        self.bounds = self
            .options
            .layout_strategy()
            .compute_bounds(surface, self.panel.preferred_size());
        self.bounds
    }

    /// Paint the dimmed backdrop over `surface`, then the panel.
    pub fn paint(&self, surface: Rect, canvas: &mut dyn OverlayCanvas) {
        if !self.phase.is_visible() {
            return;
        }
        let dim = f64::from(self.options.opacity) * self.progress;
        if dim > 0.0 {
            canvas.fill_rect(surface, self.options.background.with_opacity(dim as f32));
        }
        self.panel
            .paint(&self.id, self.bounds, self.progress, self.options.direction, canvas);
    }

    fn acquire_gestures(&mut self, bindings: &mut GestureBindings, host: &mut dyn ModalHost) {
        if self.options.close_on_escape && !self.held.escape {
            bindings.acquire(DismissGesture::Escape, host);
            self.held.escape = true;
        }
        if self.options.close_on_click_outside && !self.held.click_outside {
            bindings.acquire(DismissGesture::ClickOutside, host);
            self.held.click_outside = true;
        }
    }

    fn release_gestures(&mut self, bindings: &mut GestureBindings, host: &mut dyn ModalHost) {
        if self.held.escape {
            bindings.release(DismissGesture::Escape, host);
            self.held.escape = false;
        }
        if self.held.click_outside {
            bindings.release(DismissGesture::ClickOutside, host);
            self.held.click_outside = false;
        }
    }
}
