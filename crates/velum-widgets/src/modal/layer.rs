#![forbid(unsafe_code)]

//! Per-window overlay layer.
//!
//! A layer owns the overlay surface of one top-level window and the modals
//! stacked on it. Insertion order is z-order: the last container is on top
//! and is the only one that receives dismiss gestures.
//!
//! # Invariants
//!
//! 1. The overlay surface is visible iff the layer holds a container.
//! 2. Removing a container never reorders the others.
//! 3. The host holds exactly one registration per gesture while any
//!    container wants it, and none otherwise.

use std::time::Duration;

use velum_core::event::Event;
use velum_core::geometry::{Rect, Size};

use super::container::{CloseOutcome, ModalContainer, ModalPhase, TickOutcome};
use super::content::ModalContent;
use super::error::ModalError;
use super::host::{DismissAction, DismissGesture, ModalHost, OverlayCanvas, OwnerId, WindowId};
use super::id::ModalId;
use super::options::ModalOptions;
use super::panel::ModalPanel;
use super::request::DismissHandle;

/// Reference counts of the gesture registrations held on one window.
#[derive(Debug)]
pub(crate) struct GestureBindings {
    window: WindowId,
    escape: usize,
    click_outside: usize,
}

impl GestureBindings {
    pub(crate) fn new(window: WindowId) -> Self {
        Self {
            window,
            escape: 0,
            click_outside: 0,
        }
    }

    pub(crate) fn count(&self, gesture: DismissGesture) -> usize {
        match gesture {
            DismissGesture::Escape => self.escape,
            DismissGesture::ClickOutside => self.click_outside,
        }
    }

    fn count_mut(&mut self, gesture: DismissGesture) -> &mut usize {
        match gesture {
            DismissGesture::Escape => &mut self.escape,
            DismissGesture::ClickOutside => &mut self.click_outside,
        }
    }

    pub(crate) fn acquire(&mut self, gesture: DismissGesture, host: &mut dyn ModalHost) {
        let window = self.window;
        let count = self.count_mut(gesture);
        *count += 1;
        if *count == 1 {
            tracing::trace!(?window, ?gesture, "dismiss gesture registered");
            host.register_gesture(window, gesture);
        }
    }

    pub(crate) fn release(&mut self, gesture: DismissGesture, host: &mut dyn ModalHost) {
        let window = self.window;
        let count = self.count_mut(gesture);
        match *count {
            0 => host.report_error(ModalError::Internal {
                id: None,
                detail: format!("{gesture:?} released on {window:?} with no registration"),
            }),
            1 => {
                *count = 0;
                tracing::trace!(?window, ?gesture, "dismiss gesture unregistered");
                host.unregister_gesture(window, gesture);
            }
            _ => *count -= 1,
        }
    }
}

/// The overlay of one top-level window and its stacked modals.
#[derive(Debug)]
pub struct ModalContainerLayer {
    window: WindowId,
    surface: Rect,
    visible: bool,
    containers: Vec<ModalContainer>,
    bindings: GestureBindings,
}

impl ModalContainerLayer {
    /// Install a hidden overlay spanning the window's client area.
    pub(crate) fn new(window: WindowId, host: &mut dyn ModalHost) -> Self {
        let surface = Rect::from_size(host.client_size(window));
        host.install_overlay(window);
        tracing::debug!(?window, width = surface.width, height = surface.height, "modal layer created");
        Self {
            window,
            surface,
            visible: false,
            containers: Vec::new(),
            bindings: GestureBindings::new(window),
        }
    }

    #[inline]
    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Overlay surface bounds; always the full client area.
    #[inline]
    pub fn surface(&self) -> Rect {
        self.surface
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Whether a modal with `id` is on this layer (in any phase).
    pub fn check_id(&self, id: &ModalId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &ModalId) -> Option<&ModalContainer> {
        self.containers.iter().find(|c| c.id() == id)
    }

    /// Containers bottom to top.
    pub fn containers(&self) -> &[ModalContainer] {
        &self.containers
    }

    /// Ids bottom to top.
    pub fn ids(&self) -> impl Iterator<Item = &ModalId> + '_ {
        self.containers.iter().map(ModalContainer::id)
    }

    /// Topmost container, whatever its phase.
    pub fn top(&self) -> Option<&ModalContainer> {
        self.containers.last()
    }

    pub fn is_animating(&self) -> bool {
        self.containers.iter().any(ModalContainer::is_animating)
    }

    /// Number of containers currently holding `gesture`.
    pub fn gesture_count(&self, gesture: DismissGesture) -> usize {
        self.bindings.count(gesture)
    }

    /// Push a new modal on top and start showing it.
    ///
    /// The modal takes its id and instance number from `handle`, which is
    /// then given to the content.
    pub(crate) fn add(
        &mut self,
        owner: OwnerId,
        content: Box<dyn ModalContent>,
        options: ModalOptions,
        handle: DismissHandle,
        host: &mut dyn ModalHost,
    ) {
        let id = handle.id().clone();
        let generation = handle.generation();
        let mut panel = ModalPanel::new(content, &options);
        panel.install(handle);

        let mut container = ModalContainer::new(id, generation, owner, panel, options);
        container.show(&mut self.bindings, host);
        tracing::debug!(
            modal_id = %container.id(),
            window = ?self.window,
            depth = self.containers.len() + 1,
            "modal added"
        );
        self.containers.push(container);

        self.set_visible(true, host);
        self.layout(host);
        host.request_redraw(self.window);
    }

    /// Start closing `id`. Returns `false` if it is not on this layer.
    ///
    /// The container is detached once its close transition completes, which
    /// is inside this call when animation is disabled.
    pub(crate) fn remove(&mut self, id: &ModalId, host: &mut dyn ModalHost) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let outcome = self.containers[index].close(&mut self.bindings, host);
        match outcome {
            CloseOutcome::Detach => self.detach(index, host),
            CloseOutcome::Closing => host.request_redraw(self.window),
            CloseOutcome::Ignored => {
                tracing::debug!(modal_id = %id, "close ignored, modal already closing");
            }
        }
        true
    }

    /// Reverse a closing modal. Returns `false` unless `id` was closing.
    pub(crate) fn reopen(&mut self, id: &ModalId, host: &mut dyn ModalHost) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let container = &mut self.containers[index];
        if container.phase() != ModalPhase::Closing {
            return false;
        }
        container.show(&mut self.bindings, host);
        host.request_redraw(self.window);
        true
    }

    /// Close every modal immediately, without animation.
    ///
    /// Returns the number of modals removed.
    pub(crate) fn close_all(&mut self, host: &mut dyn ModalHost) -> usize {
        let count = self.containers.len();
        for container in &mut self.containers {
            container.dispose(&mut self.bindings, host);
        }
        self.containers.clear();
        self.set_visible(false, host);
        if count > 0 {
            tracing::debug!(window = ?self.window, count, "all modals closed");
            host.request_redraw(self.window);
        }
        count
    }

    /// Resize the overlay to the new client area and re-run layout.
    pub(crate) fn resize(&mut self, size: Size, host: &mut dyn ModalHost) {
        self.surface = Rect::from_size(size);
        tracing::debug!(window = ?self.window, width = size.width, height = size.height, "modal layer resized");
        self.layout(host);
        host.request_redraw(self.window);
    }

    /// Recompute every container's bounds, then deliver deferred opened
    /// notifications (focus, then the content hook).
    pub(crate) fn layout(&mut self, host: &mut dyn ModalHost) {
        let size = self.surface.size();
        for container in &mut self.containers {
            container.layout(size);
        }
        for container in &mut self.containers {
            match container.panel_mut().flush_opened() {
                Ok(false) => {}
                Ok(true) => tracing::debug!(modal_id = %container.id(), "opened hook delivered"),
                Err(source) => host.report_error(ModalError::Hook {
                    id: container.id().clone(),
                    hook: "on_opened",
                    source,
                }),
            }
        }
    }

    /// Advance every container by `delta`. Returns whether any container is
    /// still animating afterwards.
    pub(crate) fn tick(&mut self, delta: Duration, host: &mut dyn ModalHost) -> bool {
        let mut moved = false;
        let mut opened = false;
        let mut finished = Vec::new();

        for container in &mut self.containers {
            match container.advance(delta) {
                TickOutcome::Idle => {}
                TickOutcome::Animating => moved = true,
                TickOutcome::Opened => {
                    moved = true;
                    opened = true;
                }
                TickOutcome::Closed => {
                    moved = true;
                    finished.push(container.id().clone());
                }
                TickOutcome::Spurious => host.report_error(ModalError::Internal {
                    id: Some(container.id().clone()),
                    detail: "animation completed for a modal that was not transitioning".to_owned(),
                }),
            }
        }

        for id in finished {
            if let Some(index) = self.position(&id) {
                self.detach(index, host);
            }
        }
        if opened {
            self.layout(host);
        }
        if moved {
            host.request_redraw(self.window);
        }
        self.is_animating()
    }

    /// Route an input event to the topmost live modal.
    pub(crate) fn dispatch(&mut self, event: &Event, host: &mut dyn ModalHost) -> Option<DismissAction> {
        let gesture = match event {
            Event::Key(key) if key.is_escape_press() => DismissGesture::Escape,
            Event::Mouse(mouse) if mouse.is_primary_press() => DismissGesture::ClickOutside,
            Event::Resize { width, height } => {
                self.resize(Size::new(*width, *height), host);
                return None;
            }
            _ => return None,
        };

        let top = self.containers.iter().rev().find(|c| c.phase().is_live())?;
        if !top.holds_gesture(gesture) {
            return None;
        }
        if let Event::Mouse(mouse) = event
            && top.contains(mouse.x, mouse.y)
        {
            return None;
        }

        let id = top.id().clone();
        tracing::debug!(modal_id = %id, ?gesture, "modal dismissed by gesture");
        self.remove(&id, host);
        Some(DismissAction { id, gesture })
    }

    /// Paint every visible modal bottom to top.
    pub fn paint(&self, canvas: &mut dyn OverlayCanvas) {
        if !self.visible {
            return;
        }
        for container in &self.containers {
            container.paint(self.surface, canvas);
        }
    }

    /// Close everything and remove the overlay surface.
    pub(crate) fn teardown(&mut self, host: &mut dyn ModalHost) {
        self.close_all(host);
        host.remove_overlay(self.window);
        tracing::debug!(window = ?self.window, "modal layer removed");
    }

    fn position(&self, id: &ModalId) -> Option<usize> {
        self.containers.iter().position(|c| c.id() == id)
    }

    fn detach(&mut self, index: usize, host: &mut dyn ModalHost) {
        let container = self.containers.remove(index);
        tracing::debug!(
            modal_id = %container.id(),
            window = ?self.window,
            remaining = self.containers.len(),
            "modal removed"
        );
        if self.containers.is_empty() {
            self.set_visible(false, host);
        }
        host.request_redraw(self.window);
    }

    fn set_visible(&mut self, visible: bool, host: &mut dyn ModalHost) {
        if self.visible != visible {
            self.visible = visible;
            host.set_overlay_visible(self.window, visible);
        }
    }
}
