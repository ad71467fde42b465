#![forbid(unsafe_code)]

//! Application-owned entry point for showing and closing modals.
//!
//! # Threading
//!
//! A registry lives on the UI thread that owns the host. Other threads (and
//! hosted content, from inside its own hooks) post through a
//! [`ModalProxy`]; queued requests are applied in posting order before every
//! mutating call and at the start of every tick.

use std::sync::mpsc;
use std::time::Duration;

use ahash::AHashMap;
use velum_core::event::Event;
use velum_core::geometry::{Rect, Size};
use web_time::Instant;

use super::container::{ModalContainer, ModalPhase};
use super::content::ModalContent;
use super::error::ModalError;
use super::host::{DismissAction, ModalHost, OverlayCanvas, OwnerId, WindowId};
use super::id::ModalId;
use super::layer::ModalContainerLayer;
use super::options::ModalOptions;
use super::request::{DismissHandle, ModalProxy, ModalRequest};

/// Maps windows to their modal layer and routes every modal operation.
pub struct ModalRegistry<H: ModalHost> {
    host: H,
    layers: AHashMap<WindowId, ModalContainerLayer>,
    defaults: ModalOptions,
    sender: mpsc::Sender<ModalRequest>,
    requests: mpsc::Receiver<ModalRequest>,
    next_id: u64,
    next_generation: u64,
    last_frame: Option<Instant>,
}

impl<H: ModalHost + std::fmt::Debug> std::fmt::Debug for ModalRegistry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalRegistry")
            .field("host", &self.host)
            .field("layers", &self.layers.len())
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl<H: ModalHost> ModalRegistry<H> {
    /// Create a registry with the built-in default options.
    pub fn new(host: H) -> Self {
        Self::with_defaults(host, ModalOptions::default())
    }

    /// Create a registry with a custom default template.
    pub fn with_defaults(host: H, defaults: ModalOptions) -> Self {
        let (sender, requests) = mpsc::channel();
        Self {
            host,
            layers: AHashMap::new(),
            defaults,
            sender,
            requests,
            next_id: 1,
            next_generation: 1,
            last_frame: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the registry, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// A `Send + Clone` handle for posting requests to this registry.
    pub fn proxy(&self) -> ModalProxy {
        ModalProxy::new(self.sender.clone())
    }

    /// Show `content` over the window that contains `owner`.
    ///
    /// `options` defaults to a copy of the registry defaults; `id` defaults to
    /// a generated `modal-<n>`.
    ///
    /// # Errors
    ///
    /// - [`ModalError::UnresolvedOwner`] if `owner` is not in a window.
    /// - [`ModalError::InvalidOption`] if the options fail validation.
    /// - [`ModalError::DuplicateId`] if `id` is active on any window,
    ///   including a modal that is still closing.
    ///
    /// Nothing is mutated when an error is returned.
    pub fn show_modal(
        &mut self,
        owner: OwnerId,
        content: impl ModalContent + 'static,
        options: Option<ModalOptions>,
        id: Option<ModalId>,
    ) -> Result<ModalId, ModalError> {
        self.process_requests();

        let Some(window) = self.host.resolve_window(owner) else {
            tracing::warn!(?owner, "show rejected: owner has no window");
            return Err(ModalError::UnresolvedOwner { owner });
        };

        let options = options.unwrap_or_else(|| self.defaults.copy());
        if let Some((field, reason)) = options.issues().into_iter().next() {
            tracing::warn!(field, %reason, "show rejected: invalid option");
            return Err(ModalError::InvalidOption { field, reason });
        }

        let id = match id {
            Some(id) => {
                if self.is_modal_open(&id) {
                    tracing::warn!(modal_id = %id, "show rejected: id in use");
                    return Err(ModalError::DuplicateId { id });
                }
                id
            }
            None => self.generate_id(),
        };

        let generation = self.next_generation;
        self.next_generation += 1;
        let handle = DismissHandle::new(id.clone(), generation, self.proxy());
        let host = &mut self.host;
        let layer = self
            .layers
            .entry(window)
            .or_insert_with(|| ModalContainerLayer::new(window, host));
        layer.add(owner, Box::new(content), options, handle, host);
        tracing::debug!(modal_id = %id, generation, ?window, "modal shown");
        Ok(id)
    }

    /// Close the modal `id`, animating if its options say so.
    ///
    /// Unknown ids are ignored (logged at debug level) and return `false`.
    pub fn close_modal(&mut self, id: &ModalId) -> bool {
        self.process_requests();
        self.close_inner(id)
    }

    /// Like [`close_modal`](Self::close_modal) but reports unknown ids.
    pub fn try_close_modal(&mut self, id: &ModalId) -> Result<(), ModalError> {
        if self.close_modal(id) {
            Ok(())
        } else {
            Err(ModalError::UnknownId { id: id.clone() })
        }
    }

    /// Reverse a modal that is closing back to opening.
    ///
    /// Returns `false` for unknown ids and modals that are not closing.
    pub fn reopen_modal(&mut self, id: &ModalId) -> bool {
        self.process_requests();
        self.reopen_inner(id)
    }

    /// Close every modal on every window immediately, without animation.
    pub fn close_all_modals(&mut self) -> usize {
        self.process_requests();
        self.close_all_inner()
    }

    /// Whether `id` is active (opening, open, or still closing).
    pub fn is_modal_open(&self, id: &ModalId) -> bool {
        self.layers.values().any(|layer| layer.check_id(id))
    }

    /// Replace the default options template.
    pub fn set_default_options(&mut self, options: ModalOptions) {
        self.defaults = options;
    }

    /// Independent copy of the default options, ready to customize.
    pub fn create_options(&self) -> ModalOptions {
        self.defaults.copy()
    }

    pub fn default_options(&self) -> &ModalOptions {
        &self.defaults
    }

    /// Advance all animations by `delta`. Returns whether any modal is still
    /// animating.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.process_requests();
        let host = &mut self.host;
        let mut animating = false;
        for layer in self.layers.values_mut() {
            animating |= layer.tick(delta, host);
        }
        animating
    }

    /// Advance all animations by the time elapsed since the previous frame.
    ///
    /// The first call only records `now`.
    pub fn tick_frame(&mut self, now: Instant) -> bool {
        let delta = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_frame = Some(now);
        self.tick(delta)
    }

    /// The client area of `window` changed size.
    pub fn window_resized(&mut self, window: WindowId, size: Size) {
        self.process_requests();
        if let Some(layer) = self.layers.get_mut(&window) {
            layer.resize(size, &mut self.host);
        }
    }

    /// `window` is gone: close its modals and drop its layer.
    pub fn window_closed(&mut self, window: WindowId) {
        self.process_requests();
        if let Some(mut layer) = self.layers.remove(&window) {
            layer.teardown(&mut self.host);
        }
    }

    /// Route an input event from `window` to its topmost modal.
    ///
    /// Returns the dismissal performed, if any.
    pub fn dispatch_event(&mut self, window: WindowId, event: &Event) -> Option<DismissAction> {
        self.process_requests();
        let layer = self.layers.get_mut(&window)?;
        layer.dispatch(event, &mut self.host)
    }

    /// Paint the overlay of `window`.
    pub fn paint(&self, window: WindowId, canvas: &mut dyn OverlayCanvas) {
        if let Some(layer) = self.layers.get(&window) {
            layer.paint(canvas);
        }
    }

    /// Apply queued proxy requests in posting order.
    ///
    /// Returns the number of requests applied.
    pub fn process_requests(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(request) = self.requests.try_recv() {
            tracing::trace!(?request, "applying queued modal request");
            match request {
                ModalRequest::Close(id) => {
                    self.close_inner(&id);
                }
                ModalRequest::CloseAll => {
                    self.close_all_inner();
                }
                ModalRequest::Reopen(id) => {
                    self.reopen_inner(&id);
                }
                ModalRequest::Dismiss { id, generation } => {
                    self.dismiss_inner(&id, generation);
                }
            }
            applied += 1;
        }
        applied
    }

    /// Number of active modals across all windows.
    pub fn open_count(&self) -> usize {
        self.layers.values().map(ModalContainerLayer::len).sum()
    }

    /// Ids on `window`, bottom to top.
    pub fn open_ids(&self, window: WindowId) -> Vec<ModalId> {
        self.layers
            .get(&window)
            .map(|layer| layer.ids().cloned().collect())
            .unwrap_or_default()
    }

    /// Topmost modal on `window`.
    pub fn top_modal(&self, window: WindowId) -> Option<&ModalId> {
        self.layers.get(&window)?.top().map(|c| c.id())
    }

    pub fn phase(&self, id: &ModalId) -> Option<ModalPhase> {
        self.find(id).map(|c| c.phase())
    }

    pub fn progress(&self, id: &ModalId) -> Option<f64> {
        self.find(id).map(|c| c.progress())
    }

    /// Panel bounds from the last layout pass.
    pub fn bounds(&self, id: &ModalId) -> Option<Rect> {
        self.find(id).map(|c| c.bounds())
    }

    pub fn is_animating(&self) -> bool {
        self.layers.values().any(ModalContainerLayer::is_animating)
    }

    pub fn is_overlay_visible(&self, window: WindowId) -> bool {
        self.layers.get(&window).is_some_and(ModalContainerLayer::is_visible)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, window: WindowId) -> Option<&ModalContainerLayer> {
        self.layers.get(&window)
    }

    fn find(&self, id: &ModalId) -> Option<&ModalContainer> {
        self.layers.values().find_map(|layer| layer.get(id))
    }

    fn close_inner(&mut self, id: &ModalId) -> bool {
        let host = &mut self.host;
        let found = self
            .layers
            .values_mut()
            .find(|layer| layer.check_id(id))
            .is_some_and(|layer| layer.remove(id, host));
        if !found {
            tracing::debug!(modal_id = %id, "close ignored: unknown modal id");
        }
        found
    }

    /// Close `id` only if it is still the instance the handle was made for.
    fn dismiss_inner(&mut self, id: &ModalId, generation: u64) -> bool {
        let current = self.find(id).map(ModalContainer::generation);
        if current != Some(generation) {
            tracing::debug!(modal_id = %id, generation, ?current, "dismiss ignored: handle outlived its modal");
            return false;
        }
        self.close_inner(id)
    }

    fn reopen_inner(&mut self, id: &ModalId) -> bool {
        let host = &mut self.host;
        self.layers
            .values_mut()
            .find(|layer| layer.check_id(id))
            .is_some_and(|layer| layer.reopen(id, host))
    }

    fn close_all_inner(&mut self) -> usize {
        let host = &mut self.host;
        self.layers
            .values_mut()
            .map(|layer| layer.close_all(host))
            .sum()
    }

    fn generate_id(&mut self) -> ModalId {
        loop {
            let id = ModalId::generated(self.next_id);
            self.next_id += 1;
            if !self.is_modal_open(&id) {
                return id;
            }
        }
    }
}
