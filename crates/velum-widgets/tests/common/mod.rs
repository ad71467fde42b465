#![allow(dead_code)]

//! Shared fixtures: a recording host, a recording canvas, probe content and
//! a tracing capture layer.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing_subscriber::layer::SubscriberExt;
use velum_core::color::Rgba;
use velum_core::geometry::{Rect, Size};
use velum_widgets::modal::{
    DismissGesture, DismissHandle, Easing, HookError, ModalContent, ModalError, ModalHost, ModalId,
    ModalOptions, ModalRegistry, OverlayCanvas, OwnerId, PanelFrame, WindowId,
};

pub const MAIN: WindowId = WindowId(1);
pub const SECOND: WindowId = WindowId(2);
pub const MAIN_OWNER: OwnerId = OwnerId(10);
pub const SECOND_OWNER: OwnerId = OwnerId(20);
pub const DETACHED_OWNER: OwnerId = OwnerId(99);

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Install(WindowId),
    Remove(WindowId),
    Visible(WindowId, bool),
    Register(WindowId, DismissGesture),
    Unregister(WindowId, DismissGesture),
}

/// Window system double that records every call the engine makes.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub owners: HashMap<OwnerId, WindowId>,
    pub sizes: HashMap<WindowId, Size>,
    pub calls: Vec<HostCall>,
    pub registrations: HashMap<(WindowId, DismissGesture), i32>,
    pub overlays: HashMap<WindowId, bool>,
    pub redraws: usize,
    pub errors: Vec<ModalError>,
}

impl RecordingHost {
    /// Two windows: MAIN at 800x600 and SECOND at 1024x768.
    pub fn new() -> Self {
        let mut host = Self::default();
        host.owners.insert(MAIN_OWNER, MAIN);
        host.owners.insert(SECOND_OWNER, SECOND);
        host.sizes.insert(MAIN, Size::new(800, 600));
        host.sizes.insert(SECOND, Size::new(1024, 768));
        host
    }

    pub fn registered(&self, window: WindowId, gesture: DismissGesture) -> i32 {
        self.registrations.get(&(window, gesture)).copied().unwrap_or(0)
    }

    pub fn total_registrations(&self) -> i32 {
        self.registrations.values().sum()
    }

    pub fn overlay_visible(&self, window: WindowId) -> bool {
        self.overlays.get(&window).copied().unwrap_or(false)
    }

    pub fn count(&self, call: &HostCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl ModalHost for RecordingHost {
    fn resolve_window(&self, owner: OwnerId) -> Option<WindowId> {
        self.owners.get(&owner).copied()
    }

    fn client_size(&self, window: WindowId) -> Size {
        self.sizes.get(&window).copied().unwrap_or(Size::ZERO)
    }

    fn install_overlay(&mut self, window: WindowId) {
        self.calls.push(HostCall::Install(window));
        self.overlays.insert(window, false);
    }

    fn remove_overlay(&mut self, window: WindowId) {
        self.calls.push(HostCall::Remove(window));
        self.overlays.remove(&window);
    }

    fn set_overlay_visible(&mut self, window: WindowId, visible: bool) {
        self.calls.push(HostCall::Visible(window, visible));
        self.overlays.insert(window, visible);
    }

    fn register_gesture(&mut self, window: WindowId, gesture: DismissGesture) {
        self.calls.push(HostCall::Register(window, gesture));
        *self.registrations.entry((window, gesture)).or_insert(0) += 1;
    }

    fn unregister_gesture(&mut self, window: WindowId, gesture: DismissGesture) {
        self.calls.push(HostCall::Unregister(window, gesture));
        *self.registrations.entry((window, gesture)).or_insert(0) -= 1;
    }

    fn request_redraw(&mut self, _window: WindowId) {
        self.redraws += 1;
    }

    fn report_error(&mut self, error: ModalError) {
        self.errors.push(error);
    }
}

/// Shared record of what probe content saw.
#[derive(Debug, Default)]
pub struct ProbeLog {
    pub events: Vec<String>,
    pub handles: Vec<DismissHandle>,
}

pub type SharedLog = Rc<RefCell<ProbeLog>>;

pub fn shared_log() -> SharedLog {
    Rc::new(RefCell::new(ProbeLog::default()))
}

/// Content that logs every capability call.
pub struct Probe {
    pub name: &'static str,
    pub size: Size,
    pub log: SharedLog,
    pub fail_opened: bool,
    pub dismiss_on_open: bool,
    handle: Option<DismissHandle>,
}

impl Probe {
    pub fn new(name: &'static str, log: &SharedLog) -> Self {
        Self {
            name,
            size: Size::new(260, 160),
            log: Rc::clone(log),
            fail_opened: false,
            dismiss_on_open: false,
            handle: None,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail_opened = true;
        self
    }

    pub fn dismissing(mut self) -> Self {
        self.dismiss_on_open = true;
        self
    }

    pub fn sized(mut self, size: Size) -> Self {
        self.size = size;
        self
    }
}

impl ModalContent for Probe {
    fn preferred_size(&self) -> Size {
        self.size
    }

    fn attach_dismiss_handle(&mut self, handle: DismissHandle) {
        let mut log = self.log.borrow_mut();
        log.events.push(format!("{}:attach", self.name));
        log.handles.push(handle.clone());
        self.handle = Some(handle);
    }

    fn on_opened(&mut self) -> Result<(), HookError> {
        self.log.borrow_mut().events.push(format!("{}:opened", self.name));
        if self.dismiss_on_open
            && let Some(handle) = &self.handle
        {
            handle.dismiss();
        }
        if self.fail_opened {
            return Err(format!("{} could not load", self.name).into());
        }
        Ok(())
    }

    fn request_focus(&mut self) {
        self.log.borrow_mut().events.push(format!("{}:focus", self.name));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Dim(Rect, Rgba),
    Panel(ModalId, PanelFrame),
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Paint>,
}

impl OverlayCanvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.ops.push(Paint::Dim(rect, color));
    }

    fn draw_panel(&mut self, id: &ModalId, frame: &PanelFrame) {
        self.ops.push(Paint::Panel(id.clone(), *frame));
    }
}

pub fn registry() -> ModalRegistry<RecordingHost> {
    ModalRegistry::new(RecordingHost::new())
}

/// Animated options with a linear curve, so progress equals elapsed/duration.
pub fn linear() -> ModalOptions {
    ModalOptions::default().easing(Easing::Linear)
}

pub fn instant() -> ModalOptions {
    ModalOptions::default().animation_enabled(false)
}

pub fn id(s: &str) -> ModalId {
    ModalId::from(s)
}

// ---------------------------------------------------------------------------
// Tracing capture
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub message: String,
    pub fields: HashMap<String, String>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

struct Capture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

/// Run `f` with a capturing subscriber and return its result and the events.
pub fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<CapturedEvent>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(Capture {
        events: Arc::clone(&events),
    });
    let out = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    (out, captured)
}
