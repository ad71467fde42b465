#![forbid(unsafe_code)]

//! Padding, rounding and per-frame compositing around hosted content.

use velum_core::geometry::{Offset, Rect, Sides, Size};

use super::content::ModalContent;
use super::error::HookError;
use super::host::OverlayCanvas;
use super::id::ModalId;
use super::options::{AnimationDirection, ModalOptions};
use super::request::DismissHandle;

/// Everything a canvas needs to draw one panel for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    /// Panel rectangle after the animation offset is applied.
    pub bounds: Rect,
    /// Content rectangle (panel minus padding), offset like `bounds`.
    pub content: Rect,
    /// Animation offset applied relative to the layout bounds.
    pub offset: Offset,
    /// Panel opacity in `[0.0, 1.0]`.
    pub opacity: f32,
    pub corner_radius: u32,
}

/// Offset and opacity of a panel of `extent` size at `progress`.
///
/// At progress 1.0 the panel sits at its layout position, fully opaque. At
/// 0.0 a directional panel is one full extent away on the side it enters
/// from; a fading panel never moves.
pub fn composite(direction: AnimationDirection, extent: Size, progress: f64) -> (Offset, f32) {
    let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    let remaining = 1.0 - progress;
    let travel = |len: u32| (f64::from(len) * remaining).round() as i32;
    let offset = match direction {
        AnimationDirection::LeftToRight => Offset::new(-travel(extent.width), 0),
        AnimationDirection::RightToLeft => Offset::new(travel(extent.width), 0),
        AnimationDirection::TopToBottom => Offset::new(0, -travel(extent.height)),
        AnimationDirection::BottomToTop => Offset::new(0, travel(extent.height)),
        AnimationDirection::Fade => Offset::ZERO,
    };
    (offset, progress as f32)
}

/// Hosted content wrapped with padding and rounded corners.
pub struct ModalPanel {
    content: Box<dyn ModalContent>,
    padding: Sides,
    roundness: u32,
    installed: bool,
    opened_pending: bool,
}

impl std::fmt::Debug for ModalPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalPanel")
            .field("padding", &self.padding)
            .field("roundness", &self.roundness)
            .field("installed", &self.installed)
            .field("opened_pending", &self.opened_pending)
            .finish_non_exhaustive()
    }
}

impl ModalPanel {
    pub fn new(content: Box<dyn ModalContent>, options: &ModalOptions) -> Self {
        Self {
            content,
            padding: Sides::all(options.padding),
            roundness: options.roundness,
            installed: false,
            opened_pending: false,
        }
    }

    /// Hand the content its dismiss handle. Only the first call has effect.
    pub fn install(&mut self, handle: DismissHandle) {
        if self.installed {
            return;
        }
        self.content.attach_dismiss_handle(handle);
        self.installed = true;
    }

    #[inline]
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn padding(&self) -> Sides {
        self.padding
    }

    pub fn roundness(&self) -> u32 {
        self.roundness
    }

    /// Content preferred size plus padding on every side.
    pub fn preferred_size(&self) -> Size {
        self.content.preferred_size().expand(self.padding)
    }

    /// Mark the panel as opened. Focus and the content's opened hook run on
    /// the next [`flush_opened`](Self::flush_opened), after layout.
    pub fn opened(&mut self) {
        self.opened_pending = true;
    }

    #[inline]
    pub fn has_pending_opened(&self) -> bool {
        self.opened_pending
    }

    /// Drop a pending opened notification without running it.
    pub fn cancel_opened(&mut self) {
        self.opened_pending = false;
    }

    /// Run a pending opened notification: focus first, then the hook.
    ///
    /// Returns `Ok(false)` if nothing was pending.
    pub fn flush_opened(&mut self) -> Result<bool, HookError> {
        if !self.opened_pending {
            return Ok(false);
        }
        self.opened_pending = false;
        self.content.request_focus();
        self.content.on_opened()?;
        Ok(true)
    }

    /// Frame for laying the panel out at `bounds` with `progress`.
    pub fn frame(&self, bounds: Rect, progress: f64, direction: AnimationDirection) -> PanelFrame {
        let (offset, opacity) = composite(direction, bounds.size(), progress);
        let moved = bounds.translate(offset);
        PanelFrame {
            bounds: moved,
            content: moved.inner(self.padding),
            offset,
            opacity,
            corner_radius: self.roundness,
        }
    }

    /// Draw the panel. Nothing is drawn while fully transparent.
    pub fn paint(
        &self,
        id: &ModalId,
        bounds: Rect,
        progress: f64,
        direction: AnimationDirection,
        canvas: &mut dyn OverlayCanvas,
    ) {
        let frame = self.frame(bounds, progress, direction);
        if frame.opacity > 0.0 {
            canvas.draw_panel(id, &frame);
        }
    }

    pub fn content(&self) -> &dyn ModalContent {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> &mut dyn ModalContent {
        self.content.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc;

    use crate::modal::request::ModalProxy;

    #[derive(Default)]
    struct Log {
        calls: Vec<&'static str>,
    }

    struct Probe {
        log: Rc<RefCell<Log>>,
        fail: bool,
    }

    impl ModalContent for Probe {
        fn preferred_size(&self) -> Size {
            Size::new(260, 160)
        }

        fn attach_dismiss_handle(&mut self, _handle: DismissHandle) {
            self.log.borrow_mut().calls.push("attach");
        }

        fn on_opened(&mut self) -> Result<(), HookError> {
            self.log.borrow_mut().calls.push("opened");
            if self.fail { Err("boom".into()) } else { Ok(()) }
        }

        fn request_focus(&mut self) {
            self.log.borrow_mut().calls.push("focus");
        }
    }

    fn panel(fail: bool) -> (ModalPanel, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let probe = Probe {
            log: Rc::clone(&log),
            fail,
        };
        (ModalPanel::new(Box::new(probe), &ModalOptions::default()), log)
    }

    #[test]
    fn preferred_size_includes_padding() {
        let (panel, _) = panel(false);
        assert_eq!(panel.preferred_size(), Size::new(300, 200));
    }

    #[test]
    fn install_attaches_once() {
        let (mut panel, log) = panel(false);
        let (tx, _rx) = mpsc::channel();
        let handle = DismissHandle::new("p".into(), 1, ModalProxy::new(tx));
        panel.install(handle.clone());
        panel.install(handle);
        assert!(panel.is_installed());
        assert_eq!(log.borrow().calls, vec!["attach"]);
    }

    #[test]
    fn opened_is_deferred_until_flush() {
        let (mut panel, log) = panel(false);
        panel.opened();
        assert!(log.borrow().calls.is_empty());
        assert!(panel.flush_opened().expect("hook ok"));
        assert_eq!(log.borrow().calls, vec!["focus", "opened"]);
        assert!(!panel.flush_opened().expect("nothing pending"));
    }

    #[test]
    fn failed_hook_clears_pending() {
        let (mut panel, _) = panel(true);
        panel.opened();
        assert!(panel.flush_opened().is_err());
        assert!(!panel.has_pending_opened());
    }

    #[test]
    fn composite_offsets_per_direction() {
        let extent = Size::new(300, 200);
        assert_eq!(
            composite(AnimationDirection::RightToLeft, extent, 0.0).0,
            Offset::new(300, 0)
        );
        assert_eq!(
            composite(AnimationDirection::LeftToRight, extent, 0.5).0,
            Offset::new(-150, 0)
        );
        assert_eq!(
            composite(AnimationDirection::TopToBottom, extent, 0.0).0,
            Offset::new(0, -200)
        );
        assert_eq!(
            composite(AnimationDirection::BottomToTop, extent, 0.25).0,
            Offset::new(0, 150)
        );
        assert_eq!(composite(AnimationDirection::Fade, extent, 0.1).0, Offset::ZERO);
        for direction in [AnimationDirection::RightToLeft, AnimationDirection::Fade] {
            let (offset, opacity) = composite(direction, extent, 1.0);
            assert!(offset.is_zero());
            assert_eq!(opacity, 1.0);
        }
    }

    #[test]
    fn frame_moves_content_with_panel() {
        let (panel, _) = panel(false);
        let bounds = Rect::new(250, 200, 300, 200);
        let frame = panel.frame(bounds, 0.5, AnimationDirection::RightToLeft);
        assert_eq!(frame.bounds, Rect::new(400, 200, 300, 200));
        assert_eq!(frame.content, Rect::new(420, 220, 260, 160));
        assert_eq!(frame.opacity, 0.5);
        assert_eq!(frame.corner_radius, 15);
    }
}
