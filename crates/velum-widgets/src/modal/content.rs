#![forbid(unsafe_code)]

use velum_core::geometry::Size;

use super::error::HookError;
use super::request::DismissHandle;

/// Capabilities the engine needs from hosted content.
///
/// The engine does not care what the content is (a form, a picker, a
/// confirmation prompt); it only sizes it, hands it a way to dismiss itself,
/// and tells it when it became fully visible.
pub trait ModalContent {
    /// Size the content wants, excluding panel padding.
    fn preferred_size(&self) -> Size;

    /// Receive the handle the content uses to close its own modal.
    ///
    /// Called once, before the modal is first shown.
    fn attach_dismiss_handle(&mut self, handle: DismissHandle);

    /// The modal finished opening and has been laid out.
    ///
    /// Errors are reported to the host and do not affect the modal.
    fn on_opened(&mut self) -> Result<(), HookError> {
        Ok(())
    }

    /// Move keyboard focus into the content.
    ///
    /// Called right before [`on_opened`](Self::on_opened).
    fn request_focus(&mut self) {}
}

impl<T: ModalContent + ?Sized> ModalContent for Box<T> {
    fn preferred_size(&self) -> Size {
        (**self).preferred_size()
    }

    fn attach_dismiss_handle(&mut self, handle: DismissHandle) {
        (**self).attach_dismiss_handle(handle);
    }

    fn on_opened(&mut self) -> Result<(), HookError> {
        (**self).on_opened()
    }

    fn request_focus(&mut self) {
        (**self).request_focus();
    }
}
