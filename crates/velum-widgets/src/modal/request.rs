#![forbid(unsafe_code)]

//! Deferred close/reopen requests.
//!
//! Content hooks and other threads cannot call back into the registry while
//! it is mid-operation. They post a [`ModalRequest`] through a [`ModalProxy`]
//! instead; the registry drains the queue in FIFO order at the start of every
//! mutating call and every tick.

use std::sync::mpsc;

use super::id::ModalId;

/// A request posted to a registry from outside its call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalRequest {
    Close(ModalId),
    CloseAll,
    Reopen(ModalId),
    /// Close `id` only while it is still the instance numbered `generation`.
    Dismiss { id: ModalId, generation: u64 },
}

/// Cloneable, `Send` handle for posting requests to a registry.
///
/// Posting never blocks. It fails only when the registry has been dropped.
#[derive(Debug, Clone)]
pub struct ModalProxy {
    sender: mpsc::Sender<ModalRequest>,
}

impl ModalProxy {
    pub(crate) fn new(sender: mpsc::Sender<ModalRequest>) -> Self {
        Self { sender }
    }

    /// Post a request. Returns `false` if the registry is gone.
    pub fn send(&self, request: ModalRequest) -> bool {
        self.sender.send(request).is_ok()
    }

    pub fn close(&self, id: impl Into<ModalId>) -> bool {
        self.send(ModalRequest::Close(id.into()))
    }

    pub fn close_all(&self) -> bool {
        self.send(ModalRequest::CloseAll)
    }

    pub fn reopen(&self, id: impl Into<ModalId>) -> bool {
        self.send(ModalRequest::Reopen(id.into()))
    }
}

/// Lets hosted content close the modal that shows it.
///
/// The handle is bound to one modal instance. Once that modal is removed,
/// dismissing through the handle does nothing, even if a new modal was shown
/// under the same id.
#[derive(Debug, Clone)]
pub struct DismissHandle {
    id: ModalId,
    generation: u64,
    proxy: ModalProxy,
}

impl DismissHandle {
    pub(crate) fn new(id: ModalId, generation: u64, proxy: ModalProxy) -> Self {
        Self {
            id,
            generation,
            proxy,
        }
    }

    /// Id of the modal this handle closes.
    pub fn id(&self) -> &ModalId {
        &self.id
    }

    /// Instance number of the modal this handle closes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ask the registry to close this modal.
    ///
    /// Takes effect on the registry's next call or tick. Returns `false` if
    /// the registry is gone.
    pub fn dismiss(&self) -> bool {
        self.proxy.send(ModalRequest::Dismiss {
            id: self.id.clone(),
            generation: self.generation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_arrive_in_posting_order() {
        let (tx, rx) = mpsc::channel();
        let proxy = ModalProxy::new(tx);
        let handle = DismissHandle::new("b".into(), 7, proxy.clone());

        assert!(proxy.close("a"));
        assert!(handle.dismiss());
        assert!(proxy.reopen("a"));
        assert!(proxy.close_all());

        let got: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            got,
            vec![
                ModalRequest::Close("a".into()),
                ModalRequest::Dismiss {
                    id: "b".into(),
                    generation: 7,
                },
                ModalRequest::Reopen("a".into()),
                ModalRequest::CloseAll,
            ]
        );
    }

    #[test]
    fn posting_after_receiver_dropped_fails() {
        let (tx, rx) = mpsc::channel();
        let proxy = ModalProxy::new(tx);
        drop(rx);
        assert!(!proxy.close_all());
    }

    #[test]
    fn proxy_is_send() {
        fn assert_send<T: Send + Clone>() {}
        assert_send::<ModalProxy>();
        assert_send::<DismissHandle>();
    }
}
