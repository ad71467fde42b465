#![forbid(unsafe_code)]

use std::borrow::Borrow;
use std::fmt;

/// Identifier of one modal within a [`ModalRegistry`](super::ModalRegistry).
///
/// Ids are compared by value. Callers pick their own or let the registry
/// generate one of the form `modal-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ModalId(String);

impl ModalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn generated(n: u64) -> Self {
        Self(format!("modal-{n}"))
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModalId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ModalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&ModalId> for ModalId {
    fn from(id: &ModalId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for ModalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ModalId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ModalId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModalId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
