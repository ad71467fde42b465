#![forbid(unsafe_code)]

//! Errors surfaced by the modal engine.
//!
//! Rejected operations (`show_modal` with a bad owner, options, or id) return
//! a [`ModalError`] and leave every layer untouched. Failures inside content
//! hooks never abort bookkeeping; they are handed to
//! [`ModalHost::report_error`](super::ModalHost::report_error) instead.

use std::fmt;

use super::host::OwnerId;
use super::id::ModalId;

/// Error type returned by content hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of a [`ModalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The owner or options were unusable.
    Configuration,
    /// The id is already active.
    DuplicateId,
    /// The id is not active.
    UnknownId,
    /// An engine bookkeeping invariant was violated.
    Internal,
    /// A content hook failed.
    Hook,
}

#[derive(Debug)]
pub enum ModalError {
    /// The owner handle does not resolve to a top-level window.
    UnresolvedOwner { owner: OwnerId },
    /// An option is outside its valid range.
    InvalidOption { field: &'static str, reason: String },
    /// A modal with this id is already shown (or still closing).
    DuplicateId { id: ModalId },
    /// No modal with this id is active.
    UnknownId { id: ModalId },
    /// Inconsistent engine state, e.g. a completion for a settled container.
    Internal { id: Option<ModalId>, detail: String },
    /// A content hook returned an error.
    Hook {
        id: ModalId,
        hook: &'static str,
        source: HookError,
    },
}

impl ModalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnresolvedOwner { .. } | Self::InvalidOption { .. } => ErrorKind::Configuration,
            Self::DuplicateId { .. } => ErrorKind::DuplicateId,
            Self::UnknownId { .. } => ErrorKind::UnknownId,
            Self::Internal { .. } => ErrorKind::Internal,
            Self::Hook { .. } => ErrorKind::Hook,
        }
    }

    /// The modal this error concerns, if any.
    pub fn modal_id(&self) -> Option<&ModalId> {
        match self {
            Self::DuplicateId { id } | Self::UnknownId { id } | Self::Hook { id, .. } => Some(id),
            Self::Internal { id, .. } => id.as_ref(),
            Self::UnresolvedOwner { .. } | Self::InvalidOption { .. } => None,
        }
    }
}

impl fmt::Display for ModalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedOwner { owner } => {
                write!(f, "owner {owner:?} is not attached to a top-level window")
            }
            Self::InvalidOption { field, reason } => write!(f, "invalid option {field}: {reason}"),
            Self::DuplicateId { id } => write!(f, "modal id {id:?} is already in use"),
            Self::UnknownId { id } => write!(f, "no active modal with id {id:?}"),
            Self::Internal { id: Some(id), detail } => {
                write!(f, "internal modal error for {id:?}: {detail}")
            }
            Self::Internal { id: None, detail } => write!(f, "internal modal error: {detail}"),
            Self::Hook { id, hook, source } => {
                write!(f, "{hook} hook of modal {id:?} failed: {source}")
            }
        }
    }
}

impl std::error::Error for ModalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Hook { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
