//! Error kinds surfaced by the admission-control engine.
//!
//! Stores and lists never swallow errors. `NotFound` is resolved internally at
//! exactly one place (the lazy bucket creation in the rate limiter), everything
//! else travels verbatim to the caller.

use crate::address_list::ListKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    /// A bucket or prefix was required to exist but does not.
    #[error("{0} not found")]
    NotFound(String),

    /// A bucket or prefix is already present in the target collection.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// The prefix is already present in the opposite list.
    #[error("{prefix} already exists in {list}")]
    AlreadyExistsIn { prefix: String, list: ListKind },

    #[error("Invalid network prefix: {0}")]
    InvalidPrefix(String),

    /// Backend failure of a persisted address list.
    #[error("Address list backend failure: {0}")]
    Infrastructure(String),
}

impl GuardError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GuardError::NotFound(_))
    }

    /// True for both the plain and the tagged already-exists variant.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            GuardError::AlreadyExists(_) | GuardError::AlreadyExistsIn { .. }
        )
    }

    pub fn is_infrastructure(&self) -> bool {
        matches!(self, GuardError::Infrastructure(_))
    }
}
