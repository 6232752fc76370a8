//! Ownership decision for saved records.
//!
//! The check is a pure comparison; loading the record is the caller's job.
//! It must be evaluated before any mutation of the record is attempted.

use crate::error::CoreError;
use crate::types::DbId;

/// Entity name used in errors raised for saved-city records.
pub const ENTITY_SAVED_CITY: &str = "SavedCity";

/// Why a principal was refused access to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The record does not exist.
    Missing,
    /// The record exists but belongs to another principal.
    NotOwner,
}

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny(DenyReason),
}

/// Decide whether `principal_id` may act on a record owned by `owner_id`.
///
/// `owner_id` is `None` when the record could not be found.
pub fn authorize(principal_id: &str, owner_id: Option<&str>) -> Access {
    match owner_id {
        None => Access::Deny(DenyReason::Missing),
        Some(owner) if owner == principal_id => Access::Allow,
        Some(_) => Access::Deny(DenyReason::NotOwner),
    }
}

impl Access {
    /// Convert the decision into a result for the saved city `record_id`.
    ///
    /// A missing record maps to `NotFound`, a foreign one to `Unauthorized`.
    pub fn into_result(self, record_id: DbId) -> Result<(), CoreError> {
        match self {
            Access::Allow => Ok(()),
            Access::Deny(DenyReason::Missing) => Err(CoreError::NotFound {
                entity: ENTITY_SAVED_CITY,
                id: record_id,
            }),
            Access::Deny(DenyReason::NotOwner) => Err(CoreError::Unauthorized(
                "Cannot modify another user's saved city".into(),
            )),
        }
    }
}
