//! Store adapter error types
//!
//! This module defines the errors a [`StoreAdapter`](crate::StoreAdapter) may
//! return. They are the adapter-level vocabulary; the executor translates the
//! recognised ones into its own command-level taxonomy and lets the rest
//! propagate unchanged.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::contract::EntityRef;

/// Result type alias for store adapter operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors reported by store adapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum StoreError {
    /// No record with the given id
    #[error("{entity} record not found: id {id}")]
    RecordNotFound {
        /// Entity type searched
        entity: EntityRef,
        /// Requested id
        id: i64,
    },

    /// Record-level validation failed; nothing was written
    #[error("{entity} record invalid: {}", .errors.join(", "))]
    RecordInvalid {
        /// Entity type being written
        entity: EntityRef,
        /// Human-readable validation messages
        errors: Vec<String>,
    },

    /// Attribute is not part of the entity's schema
    #[error("unknown attribute '{attribute}' for {entity}")]
    UnknownAttribute {
        /// Entity type being written or queried
        entity: EntityRef,
        /// Offending attribute
        attribute: String,
    },

    /// Input rejected by the adapter as invalid
    #[error("invalid: {reason}")]
    Invalid {
        /// Why the input was rejected
        reason: String,
    },

    /// Operation failed for a non-validation reason
    #[error("failure: {reason}")]
    Failure {
        /// What went wrong
        reason: String,
    },

    /// Adapter backend is not configured
    #[error("adapter not configured: {reason}")]
    NotConfigured {
        /// What is missing
        reason: String,
    },

    /// Adapter has no storage for this entity type
    #[error("unknown entity: {entity}")]
    UnknownEntity {
        /// The entity type requested
        entity: EntityRef,
    },

    /// Backend storage failure
    #[error("storage error: {reason}")]
    Storage {
        /// Backend message
        reason: String,
    },

    /// Bug or invariant violation inside the adapter
    #[error("internal adapter error: {reason}")]
    Internal {
        /// Description of the violated invariant
        reason: String,
    },
}

/// Fieldless discriminant of [`StoreError`], used as the key of the
/// executor's translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreErrorClass {
    /// [`StoreError::RecordNotFound`]
    RecordNotFound,
    /// [`StoreError::RecordInvalid`]
    RecordInvalid,
    /// [`StoreError::UnknownAttribute`]
    UnknownAttribute,
    /// [`StoreError::Invalid`]
    Invalid,
    /// [`StoreError::Failure`]
    Failure,
    /// [`StoreError::NotConfigured`]
    NotConfigured,
    /// [`StoreError::UnknownEntity`]
    UnknownEntity,
    /// [`StoreError::Storage`]
    Storage,
    /// [`StoreError::Internal`]
    Internal,
}

impl StoreErrorClass {
    /// Every class, in declaration order
    pub const ALL: [StoreErrorClass; 9] = [
        StoreErrorClass::RecordNotFound,
        StoreErrorClass::RecordInvalid,
        StoreErrorClass::UnknownAttribute,
        StoreErrorClass::Invalid,
        StoreErrorClass::Failure,
        StoreErrorClass::NotConfigured,
        StoreErrorClass::UnknownEntity,
        StoreErrorClass::Storage,
        StoreErrorClass::Internal,
    ];
}

impl StoreError {
    /// Record `id` of `entity` does not exist
    pub fn not_found(entity: EntityRef, id: i64) -> Self {
        StoreError::RecordNotFound { entity, id }
    }

    /// Record failed validation with the given messages
    pub fn invalid_record(entity: EntityRef, errors: Vec<String>) -> Self {
        StoreError::RecordInvalid { entity, errors }
    }

    /// `attribute` is not known for `entity`
    pub fn unknown_attribute(entity: EntityRef, attribute: impl Into<String>) -> Self {
        StoreError::UnknownAttribute {
            entity,
            attribute: attribute.into(),
        }
    }

    /// Input rejected as invalid
    pub fn invalid(reason: impl Into<String>) -> Self {
        StoreError::Invalid {
            reason: reason.into(),
        }
    }

    /// Non-validation failure
    pub fn failure(reason: impl Into<String>) -> Self {
        StoreError::Failure {
            reason: reason.into(),
        }
    }

    /// Backend not configured
    pub fn not_configured(reason: impl Into<String>) -> Self {
        StoreError::NotConfigured {
            reason: reason.into(),
        }
    }

    /// Entity type has no storage
    pub fn unknown_entity(entity: EntityRef) -> Self {
        StoreError::UnknownEntity { entity }
    }

    /// Backend storage failure
    pub fn storage(reason: impl Into<String>) -> Self {
        StoreError::Storage {
            reason: reason.into(),
        }
    }

    /// Adapter invariant violation
    pub fn internal(reason: impl Into<String>) -> Self {
        StoreError::Internal {
            reason: reason.into(),
        }
    }

    /// The fieldless class of this error
    pub fn class(&self) -> StoreErrorClass {
        match self {
            StoreError::RecordNotFound { .. } => StoreErrorClass::RecordNotFound,
            StoreError::RecordInvalid { .. } => StoreErrorClass::RecordInvalid,
            StoreError::UnknownAttribute { .. } => StoreErrorClass::UnknownAttribute,
            StoreError::Invalid { .. } => StoreErrorClass::Invalid,
            StoreError::Failure { .. } => StoreErrorClass::Failure,
            StoreError::NotConfigured { .. } => StoreErrorClass::NotConfigured,
            StoreError::UnknownEntity { .. } => StoreErrorClass::UnknownEntity,
            StoreError::Storage { .. } => StoreErrorClass::Storage,
            StoreError::Internal { .. } => StoreErrorClass::Internal,
        }
    }
}
