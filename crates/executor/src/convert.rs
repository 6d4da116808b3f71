//! Error conversion from store adapter errors.
//!
//! This module is the static translation table from adapter-level
//! [`StoreError`]s to the executor's [`Error`] type. Recognised errors keep
//! their details; unrecognised ones propagate unchanged as [`Error::Store`].

use crate::{Error, ErrorKind};
use foreman_core::{StoreError, StoreErrorClass, StoreResult};

/// The command-level kind a class of adapter error translates to.
///
/// `None` means the error has no translation and must propagate unchanged.
pub fn translate_class(class: StoreErrorClass) -> Option<ErrorKind> {
    match class {
        StoreErrorClass::RecordNotFound => Some(ErrorKind::RecordNotFound),
        StoreErrorClass::RecordInvalid => Some(ErrorKind::RecordInvalid),
        StoreErrorClass::UnknownAttribute => Some(ErrorKind::UnknownAttribute),
        StoreErrorClass::Invalid => Some(ErrorKind::Invalid),
        StoreErrorClass::Failure => Some(ErrorKind::Failure),
        StoreErrorClass::NotConfigured => Some(ErrorKind::ConfigurationError),
        StoreErrorClass::UnknownEntity | StoreErrorClass::Storage | StoreErrorClass::Internal => {
            None
        }
    }
}

/// Translate an adapter error, handing it back untouched if it has no
/// command-level counterpart.
pub fn translate(err: StoreError) -> Result<Error, StoreError> {
    match err {
        StoreError::RecordNotFound { entity, id } => Ok(Error::RecordNotFound {
            entity: entity.to_string(),
            id,
        }),
        StoreError::RecordInvalid { entity, errors } => Ok(Error::RecordInvalid {
            entity: entity.to_string(),
            errors,
        }),
        StoreError::UnknownAttribute { entity, attribute } => Ok(Error::UnknownAttribute {
            entity: entity.to_string(),
            attribute,
        }),
        StoreError::Invalid { reason } => Ok(Error::Invalid { reason }),
        StoreError::Failure { reason } => Ok(Error::Failure { reason }),
        StoreError::NotConfigured { reason } => Ok(Error::Configuration { reason }),
        other => Err(other),
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        translate(err).unwrap_or_else(Error::Store)
    }
}

/// Convert a store adapter result to an executor Result.
pub fn convert_result<T>(result: StoreResult<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
