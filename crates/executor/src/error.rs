//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Closed**: Every variant but `Store` maps to exactly one [`ErrorKind`]
//! - **Serializable**: Can be converted to/from JSON
//! - **Lossless**: Unrecognised adapter errors are carried unchanged in `Store`

use serde::{Deserialize, Serialize};
use std::fmt;

use foreman_core::StoreError;

/// The closed set of command-level error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The id argument could not be normalized to an integer id
    InvalidId,
    /// Business or input validation failed
    Invalid,
    /// Non-validation failure
    Failure,
    /// Target record does not exist
    RecordNotFound,
    /// Record failed adapter validation
    RecordInvalid,
    /// Attribute unknown to the entity
    UnknownAttribute,
    /// A variant's required hook is missing (programming defect)
    MethodNotImplemented,
    /// No store adapter configured
    ConfigurationError,
}

impl ErrorKind {
    /// Every kind, in declaration order
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::InvalidId,
        ErrorKind::Invalid,
        ErrorKind::Failure,
        ErrorKind::RecordNotFound,
        ErrorKind::RecordInvalid,
        ErrorKind::UnknownAttribute,
        ErrorKind::MethodNotImplemented,
        ErrorKind::ConfigurationError,
    ];

    /// Kinds that a non-throwing entry point reports as a failed outcome and
    /// that batch execution records per item instead of aborting.
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            ErrorKind::Invalid
                | ErrorKind::Failure
                | ErrorKind::RecordNotFound
                | ErrorKind::RecordInvalid
                | ErrorKind::UnknownAttribute
        )
    }

    /// Kinds reported as a validation-type failure
    pub fn is_validation(self) -> bool {
        matches!(
            self,
            ErrorKind::Invalid
                | ErrorKind::RecordNotFound
                | ErrorKind::RecordInvalid
                | ErrorKind::UnknownAttribute
        )
    }

    /// Snake-case name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidId => "invalid_id",
            ErrorKind::Invalid => "invalid",
            ErrorKind::Failure => "failure",
            ErrorKind::RecordNotFound => "record_not_found",
            ErrorKind::RecordInvalid => "record_invalid",
            ErrorKind::UnknownAttribute => "unknown_attribute",
            ErrorKind::MethodNotImplemented => "method_not_implemented",
            ErrorKind::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Argument | `InvalidId` | Raised during id normalization, before any adapter call |
/// | Validation | `Invalid`, `RecordInvalid`, `UnknownAttribute`, `RecordNotFound` | Business failures, reported as failed outcomes |
/// | Execution | `Failure` | Non-validation failure, reported as a failed outcome |
/// | Defect | `MethodNotImplemented`, `Configuration` | Always propagated |
/// | Passthrough | `Store` | Adapter error with no translation, propagated unchanged |
///
/// # Example
///
/// ```ignore
/// use foreman_executor::{Error, ErrorKind};
///
/// match command.go_strict(999, attrs! {}) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::RecordNotFound { entity, id }) => {
///         println!("no {} with id {}", entity, id);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// Id argument rejected during normalization
    #[error("invalid id: {reason}")]
    InvalidId { reason: String },

    /// Business or input validation failed
    #[error("invalid: {reason}")]
    Invalid { reason: String },

    /// Non-validation failure
    #[error("failure: {reason}")]
    Failure { reason: String },

    /// Target record does not exist
    #[error("{entity} record not found: id {id}")]
    RecordNotFound { entity: String, id: i64 },

    /// Record failed adapter validation
    #[error("{entity} record invalid: {}", .errors.join(", "))]
    RecordInvalid { entity: String, errors: Vec<String> },

    /// Attribute unknown to the entity
    #[error("unknown attribute '{attribute}' for {entity}")]
    UnknownAttribute { entity: String, attribute: String },

    /// A variant's required hook is missing
    #[error("method not implemented: {command} does not implement {hook}")]
    MethodNotImplemented { command: String, hook: String },

    /// No usable store adapter configuration
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// Adapter error with no command-level translation
    #[error(transparent)]
    Store(StoreError),
}

impl Error {
    /// Id argument rejected
    pub fn invalid_id(reason: impl Into<String>) -> Self {
        Error::InvalidId {
            reason: reason.into(),
        }
    }

    /// Input validation failed
    pub fn invalid(reason: impl Into<String>) -> Self {
        Error::Invalid {
            reason: reason.into(),
        }
    }

    /// Configuration missing or unusable
    pub fn configuration(reason: impl Into<String>) -> Self {
        Error::Configuration {
            reason: reason.into(),
        }
    }

    /// The command-level kind, `None` for untranslated adapter errors
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::InvalidId { .. } => Some(ErrorKind::InvalidId),
            Error::Invalid { .. } => Some(ErrorKind::Invalid),
            Error::Failure { .. } => Some(ErrorKind::Failure),
            Error::RecordNotFound { .. } => Some(ErrorKind::RecordNotFound),
            Error::RecordInvalid { .. } => Some(ErrorKind::RecordInvalid),
            Error::UnknownAttribute { .. } => Some(ErrorKind::UnknownAttribute),
            Error::MethodNotImplemented { .. } => Some(ErrorKind::MethodNotImplemented),
            Error::Configuration { .. } => Some(ErrorKind::ConfigurationError),
            Error::Store(_) => None,
        }
    }

    /// Whether this error is reported as a failed outcome rather than raised
    pub fn is_recoverable(&self) -> bool {
        self.kind().map_or(false, ErrorKind::is_recoverable)
    }
}
