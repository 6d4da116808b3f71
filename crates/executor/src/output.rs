//! Command results.
//!
//! A single-target invocation produces [`Output::Single`]; a batch produces
//! [`Output::Batch`] with one [`BatchItem`] per unit of work, in input order.
//! A failed unit inside a batch is a [`FailureMarker`], never an error.
//!
//! [`Outcome`] wraps either an output or a recoverable error for the
//! non-throwing entry points.

use serde::{Deserialize, Serialize};

use foreman_core::{Entity, Identify};

use crate::{Error, ErrorKind, Result};

/// Result of one unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Record {
    /// Created or updated record
    Entity(Entity),
    /// Adapter confirmation of a delete
    Deleted(bool),
}

impl Record {
    /// The entity, if this is a create or update result
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            Record::Entity(entity) => Some(entity),
            Record::Deleted(_) => None,
        }
    }

    /// Consume into the entity
    pub fn into_entity(self) -> Option<Entity> {
        match self {
            Record::Entity(entity) => Some(entity),
            Record::Deleted(_) => None,
        }
    }

    /// The delete confirmation, if this is a delete result
    pub fn deleted(&self) -> Option<bool> {
        match self {
            Record::Deleted(done) => Some(*done),
            Record::Entity(_) => None,
        }
    }
}

impl Identify for Record {
    fn identify(&self) -> Option<i64> {
        self.entity().map(|entity| entity.id)
    }
}

/// Stand-in for a unit that failed inside a batch.
///
/// Always invalid; carries the input id (if the unit had one) and the
/// translated error. Serializes with `"valid": false`, and deserializing a
/// marker that claims to be valid fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MarkerRepr", into = "MarkerRepr")]
pub struct FailureMarker {
    /// Input id of the failed unit
    pub id: Option<i64>,
    /// Error kind
    pub kind: ErrorKind,
    /// Error message
    pub message: String,
}

impl FailureMarker {
    /// Marker for `error` raised while processing `id`.
    ///
    /// Untranslated errors never reach a marker; they get the `Failure` kind
    /// if one is ever passed in.
    pub fn new(id: Option<i64>, error: &Error) -> Self {
        FailureMarker {
            id,
            kind: error.kind().unwrap_or(ErrorKind::Failure),
            message: error.to_string(),
        }
    }

    /// Always `false`
    pub fn valid(&self) -> bool {
        false
    }
}

#[derive(Serialize, Deserialize)]
struct MarkerRepr {
    id: Option<i64>,
    kind: ErrorKind,
    message: String,
    #[serde(default)]
    valid: bool,
}

impl TryFrom<MarkerRepr> for FailureMarker {
    type Error = String;

    fn try_from(repr: MarkerRepr) -> std::result::Result<Self, Self::Error> {
        if repr.valid {
            return Err("a failure marker cannot be valid".to_string());
        }
        Ok(FailureMarker {
            id: repr.id,
            kind: repr.kind,
            message: repr.message,
        })
    }
}

impl From<FailureMarker> for MarkerRepr {
    fn from(marker: FailureMarker) -> Self {
        MarkerRepr {
            id: marker.id,
            kind: marker.kind,
            message: marker.message,
            valid: false,
        }
    }
}

/// One element of a batch result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchItem {
    /// Unit succeeded
    Ok(Record),
    /// Unit failed with a recoverable error
    Failed(FailureMarker),
}

impl BatchItem {
    /// Whether the unit succeeded
    pub fn is_ok(&self) -> bool {
        matches!(self, BatchItem::Ok(_))
    }

    /// Same as [`is_ok`](Self::is_ok); failure markers are never valid
    pub fn valid(&self) -> bool {
        self.is_ok()
    }

    /// Id of the produced entity, or the input id of a failed unit
    pub fn id(&self) -> Option<i64> {
        match self {
            BatchItem::Ok(record) => record.identify(),
            BatchItem::Failed(marker) => marker.id,
        }
    }

    /// Entity produced by a successful create or update
    pub fn entity(&self) -> Option<&Entity> {
        self.record().and_then(Record::entity)
    }

    /// The record of a successful unit
    pub fn record(&self) -> Option<&Record> {
        match self {
            BatchItem::Ok(record) => Some(record),
            BatchItem::Failed(_) => None,
        }
    }

    /// The marker of a failed unit
    pub fn failure(&self) -> Option<&FailureMarker> {
        match self {
            BatchItem::Failed(marker) => Some(marker),
            BatchItem::Ok(_) => None,
        }
    }
}

impl Identify for BatchItem {
    fn identify(&self) -> Option<i64> {
        self.record().and_then(Identify::identify)
    }
}

/// Successful command result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    /// Single-target invocation
    Single(Record),
    /// Batch invocation, one item per unit in input order
    Batch(Vec<BatchItem>),
}

impl Output {
    /// The record of a single-target result
    pub fn single(&self) -> Option<&Record> {
        match self {
            Output::Single(record) => Some(record),
            Output::Batch(_) => None,
        }
    }

    /// The items of a batch result
    pub fn items(&self) -> Option<&[BatchItem]> {
        match self {
            Output::Batch(items) => Some(items),
            Output::Single(_) => None,
        }
    }

    /// The entity of a single create or update
    pub fn entity(&self) -> Option<&Entity> {
        self.single().and_then(Record::entity)
    }

    /// Consume a single create or update result into its entity
    pub fn into_entity(self) -> Option<Entity> {
        match self {
            Output::Single(record) => record.into_entity(),
            Output::Batch(_) => None,
        }
    }

    /// The confirmation of a single delete
    pub fn deleted(&self) -> Option<bool> {
        self.single().and_then(Record::deleted)
    }
}

/// How a failed outcome is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureType {
    /// Input or record validation failed
    Validation,
    /// Anything else
    Execution,
}

/// Result of a non-throwing run.
///
/// Either successful with an output or failed with an error, never both.
/// Serializes as `{ "success", "result", "error" }`; deserializing an
/// inconsistent combination fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OutcomeRepr", into = "OutcomeRepr")]
pub struct Outcome {
    inner: std::result::Result<Output, Error>,
}

impl Outcome {
    /// Successful outcome
    pub fn succeeded(output: Output) -> Self {
        Outcome { inner: Ok(output) }
    }

    /// Failed outcome
    pub fn failed(error: Error) -> Self {
        Outcome { inner: Err(error) }
    }

    /// Whether the command completed (batch item failures included)
    pub fn is_success(&self) -> bool {
        self.inner.is_ok()
    }

    /// Output when successful
    pub fn result(&self) -> Option<&Output> {
        self.inner.as_ref().ok()
    }

    /// Error when failed
    pub fn error(&self) -> Option<&Error> {
        self.inner.as_ref().err()
    }

    /// Kind of the carried error
    pub fn kind(&self) -> Option<ErrorKind> {
        self.error().and_then(Error::kind)
    }

    /// Classification of the carried error
    pub fn failure_type(&self) -> Option<FailureType> {
        self.kind().map(|kind| {
            if kind.is_validation() {
                FailureType::Validation
            } else {
                FailureType::Execution
            }
        })
    }

    /// Convert back to a `Result`
    pub fn into_result(self) -> Result<Output> {
        self.inner
    }
}

#[derive(Serialize, Deserialize)]
struct OutcomeRepr {
    success: bool,
    #[serde(default)]
    result: Option<Output>,
    #[serde(default)]
    error: Option<Error>,
}

impl TryFrom<OutcomeRepr> for Outcome {
    type Error = String;

    fn try_from(repr: OutcomeRepr) -> std::result::Result<Self, String> {
        match (repr.success, repr.result, repr.error) {
            (true, Some(output), None) => Ok(Outcome::succeeded(output)),
            (false, None, Some(error)) => Ok(Outcome::failed(error)),
            (true, _, _) => Err("a successful outcome carries exactly a result".to_string()),
            (false, _, _) => Err("a failed outcome carries exactly an error".to_string()),
        }
    }
}

impl From<Outcome> for OutcomeRepr {
    fn from(outcome: Outcome) -> Self {
        match outcome.inner {
            Ok(output) => OutcomeRepr {
                success: true,
                result: Some(output),
                error: None,
            },
            Err(error) => OutcomeRepr {
                success: false,
                result: None,
                error: Some(error),
            },
        }
    }
}
