//! Invocation types: what a command is run against and with.
//!
//! A command receives a [`Target`] (which records to act on) and
//! [`Params`] (the attributes to apply). Either side may be plural; a
//! plural side turns the invocation into a batch.

use serde::{Deserialize, Serialize};

use foreman_core::{Attributes, Entity, Identify, Value};

use crate::{Error, Result};

/// Reserved key marking a query object in a loosely-typed id argument
pub const QUERY_KEY: &str = "query";

/// Key read from a loosely-typed object to find its id
pub const ID_KEY: &str = "id";

/// The records a command acts on.
///
/// Serialized externally tagged:
/// `"none"`, `{"id": 3}`, `{"ids": [1, 2]}`, `{"query": {...}}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// No target (Create)
    #[default]
    None,
    /// One record
    Id(i64),
    /// An ordered list of records
    Ids(Vec<i64>),
    /// Records matching equality conditions, resolved by the adapter
    Query(Attributes),
}

impl Target {
    /// Target a single id-bearing value.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidId` if `item` carries no id.
    pub fn one(item: impl Identify) -> Result<Self> {
        item.identify()
            .map(Target::Id)
            .ok_or_else(|| Error::invalid_id("value carries no record id"))
    }

    /// Target an ordered list of id-bearing values.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidId` naming the first element with no id.
    pub fn many<I>(items: impl IntoIterator<Item = I>) -> Result<Self>
    where
        I: Identify,
    {
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                item.identify().ok_or_else(|| {
                    Error::invalid_id(format!("element {} carries no record id", index))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Target::Ids)
    }

    /// Target the records matching `conditions`
    pub fn query(conditions: Attributes) -> Self {
        Target::Query(conditions)
    }

    /// Normalize a loosely-typed id argument.
    ///
    /// | Input | Target |
    /// |-------|--------|
    /// | `Null` | `None` |
    /// | integer, integral float, or digit string | `Id` |
    /// | object with an `id` entry | `Id` |
    /// | object whose only key is `query` | `Query` |
    /// | array of any of the id forms | `Ids` |
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidId` for anything else.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Target::None),
            Value::Array(items) => items
                .iter()
                .map(id_from_value)
                .collect::<Result<Vec<_>>>()
                .map(Target::Ids),
            Value::Object(map) if map.len() == 1 && map.contains_key(QUERY_KEY) => {
                match &map[QUERY_KEY] {
                    Value::Object(conditions) => Ok(Target::Query(conditions.clone())),
                    other => Err(Error::invalid_id(format!(
                        "query must be an object, got {}",
                        other.type_name()
                    ))),
                }
            }
            other => id_from_value(other).map(Target::Id),
        }
    }

    /// Whether this target addresses more than one record
    pub fn is_plural(&self) -> bool {
        matches!(self, Target::Ids(_) | Target::Query(_))
    }

    /// The id of a singular target
    pub fn single_id(&self) -> Option<i64> {
        match self {
            Target::Id(id) => Some(*id),
            _ => None,
        }
    }
}

fn id_from_value(value: &Value) -> Result<i64> {
    match value {
        Value::Int(id) => Ok(*id),
        Value::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
            Ok(*f as i64)
        }
        Value::Float(f) if f.fract() == 0.0 => Err(Error::invalid_id(format!(
            "{} is out of range for a record id",
            f
        ))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::invalid_id(format!("'{}' is not an integer id", s))),
        Value::Object(map) => match map.get(ID_KEY) {
            Some(id) if !id.is_object() && !id.is_array() => id_from_value(id),
            _ => Err(Error::invalid_id("object carries no usable 'id'")),
        },
        other => Err(Error::invalid_id(format!(
            "cannot use {} as a record id",
            other.type_name()
        ))),
    }
}

impl From<i64> for Target {
    fn from(id: i64) -> Self {
        Target::Id(id)
    }
}

impl From<&Entity> for Target {
    fn from(entity: &Entity) -> Self {
        Target::Id(entity.id)
    }
}

impl From<Vec<i64>> for Target {
    fn from(ids: Vec<i64>) -> Self {
        Target::Ids(ids)
    }
}

impl From<&[i64]> for Target {
    fn from(ids: &[i64]) -> Self {
        Target::Ids(ids.to_vec())
    }
}

impl From<()> for Target {
    fn from(_: ()) -> Self {
        Target::None
    }
}

/// Attributes supplied to a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Params {
    /// One attribute set, shared by every target
    One(Attributes),
    /// One attribute set per unit of work
    Each(Vec<Attributes>),
}

impl Params {
    /// Whether one attribute set per unit was supplied
    pub fn is_plural(&self) -> bool {
        matches!(self, Params::Each(_))
    }

    /// Normalize a loosely-typed params argument: `Null` is empty params,
    /// an object is one set, an array of objects is one set per unit.
    ///
    /// # Errors
    ///
    /// Returns `Error::Invalid` for anything else.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Params::default()),
            Value::Object(map) => Ok(Params::One(map.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => Ok(map.clone()),
                    other => Err(Error::invalid(format!(
                        "params list entries must be objects, got {}",
                        other.type_name()
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Params::Each),
            other => Err(Error::invalid(format!(
                "params must be an object or a list of objects, got {}",
                other.type_name()
            ))),
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Params::One(Attributes::new())
    }
}

impl From<Attributes> for Params {
    fn from(attrs: Attributes) -> Self {
        Params::One(attrs)
    }
}

impl From<Vec<Attributes>> for Params {
    fn from(list: Vec<Attributes>) -> Self {
        Params::Each(list)
    }
}

/// A complete command invocation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Invocation {
    /// Records acted on
    #[serde(default)]
    pub target: Target,
    /// Attributes applied
    #[serde(default)]
    pub params: Params,
}

impl Invocation {
    /// Pair a target with params
    pub fn new(target: impl Into<Target>, params: impl Into<Params>) -> Self {
        Invocation {
            target: target.into(),
            params: params.into(),
        }
    }

    /// Invocation with params only (Create)
    pub fn params(params: impl Into<Params>) -> Self {
        Invocation {
            target: Target::None,
            params: params.into(),
        }
    }

    /// Batch when either side is plural
    pub fn is_batch(&self) -> bool {
        self.target.is_plural() || self.params.is_plural()
    }
}

/// One unit of work handed to a variant: an optional id and its attributes
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionUnit {
    /// Record id, absent for plain creates
    pub id: Option<i64>,
    /// Attributes to apply
    pub attributes: Attributes,
}

impl ExecutionUnit {
    /// Build a unit
    pub fn new(id: Option<i64>, attributes: Attributes) -> Self {
        ExecutionUnit { id, attributes }
    }
}
