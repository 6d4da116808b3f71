//! Entity records
//!
//! An [`Entity`] is what a store adapter hands back after a create, update
//! or get: the integer id it assigned plus the stored attributes.

use serde::{Deserialize, Serialize};

use crate::value::{Attributes, Value};

/// A stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Adapter-assigned id
    pub id: i64,
    /// Stored attributes (excluding `id`)
    #[serde(default)]
    pub attributes: Attributes,
}

impl Entity {
    /// Create an entity from an id and its attributes
    pub fn new(id: i64, attributes: Attributes) -> Self {
        Entity { id, attributes }
    }

    /// Read an attribute
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    /// Read an integer attribute
    pub fn get_int(&self, attribute: &str) -> Option<i64> {
        self.get(attribute).and_then(Value::as_int)
    }

    /// Read a string attribute
    pub fn get_str(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).and_then(Value::as_str)
    }
}

/// Anything that can stand in for a record id.
///
/// Commands accept raw ids, entities, and previous batch results
/// interchangeably; this trait is the common view. `None` means the value
/// carries no usable id (for example a failed create).
pub trait Identify {
    /// The record id, if there is one
    fn identify(&self) -> Option<i64>;
}

impl Identify for i64 {
    fn identify(&self) -> Option<i64> {
        Some(*self)
    }
}

impl Identify for Entity {
    fn identify(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl<T: Identify + ?Sized> Identify for &T {
    fn identify(&self) -> Option<i64> {
        (**self).identify()
    }
}
