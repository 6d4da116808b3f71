//! Entity schemas for the in-memory store
//!
//! A [`Schema`] lists the attributes an entity may carry and which of them
//! must be present and non-null. It is the minimum needed to exercise the
//! `UnknownAttribute` and `RecordInvalid` paths of the adapter contract.

use std::collections::BTreeSet;

use foreman_core::{Attributes, Value};

/// Attribute whitelist plus presence rules for one entity type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    attributes: BTreeSet<String>,
    required: BTreeSet<String>,
}

impl Schema {
    /// Schema with the given attributes, none required
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema {
            attributes: attributes.into_iter().map(Into::into).collect(),
            required: BTreeSet::new(),
        }
    }

    /// Mark `attribute` as required (present and not null).
    ///
    /// Adds it to the known attributes if it was not already listed.
    pub fn require(mut self, attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        self.attributes.insert(attribute.clone());
        self.required.insert(attribute);
        self
    }

    /// Whether `attribute` belongs to this schema
    pub fn knows(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }

    /// First attribute in `attrs` this schema does not know
    pub fn first_unknown<'a>(&self, attrs: &'a Attributes) -> Option<&'a str> {
        attrs
            .keys()
            .map(String::as_str)
            .find(|name| !self.knows(name))
    }

    /// Validation messages for a complete record, empty when valid
    pub fn violations(&self, record: &Attributes) -> Vec<String> {
        self.required
            .iter()
            .filter(|name| record.get(*name).map_or(true, Value::is_null))
            .map(|name| format!("{} can't be blank", name))
            .collect()
    }
}
