//! Entity reference type
//!
//! Every store operation addresses an entity type through an [`EntityRef`]:
//! the normalized entity name plus an optional namespace hint taken from
//! configuration. The namespace is opaque to Foreman; adapters decide what
//! it means (a schema, a module path, a table prefix).
//!
//! ## Usage
//!
//! ```
//! use foreman_core::{EntityName, EntityRef};
//!
//! let user = EntityRef::new(EntityName::new("user").unwrap());
//! assert_eq!(user.to_string(), "user");
//!
//! let scoped = user.with_namespace("billing");
//! assert_eq!(scoped.to_string(), "billing::user");
//! ```

use super::EntityName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to an entity type held by a store adapter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Namespace hint, passed through to adapters unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Normalized entity name
    pub name: EntityName,
}

impl EntityRef {
    /// Reference an entity without a namespace
    pub fn new(name: EntityName) -> Self {
        EntityRef {
            namespace: None,
            name,
        }
    }

    /// Attach a namespace hint
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// The entity name
    pub fn name(&self) -> &EntityName {
        &self.name
    }

    /// The namespace hint, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}::{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl From<EntityName> for EntityRef {
    fn from(name: EntityName) -> Self {
        EntityRef::new(name)
    }
}
