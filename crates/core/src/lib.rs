//! Core types and traits for Foreman
//!
//! This crate defines the foundational types used throughout the system:
//! - Value / Attributes: Attribute data exchanged with adapters
//! - EntityName / EntityRef: Validated entity addressing
//! - Entity / Identify: Stored records and anything carrying a record id
//! - StoreError: Adapter-level error vocabulary
//! - StoreAdapter: The contract expected from a backing data store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod entity;
pub mod error;
pub mod traits;
pub mod value;

pub use contract::{
    EntityName, EntityNameError, EntityRef, FOREIGN_KEY_SUFFIX, MAX_ENTITY_NAME_LENGTH,
};
pub use entity::{Entity, Identify};
pub use error::{StoreError, StoreErrorClass, StoreResult};
pub use traits::StoreAdapter;
pub use value::{Attributes, Value};
