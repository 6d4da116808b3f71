//! Contract types for entity addressing
//!
//! ## Module Structure
//!
//! - `entity_name`: Normalized, validated entity names
//! - `entity_ref`: Entity name plus namespace hint, as seen by adapters

pub mod entity_name;
pub mod entity_ref;

// Re-exports
pub use entity_name::{EntityName, EntityNameError, FOREIGN_KEY_SUFFIX, MAX_ENTITY_NAME_LENGTH};
pub use entity_ref::EntityRef;
