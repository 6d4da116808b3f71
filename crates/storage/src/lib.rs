//! Storage layer for Foreman
//!
//! This crate provides a reference [`StoreAdapter`](foreman_core::StoreAdapter):
//! - MemoryStore: BTreeMap tables behind a `parking_lot::RwLock`
//! - Schema: attribute whitelist and presence rules per entity
//!
//! It stands in for a real database integration in tests, demos and
//! embedded use.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod schema;

pub use memory::{MemoryStore, ID_ATTRIBUTE};
pub use schema::Schema;
