//! Store adapter abstraction
//!
//! This module defines the [`StoreAdapter`] trait: the only contract Foreman
//! expects from the data store behind its commands. Real database
//! integrations live outside this workspace and implement it; the
//! `foreman-storage` crate ships an in-memory implementation.

use crate::contract::EntityRef;
use crate::entity::Entity;
use crate::error::StoreResult;
use crate::value::Attributes;

/// Create/update/delete/get/find-all against a named entity type
///
/// Thread safety: implementations are shared behind `Arc` and must be
/// `Send + Sync`. Foreman never calls an adapter concurrently from within a
/// single invocation; batch execution is sequential and ordered.
///
/// Ids are integers assigned by the adapter.
pub trait StoreAdapter: Send + Sync {
    /// Adapter name, used in logs and configuration
    fn name(&self) -> &str;

    /// Create a record from `attrs`
    ///
    /// # Errors
    ///
    /// `RecordInvalid` when the record fails validation, `UnknownAttribute`
    /// when `attrs` names an attribute the entity does not have.
    fn create(&self, entity: &EntityRef, attrs: Attributes) -> StoreResult<Entity>;

    /// Apply `attrs` to record `id`
    ///
    /// # Errors
    ///
    /// `RecordNotFound`, `RecordInvalid`, `UnknownAttribute`.
    fn update(&self, entity: &EntityRef, id: i64, attrs: Attributes) -> StoreResult<Entity>;

    /// Delete record `id`, returning whether a record was removed
    ///
    /// # Errors
    ///
    /// `RecordNotFound` when no such record exists.
    fn delete(&self, entity: &EntityRef, id: i64) -> StoreResult<bool>;

    /// Fetch record `id`
    ///
    /// # Errors
    ///
    /// `RecordNotFound` when no such record exists.
    fn get(&self, entity: &EntityRef, id: i64) -> StoreResult<Entity>;

    /// Ids of every record whose attributes match all `conditions`
    ///
    /// The returned order is the adapter's and is preserved by callers.
    fn find_all(&self, entity: &EntityRef, conditions: &Attributes) -> StoreResult<Vec<i64>>;
}
