//! MemoryStore: in-process store adapter
//!
//! This module implements the [`StoreAdapter`] trait using:
//! - `BTreeMap<EntityName, Table>` for per-entity tables
//! - `BTreeMap<i64, Attributes>` rows, so scans come back in id order
//! - `parking_lot::RwLock` for thread-safe access
//!
//! # Design Notes
//!
//! - **Namespace-blind**: tables are keyed by entity name only; the namespace
//!   hint on an [`EntityRef`] is accepted and ignored
//! - **Ids per table**: each table hands out ids from 1, never reused
//! - **All-or-nothing writes**: a write that fails validation leaves the row untouched

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::debug;

use foreman_core::{
    Attributes, Entity, EntityName, EntityNameError, EntityRef, StoreAdapter, StoreError,
    StoreResult, Value,
};

use crate::schema::Schema;

/// Attribute name reserved for the store-assigned id
pub const ID_ATTRIBUTE: &str = "id";

#[derive(Debug)]
struct Table {
    schema: Schema,
    next_id: i64,
    rows: BTreeMap<i64, Attributes>,
}

impl Table {
    fn new(schema: Schema) -> Self {
        Table {
            schema,
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }

    fn check_attributes(&self, entity: &EntityRef, attrs: &Attributes) -> StoreResult<()> {
        if attrs.contains_key(ID_ATTRIBUTE) {
            return Err(StoreError::invalid(format!(
                "'{}' is assigned by the store and cannot be written",
                ID_ATTRIBUTE
            )));
        }
        match self.schema.first_unknown(attrs) {
            Some(attribute) => Err(StoreError::unknown_attribute(entity.clone(), attribute)),
            None => Ok(()),
        }
    }

    fn check_record(&self, entity: &EntityRef, record: &Attributes) -> StoreResult<()> {
        let violations = self.schema.violations(record);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(StoreError::invalid_record(entity.clone(), violations))
        }
    }
}

/// In-memory store adapter
///
/// Entity types must be declared with [`MemoryStore::define`] before use;
/// operations on an undeclared entity fail with `UnknownEntity`.
#[derive(Debug)]
pub struct MemoryStore {
    name: String,
    tables: RwLock<BTreeMap<EntityName, Table>>,
}

impl MemoryStore {
    /// Create an empty store named `memory`
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// Create an empty store with a custom adapter name
    pub fn named(name: impl Into<String>) -> Self {
        MemoryStore {
            name: name.into(),
            tables: RwLock::new(BTreeMap::new()),
        }
    }

    /// Declare an entity table, replacing any previous declaration and its rows
    ///
    /// # Errors
    ///
    /// Returns `EntityNameError` if `entity` is not a valid entity name.
    pub fn define(&self, entity: &str, schema: Schema) -> Result<(), EntityNameError> {
        let name = EntityName::new(entity)?;
        debug!(target: "foreman::storage", store = %self.name, entity = %name, "Defined entity table");
        self.tables.write().insert(name, Table::new(schema));
        Ok(())
    }

    /// Number of records stored for `entity` (0 when undeclared)
    pub fn count(&self, entity: &str) -> usize {
        self.tables
            .read()
            .iter()
            .find(|(name, _)| name.as_str() == entity)
            .map_or(0, |(_, table)| table.rows.len())
    }

    /// Drop every row of every table, keeping schemas and id counters
    pub fn clear(&self) {
        for table in self.tables.write().values_mut() {
            table.rows.clear();
        }
    }

    fn with_table<T>(
        &self,
        entity: &EntityRef,
        f: impl FnOnce(&Table) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let tables = self.tables.read();
        let table = tables
            .get(entity.name())
            .ok_or_else(|| StoreError::unknown_entity(entity.clone()))?;
        f(table)
    }

    fn with_table_mut<T>(
        &self,
        entity: &EntityRef,
        f: impl FnOnce(&mut Table) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut tables = self.tables.write();
        let table = tables
            .get_mut(entity.name())
            .ok_or_else(|| StoreError::unknown_entity(entity.clone()))?;
        f(table)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreAdapter for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, entity: &EntityRef, attrs: Attributes) -> StoreResult<Entity> {
        self.with_table_mut(entity, |table| {
            table.check_attributes(entity, &attrs)?;
            table.check_record(entity, &attrs)?;

            let id = table.next_id;
            table.next_id += 1;
            table.rows.insert(id, attrs.clone());
            Ok(Entity::new(id, attrs))
        })
    }

    fn update(&self, entity: &EntityRef, id: i64, attrs: Attributes) -> StoreResult<Entity> {
        self.with_table_mut(entity, |table| {
            table.check_attributes(entity, &attrs)?;

            let mut record = table
                .rows
                .get(&id)
                .cloned()
                .ok_or_else(|| StoreError::not_found(entity.clone(), id))?;
            record.extend(attrs);
            table.check_record(entity, &record)?;

            table.rows.insert(id, record.clone());
            Ok(Entity::new(id, record))
        })
    }

    fn delete(&self, entity: &EntityRef, id: i64) -> StoreResult<bool> {
        self.with_table_mut(entity, |table| match table.rows.remove(&id) {
            Some(_) => Ok(true),
            None => Err(StoreError::not_found(entity.clone(), id)),
        })
    }

    fn get(&self, entity: &EntityRef, id: i64) -> StoreResult<Entity> {
        self.with_table(entity, |table| {
            table
                .rows
                .get(&id)
                .map(|attrs| Entity::new(id, attrs.clone()))
                .ok_or_else(|| StoreError::not_found(entity.clone(), id))
        })
    }

    fn find_all(&self, entity: &EntityRef, conditions: &Attributes) -> StoreResult<Vec<i64>> {
        self.with_table(entity, |table| {
            if let Some(attribute) = table.schema.first_unknown(conditions) {
                return Err(StoreError::unknown_attribute(entity.clone(), attribute));
            }

            let ids = table
                .rows
                .iter()
                .filter(|(_, record)| {
                    conditions.iter().all(|(name, expected)| {
                        record.get(name).unwrap_or(&Value::Null) == expected
                    })
                })
                .map(|(id, _)| *id)
                .collect();
            Ok(ids)
        })
    }
}
