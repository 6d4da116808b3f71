//! CreateForParent handler.
//!
//! The unit id names the parent. The parent is fetched first so a missing
//! parent fails with `RecordNotFound` before anything is written; the new
//! subject record gets the parent's id under the relation key, overriding
//! any caller-supplied value.

use foreman_core::Value;

use crate::command::{CommandDefinition, Variant};
use crate::output::Record;
use crate::types::{ExecutionUnit, ID_KEY};
use crate::{Error, Result};

/// Inserts a subject record linked to an existing parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateForParent;

impl Variant for CreateForParent {
    fn name(&self) -> &'static str {
        "create_for_parent"
    }

    fn execute_single(&self, command: &CommandDefinition, unit: ExecutionUnit) -> Result<Record> {
        let parent_id = command.require_id(&unit)?;
        let (parent, relation_key) = command
            .parent()
            .zip(command.relation_key())
            .ok_or_else(|| {
                Error::configuration(format!("{} has no parent entity bound", command.token()))
            })?;

        let parent = parent.get(parent_id)?;

        let mut attrs = unit.attributes;
        attrs.remove(ID_KEY);
        attrs.insert(relation_key.to_string(), Value::Int(parent.id));

        let entity = command.subject().create(attrs)?;
        Ok(Record::Entity(entity))
    }
}
