//! Update handler.

use crate::command::{CommandDefinition, Variant};
use crate::output::Record;
use crate::types::{ExecutionUnit, ID_KEY};
use crate::Result;

/// Applies the unit's attributes to an existing subject record.
///
/// An `id` entry in the attributes is dropped; the target id wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct Update;

impl Variant for Update {
    fn name(&self) -> &'static str {
        "update"
    }

    fn execute_single(&self, command: &CommandDefinition, unit: ExecutionUnit) -> Result<Record> {
        let id = command.require_id(&unit)?;
        let mut attrs = unit.attributes;
        attrs.remove(ID_KEY);
        let entity = command.subject().update(id, attrs)?;
        Ok(Record::Entity(entity))
    }
}
