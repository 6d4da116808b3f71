//! Delete handler.

use crate::command::{CommandDefinition, Variant};
use crate::output::Record;
use crate::types::ExecutionUnit;
use crate::Result;

/// Removes an existing subject record. Attributes are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delete;

impl Variant for Delete {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn execute_single(&self, command: &CommandDefinition, unit: ExecutionUnit) -> Result<Record> {
        let id = command.require_id(&unit)?;
        let deleted = command.subject().delete(id)?;
        Ok(Record::Deleted(deleted))
    }
}
