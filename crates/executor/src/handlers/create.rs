//! Create handler.

use crate::command::{CommandDefinition, TargetRule, Variant};
use crate::output::Record;
use crate::types::ExecutionUnit;
use crate::Result;

/// Inserts one subject record per unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Create;

impl Variant for Create {
    fn name(&self) -> &'static str {
        "create"
    }

    fn target_rule(&self) -> TargetRule {
        TargetRule::NoTarget
    }

    fn execute_single(&self, command: &CommandDefinition, unit: ExecutionUnit) -> Result<Record> {
        let entity = command.subject().create(unit.attributes)?;
        Ok(Record::Entity(entity))
    }
}
