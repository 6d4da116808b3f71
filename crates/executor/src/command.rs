//! Command definitions and the shared execution template.
//!
//! A [`CommandDefinition`] is what a command token resolves to: the parsed
//! descriptor, the store bindings for its subject (and parent), and the
//! [`Variant`] supplying per-record behavior. Every definition runs through
//! the same template:
//!
//! 1. Check the target against the variant's [`TargetRule`]
//! 2. Decide single or batch mode
//! 3. Resolve query targets to ids through the subject adapter
//! 4. Pair ids with attribute sets into [`ExecutionUnit`]s
//! 5. Run each unit through [`Variant::execute_single`], in order
//!
//! In batch mode a recoverable error on one unit becomes a
//! [`FailureMarker`] at that unit's position and the batch continues; any
//! other error aborts the whole batch.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use foreman_core::{Attributes, Entity, EntityRef, StoreAdapter};

use crate::config::Configuration;
use crate::convert::convert_result;
use crate::descriptor::{Action, Descriptor};
use crate::handlers::{Create, CreateForParent, Delete, Update};
use crate::output::{BatchItem, FailureMarker, Outcome, Output, Record};
use crate::types::{ExecutionUnit, Invocation, Params, Target};
use crate::{Error, Result};

/// Whether a variant acts on existing records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRule {
    /// Takes attributes only; any target is rejected
    NoTarget,
    /// Needs an id, id list or query
    Required,
}

/// The built-in variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// Insert a record
    Create,
    /// Insert a record linked to an existing parent
    CreateForParent,
    /// Modify a record
    Update,
    /// Remove a record
    Delete,
}

impl VariantKind {
    /// Pick the variant for an action. A parent only matters for Create.
    pub fn for_action(action: Action, has_parent: bool) -> Self {
        match action {
            Action::Create if has_parent => VariantKind::CreateForParent,
            Action::Create => VariantKind::Create,
            Action::Update => VariantKind::Update,
            Action::Delete => VariantKind::Delete,
        }
    }

    /// Instantiate the variant
    pub fn into_variant(self) -> Box<dyn Variant> {
        match self {
            VariantKind::Create => Box::new(Create),
            VariantKind::CreateForParent => Box::new(CreateForParent),
            VariantKind::Update => Box::new(Update),
            VariantKind::Delete => Box::new(Delete),
        }
    }
}

/// Per-record behavior plugged into the execution template.
///
/// Implementors override [`execute_single`](Variant::execute_single); the
/// default reports `MethodNotImplemented`, which is never recovered.
pub trait Variant: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Target requirement
    fn target_rule(&self) -> TargetRule {
        TargetRule::Required
    }

    /// Perform one unit of work
    fn execute_single(&self, command: &CommandDefinition, _unit: ExecutionUnit) -> Result<Record> {
        Err(Error::MethodNotImplemented {
            command: command.token().to_string(),
            hook: "execute_single".into(),
        })
    }
}

/// An entity bound to the adapter that stores it
#[derive(Clone)]
pub struct StoreBinding {
    entity: EntityRef,
    adapter: Arc<dyn StoreAdapter>,
}

impl StoreBinding {
    /// Bind `entity` to `adapter`
    pub fn new(entity: EntityRef, adapter: Arc<dyn StoreAdapter>) -> Self {
        StoreBinding { entity, adapter }
    }

    /// The bound entity
    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    /// The bound adapter
    pub fn adapter(&self) -> &Arc<dyn StoreAdapter> {
        &self.adapter
    }

    /// Insert a record
    pub fn create(&self, attrs: Attributes) -> Result<Entity> {
        convert_result(self.adapter.create(&self.entity, attrs))
    }

    /// Update record `id`
    pub fn update(&self, id: i64, attrs: Attributes) -> Result<Entity> {
        convert_result(self.adapter.update(&self.entity, id, attrs))
    }

    /// Delete record `id`
    pub fn delete(&self, id: i64) -> Result<bool> {
        convert_result(self.adapter.delete(&self.entity, id))
    }

    /// Fetch record `id`
    pub fn get(&self, id: i64) -> Result<Entity> {
        convert_result(self.adapter.get(&self.entity, id))
    }

    /// Ids of records matching `conditions`, in adapter order
    pub fn find_all(&self, conditions: &Attributes) -> Result<Vec<i64>> {
        convert_result(self.adapter.find_all(&self.entity, conditions))
    }
}

impl fmt::Debug for StoreBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreBinding")
            .field("entity", &self.entity)
            .field("adapter", &self.adapter.name())
            .finish()
    }
}

/// A resolved, executable command
pub struct CommandDefinition {
    token: String,
    descriptor: Descriptor,
    subject: StoreBinding,
    parent: Option<StoreBinding>,
    relation_key: Option<String>,
    variant: Box<dyn Variant>,
}

impl CommandDefinition {
    /// Bind `descriptor` to its adapters and pair it with `variant`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the subject or parent has no
    /// registered adapter.
    pub fn bind(
        descriptor: Descriptor,
        configuration: &Configuration,
        variant: Box<dyn Variant>,
    ) -> Result<Self> {
        let subject = StoreBinding::new(
            configuration.entity_ref(descriptor.subject().clone()),
            configuration.adapter_for(descriptor.subject())?,
        );
        let parent = match descriptor.parent() {
            Some(name) => Some(StoreBinding::new(
                configuration.entity_ref(name.clone()),
                configuration.adapter_for(name)?,
            )),
            None => None,
        };
        let relation_key = descriptor.parent().map(|name| name.foreign_key());

        Ok(CommandDefinition {
            token: descriptor.to_string(),
            descriptor,
            subject,
            parent,
            relation_key,
            variant,
        })
    }

    /// Canonical command token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Parsed descriptor
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// The subject binding
    pub fn subject(&self) -> &StoreBinding {
        &self.subject
    }

    /// The parent binding, for parent-scoped creates
    pub fn parent(&self) -> Option<&StoreBinding> {
        self.parent.as_ref()
    }

    /// Foreign-key attribute written on the subject (`employer_id`)
    pub fn relation_key(&self) -> Option<&str> {
        self.relation_key.as_deref()
    }

    /// Short name of the variant
    pub fn variant_name(&self) -> &'static str {
        self.variant.name()
    }

    /// The id of `unit`, which this command requires
    pub fn require_id(&self, unit: &ExecutionUnit) -> Result<i64> {
        unit.id
            .ok_or_else(|| Error::invalid_id(format!("{} requires a target id", self.token)))
    }

    /// Run, reporting recoverable errors as a failed [`Outcome`].
    ///
    /// # Errors
    ///
    /// `InvalidId`, `MethodNotImplemented`, `Configuration` and untranslated
    /// adapter errors are returned as `Err`.
    pub fn run(&self, invocation: Invocation) -> Result<Outcome> {
        match self.execute(invocation) {
            Ok(output) => Ok(Outcome::succeeded(output)),
            Err(e) if e.is_recoverable() => {
                debug!(target: "foreman::command", command = %self.token, error = %e, "Command failed");
                Ok(Outcome::failed(e))
            }
            Err(e) => Err(e),
        }
    }

    /// Run, returning every error as `Err`.
    ///
    /// Batch item failures are still reported in place as markers.
    pub fn run_strict(&self, invocation: Invocation) -> Result<Output> {
        self.execute(invocation)
    }

    /// [`run`](Self::run) with a target and params
    pub fn go(&self, target: impl Into<Target>, params: impl Into<Params>) -> Result<Outcome> {
        self.run(Invocation::new(target, params))
    }

    /// [`run_strict`](Self::run_strict) with a target and params
    pub fn go_strict(&self, target: impl Into<Target>, params: impl Into<Params>) -> Result<Output> {
        self.run_strict(Invocation::new(target, params))
    }

    fn execute(&self, invocation: Invocation) -> Result<Output> {
        self.check_target(&invocation.target)?;

        let batch = invocation.is_batch();
        debug!(
            target: "foreman::command",
            command = %self.token,
            variant = self.variant.name(),
            batch,
            "Executing command"
        );

        let Invocation { target, params } = invocation;
        match params {
            Params::One(attributes) if !batch => self
                .execute_unit(ExecutionUnit::new(target.single_id(), attributes))
                .map(Output::Single),
            params => self.execute_batch(target, params).map(Output::Batch),
        }
    }

    fn check_target(&self, target: &Target) -> Result<()> {
        match (self.variant.target_rule(), target) {
            (TargetRule::NoTarget, Target::None) | (TargetRule::Required, Target::Id(_)) => Ok(()),
            (TargetRule::Required, Target::Ids(_) | Target::Query(_)) => Ok(()),
            (TargetRule::NoTarget, _) => Err(Error::invalid_id(format!(
                "{} takes no target id; pass attributes only",
                self.token
            ))),
            (TargetRule::Required, Target::None) => Err(Error::invalid_id(format!(
                "{} requires a target id",
                self.token
            ))),
        }
    }

    fn execute_unit(&self, unit: ExecutionUnit) -> Result<Record> {
        self.variant.execute_single(self, unit)
    }

    fn execute_batch(&self, target: Target, params: Params) -> Result<Vec<BatchItem>> {
        let units = self.plan_batch(target, params)?;
        let mut items = Vec::with_capacity(units.len());

        for unit in units {
            let id = unit.id;
            match self.execute_unit(unit) {
                Ok(record) => items.push(BatchItem::Ok(record)),
                Err(e) if e.is_recoverable() => {
                    warn!(
                        target: "foreman::command",
                        command = %self.token,
                        id = ?id,
                        error = %e,
                        "Batch item failed"
                    );
                    items.push(BatchItem::Failed(FailureMarker::new(id, &e)));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(items)
    }

    fn plan_batch(&self, target: Target, params: Params) -> Result<Vec<ExecutionUnit>> {
        match target {
            Target::Query(conditions) => {
                let ids = self.subject.find_all(&conditions)?;
                debug!(target: "foreman::command", command = %self.token, matched = ids.len(), "Resolved query target");
                pair_ids(ids, params)
            }
            Target::Ids(ids) => pair_ids(ids, params),
            Target::Id(id) => Ok(units_for(Some(id), params)),
            Target::None => Ok(units_for(None, params)),
        }
    }
}

/// Pair each id with its attribute set: a single set is shared, a list must
/// match the ids one to one.
fn pair_ids(ids: Vec<i64>, params: Params) -> Result<Vec<ExecutionUnit>> {
    match params {
        Params::One(attrs) => Ok(ids
            .into_iter()
            .map(|id| ExecutionUnit::new(Some(id), attrs.clone()))
            .collect()),
        Params::Each(list) => {
            if list.len() != ids.len() {
                return Err(Error::invalid(format!(
                    "{} target ids but {} attribute sets",
                    ids.len(),
                    list.len()
                )));
            }
            Ok(ids
                .into_iter()
                .zip(list)
                .map(|(id, attrs)| ExecutionUnit::new(Some(id), attrs))
                .collect())
        }
    }
}

fn units_for(id: Option<i64>, params: Params) -> Vec<ExecutionUnit> {
    match params {
        Params::One(attrs) => vec![ExecutionUnit::new(id, attrs)],
        Params::Each(list) => list
            .into_iter()
            .map(|attrs| ExecutionUnit::new(id, attrs))
            .collect(),
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("token", &self.token)
            .field("variant", &self.variant.name())
            .field("subject", &self.subject)
            .field("parent", &self.parent)
            .field("relation_key", &self.relation_key)
            .finish()
    }
}
