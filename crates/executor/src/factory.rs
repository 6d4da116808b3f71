//! The Factory - resolves command tokens to command definitions.
//!
//! Resolution parses the token, picks the variant, binds adapters from the
//! factory's [`Configuration`], and memoizes the result. Tokens that do not
//! parse are not an error: `resolve` returns `Ok(None)` so callers can fall
//! through to whatever else handles unknown names.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::command::{CommandDefinition, Variant, VariantKind};
use crate::config::{self, Configuration};
use crate::descriptor::Descriptor;
use crate::{Error, Result};

/// Memoizing command resolver.
///
/// # Thread Safety
///
/// `Factory` is `Send + Sync`. Concurrent first resolutions of the same
/// token produce exactly one definition; the cache lock is held while it
/// is built.
///
/// # Example
///
/// ```ignore
/// use foreman_executor::{Configuration, Factory};
///
/// let factory = Factory::new(Arc::new(Configuration::with_default_adapter(store)));
/// let create_user = factory.resolve("CreateUser")?.expect("is a command");
/// let outcome = create_user.go((), attrs! { "last_name" => "Turner" })?;
/// ```
pub struct Factory {
    configuration: Arc<Configuration>,
    definitions: Mutex<HashMap<Descriptor, Arc<CommandDefinition>>>,
}

impl Factory {
    /// Create a factory binding adapters from `configuration`.
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Factory {
            configuration,
            definitions: Mutex::new(HashMap::new()),
        }
    }

    /// Create a factory over the process-wide configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if none has been installed.
    pub fn global() -> Result<Self> {
        Ok(Self::new(config::current()?))
    }

    /// The configuration adapters are bound from
    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    /// Resolve a command token.
    ///
    /// Returns `Ok(None)` if `token` is not a command token. Repeated
    /// resolution of the same command returns the same definition.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the token is a command but its
    /// entities have no adapter.
    pub fn resolve(&self, token: &str) -> Result<Option<Arc<CommandDefinition>>> {
        match Descriptor::parse(token) {
            Ok(descriptor) => self.resolve_descriptor(&descriptor).map(Some),
            Err(reason) => {
                debug!(target: "foreman::factory", token, %reason, "Not a command token");
                Ok(None)
            }
        }
    }

    /// Resolve an already-parsed descriptor.
    pub fn resolve_descriptor(&self, descriptor: &Descriptor) -> Result<Arc<CommandDefinition>> {
        let mut definitions = self.definitions.lock();
        if let Some(definition) = definitions.get(descriptor) {
            return Ok(Arc::clone(definition));
        }

        let kind = VariantKind::for_action(descriptor.action(), descriptor.parent().is_some());
        let definition = Arc::new(CommandDefinition::bind(
            descriptor.clone(),
            &self.configuration,
            kind.into_variant(),
        )?);
        info!(
            target: "foreman::factory",
            command = definition.token(),
            variant = definition.variant_name(),
            adapter = definition.subject().adapter().name(),
            "Defined command"
        );
        definitions.insert(descriptor.clone(), Arc::clone(&definition));
        Ok(definition)
    }

    /// Define a command with a custom variant.
    ///
    /// Must happen before the token is first resolved; resolution then
    /// returns this definition instead of a built-in one.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if `token` is not a command token,
    /// is already defined, or its entities have no adapter.
    pub fn define(&self, token: &str, variant: Box<dyn Variant>) -> Result<Arc<CommandDefinition>> {
        let descriptor = Descriptor::parse(token).map_err(|e| {
            Error::configuration(format!("cannot define '{}': {}", token, e))
        })?;

        let mut definitions = self.definitions.lock();
        if definitions.contains_key(&descriptor) {
            return Err(Error::configuration(format!(
                "command {} is already defined",
                descriptor
            )));
        }

        let definition = Arc::new(CommandDefinition::bind(
            descriptor.clone(),
            &self.configuration,
            variant,
        )?);
        info!(
            target: "foreman::factory",
            command = definition.token(),
            variant = definition.variant_name(),
            "Defined custom command"
        );
        definitions.insert(descriptor, Arc::clone(&definition));
        Ok(definition)
    }

    /// Whether `token` has already been resolved or defined
    pub fn contains(&self, token: &str) -> bool {
        Descriptor::parse(token)
            .map(|descriptor| self.definitions.lock().contains_key(&descriptor))
            .unwrap_or(false)
    }

    /// Number of memoized definitions
    pub fn len(&self) -> usize {
        self.definitions.lock().len()
    }

    /// Whether nothing has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.definitions.lock().is_empty()
    }

    /// Forget every memoized definition
    pub fn reset(&self) {
        self.definitions.lock().clear();
    }
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("configuration", &self.configuration)
            .field("definitions", &self.len())
            .finish()
    }
}
