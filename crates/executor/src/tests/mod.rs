//! Test modules for the executor crate.

use std::sync::Arc;

use foreman_storage::{MemoryStore, Schema};

use crate::{CommandDefinition, Configuration, Factory};

pub mod dispatch;

/// A memory store with the usual entities and a factory over it.
pub(crate) struct Fixture {
    pub store: Arc<MemoryStore>,
    pub factory: Factory,
}

impl Fixture {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        store
            .define("user", Schema::new(["first_name", "last_name", "employer_id"]))
            .unwrap();
        store
            .define(
                "strict_user",
                Schema::new(["first_name", "employer_id"]).require("last_name"),
            )
            .unwrap();
        store.define("employer", Schema::new(["name"])).unwrap();
        store.define("sports_car", Schema::new(["make", "model"])).unwrap();

        let factory = Factory::new(Arc::new(Configuration::with_default_adapter(store.clone())));
        Fixture { store, factory }
    }

    /// Resolve a token that must be a command.
    pub fn command(&self, token: &str) -> Arc<CommandDefinition> {
        self.factory
            .resolve(token)
            .unwrap()
            .unwrap_or_else(|| panic!("{} should resolve", token))
    }
}
